use crate::fixtures::*;
use sentiment_classification::pipelines::sentiment_analysis_pipeline::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

#[test]
fn classify_one_picks_the_winning_label() -> anyhow::Result<()> {
    let classifier = build_classifier(FixedScores::sentiment())?;

    let positive = classifier.classify_one(LOVE)?;
    assert_eq!(positive.label(), Label::Positive);
    assert!(positive.confidence() > 0.5 && positive.confidence() <= 1.0);

    let negative = classifier.classify_one(TERRIBLE)?;
    assert_eq!(negative.label(), Label::Negative);
    assert!(negative.confidence() > 0.5);
    Ok(())
}

#[test]
fn probabilities_sum_to_one() -> anyhow::Result<()> {
    let classifier = build_classifier(FixedScores::sentiment())?;
    for text in [LOVE, TERRIBLE, OKAY] {
        let [negative, positive] = classifier.classify_one(text)?.probabilities();
        assert!((negative + positive - 1.0).abs() < 1e-6);
    }
    Ok(())
}

#[test]
fn classify_one_is_deterministic() -> anyhow::Result<()> {
    let classifier = build_classifier(FixedScores::sentiment())?;
    let first = classifier.classify_one(OKAY)?;
    let second = classifier.classify_one(OKAY)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn empty_text_is_classified() -> anyhow::Result<()> {
    let classifier = build_classifier(FixedScores::sentiment())?;
    let result = classifier.classify_one("")?;
    assert_eq!(result.label(), Label::Negative);
    Ok(())
}

#[test]
fn invalid_input_leaves_classifier_usable() -> anyhow::Result<()> {
    let classifier = build_classifier(FixedScores::sentiment())?;

    let err = classifier.classify_one("never seen before").unwrap_err();
    assert!(matches!(err, SentimentError::InvalidInput(_)));

    assert_eq!(classifier.classify_one(LOVE)?.label(), Label::Positive);
    Ok(())
}

#[test]
fn panicked_call_leaves_classifier_usable() -> anyhow::Result<()> {
    let scores = FixedScores::sentiment();
    let classifier = build_classifier(scores.clone())?;

    scores.crash_next_pass();
    let crashed = catch_unwind(AssertUnwindSafe(|| classifier.classify_one(LOVE)));
    assert!(crashed.is_err());

    assert_eq!(classifier.classify_one(LOVE)?.label(), Label::Positive);
    assert_eq!(classifier.classify_many(&[TERRIBLE, OKAY])?.len(), 2);
    assert_eq!(scores.forward_passes(), 3);
    Ok(())
}

#[test]
fn swapped_checkpoint_labels_fail_construction() {
    let scores = FixedScores::sentiment().with_id2label(&[("0", "POSITIVE"), ("1", "NEGATIVE")]);
    assert!(matches!(
        build_classifier(scores),
        Err(SentimentError::IncompatibleLabels { .. })
    ));
}

#[test]
fn three_label_checkpoint_fails_construction() {
    let scores = FixedScores::sentiment().with_id2label(&[
        ("0", "negative"),
        ("1", "neutral"),
        ("2", "positive"),
    ]);
    assert!(matches!(
        build_classifier(scores),
        Err(SentimentError::IncompatibleLabels { .. })
    ));
}

#[test]
fn missing_label_metadata_falls_back_to_pinned_mapping() -> anyhow::Result<()> {
    let classifier = build_classifier(FixedScores::sentiment().without_id2label())?;
    assert_eq!(*classifier.labels(), LabelMapping::binary());
    assert_eq!(classifier.classify_one(LOVE)?.label(), Label::Positive);
    Ok(())
}

#[test]
fn device_is_fixed_at_construction() -> anyhow::Result<()> {
    let classifier = build_classifier(FixedScores::sentiment())?;
    assert!(classifier.device().is_cpu());
    Ok(())
}

#[test]
fn shared_classifier_serializes_concurrent_calls() -> anyhow::Result<()> {
    let scores = FixedScores::sentiment();
    let classifier = Arc::new(build_classifier(scores.clone())?);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let classifier = Arc::clone(&classifier);
            std::thread::spawn(move || classifier.classify_many(&[LOVE, TERRIBLE]))
        })
        .collect();

    for handle in handles {
        let results = handle.join().expect("worker panicked")?;
        assert_eq!(results[0].label(), Label::Positive);
        assert_eq!(results[1].label(), Label::Negative);
    }
    assert_eq!(scores.forward_passes(), 4);
    Ok(())
}

#[test]
fn shutdown_releases_the_model() -> anyhow::Result<()> {
    let classifier = build_classifier(FixedScores::sentiment())?;
    classifier.classify_one(LOVE)?;
    classifier.shutdown();
    Ok(())
}
