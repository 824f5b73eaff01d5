use crate::fixtures::*;
use sentiment_classification::pipelines::sentiment_analysis_pipeline::*;

fn analyzer() -> anyhow::Result<SentimentAnalyzer<FixedScoresModel>> {
    Ok(SentimentAnalyzer::new(build_classifier(FixedScores::sentiment())?))
}

#[test]
fn analyze_text_positive() -> anyhow::Result<()> {
    let line = analyzer()?.analyze_text(LOVE)?;
    assert!(line.contains("Positive"));
    let (label, confidence) = parse_formatted(&line);
    assert_eq!(label, Label::Positive);
    assert!(confidence > 0.5);
    Ok(())
}

#[test]
fn analyze_text_negative() -> anyhow::Result<()> {
    let line = analyzer()?.analyze_text(TERRIBLE)?;
    assert!(line.contains("Negative"));
    let (_, confidence) = parse_formatted(&line);
    assert!(confidence > 0.5);
    Ok(())
}

#[test]
fn analyze_text_exact_format() -> anyhow::Result<()> {
    // softmax([0.3, 0.1]) picks class 0 with 1 / (1 + e^-0.2)
    let line = analyzer()?.analyze_text(OKAY)?;
    assert_eq!(line, "Sentiment: Negative, with confidence 0.5498");
    Ok(())
}

#[test]
fn analyze_batch_formats_every_item() -> anyhow::Result<()> {
    let analyzer = analyzer()?;
    let lines = analyzer.analyze_batch(&[LOVE, TERRIBLE, OKAY])?;

    assert_eq!(lines.len(), 3);
    let labels: Vec<Label> = lines.iter().map(|l| parse_formatted(l).0).collect();
    assert_eq!(labels, vec![Label::Positive, Label::Negative, Label::Negative]);
    Ok(())
}

#[test]
fn analyze_batch_matches_analyze_text() -> anyhow::Result<()> {
    let analyzer = analyzer()?;
    let lines = analyzer.analyze_batch(&[OKAY, LOVE])?;
    assert_eq!(lines[0], analyzer.analyze_text(OKAY)?);
    assert_eq!(lines[1], analyzer.analyze_text(LOVE)?);
    Ok(())
}

#[test]
fn analyze_empty_batch() -> anyhow::Result<()> {
    let lines = analyzer()?.analyze_batch::<&str>(&[])?;
    assert!(lines.is_empty());
    Ok(())
}

#[test]
fn analyzer_propagates_classifier_errors() -> anyhow::Result<()> {
    let err = analyzer()?.analyze_text("unknown").unwrap_err();
    assert!(matches!(err, SentimentError::InvalidInput(_)));
    Ok(())
}
