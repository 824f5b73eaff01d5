use sentiment_classification::pipelines::sentiment_analysis_pipeline::*;
use std::time::Instant;

const RUNS: u32 = 3;

fn main() -> anyhow::Result<()> {
    let texts = [
        "I love this!",
        "This is terrible.",
        "It could be better, but it's not bad.",
        "Absolutely wonderful experience.",
        "I will never use this again.",
    ];

    // Extra checkpoint ids on the command line are benchmarked side by side.
    let mut model_ids: Vec<String> = std::env::args().skip(1).collect();
    if model_ids.is_empty() {
        model_ids.push(DistilBertOptions::default().model_id);
    }

    println!("=== Sentiment Classification Benchmark ===");
    println!("{} phrases, {RUNS} runs each, CPU\n", texts.len());

    for model_id in &model_ids {
        println!("{model_id}");

        let start = Instant::now();
        let classifier = SentimentClassifierBuilder::distilbert()
            .model_id(model_id.as_str())
            .cpu()
            .build()?;
        println!("   Build time: {:?}", start.elapsed());

        // Warm up
        classifier.classify_many(&texts)?;

        let start = Instant::now();
        for _ in 0..RUNS {
            classifier.classify_many(&texts)?;
        }
        let batched = start.elapsed() / RUNS;
        println!("   classify_many, one forward pass: {batched:?}");

        let start = Instant::now();
        for _ in 0..RUNS {
            for text in &texts {
                classifier.classify_one(text)?;
            }
        }
        let sequential = start.elapsed() / RUNS;
        println!("   classify_one x {}: {sequential:?}", texts.len());

        println!(
            "   Per phrase: {:?} batched vs {:?} sequential\n",
            batched / texts.len() as u32,
            sequential / texts.len() as u32
        );

        classifier.shutdown();
    }

    Ok(())
}
