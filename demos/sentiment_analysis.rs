use anyhow::Result;
use sentiment_classification::pipelines::sentiment_analysis_pipeline::*;

fn main() -> Result<()> {
    println!("Building classifier...");

    let classifier = SentimentClassifierBuilder::distilbert().build()?;

    println!("Classifier built on {:?}.", classifier.device().location());

    let text = "I love my new car";

    let result = classifier.classify_one(text)?;

    println!("\n=== Sentiment Analysis Result ===");
    println!("Text: \"{}\"", text);
    println!("Sentiment: {} (confidence: {:.4})", result.label(), result.confidence());

    Ok(())
}
