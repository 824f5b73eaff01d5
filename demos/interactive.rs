//! Reads phrases from stdin and prints their sentiment.
//!
//! A blank line classifies the phrases entered so far as one batch; `exit`
//! quits. Set `RUST_LOG=sentiment_classification=debug` to see model loading
//! and batch shapes.

use anyhow::Result;
use sentiment_classification::pipelines::sentiment_analysis_pipeline::*;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

enum Input {
    Batch(Vec<String>),
    Exit,
}

fn read_phrases(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Input> {
    println!("Enter the phrases you want to classify (one per line).");
    println!("Enter a blank line to classify, or 'exit' to finish.");

    let mut phrases = Vec::new();
    loop {
        print!("Phrase: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(if phrases.is_empty() {
                Input::Exit
            } else {
                Input::Batch(phrases)
            });
        };
        let phrase = line?;
        let phrase = phrase.trim_end_matches(['\r', '\n']);

        if phrase.eq_ignore_ascii_case("exit") {
            return Ok(Input::Exit);
        }
        if phrase.is_empty() {
            return Ok(Input::Batch(phrases));
        }
        phrases.push(phrase.to_string());
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let classifier = SentimentClassifierBuilder::distilbert().build()?;
    let analyzer = SentimentAnalyzer::new(classifier);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let phrases = match read_phrases(&mut lines)? {
            Input::Exit => {
                println!("Exiting...");
                break;
            }
            Input::Batch(phrases) => phrases,
        };
        if phrases.is_empty() {
            println!("No phrases to classify. Please enter some phrases.");
            continue;
        }

        match analyzer.analyze_batch(&phrases) {
            Ok(results) => {
                println!("Classification results:");
                for (phrase, result) in phrases.iter().zip(results) {
                    println!("Phrase: {phrase}");
                    println!("Result: {result}");
                    println!();
                }
            }
            Err(e) => eprintln!("An error occurred: {e}"),
        }
    }

    analyzer.into_classifier().shutdown();
    Ok(())
}
