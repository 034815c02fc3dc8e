//! The `bandcheck parse` command.
//!
//! Runs the response parser over a saved raw response file, without
//! touching the network.

use std::path::PathBuf;

use anyhow::{Context, Result};

use bandcheck_core::feedback::CleanFeedback;
use bandcheck_core::grade::Grade;
use bandcheck_core::parser::parse_evaluation;

pub fn execute(input: PathBuf, format: String) -> Result<()> {
    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read response file: {}", input.display()))?;

    let results = parse_evaluation(&text);

    if results.is_empty() {
        println!("No criterion sections recognized.");
        return Ok(());
    }

    match format.as_str() {
        "table" => {
            use comfy_table::{Cell, Table};

            let mut table = Table::new();
            table.set_header(vec!["Criterion", "Band", "Grade", "Feedback"]);
            for (criterion, result) in results.entries() {
                let clean = CleanFeedback::new(&result.feedback);
                let feedback = clean
                    .lines()
                    .filter(|l| !l.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                table.add_row(vec![
                    Cell::new(criterion.marker()),
                    Cell::new(&result.score),
                    Cell::new(Grade::from_score(&result.score)),
                    Cell::new(feedback),
                ]);
            }
            println!("{table}");
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        "markdown" => {
            println!("| Criterion | Band | Grade |");
            println!("|-----------|------|-------|");
            for (criterion, result) in results.entries() {
                println!(
                    "| {} | {} | {} |",
                    criterion.marker(),
                    result.score,
                    Grade::from_score(&result.score)
                );
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected table, json, or markdown)"),
    }

    Ok(())
}
