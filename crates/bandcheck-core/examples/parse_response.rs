//! Parse a scoring response offline — minimal programmatic usage.
//!
//! ```bash
//! cargo run --example parse_response
//! ```

use bandcheck_core::feedback::CleanFeedback;
use bandcheck_core::grade::Grade;
use bandcheck_core::parser::parse_evaluation;

fn main() {
    let response = "Coherence and Cohesion The essay maintains a clear line of \
                    argument 7.5 with effective paragraphing.<final>7.5<final>\
                    Grammatical Range and Accuracy Some agreement errors 6.0 but \
                    a fair range of structures.<final>6.0<final>\
                    Lexical Resource Vocabulary is varied 8.0 and mostly precise.\
                    <final>8.0<final>\
                    Task Response All parts of the prompt are covered 7.0 with \
                    relevant support.<final>7.0<final>";

    let results = parse_evaluation(response);
    println!("Parsed {} criterion sections:\n", results.len());

    for (criterion, result) in results.entries() {
        println!(
            "{} — band {} (grade {})",
            criterion.marker(),
            result.score,
            Grade::from_score(&result.score)
        );
        for line in CleanFeedback::new(&result.feedback).lines() {
            if !line.is_empty() {
                println!("    {line}");
            }
        }
        println!();
    }
}
