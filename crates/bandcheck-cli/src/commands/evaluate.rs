//! The `bandcheck evaluate` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use bandcheck_core::engine::{Evaluator, ProgressReporter};
use bandcheck_core::model::EssaySubmission;
use bandcheck_core::report::EssayEvaluation;
use bandcheck_client::config::load_config_from;
use bandcheck_client::RemoteScorer;
use bandcheck_report::write_html_report;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_submit(&self, index: usize, topic: &str) {
        eprintln!("  Submitting essay {} ({topic})", index + 1);
    }

    fn on_complete(&self, index: usize, evaluation: &EssayEvaluation) {
        let band = match evaluation.overall_band() {
            Some(b) => format!("{b:.1}"),
            None => "N/A".to_string(),
        };
        eprintln!(
            "  Done: essay {} — {} criteria, overall band {} ({}ms)",
            index + 1,
            evaluation.results.len(),
            band,
            evaluation.latency_ms,
        );
    }

    fn on_error(&self, index: usize, error: &str) {
        eprintln!("  ERROR: essay {}: {error}", index + 1);
    }

    fn on_batch_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {completed}/{total} succeeded, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    essay: Option<PathBuf>,
    essay_dir: Option<PathBuf>,
    topic: String,
    output: PathBuf,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    // Topic may be inline text or a path to a file holding it.
    let topic_text = {
        let as_path = PathBuf::from(&topic);
        if as_path.is_file() {
            std::fs::read_to_string(&as_path)
                .with_context(|| format!("failed to read topic file: {}", as_path.display()))?
                .trim()
                .to_string()
        } else {
            topic
        }
    };

    // Collect submissions, remembering each essay's file stem for report names.
    let mut stems: Vec<String> = Vec::new();
    let submissions = match (&essay, &essay_dir) {
        (Some(path), None) => {
            stems.push(file_stem(path));
            vec![read_submission(path, &topic_text)?]
        }
        (None, Some(dir)) => {
            let mut subs = Vec::new();
            let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
                .with_context(|| format!("failed to read essay directory: {}", dir.display()))?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
                .collect();
            entries.sort();
            for path in entries {
                stems.push(file_stem(&path));
                subs.push(read_submission(&path, &topic_text)?);
            }
            anyhow::ensure!(!subs.is_empty(), "no .txt files found in {}", dir.display());
            subs
        }
        _ => anyhow::bail!("exactly one of --essay or --essay-dir is required"),
    };

    let scorer = Arc::new(RemoteScorer::with_timeout(
        &config.endpoint,
        config.timeout_secs,
    ));
    let evaluator = Evaluator::new(scorer, config.evaluator_config());

    eprintln!(
        "bandcheck v0.1.0 — scoring {} essay(s) against {}",
        submissions.len(),
        config.endpoint
    );
    eprintln!();

    let results = evaluator
        .evaluate_batch(&submissions, &ConsoleReporter)
        .await;

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "markdown"]
    } else {
        format.split(',').map(|s| s.trim()).collect()
    };

    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let mut any_failed = false;

    for (index, result) in results.iter().enumerate() {
        let evaluation = match result {
            Ok(evaluation) => evaluation,
            Err(_) => {
                any_failed = true;
                continue;
            }
        };

        print_summary(evaluation);

        let stem = &stems[index];

        for fmt in &formats {
            match *fmt {
                "json" => {
                    let path = output.join(format!("{stem}-{timestamp}.json"));
                    evaluation.save_json(&path)?;
                    eprintln!("Report saved to: {}", path.display());
                }
                "html" => {
                    let path = output.join(format!("{stem}-{timestamp}.html"));
                    write_html_report(evaluation, &path)?;
                    eprintln!("HTML report: {}", path.display());
                }
                "markdown" => {
                    let path = output.join(format!("{stem}-{timestamp}.md"));
                    std::fs::write(&path, evaluation.to_markdown())?;
                    eprintln!("Markdown report: {}", path.display());
                }
                _ => {
                    eprintln!("Unknown format: {fmt}");
                }
            }
        }
    }

    anyhow::ensure!(!any_failed, "one or more essays failed to score");
    Ok(())
}

fn read_submission(path: &Path, topic: &str) -> Result<EssaySubmission> {
    let essay = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read essay file: {}", path.display()))?;
    anyhow::ensure!(
        !essay.trim().is_empty(),
        "essay file is empty: {}",
        path.display()
    );
    Ok(EssaySubmission::new(topic, essay))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("essay")
        .to_string()
}

fn print_summary(evaluation: &EssayEvaluation) {
    use bandcheck_core::grade::Grade;
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Criterion", "Band", "Grade"]);

    for (criterion, result) in evaluation.results.entries() {
        table.add_row(vec![
            Cell::new(criterion.marker()),
            Cell::new(&result.score),
            Cell::new(Grade::from_score(&result.score)),
        ]);
    }

    eprintln!("\n{table}");
    if let Some(band) = evaluation.overall_band() {
        eprintln!("Overall band: {band:.1}");
    }
}
