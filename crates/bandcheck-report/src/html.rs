//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use bandcheck_core::feedback::CleanFeedback;
use bandcheck_core::grade::Grade;
use bandcheck_core::model::Criterion;
use bandcheck_core::report::EssayEvaluation;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from an essay evaluation.
pub fn generate_html(evaluation: &EssayEvaluation) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>bandcheck report</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Essay evaluation</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} | {} criteria scored | {}ms</p>\n",
        evaluation.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        evaluation.results.len(),
        evaluation.latency_ms
    ));
    html.push_str("</header>\n");

    // Overall band
    html.push_str("<section class=\"overall\">\n");
    match evaluation.overall_band() {
        Some(band) => html.push_str(&format!(
            "<div class=\"band-figure\">{band:.1}</div><p>Overall band score</p>\n"
        )),
        None => html.push_str("<div class=\"band-figure\">N/A</div><p>Overall band score</p>\n"),
    }
    html.push_str("</section>\n");

    // Topic and essay
    html.push_str("<section class=\"submission\">\n");
    html.push_str("<h2>Topic</h2>\n");
    html.push_str(&format!("<p>{}</p>\n", html_escape(&evaluation.topic)));
    html.push_str("<h2>Essay</h2>\n");
    html.push_str(&format!("<pre class=\"essay\">{}</pre>\n", html_escape(&evaluation.essay)));
    html.push_str("</section>\n");

    // Per-criterion sections
    html.push_str("<section class=\"criteria\">\n");
    html.push_str("<h2>Scores and feedback</h2>\n");
    for criterion in Criterion::ALL {
        html.push_str(&criterion_section(evaluation, criterion));
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(evaluation).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn criterion_section(evaluation: &EssayEvaluation, criterion: Criterion) -> String {
    let mut html = String::new();

    html.push_str("<article class=\"criterion\">\n");
    match evaluation.results.get(criterion) {
        Some(result) => {
            let grade = Grade::from_score(&result.score);
            let grade_class = match grade {
                Grade::APlus | Grade::A => "good",
                Grade::B | Grade::C => "fair",
                Grade::D | Grade::F => "poor",
            };
            html.push_str(&format!(
                "<h3>{} <span class=\"badge {}\">{}</span> <span class=\"score\">Band: {}</span></h3>\n",
                html_escape(criterion.marker()),
                grade_class,
                grade,
                html_escape(&result.score)
            ));
            html.push_str("<div class=\"feedback\">\n");
            for line in CleanFeedback::new(&result.feedback).lines() {
                if line.is_empty() {
                    continue;
                }
                html.push_str(&format!("<p>{}</p>\n", html_escape(line)));
            }
            html.push_str("</div>\n");
        }
        None => {
            html.push_str(&format!(
                "<h3>{} <span class=\"badge none\">N/A</span></h3>\n",
                html_escape(criterion.marker())
            ));
            html.push_str("<p class=\"feedback none\">No feedback available</p>\n");
        }
    }
    html.push_str("</article>\n");

    html
}

/// Write an HTML report to a file.
pub fn write_html_report(evaluation: &EssayEvaluation, path: &Path) -> Result<()> {
    let html = generate_html(evaluation);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --good: #dcfce7; --fair: #fef9c3; --poor: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --good: #064e3b; --fair: #713f12; --poor: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 56rem; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.overall { text-align: center; margin: 2rem 0; }
.band-figure { font-size: 3rem; font-weight: bold; }
.essay { white-space: pre-wrap; padding: 1rem; background: var(--border); border-radius: 8px; }
.criterion { border: 1px solid var(--border); border-radius: 8px; padding: 0.5rem 1rem; margin: 1rem 0; }
.badge { border: 1px solid var(--border); border-radius: 999px; padding: 0.1rem 0.6rem; font-size: 0.9rem; }
.badge.good { background: var(--good); }
.badge.fair { background: var(--fair); }
.badge.poor { background: var(--poor); }
.score { color: #6b7280; font-size: 0.9rem; font-weight: normal; }
.feedback.none { color: #6b7280; font-style: italic; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use bandcheck_core::model::{CriterionResult, EvaluationResult};

    fn make_evaluation() -> EssayEvaluation {
        let mut results = EvaluationResult::default();
        results.set(
            Criterion::CoherenceAndCohesion,
            CriterionResult {
                score: "8.5".into(),
                feedback: "Ideas connect naturally across paragraphs.".into(),
            },
        );
        results.set(
            Criterion::TaskResponse,
            CriterionResult {
                score: "6.0".into(),
                feedback: "Covers the prompt but thinly in places.".into(),
            },
        );

        EssayEvaluation {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            topic: "Cities & <growth>".into(),
            essay: "Urbanisation has accelerated...".into(),
            results,
            raw_response: "raw text".into(),
            latency_ms: 900,
        }
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_evaluation());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Coherence and Cohesion"));
        assert!(html.contains("Ideas connect naturally"));
        assert!(html.contains("Band: 8.5"));
        // 8.5 grades as A, 6.0 as C.
        assert!(html.contains(">A</span>"));
        assert!(html.contains(">C</span>"));
    }

    #[test]
    fn missing_criteria_render_placeholder() {
        let html = generate_html(&make_evaluation());
        assert!(html.contains("Lexical Resource"));
        assert!(html.contains("No feedback available"));
    }

    #[test]
    fn topic_is_escaped() {
        let html = generate_html(&make_evaluation());
        assert!(html.contains("Cities &amp; &lt;growth&gt;"));
    }

    #[test]
    fn overall_band_is_rendered() {
        let html = generate_html(&make_evaluation());
        // Mean of 8.5 and 6.0.
        assert!(html.contains("7.2"));
    }

    #[test]
    fn html_report_write_to_file() {
        let evaluation = make_evaluation();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&evaluation, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
