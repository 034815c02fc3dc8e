//! bandcheck-report — HTML report generation.
//!
//! Renders an [`EssayEvaluation`](bandcheck_core::report::EssayEvaluation)
//! as a self-contained HTML file with per-criterion grade badges and
//! feedback.

pub mod html;

pub use html::{generate_html, write_html_report};
