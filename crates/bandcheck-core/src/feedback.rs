//! Feedback text sanitizer.
//!
//! Raw feedback arrives with residue from the JSON envelope the scoring
//! service wraps around its text: backslash-escaped newlines, quotes,
//! braces, and parentheses. [`CleanFeedback`] strips that residue once and
//! then hands out display-ready lines.

use once_cell::sync::Lazy;
use regex::Regex;

/// Backslash-escaped newline sequences and stray envelope punctuation.
/// The two-character `\n` escape must be tried before the lone backslash.
static NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\\n|[()"{}\\]"#).expect("noise pattern is valid"));

/// Feedback text with envelope noise removed, ready for line-by-line display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanFeedback {
    cleaned: String,
}

impl CleanFeedback {
    /// Strip noise characters from `raw`. No other transformation is applied;
    /// the content of each line is preserved verbatim apart from the removed
    /// characters.
    pub fn new(raw: &str) -> Self {
        Self {
            cleaned: NOISE.replace_all(raw, "").into_owned(),
        }
    }

    /// The cleaned text, line structure intact.
    pub fn as_str(&self) -> &str {
        &self.cleaned
    }

    /// Trimmed lines of the cleaned text.
    ///
    /// The iterator is lazy and restartable: each call walks the cleaned
    /// text from the start.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.cleaned.split('\n').map(str::trim)
    }
}

impl std::fmt::Display for CleanFeedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}
