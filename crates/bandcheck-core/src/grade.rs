//! Band-score to letter-grade mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade derived from a numeric band score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Map a band score (as decimal text) to a grade.
    ///
    /// Thresholds are evaluated from highest to lowest: `>= 9` is `A+`,
    /// `>= 8` is `A`, `>= 7` is `B`, `>= 6` is `C`, `>= 5` is `D`, and
    /// everything else falls through to `F`. Unparsable score text (including
    /// the `"N/A"` sentinel) also maps to `F`.
    pub fn from_score(score: &str) -> Grade {
        let Ok(num) = score.trim().parse::<f64>() else {
            return Grade::F;
        };
        if num >= 9.0 {
            Grade::APlus
        } else if num >= 8.0 {
            Grade::A
        } else if num >= 7.0 {
            Grade::B
        } else if num >= 6.0 {
            Grade::C
        } else if num >= 5.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::APlus => write!(f, "A+"),
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_thresholds() {
        assert_eq!(Grade::from_score("9.0"), Grade::APlus);
        assert_eq!(Grade::from_score("8.0"), Grade::A);
        assert_eq!(Grade::from_score("7.0"), Grade::B);
        assert_eq!(Grade::from_score("6.0"), Grade::C);
        assert_eq!(Grade::from_score("5.0"), Grade::D);
        assert_eq!(Grade::from_score("4.9"), Grade::F);
    }

    #[test]
    fn boundaries_round_down() {
        assert_eq!(Grade::from_score("8.9"), Grade::A);
        assert_eq!(Grade::from_score("7.99"), Grade::B);
        assert_eq!(Grade::from_score("0"), Grade::F);
    }

    #[test]
    fn unparsable_scores_map_to_f() {
        assert_eq!(Grade::from_score("abc"), Grade::F);
        assert_eq!(Grade::from_score("N/A"), Grade::F);
        assert_eq!(Grade::from_score(""), Grade::F);
    }

    #[test]
    fn display_matches_badge_text() {
        assert_eq!(Grade::APlus.to_string(), "A+");
        assert_eq!(Grade::F.to_string(), "F");
    }
}
