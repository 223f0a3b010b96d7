//! Quiz and checklist scoring.
//!
//! Both scorers are pure: they read a caller-owned answer map and an immutable catalog
//! slice and return a freshly computed result. Answers keyed by ids missing from the
//! catalog are ignored.

pub mod checklist;
pub mod quiz;

pub use checklist::{
    checklist_completion, compute_checklist_risk, export_checklist_text, CheckSet,
    ChecklistGuidance, ChecklistRisk, Completion,
};
pub use quiz::{compute_quiz_risk, AnswerSet, QuizAnswer, QuizGuidance, QuizRisk, QuizSession};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification shared by the quiz and checklist results, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// The catalog cannot support the requested computation (for example it is empty).
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Caller-supplied input is outside the accepted domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// `part / whole * 100` rounded half-up, computed on integers. `None` when `whole` is 0.
pub(crate) fn rounded_percentage(part: u64, whole: u64) -> Option<u32> {
    if whole == 0 {
        return None;
    }
    let rounded = (200 * part + whole) / (2 * whole);
    u32::try_from(rounded).ok()
}
