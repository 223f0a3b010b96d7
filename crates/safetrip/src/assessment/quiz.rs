use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{rounded_percentage, AssessmentError, RiskLevel};
use crate::catalog::{QuestionId, QuizQuestion};

/// Answer recorded for a single red-flag question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizAnswer {
    Yes,
    No,
}

/// Answers keyed by question id. Questions without an entry are unanswered.
pub type AnswerSet = BTreeMap<QuestionId, QuizAnswer>;

/// Percentage floor for each level, checked from the most severe down.
const QUIZ_THRESHOLDS: [(u32, RiskLevel); 3] = [
    (70, RiskLevel::Critical),
    (50, RiskLevel::High),
    (30, RiskLevel::Moderate),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRisk {
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub level: RiskLevel,
}

impl QuizRisk {
    pub fn level_for(percentage: u32) -> RiskLevel {
        QUIZ_THRESHOLDS
            .iter()
            .find(|(floor, _)| percentage >= *floor)
            .map(|(_, level)| *level)
            .unwrap_or(RiskLevel::Low)
    }

    pub fn guidance(&self) -> QuizGuidance {
        QuizGuidance::for_level(self.level)
    }
}

/// Weighted red-flag score for `answers`.
///
/// Only `yes` answers add their question's weight; the maximum is the sum of every
/// weight in the catalog whatever was answered.
pub fn compute_quiz_risk(
    answers: &AnswerSet,
    questions: &[QuizQuestion],
) -> Result<QuizRisk, AssessmentError> {
    if questions.is_empty() {
        return Err(AssessmentError::Configuration(
            "quiz catalog has no questions".to_string(),
        ));
    }

    let max_score = questions
        .iter()
        .try_fold(0u32, |total, question| total.checked_add(question.weight))
        .ok_or_else(|| {
            AssessmentError::Configuration("quiz question weights overflow u32".to_string())
        })?;
    // bounded by max_score
    let score: u32 = questions
        .iter()
        .filter(|question| answers.get(&question.id) == Some(&QuizAnswer::Yes))
        .map(|question| question.weight)
        .sum();

    let percentage = rounded_percentage(u64::from(score), u64::from(max_score)).ok_or_else(
        || AssessmentError::Configuration("quiz question weights sum to zero".to_string()),
    )?;
    let level = QuizRisk::level_for(percentage);

    debug!(score, max_score, percentage, level = level.label(), "quiz risk computed");

    Ok(QuizRisk {
        score,
        max_score,
        percentage,
        level,
    })
}

/// Advice shown next to a quiz result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizGuidance {
    pub headline: &'static str,
    pub message: &'static str,
    pub follow_ups: &'static [&'static str],
}

impl QuizGuidance {
    pub fn for_level(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Critical => Self {
                headline: "CRITICAL RISK DETECTED",
                message: "Your responses indicate multiple serious warning signs. Consider postponing travel and seeking support from trusted friends, family, or professionals.",
                follow_ups: &["Call Domestic Violence Hotline", "View Safety Resources"],
            },
            RiskLevel::High => Self {
                headline: "HIGH RISK IDENTIFIED",
                message: "Several concerning patterns detected. Consider having serious conversations about boundaries and potentially seeking guidance from trusted sources.",
                follow_ups: &["Safety Checklist", "Safety Resources"],
            },
            RiskLevel::Moderate => Self {
                headline: "MODERATE RISK NOTED",
                message: "Some warning signs present. Consider open communication with your partner and implementing additional safety precautions.",
                follow_ups: &["Safety Checklist", "Location Warnings"],
            },
            RiskLevel::Low => Self {
                headline: "LOW RISK DETECTED",
                message: "Your responses suggest minimal immediate risk factors. Continue to stay aware and trust your instincts.",
                follow_ups: &["Safety Checklist", "Location Check"],
            },
        }
    }
}

/// Caller-owned state of the one-question-at-a-time quiz wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizSession {
    current: usize,
    answers: AnswerSet,
    finished: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question<'a>(&self, questions: &'a [QuizQuestion]) -> Option<&'a QuizQuestion> {
        questions.get(self.current)
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn answer(&mut self, id: QuestionId, answer: QuizAnswer) {
        self.answers.insert(id, answer);
    }

    pub fn current_answered(&self, questions: &[QuizQuestion]) -> bool {
        self.current_question(questions)
            .map(|question| self.answers.contains_key(&question.id))
            .unwrap_or(false)
    }

    pub fn all_answered(&self, questions: &[QuizQuestion]) -> bool {
        questions
            .iter()
            .all(|question| self.answers.contains_key(&question.id))
    }

    /// Moves to the next question, or finishes the quiz when on the last one.
    pub fn advance(&mut self, questions: &[QuizQuestion]) {
        if self.current + 1 < questions.len() {
            self.current += 1;
        } else {
            self.finished = true;
        }
    }

    pub fn back(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// One-based position and total, as shown in "Question 3 of 12".
    pub fn progress(&self, questions: &[QuizQuestion]) -> (usize, usize) {
        let total = questions.len();
        ((self.current + 1).min(total), total)
    }

    pub fn result(&self, questions: &[QuizQuestion]) -> Result<QuizRisk, AssessmentError> {
        compute_quiz_risk(&self.answers, questions)
    }
}
