//! Answers to clarifying questions

use serde::{Deserialize, Serialize};
use tmu_core::RequirementAnalysis;
use tracing::info;

/// Free-text answers, one per clarifying question, in question order
///
/// Only the number of answered questions reaches the output, as an
/// assumption annotation on the requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClarificationAnswers(Vec<String>);

impl ClarificationAnswers {
    pub fn new(answers: Vec<String>) -> Self {
        Self(answers)
    }

    pub fn answers(&self) -> &[String] {
        &self.0
    }

    /// Count answered questions
    ///
    /// An answer counts when it is non-empty; whitespace is an answer.
    /// Answers past the last question have no input field and are ignored.
    pub fn answered_count(&self, questions: &[String]) -> usize {
        questions
            .iter()
            .zip(&self.0)
            .filter(|(_, answer)| !answer.is_empty())
            .count()
    }

    /// Record the answers on the requirement as one extra assumption
    pub fn apply(&self, requirement: &mut RequirementAnalysis) {
        let answered = self.answered_count(&requirement.clarifying_questions);
        info!(
            "Applying {} of {} clarification answers",
            answered,
            requirement.clarifying_questions.len()
        );
        requirement.push_assumption(format!("Answered clarifications: {}", answered));
    }
}

impl From<Vec<String>> for ClarificationAnswers {
    fn from(answers: Vec<String>) -> Self {
        Self(answers)
    }
}
