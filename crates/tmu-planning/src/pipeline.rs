//! One front-end request, start to finish
//!
//! The front-end sends its whole form on every trigger, so nothing has to be
//! remembered between requests: the same [`FormState`] always produces the
//! same output.

use serde::{Deserialize, Serialize};
use tmu_core::{Mode, RequirementAnalysis, Result, TestDesign};
use tracing::debug;

use crate::clarify::ClarificationAnswers;
use crate::export::{self, ExportFile, ExportKind};
use crate::{RequirementParser, TestCaseCatalog, DEFAULT_REQUIREMENT_TEXT};

/// Everything the front-end form holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_text")]
    pub text: String,
    /// Present once the user asked to apply their clarification answers
    #[serde(default)]
    pub answers: Option<ClarificationAnswers>,
}

fn default_text() -> String {
    DEFAULT_REQUIREMENT_TEXT.to_string()
}

impl FormState {
    pub fn new(mode: Mode, text: impl Into<String>) -> Self {
        Self {
            mode,
            text: text.into(),
            answers: None,
        }
    }

    pub fn with_answers(mut self, answers: impl Into<ClarificationAnswers>) -> Self {
        self.answers = Some(answers.into());
        self
    }

    /// Parse the text, applying answers when the analysis flow asks for it
    pub fn requirement(&self) -> RequirementAnalysis {
        let mut requirement = RequirementParser::parse(&self.text);
        if let (Mode::RequirementAnalysis, Some(answers)) = (self.mode, &self.answers) {
            answers.apply(&mut requirement);
        }
        requirement
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(Mode::default(), DEFAULT_REQUIREMENT_TEXT)
    }
}

/// Records produced for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub mode: Mode,
    pub requirement: RequirementAnalysis,
    /// Absent in the analysis flow until answers are applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<TestDesign>,
}

/// Run the pipeline for a form
///
/// - Test Design: parse, then generate. Answers are ignored.
/// - Requirement Analysis: parse only, or parse, apply answers and generate
///   when answers are present.
pub fn run(form: &FormState) -> PipelineOutput {
    debug!(mode = %form.mode, chars = form.text.len(), "Running pipeline");

    let requirement = form.requirement();
    let design = match form.mode {
        Mode::TestDesign => Some(TestCaseCatalog::generate(&requirement)),
        Mode::RequirementAnalysis => form
            .answers
            .as_ref()
            .map(|_| TestCaseCatalog::generate(&requirement)),
    };

    PipelineOutput {
        mode: form.mode,
        requirement,
        design,
    }
}

/// Render one download for a form
///
/// Design exports generate the design on demand, so they are available in
/// either mode.
pub fn export(form: &FormState, kind: ExportKind) -> Result<ExportFile> {
    let requirement = form.requirement();
    debug!("Rendering {} for {}", kind, form.mode);

    match kind {
        ExportKind::RequirementAnalysisJson => export::requirement_analysis_json(&requirement),
        ExportKind::RequirementSummaryCsv => export::requirement_summary_csv(&requirement),
        ExportKind::TestsCsv => export::tests_csv(&TestCaseCatalog::generate(&requirement)),
        ExportKind::TestDesignJson => {
            export::test_design_json(&TestCaseCatalog::generate(&requirement))
        }
    }
}
