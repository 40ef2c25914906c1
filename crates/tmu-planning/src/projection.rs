//! Flat row views of the records, for tables and CSV

use serde::{Deserialize, Serialize};
use tmu_core::{RequirementAnalysis, RiskLevel, TestDesign};

/// Separator between preconditions in a flattened row
pub const PRECONDITION_SEPARATOR: &str = "; ";

/// Separator between steps in a flattened row
pub const STEP_SEPARATOR: &str = " | ";

/// One test case with its list fields joined into strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseRow {
    pub id: String,
    pub title: String,
    pub preconditions: String,
    pub steps: String,
    pub test_data: String,
    pub expected: String,
    pub risk: RiskLevel,
    pub automation_candidate: bool,
    pub automation_reason: String,
}

impl TestCaseRow {
    /// Column names in export order
    pub const COLUMNS: [&'static str; 9] = [
        "id",
        "title",
        "preconditions",
        "steps",
        "test_data",
        "expected",
        "risk",
        "automation_candidate",
        "automation_reason",
    ];
}

/// Kind of entry in the requirement summary table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryRowType {
    Actor,
    MissingInfo,
}

impl std::fmt::Display for SummaryRowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Actor => write!(f, "actor"),
            Self::MissingInfo => write!(f, "missing_info"),
        }
    }
}

/// One `type,value` row of the requirement summary export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "type")]
    pub kind: SummaryRowType,
    pub value: String,
}

/// Flatten a test design into one row per test case, in catalog order
pub fn to_rows(design: &TestDesign) -> Vec<TestCaseRow> {
    design
        .test_cases
        .iter()
        .map(|case| TestCaseRow {
            id: case.id.clone(),
            title: case.title.clone(),
            preconditions: case.preconditions.join(PRECONDITION_SEPARATOR),
            steps: case.steps.join(STEP_SEPARATOR),
            test_data: case.test_data.clone(),
            expected: case.expected.clone(),
            risk: case.risk,
            automation_candidate: case.automation_candidate,
            automation_reason: case.automation_reason.clone(),
        })
        .collect()
}

/// Actors followed by missing-info entries
pub fn requirement_summary_rows(requirement: &RequirementAnalysis) -> Vec<SummaryRow> {
    let actors = requirement.actors.iter().map(|a| SummaryRow {
        kind: SummaryRowType::Actor,
        value: a.clone(),
    });
    let missing = requirement.missing_info.iter().map(|m| SummaryRow {
        kind: SummaryRowType::MissingInfo,
        value: m.clone(),
    });
    actors.chain(missing).collect()
}
