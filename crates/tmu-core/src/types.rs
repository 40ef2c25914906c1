//! Core record definitions for tmu

use serde::{Deserialize, Serialize};

/// Risk level of a requirement or a single test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Invalid risk level: {}", s)),
        }
    }
}

/// Which half of the pipeline the front-end asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Parse only; tests are generated after clarifying questions are answered
    #[default]
    #[serde(rename = "Requirement Analysis")]
    RequirementAnalysis,
    /// Parse and generate tests in one step
    #[serde(rename = "Test Design")]
    TestDesign,
}

impl Mode {
    /// All modes in selector order
    pub const ALL: [Mode; 2] = [Mode::RequirementAnalysis, Mode::TestDesign];

    /// Label shown in the mode selector
    pub fn label(&self) -> &'static str {
        match self {
            Self::RequirementAnalysis => "Requirement Analysis",
            Self::TestDesign => "Test Design",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "requirement analysis" | "analysis" | "analyze" => Ok(Self::RequirementAnalysis),
            "test design" | "design" => Ok(Self::TestDesign),
            _ => Err(format!("Invalid mode: {}", s)),
        }
    }
}

/// Structured summary of a free-text requirement
///
/// Field order matches the exported JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementAnalysis {
    pub title: String,
    pub actors: Vec<String>,
    pub functional_tags: Vec<String>,
    pub nonfunctional_tags: Vec<String>,
    pub acceptance_criteria: Vec<String>,
    pub impacted_modules: Vec<String>,
    /// Gaps found in the text; never empty
    pub missing_info: Vec<String>,
    pub clarifying_questions: Vec<String>,
    pub risk: RiskLevel,
    pub risk_reason: String,
    /// The only field that may change after parsing
    #[serde(default)]
    pub assumptions: Vec<String>,
}

impl RequirementAnalysis {
    /// Whether the given actor was detected
    pub fn has_actor(&self, actor: &str) -> bool {
        self.actors.iter().any(|a| a == actor)
    }

    /// Append an assumption to the record
    pub fn push_assumption(&mut self, assumption: impl Into<String>) {
        self.assumptions.push(assumption.into());
    }
}

/// A single test case of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Stable identifier, TC001..TC008
    pub id: String,
    pub title: String,
    pub preconditions: Vec<String>,
    /// Each step already carries its own "N. " prefix
    pub steps: Vec<String>,
    pub test_data: String,
    pub expected: String,
    pub risk: RiskLevel,
    pub automation_candidate: bool,
    pub automation_reason: String,
}

/// Count of test cases per risk level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl RiskSummary {
    /// Tally the risk levels of a set of test cases
    pub fn tally(cases: &[TestCase]) -> Self {
        cases.iter().fold(Self::default(), |mut summary, case| {
            match case.risk {
                RiskLevel::High => summary.high += 1,
                RiskLevel::Medium => summary.medium += 1,
                RiskLevel::Low => summary.low += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low
    }
}

impl std::fmt::Display for RiskSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "high: {}, medium: {}, low: {}",
            self.high, self.medium, self.low
        )
    }
}

/// Test cases generated for a requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestDesign {
    pub test_cases: Vec<TestCase>,
    pub summary: RiskSummary,
    /// Copied from the requirement this design was generated for
    #[serde(default)]
    pub assumptions: Vec<String>,
}

impl TestDesign {
    /// Find a test case by id
    pub fn case(&self, id: &str) -> Option<&TestCase> {
        self.test_cases.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: &str, risk: RiskLevel) -> TestCase {
        TestCase {
            id: id.to_string(),
            title: format!("Case {}", id),
            preconditions: vec![],
            steps: vec!["1. Do it".to_string()],
            test_data: "TD".to_string(),
            expected: "It works".to_string(),
            risk,
            automation_candidate: true,
            automation_reason: "Cheap".to_string(),
        }
    }

    #[test]
    fn test_risk_level_parse_and_display() {
        assert_eq!("high".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!("MEDIUM".parse::<RiskLevel>().unwrap(), RiskLevel::Medium);
        assert_eq!("Low".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
        assert!("severe".parse::<RiskLevel>().is_err());
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
    }

    #[test]
    fn test_risk_level_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"High\"");
        let low: RiskLevel = serde_json::from_str("\"Low\"").unwrap();
        assert_eq!(low, RiskLevel::Low);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(
            "Requirement Analysis".parse::<Mode>().unwrap(),
            Mode::RequirementAnalysis
        );
        assert_eq!(
            "requirement-analysis".parse::<Mode>().unwrap(),
            Mode::RequirementAnalysis
        );
        assert_eq!("test_design".parse::<Mode>().unwrap(), Mode::TestDesign);
        assert_eq!("design".parse::<Mode>().unwrap(), Mode::TestDesign);
        assert!("review".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&Mode::TestDesign).unwrap(),
            "\"Test Design\""
        );
        for mode in Mode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.label()));
        }
    }

    #[test]
    fn test_summary_tally() {
        let cases = vec![
            case("TC001", RiskLevel::High),
            case("TC002", RiskLevel::High),
            case("TC003", RiskLevel::Low),
        ];
        let summary = RiskSummary::tally(&cases);
        assert_eq!(summary, RiskSummary { high: 2, medium: 0, low: 1 });
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.to_string(), "high: 2, medium: 0, low: 1");
    }

    #[test]
    fn test_test_case_field_order() {
        let json = serde_json::to_string(&case("TC001", RiskLevel::High)).unwrap();
        let keys = [
            "\"id\"",
            "\"title\"",
            "\"preconditions\"",
            "\"steps\"",
            "\"test_data\"",
            "\"expected\"",
            "\"risk\"",
            "\"automation_candidate\"",
            "\"automation_reason\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_design_roundtrip_and_lookup() {
        let cases = vec![case("TC001", RiskLevel::High), case("TC002", RiskLevel::Medium)];
        let design = TestDesign {
            summary: RiskSummary::tally(&cases),
            test_cases: cases,
            assumptions: vec!["Email is unique".to_string()],
        };

        let json = serde_json::to_string_pretty(&design).unwrap();
        let back: TestDesign = serde_json::from_str(&json).unwrap();
        assert_eq!(back, design);
        assert_eq!(back.case("TC002").unwrap().risk, RiskLevel::Medium);
        assert!(back.case("TC009").is_none());
    }

    #[test]
    fn test_missing_assumptions_default_to_empty() {
        let json = r#"{"test_cases":[],"summary":{"high":0,"medium":0,"low":0}}"#;
        let design: TestDesign = serde_json::from_str(json).unwrap();
        assert!(design.assumptions.is_empty());
    }
}
