//! JSON and CSV exports
//!
//! JSON is pretty-printed with two-space indentation. CSV files have a header
//! row, quote only where needed, end lines with `\n` and spell booleans
//! `True`/`False`, the way the tool's spreadsheet users already know them.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tmu_core::{RequirementAnalysis, Result, TestDesign, TmuError};
use tracing::info;

use crate::projection::{requirement_summary_rows, to_rows, TestCaseRow};

/// The downloadable files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    RequirementAnalysisJson,
    RequirementSummaryCsv,
    TestsCsv,
    TestDesignJson,
}

impl ExportKind {
    pub const ALL: [ExportKind; 4] = [
        ExportKind::RequirementAnalysisJson,
        ExportKind::RequirementSummaryCsv,
        ExportKind::TestsCsv,
        ExportKind::TestDesignJson,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::RequirementAnalysisJson => "requirement_analysis.json",
            Self::RequirementSummaryCsv => "requirement_summary.csv",
            Self::TestsCsv => "tests.csv",
            Self::TestDesignJson => "test_design.json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::RequirementAnalysisJson | Self::TestDesignJson => "application/json",
            Self::RequirementSummaryCsv | Self::TestsCsv => "text/csv",
        }
    }

    /// Whether rendering this export needs a generated test design
    pub fn needs_design(&self) -> bool {
        matches!(self, Self::TestsCsv | Self::TestDesignJson)
    }
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

impl std::str::FromStr for ExportKind {
    type Err = TmuError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.file_name() == s)
            .ok_or_else(|| TmuError::UnknownExport(s.to_string()))
    }
}

/// A rendered export, ready to download or write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub kind: ExportKind,
    pub body: String,
}

impl ExportFile {
    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }

    /// Write into `dir`, creating it if needed
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, &self.body)?;
        info!("Wrote {} ({} bytes)", path.display(), self.body.len());
        Ok(path)
    }
}

/// Two-space indented JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn requirement_analysis_json(requirement: &RequirementAnalysis) -> Result<ExportFile> {
    Ok(ExportFile {
        kind: ExportKind::RequirementAnalysisJson,
        body: to_json(requirement)?,
    })
}

pub fn test_design_json(design: &TestDesign) -> Result<ExportFile> {
    Ok(ExportFile {
        kind: ExportKind::TestDesignJson,
        body: to_json(design)?,
    })
}

/// `type,value` rows: actors, then missing info
pub fn requirement_summary_csv(requirement: &RequirementAnalysis) -> Result<ExportFile> {
    let rows = requirement_summary_rows(requirement);
    let body = write_csv(&["type", "value"], rows.iter().map(|row| {
        vec![row.kind.to_string(), row.value.clone()]
    }))?;
    Ok(ExportFile {
        kind: ExportKind::RequirementSummaryCsv,
        body,
    })
}

/// One row per test case, in catalog order
pub fn tests_csv(design: &TestDesign) -> Result<ExportFile> {
    let rows = to_rows(design);
    let body = write_csv(&TestCaseRow::COLUMNS, rows.iter().map(test_case_record))?;
    Ok(ExportFile {
        kind: ExportKind::TestsCsv,
        body,
    })
}

fn test_case_record(row: &TestCaseRow) -> Vec<String> {
    vec![
        row.id.clone(),
        row.title.clone(),
        row.preconditions.clone(),
        row.steps.clone(),
        row.test_data.clone(),
        row.expected.clone(),
        row.risk.to_string(),
        csv_bool(row.automation_candidate).to_string(),
        row.automation_reason.clone(),
    ]
}

fn csv_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn write_csv<I>(header: &[&str], records: I) -> Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut buf = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut buf);
        writer.write_record(header)?;
        for record in records {
            writer.write_record(&record)?;
        }
        writer.flush()?;
    }
    String::from_utf8(buf).map_err(|e| TmuError::Other(format!("CSV is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RequirementParser, TestCaseCatalog, DEFAULT_REQUIREMENT_TEXT};
    use tempfile::TempDir;

    #[test]
    fn test_kind_from_file_name() {
        for kind in ExportKind::ALL {
            assert_eq!(kind.file_name().parse::<ExportKind>().unwrap(), kind);
        }
        let err = "report.pdf".parse::<ExportKind>().unwrap_err();
        assert!(matches!(err, TmuError::UnknownExport(name) if name == "report.pdf"));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(ExportKind::TestsCsv.content_type(), "text/csv");
        assert_eq!(ExportKind::TestDesignJson.content_type(), "application/json");
        assert!(ExportKind::TestsCsv.needs_design());
        assert!(!ExportKind::RequirementSummaryCsv.needs_design());
    }

    #[test]
    fn test_tests_csv_layout() {
        let design = TestCaseCatalog::generate(&RequirementParser::parse(""));
        let file = tests_csv(&design).unwrap();
        let lines: Vec<&str> = file.body.lines().collect();

        assert_eq!(
            lines[0],
            "id,title,preconditions,steps,test_data,expected,risk,automation_candidate,automation_reason"
        );
        assert_eq!(lines.len(), 9);
        assert!(!file.body.contains('\r'));
        assert!(file.body.ends_with('\n'));
        assert_eq!(
            lines[1],
            "TC001,Valid login without OTP,OTP disabled for tenant,1. Open login page | 2. Enter valid email and password | 3. Click Login,TD01,User lands on dashboard,High,True,Stable UI flow; high reuse"
        );
        // Empty preconditions stay an empty field
        assert!(lines[3].starts_with("TC003,Invalid password,,1. Open login page"));
    }

    #[test]
    fn test_tests_csv_quotes_commas() {
        let design = TestCaseCatalog::generate(&RequirementParser::parse(""));
        let body = tests_csv(&design).unwrap().body;
        let tc005 = body.lines().find(|l| l.starts_with("TC005")).unwrap();
        assert!(tc005.contains("\"Lockout policy configured (inferred, confidence=0.8)\""));
        assert!(tc005.contains(",False,"));
    }

    #[test]
    fn test_requirement_summary_csv() {
        let requirement = RequirementParser::parse(DEFAULT_REQUIREMENT_TEXT);
        let body = requirement_summary_csv(&requirement).unwrap().body;
        let expected = "type,value\n\
            actor,User\n\
            actor,Admin\n\
            missing_info,\"password complexity policy (inferred, confidence=0.84)\"\n\
            missing_info,\"max failed attempts before lockout (inferred, confidence=0.81)\"\n\
            missing_info,\"otp mandatory policy (inferred, confidence=0.7)\"\n";
        assert_eq!(body, expected);
    }

    #[test]
    fn test_json_exports_use_two_space_indent() {
        let requirement = RequirementParser::parse("");
        let file = requirement_analysis_json(&requirement).unwrap();
        assert!(file.body.contains("\n  \"actors\": [\n    \"User\"\n  ],"));

        let design = TestCaseCatalog::generate(&requirement);
        let file = test_design_json(&design).unwrap();
        assert!(file.body.contains("\"summary\": {\n    \"high\": 4,"));
        let back: TestDesign = serde_json::from_str(&file.body).unwrap();
        assert_eq!(back, design);
    }

    #[test]
    fn test_write_to_dir_creates_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested").join("exports");
        let design = TestCaseCatalog::generate(&RequirementParser::parse(""));
        let file = tests_csv(&design).unwrap();

        let path = file.write_to_dir(&out).unwrap();
        assert_eq!(path, out.join("tests.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), file.body);
    }
}
