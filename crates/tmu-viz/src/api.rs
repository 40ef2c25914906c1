//! JSON API handlers
//!
//! Each handler receives the complete form state and runs the pipeline from
//! scratch.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tmu_core::Mode;
use tmu_planning::{
    pipeline::{self, PipelineOutput},
    requirement_summary_rows, to_rows, ClarificationAnswers, ExportKind, FormState, SummaryRow,
    TestCaseRow, DEFAULT_REQUIREMENT_TEXT,
};
use tracing::{error, info, warn};

/// Initial form values for the page
#[derive(Debug, Clone, Serialize)]
pub struct DefaultsResponse {
    pub text: &'static str,
    pub modes: Vec<&'static str>,
    pub exports: Vec<&'static str>,
}

/// Pipeline records plus their table projections
#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    #[serde(flatten)]
    pub output: PipelineOutput,
    /// Actor and missing-info rows of the requirement
    pub summary_rows: Vec<SummaryRow>,
    /// Test case table, present whenever a design was generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<TestCaseRow>>,
}

impl From<PipelineOutput> for RunResponse {
    fn from(output: PipelineOutput) -> Self {
        Self {
            summary_rows: requirement_summary_rows(&output.requirement),
            rows: output.design.as_ref().map(to_rows),
            output,
        }
    }
}

/// GET /api/defaults
pub async fn defaults() -> Json<DefaultsResponse> {
    Json(DefaultsResponse {
        text: DEFAULT_REQUIREMENT_TEXT,
        modes: Mode::ALL.iter().map(|m| m.label()).collect(),
        exports: ExportKind::ALL.iter().map(|k| k.file_name()).collect(),
    })
}

/// POST /api/run - the "Run" button
pub async fn run(Json(form): Json<FormState>) -> Json<RunResponse> {
    info!("Run: {}", form.mode);
    Json(pipeline::run(&form).into())
}

/// POST /api/clarify - "Apply answers and regenerate tests"
///
/// Always the analysis flow; a form without answers counts as zero answered.
pub async fn clarify(Json(mut form): Json<FormState>) -> Json<RunResponse> {
    form.mode = Mode::RequirementAnalysis;
    let answers = form.answers.get_or_insert_with(ClarificationAnswers::default);
    info!("Clarify with {} answers", answers.answers().len());
    Json(pipeline::run(&form).into())
}

/// POST /api/export/:file - download one export as an attachment
pub async fn export(
    Path(file): Path<String>,
    Json(form): Json<FormState>,
) -> Result<Response, StatusCode> {
    let kind: ExportKind = file.parse().map_err(|e| {
        warn!("{}", e);
        StatusCode::NOT_FOUND
    })?;

    let export = pipeline::export(&form, kind).map_err(|e| {
        error!("Failed to render {}: {}", kind, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("Export {} ({} bytes)", kind, export.body.len());
    Ok((
        [
            (header::CONTENT_TYPE, export.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.file_name()),
            ),
        ],
        export.body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_defaults() {
        let response = defaults().await;
        assert_eq!(response.0.text, DEFAULT_REQUIREMENT_TEXT);
        assert_eq!(response.0.modes, vec!["Requirement Analysis", "Test Design"]);
        assert!(response.0.exports.contains(&"tests.csv"));
    }

    #[tokio::test]
    async fn test_run_analysis_mode() {
        let form = FormState::new(Mode::RequirementAnalysis, DEFAULT_REQUIREMENT_TEXT);
        let response = run(Json(form)).await.0;

        assert!(response.output.design.is_none());
        assert!(response.rows.is_none());
        // 2 actors + 3 missing-info entries
        assert_eq!(response.summary_rows.len(), 5);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["mode"], "Requirement Analysis");
        assert_eq!(json["requirement"]["title"], "Secure Login");
        assert!(json.get("rows").is_none());
    }

    #[tokio::test]
    async fn test_run_design_mode() {
        let form = FormState::new(Mode::TestDesign, "");
        let response = run(Json(form)).await.0;

        let rows = response.rows.unwrap();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].id, "TC001");
        assert_eq!(response.output.design.unwrap().summary.total(), 8);
    }

    #[tokio::test]
    async fn test_clarify_forces_analysis_flow() {
        let form = FormState::new(Mode::TestDesign, "otp")
            .with_answers(vec!["yes".to_string(), "3".to_string()]);
        let response = clarify(Json(form)).await.0;

        assert_eq!(response.output.mode, Mode::RequirementAnalysis);
        let design = response.output.design.unwrap();
        assert_eq!(design.assumptions.last().unwrap(), "Answered clarifications: 2");
        assert_eq!(response.rows.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_clarify_without_answers() {
        let form = FormState::new(Mode::RequirementAnalysis, "");
        let response = clarify(Json(form)).await.0;
        assert_eq!(
            response.output.requirement.assumptions.last().unwrap(),
            "Answered clarifications: 0"
        );
    }

    #[tokio::test]
    async fn test_export_tests_csv() {
        let response = export(Path("tests.csv".to_string()), Json(FormState::default()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"tests.csv\""
        );

        let body = body_string(response).await;
        assert!(body.starts_with("id,title,preconditions,steps,"));
        assert_eq!(body.lines().count(), 9);
    }

    #[tokio::test]
    async fn test_export_requirement_json() {
        let form = FormState::new(Mode::RequirementAnalysis, "");
        let response = export(Path("requirement_analysis.json".to_string()), Json(form))
            .await
            .unwrap();
        let body = body_string(response).await;
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["functional_tags"][1], "login");
    }

    #[tokio::test]
    async fn test_export_unknown_file() {
        let result = export(Path("secrets.txt".to_string()), Json(FormState::default())).await;
        assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
    }
}
