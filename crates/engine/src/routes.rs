use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;

use agentflow_common::api::analyze::{
    AnalysisTemplate, AnalyzeRequest, EstimateQuery, EstimateResponse,
};
use agentflow_common::api::status::StatusResponse;
use agentflow_common::types::{AnalysisType, ResultRecord, Source};

use crate::cache::company_slug;
use crate::chain::DegradationChain;
use crate::config::EngineConfig;
use crate::report::render_pdf;
use crate::status::build_status;
use crate::templates::all_templates;

/// Shared application state.
pub struct AppState {
    pub chain: DegradationChain,
    pub config: EngineConfig,
    pub metrics_handle: PrometheusHandle,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/analyze", post(analyze_handler))
        .route("/report", post(report_handler))
        .route("/status", get(status_handler))
        .route("/templates", get(templates_handler))
        .route("/estimate", get(estimate_handler))
        .with_state(state)
}

/// POST /analyze: run the chain and return the record.
///
/// Always answers with a record; an error stub is sent with 422.
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<AnalyzeRequest>,
) -> (StatusCode, Json<ResultRecord>) {
    let request = form.into_request();
    let record = state.chain.run(&request).await;

    let status = if record.source == Source::ErrorStub {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    (status, Json(record))
}

/// POST /report: run the chain and return the result as a PDF.
pub async fn report_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<AnalyzeRequest>,
) -> Result<Response, (StatusCode, String)> {
    let request = form.into_request();
    let record = state.chain.run(&request).await;

    let pdf = render_pdf(&record, &request).map_err(|e| {
        tracing::error!(error = %e, result_id = %record.id, "Failed to render PDF report");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        report_filename(request.company_name())
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

/// ASCII-only download name for a company's report.
fn report_filename(company_name: &str) -> String {
    let slug: String = company_slug(company_name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if slug.is_empty() {
        "analysis_report.pdf".to_string()
    } else {
        format!("analysis_{}.pdf", slug)
    }
}

/// GET /status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(build_status(&state.chain))
}

/// GET /templates
pub async fn templates_handler(State(state): State<Arc<AppState>>) -> Json<Vec<AnalysisTemplate>> {
    Json(all_templates(&state.config.templates))
}

/// GET /estimate?analysis_type=
pub async fn estimate_handler(Query(query): Query<EstimateQuery>) -> Json<EstimateResponse> {
    let analysis_type = AnalysisType::from_label(&query.analysis_type);
    Json(EstimateResponse {
        analysis_type,
        display_name: analysis_type.display_name().to_string(),
        estimate: analysis_type.estimate(),
    })
}

async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "healthy" })),
    )
}

async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}
