use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::repository::{AssessmentRepository, RepositoryError};
use super::service::{ResultsService, ResultsServiceError};
use crate::assessments::domain::{Category, Submission, TargetRole};

/// Router builder exposing the stored-results endpoints.
pub fn results_router<R>(service: Arc<ResultsService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/categories", post(register_category_handler::<R>))
        .route("/api/v1/submissions", post(record_submission_handler::<R>))
        .route(
            "/api/v1/respondents/:user_id/report",
            get(respondent_report_handler::<R>),
        )
        .route(
            "/api/v1/companies/comparison",
            get(company_comparison_handler::<R>),
        )
        .route(
            "/api/v1/companies/:company/comparison",
            get(employee_comparison_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportQuery {
    #[serde(default)]
    pub(crate) role: Option<TargetRole>,
}

pub(crate) async fn register_category_handler<R>(
    State(service): State<Arc<ResultsService<R>>>,
    axum::Json(category): axum::Json<Category>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.register_category(category) {
        Ok(category) => (StatusCode::CREATED, axum::Json(category)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn record_submission_handler<R>(
    State(service): State<Arc<ResultsService<R>>>,
    axum::Json(submission): axum::Json<Submission>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.record_submission(submission) {
        Ok(submission) => (StatusCode::CREATED, axum::Json(submission)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn respondent_report_handler<R>(
    State(service): State<Arc<ResultsService<R>>>,
    Path(user_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.respondent_report(&user_id, query.role) {
        Ok(report) => {
            let summary = report.summary(Utc::now());
            (StatusCode::OK, axum::Json(summary)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn employee_comparison_handler<R>(
    State(service): State<Arc<ResultsService<R>>>,
    Path(company): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.compare_employees(&company) {
        Ok(report) => (StatusCode::OK, axum::Json(report.summary(Utc::now()))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn company_comparison_handler<R>(
    State(service): State<Arc<ResultsService<R>>>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.compare_companies() {
        Ok(report) => (StatusCode::OK, axum::Json(report.summary(Utc::now()))).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ResultsServiceError) -> Response {
    let status = match &error {
        ResultsServiceError::UnknownCategory(_) | ResultsServiceError::InvalidInput(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ResultsServiceError::UnknownCompany(_) => StatusCode::NOT_FOUND,
        ResultsServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ResultsServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
