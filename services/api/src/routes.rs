use crate::infra::AppState;
use assessment_core::assessments::report::views::{
    ComparisonSummary, MaturityView, RespondentReportSummary,
};
use assessment_core::assessments::results::{results_router, AssessmentRepository, ResultsService};
use assessment_core::assessments::{
    maturity_for, parse_detailed_answers, Category, ComparisonReport, DetailedAnswers,
    EntitySubmissions, ParsedAnswer, Question, RespondentReport, Submission,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ParseAnswersRequest {
    #[serde(default)]
    pub(crate) detailed_answers: DetailedAnswers,
    #[serde(default)]
    pub(crate) questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MaturityRequest {
    pub(crate) score: u32,
    pub(crate) max_score: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreReportRequest {
    #[serde(default)]
    pub(crate) categories: Vec<Category>,
    #[serde(default)]
    pub(crate) submissions: Vec<Submission>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareRequest {
    #[serde(default)]
    pub(crate) entities: Vec<EntitySubmissions>,
}

pub(crate) fn with_assessment_routes<R>(service: Arc<ResultsService<R>>) -> axum::Router
where
    R: AssessmentRepository + 'static,
{
    results_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/answers/parse",
            axum::routing::post(parse_answers_endpoint),
        )
        .route(
            "/api/v1/scores/maturity",
            axum::routing::post(maturity_endpoint),
        )
        .route(
            "/api/v1/scores/report",
            axum::routing::post(score_report_endpoint),
        )
        .route(
            "/api/v1/scores/compare",
            axum::routing::post(compare_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn parse_answers_endpoint(
    Json(payload): Json<ParseAnswersRequest>,
) -> Json<Vec<ParsedAnswer>> {
    Json(parse_detailed_answers(
        &payload.detailed_answers,
        &payload.questions,
    ))
}

pub(crate) async fn maturity_endpoint(Json(payload): Json<MaturityRequest>) -> Json<MaturityView> {
    Json(maturity_for(payload.score, payload.max_score).into())
}

pub(crate) async fn score_report_endpoint(
    Json(payload): Json<ScoreReportRequest>,
) -> Json<RespondentReportSummary> {
    let report = RespondentReport::build(&payload.categories, &payload.submissions);
    Json(report.summary(Utc::now()))
}

pub(crate) async fn compare_endpoint(Json(payload): Json<CompareRequest>) -> Json<ComparisonSummary> {
    let report = ComparisonReport::build(&payload.entities);
    Json(report.summary(Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryAssessmentRepository;
    use assessment_core::assessments::MaturityLevel;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn submission(id: &str, category_id: &str, total: u32, max: u32) -> Submission {
        serde_json::from_value(json!({
            "id": id,
            "categoryId": category_id,
            "categoryName": category_id,
            "userId": "u1",
            "userName": "Ana",
            "companyName": "Acme",
            "totalScore": total,
            "maxScore": max
        }))
        .expect("submission fixture")
    }

    fn app(ready: bool) -> axum::Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let service = Arc::new(ResultsService::new(Arc::new(
            InMemoryAssessmentRepository::default(),
        )));
        with_assessment_routes(service).layer(Extension(state))
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    #[tokio::test]
    async fn maturity_endpoint_returns_band_for_ratio() {
        let Json(view) = maturity_endpoint(Json(MaturityRequest {
            score: 7,
            max_score: 10,
        }))
        .await;
        assert_eq!(view.level, MaturityLevel::Mediano);
        assert_eq!(view.range, "51-70%");

        let Json(view) = maturity_endpoint(Json(MaturityRequest {
            score: 0,
            max_score: 0,
        }))
        .await;
        assert_eq!(view.level, MaturityLevel::Critico);
    }

    #[tokio::test]
    async fn parse_endpoint_accepts_free_text() {
        let body = json!({
            "detailedAnswers": "Pergunta: Há metas? Resposta: ✅ Sim",
            "questions": []
        });

        let response = app(true)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/answers/parse")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload[0]["questionText"], "Há metas?");
        assert_eq!(payload[0]["selectedAnswerText"], "Sim");
    }

    #[tokio::test]
    async fn score_report_endpoint_marks_missing_categories_pending() {
        let categories: Vec<Category> = serde_json::from_value(json!([
            { "id": "a", "name": "Cultura", "questions": [] },
            { "id": "b", "name": "Processos", "questions": [] }
        ]))
        .expect("categories fixture");

        let Json(summary) = score_report_endpoint(Json(ScoreReportRequest {
            categories,
            submissions: vec![submission("s1", "a", 8, 10)],
        }))
        .await;

        assert_eq!(summary.pending_categories, 1);
        assert_eq!(summary.overall.totals.total_score, 8);
        assert_eq!(summary.overall.maturity.level, MaturityLevel::Avancado);
    }

    #[tokio::test]
    async fn compare_endpoint_orders_entities_by_name() {
        let Json(summary) = compare_endpoint(Json(CompareRequest {
            entities: vec![
                EntitySubmissions::new("Beta", vec![submission("s2", "a", 3, 10)]),
                EntitySubmissions::new("Alfa", vec![submission("s1", "a", 9, 10)]),
            ],
        }))
        .await;

        let names: Vec<_> = summary.entries.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Alfa", "Beta"]);
        assert!((summary.average_percentage - 60.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = app(false)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "ok");
    }
}
