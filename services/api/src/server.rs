use crate::cli::ServeArgs;
use crate::infra::{load_bundle, seeded_repository, AppState, InMemoryAssessmentRepository};
use crate::routes::with_assessment_routes;
use assessment_core::assessments::results::ResultsService;
use assessment_core::config::AppConfig;
use assessment_core::error::AppError;
use assessment_core::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = match config.results.seed_path.as_ref() {
        Some(path) => {
            let bundle = load_bundle(path)?;
            info!(
                path = %path.display(),
                categories = bundle.categories.len(),
                submissions = bundle.submissions.len(),
                "seeding results store"
            );
            seeded_repository(bundle)?
        }
        None => InMemoryAssessmentRepository::default(),
    };
    let results_service = Arc::new(ResultsService::new(Arc::new(repository)));

    let app = with_assessment_routes(results_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "assessment dashboard service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
