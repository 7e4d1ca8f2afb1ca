use crate::cli::ServeArgs;
use crate::infra::{default_scorer, AppState, InMemoryVehicleRepository};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use repair_advisor::config::AppConfig;
use repair_advisor::error::AppError;
use repair_advisor::telemetry;
use repair_advisor::workflows::legitimacy::VehicleServiceChecker;
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

    let scorer = default_scorer();
    info!(
        services = scorer.knowledge_base().entries().len(),
        "interval knowledge base loaded"
    );
    let checker = Arc::new(VehicleServiceChecker::new(
        Arc::new(InMemoryVehicleRepository::seeded()),
        scorer,
        config.engine.default_driving,
    ));

    let app = with_service_routes(checker)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "repair advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
