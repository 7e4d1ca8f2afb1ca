use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use repair_advisor::workflows::legitimacy::{
    service_check_router, VehicleRepository, VehicleServiceChecker,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_service_routes<R>(checker: Arc<VehicleServiceChecker<R>>) -> axum::Router
where
    R: VehicleRepository + 'static,
{
    service_check_router(checker)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{default_scorer, InMemoryVehicleRepository};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use repair_advisor::workflows::legitimacy::DrivingConditions;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, Arc<AtomicBool>) {
        let readiness = Arc::new(AtomicBool::new(ready));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let checker = Arc::new(VehicleServiceChecker::new(
            Arc::new(InMemoryVehicleRepository::seeded()),
            default_scorer(),
            DrivingConditions::Normal,
        ));
        (with_service_routes(checker).layer(Extension(state)), readiness)
    }

    async fn status_of(router: axum::Router, request: Request<Body>) -> StatusCode {
        router
            .oneshot(request)
            .await
            .expect("route executes")
            .status()
    }

    #[tokio::test]
    async fn readiness_tracks_the_flag() {
        let (router, readiness) = app(false);
        let request = || Request::get("/ready").body(Body::empty()).expect("request");

        assert_eq!(
            status_of(router.clone(), request()).await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        readiness.store(true, Ordering::Release);
        assert_eq!(status_of(router, request()).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn operational_endpoints_respond() {
        let (router, _) = app(true);
        let health = Request::get("/health").body(Body::empty()).expect("request");
        assert_eq!(status_of(router.clone(), health).await, StatusCode::OK);

        let metrics = Request::get("/metrics").body(Body::empty()).expect("request");
        assert_eq!(status_of(router, metrics).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn service_routes_use_the_seeded_garage() {
        let (router, _) = app(true);
        let request = Request::post("/api/v1/services/check")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "vehicle_id": "demo-tacoma",
                    "service_description": "Oil Change"
                })
                .to_string(),
            ))
            .expect("request");

        assert_eq!(status_of(router, request).await, StatusCode::OK);
    }
}
