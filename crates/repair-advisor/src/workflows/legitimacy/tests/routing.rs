use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::legitimacy::checker::{
    service_check_router, ServiceCheckRequest, VehicleServiceChecker,
};
use crate::workflows::legitimacy::domain::DrivingConditions;

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(&payload).expect("serialize payload"),
        ))
        .expect("build request")
}

#[tokio::test]
async fn check_route_returns_assessment() {
    let response = router_with_civic()
        .oneshot(post_json(
            "/api/v1/services/check",
            json!({
                "vehicle_id": "veh-civic",
                "service_description": "Oil Change",
                "quoted_price": 89.0
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["check"]["tier"], "scam");
    assert_eq!(payload["check"]["service_key"], "oil_change");
    assert!(payload["talking_points"]
        .as_array()
        .is_some_and(|points| !points.is_empty()));
    assert_eq!(payload["talking_points"][0]["stage"], "opening");
    assert!(payload["recommendations"].is_array());
    assert!(payload.get("script").is_none());
}

#[tokio::test]
async fn check_route_accepts_camel_case_fields() {
    let response = router_with_civic()
        .oneshot(post_json(
            "/api/v1/services/check",
            json!({
                "vehicleId": "veh-civic",
                "serviceDescription": "Front Brake Pads",
                "symptoms": ["grinding"]
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["check"]["tier"], "urgent");
    assert_eq!(payload["check"]["scam_likelihood"], 0);
}

#[tokio::test]
async fn check_route_rejects_invalid_prices() {
    let response = router_with_civic()
        .oneshot(post_json(
            "/api/v1/services/check",
            json!({
                "vehicle_id": "veh-civic",
                "service_description": "Oil Change",
                "quoted_price": -5.0
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("quoted price")));
}

#[tokio::test]
async fn check_route_returns_not_found_for_unknown_vehicle() {
    let response = router_with_civic()
        .oneshot(post_json(
            "/api/v1/services/check",
            json!({
                "vehicle_id": "veh-missing",
                "service_description": "Oil Change"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn check_handler_returns_internal_error_on_repository_failure() {
    let checker = Arc::new(VehicleServiceChecker::new(
        Arc::new(UnavailableVehicles),
        Arc::new(scorer()),
        DrivingConditions::Normal,
    ));

    let response = crate::workflows::legitimacy::checker::router::check_handler::<
        UnavailableVehicles,
    >(
        State(checker),
        axum::Json(ServiceCheckRequest {
            vehicle_id: "veh-civic".to_string(),
            service_description: "Oil Change".to_string(),
            quoted_price: None,
            symptoms: Vec::new(),
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn quote_route_aggregates_items() {
    let response = router_with_civic()
        .oneshot(post_json(
            "/api/v1/services/quote",
            json!({
                "vehicle_id": "veh-civic",
                "items": [
                    { "description": "Oil Change", "quoted_price": 89.0 },
                    { "description": "Tire Rotation" },
                    { "description": "Engine Flush" }
                ]
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["items"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["decline"][0], "Oil Change");
    assert!(payload["overall_scam_score"].as_f64().is_some());
}

#[tokio::test]
async fn catalog_route_lists_services() {
    let response = service_check_router(Arc::new(build_checker(Vec::new())))
        .oneshot(
            Request::get("/api/v1/services/catalog")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let rows = payload["services"].as_array().expect("catalog array");
    assert_eq!(rows.len(), 30);
    assert!(rows
        .iter()
        .any(|row| row["key"] == "oil_change" && row["category"] == "engine"));
    let vocabulary = payload["vocabulary"].as_array().expect("vocabulary array");
    assert_eq!(vocabulary.len(), 60);
    assert!(vocabulary.iter().any(|label| label == "Oil Change"));
}
