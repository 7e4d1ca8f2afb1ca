use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;

use super::super::batch::BatchReport;
use super::super::knowledge::ServiceCatalog;
use super::repository::VehicleRepository;
use super::service::{
    QuoteCheckRequest, ServiceCheckReport, ServiceCheckRequest, VehicleServiceChecker,
};
use crate::error::AppError;

/// Router builder exposing the service check endpoints.
pub fn service_check_router<R>(checker: Arc<VehicleServiceChecker<R>>) -> Router
where
    R: VehicleRepository + 'static,
{
    Router::new()
        .route("/api/v1/services/check", post(check_handler::<R>))
        .route("/api/v1/services/quote", post(quote_handler::<R>))
        .route("/api/v1/services/catalog", get(catalog_handler::<R>))
        .with_state(checker)
}

pub(crate) async fn check_handler<R>(
    State(checker): State<Arc<VehicleServiceChecker<R>>>,
    Json(request): Json<ServiceCheckRequest>,
) -> Result<Json<ServiceCheckReport>, AppError>
where
    R: VehicleRepository + 'static,
{
    let today = Local::now().date_naive();
    let report = checker.check(request, today)?;
    Ok(Json(report))
}

pub(crate) async fn quote_handler<R>(
    State(checker): State<Arc<VehicleServiceChecker<R>>>,
    Json(request): Json<QuoteCheckRequest>,
) -> Result<Json<BatchReport>, AppError>
where
    R: VehicleRepository + 'static,
{
    let today = Local::now().date_naive();
    let report = checker.check_quote(request, today)?;
    Ok(Json(report))
}

pub(crate) async fn catalog_handler<R>(
    State(checker): State<Arc<VehicleServiceChecker<R>>>,
) -> Json<ServiceCatalog>
where
    R: VehicleRepository + 'static,
{
    Json(checker.catalog())
}
