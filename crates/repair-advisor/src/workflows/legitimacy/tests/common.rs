use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::legitimacy::checker::{
    service_check_router, MaintenanceRecord, RepositoryError, VehicleId, VehicleRecord,
    VehicleRepository, VehicleServiceChecker,
};
use crate::workflows::legitimacy::domain::{CheckServiceInput, DrivingConditions};
use crate::workflows::legitimacy::knowledge::IntervalKnowledgeBase;
use crate::workflows::legitimacy::scoring::{LegitimacyScorer, ScoringConfig};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

pub(super) fn scorer() -> LegitimacyScorer {
    LegitimacyScorer::new(
        Arc::new(IntervalKnowledgeBase::standard()),
        ScoringConfig::standard(),
    )
}

/// Input with a mileage-only service history.
pub(super) fn with_history(service: &str, current: u32, last: u32) -> CheckServiceInput {
    let mut input = CheckServiceInput::new(service, current);
    input.last_service_mileage = Some(last);
    input
}

pub(super) fn with_symptoms(input: CheckServiceInput, symptoms: &[&str]) -> CheckServiceInput {
    CheckServiceInput {
        symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        ..input
    }
}

pub(super) fn priced(input: CheckServiceInput, price: f64) -> CheckServiceInput {
    CheckServiceInput {
        quoted_price: Some(price),
        ..input
    }
}

pub(super) fn civic() -> VehicleRecord {
    VehicleRecord {
        id: VehicleId("veh-civic".to_string()),
        year: Some(2019),
        make: Some("Honda".to_string()),
        model: Some("Civic".to_string()),
        current_mileage: 48_000,
        in_service_date: None,
        driving_conditions: None,
        maintenance: vec![
            MaintenanceRecord {
                description: "Oil change".to_string(),
                mileage: Some(41_000),
                performed_on: None,
            },
            MaintenanceRecord {
                description: "Synthetic Oil Change".to_string(),
                mileage: Some(46_000),
                performed_on: None,
            },
            MaintenanceRecord {
                description: "Tire rotation".to_string(),
                mileage: Some(40_000),
                performed_on: None,
            },
            MaintenanceRecord {
                description: "Cabin Air Filter".to_string(),
                mileage: Some(33_000),
                performed_on: None,
            },
        ],
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryVehicles {
    pub(super) records: Arc<Mutex<HashMap<VehicleId, VehicleRecord>>>,
}

impl MemoryVehicles {
    pub(super) fn with(records: Vec<VehicleRecord>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.records.lock().expect("repository mutex poisoned");
            for record in records {
                guard.insert(record.id.clone(), record);
            }
        }
        repository
    }
}

impl VehicleRepository for MemoryVehicles {
    fn fetch(&self, id: &VehicleId) -> Result<Option<VehicleRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableVehicles;

impl VehicleRepository for UnavailableVehicles {
    fn fetch(&self, _id: &VehicleId) -> Result<Option<VehicleRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_checker(records: Vec<VehicleRecord>) -> VehicleServiceChecker<MemoryVehicles> {
    VehicleServiceChecker::new(
        Arc::new(MemoryVehicles::with(records)),
        Arc::new(scorer()),
        DrivingConditions::Normal,
    )
}

pub(super) fn router_with_civic() -> axum::Router {
    service_check_router(Arc::new(build_checker(vec![civic()])))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
