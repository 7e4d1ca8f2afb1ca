use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use repair_advisor::workflows::legitimacy::{
    DrivingConditions, IntervalKnowledgeBase, LegitimacyScorer, MaintenanceRecord,
    RepositoryError, ScoringConfig, VehicleId, VehicleRecord, VehicleRepository,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryVehicleRepository {
    records: Arc<Mutex<HashMap<VehicleId, VehicleRecord>>>,
}

impl InMemoryVehicleRepository {
    /// Repository preloaded with the demo garage.
    pub(crate) fn seeded() -> Self {
        let records = demo_vehicles()
            .into_iter()
            .map(|vehicle| (vehicle.id.clone(), vehicle))
            .collect();
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl VehicleRepository for InMemoryVehicleRepository {
    fn fetch(&self, id: &VehicleId) -> Result<Option<VehicleRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("vehicle store lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

pub(crate) fn default_scorer() -> Arc<LegitimacyScorer> {
    Arc::new(LegitimacyScorer::new(
        Arc::new(IntervalKnowledgeBase::standard()),
        ScoringConfig::standard(),
    ))
}

fn service(description: &str, mileage: u32) -> MaintenanceRecord {
    MaintenanceRecord {
        description: description.to_string(),
        mileage: Some(mileage),
        performed_on: None,
    }
}

pub(crate) fn demo_vehicles() -> Vec<VehicleRecord> {
    vec![
        VehicleRecord {
            id: VehicleId("demo-civic".to_string()),
            year: Some(2019),
            make: Some("Honda".to_string()),
            model: Some("Civic".to_string()),
            current_mileage: 48_000,
            in_service_date: None,
            driving_conditions: None,
            maintenance: vec![
                service("Oil Change", 46_000),
                service("Tire Rotation", 40_000),
                service("Cabin Air Filter", 33_000),
                service("Engine Air Filter", 36_000),
                service("Front Brake Pads", 12_000),
            ],
        },
        VehicleRecord {
            id: VehicleId("demo-tacoma".to_string()),
            year: Some(2017),
            make: Some("Toyota".to_string()),
            model: Some("Tacoma".to_string()),
            current_mileage: 82_000,
            in_service_date: None,
            driving_conditions: Some(DrivingConditions::Severe),
            maintenance: vec![
                service("Oil Change", 78_500),
                service("Transmission Fluid Change", 58_000),
                service("Differential Fluid Change", 30_000),
            ],
        },
    ]
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_driving(raw: &str) -> Result<DrivingConditions, String> {
    DrivingConditions::parse(raw)
        .ok_or_else(|| format!("expected 'normal' or 'severe', got '{raw}'"))
}
