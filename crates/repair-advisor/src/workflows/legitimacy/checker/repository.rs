use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::super::domain::DrivingConditions;
use super::super::talking_points::VehicleInfo;

/// Identifier wrapper for stored vehicles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub String);

/// Past service recorded against a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub description: String,
    pub mileage: Option<u32>,
    pub performed_on: Option<NaiveDate>,
}

/// Vehicle snapshot the checker needs to build scoring input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: VehicleId,
    pub year: Option<u16>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub current_mileage: u32,
    pub in_service_date: Option<NaiveDate>,
    pub driving_conditions: Option<DrivingConditions>,
    pub maintenance: Vec<MaintenanceRecord>,
}

impl VehicleRecord {
    pub fn info(&self) -> VehicleInfo {
        VehicleInfo {
            year: self.year,
            make: self.make.clone(),
            model: self.model.clone(),
            mileage: Some(self.current_mileage),
        }
    }

    /// Whole months since the vehicle entered service, if known.
    pub fn age_months(&self, today: NaiveDate) -> Option<u32> {
        let start = self.in_service_date?;
        if start > today {
            return Some(0);
        }
        let months = (today.year() - start.year()) * 12 + today.month() as i32
            - start.month() as i32
            - i32::from(today.day() < start.day());
        u32::try_from(months.max(0)).ok()
    }
}

/// Storage abstraction so the checker can be exercised in isolation.
pub trait VehicleRepository: Send + Sync {
    fn fetch(&self, id: &VehicleId) -> Result<Option<VehicleRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("vehicle not found")]
    NotFound,
    #[error("vehicle storage unavailable: {0}")]
    Unavailable(String),
}
