use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maintenance system a knowledge-base entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Engine,
    Transmission,
    Brakes,
    Fluids,
    Filters,
    Tires,
    Electrical,
    Fuel,
    Suspension,
    Cooling,
}

impl ServiceCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Engine => "Engine",
            Self::Transmission => "Transmission",
            Self::Brakes => "Brakes",
            Self::Fluids => "Fluids",
            Self::Filters => "Filters",
            Self::Tires => "Tires",
            Self::Electrical => "Electrical",
            Self::Fuel => "Fuel System",
            Self::Suspension => "Suspension",
            Self::Cooling => "Cooling",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivingConditions {
    #[default]
    Normal,
    Severe,
}

impl DrivingConditions {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "severe" => Some(Self::Severe),
            _ => None,
        }
    }
}

/// Primary classification produced for a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyTier {
    Scam,
    Unnecessary,
    CanWait,
    Soon,
    Overdue,
    Urgent,
    SafetyCritical,
}

impl UrgencyTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scam => "Likely Scam",
            Self::Unnecessary => "Unnecessary",
            Self::CanWait => "Can Wait",
            Self::Soon => "Due Soon",
            Self::Overdue => "Overdue",
            Self::Urgent => "Urgent",
            Self::SafetyCritical => "Safety Critical",
        }
    }

    /// Ordinal along the mileage axis. `Urgent` is symptom driven and sits
    /// between `Overdue` and `SafetyCritical`.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Scam => 0,
            Self::Unnecessary => 1,
            Self::CanWait => 2,
            Self::Soon => 3,
            Self::Overdue => 4,
            Self::Urgent => 5,
            Self::SafetyCritical => 6,
        }
    }

    pub const fn needs_action_now(self) -> bool {
        matches!(self, Self::Urgent | Self::Overdue | Self::SafetyCritical)
    }

    pub const fn is_declinable(self) -> bool {
        matches!(self, Self::Unnecessary | Self::Scam | Self::CanWait)
    }

    /// Caller-facing guidance shown next to a classification.
    pub const fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::Scam => &[
                "Decline this service today.",
                "Ask the shop to note the declined recommendation on your invoice.",
                "Get a second opinion before authorizing any related work.",
            ],
            Self::Unnecessary => &[
                "Decline for now; the service is well ahead of schedule.",
                "Revisit at your next scheduled maintenance visit.",
            ],
            Self::CanWait => &[
                "Safe to postpone; schedule it with your next regular service.",
                "Compare prices with another shop before booking.",
            ],
            Self::Soon => &[
                "Plan this within the next few weeks.",
                "Shop around; there is time to compare quotes.",
            ],
            Self::Overdue => &[
                "Book this service soon; the interval has passed.",
                "Ask for an itemized quote before approving.",
            ],
            Self::Urgent => &[
                "Have this fixed now; the reported symptoms justify it.",
                "Ask to see the worn parts after the repair.",
            ],
            Self::SafetyCritical => &[
                "Do not delay; this is well past the safe interval.",
                "Limit driving until the service is completed.",
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

/// Knowledge-base entry describing a maintenance interval.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInterval {
    pub key: &'static str,
    pub name: &'static str,
    pub category: ServiceCategory,
    pub interval_miles: u32,
    pub interval_months: u32,
    pub min_interval_miles: Option<u32>,
    pub max_interval_miles: Option<u32>,
    pub urgency_factors: Vec<&'static str>,
    pub scam_indicators: Vec<&'static str>,
    pub description: &'static str,
    pub cost: CostRange,
    pub severe_multiplier: Option<f64>,
    pub often_scam: bool,
}

impl ServiceInterval {
    /// Mile interval after applying the severe-driving multiplier, when the
    /// entry defines one.
    pub fn effective_interval_miles(&self, conditions: DrivingConditions) -> f64 {
        match (conditions, self.severe_multiplier) {
            (DrivingConditions::Severe, Some(multiplier)) => {
                self.interval_miles as f64 * multiplier
            }
            _ => self.interval_miles as f64,
        }
    }
}

/// Facts about one recommended service, built fresh for every check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckServiceInput {
    pub service: String,
    pub current_mileage: u32,
    #[serde(default)]
    pub last_service_mileage: Option<u32>,
    #[serde(default)]
    pub last_service_date: Option<NaiveDate>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub quoted_price: Option<f64>,
    #[serde(default)]
    pub vehicle_age_months: Option<u32>,
    #[serde(default)]
    pub driving_conditions: DrivingConditions,
}

impl CheckServiceInput {
    pub fn new(service: impl Into<String>, current_mileage: u32) -> Self {
        Self {
            service: service.into(),
            current_mileage,
            ..Self::default()
        }
    }

    /// Rejects inputs outside the numeric domain the scorer assumes.
    pub fn validate(&self, today: NaiveDate) -> Result<(), InputError> {
        if self.service.trim().is_empty() {
            return Err(InputError::EmptyDescription);
        }

        if let Some(price) = self.quoted_price {
            if !price.is_finite() || price < 0.0 {
                return Err(InputError::InvalidPrice(price));
            }
        }

        if let Some(last) = self.last_service_mileage {
            if last > self.current_mileage {
                return Err(InputError::OdometerRollback {
                    current: self.current_mileage,
                    last,
                });
            }
        }

        if let Some(date) = self.last_service_date {
            if date > today {
                return Err(InputError::FutureServiceDate(date));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("service description must not be empty")]
    EmptyDescription,
    #[error("quoted price {0} must be a finite, non-negative amount")]
    InvalidPrice(f64),
    #[error("last service mileage {last} exceeds current mileage {current}")]
    OdometerRollback { current: u32, last: u32 },
    #[error("last service date {0} is in the future")]
    FutureServiceDate(NaiveDate),
}

/// Result record for one classified recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCheck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_key: Option<String>,
    pub legitimate: bool,
    pub tier: UrgencyTier,
    pub confidence: u8,
    pub scam_likelihood: u8,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due_mileage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miles_until_due: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_until_due: Option<i32>,
    pub talking_points: Vec<String>,
    pub red_flags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fair_price: Option<CostRange>,
}
