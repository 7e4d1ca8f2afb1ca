use serde::{Deserialize, Serialize};

/// Upper bounds (exclusive) of the usage-ratio bands, lowest tier first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioBands {
    pub scam: f64,
    pub unnecessary: f64,
    pub can_wait: f64,
    pub soon: f64,
    pub overdue: f64,
}

/// Thresholds and fixed scores used by the legitimacy rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub unresolved_confidence: u8,
    pub often_scam_baseline: u8,
    pub bands: RatioBands,
    pub no_history_overdue_ratio: f64,
    pub no_history_soon_ratio: f64,
    pub price_flag_ratio: f64,
    pub price_soft_flag_ratio: f64,
    pub price_scam_bump: u8,
}

impl ScoringConfig {
    pub fn standard() -> Self {
        Self {
            unresolved_confidence: 30,
            often_scam_baseline: 70,
            bands: RatioBands {
                scam: 0.5,
                unnecessary: 0.75,
                can_wait: 0.9,
                soon: 1.1,
                overdue: 1.3,
            },
            no_history_overdue_ratio: 1.2,
            no_history_soon_ratio: 0.9,
            price_flag_ratio: 1.5,
            price_soft_flag_ratio: 1.2,
            price_scam_bump: 20,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}
