use chrono::NaiveDate;

use super::super::domain::{CheckServiceInput, ServiceInterval};

const DAYS_PER_MONTH: f64 = 30.44;

pub(crate) struct UsageSignals {
    pub miles_since_last: Option<u32>,
    pub months_since_last: Option<f64>,
    pub effective_interval_miles: f64,
}

impl UsageSignals {
    pub fn has_history(&self) -> bool {
        self.miles_since_last.is_some() || self.months_since_last.is_some()
    }

    /// Largest consumed fraction of the interval across the known axes.
    pub fn history_ratio(&self, entry: &ServiceInterval) -> Option<f64> {
        let by_miles = self
            .miles_since_last
            .map(|miles| miles as f64 / self.effective_interval_miles);
        let by_months = self
            .months_since_last
            .map(|months| months / entry.interval_months as f64);

        match (by_miles, by_months) {
            (Some(miles), Some(months)) => Some(miles.max(months)),
            (Some(ratio), None) | (None, Some(ratio)) => Some(ratio),
            (None, None) => None,
        }
    }
}

pub(crate) struct SymptomSignals {
    pub urgency_matches: Vec<String>,
    pub scam_matches: Vec<String>,
}

impl SymptomSignals {
    pub fn justified(&self) -> bool {
        !self.urgency_matches.is_empty()
    }
}

pub(crate) fn usage_signals(
    input: &CheckServiceInput,
    entry: &ServiceInterval,
    today: NaiveDate,
) -> UsageSignals {
    let miles_since_last = input
        .last_service_mileage
        .map(|last| input.current_mileage.saturating_sub(last));
    let months_since_last = input
        .last_service_date
        .map(|date| months_between(date, today));

    UsageSignals {
        miles_since_last,
        months_since_last,
        effective_interval_miles: entry.effective_interval_miles(input.driving_conditions),
    }
}

pub(crate) fn symptom_signals(input: &CheckServiceInput, entry: &ServiceInterval) -> SymptomSignals {
    let mut urgency_matches = Vec::new();
    let mut scam_matches = Vec::new();

    for symptom in &input.symptoms {
        let symptom = symptom.trim();
        if symptom.is_empty() {
            continue;
        }
        if entry
            .urgency_factors
            .iter()
            .any(|factor| phrases_overlap(symptom, factor))
        {
            urgency_matches.push(symptom.to_string());
        }
        if entry
            .scam_indicators
            .iter()
            .any(|indicator| phrases_overlap(symptom, indicator))
        {
            scam_matches.push(symptom.to_string());
        }
    }

    SymptomSignals {
        urgency_matches,
        scam_matches,
    }
}

/// Case-insensitive containment in either direction.
pub(crate) fn phrases_overlap(left: &str, right: &str) -> bool {
    let left = left.trim().to_lowercase();
    let right = right.trim().to_lowercase();
    if left.is_empty() || right.is_empty() {
        return false;
    }
    left.contains(&right) || right.contains(&left)
}

pub(crate) fn months_between(from: NaiveDate, to: NaiveDate) -> f64 {
    let days = (to - from).num_days().max(0);
    days as f64 / DAYS_PER_MONTH
}

/// Renders whole miles with thousands separators.
pub(crate) fn format_miles(miles: u64) -> String {
    let digits = miles.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
