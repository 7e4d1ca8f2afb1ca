mod config;
mod policy;
mod rules;

pub use config::{RatioBands, ScoringConfig};

use std::sync::Arc;

use chrono::{Months, NaiveDate};
use tracing::debug;

use super::domain::{CheckServiceInput, ServiceCategory, ServiceCheck, ServiceInterval, UrgencyTier};
use super::knowledge::IntervalKnowledgeBase;
use super::resolver::ServiceResolver;
use policy::{classify, Classification};
use rules::{format_miles, symptom_signals, usage_signals, UsageSignals};

/// Stateless scorer that classifies recommendations against the knowledge base.
#[derive(Debug, Clone)]
pub struct LegitimacyScorer {
    kb: Arc<IntervalKnowledgeBase>,
    config: ScoringConfig,
}

impl LegitimacyScorer {
    pub fn new(kb: Arc<IntervalKnowledgeBase>, config: ScoringConfig) -> Self {
        Self { kb, config }
    }

    pub fn knowledge_base(&self) -> &IntervalKnowledgeBase {
        &self.kb
    }

    pub fn resolver(&self) -> ServiceResolver<'_> {
        ServiceResolver::new(&self.kb)
    }

    /// Classifies one recommendation as of `today`.
    pub fn check(&self, input: &CheckServiceInput, today: NaiveDate) -> ServiceCheck {
        let Some(resolution) = self.resolver().resolve(&input.service) else {
            debug!(service = %input.service, "service label unresolved");
            return self.unresolved(input);
        };
        let Some(entry) = self.kb.lookup(resolution.key) else {
            return self.unresolved(input);
        };

        let usage = usage_signals(input, entry, today);
        let symptoms = symptom_signals(input, entry);
        let Classification {
            tier,
            legitimate,
            confidence,
            mut scam_likelihood,
            reason,
            mut talking_points,
            mut red_flags,
        } = classify(entry, input, &usage, &symptoms, &self.config);

        if let Some(price) = input.quoted_price {
            self.apply_price_check(
                entry,
                price,
                tier,
                &mut scam_likelihood,
                &mut talking_points,
                &mut red_flags,
            );
        }

        let alternative_action = alternative_action(entry, tier);
        let projection = project_next_due(entry, input, &usage, today);

        debug!(
            service = entry.key,
            stage = ?resolution.stage,
            ?tier,
            confidence,
            scam_likelihood,
            "classified service recommendation"
        );

        ServiceCheck {
            service_key: Some(entry.key.to_string()),
            legitimate,
            tier,
            confidence,
            scam_likelihood,
            reason,
            next_due_mileage: projection.next_due_mileage,
            next_due_date: projection.next_due_date,
            miles_until_due: projection.miles_until_due,
            months_until_due: projection.months_until_due,
            talking_points,
            red_flags,
            alternative_action,
            fair_price: Some(entry.cost),
        }
    }

    fn unresolved(&self, input: &CheckServiceInput) -> ServiceCheck {
        ServiceCheck {
            service_key: None,
            legitimate: true,
            tier: UrgencyTier::CanWait,
            confidence: self.config.unresolved_confidence,
            scam_likelihood: 0,
            reason: format!(
                "\"{}\" does not match a known maintenance service. Verify the recommendation against your owner's manual.",
                input.service.trim()
            ),
            next_due_mileage: None,
            next_due_date: None,
            miles_until_due: None,
            months_until_due: None,
            talking_points: vec![
                "Can you show me where my owner's manual recommends this service?".to_string(),
                "What specific problem will this fix on my vehicle?".to_string(),
            ],
            red_flags: Vec::new(),
            alternative_action: None,
            fair_price: None,
        }
    }

    fn apply_price_check(
        &self,
        entry: &ServiceInterval,
        price: f64,
        tier: UrgencyTier,
        scam_likelihood: &mut u8,
        talking_points: &mut Vec<String>,
        red_flags: &mut Vec<String>,
    ) {
        let fair = entry.cost;
        if price > fair.max * self.config.price_flag_ratio {
            red_flags.push(format!(
                "Quoted ${price:.0} is more than {:.0}% of the typical maximum (${:.0})",
                self.config.price_flag_ratio * 100.0,
                fair.max
            ));
            // Reported symptoms keep an urgent repair at zero scam likelihood.
            if tier != UrgencyTier::Urgent {
                *scam_likelihood = scam_likelihood
                    .saturating_add(self.config.price_scam_bump)
                    .min(100);
            }
            talking_points.push(format!(
                "The typical price for this is ${:.0}-${:.0}. Can you match that?",
                fair.min, fair.max
            ));
            talking_points.push(format!(
                "At ${price:.0} I'll need to get another quote before approving."
            ));
        } else if price > fair.max * self.config.price_soft_flag_ratio {
            red_flags.push(format!(
                "Quoted ${price:.0} is above the typical range (${:.0}-${:.0})",
                fair.min, fair.max
            ));
        }
    }
}

fn alternative_action(entry: &ServiceInterval, tier: UrgencyTier) -> Option<String> {
    if !matches!(tier, UrgencyTier::Unnecessary | UrgencyTier::CanWait) {
        return None;
    }

    let name = entry.name.to_lowercase();
    let action = if entry.category == ServiceCategory::Filters {
        format!(
            "DIY option: the {name} is a simple swap with a ${:.0}-${:.0} part from any auto parts store.",
            (entry.cost.min / 3.0).round(),
            (entry.cost.max / 3.0).round()
        )
    } else if entry.often_scam {
        format!("Get a second opinion from an independent shop before paying for the {name}.")
    } else {
        format!("Bundle the {name} into your next regular service visit.")
    };
    Some(action)
}

struct Projection {
    next_due_mileage: Option<u32>,
    next_due_date: Option<NaiveDate>,
    miles_until_due: Option<i64>,
    months_until_due: Option<i32>,
}

/// Display-only projection of when the service comes due.
fn project_next_due(
    entry: &ServiceInterval,
    input: &CheckServiceInput,
    usage: &UsageSignals,
    today: NaiveDate,
) -> Projection {
    let interval_miles = usage.effective_interval_miles.round() as i64;
    let miles_until_due = match usage.miles_since_last {
        Some(miles) => Some(interval_miles - miles as i64),
        None if !usage.has_history() => Some(interval_miles - input.current_mileage as i64),
        None => None,
    };
    let next_due_mileage = miles_until_due
        .filter(|remaining| *remaining > 0)
        .and_then(|remaining| u32::try_from(input.current_mileage as i64 + remaining).ok());

    let months_until_due = match (usage.months_since_last, input.vehicle_age_months) {
        (Some(months), _) => Some((entry.interval_months as f64 - months).round() as i32),
        (None, Some(age)) if !usage.has_history() => {
            Some(entry.interval_months as i32 - age as i32)
        }
        _ => None,
    };
    let next_due_date = match input.last_service_date {
        Some(last) => last
            .checked_add_months(Months::new(entry.interval_months))
            .filter(|due| *due > today),
        None => months_until_due
            .filter(|remaining| *remaining > 0)
            .and_then(|remaining| today.checked_add_months(Months::new(remaining as u32))),
    };

    if let Some(remaining) = miles_until_due.filter(|remaining| *remaining <= 0) {
        debug!(
            service = entry.key,
            overdue_by = %format_miles(remaining.unsigned_abs()),
            "service past due by mileage"
        );
    }

    Projection {
        next_due_mileage,
        next_due_date,
        miles_until_due,
        months_until_due,
    }
}
