use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::domain::{CheckServiceInput, ServiceCheck, UrgencyTier};
use super::patterns::{standard_detectors, QuotePattern, QuotePatternDetector};
use super::scoring::LegitimacyScorer;

/// One scored line of a shop quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchItem {
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_price: Option<f64>,
    pub check: ServiceCheck,
}

impl BatchItem {
    /// Money kept by declining this item: the quote, or the fair maximum when
    /// the shop did not quote a price.
    fn potential_savings(&self) -> f64 {
        if !matches!(self.check.tier, UrgencyTier::Unnecessary | UrgencyTier::Scam) {
            return 0.0;
        }
        self.quoted_price
            .or_else(|| self.check.fair_price.map(|fair| fair.max))
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
    pub overall_scam_score: f64,
    pub total_potential_savings: f64,
    pub do_now: Vec<String>,
    pub schedule_soon: Vec<String>,
    pub decline: Vec<String>,
    pub patterns: Vec<QuotePattern>,
}

/// Scores every item of a quote independently and rolls up the results.
pub struct QuoteAggregator {
    detectors: Vec<Box<dyn QuotePatternDetector>>,
}

impl QuoteAggregator {
    pub fn standard() -> Self {
        Self::with_detectors(standard_detectors())
    }

    pub fn with_detectors(detectors: Vec<Box<dyn QuotePatternDetector>>) -> Self {
        Self { detectors }
    }

    pub fn aggregate(
        &self,
        scorer: &LegitimacyScorer,
        inputs: &[CheckServiceInput],
        today: NaiveDate,
    ) -> BatchReport {
        let items: Vec<BatchItem> = inputs
            .iter()
            .map(|input| BatchItem {
                service: input.service.clone(),
                quoted_price: input.quoted_price,
                check: scorer.check(input, today),
            })
            .collect();

        let overall_scam_score = if items.is_empty() {
            0.0
        } else {
            items
                .iter()
                .map(|item| item.check.scam_likelihood as f64)
                .sum::<f64>()
                / items.len() as f64
        };

        let total_potential_savings = items.iter().map(BatchItem::potential_savings).sum();

        let mut do_now = Vec::new();
        let mut schedule_soon = Vec::new();
        let mut decline = Vec::new();
        for item in &items {
            match item.check.tier {
                UrgencyTier::Urgent | UrgencyTier::Overdue | UrgencyTier::SafetyCritical => {
                    do_now.push(item.service.clone())
                }
                UrgencyTier::Soon => schedule_soon.push(item.service.clone()),
                UrgencyTier::Unnecessary | UrgencyTier::Scam | UrgencyTier::CanWait => {
                    decline.push(item.service.clone())
                }
            }
        }

        let patterns: Vec<QuotePattern> = self
            .detectors
            .iter()
            .filter_map(|detector| detector.detect(&items))
            .collect();

        debug!(
            items = items.len(),
            overall_scam_score,
            total_potential_savings,
            patterns = patterns.len(),
            "aggregated shop quote"
        );

        BatchReport {
            items,
            overall_scam_score,
            total_potential_savings,
            do_now,
            schedule_soon,
            decline,
            patterns,
        }
    }
}

impl Default for QuoteAggregator {
    fn default() -> Self {
        Self::standard()
    }
}
