//! Advisory cross-item checks over a scored quote.
//!
//! Detectors only annotate a [`BatchReport`](super::batch::BatchReport); they never change
//! per-item tiers or the aggregate scores.

use serde::Serialize;

use super::batch::BatchItem;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotePattern {
    pub detector: &'static str,
    pub summary: String,
    pub services: Vec<String>,
}

pub trait QuotePatternDetector: Send + Sync {
    fn name(&self) -> &'static str;
    fn detect(&self, items: &[BatchItem]) -> Option<QuotePattern>;
}

pub fn standard_detectors() -> Vec<Box<dyn QuotePatternDetector>> {
    vec![
        Box::new(FlushStacking { threshold: 3 }),
        Box::new(EngineAndTransmissionFlush),
        Box::new(MostlyDeclinable { minimum_items: 3 }),
    ]
}

fn is_flush(item: &BatchItem) -> bool {
    item.service.to_lowercase().contains("flush")
        || item
            .check
            .service_key
            .as_deref()
            .is_some_and(|key| key.contains("flush"))
}

/// Several fluid flushes sold in a single visit.
pub struct FlushStacking {
    pub threshold: usize,
}

impl QuotePatternDetector for FlushStacking {
    fn name(&self) -> &'static str {
        "flush_stacking"
    }

    fn detect(&self, items: &[BatchItem]) -> Option<QuotePattern> {
        let flushes: Vec<String> = items
            .iter()
            .filter(|item| is_flush(item))
            .map(|item| item.service.clone())
            .collect();

        if flushes.len() < self.threshold {
            return None;
        }

        Some(QuotePattern {
            detector: self.name(),
            summary: format!(
                "{} flushes quoted in one visit; few maintenance schedules call for more than one at a time",
                flushes.len()
            ),
            services: flushes,
        })
    }
}

/// Engine and transmission flushes bundled together.
pub struct EngineAndTransmissionFlush;

impl QuotePatternDetector for EngineAndTransmissionFlush {
    fn name(&self) -> &'static str {
        "engine_and_transmission_flush"
    }

    fn detect(&self, items: &[BatchItem]) -> Option<QuotePattern> {
        let find = |key: &str| {
            items
                .iter()
                .find(|item| item.check.service_key.as_deref() == Some(key))
                .map(|item| item.service.clone())
        };
        let engine = find("engine_flush")?;
        let transmission = find("transmission_flush")?;

        Some(QuotePattern {
            detector: self.name(),
            summary: "Engine and transmission flushes quoted together is a classic upsell bundle"
                .to_string(),
            services: vec![engine, transmission],
        })
    }
}

/// More than half of a sizeable quote is declinable.
pub struct MostlyDeclinable {
    pub minimum_items: usize,
}

impl QuotePatternDetector for MostlyDeclinable {
    fn name(&self) -> &'static str {
        "mostly_declinable"
    }

    fn detect(&self, items: &[BatchItem]) -> Option<QuotePattern> {
        if items.len() < self.minimum_items {
            return None;
        }

        let declinable: Vec<String> = items
            .iter()
            .filter(|item| item.check.tier.is_declinable())
            .map(|item| item.service.clone())
            .collect();

        if declinable.len() * 2 <= items.len() {
            return None;
        }

        Some(QuotePattern {
            detector: self.name(),
            summary: format!(
                "{} of {} quoted items can be declined or postponed",
                declinable.len(),
                items.len()
            ),
            services: declinable,
        })
    }
}
