use super::common::*;

use crate::workflows::legitimacy::batch::{BatchItem, QuoteAggregator};
use crate::workflows::legitimacy::domain::{CheckServiceInput, UrgencyTier};
use crate::workflows::legitimacy::patterns::{QuotePattern, QuotePatternDetector};

fn mixed_quote() -> Vec<CheckServiceInput> {
    vec![
        priced(with_history("Oil Change", 60_000, 58_000), 89.0),
        with_symptoms(CheckServiceInput::new("Front Brake Pads", 60_000), &["squealing"]),
        priced(with_history("Cabin Air Filter", 60_000, 45_000), 120.0),
        CheckServiceInput::new("Engine Flush", 60_000),
        CheckServiceInput::new("Flux Capacitor Realignment", 60_000),
        with_history("Tire Rotation", 60_000, 52_000),
        with_history("Wheel Alignment", 60_000, 25_000),
    ]
}

#[test]
fn seven_item_quote_rolls_up_independent_scores() {
    let report = QuoteAggregator::standard().aggregate(&scorer(), &mixed_quote(), today());

    assert_eq!(report.items.len(), 7);
    let mean = report
        .items
        .iter()
        .map(|item| item.check.scam_likelihood as f64)
        .sum::<f64>()
        / 7.0;
    assert!((report.overall_scam_score - mean).abs() < f64::EPSILON);
    assert!((report.overall_scam_score - 185.0 / 7.0).abs() < 1e-9);

    assert_eq!(
        report.decline,
        vec!["Oil Change", "Cabin Air Filter", "Flux Capacitor Realignment"]
    );
    assert_eq!(report.do_now, vec!["Front Brake Pads", "Wheel Alignment"]);
    assert_eq!(report.schedule_soon, vec!["Engine Flush", "Tire Rotation"]);

    let declined_tiers: Vec<UrgencyTier> = report
        .items
        .iter()
        .filter(|item| report.decline.contains(&item.service))
        .map(|item| item.check.tier)
        .collect();
    assert!(declined_tiers.iter().all(|tier| tier.is_declinable()));
}

#[test]
fn items_match_individual_checks() {
    let scorer = scorer();
    let inputs = mixed_quote();
    let report = QuoteAggregator::standard().aggregate(&scorer, &inputs, today());

    for (item, input) in report.items.iter().zip(&inputs) {
        assert_eq!(item.check, scorer.check(input, today()));
        assert_eq!(item.quoted_price, input.quoted_price);
    }
}

#[test]
fn savings_count_scam_and_unnecessary_items_only() {
    let inputs = vec![
        priced(with_history("Oil Change", 60_000, 58_000), 89.0),
        with_history("Engine Air Filter", 60_000, 52_000),
        priced(with_history("Cabin Air Filter", 60_000, 45_000), 120.0),
    ];
    let report = QuoteAggregator::standard().aggregate(&scorer(), &inputs, today());

    assert_eq!(report.items[1].check.tier, UrgencyTier::Unnecessary);
    // Unpriced lines fall back to the fair maximum.
    assert!((report.total_potential_savings - (89.0 + 60.0)).abs() < 1e-9);
}

#[test]
fn empty_quote_scores_zero() {
    let report = QuoteAggregator::standard().aggregate(&scorer(), &[], today());
    assert!(report.items.is_empty());
    assert_eq!(report.overall_scam_score, 0.0);
    assert_eq!(report.total_potential_savings, 0.0);
    assert!(report.patterns.is_empty());
}

#[test]
fn flush_heavy_quotes_surface_patterns() {
    let inputs: Vec<CheckServiceInput> = [
        "Engine Flush",
        "Transmission Flush",
        "Coolant Flush",
        "Power Steering Flush",
    ]
    .into_iter()
    .map(|service| CheckServiceInput::new(service, 20_000))
    .collect();
    let report = QuoteAggregator::standard().aggregate(&scorer(), &inputs, today());

    let names: Vec<&str> = report.patterns.iter().map(|pattern| pattern.detector).collect();
    assert_eq!(
        names,
        vec![
            "flush_stacking",
            "engine_and_transmission_flush",
            "mostly_declinable"
        ]
    );
    assert_eq!(report.patterns[0].services.len(), 4);
    assert_eq!(
        report.patterns[1].services,
        vec!["Engine Flush", "Transmission Flush"]
    );
}

#[test]
fn mixed_quote_has_no_patterns() {
    let report = QuoteAggregator::standard().aggregate(&scorer(), &mixed_quote(), today());
    assert!(report.patterns.is_empty());
}

struct AlwaysFires;

impl QuotePatternDetector for AlwaysFires {
    fn name(&self) -> &'static str {
        "always"
    }

    fn detect(&self, items: &[BatchItem]) -> Option<QuotePattern> {
        Some(QuotePattern {
            detector: self.name(),
            summary: "fired".to_string(),
            services: items.iter().map(|item| item.service.clone()).collect(),
        })
    }
}

#[test]
fn detectors_never_change_scores() {
    let scorer = scorer();
    let inputs = mixed_quote();
    let plain = QuoteAggregator::with_detectors(Vec::new()).aggregate(&scorer, &inputs, today());
    let detectors: Vec<Box<dyn QuotePatternDetector>> = vec![Box::new(AlwaysFires)];
    let custom = QuoteAggregator::with_detectors(detectors).aggregate(&scorer, &inputs, today());

    assert!(plain.patterns.is_empty());
    assert_eq!(custom.patterns.len(), 1);
    assert_eq!(custom.items, plain.items);
    assert_eq!(custom.overall_scam_score, plain.overall_scam_score);
    assert_eq!(custom.decline, plain.decline);
}
