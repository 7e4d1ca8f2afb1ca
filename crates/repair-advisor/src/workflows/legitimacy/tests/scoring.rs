use super::common::*;
use chrono::NaiveDate;

use crate::workflows::legitimacy::domain::{CheckServiceInput, DrivingConditions, UrgencyTier};

#[test]
fn oil_change_two_thousand_miles_after_last_is_a_scam() {
    let input = priced(with_history("Oil Change", 45_000, 43_000), 89.0);
    let check = scorer().check(&input, today());

    assert_eq!(check.service_key.as_deref(), Some("oil_change"));
    assert_eq!(check.tier, UrgencyTier::Scam);
    assert!(!check.legitimate);
    assert!(check.scam_likelihood >= 90);
    assert!(check.reason.contains("2,000 miles"));
    assert!(check
        .red_flags
        .iter()
        .any(|flag| flag.contains("27% of the manufacturer interval")));
}

#[test]
fn brake_symptoms_override_mileage() {
    let input = with_symptoms(
        with_history("Front Brake Pads", 95_000, 35_000),
        &["squealing", "reduced stopping power"],
    );
    let check = scorer().check(&input, today());

    assert_eq!(check.tier, UrgencyTier::Urgent);
    assert!(check.legitimate);
    assert_eq!(check.scam_likelihood, 0);
    assert_eq!(check.confidence, 90);
    assert!(check.reason.contains("squealing, reduced stopping power"));
}

#[test]
fn symptoms_override_even_when_service_is_far_from_due() {
    let quiet = with_history("Oil Change", 41_000, 40_000);
    let noisy = with_symptoms(quiet.clone(), &["Oil pressure light came on"]);

    assert_eq!(scorer().check(&quiet, today()).tier, UrgencyTier::Scam);
    let check = scorer().check(&noisy, today());
    assert_eq!(check.tier, UrgencyTier::Urgent);
    assert_eq!(check.scam_likelihood, 0);
}

#[test]
fn overpriced_urgent_repair_keeps_zero_scam_likelihood() {
    let input = priced(
        with_symptoms(with_history("Front Brake Pads", 95_000, 35_000), &["squealing"]),
        600.0,
    );
    let check = scorer().check(&input, today());

    assert_eq!(check.tier, UrgencyTier::Urgent);
    assert_eq!(check.scam_likelihood, 0);
    assert!(check
        .red_flags
        .iter()
        .any(|flag| flag.contains("more than 150% of the typical maximum")));
    assert!(check
        .talking_points
        .iter()
        .any(|point| point.contains("Can you match that?")));
}

#[test]
fn blank_symptoms_are_ignored() {
    let input = with_symptoms(with_history("Oil Change", 41_000, 40_000), &["", "   "]);
    assert_eq!(scorer().check(&input, today()).tier, UrgencyTier::Scam);
}

#[test]
fn overpriced_cabin_filter_is_flagged_with_diy_alternative() {
    let input = priced(with_history("Cabin Air Filter", 35_000, 20_000), 120.0);
    let check = scorer().check(&input, today());

    assert_eq!(check.tier, UrgencyTier::CanWait);
    assert_eq!(check.scam_likelihood, 20);
    assert!(check
        .red_flags
        .iter()
        .any(|flag| flag.contains("more than 150% of the typical maximum")));
    let alternative = check.alternative_action.expect("alternative offered");
    assert!(alternative.contains("DIY"));
    assert_eq!(check.fair_price.map(|fair| fair.max), Some(75.0));
}

#[test]
fn often_scam_services_start_from_the_baseline() {
    let fresh = CheckServiceInput::new("Engine Flush", 40_000);
    let check = scorer().check(&fresh, today());
    assert_eq!(check.scam_likelihood, 70);
    assert!(check
        .red_flags
        .iter()
        .any(|flag| flag.contains("most commonly oversold")));

    let due = with_history("Engine Flush", 118_000, 60_000);
    let check = scorer().check(&due, today());
    assert_eq!(check.tier, UrgencyTier::Soon);
    assert!(check.legitimate);
    assert_eq!(check.scam_likelihood, 70);
    assert!(check
        .red_flags
        .iter()
        .any(|flag| flag.contains("most commonly oversold")));
}

#[test]
fn unknown_labels_get_the_benefit_of_the_doubt() {
    let input = priced(
        CheckServiceInput::new("Flux Capacitor Realignment", 88_000),
        999.0,
    );
    let check = scorer().check(&input, today());

    assert_eq!(check.service_key, None);
    assert_eq!(check.confidence, 30);
    assert_eq!(check.tier, UrgencyTier::CanWait);
    assert!(check.legitimate);
    assert_eq!(check.scam_likelihood, 0);
    assert!(check.red_flags.is_empty());
    assert!(check.fair_price.is_none());
    assert_eq!(check.talking_points.len(), 2);
    assert!(check.talking_points[0].contains("owner's manual"));
}

#[test]
fn identical_inputs_produce_identical_checks() {
    let input = priced(
        with_symptoms(with_history("Transmission Flush", 90_000, 50_000), &["fluid looks dark"]),
        320.0,
    );
    let scorer = scorer();
    assert_eq!(scorer.check(&input, today()), scorer.check(&input, today()));
}

#[test]
fn tiers_never_decrease_as_mileage_since_service_grows() {
    let scorer = scorer();
    let mut previous = None;
    for since in (500..=16_000).step_by(250) {
        let input = with_history("Oil Change", 60_000 + since, 60_000);
        let rank = scorer.check(&input, today()).tier.rank();
        if let Some(previous) = previous {
            assert!(rank >= previous, "rank dropped at {since} miles");
        }
        previous = Some(rank);
    }
    assert_eq!(previous, Some(UrgencyTier::SafetyCritical.rank()));
}

#[test]
fn band_edges_fall_into_the_higher_tier() {
    let scorer = scorer();
    let tier_at = |since: u32| {
        scorer
            .check(&with_history("Cabin Air Filter", 50_000 + since, 50_000), today())
            .tier
    };

    assert_eq!(tier_at(9_999), UrgencyTier::Scam);
    assert_eq!(tier_at(10_000), UrgencyTier::Unnecessary);
    assert_eq!(tier_at(15_000), UrgencyTier::CanWait);
    assert_eq!(tier_at(18_000), UrgencyTier::Soon);
    assert_eq!(tier_at(22_000), UrgencyTier::Overdue);
    assert_eq!(tier_at(26_000), UrgencyTier::SafetyCritical);
}

#[test]
fn unnecessary_band_floors_scam_likelihood() {
    let check = scorer().check(&with_history("Oil Change", 44_500, 40_000), today());
    assert_eq!(check.tier, UrgencyTier::Unnecessary);
    assert_eq!(check.scam_likelihood, 70);
    assert_eq!(check.confidence, 85);
}

#[test]
fn overpricing_adds_exactly_twenty() {
    let scorer = scorer();
    let cases = [
        ("Tire Rotation", 48_000, 40_000, 80.0),
        ("Engine Flush", 118_000, 60_000, 300.0),
        ("Coolant Flush", 61_000, 60_000, 400.0),
    ];

    for (service, current, last, price) in cases {
        let base = with_history(service, current, last);
        let unpriced = scorer.check(&base, today());
        let overpriced = scorer.check(&priced(base, price), today());

        let expected = (unpriced.scam_likelihood + 20).min(100);
        assert_eq!(overpriced.scam_likelihood, expected, "{service}");
        assert_eq!(overpriced.tier, unpriced.tier, "{service}");
        assert_eq!(overpriced.red_flags.len(), unpriced.red_flags.len() + 1);
    }
}

#[test]
fn mild_overpricing_only_flags() {
    let base = with_history("Oil Change", 48_000, 40_000);
    let check = scorer().check(&priced(base, 130.0), today());
    assert_eq!(check.scam_likelihood, 0);
    assert!(check
        .red_flags
        .iter()
        .any(|flag| flag.contains("above the typical range")));
}

#[test]
fn zero_price_never_triggers_the_price_check() {
    let base = with_history("Oil Change", 48_000, 40_000);
    let check = scorer().check(&priced(base, 0.0), today());
    assert!(check.red_flags.is_empty());
    assert_eq!(check.scam_likelihood, 0);
}

#[test]
fn severe_driving_shortens_intervals() {
    let normal = with_history("Oil Change", 44_000, 40_000);
    let severe = CheckServiceInput {
        driving_conditions: DrivingConditions::Severe,
        ..normal.clone()
    };

    assert_eq!(scorer().check(&normal, today()).tier, UrgencyTier::Unnecessary);
    assert_eq!(scorer().check(&severe, today()).tier, UrgencyTier::Soon);

    let battery = CheckServiceInput {
        driving_conditions: DrivingConditions::Severe,
        ..with_history("Battery Replacement", 50_000, 45_000)
    };
    let normal_battery = CheckServiceInput {
        driving_conditions: DrivingConditions::Normal,
        ..battery.clone()
    };
    assert_eq!(
        scorer().check(&battery, today()).tier,
        scorer().check(&normal_battery, today()).tier
    );
}

#[test]
fn elapsed_months_can_dominate_mileage() {
    let mut input = with_history("Oil Change", 42_000, 40_000);
    input.last_service_date = NaiveDate::from_ymd_opt(2024, 11, 1);
    let check = scorer().check(&input, today());
    assert_eq!(check.tier, UrgencyTier::Overdue);
}

#[test]
fn date_only_history_uses_month_ratio() {
    let mut input = CheckServiceInput::new("Oil Change", 42_000);
    input.last_service_date = NaiveDate::from_ymd_opt(2025, 4, 1);
    let check = scorer().check(&input, today());
    assert_eq!(check.tier, UrgencyTier::Scam);
    assert!(check.reason.contains("months"));
}

#[test]
fn no_history_falls_back_to_odometer() {
    let scorer = scorer();

    let check = scorer.check(&CheckServiceInput::new("Oil Change", 10_000), today());
    assert_eq!((check.tier, check.confidence), (UrgencyTier::Overdue, 80));

    let check = scorer.check(&CheckServiceInput::new("Oil Change", 7_000), today());
    assert_eq!((check.tier, check.confidence), (UrgencyTier::Soon, 75));

    let check = scorer.check(&CheckServiceInput::new("Oil Change", 5_500), today());
    assert_eq!((check.tier, check.confidence), (UrgencyTier::CanWait, 70));
    assert!(!check.legitimate);

    let check = scorer.check(&CheckServiceInput::new("Oil Change", 3_000), today());
    assert_eq!(check.tier, UrgencyTier::Unnecessary);
    assert_eq!(check.scam_likelihood, 80);
    assert!(check
        .red_flags
        .contains(&"Recommended before minimum interval".to_string()));
}

#[test]
fn services_without_a_minimum_skip_the_early_branch() {
    let scorer = scorer();
    let early_flag = "Recommended before minimum interval".to_string();

    let thermostat = scorer.check(
        &CheckServiceInput::new("Thermostat Replacement", 1_000),
        today(),
    );
    assert_eq!(thermostat.service_key.as_deref(), Some("thermostat"));
    assert_eq!(thermostat.tier, UrgencyTier::CanWait);
    assert_eq!(thermostat.scam_likelihood, 0);
    assert!(!thermostat.red_flags.contains(&early_flag));

    let pads = scorer.check(&CheckServiceInput::new("Front Brake Pads", 1_000), today());
    assert_eq!(pads.tier, UrgencyTier::Unnecessary);
    assert!(pads.red_flags.contains(&early_flag));
}

#[test]
fn vehicle_age_counts_without_history() {
    let mut input = CheckServiceInput::new("Oil Change", 1_000);
    input.vehicle_age_months = Some(8);
    assert_eq!(scorer().check(&input, today()).tier, UrgencyTier::Overdue);
}

#[test]
fn projection_reports_remaining_miles() {
    let check = scorer().check(&with_history("Oil Change", 45_000, 43_000), today());
    assert_eq!(check.miles_until_due, Some(5_500));
    assert_eq!(check.next_due_mileage, Some(50_500));

    let overdue = scorer().check(&with_history("Oil Change", 60_000, 50_000), today());
    assert_eq!(overdue.miles_until_due, Some(-2_500));
    assert_eq!(overdue.next_due_mileage, None);
}

#[test]
fn projection_uses_last_service_date() {
    let mut input = with_history("Oil Change", 42_000, 40_000);
    input.last_service_date = NaiveDate::from_ymd_opt(2025, 3, 15);
    let check = scorer().check(&input, today());
    assert_eq!(check.next_due_date, NaiveDate::from_ymd_opt(2025, 9, 15));
}

#[test]
fn resolver_matches_loose_labels() {
    let scorer = scorer();
    let resolver = scorer.resolver();
    let key = |label: &str| resolver.resolve(label).map(|resolution| resolution.key);

    assert_eq!(key("oil_change"), Some("oil_change"));
    assert_eq!(key("  Synthetic Oil Change "), Some("oil_change"));
    assert_eq!(key("brake pads"), Some("front_brake_pads"));
    assert_eq!(key("Flux Capacitor Realignment"), None);
    assert_eq!(key(""), None);
}
