use super::super::domain::{CheckServiceInput, ServiceInterval, UrgencyTier};
use super::config::ScoringConfig;
use super::rules::{format_miles, SymptomSignals, UsageSignals};

/// Tier decision plus the evidence trail that produced it.
pub(crate) struct Classification {
    pub tier: UrgencyTier,
    pub legitimate: bool,
    pub confidence: u8,
    pub scam_likelihood: u8,
    pub reason: String,
    pub talking_points: Vec<String>,
    pub red_flags: Vec<String>,
}

pub(crate) fn classify(
    entry: &ServiceInterval,
    input: &CheckServiceInput,
    usage: &UsageSignals,
    symptoms: &SymptomSignals,
    config: &ScoringConfig,
) -> Classification {
    let baseline = if entry.often_scam {
        config.often_scam_baseline
    } else {
        0
    };

    let mut red_flags = Vec::new();
    if entry.often_scam {
        red_flags.push(format!(
            "{} is one of the most commonly oversold services",
            entry.name
        ));
    }
    for phrase in &symptoms.scam_matches {
        red_flags.push(format!(
            "\"{phrase}\" is a common justification for unnecessary work"
        ));
    }

    let mut classification = if symptoms.justified() {
        symptom_justified(entry, symptoms)
    } else if usage.has_history() {
        by_history_ratio(entry, usage, baseline, config)
    } else {
        by_odometer(entry, input, usage, baseline, config)
    };

    red_flags.append(&mut classification.red_flags);
    classification.red_flags = red_flags;
    classification
}

fn symptom_justified(entry: &ServiceInterval, symptoms: &SymptomSignals) -> Classification {
    let matched = symptoms.urgency_matches.join(", ");
    Classification {
        tier: UrgencyTier::Urgent,
        legitimate: true,
        confidence: 90,
        scam_likelihood: 0,
        reason: format!(
            "Reported symptoms ({matched}) are classic signs that the {} is needed now, regardless of mileage.",
            entry.name.to_lowercase()
        ),
        talking_points: vec![
            format!("I've noticed {matched}, so I want this fixed today."),
            "Can you confirm the diagnosis and show me the worn part?".to_string(),
            "Please give me an itemized quote for parts and labor.".to_string(),
        ],
        red_flags: Vec::new(),
    }
}

fn by_history_ratio(
    entry: &ServiceInterval,
    usage: &UsageSignals,
    baseline: u8,
    config: &ScoringConfig,
) -> Classification {
    let ratio = usage.history_ratio(entry).unwrap_or(0.0);
    let pct = (ratio * 100.0).round() as u32;
    let elapsed = elapsed_phrase(entry, usage);
    let interval = interval_phrase(entry, usage);
    let name = entry.name.to_lowercase();
    let bands = &config.bands;

    if ratio < bands.scam {
        Classification {
            tier: UrgencyTier::Scam,
            legitimate: false,
            confidence: 95,
            scam_likelihood: baseline.max(95),
            reason: format!(
                "Only {elapsed} since the last {name}, against a {interval} interval ({pct}% of schedule). This recommendation is far too early."
            ),
            talking_points: declining_points(entry, &elapsed, &interval),
            red_flags: vec![format!(
                "Recommended at {pct}% of the manufacturer interval"
            )],
        }
    } else if ratio < bands.unnecessary {
        Classification {
            tier: UrgencyTier::Unnecessary,
            legitimate: false,
            confidence: 85,
            scam_likelihood: baseline.max(70),
            reason: format!(
                "{elapsed} since the last {name} is {pct}% of the {interval} interval. It is not due yet."
            ),
            talking_points: declining_points(entry, &elapsed, &interval),
            red_flags: vec![format!(
                "Recommended well before the interval ({pct}% of schedule)"
            )],
        }
    } else if ratio < bands.can_wait {
        Classification {
            tier: UrgencyTier::CanWait,
            legitimate: true,
            confidence: 75,
            scam_likelihood: baseline,
            reason: format!(
                "{elapsed} since the last {name} ({pct}% of the {interval} interval). Legitimate, but it can wait until your next visit."
            ),
            talking_points: clarifying_points(entry, &elapsed, &interval),
            red_flags: Vec::new(),
        }
    } else if ratio < bands.soon {
        Classification {
            tier: UrgencyTier::Soon,
            legitimate: true,
            confidence: 90,
            scam_likelihood: baseline,
            reason: format!(
                "{elapsed} since the last {name} puts it at {pct}% of the {interval} interval. It is due now or very soon."
            ),
            talking_points: accepting_points(entry),
            red_flags: Vec::new(),
        }
    } else if ratio < bands.overdue {
        Classification {
            tier: UrgencyTier::Overdue,
            legitimate: true,
            confidence: 90,
            scam_likelihood: baseline,
            reason: format!(
                "{elapsed} since the last {name} is past the {interval} interval ({pct}% of schedule)."
            ),
            talking_points: accepting_points(entry),
            red_flags: Vec::new(),
        }
    } else {
        Classification {
            tier: UrgencyTier::SafetyCritical,
            legitimate: true,
            confidence: 95,
            scam_likelihood: baseline,
            reason: format!(
                "{elapsed} since the last {name} is {pct}% of the {interval} interval. Continuing to delay risks damage or unsafe operation."
            ),
            talking_points: accepting_points(entry),
            red_flags: Vec::new(),
        }
    }
}

fn by_odometer(
    entry: &ServiceInterval,
    input: &CheckServiceInput,
    usage: &UsageSignals,
    baseline: u8,
    config: &ScoringConfig,
) -> Classification {
    let by_miles = input.current_mileage as f64 / usage.effective_interval_miles;
    let by_age = input
        .vehicle_age_months
        .map(|months| months as f64 / entry.interval_months as f64)
        .unwrap_or(0.0);
    let ratio = by_miles.max(by_age);

    let odometer = format_miles(input.current_mileage as u64);
    let interval = format!(
        "{} mile",
        format_miles(usage.effective_interval_miles.round() as u64)
    );
    let name = entry.name.to_lowercase();

    if ratio >= config.no_history_overdue_ratio {
        return Classification {
            tier: UrgencyTier::Overdue,
            legitimate: true,
            confidence: 80,
            scam_likelihood: baseline,
            reason: format!(
                "No service history on file and the vehicle is at {odometer} miles, well past the {interval} interval for the {name}."
            ),
            talking_points: accepting_points(entry),
            red_flags: Vec::new(),
        };
    }

    if ratio >= config.no_history_soon_ratio {
        return Classification {
            tier: UrgencyTier::Soon,
            legitimate: true,
            confidence: 75,
            scam_likelihood: baseline,
            reason: format!(
                "No service history on file; at {odometer} miles the vehicle is approaching the {interval} interval for the {name}."
            ),
            talking_points: accepting_points(entry),
            red_flags: Vec::new(),
        };
    }

    if let Some(minimum) = entry.min_interval_miles {
        if input.current_mileage < minimum {
            return Classification {
                tier: UrgencyTier::Unnecessary,
                legitimate: false,
                confidence: 90,
                scam_likelihood: baseline.max(80),
                reason: format!(
                    "The vehicle has only {odometer} miles, below the {} mile minimum interval for the {name}.",
                    format_miles(minimum as u64)
                ),
                talking_points: vec![
                    format!(
                        "My car only has {odometer} miles; the {name} isn't recommended before {} miles.",
                        format_miles(minimum as u64)
                    ),
                    "Please note on the invoice that I declined this service.".to_string(),
                ],
                red_flags: vec!["Recommended before minimum interval".to_string()],
            };
        }
    }

    Classification {
        tier: UrgencyTier::CanWait,
        legitimate: false,
        confidence: 70,
        scam_likelihood: baseline,
        reason: format!(
            "No service history on file; at {odometer} miles the vehicle has not reached the {interval} interval for the {name}."
        ),
        talking_points: vec![
            format!("Which part of the maintenance schedule calls for the {name} at {odometer} miles?"),
            "Can this wait until my next scheduled service?".to_string(),
        ],
        red_flags: Vec::new(),
    }
}

fn elapsed_phrase(entry: &ServiceInterval, usage: &UsageSignals) -> String {
    match (usage.miles_since_last, usage.months_since_last) {
        (Some(miles), _) => format!("{} miles", format_miles(miles as u64)),
        (None, Some(months)) => format!("{:.0} months", months.floor()),
        (None, None) => format!("an unknown distance since the {}", entry.name),
    }
}

fn interval_phrase(entry: &ServiceInterval, usage: &UsageSignals) -> String {
    if usage.miles_since_last.is_some() {
        format!(
            "{} mile",
            format_miles(usage.effective_interval_miles.round() as u64)
        )
    } else {
        format!("{} month", entry.interval_months)
    }
}

fn accepting_points(entry: &ServiceInterval) -> Vec<String> {
    vec![
        format!(
            "The {} is due on my schedule; please send an itemized quote.",
            entry.name.to_lowercase()
        ),
        "Are you using parts that meet the manufacturer's specification?".to_string(),
    ]
}

fn clarifying_points(entry: &ServiceInterval, elapsed: &str, interval: &str) -> Vec<String> {
    vec![
        format!(
            "My records show {elapsed} since the last {}; the interval is {interval}s. Why recommend it now?",
            entry.name.to_lowercase()
        ),
        "Can this wait until my next scheduled service?".to_string(),
    ]
}

fn declining_points(entry: &ServiceInterval, elapsed: &str, interval: &str) -> Vec<String> {
    vec![
        format!(
            "I had the {} done only {elapsed} ago, and the interval is {interval}s.",
            entry.name.to_lowercase()
        ),
        "Where in my owner's manual is this recommended at this point?".to_string(),
        "Please note on the invoice that I declined this service.".to_string(),
    ]
}
