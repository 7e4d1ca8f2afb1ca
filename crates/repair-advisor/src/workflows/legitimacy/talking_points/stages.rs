use super::{Priority, ScriptSignals, TalkingPoint, TalkingPointKind, Tone};

const MAX_FLAG_OBJECTIONS: usize = 2;

pub(crate) fn opening(signals: &ScriptSignals<'_>) -> Vec<TalkingPoint> {
    let label = signals.label;
    let mut points = Vec::new();

    let lead = if signals.is_scammy {
        TalkingPoint::new(
            TalkingPointKind::Statement,
            Tone::Skeptical,
            Priority::Primary,
            format!(
                "Before we go further, I'd like to understand why the {label} is being recommended today."
            ),
        )
    } else if signals.is_legitimate {
        TalkingPoint::new(
            TalkingPointKind::Statement,
            Tone::Polite,
            Priority::Primary,
            format!("Thanks for catching this. I'd like to go over the {label} before I approve it."),
        )
    } else {
        TalkingPoint::new(
            TalkingPointKind::Question,
            Tone::Polite,
            Priority::Primary,
            format!("Can you walk me through why you're recommending the {label}?"),
        )
    };
    points.push(lead);

    if let Some(vehicle) = signals.vehicle {
        let description = vehicle.description();
        let text = match (description, vehicle.mileage) {
            (Some(description), Some(mileage)) => Some(format!(
                "For context, my {description} is at {mileage} miles and I follow the owner's manual schedule."
            )),
            (Some(description), None) => Some(format!(
                "For context, I follow the owner's manual schedule for my {description}."
            )),
            (None, Some(mileage)) => Some(format!(
                "For context, the car is at {mileage} miles and I follow the owner's manual schedule."
            )),
            (None, None) => None,
        };
        if let Some(text) = text {
            points.push(TalkingPoint::new(
                TalkingPointKind::Education,
                Tone::Educational,
                Priority::Secondary,
                text,
            ));
        }
    }

    points.push(TalkingPoint::new(
        TalkingPointKind::Statement,
        Tone::Polite,
        Priority::Backup,
        "I keep detailed maintenance records for this vehicle.".to_string(),
    ));

    points
}

pub(crate) fn clarifying(signals: &ScriptSignals<'_>) -> Vec<TalkingPoint> {
    let mut points = vec![TalkingPoint::new(
        TalkingPointKind::Question,
        Tone::Polite,
        Priority::Primary,
        "What specific symptoms or measurements led to this recommendation?".to_string(),
    )];

    if signals.label_mentions("flush") {
        points.push(TalkingPoint::new(
            TalkingPointKind::Question,
            Tone::Skeptical,
            Priority::Primary,
            "Is this a pressurized flush or a drain-and-fill, and which one does my manufacturer specify?"
                .to_string(),
        ));
        points.push(
            TalkingPoint::new(
                TalkingPointKind::Question,
                Tone::Skeptical,
                Priority::Secondary,
                "Can you show me a fluid test result rather than the color of the fluid?".to_string(),
            )
            .with_context("Fluid color alone does not indicate condition"),
        );
    }

    if signals.label_mentions("brake") {
        points.push(TalkingPoint::new(
            TalkingPointKind::Question,
            Tone::Polite,
            Priority::Primary,
            "What is the measured pad thickness in millimeters on each axle?".to_string(),
        ));
        points.push(
            TalkingPoint::new(
                TalkingPointKind::Question,
                Tone::Polite,
                Priority::Secondary,
                "Are the rotors still above the minimum thickness stamped on them?".to_string(),
            )
            .with_context("Pads under 3 mm need replacement; rotors can often be reused"),
        );
    }

    if signals.label_mentions("filter") {
        points.push(TalkingPoint::new(
            TalkingPointKind::Question,
            Tone::Polite,
            Priority::Secondary,
            "Can I see the old filter next to a new one?".to_string(),
        ));
    }

    if signals.label_mentions("tire") {
        points.push(TalkingPoint::new(
            TalkingPointKind::Question,
            Tone::Polite,
            Priority::Secondary,
            "What tread depth did you measure on each tire?".to_string(),
        ));
    }

    if signals.label_mentions("belt") {
        points.push(TalkingPoint::new(
            TalkingPointKind::Question,
            Tone::Polite,
            Priority::Secondary,
            "Can you show me the cracks or wear on the belt?".to_string(),
        ));
    }

    if !signals.is_legitimate {
        points.push(TalkingPoint::new(
            TalkingPointKind::Question,
            Tone::Polite,
            Priority::Secondary,
            "What happens if I wait until my next scheduled service?".to_string(),
        ));
    }

    if let Some(next_due) = signals.check.next_due_mileage {
        points.push(TalkingPoint::new(
            TalkingPointKind::Education,
            Tone::Educational,
            Priority::Backup,
            format!("My maintenance schedule shows this next due around {next_due} miles."),
        ));
    }

    points
}

pub(crate) fn objecting(signals: &ScriptSignals<'_>) -> Vec<TalkingPoint> {
    let mut points = Vec::new();

    if signals.is_scammy {
        points.push(TalkingPoint::new(
            TalkingPointKind::Objection,
            Tone::Firm,
            Priority::Primary,
            format!(
                "Based on my records the {} isn't needed yet, so I'm not comfortable paying for it.",
                signals.label
            ),
        ));
        for flag in signals.check.red_flags.iter().take(MAX_FLAG_OBJECTIONS) {
            points.push(
                TalkingPoint::new(
                    TalkingPointKind::Objection,
                    Tone::Skeptical,
                    Priority::Secondary,
                    "That doesn't match what I've read about this service.".to_string(),
                )
                .with_context(flag.clone()),
            );
        }
    } else if signals.is_legitimate {
        points.push(TalkingPoint::new(
            TalkingPointKind::Statement,
            Tone::Polite,
            Priority::Primary,
            "I understand this is due, so let's focus on the scope and the price.".to_string(),
        ));
    } else {
        points.push(TalkingPoint::new(
            TalkingPointKind::Objection,
            Tone::Polite,
            Priority::Primary,
            "I'd prefer to wait until it's due according to the owner's manual.".to_string(),
        ));
    }

    for seed in &signals.check.talking_points {
        points.push(
            TalkingPoint::new(
                TalkingPointKind::Statement,
                Tone::Firm,
                Priority::Backup,
                seed.clone(),
            )
            .with_context("From the service check"),
        );
    }

    points
}

pub(crate) fn negotiating(signals: &ScriptSignals<'_>) -> Vec<TalkingPoint> {
    let label = signals.label;
    let mut points = Vec::new();

    if signals.is_price_high {
        if let Some(fair) = signals.check.fair_price {
            points.push(TalkingPoint::new(
                TalkingPointKind::Negotiation,
                Tone::Firm,
                Priority::Primary,
                format!(
                    "The typical price for this is ${:.0}-${:.0}. Can you bring it down to ${:.0}?",
                    fair.min, fair.max, fair.max
                ),
            ));
            points.push(TalkingPoint::new(
                TalkingPointKind::Negotiation,
                Tone::Assertive,
                Priority::Secondary,
                format!(
                    "Other shops quote around ${:.0} for this, and I'd rather not pay a premium.",
                    (fair.min + fair.max) / 2.0
                ),
            ));
        }
    }

    if signals.is_scammy {
        points.push(TalkingPoint::new(
            TalkingPointKind::Negotiation,
            Tone::Firm,
            Priority::Primary,
            format!("I'll decline the {label} today and keep the rest of the visit as planned."),
        ));
    }

    if signals.is_legitimate {
        points.push(TalkingPoint::new(
            TalkingPointKind::Negotiation,
            Tone::Polite,
            Priority::Secondary,
            "Is there a current coupon or discount for this service?".to_string(),
        ));
        points.push(TalkingPoint::new(
            TalkingPointKind::Negotiation,
            Tone::Polite,
            Priority::Backup,
            "If I approve this today, can you waive the shop supplies fee?".to_string(),
        ));
    }

    if signals.quoted_price.is_some() && !signals.is_price_high {
        points.push(TalkingPoint::new(
            TalkingPointKind::Question,
            Tone::Polite,
            Priority::Backup,
            "Does that price include parts, labor, shop fees, and tax?".to_string(),
        ));
    }

    if points.is_empty() {
        points.push(TalkingPoint::new(
            TalkingPointKind::Negotiation,
            Tone::Polite,
            Priority::Primary,
            "Can you give me an itemized written quote so I can plan for it?".to_string(),
        ));
    }

    points
}

pub(crate) fn closing(signals: &ScriptSignals<'_>) -> Vec<TalkingPoint> {
    let label = signals.label;
    let lead = if signals.is_legitimate {
        TalkingPoint::new(
            TalkingPointKind::Statement,
            Tone::Polite,
            Priority::Primary,
            format!("Please go ahead with the {label} at the agreed price, and keep the old parts for me."),
        )
    } else if signals.is_scammy {
        TalkingPoint::new(
            TalkingPointKind::Statement,
            Tone::Firm,
            Priority::Primary,
            format!("I'm declining the {label} today. Please note that on my paperwork."),
        )
    } else {
        TalkingPoint::new(
            TalkingPointKind::Statement,
            Tone::Polite,
            Priority::Primary,
            "I'll hold off for now and schedule it with my next regular service.".to_string(),
        )
    };

    let mut points = vec![lead];
    if let Some(alternative) = &signals.check.alternative_action {
        points.push(TalkingPoint::new(
            TalkingPointKind::Education,
            Tone::Educational,
            Priority::Secondary,
            alternative.clone(),
        ));
    }
    points
}

/// De-escalation lines that work for any service.
pub(crate) fn emergency_exit() -> Vec<TalkingPoint> {
    vec![
        TalkingPoint::new(
            TalkingPointKind::Statement,
            Tone::Polite,
            Priority::Primary,
            "I need some time to think about it. I'll call you once I've decided.".to_string(),
        ),
        TalkingPoint::new(
            TalkingPointKind::Statement,
            Tone::Firm,
            Priority::Secondary,
            "I'd like my keys back now, please. I'll pay only for the work I authorized.".to_string(),
        ),
        TalkingPoint::new(
            TalkingPointKind::Statement,
            Tone::Polite,
            Priority::Backup,
            "I'm going to get a second opinion before making any decisions.".to_string(),
        ),
    ]
}
