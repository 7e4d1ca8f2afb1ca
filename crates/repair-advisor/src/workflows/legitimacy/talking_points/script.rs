use std::fmt;

use super::super::domain::ServiceCheck;
use super::TalkingPointsSet;

/// Printable negotiation script combining the assessment and every stage.
pub struct ScriptDocument<'a> {
    pub service_label: &'a str,
    pub check: &'a ServiceCheck,
    pub talking_points: &'a TalkingPointsSet,
}

pub fn render_script(
    talking_points: &TalkingPointsSet,
    check: &ServiceCheck,
    service_label: &str,
) -> String {
    ScriptDocument {
        service_label,
        check,
        talking_points,
    }
    .to_string()
}

impl fmt::Display for ScriptDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = self.check;

        writeln!(f, "# Negotiation Script: {}", self.service_label.trim())?;
        writeln!(f)?;
        writeln!(
            f,
            "Assessment: {} (confidence {}%, scam likelihood {}%)",
            check.tier.label(),
            check.confidence,
            check.scam_likelihood
        )?;
        writeln!(
            f,
            "Legitimate: {}",
            if check.legitimate { "yes" } else { "no" }
        )?;
        writeln!(f, "Reason: {}", check.reason)?;
        if let Some(fair) = check.fair_price {
            writeln!(f, "Fair price: ${:.0}-${:.0}", fair.min, fair.max)?;
        }
        match (check.next_due_mileage, check.next_due_date) {
            (Some(mileage), Some(date)) => {
                writeln!(f, "Next due: around {mileage} miles or by {date}")?
            }
            (Some(mileage), None) => writeln!(f, "Next due: around {mileage} miles")?,
            (None, Some(date)) => writeln!(f, "Next due: by {date}")?,
            (None, None) => {}
        }

        if !check.red_flags.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Red Flags")?;
            for flag in &check.red_flags {
                writeln!(f, "- {flag}")?;
            }
        }

        if let Some(alternative) = &check.alternative_action {
            writeln!(f)?;
            writeln!(f, "## Alternative")?;
            writeln!(f, "{alternative}")?;
        }

        for (index, (stage, points)) in self.talking_points.stages().into_iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "## {}. {}", index + 1, stage.label())?;
            for point in points {
                write!(
                    f,
                    "- [{} | {}] {}",
                    point.priority.label(),
                    point.tone.label(),
                    point.text
                )?;
                if let Some(context) = &point.context {
                    write!(f, " ({context})")?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}
