//! Staged negotiation scripts derived from a [`ServiceCheck`].
//!
//! Generation is table driven: each conversation stage branches on three
//! derived signals (scammy, legitimate, overpriced) plus keyword checks on the
//! service label, so the same check always yields the same script.

mod script;
mod stages;

pub use script::{render_script, ScriptDocument};

use serde::{Deserialize, Serialize};

use super::domain::{ServiceCheck, UrgencyTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalkingPointKind {
    Question,
    Statement,
    Objection,
    Negotiation,
    Education,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Polite,
    Firm,
    Skeptical,
    Assertive,
    Educational,
}

impl Tone {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Polite => "Polite",
            Self::Firm => "Firm",
            Self::Skeptical => "Skeptical",
            Self::Assertive => "Assertive",
            Self::Educational => "Educational",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Primary,
    Secondary,
    Backup,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Backup => "Backup",
        }
    }
}

/// One scripted utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkingPoint {
    pub kind: TalkingPointKind,
    pub text: String,
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub priority: Priority,
}

impl TalkingPoint {
    pub(crate) fn new(kind: TalkingPointKind, tone: Tone, priority: Priority, text: String) -> Self {
        Self {
            kind,
            text,
            tone,
            context: None,
            priority,
        }
    }

    pub(crate) fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    Opening,
    Clarifying,
    Objecting,
    Negotiating,
    Closing,
    EmergencyExit,
}

impl ConversationStage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Opening => "Opening",
            Self::Clarifying => "Clarifying Questions",
            Self::Objecting => "Objections",
            Self::Negotiating => "Negotiation",
            Self::Closing => "Closing",
            Self::EmergencyExit => "If the Conversation Turns Pushy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkingPointsSet {
    pub opening: Vec<TalkingPoint>,
    pub clarifying: Vec<TalkingPoint>,
    pub objecting: Vec<TalkingPoint>,
    pub negotiating: Vec<TalkingPoint>,
    pub closing: Vec<TalkingPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_exit: Option<Vec<TalkingPoint>>,
}

impl TalkingPointsSet {
    /// Stages in conversation order, skipping the exit script when absent.
    pub fn stages(&self) -> Vec<(ConversationStage, &[TalkingPoint])> {
        let mut stages = vec![
            (ConversationStage::Opening, self.opening.as_slice()),
            (ConversationStage::Clarifying, self.clarifying.as_slice()),
            (ConversationStage::Objecting, self.objecting.as_slice()),
            (ConversationStage::Negotiating, self.negotiating.as_slice()),
            (ConversationStage::Closing, self.closing.as_slice()),
        ];
        if let Some(exit) = &self.emergency_exit {
            stages.push((ConversationStage::EmergencyExit, exit.as_slice()));
        }
        stages
    }
}

/// Optional vehicle details used to personalize the opening.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub year: Option<u16>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub mileage: Option<u32>,
}

impl VehicleInfo {
    pub fn description(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.year.map(|year| year.to_string()),
            self.make.clone(),
            self.model.clone(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

const SCAMMY_THRESHOLD: u8 = 60;
const EXIT_THRESHOLD: u8 = 70;
const HIGH_PRICE_RATIO: f64 = 1.3;

/// Derived switches shared by every stage generator.
pub(crate) struct ScriptSignals<'a> {
    pub check: &'a ServiceCheck,
    pub label: &'a str,
    pub label_lower: String,
    pub quoted_price: Option<f64>,
    pub vehicle: Option<&'a VehicleInfo>,
    pub is_scammy: bool,
    pub is_legitimate: bool,
    pub is_price_high: bool,
}

impl<'a> ScriptSignals<'a> {
    fn derive(
        check: &'a ServiceCheck,
        label: &'a str,
        quoted_price: Option<f64>,
        vehicle: Option<&'a VehicleInfo>,
    ) -> Self {
        let is_scammy = check.scam_likelihood > SCAMMY_THRESHOLD || check.tier == UrgencyTier::Scam;
        let is_legitimate = matches!(
            check.tier,
            UrgencyTier::Urgent | UrgencyTier::Overdue | UrgencyTier::SafetyCritical
        );
        let is_price_high = match (quoted_price, check.fair_price) {
            (Some(price), Some(fair)) => price > fair.max * HIGH_PRICE_RATIO,
            _ => false,
        };

        Self {
            check,
            label: label.trim(),
            label_lower: label.trim().to_lowercase(),
            quoted_price,
            vehicle,
            is_scammy,
            is_legitimate,
            is_price_high,
        }
    }

    pub fn label_mentions(&self, keyword: &str) -> bool {
        self.label_lower.contains(keyword)
    }
}

pub fn synthesize(
    check: &ServiceCheck,
    service_label: &str,
    quoted_price: Option<f64>,
    vehicle: Option<&VehicleInfo>,
) -> TalkingPointsSet {
    let signals = ScriptSignals::derive(check, service_label, quoted_price, vehicle);

    let emergency_exit = if signals.is_scammy || check.scam_likelihood > EXIT_THRESHOLD {
        Some(stages::emergency_exit())
    } else {
        None
    };

    TalkingPointsSet {
        opening: stages::opening(&signals),
        clarifying: stages::clarifying(&signals),
        objecting: stages::objecting(&signals),
        negotiating: stages::negotiating(&signals),
        closing: stages::closing(&signals),
        emergency_exit,
    }
}
