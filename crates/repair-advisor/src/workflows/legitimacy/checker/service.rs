use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::super::batch::{BatchReport, QuoteAggregator};
use super::super::domain::{CheckServiceInput, DrivingConditions, InputError, ServiceCheck};
use super::super::knowledge::ServiceCatalog;
use super::super::scoring::LegitimacyScorer;
use super::super::talking_points::{
    synthesize, ConversationStage, Priority, TalkingPointKind, TalkingPointsSet, Tone,
};
use super::repository::{
    MaintenanceRecord, RepositoryError, VehicleId, VehicleRecord, VehicleRepository,
};

/// Single recommendation submitted against a stored vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCheckRequest {
    #[serde(alias = "vehicleId")]
    pub vehicle_id: String,
    #[serde(alias = "serviceDescription", alias = "description")]
    pub service_description: String,
    #[serde(default, alias = "quotedPrice")]
    pub quoted_price: Option<f64>,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLineRequest {
    #[serde(alias = "serviceDescription", alias = "description")]
    pub service_description: String,
    #[serde(default, alias = "quotedPrice")]
    pub quoted_price: Option<f64>,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Whole shop quote submitted against a stored vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteCheckRequest {
    #[serde(alias = "vehicleId")]
    pub vehicle_id: String,
    pub items: Vec<QuoteLineRequest>,
}

/// Flattened talking point for clients that do not render stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptLine {
    pub stage: ConversationStage,
    pub kind: TalkingPointKind,
    pub tone: Tone,
    pub priority: Priority,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCheckReport {
    pub vehicle_id: VehicleId,
    pub service_description: String,
    pub check: ServiceCheck,
    pub talking_points: Vec<ScriptLine>,
    pub recommendations: Vec<&'static str>,
    #[serde(skip)]
    pub script: TalkingPointsSet,
}

/// Primary and secondary points of every stage, in conversation order.
pub fn flatten_talking_points(set: &TalkingPointsSet) -> Vec<ScriptLine> {
    set.stages()
        .into_iter()
        .flat_map(|(stage, points)| {
            points
                .iter()
                .filter(|point| point.priority != Priority::Backup)
                .map(move |point| ScriptLine {
                    stage,
                    kind: point.kind,
                    tone: point.tone,
                    priority: point.priority,
                    text: point.text.clone(),
                })
        })
        .collect()
}

/// Service composing vehicle storage with the legitimacy engine.
pub struct VehicleServiceChecker<R> {
    repository: Arc<R>,
    scorer: Arc<LegitimacyScorer>,
    aggregator: Arc<QuoteAggregator>,
    default_driving: DrivingConditions,
}

impl<R> VehicleServiceChecker<R>
where
    R: VehicleRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        scorer: Arc<LegitimacyScorer>,
        default_driving: DrivingConditions,
    ) -> Self {
        Self {
            repository,
            scorer,
            aggregator: Arc::new(QuoteAggregator::standard()),
            default_driving,
        }
    }

    pub fn scorer(&self) -> &LegitimacyScorer {
        &self.scorer
    }

    pub fn catalog(&self) -> ServiceCatalog {
        self.scorer.knowledge_base().catalog()
    }

    /// Classify one recommendation and draft the negotiation script for it.
    pub fn check(
        &self,
        request: ServiceCheckRequest,
        today: NaiveDate,
    ) -> Result<ServiceCheckReport, CheckServiceError> {
        let vehicle = self.vehicle(&request.vehicle_id)?;
        let input = self.build_input(
            &vehicle,
            &request.service_description,
            request.quoted_price,
            request.symptoms,
            today,
        );
        input.validate(today)?;

        let check = self.scorer.check(&input, today);
        let script = synthesize(
            &check,
            &request.service_description,
            request.quoted_price,
            Some(&vehicle.info()),
        );

        info!(
            vehicle = %vehicle.id.0,
            service = %request.service_description,
            tier = ?check.tier,
            scam_likelihood = check.scam_likelihood,
            "service recommendation checked"
        );

        Ok(ServiceCheckReport {
            vehicle_id: vehicle.id,
            service_description: request.service_description,
            recommendations: check.tier.recommendations().to_vec(),
            talking_points: flatten_talking_points(&script),
            check,
            script,
        })
    }

    /// Score every line of a shop quote for one vehicle.
    pub fn check_quote(
        &self,
        request: QuoteCheckRequest,
        today: NaiveDate,
    ) -> Result<BatchReport, CheckServiceError> {
        let vehicle = self.vehicle(&request.vehicle_id)?;
        let mut inputs = Vec::with_capacity(request.items.len());
        for line in request.items {
            let input = self.build_input(
                &vehicle,
                &line.service_description,
                line.quoted_price,
                line.symptoms,
                today,
            );
            input.validate(today)?;
            inputs.push(input);
        }

        let report = self.aggregator.aggregate(&self.scorer, &inputs, today);
        info!(
            vehicle = %vehicle.id.0,
            items = report.items.len(),
            overall_scam_score = report.overall_scam_score,
            "shop quote checked"
        );
        Ok(report)
    }

    /// Builds scoring input from the stored vehicle and its latest matching
    /// maintenance record. Records logged past the odometer or after `today`
    /// are ignored.
    pub fn build_input(
        &self,
        vehicle: &VehicleRecord,
        description: &str,
        quoted_price: Option<f64>,
        symptoms: Vec<String>,
        today: NaiveDate,
    ) -> CheckServiceInput {
        let last = self.last_matching_service(vehicle, description, today);

        CheckServiceInput {
            service: description.to_string(),
            current_mileage: vehicle.current_mileage,
            last_service_mileage: last.and_then(|record| record.mileage),
            last_service_date: last.and_then(|record| record.performed_on),
            symptoms,
            quoted_price,
            vehicle_age_months: vehicle.age_months(today),
            driving_conditions: vehicle.driving_conditions.unwrap_or(self.default_driving),
        }
    }

    fn last_matching_service<'v>(
        &self,
        vehicle: &'v VehicleRecord,
        description: &str,
        today: NaiveDate,
    ) -> Option<&'v MaintenanceRecord> {
        let resolver = self.scorer.resolver();
        let key = resolver.resolve(description)?.key;

        vehicle
            .maintenance
            .iter()
            .filter(|record| {
                record
                    .mileage
                    .map_or(true, |mileage| mileage <= vehicle.current_mileage)
                    && record.performed_on.map_or(true, |date| date <= today)
            })
            .filter(|record| {
                resolver
                    .resolve(&record.description)
                    .is_some_and(|resolution| resolution.key == key)
            })
            .max_by_key(|record| (record.mileage, record.performed_on))
    }

    fn vehicle(&self, vehicle_id: &str) -> Result<VehicleRecord, CheckServiceError> {
        let id = VehicleId(vehicle_id.to_string());
        match self.repository.fetch(&id)? {
            Some(record) => Ok(record),
            None => {
                warn!(vehicle = %vehicle_id, "vehicle not found");
                Err(RepositoryError::NotFound.into())
            }
        }
    }
}

/// Error raised by the vehicle service checker.
#[derive(Debug, thiserror::Error)]
pub enum CheckServiceError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
