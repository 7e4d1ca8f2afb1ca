//! Service legitimacy engine: interval knowledge base, label resolution,
//! tier scoring, negotiation scripts, and whole-quote aggregation.

pub mod batch;
pub mod checker;
pub mod domain;
pub mod knowledge;
pub mod patterns;
pub mod resolver;
pub mod scoring;
pub mod talking_points;

#[cfg(test)]
mod tests;

pub use batch::{BatchItem, BatchReport, QuoteAggregator};
pub use checker::{
    service_check_router, CheckServiceError, MaintenanceRecord, QuoteCheckRequest,
    QuoteLineRequest, RepositoryError, ServiceCheckReport, ServiceCheckRequest, VehicleId,
    VehicleRecord, VehicleRepository, VehicleServiceChecker,
};
pub use domain::{
    CheckServiceInput, CostRange, DrivingConditions, InputError, ServiceCategory, ServiceCheck,
    ServiceInterval, UrgencyTier,
};
pub use knowledge::{CatalogEntry, IntervalKnowledgeBase, KnowledgeBaseError, ServiceCatalog};
pub use patterns::{QuotePattern, QuotePatternDetector};
pub use resolver::{MatchStage, Resolution, ServiceResolver};
pub use scoring::{LegitimacyScorer, ScoringConfig};
pub use talking_points::{render_script, synthesize, TalkingPointsSet, VehicleInfo};
