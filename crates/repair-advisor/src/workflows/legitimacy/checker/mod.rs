mod repository;
pub(crate) mod router;
mod service;

pub use repository::{
    MaintenanceRecord, RepositoryError, VehicleId, VehicleRecord, VehicleRepository,
};
pub use router::service_check_router;
pub use service::{
    flatten_talking_points, CheckServiceError, QuoteCheckRequest, QuoteLineRequest, ScriptLine,
    ServiceCheckReport, ServiceCheckRequest, VehicleServiceChecker,
};
