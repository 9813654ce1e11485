pub mod purchase_service;
pub mod schedule_service;
pub mod summary_service;

pub use purchase_service::PurchaseService;
pub use schedule_service::{InstallmentEvent, ScheduleService};
pub use summary_service::{
    AggregateViews, CategoryBreakdown, CategoryShare, CategorySummary, MonthDetail, MonthEntry,
    MonthlyEvolution, MonthlyTotals, SummaryService,
};

use crate::errors::{TrackerError, ValidationError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
