pub mod clock;
pub mod installment_service;
pub mod summary_service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use installment_service::InstallmentService;
pub use summary_service::SummaryService;

use crate::errors::EngineError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("{0}")]
    Invalid(String),
}
