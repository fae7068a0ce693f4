use thiserror::Error;
use uuid::Uuid;

/// Error type that captures engine contract violations and config I/O failures.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid installment plan on transaction {id}: {reason}")]
    InvalidInstallment { id: Uuid, reason: String },
    #[error("Invalid transaction {id}: {reason}")]
    InvalidTransaction { id: Uuid, reason: String },
    #[error("Invalid month {year}-{month}: months run from 1 to 12")]
    InvalidMonth { year: i32, month: u32 },
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn installment(id: Uuid, reason: impl Into<String>) -> Self {
        EngineError::InvalidInstallment {
            id,
            reason: reason.into(),
        }
    }

    pub(crate) fn transaction(id: Uuid, reason: impl Into<String>) -> Self {
        EngineError::InvalidTransaction {
            id,
            reason: reason.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
