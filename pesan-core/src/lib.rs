pub mod payment;

pub use payment::{AccountLedger, PaymentAccount, PaymentError, PaymentService};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
