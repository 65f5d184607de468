use thiserror::Error;

pub type Result<T, E = DtoError> = std::result::Result<T, E>;

#[derive(Debug, Error, PartialEq)]
pub enum DtoError {
    #[error("The date is malformed, expected YYYY-MM-DD [value: {0}]")]
    InvalidDate(String),
    #[error("The computed date falls outside the supported calendar.")]
    DateOutOfRange,
    #[error("Unknown membership term [value: {0}]")]
    UnknownTerm(String),
    #[error("Unknown payment method [value: {0}]")]
    UnknownPaymentMethod(String),
}
