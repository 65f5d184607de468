use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ReminderError {
    #[error("The client has no valid phone number [client: {0}]")]
    InvalidPhone(u64),
    #[error("The reminder link can't be built.")]
    CantBuildLink,
}
