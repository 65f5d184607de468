use crate::api::error::ApiError;
use crate::dashboard::error::DashboardError;
use crate::reminder::error::ReminderError;
use crate::report::error::ReportError;
use crate::store::error::StoreError;
use crate::tools::error::ToolsError;
use dto::error::DtoError;
use thiserror::Error;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("An error has been encountered while talking to the backend.")]
    Api(#[from] ApiError),
    #[error("An error has occurred with the local store.")]
    Store(#[from] StoreError),
    #[error("The report can't be produced.")]
    Report(#[from] ReportError),
    #[error("The reminder can't be sent.")]
    Reminder(#[from] ReminderError),
    #[error("The client list can't be filtered.")]
    Dashboard(#[from] DashboardError),
    #[error("The command line is invalid.")]
    Tools(#[from] ToolsError),
    #[error("A value is invalid.")]
    Dto(#[from] DtoError),
    #[error("{0}")]
    PaymentRejected(String),
    #[error("No client with id {0}.")]
    UnknownClient(u64),
    #[error("Unknown command [{0}]")]
    UnknownCommand(String),
}
