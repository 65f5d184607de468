use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    #[error("Unknown status filter [{0}], expected one of: all, active, expired, expiring")]
    UnknownFilter(String),
}
