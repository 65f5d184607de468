use serde::{Deserialize, Serialize};

/// Coarse lifecycle state owned by the backend.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ClientStatus {
    #[serde(rename = "ACTIVO")]
    Active,
    #[serde(rename = "INACTIVO")]
    Inactive,
    #[serde(rename = "MOROSO")]
    Delinquent,
}
