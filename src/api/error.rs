use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

pub const FUTURE_PAYMENT_DATE_MESSAGE: &str =
    "La fecha de pago no puede ser futura. Selecciona hoy o una fecha anterior.";
const PAYMENT_FALLBACK_MESSAGE: &str = "Error registrando pago";

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("The backend can't be reached [{method} {path}]")]
    ConnectionFailed { method: String, path: String },
    #[error("The backend refused the credentials [{method} {path}: {status}]")]
    Unauthorized {
        method: String,
        path: String,
        status: u16,
    },
    #[error("{method} {path} failed: {status} {body}")]
    RequestFailed {
        method: String,
        path: String,
        status: u16,
        body: String,
    },
    #[error("The backend response can't be read [{method} {path}]")]
    MalformedResponse { method: String, path: String },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Structured error body sent by the backend, if any.
    pub fn body(&self) -> Option<ApiErrorBody> {
        match self {
            ApiError::RequestFailed { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<ApiErrorDetails>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ApiErrorDetails {
    #[serde(rename = "fieldErrors", default)]
    field_errors: HashMap<String, String>,
}

/// Message shown to the front desk when a payment can't be registered.
pub fn friendly_payment_error(error: &ApiError) -> String {
    let message = match error.body() {
        Some(body) => body
            .details
            .and_then(|details| details.field_errors.get("paymentDate").cloned())
            .or(body.message)
            .unwrap_or_else(|| PAYMENT_FALLBACK_MESSAGE.to_owned()),
        None => error.to_string(),
    };

    let lowercase_message = message.to_lowercase();
    if lowercase_message.contains("paymentdate") || lowercase_message.contains("futura") {
        FUTURE_PAYMENT_DATE_MESSAGE.to_owned()
    } else {
        message
    }
}
