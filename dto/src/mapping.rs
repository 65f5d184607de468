//! Conversions between backend enum values and the values shown to gym staff.
//! Every function is total: each input has exactly one explicit arm.

use crate::error::DtoError;
use crate::error::DtoError::UnknownPaymentMethod;
use crate::membership_term::MembershipTerm;
use crate::payment::{PaymentMethod, PaymentType};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

static TERM_IN_NOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)tipoPago:\s*(diario|mensual|trimestral|semestral|anual)")
        .expect("Term regex should be valid")
});

/// Payment methods offered at the front desk.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum UiPaymentMethod {
    #[serde(rename = "efectivo")]
    Cash,
    #[serde(rename = "tarjeta")]
    Card,
    #[serde(rename = "sinpe")]
    Sinpe,
}

impl UiPaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            UiPaymentMethod::Cash => "efectivo",
            UiPaymentMethod::Card => "tarjeta",
            UiPaymentMethod::Sinpe => "sinpe",
        }
    }
}

impl Display for UiPaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for UiPaymentMethod {
    type Err = DtoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "efectivo" | "cash" => Ok(UiPaymentMethod::Cash),
            "tarjeta" | "card" => Ok(UiPaymentMethod::Card),
            "sinpe" => Ok(UiPaymentMethod::Sinpe),
            _ => Err(UnknownPaymentMethod(value.to_owned())),
        }
    }
}

pub fn payment_method_from_ui(method: UiPaymentMethod) -> PaymentMethod {
    match method {
        UiPaymentMethod::Cash => PaymentMethod::Cash,
        UiPaymentMethod::Card => PaymentMethod::Card,
        UiPaymentMethod::Sinpe => PaymentMethod::Sinpe,
    }
}

/// Methods the front desk does not offer are shown as cash.
pub fn ui_payment_method_from_backend(method: Option<PaymentMethod>) -> UiPaymentMethod {
    match method {
        Some(PaymentMethod::Card) => UiPaymentMethod::Card,
        Some(PaymentMethod::Sinpe) => UiPaymentMethod::Sinpe,
        Some(PaymentMethod::Cash) => UiPaymentMethod::Cash,
        Some(PaymentMethod::Transfer) => UiPaymentMethod::Cash,
        Some(PaymentMethod::Other) => UiPaymentMethod::Cash,
        None => UiPaymentMethod::Cash,
    }
}

pub fn payment_type_from_term(term: MembershipTerm) -> PaymentType {
    match term {
        MembershipTerm::Daily => PaymentType::DailyMembership,
        MembershipTerm::Monthly => PaymentType::MonthlyMembership,
        MembershipTerm::Quarterly => PaymentType::QuarterlyMembership,
        MembershipTerm::Semiannual => PaymentType::SemesterMembership,
        MembershipTerm::Annual => PaymentType::AnnualMembership,
    }
}

/// Term paid for by a payment.
/// Monthly and non-membership payments may carry the real term in their notes
/// (`tipoPago: trimestral`); monthly is the fallback.
pub fn term_from_payment(payment_type: Option<PaymentType>, notes: Option<&str>) -> MembershipTerm {
    match payment_type {
        Some(PaymentType::DailyMembership) => MembershipTerm::Daily,
        Some(PaymentType::QuarterlyMembership) => MembershipTerm::Quarterly,
        Some(PaymentType::SemesterMembership) => MembershipTerm::Semiannual,
        Some(PaymentType::AnnualMembership) => MembershipTerm::Annual,
        Some(PaymentType::MonthlyMembership) => term_from_notes(notes),
        Some(PaymentType::Registration) => term_from_notes(notes),
        Some(PaymentType::Penalty) => term_from_notes(notes),
        Some(PaymentType::Other) => term_from_notes(notes),
        None => term_from_notes(notes),
    }
}

fn term_from_notes(notes: Option<&str>) -> MembershipTerm {
    notes
        .and_then(|notes| TERM_IN_NOTES.captures(notes))
        .and_then(|captures| captures.get(1))
        .and_then(|term| term.as_str().parse().ok())
        .unwrap_or_default()
}

/// Notes attached to a payment so the term survives a monthly fallback on the backend.
pub fn notes_for_term(term: MembershipTerm) -> String {
    format!("tipoPago: {}", term.label())
}
