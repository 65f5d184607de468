use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentCurrency {
    #[default]
    Crc,
    Usd,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Cash,
    Sinpe,
    Card,
    Transfer,
    Other,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    DailyMembership,
    MonthlyMembership,
    QuarterlyMembership,
    SemesterMembership,
    AnnualMembership,
    Registration,
    Penalty,
    Other,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[default]
    Paid,
    Pending,
    Cancelled,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    id: u64,
    gym_id: u64,
    client_id: u64,
    amount: Decimal,
    currency: PaymentCurrency,
    payment_method: Option<PaymentMethod>,
    payment_type: Option<PaymentType>,
    status: PaymentStatus,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    payment_date: NaiveDate,
    #[serde(default)]
    created_at: Option<NaiveDateTime>,
    #[serde(default)]
    updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreateRequest {
    client_id: u64,
    amount: Decimal,
    currency: PaymentCurrency,
    payment_method: PaymentMethod,
    payment_type: PaymentType,
    status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    payment_date: NaiveDate,
}

impl PaymentCreateRequest {
    /// Amounts are always sent with two decimals, e.g. `15000.00`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        client_id: u64,
        amount: Decimal,
        currency: PaymentCurrency,
        payment_method: PaymentMethod,
        payment_type: PaymentType,
        status: PaymentStatus,
        reference: Option<String>,
        notes: Option<String>,
        payment_date: NaiveDate,
    ) -> Self {
        let mut amount = amount.round_dp(2);
        amount.rescale(2);
        Self {
            client_id,
            amount,
            currency,
            payment_method,
            payment_type,
            status,
            reference,
            notes,
            payment_date,
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    impl PaymentResponse {
        pub fn new_test(
            id: u64,
            client_id: u64,
            amount: Decimal,
            payment_type: Option<PaymentType>,
            payment_date: NaiveDate,
        ) -> Self {
            PaymentResponse {
                id,
                gym_id: 1,
                client_id,
                amount,
                currency: PaymentCurrency::Crc,
                payment_method: Some(PaymentMethod::Cash),
                payment_type,
                status: PaymentStatus::Paid,
                reference: None,
                notes: None,
                payment_date,
                created_at: None,
                updated_at: None,
            }
        }

        pub fn with_method(mut self, payment_method: Option<PaymentMethod>) -> Self {
            self.payment_method = payment_method;
            self
        }

        pub fn with_notes(mut self, notes: Option<&str>) -> Self {
            self.notes = notes.map(str::to_owned);
            self
        }

        pub fn with_reference(mut self, reference: Option<&str>) -> Self {
            self.reference = reference.map(str::to_owned);
            self
        }
    }

    pub const PAYMENT_AS_JSON: &str = r#"{"id":3,"gymId":1,"clientId":42,"amount":"15000.00","currency":"CRC","paymentMethod":"SINPE","paymentType":"QUARTERLY_MEMBERSHIP","status":"PAID","reference":"SP-001","notes":null,"paymentDate":"2024-03-01","createdAt":"2024-03-01T10:00:00","updatedAt":"2024-03-01T10:00:00"}"#;

    #[test]
    fn should_deserialize_payment() {
        let payment: PaymentResponse = serde_json::from_str(PAYMENT_AS_JSON).unwrap();
        assert_eq!(&Decimal::new(1_500_000, 2), payment.amount());
        assert_eq!(&Some(PaymentMethod::Sinpe), payment.payment_method());
        assert_eq!(&Some(PaymentType::QuarterlyMembership), payment.payment_type());
        assert_eq!(&Some("SP-001".to_owned()), payment.reference());
        assert_eq!(
            &NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            payment.payment_date()
        );
    }

    #[test]
    fn should_serialize_create_request_with_two_decimals() {
        let request = PaymentCreateRequest::new(
            42,
            Decimal::new(15000, 0),
            PaymentCurrency::Crc,
            PaymentMethod::Card,
            PaymentType::AnnualMembership,
            PaymentStatus::Paid,
            None,
            Some("tipoPago: anual".to_owned()),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        assert_eq!(
            r#"{"clientId":42,"amount":"15000.00","currency":"CRC","paymentMethod":"CARD","paymentType":"ANNUAL_MEMBERSHIP","status":"PAID","notes":"tipoPago: anual","paymentDate":"2024-03-01"}"#,
            serde_json::to_string(&request).unwrap()
        );
    }
}
