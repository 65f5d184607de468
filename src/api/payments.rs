use crate::api::{ApiClient, Result, warn_if_truncated};
use chrono::NaiveDate;
use derive_getters::Getters;
use dto::mapping::{UiPaymentMethod, notes_for_term, payment_method_from_ui, payment_type_from_term};
use dto::membership_term::MembershipTerm;
use dto::page::Page;
use dto::payment::{PaymentCreateRequest, PaymentCurrency, PaymentResponse, PaymentStatus};
use reqwest::Method;
use rust_decimal::Decimal;

const PAYMENTS_PATH: &str = "/api/payments";
const LIST_QUERY: &str = "page=0&size=200&sort=paymentDate,desc";

/// A payment as entered at the front desk.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct PaymentDraft {
    client_id: u64,
    amount: Decimal,
    term: MembershipTerm,
    method: UiPaymentMethod,
    date: NaiveDate,
    reference: Option<String>,
}

impl PaymentDraft {
    pub fn new(
        client_id: u64,
        amount: Decimal,
        term: MembershipTerm,
        method: UiPaymentMethod,
        date: NaiveDate,
        reference: Option<String>,
    ) -> Self {
        Self {
            client_id,
            amount,
            term,
            method,
            date,
            reference,
        }
    }
}

impl From<&PaymentDraft> for PaymentCreateRequest {
    fn from(draft: &PaymentDraft) -> Self {
        PaymentCreateRequest::new(
            draft.client_id,
            draft.amount,
            PaymentCurrency::Crc,
            payment_method_from_ui(draft.method),
            payment_type_from_term(draft.term),
            PaymentStatus::Paid,
            draft.reference.clone(),
            Some(notes_for_term(draft.term)),
            draft.date,
        )
    }
}

pub async fn list_payments(api: &ApiClient) -> Result<Vec<PaymentResponse>> {
    let page: Page<PaymentResponse> = api.get(&format!("{PAYMENTS_PATH}?{LIST_QUERY}")).await?;
    warn_if_truncated(&page, "payments");
    Ok(page.into_content())
}

pub async fn create_payment(api: &ApiClient, draft: &PaymentDraft) -> Result<PaymentResponse> {
    let request = PaymentCreateRequest::from(draft);
    let payment: PaymentResponse = api.send(Method::POST, PAYMENTS_PATH, &request).await?;
    info!(
        "Payment registered [id: {}, client: {}, term: {}]",
        payment.id(),
        payment.client_id(),
        draft.term
    );
    Ok(payment)
}

pub async fn delete_payment(api: &ApiClient, id: u64) -> Result<()> {
    api.send_empty(Method::DELETE, &format!("{PAYMENTS_PATH}/{id}"))
        .await
}
