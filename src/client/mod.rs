use crate::client::extras::ClientExtrasMap;
use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use dto::client::ClientResponse;
use dto::mapping::{UiPaymentMethod, term_from_payment, ui_payment_method_from_backend};
use dto::membership_status::{MembershipStatus, days_until_due};
use dto::membership_term::MembershipTerm;
use dto::payment::PaymentResponse;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::ops::Deref;

pub mod extras;

/// A client as shown to the front desk: the backend record,
/// its derived status and what the console keeps on its side.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct ClientView {
    id: u64,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    start_date: NaiveDate,
    due_date: Option<NaiveDate>,
    status: MembershipStatus,
    term: MembershipTerm,
    emergency_contact: Option<String>,
    notes: Option<String>,
}

impl ClientView {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    pub fn days_until_due(&self, now: &NaiveDateTime) -> Option<i64> {
        self.due_date
            .as_ref()
            .map(|due_date| days_until_due(due_date, now))
    }

    /// Status as displayed in listings, e.g. `por-vencer (3d)`.
    pub fn status_badge(&self, now: &NaiveDateTime) -> String {
        match (self.status, self.days_until_due(now)) {
            (MembershipStatus::ExpiringSoon, Some(days)) => format!("{} ({days}d)", self.status),
            _ => self.status.to_string(),
        }
    }
}

/// A payment as shown to the front desk.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct PaymentView {
    id: u64,
    client_id: u64,
    amount: Decimal,
    date: NaiveDate,
    term: MembershipTerm,
    method: UiPaymentMethod,
    reference: Option<String>,
}

impl From<&PaymentResponse> for PaymentView {
    fn from(payment: &PaymentResponse) -> Self {
        PaymentView {
            id: *payment.id(),
            client_id: *payment.client_id(),
            amount: *payment.amount(),
            date: *payment.payment_date(),
            term: term_from_payment(*payment.payment_type(), payment.notes().as_deref()),
            method: ui_payment_method_from_backend(*payment.payment_method()),
            reference: payment.reference().clone(),
        }
    }
}

/// Latest payment of each client, indexed by client id.
#[derive(Debug, Default)]
pub struct LatestPayments<'a> {
    payments: HashMap<u64, &'a PaymentResponse>,
}

impl<'a> Deref for LatestPayments<'a> {
    type Target = HashMap<u64, &'a PaymentResponse>;

    fn deref(&self) -> &Self::Target {
        &self.payments
    }
}

/// On equal payment dates, the first payment seen is kept.
pub fn latest_payment_by_client(payments: &[PaymentResponse]) -> LatestPayments<'_> {
    let mut latest: HashMap<u64, &PaymentResponse> = HashMap::new();
    for payment in payments {
        latest
            .entry(*payment.client_id())
            .and_modify(|current| {
                if payment.payment_date() > current.payment_date() {
                    *current = payment;
                }
            })
            .or_insert(payment);
    }
    LatestPayments { payments: latest }
}

pub fn build_client_view(
    client: &ClientResponse,
    latest_payment: Option<&PaymentResponse>,
    extras: &ClientExtrasMap,
    now: &NaiveDateTime,
) -> ClientView {
    let start_date = client
        .membership_start_date()
        .or_else(|| client.registered_at().map(|registered_at| registered_at.date()))
        .unwrap_or_else(|| now.date());
    let term = latest_payment
        .map(|payment| term_from_payment(*payment.payment_type(), payment.notes().as_deref()))
        .unwrap_or_default();

    ClientView {
        id: *client.id(),
        first_name: client.first_name().clone(),
        last_name: client.last_name().clone().unwrap_or_default(),
        email: client.email().clone().unwrap_or_default(),
        phone: client.phone().clone().unwrap_or_default(),
        start_date,
        due_date: *client.due_date(),
        status: client.membership_status(now),
        term,
        emergency_contact: extras
            .find(*client.id())
            .and_then(|extras| extras.emergency_contact().clone())
            .filter(|contact| !contact.is_empty()),
        notes: client.notes().clone(),
    }
}

pub fn build_client_views(
    clients: &[ClientResponse],
    payments: &[PaymentResponse],
    extras: &ClientExtrasMap,
    now: &NaiveDateTime,
) -> Vec<ClientView> {
    let latest_payments = latest_payment_by_client(payments);
    clients
        .iter()
        .map(|client| {
            build_client_view(
                client,
                latest_payments.get(client.id()).copied(),
                extras,
                now,
            )
        })
        .collect()
}
