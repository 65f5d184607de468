use crate::client::{ClientView, PaymentView};
use crate::report::error::ReportError;
use crate::report::error::ReportError::{CantLoadTemplate, CantRenderReport};
use crate::report::filters::pad;
use crate::tools::currency::format_colones;
use chrono::NaiveDateTime;
use dto::dates::format_date;
use dto::measurement::{BodyMetrics, MeasurementResponse};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Reverse;
use tera::{Context, Tera};

const CLIENT_REPORT_TEMPLATE: &str = "client-report.txt.tera";
const SEPARATOR_WIDTH: usize = 80;
const NO_MEMBERSHIP: &str = "Sin membresia";

#[derive(Serialize)]
struct ReportedClient {
    full_name: String,
    email: String,
    phone: String,
    status: &'static str,
    term: &'static str,
    start_date: String,
    due_date: String,
    emergency_contact: Option<String>,
    notes: Option<String>,
}

#[derive(Serialize)]
struct ReportedPayment {
    date: String,
    amount: String,
    method: &'static str,
    term: &'static str,
}

#[derive(Serialize)]
struct ReportedMeasurement {
    date: String,
    weight: String,
    height: String,
    bmi: String,
}

pub fn create_report_renderer() -> Result<Tera, ReportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(
        CLIENT_REPORT_TEMPLATE,
        include_str!("../../public/templates/report/client-report.txt.tera"),
    )
    .map_err(|e| {
        error!("Can't load report template.\n{e:#?}");
        CantLoadTemplate(e)
    })?;
    tera.register_filter("pad", pad);
    Ok(tera)
}

/// Plain text report of a client, with payments and measurements newest first.
pub fn render_client_report(
    tera: &Tera,
    client: &ClientView,
    payments: &[&PaymentView],
    measurements: &[&MeasurementResponse],
    now: &NaiveDateTime,
) -> Result<String, ReportError> {
    let mut payments = payments.to_vec();
    payments.sort_by_key(|payment| Reverse(*payment.date()));
    let mut measurements = measurements.to_vec();
    measurements.sort_by_key(|measurement| Reverse(*measurement.date()));
    let total_paid: Decimal = payments.iter().map(|payment| *payment.amount()).sum();

    let mut context = Context::new();
    context.insert("client", &reported_client(client));
    context.insert(
        "payments",
        &payments
            .iter()
            .map(|payment| reported_payment(payment))
            .collect::<Vec<_>>(),
    );
    context.insert(
        "measurements",
        &measurements
            .iter()
            .map(|measurement| reported_measurement(measurement))
            .collect::<Vec<_>>(),
    );
    context.insert("total_paid", &format_colones(&total_paid));
    context.insert("separator", &"=".repeat(SEPARATOR_WIDTH));
    context.insert("generated_at", &now.format("%d/%m/%Y %H:%M:%S").to_string());

    tera.render(CLIENT_REPORT_TEMPLATE, &context)
        .map_err(|e| {
            error!("Can't render report [client: {}]\n{e:#?}", client.id());
            CantRenderReport(e)
        })
}

fn reported_client(client: &ClientView) -> ReportedClient {
    ReportedClient {
        full_name: client.full_name(),
        email: client.email().clone(),
        phone: client.phone().clone(),
        status: client.status().label(),
        term: client.term().label(),
        start_date: format_date(client.start_date()),
        due_date: client
            .due_date()
            .as_ref()
            .map(format_date)
            .unwrap_or_else(|| NO_MEMBERSHIP.to_owned()),
        emergency_contact: client.emergency_contact().clone(),
        notes: client.notes().clone().filter(|notes| !notes.trim().is_empty()),
    }
}

fn reported_payment(payment: &PaymentView) -> ReportedPayment {
    ReportedPayment {
        date: format_date(payment.date()),
        amount: format_colones(payment.amount()),
        method: payment.method().label(),
        term: payment.term().label(),
    }
}

fn reported_measurement(measurement: &MeasurementResponse) -> ReportedMeasurement {
    ReportedMeasurement {
        date: format_date(measurement.date()),
        weight: measurement.weight().to_string(),
        height: measurement.height().to_string(),
        bmi: measurement
            .bmi()
            .map(|bmi| format!("{bmi:.1}"))
            .unwrap_or_else(|| "-".to_owned()),
    }
}
