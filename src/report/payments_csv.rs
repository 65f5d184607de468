use crate::client::PaymentView;
use crate::report::error::ReportError;
use crate::report::error::ReportError::CantWriteCsv;
use crate::tools::{log_error_and_return, log_message_and_return};
use dto::dates::format_date;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
struct CsvPayment<'a> {
    #[serde(rename = "fecha")]
    date: String,
    #[serde(rename = "monto")]
    amount: Decimal,
    #[serde(rename = "metodoPago")]
    method: &'static str,
    #[serde(rename = "tipoPago")]
    term: &'static str,
    #[serde(rename = "referencia")]
    reference: Option<&'a str>,
}

impl<'a> From<&'a PaymentView> for CsvPayment<'a> {
    fn from(payment: &'a PaymentView) -> Self {
        CsvPayment {
            date: format_date(payment.date()),
            amount: *payment.amount(),
            method: payment.method().label(),
            term: payment.term().label(),
            reference: payment.reference().as_deref(),
        }
    }
}

/// Export payments as `;` separated values, one payment per line after a header.
pub fn export_payments_csv(payments: &[&PaymentView]) -> Result<String, ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(vec![]);
    for payment in payments {
        writer
            .serialize(CsvPayment::from(*payment))
            .map_err(log_message_and_return("Can't write payment", CantWriteCsv))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(log_message_and_return("Can't flush payments", CantWriteCsv))?;
    String::from_utf8(bytes).map_err(log_error_and_return(CantWriteCsv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::date;
    use dto::payment::{PaymentMethod, PaymentResponse, PaymentType};

    #[test]
    fn should_export_payments() {
        let payments: Vec<PaymentView> = [
            PaymentResponse::new_test(1, 42, Decimal::new(15000, 0), Some(PaymentType::MonthlyMembership), date(2024, 2, 20))
                .with_method(Some(PaymentMethod::Sinpe))
                .with_reference(Some("SP-001")),
            PaymentResponse::new_test(2, 42, Decimal::new(4_000_050, 2), Some(PaymentType::QuarterlyMembership), date(2024, 1, 20)),
        ]
        .iter()
        .map(PaymentView::from)
        .collect();

        let csv = export_payments_csv(&payments.iter().collect::<Vec<_>>()).unwrap();

        assert_eq!(
            "fecha;monto;metodoPago;tipoPago;referencia\n\
             20/02/2024;15000;sinpe;mensual;SP-001\n\
             20/01/2024;40000.50;efectivo;trimestral;\n",
            csv
        );
    }

    #[test]
    fn should_export_nothing_without_payments() {
        assert_eq!("", export_payments_csv(&[]).unwrap());
    }
}
