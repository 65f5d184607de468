use crate::client::{ClientView, PaymentView};
use crate::dashboard::error::DashboardError;
use crate::tools::currency::format_colones;
use chrono::{Datelike, NaiveDate};
use derive_getters::Getters;
use dto::membership_status::MembershipStatus;
use rust_decimal::Decimal;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub mod error;

/// Figures shown on top of the dashboard.
#[derive(Debug, Clone, Default, Eq, PartialEq, Getters)]
pub struct Statistics {
    /// Clients with a running membership, expiring soon included.
    active: usize,
    expired: usize,
    expiring_soon: usize,
    inactive: usize,
    monthly_revenue: Decimal,
}

impl Display for Statistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Clientes activos:  {}", self.active)?;
        writeln!(f, "Por vencer:        {}", self.expiring_soon)?;
        writeln!(f, "Vencidos:          {}", self.expired)?;
        writeln!(f, "Inactivos:         {}", self.inactive)?;
        write!(f, "Ingresos del mes:  {}", format_colones(&self.monthly_revenue))
    }
}

pub fn compute_statistics(
    clients: &[ClientView],
    payments: &[PaymentView],
    today: &NaiveDate,
) -> Statistics {
    let count = |status: MembershipStatus| {
        clients
            .iter()
            .filter(|client| *client.status() == status)
            .count()
    };
    let expiring_soon = count(MembershipStatus::ExpiringSoon);
    let monthly_revenue = payments
        .iter()
        .filter(|payment| {
            payment.date().month() == today.month() && payment.date().year() == today.year()
        })
        .map(|payment| *payment.amount())
        .sum();

    Statistics {
        active: count(MembershipStatus::Active) + expiring_soon,
        expired: count(MembershipStatus::Expired),
        expiring_soon,
        inactive: count(MembershipStatus::Inactive),
        monthly_revenue,
    }
}

/// Case-insensitive search on names, email and status. The phone is matched as typed.
/// A blank query matches every client.
pub fn search_clients<'a>(clients: &'a [ClientView], query: &str) -> Vec<&'a ClientView> {
    if query.trim().is_empty() {
        return clients.iter().collect();
    }
    let query = query.to_lowercase();
    clients
        .iter()
        .filter(|client| {
            client.first_name().to_lowercase().contains(&query)
                || client.last_name().to_lowercase().contains(&query)
                || client.email().to_lowercase().contains(&query)
                || client.phone().contains(&query)
                || client.status().label().contains(&query)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Expired,
    ExpiringSoon,
}

impl StatusFilter {
    pub fn accepts(&self, status: MembershipStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == MembershipStatus::Active,
            StatusFilter::Expired => status == MembershipStatus::Expired,
            StatusFilter::ExpiringSoon => status == MembershipStatus::ExpiringSoon,
        }
    }

    pub fn apply<'a>(&self, clients: Vec<&'a ClientView>) -> Vec<&'a ClientView> {
        clients
            .into_iter()
            .filter(|client| self.accepts(*client.status()))
            .collect()
    }
}

impl FromStr for StatusFilter {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "all" | "todos" => Ok(StatusFilter::All),
            "active" | "activo" => Ok(StatusFilter::Active),
            "expired" | "vencido" => Ok(StatusFilter::Expired),
            "expiring" | "por-vencer" => Ok(StatusFilter::ExpiringSoon),
            _ => Err(DashboardError::UnknownFilter(value.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::extras::ClientExtrasMap;
    use crate::client::tests::{date, now};
    use crate::client::build_client_views;
    use dto::client::ClientResponse;
    use dto::client_status::ClientStatus;
    use dto::payment::PaymentResponse;
    use parameterized::{ide, parameterized};

    ide!();

    fn clients() -> Vec<ClientView> {
        let clients = vec![
            ClientResponse::new_test(1, ClientStatus::Active, Some(date(2024, 4, 1)))
                .with_names("Jon", Some("Doe")),
            ClientResponse::new_test(2, ClientStatus::Active, Some(date(2024, 3, 4)))
                .with_names("Jonette", Some("Pérez"))
                .with_email(Some("JONETTE@example.com"))
                .with_phone(Some("8777-0000")),
            ClientResponse::new_test(3, ClientStatus::Delinquent, Some(date(2024, 6, 1)))
                .with_names("Ana", None)
                .with_email(None)
                .with_phone(None),
            ClientResponse::new_test(4, ClientStatus::Inactive, Some(date(2024, 6, 1)))
                .with_names("Luis", Some("Mora"))
                .with_email(Some("luis@example.com")),
        ];
        build_client_views(&clients, &[], &ClientExtrasMap::default(), &now())
    }

    #[test]
    fn should_compute_statistics() {
        let payments: Vec<PaymentView> = vec![
            PaymentResponse::new_test(1, 1, Decimal::new(15000, 0), None, date(2024, 3, 1)),
            PaymentResponse::new_test(2, 2, Decimal::new(1_250_050, 2), None, date(2024, 3, 1)),
            PaymentResponse::new_test(3, 2, Decimal::new(15000, 0), None, date(2024, 2, 29)),
            PaymentResponse::new_test(4, 2, Decimal::new(15000, 0), None, date(2023, 3, 1)),
        ]
        .iter()
        .map(PaymentView::from)
        .collect();

        let statistics = compute_statistics(&clients(), &payments, &date(2024, 3, 15));

        assert_eq!(&2, statistics.active());
        assert_eq!(&1, statistics.expiring_soon());
        assert_eq!(&1, statistics.expired());
        assert_eq!(&1, statistics.inactive());
        assert_eq!(&Decimal::new(2_750_050, 2), statistics.monthly_revenue());
        assert!(statistics.to_string().ends_with("Ingresos del mes:  ₡27 501"));
    }

    #[test]
    fn should_compute_empty_statistics() {
        assert_eq!(
            Statistics::default(),
            compute_statistics(&[], &[], &date(2024, 3, 15))
        );
    }

    #[parameterized(
        query = {"", "  ", "jon", "PÉREZ", "jonette@", "8777", "vencido", "por-vencer", "nobody"},
        expected_ids = {vec![1, 2, 3, 4], vec![1, 2, 3, 4], vec![1, 2], vec![2], vec![2], vec![2], vec![3], vec![2], vec![]}
    )]
    fn should_search_clients(query: &str, expected_ids: Vec<u64>) {
        let clients = clients();
        let ids: Vec<u64> = search_clients(&clients, query)
            .into_iter()
            .map(|client| *client.id())
            .collect();
        assert_eq!(expected_ids, ids);
    }

    #[parameterized(
        filter = {StatusFilter::All, StatusFilter::Active, StatusFilter::Expired, StatusFilter::ExpiringSoon},
        expected_ids = {vec![1, 2, 3, 4], vec![1], vec![3], vec![2]}
    )]
    fn should_filter_clients(filter: StatusFilter, expected_ids: Vec<u64>) {
        let clients = clients();
        let ids: Vec<u64> = filter
            .apply(clients.iter().collect())
            .into_iter()
            .map(|client| *client.id())
            .collect();
        assert_eq!(expected_ids, ids);
    }

    #[parameterized(
        value = {"all", "Active", "expired", "expiring", "por-vencer"},
        expected_filter = {StatusFilter::All, StatusFilter::Active, StatusFilter::Expired, StatusFilter::ExpiringSoon, StatusFilter::ExpiringSoon}
    )]
    fn should_parse_status_filter(value: &str, expected_filter: StatusFilter) {
        assert_eq!(Ok(expected_filter), value.parse());
    }

    #[test]
    fn should_not_parse_unknown_filter() {
        assert_eq!(
            Err(DashboardError::UnknownFilter("morosos".to_owned())),
            "morosos".parse::<StatusFilter>()
        );
    }
}
