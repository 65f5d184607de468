use crate::client_status::ClientStatus;
use crate::membership_status::MembershipStatus::{Active, Expired, ExpiringSoon, Inactive};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A membership due within this many days is flagged as expiring soon.
const EXPIRING_SOON_THRESHOLD_IN_DAYS: i64 = 7;
const MILLISECONDS_IN_A_DAY: i64 = 24 * 60 * 60 * 1000;

/// Status displayed to gym staff. Always derived, never stored.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MembershipStatus {
    Active,
    ExpiringSoon,
    Expired,
    Inactive,
}

impl MembershipStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Active => "activo",
            ExpiringSoon => "por-vencer",
            Expired => "vencido",
            Inactive => "inactivo",
        }
    }
}

impl Display for MembershipStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Number of days left before the due date, rounded up.
/// A due date is considered to start at midnight, so a membership due today
/// has 0 or fewer days left as soon as the day has begun.
pub fn days_until_due(due_date: &NaiveDate, now: &NaiveDateTime) -> i64 {
    let remaining = (due_date.and_time(NaiveTime::MIN) - *now).num_milliseconds();
    let days = remaining / MILLISECONDS_IN_A_DAY;
    if remaining % MILLISECONDS_IN_A_DAY > 0 {
        days + 1
    } else {
        days
    }
}

pub fn compute_membership_status(
    client_status: ClientStatus,
    due_date: Option<&NaiveDate>,
    now: &NaiveDateTime,
) -> MembershipStatus {
    match client_status {
        ClientStatus::Inactive => Inactive,
        ClientStatus::Delinquent => Expired,
        ClientStatus::Active => match due_date {
            None => Inactive,
            Some(due_date) => {
                // Reaching the due date itself already counts as past.
                if due_date.and_time(NaiveTime::MIN) <= *now {
                    Expired
                } else if days_until_due(due_date, now) <= EXPIRING_SOON_THRESHOLD_IN_DAYS {
                    ExpiringSoon
                } else {
                    Active
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use parameterized::{ide, parameterized};

    ide!();

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn midnight() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    fn days_from_today(days: i64) -> NaiveDate {
        let today = now().date();
        if days >= 0 {
            today.checked_add_days(Days::new(days as u64)).unwrap()
        } else {
            today.checked_sub_days(Days::new(days.unsigned_abs())).unwrap()
        }
    }

    #[parameterized(due_in_days = {None, Some(-30), Some(0), Some(3), Some(10), Some(365)})]
    fn should_be_inactive_when_client_is_inactive(due_in_days: Option<i64>) {
        let due_date = due_in_days.map(days_from_today);
        let status = compute_membership_status(ClientStatus::Inactive, due_date.as_ref(), &now());
        assert_eq!(Inactive, status);
    }

    #[parameterized(due_in_days = {None, Some(-30), Some(0), Some(3), Some(10), Some(365)})]
    fn should_be_expired_when_client_is_delinquent(due_in_days: Option<i64>) {
        let due_date = due_in_days.map(days_from_today);
        let status =
            compute_membership_status(ClientStatus::Delinquent, due_date.as_ref(), &now());
        assert_eq!(Expired, status);
    }

    #[test]
    fn should_be_inactive_when_active_client_has_no_due_date() {
        let status = compute_membership_status(ClientStatus::Active, None, &now());
        assert_eq!(Inactive, status);
    }

    #[parameterized(
        due_in_days = {-1, -30, 0, 1, 3, 7, 8, 10, 365},
        expected_status = {Expired, Expired, Expired, ExpiringSoon, ExpiringSoon, ExpiringSoon, Active, Active, Active}
    )]
    fn should_derive_status_from_due_date(due_in_days: i64, expected_status: MembershipStatus) {
        let due_date = days_from_today(due_in_days);
        let status = compute_membership_status(ClientStatus::Active, Some(&due_date), &now());
        assert_eq!(expected_status, status);
    }

    #[test]
    fn should_be_expired_when_due_date_is_exactly_now() {
        let due_date = midnight().date();
        let status = compute_membership_status(ClientStatus::Active, Some(&due_date), &midnight());
        assert_eq!(Expired, status);
    }

    #[test]
    fn should_be_expiring_soon_when_due_in_exactly_seven_days() {
        let due_date = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        let status = compute_membership_status(ClientStatus::Active, Some(&due_date), &midnight());
        assert_eq!(ExpiringSoon, status);
    }

    #[parameterized(
        due_in_days = {-1, 0, 1, 3, 10},
        expected_days = {-1, 0, 1, 3, 10}
    )]
    fn should_round_days_until_due_up(due_in_days: i64, expected_days: i64) {
        let due_date = days_from_today(due_in_days);
        assert_eq!(expected_days, days_until_due(&due_date, &now()));
    }

    #[test]
    fn should_count_whole_days_at_midnight() {
        let due_date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(10, days_until_due(&due_date, &midnight()));
    }

    #[parameterized(
        status = {Active, ExpiringSoon, Expired, Inactive},
        expected_label = {"activo", "por-vencer", "vencido", "inactivo"}
    )]
    fn should_label_status(status: MembershipStatus, expected_label: &str) {
        assert_eq!(expected_label, status.label());
        assert_eq!(expected_label, status.to_string());
    }
}
