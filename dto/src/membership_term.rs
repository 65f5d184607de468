use crate::error::DtoError::{DateOutOfRange, UnknownTerm};
use crate::error::{DtoError, Result};
use crate::membership_term::MembershipTerm::{Annual, Daily, Monthly, Quarterly, Semiannual};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub enum MembershipTerm {
    #[serde(rename = "diario")]
    Daily,
    #[default]
    #[serde(rename = "mensual")]
    Monthly,
    #[serde(rename = "trimestral")]
    Quarterly,
    #[serde(rename = "semestral")]
    Semiannual,
    #[serde(rename = "anual")]
    Annual,
}

/// Amount of time a term adds to a due date.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TermIncrement {
    Days(u64),
    Months(u32),
}

impl MembershipTerm {
    pub const ALL: [MembershipTerm; 5] = [Daily, Monthly, Quarterly, Semiannual, Annual];

    pub fn increment(&self) -> TermIncrement {
        match self {
            Daily => TermIncrement::Days(1),
            Monthly => TermIncrement::Months(1),
            Quarterly => TermIncrement::Months(3),
            Semiannual => TermIncrement::Months(6),
            Annual => TermIncrement::Months(12),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Daily => "diario",
            Monthly => "mensual",
            Quarterly => "trimestral",
            Semiannual => "semestral",
            Annual => "anual",
        }
    }

    /// Advance `date` by one term.
    pub fn advance(&self, date: &NaiveDate) -> Result<NaiveDate> {
        match self.increment() {
            TermIncrement::Days(days) => date.checked_add_days(Days::new(days)).ok_or(DateOutOfRange),
            TermIncrement::Months(months) => add_calendar_months(date, months),
        }
    }
}

impl Display for MembershipTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MembershipTerm {
    type Err = DtoError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "diario" | "daily" => Ok(Daily),
            "mensual" | "monthly" => Ok(Monthly),
            "trimestral" | "quarterly" => Ok(Quarterly),
            "semestral" | "semiannual" => Ok(Semiannual),
            "anual" | "annual" => Ok(Annual),
            _ => Err(UnknownTerm(value.to_owned())),
        }
    }
}

/// Increment the month field and let the day overflow into the following month,
/// e.g. 2023-01-31 + 1 month = 2023-03-03.
fn add_calendar_months(date: &NaiveDate, months: u32) -> Result<NaiveDate> {
    let total_months = date.year() as i64 * 12 + date.month0() as i64 + months as i64;
    let year = i32::try_from(total_months.div_euclid(12)).map_err(|_| DateOutOfRange)?;
    let month = total_months.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_day| first_day.checked_add_days(Days::new(date.day0() as u64)))
        .ok_or(DateOutOfRange)
}

/// Due date of a membership starting on `start_date`.
pub fn initial_due_date(start_date: &NaiveDate, term: MembershipTerm) -> Result<NaiveDate> {
    term.advance(start_date)
}

/// New due date once a membership is renewed.
/// A lapsed (or missing) membership restarts from today,
/// while an early renewal extends the current due date.
pub fn renew_due_date(
    current_due_date: Option<&NaiveDate>,
    term: MembershipTerm,
    today: &NaiveDate,
) -> Result<NaiveDate> {
    let base_date = match current_due_date {
        Some(due_date) if due_date > today => due_date,
        _ => today,
    };
    term.advance(base_date)
}
