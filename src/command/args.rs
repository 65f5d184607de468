use crate::api::payments::PaymentDraft;
use crate::client::extras::ClientExtras;
use crate::dashboard::StatusFilter;
use crate::error::ApplicationError::UnknownCommand;
use crate::error::Result;
use crate::tools::blank_to_none;
use crate::tools::env_args::{
    has_flag, retrieve_arg_value, retrieve_command, retrieve_expected_arg_value,
    retrieve_parsed_arg_value,
};
use crate::tools::error::ToolsError;
use crate::tools::error::ToolsError::MissingArgument;
use chrono::NaiveDate;
use dto::client::{ClientCreateRequest, ClientUpdateRequest};
use dto::dates::parse_date;
use dto::mapping::UiPaymentMethod;
use dto::measurement::{BodyMeasurements, MeasurementCreateRequest};
use dto::membership_term::MembershipTerm;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

const CLIENT_ARG: &str = "--client";
const MEASUREMENT_ARG: &str = "--measurement";
const EMERGENCY_CONTACT_ARG: &str = "--emergency-contact";
const OUTPUT_ARG: &str = "--output";
const DEFAULT_OUTPUT: &str = ".";

/// What the console has been asked to do, with its arguments parsed.
#[derive(Debug, PartialEq)]
pub enum Command {
    Help,
    Login {
        username: String,
        password: String,
    },
    Logout,
    Dashboard,
    Clients {
        search: Option<String>,
        filter: StatusFilter,
    },
    Renew {
        client_id: u64,
        term: Option<MembershipTerm>,
    },
    Pay(PaymentDraft),
    AddClient {
        request: ClientCreateRequest,
        extras: ClientExtras,
        term: Option<MembershipTerm>,
    },
    /// `extras` is `None` when the emergency contact is left as is.
    UpdateClient {
        client_id: u64,
        request: ClientUpdateRequest,
        extras: Option<ClientExtras>,
    },
    DeleteClient {
        client_id: u64,
    },
    DeletePayment {
        payment_id: u64,
    },
    AddMeasurement(MeasurementCreateRequest),
    DeleteMeasurement {
        measurement_id: u64,
    },
    Report {
        client_id: u64,
        output: PathBuf,
    },
    PaymentsCsv {
        client_id: u64,
        output: PathBuf,
    },
    MeasurementsPdf {
        client_id: u64,
        measurement_id: Option<u64>,
        output: PathBuf,
    },
    Reminder {
        client_id: u64,
        server: bool,
    },
    Backup,
}

impl Command {
    /// Read the command from the args. `today` is the payment date when none is given.
    pub fn from_args(today: &NaiveDate) -> Result<Self> {
        let command = retrieve_command()?;
        let command = match command.as_str() {
            "help" => Command::Help,
            "login" => Command::Login {
                username: expected_arg("--username")?,
                password: expected_arg("--password")?,
            },
            "logout" => Command::Logout,
            "dashboard" => Command::Dashboard,
            "clients" => Command::Clients {
                search: blank_to_none(retrieve_arg_value("--search")),
                filter: retrieve_arg_value("--filter")
                    .map(|filter| StatusFilter::from_str(&filter))
                    .transpose()?
                    .unwrap_or_default(),
            },
            "renew" => Command::Renew {
                client_id: expected_parsed_arg(CLIENT_ARG)?,
                term: optional_term()?,
            },
            "pay" => Command::Pay(PaymentDraft::new(
                expected_parsed_arg(CLIENT_ARG)?,
                expected_parsed_arg::<Decimal>("--amount")?,
                expected_arg("--term")?.parse::<MembershipTerm>()?,
                expected_arg("--method")?.parse::<UiPaymentMethod>()?,
                date_or(today)?,
                blank_to_none(retrieve_arg_value("--reference")),
            )),
            "add-client" => Command::AddClient {
                request: ClientCreateRequest::new(
                    expected_arg("--first-name")?,
                    blank_to_none(retrieve_arg_value("--last-name")),
                    blank_to_none(retrieve_arg_value("--phone")),
                    blank_to_none(retrieve_arg_value("--email")),
                    blank_to_none(retrieve_arg_value("--notes")),
                ),
                extras: ClientExtras::new(blank_to_none(retrieve_arg_value(
                    EMERGENCY_CONTACT_ARG,
                ))),
                term: optional_term()?,
            },
            "update-client" => Command::UpdateClient {
                client_id: expected_parsed_arg(CLIENT_ARG)?,
                request: ClientUpdateRequest::default()
                    .with_names(
                        blank_to_none(retrieve_arg_value("--first-name")),
                        blank_to_none(retrieve_arg_value("--last-name")),
                    )
                    .with_contact(
                        blank_to_none(retrieve_arg_value("--phone")),
                        blank_to_none(retrieve_arg_value("--email")),
                    )
                    .with_notes(blank_to_none(retrieve_arg_value("--notes"))),
                extras: retrieve_arg_value(EMERGENCY_CONTACT_ARG)
                    .map(|contact| ClientExtras::new(blank_to_none(Some(contact)))),
            },
            "delete-client" => Command::DeleteClient {
                client_id: expected_parsed_arg(CLIENT_ARG)?,
            },
            "delete-payment" => Command::DeletePayment {
                payment_id: expected_parsed_arg("--payment")?,
            },
            "add-measurement" => Command::AddMeasurement(MeasurementCreateRequest::new(
                expected_parsed_arg(CLIENT_ARG)?,
                date_or(today)?,
                BodyMeasurements::new(
                    expected_parsed_arg("--weight")?,
                    expected_parsed_arg("--height")?,
                    expected_parsed_arg("--chest")?,
                    expected_parsed_arg("--waist")?,
                    expected_parsed_arg("--hip")?,
                    expected_parsed_arg("--left-arm")?,
                    expected_parsed_arg("--right-arm")?,
                    expected_parsed_arg("--left-leg")?,
                    expected_parsed_arg("--right-leg")?,
                    retrieve_parsed_arg_value("--body-fat")?,
                    blank_to_none(retrieve_arg_value("--notes")),
                ),
            )),
            "delete-measurement" => Command::DeleteMeasurement {
                measurement_id: expected_parsed_arg(MEASUREMENT_ARG)?,
            },
            "report" => Command::Report {
                client_id: expected_parsed_arg(CLIENT_ARG)?,
                output: output_directory(),
            },
            "payments-csv" => Command::PaymentsCsv {
                client_id: expected_parsed_arg(CLIENT_ARG)?,
                output: output_directory(),
            },
            "measurements-pdf" => Command::MeasurementsPdf {
                client_id: expected_parsed_arg(CLIENT_ARG)?,
                measurement_id: retrieve_parsed_arg_value(MEASUREMENT_ARG)?,
                output: output_directory(),
            },
            "reminder" => Command::Reminder {
                client_id: expected_parsed_arg(CLIENT_ARG)?,
                server: has_flag("--server"),
            },
            "backup" => Command::Backup,
            _ => return Err(UnknownCommand(command)),
        };
        debug!("Command read from args: {command:?}");
        Ok(command)
    }
}

fn expected_arg(name: &str) -> Result<String, ToolsError> {
    let value = retrieve_expected_arg_value(name, MissingArgument(name.to_owned()))?;
    blank_to_none(Some(value)).ok_or_else(|| MissingArgument(name.to_owned()))
}

fn expected_parsed_arg<T: FromStr>(name: &str) -> Result<T, ToolsError> {
    retrieve_parsed_arg_value(name)?.ok_or_else(|| MissingArgument(name.to_owned()))
}

/// `--date` when given, `today` otherwise.
fn date_or(today: &NaiveDate) -> Result<NaiveDate> {
    Ok(retrieve_arg_value("--date")
        .map(|date| parse_date(&date))
        .transpose()?
        .unwrap_or(*today))
}

fn optional_term() -> Result<Option<MembershipTerm>> {
    Ok(retrieve_arg_value("--term")
        .map(|term| term.parse::<MembershipTerm>())
        .transpose()?)
}

fn output_directory() -> PathBuf {
    PathBuf::from(retrieve_arg_value(OUTPUT_ARG).unwrap_or_else(|| DEFAULT_OUTPUT.to_owned()))
}

pub const USAGE: &str = "\
gym-console <command> [--api-url=URL] [--token=TOKEN] [--store=PATH] [--ephemeral]

  help
  login --username=U --password=P
  logout
  dashboard
  clients [--search=Q] [--filter=all|active|expired|expiring]
  renew --client=ID [--term=diario|mensual|trimestral|semestral|anual]
  pay --client=ID --amount=N --term=T --method=efectivo|tarjeta|sinpe [--date=YYYY-MM-DD] [--reference=R]
  add-client --first-name=N [--last-name=..] [--phone=..] [--email=..] [--notes=..] [--emergency-contact=..] [--term=T]
  update-client --client=ID [--first-name=..] [--last-name=..] [--phone=..] [--email=..] [--notes=..] [--emergency-contact=..]
  delete-client --client=ID
  delete-payment --payment=ID
  add-measurement --client=ID --weight=KG --height=CM --chest=CM --waist=CM --hip=CM --left-arm=CM --right-arm=CM --left-leg=CM --right-leg=CM [--body-fat=%] [--date=YYYY-MM-DD] [--notes=..]
  delete-measurement --measurement=ID
  report --client=ID [--output=DIR]
  payments-csv --client=ID [--output=DIR]
  measurements-pdf --client=ID [--measurement=ID] [--output=DIR]
  reminder --client=ID [--server]
  backup [--backup-token=T]";
