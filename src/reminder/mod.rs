use crate::client::ClientView;
use crate::reminder::error::ReminderError;
use crate::reminder::error::ReminderError::{CantBuildLink, InvalidPhone};
use crate::tools::log_message_and_return;
use chrono::NaiveDateTime;
use dto::dates::format_date;
use dto::membership_status::MembershipStatus;
use reqwest::Url;

pub mod error;

const WHATSAPP_URL: &str = "https://wa.me/";
const COSTA_RICA_PREFIX: &str = "506";
const LOCAL_NUMBER_LENGTH: usize = 8;

/// Turn a phone number as typed into an international one, digits only.
/// Local 8 digit numbers get the Costa Rica prefix.
pub fn normalize_phone(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_start_matches('0');
    match digits.len() {
        LOCAL_NUMBER_LENGTH => Some(format!("{COSTA_RICA_PREFIX}{digits}")),
        length if length < LOCAL_NUMBER_LENGTH => None,
        _ => Some(digits.to_owned()),
    }
}

pub fn reminder_message(client: &ClientView, now: &NaiveDateTime) -> String {
    let name = client.full_name();
    let due_date = client.due_date().as_ref().map(format_date);

    match (client.status(), due_date) {
        (MembershipStatus::Expired, Some(due_date)) => format!(
            "Hola {name}, tu membresia vencio el {due_date}. Si deseas renovarla, escribinos."
        ),
        (MembershipStatus::Expired, None) => format!(
            "Hola {name}, tu membresia esta vencida. Si deseas renovarla, escribinos."
        ),
        (MembershipStatus::ExpiringSoon, Some(due_date)) => format!(
            "Hola {name}, tu membresia vence el {due_date}. Si deseas renovarla, escribinos."
        ),
        (MembershipStatus::ExpiringSoon, None) => format!(
            "Hola {name}, tu membresia esta por vencer. Si deseas renovarla, escribinos."
        ),
        (MembershipStatus::Active, Some(due_date)) => {
            let days = client.days_until_due(now).unwrap_or_default().max(0);
            let days_label = if days == 1 { "dia" } else { "dias" };
            format!(
                "Hola {name}, te quedan {days} {days_label} de membresia. Vence el {due_date}. Si quieres renovarla con tiempo, escribinos."
            )
        }
        (MembershipStatus::Active, None) => format!(
            "Hola {name}, tu membresia esta activa. Si quieres actualizar la fecha de vencimiento, escribinos."
        ),
        (MembershipStatus::Inactive, Some(due_date)) => format!(
            "Hola {name}, tu membresia no esta activa y su ultima fecha fue {due_date}. Si deseas reactivarla, escribinos."
        ),
        (MembershipStatus::Inactive, None) => format!(
            "Hola {name}, no tenemos una membresia activa registrada. Si deseas activarla, escribinos."
        ),
    }
}

/// WhatsApp link opening a conversation with the client, message prefilled.
pub fn reminder_link(client: &ClientView, now: &NaiveDateTime) -> Result<Url, ReminderError> {
    let phone = normalize_phone(client.phone()).ok_or(InvalidPhone(*client.id()))?;
    let message = reminder_message(client, now);
    let link = Url::parse_with_params(
        &format!("{WHATSAPP_URL}{phone}"),
        [("text", message.as_str())],
    )
    .map_err(log_message_and_return("Can't build reminder link", CantBuildLink))?;
    debug!("Reminder link built [client: {}]", client.id());
    Ok(link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::build_client_views;
    use crate::client::extras::ClientExtrasMap;
    use crate::client::tests::{date, now};
    use dto::client::ClientResponse;
    use dto::client_status::ClientStatus;
    use parameterized::{ide, parameterized};

    ide!();

    fn view(client: ClientResponse) -> ClientView {
        build_client_views(&[client], &[], &ClientExtrasMap::default(), &now()).remove(0)
    }

    #[parameterized(
        phone = {"8888-1234", "+506 8888 1234", "0050688881234", "(1) 555-010-9999", "1234567", "", "no phone"},
        expected_phone = {Some("50688881234"), Some("50688881234"), Some("50688881234"), Some("15550109999"), None, None, None}
    )]
    fn should_normalize_phone(phone: &str, expected_phone: Option<&str>) {
        assert_eq!(expected_phone.map(str::to_owned), normalize_phone(phone));
    }

    #[test]
    fn should_write_message_for_expired_client() {
        let client = view(ClientResponse::new_test(1, ClientStatus::Active, Some(date(2024, 2, 20))));
        assert_eq!(
            "Hola Jon Doe, tu membresia vencio el 20/02/2024. Si deseas renovarla, escribinos.",
            reminder_message(&client, &now())
        );
    }

    #[test]
    fn should_write_message_for_delinquent_client_without_due_date() {
        let client = view(ClientResponse::new_test(1, ClientStatus::Delinquent, None));
        assert_eq!(
            "Hola Jon Doe, tu membresia esta vencida. Si deseas renovarla, escribinos.",
            reminder_message(&client, &now())
        );
    }

    #[test]
    fn should_write_message_for_expiring_client() {
        let client = view(ClientResponse::new_test(1, ClientStatus::Active, Some(date(2024, 3, 5))));
        assert_eq!(
            "Hola Jon Doe, tu membresia vence el 05/03/2024. Si deseas renovarla, escribinos.",
            reminder_message(&client, &now())
        );
    }

    #[test]
    fn should_count_remaining_days_for_active_client() {
        let client = view(ClientResponse::new_test(1, ClientStatus::Active, Some(date(2024, 3, 20))));
        assert_eq!(
            "Hola Jon Doe, te quedan 19 dias de membresia. Vence el 20/03/2024. Si quieres renovarla con tiempo, escribinos.",
            reminder_message(&client, &now())
        );
    }

    #[test]
    fn should_use_singular_for_one_remaining_day() {
        let client = view(ClientResponse::new_test(1, ClientStatus::Active, Some(date(2024, 3, 20))));
        let now = date(2024, 3, 19).and_hms_opt(8, 0, 0).unwrap();
        assert!(reminder_message(&client, &now).contains("te quedan 1 dia de membresia"));
    }

    #[test]
    fn should_write_message_for_inactive_client() {
        let with_due_date = view(ClientResponse::new_test(1, ClientStatus::Inactive, Some(date(2023, 12, 1))));
        let without_due_date = view(ClientResponse::new_test(2, ClientStatus::Active, None));
        assert_eq!(
            "Hola Jon Doe, tu membresia no esta activa y su ultima fecha fue 01/12/2023. Si deseas reactivarla, escribinos.",
            reminder_message(&with_due_date, &now())
        );
        assert_eq!(
            "Hola Jon Doe, no tenemos una membresia activa registrada. Si deseas activarla, escribinos.",
            reminder_message(&without_due_date, &now())
        );
    }

    #[test]
    fn should_build_reminder_link() {
        let client = view(ClientResponse::new_test(1, ClientStatus::Active, Some(date(2024, 3, 5))));

        let link = reminder_link(&client, &now()).unwrap();

        assert_eq!(Some("wa.me"), link.host_str());
        assert_eq!("/50688881234", link.path());
        let (key, text) = link.query_pairs().next().unwrap();
        assert_eq!("text", key);
        assert_eq!(reminder_message(&client, &now()), text);
    }

    #[test]
    fn should_not_build_link_without_valid_phone() {
        let client = view(ClientResponse::new_test(7, ClientStatus::Active, None).with_phone(Some("123")));
        assert_eq!(Err(InvalidPhone(7)), reminder_link(&client, &now()));
    }
}
