use crate::client_status::ClientStatus;
use crate::membership_status::{MembershipStatus, compute_membership_status};
use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A gym member, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ClientResponse {
    id: u64,
    #[serde(rename = "gymId")]
    gym_id: u64,
    #[serde(rename = "nombre")]
    first_name: String,
    #[serde(rename = "apellido", default)]
    last_name: Option<String>,
    #[serde(rename = "telefono", default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(rename = "estado")]
    status: ClientStatus,
    #[serde(rename = "fechaRegistro", default)]
    registered_at: Option<NaiveDateTime>,
    #[serde(rename = "fechaInicioMembresia", default)]
    membership_start_date: Option<NaiveDate>,
    #[serde(rename = "fechaVencimiento", default)]
    due_date: Option<NaiveDate>,
    #[serde(rename = "notas", default)]
    notes: Option<String>,
}

impl ClientResponse {
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name,
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_owned()
    }

    pub fn membership_status(&self, now: &NaiveDateTime) -> MembershipStatus {
        compute_membership_status(self.status, self.due_date.as_ref(), now)
    }
}

#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ClientCreateRequest {
    #[serde(rename = "nombre")]
    first_name: String,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(rename = "notas", skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl ClientCreateRequest {
    pub fn new(
        first_name: String,
        last_name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            first_name,
            last_name,
            phone,
            email,
            notes,
        }
    }
}

/// Partial update: absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
pub struct ClientUpdateRequest {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(rename = "notas", skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    status: Option<ClientStatus>,
    #[serde(rename = "fechaVencimiento", skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
}

impl ClientUpdateRequest {
    pub fn with_status(mut self, status: ClientStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_names(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    pub fn with_contact(
        mut self,
        phone: Option<String>,
        email: Option<String>,
    ) -> Self {
        self.phone = phone;
        self.email = email;
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

impl From<ClientCreateRequest> for ClientUpdateRequest {
    fn from(request: ClientCreateRequest) -> Self {
        Self {
            first_name: Some(request.first_name),
            last_name: request.last_name,
            phone: request.phone,
            email: request.email,
            notes: request.notes,
            status: None,
            due_date: None,
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    impl ClientResponse {
        pub fn new_test(id: u64, status: ClientStatus, due_date: Option<NaiveDate>) -> Self {
            ClientResponse {
                id,
                gym_id: 1,
                first_name: "Jon".to_owned(),
                last_name: Some("Doe".to_owned()),
                phone: Some("8888-1234".to_owned()),
                email: Some("jon.doe@example.com".to_owned()),
                status,
                registered_at: NaiveDate::from_ymd_opt(2024, 1, 2)
                    .and_then(|date| date.and_hms_opt(9, 30, 0)),
                membership_start_date: None,
                due_date,
                notes: None,
            }
        }

        pub fn with_names(mut self, first_name: &str, last_name: Option<&str>) -> Self {
            self.first_name = first_name.to_owned();
            self.last_name = last_name.map(str::to_owned);
            self
        }

        pub fn with_phone(mut self, phone: Option<&str>) -> Self {
            self.phone = phone.map(str::to_owned);
            self
        }

        pub fn with_email(mut self, email: Option<&str>) -> Self {
            self.email = email.map(str::to_owned);
            self
        }

        pub fn with_membership_start_date(mut self, start_date: Option<NaiveDate>) -> Self {
            self.membership_start_date = start_date;
            self
        }

        pub fn with_registered_at(mut self, registered_at: Option<NaiveDateTime>) -> Self {
            self.registered_at = registered_at;
            self
        }

        pub fn with_notes(mut self, notes: Option<&str>) -> Self {
            self.notes = notes.map(str::to_owned);
            self
        }
    }

    pub const CLIENT_AS_JSON: &str = r#"{"id":42,"gymId":1,"nombre":"Jon","apellido":"Doe","telefono":"8888-1234","email":"jon.doe@example.com","estado":"ACTIVO","fechaRegistro":"2024-01-02T09:30:00","fechaInicioMembresia":null,"fechaVencimiento":"2024-03-05","notas":null}"#;

    #[test]
    fn should_deserialize_client() {
        let expected_client = ClientResponse::new_test(
            42,
            ClientStatus::Active,
            NaiveDate::from_ymd_opt(2024, 3, 5),
        );
        let client: ClientResponse = serde_json::from_str(CLIENT_AS_JSON).unwrap();
        assert_eq!(expected_client, client);
    }

    #[test]
    fn should_deserialize_client_with_missing_optional_fields() {
        let json = r#"{"id":7,"gymId":1,"nombre":"Jonette","estado":"INACTIVO"}"#;
        let client: ClientResponse = serde_json::from_str(json).unwrap();
        assert_eq!("Jonette", client.full_name());
        assert_eq!(&None, client.due_date());
        assert_eq!(&None, client.registered_at());
    }

    #[test]
    fn should_not_deserialize_malformed_due_date() {
        let json = r#"{"id":7,"gymId":1,"nombre":"Jonette","estado":"ACTIVO","fechaVencimiento":"05/03/2024"}"#;
        let result: Result<ClientResponse, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn should_derive_membership_status() {
        use crate::membership_status::MembershipStatus::{Expired, ExpiringSoon};

        let now = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let client = ClientResponse::new_test(
            1,
            ClientStatus::Active,
            NaiveDate::from_ymd_opt(2024, 3, 4),
        );
        assert_eq!(ExpiringSoon, client.membership_status(&now));

        let client = ClientResponse::new_test(
            1,
            ClientStatus::Delinquent,
            NaiveDate::from_ymd_opt(2024, 6, 4),
        );
        assert_eq!(Expired, client.membership_status(&now));
    }

    #[test]
    fn should_serialize_create_request_without_empty_fields() {
        let request = ClientCreateRequest::new("Jon".to_owned(), None, None, None, None);
        assert_eq!(r#"{"nombre":"Jon"}"#, serde_json::to_string(&request).unwrap());
    }

    #[test]
    fn should_serialize_update_request() {
        let request = ClientUpdateRequest::default()
            .with_contact(Some("8888-1234".to_owned()), None)
            .with_status(ClientStatus::Inactive);
        assert_eq!(
            r#"{"telefono":"8888-1234","estado":"INACTIVO"}"#,
            serde_json::to_string(&request).unwrap()
        );
    }
}
