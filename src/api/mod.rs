use crate::api::error::ApiError;
use crate::api::error::ApiError::{ConnectionFailed, MalformedResponse, RequestFailed, Unauthorized};
use crate::tools::log_message_and_return;
use derive_getters::Getters;
use dto::client::ClientResponse;
use dto::measurement::MeasurementResponse;
use dto::page::Page;
use dto::payment::PaymentResponse;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub mod auth;
pub mod backup;
pub mod clients;
pub mod config;
pub mod error;
pub mod measurements;
pub mod payments;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Typed access to the gym backend.
#[derive(Debug, Clone, Getters)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(client: Client, base_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder, method: &Method, path: &str) -> Result<Response> {
        let response = request.send().await.map_err(log_message_and_return(
            "Can't reach the backend",
            ConnectionFailed {
                method: method.to_string(),
                path: path.to_owned(),
            },
        ))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("Backend refused the credentials [{method} {path}: {status}]");
            Err(Unauthorized {
                method: method.to_string(),
                path: path.to_owned(),
                status: status.as_u16(),
            })
        } else {
            error!("Backend request failed [{method} {path}: {status}]\n{body}");
            Err(RequestFailed {
                method: method.to_string(),
                path: path.to_owned(),
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response, method: &Method, path: &str) -> Result<T> {
        let malformed = || MalformedResponse {
            method: method.to_string(),
            path: path.to_owned(),
        };
        let text = response
            .text()
            .await
            .map_err(log_message_and_return("Can't read backend response", malformed()))?;
        serde_json::from_str(&text)
            .map_err(log_message_and_return("Can't deserialize backend response", malformed()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .execute(self.request(Method::GET, path), &Method::GET, path)
            .await?;
        Self::read_json(response, &Method::GET, path).await
    }

    pub async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method.clone(), path).json(body);
        let response = self.execute(request, &method, path).await?;
        Self::read_json(response, &method, path).await
    }

    /// Send a request without body, ignoring whatever the backend answers.
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<()> {
        self.execute(self.request(method.clone(), path), &method, path)
            .await
            .map(|_| ())
    }

    pub async fn download(&self, path: &str) -> Result<Vec<u8>> {
        let response = self
            .execute(self.request(Method::GET, path), &Method::GET, path)
            .await?;
        let bytes = response.bytes().await.map_err(log_message_and_return(
            "Can't download file",
            MalformedResponse {
                method: Method::GET.to_string(),
                path: path.to_owned(),
            },
        ))?;
        Ok(bytes.to_vec())
    }
}

fn warn_if_truncated<T>(page: &Page<T>, what: &str) {
    if page.is_truncated() {
        warn!(
            "Only {} {what} out of {} have been loaded.",
            page.content().len(),
            page.total_elements()
        );
    }
}

/// Everything the console works on, loaded in one go.
#[derive(Debug, Getters)]
pub struct GymData {
    clients: Vec<ClientResponse>,
    payments: Vec<PaymentResponse>,
    measurements: Vec<MeasurementResponse>,
}

pub async fn load_all(api: &ApiClient) -> Result<GymData> {
    let (clients, payments, measurements) = tokio::try_join!(
        clients::list_clients(api),
        payments::list_payments(api),
        measurements::list_measurements(api),
    )?;
    info!(
        "Loaded {} clients, {} payments and {} measurements.",
        clients.len(),
        payments.len(),
        measurements.len()
    );

    Ok(GymData {
        clients,
        payments,
        measurements,
    })
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::tools::web::build_client;
    use dto::client::tests::CLIENT_AS_JSON;
    use dto::measurement::tests::MEASUREMENT_AS_JSON;
    use dto::payment::tests::PAYMENT_AS_JSON;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub fn api_client(mock_server: &MockServer) -> ApiClient {
        ApiClient::new(build_client().unwrap(), &mock_server.uri(), Some("token".to_owned()))
    }

    pub fn page_of(elements: &[&str]) -> String {
        format!(
            r#"{{"content":[{}],"number":0,"size":200,"totalElements":{},"totalPages":1}}"#,
            elements.join(","),
            elements.len()
        )
    }

    pub async fn mount_listings(mock_server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/clients"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page_of(&[CLIENT_AS_JSON])))
            .mount(mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/payments"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page_of(&[PAYMENT_AS_JSON])))
            .mount(mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/measurements"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(page_of(&[MEASUREMENT_AS_JSON])),
            )
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn should_load_all() {
        let mock_server = MockServer::start().await;
        mount_listings(&mock_server).await;

        let data = load_all(&api_client(&mock_server)).await.unwrap();

        assert_eq!(1, data.clients().len());
        assert_eq!(1, data.payments().len());
        assert_eq!(1, data.measurements().len());
    }

    #[tokio::test]
    async fn should_send_bearer_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .and(header("Authorization", "Bearer token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("true"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result: bool = api_client(&mock_server).get("/api/ping").await.unwrap();

        assert!(result);
    }

    #[tokio::test]
    async fn should_fail_as_unauthorized() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let error = api_client(&mock_server)
            .get::<bool>("/api/ping")
            .await
            .unwrap_err();

        assert_eq!(
            Unauthorized {
                method: "GET".to_owned(),
                path: "/api/ping".to_owned(),
                status: 403
            },
            error
        );
    }

    #[tokio::test]
    async fn should_fail_with_backend_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let error = api_client(&mock_server)
            .get::<bool>("/api/ping")
            .await
            .unwrap_err();

        assert_eq!(
            RequestFailed {
                method: "GET".to_owned(),
                path: "/api/ping".to_owned(),
                status: 500,
                body: "boom".to_owned()
            },
            error
        );
    }

    #[tokio::test]
    async fn should_fail_when_response_is_malformed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;

        let error = api_client(&mock_server)
            .get::<bool>("/api/ping")
            .await
            .unwrap_err();

        assert_eq!(
            MalformedResponse {
                method: "GET".to_owned(),
                path: "/api/ping".to_owned()
            },
            error
        );
    }

    #[tokio::test]
    async fn should_fail_when_backend_is_unreachable() {
        let api = ApiClient::new(build_client().unwrap(), "http://127.0.0.1:1/", None);

        let error = api.get::<bool>("/api/ping").await.unwrap_err();

        assert_eq!(
            ConnectionFailed {
                method: "GET".to_owned(),
                path: "/api/ping".to_owned()
            },
            error
        );
    }

    #[test]
    fn should_trim_trailing_slash_from_base_url() {
        let api = ApiClient::new(build_client().unwrap(), "http://localhost:8080/", None);
        assert_eq!("http://localhost:8080", api.base_url());
    }
}
