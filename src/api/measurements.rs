use crate::api::{ApiClient, Result, warn_if_truncated};
use dto::measurement::{MeasurementCreateRequest, MeasurementResponse};
use dto::page::Page;
use reqwest::Method;

const MEASUREMENTS_PATH: &str = "/api/measurements";
const LIST_QUERY: &str = "page=0&size=500&sort=fecha,desc";

pub async fn list_measurements(api: &ApiClient) -> Result<Vec<MeasurementResponse>> {
    let page: Page<MeasurementResponse> = api
        .get(&format!("{MEASUREMENTS_PATH}?{LIST_QUERY}"))
        .await?;
    warn_if_truncated(&page, "measurements");
    Ok(page.into_content())
}

pub async fn create_measurement(
    api: &ApiClient,
    request: &MeasurementCreateRequest,
) -> Result<MeasurementResponse> {
    api.send(Method::POST, MEASUREMENTS_PATH, request).await
}

pub async fn delete_measurement(api: &ApiClient, id: u64) -> Result<()> {
    api.send_empty(Method::DELETE, &format!("{MEASUREMENTS_PATH}/{id}"))
        .await
}

/// PDF report of every measurement of a client, rendered by the backend.
pub async fn download_client_report(api: &ApiClient, client_id: u64) -> Result<Vec<u8>> {
    api.download(&format!("{MEASUREMENTS_PATH}/report/pdf?clientId={client_id}"))
        .await
}

/// PDF report of a single measurement.
pub async fn download_measurement_report(api: &ApiClient, id: u64) -> Result<Vec<u8>> {
    api.download(&format!("{MEASUREMENTS_PATH}/{id}/report/pdf"))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{api_client, page_of};
    use chrono::NaiveDate;
    use dto::measurement::BodyMeasurements;
    use dto::measurement::tests::MEASUREMENT_AS_JSON;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PDF_CONTENT: &[u8] = b"%PDF-1.4 fake";

    #[tokio::test]
    async fn should_list_measurements() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(MEASUREMENTS_PATH))
            .and(query_param("size", "500"))
            .and(query_param("sort", "fecha,desc"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(page_of(&[MEASUREMENT_AS_JSON])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let measurements = list_measurements(&api_client(&mock_server)).await.unwrap();

        assert_eq!(1, measurements.len());
        assert_eq!(&5, measurements[0].id());
    }

    #[tokio::test]
    async fn should_create_measurement() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MEASUREMENTS_PATH))
            .respond_with(ResponseTemplate::new(201).set_body_string(MEASUREMENT_AS_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;
        let request = MeasurementCreateRequest::new(
            42,
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            BodyMeasurements::new_test(80.0, 180.0),
        );

        let measurement = create_measurement(&api_client(&mock_server), &request)
            .await
            .unwrap();

        assert_eq!(&42, measurement.client_id());
    }

    #[tokio::test]
    async fn should_delete_measurement() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/measurements/5"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        assert_eq!(Ok(()), delete_measurement(&api_client(&mock_server), 5).await);
    }

    #[tokio::test]
    async fn should_download_client_report() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/measurements/report/pdf"))
            .and(query_param("clientId", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_CONTENT))
            .expect(1)
            .mount(&mock_server)
            .await;

        let pdf = download_client_report(&api_client(&mock_server), 42)
            .await
            .unwrap();

        assert_eq!(PDF_CONTENT, pdf.as_slice());
    }

    #[tokio::test]
    async fn should_download_measurement_report() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/measurements/5/report/pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_CONTENT))
            .expect(1)
            .mount(&mock_server)
            .await;

        let pdf = download_measurement_report(&api_client(&mock_server), 5)
            .await
            .unwrap();

        assert_eq!(PDF_CONTENT, pdf.as_slice());
    }
}
