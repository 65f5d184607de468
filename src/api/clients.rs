use crate::api::{ApiClient, Result, warn_if_truncated};
use dto::client::{ClientCreateRequest, ClientResponse, ClientUpdateRequest};
use dto::page::Page;
use reqwest::Method;

const CLIENTS_PATH: &str = "/api/clients";
const LIST_QUERY: &str = "page=0&size=200&sort=fechaRegistro,desc";

pub async fn list_clients(api: &ApiClient) -> Result<Vec<ClientResponse>> {
    let page: Page<ClientResponse> = api.get(&format!("{CLIENTS_PATH}?{LIST_QUERY}")).await?;
    warn_if_truncated(&page, "clients");
    Ok(page.into_content())
}

pub async fn get_client(api: &ApiClient, id: u64) -> Result<ClientResponse> {
    api.get(&format!("{CLIENTS_PATH}/{id}")).await
}

pub async fn create_client(api: &ApiClient, request: &ClientCreateRequest) -> Result<ClientResponse> {
    let client: ClientResponse = api.send(Method::POST, CLIENTS_PATH, request).await?;
    info!("Client created [id: {}]", client.id());
    Ok(client)
}

pub async fn update_client(
    api: &ApiClient,
    id: u64,
    request: &ClientUpdateRequest,
) -> Result<ClientResponse> {
    api.send(Method::PUT, &format!("{CLIENTS_PATH}/{id}"), request)
        .await
}

pub async fn delete_client(api: &ApiClient, id: u64) -> Result<()> {
    api.send_empty(Method::DELETE, &format!("{CLIENTS_PATH}/{id}"))
        .await?;
    info!("Client deleted [id: {id}]");
    Ok(())
}

/// Ask the backend to send the reminder itself.
pub async fn send_reminder(api: &ApiClient, id: u64) -> Result<()> {
    api.send_empty(Method::POST, &format!("{CLIENTS_PATH}/{id}/reminder"))
        .await
}
