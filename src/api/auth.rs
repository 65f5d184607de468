use crate::api::{ApiClient, Result};
use derive_getters::Getters;
use reqwest::Method;
use serde::{Deserialize, Serialize};

const LOGIN_PATH: &str = "/api/auth/login";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Getters, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    token: String,
    token_type: String,
    expires_at: String,
}

pub async fn login(api: &ApiClient, username: &str, password: &str) -> Result<LoginResponse> {
    let response: LoginResponse = api
        .send(
            Method::POST,
            LOGIN_PATH,
            &LoginRequest { username, password },
        )
        .await?;
    info!("Logged in as {username} [expires at: {}]", response.expires_at);
    Ok(response)
}
