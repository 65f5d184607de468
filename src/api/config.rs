use crate::tools::env_args::retrieve_arg_value;
use derive_getters::Getters;
use std::env;

const API_URL_ARG: &str = "--api-url";
const API_URL_ENV_VAR: &str = "GYM_API_BASE_URL";
const DEFAULT_API_URL: &str = "http://localhost:8080";
const TOKEN_ARG: &str = "--token";
const BACKUP_TOKEN_ARG: &str = "--backup-token";
const BACKUP_TOKEN_ENV_VAR: &str = "GYM_BACKUP_TOKEN";

#[derive(Debug, Getters, PartialEq)]
pub struct ApiConfig {
    base_url: String,
    token: Option<String>,
    backup_token: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: String, token: Option<String>, backup_token: Option<String>) -> Self {
        Self {
            base_url,
            token,
            backup_token,
        }
    }

    /// Build the configuration from the args, then the environment.
    /// `stored_token` is used when no token is passed explicitly.
    pub fn retrieve(stored_token: Option<String>) -> Self {
        let base_url = retrieve_arg_value(API_URL_ARG)
            .or_else(|| env::var(API_URL_ENV_VAR).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let token = retrieve_arg_value(TOKEN_ARG).or(stored_token);
        let backup_token = retrieve_arg_value(BACKUP_TOKEN_ARG)
            .or_else(|| env::var(BACKUP_TOKEN_ENV_VAR).ok())
            .map(|token| token.trim().to_owned())
            .filter(|token| !token.is_empty());

        Self::new(base_url, token, backup_token)
    }
}
