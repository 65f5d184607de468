use crate::api::{ApiClient, Result};
use derive_getters::Getters;
use reqwest::Method;
use serde::Deserialize;

const BACKUP_PATH: &str = "/api/backup";
const BACKUP_TOKEN_HEADER: &str = "X-BACKUP-TOKEN";

#[derive(Debug, Clone, PartialEq, Getters, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupResponse {
    success: bool,
    exit_code: i32,
    #[serde(default)]
    output: Option<String>,
}

/// Trigger a cloud backup on the backend.
/// The backup token is only sent when configured.
pub async fn run_backup(api: &ApiClient, backup_token: Option<&str>) -> Result<BackupResponse> {
    let method = Method::POST;
    let request = api.request(method.clone(), BACKUP_PATH);
    let request = match backup_token {
        Some(token) => request.header(BACKUP_TOKEN_HEADER, token),
        None => request,
    };
    let response = api.execute(request, &method, BACKUP_PATH).await?;
    let backup: BackupResponse = ApiClient::read_json(response, &method, BACKUP_PATH).await?;
    if backup.success {
        info!("Backup completed [exit code: {}]", backup.exit_code);
    } else {
        warn!(
            "Backup failed [exit code: {}]\n{}",
            backup.exit_code,
            backup.output.as_deref().unwrap_or_default()
        );
    }
    Ok(backup)
}
