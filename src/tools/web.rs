use crate::tools::error::Result;
use crate::tools::error::ToolsError::CantCreateClient;
use crate::tools::log_message_and_return;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("gym-console/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn build_client() -> Result<Client> {
    reqwest::ClientBuilder::new()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(log_message_and_return(
            "Can't build HTTP client.",
            CantCreateClient,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_client() {
        assert!(build_client().is_ok());
    }
}
