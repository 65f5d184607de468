mod api;
mod client;
mod command;
mod dashboard;
mod error;
mod reminder;
mod report;
mod store;
mod tools;

#[macro_use]
extern crate log;

use crate::api::ApiClient;
use crate::api::config::ApiConfig;
use crate::command::Console;
use crate::command::args::Command;
use crate::error::{ApplicationError, Result};
use crate::store::file_store::{DEFAULT_STORE_PATH, FileStore};
use crate::store::memory_store::MemoryStore;
use crate::store::{AUTH_TOKEN_KEY, Store};
use crate::tools::env_args::{has_flag, retrieve_arg_value};
use crate::tools::web::build_client;
use chrono::{DateTime, FixedOffset, Local};
use std::process::ExitCode;

const STORE_ARG: &str = "--store";
const EPHEMERAL_FLAG: &str = "--ephemeral";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run().await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#?}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<String> {
    let now = Local::now().fixed_offset();
    let command = Command::from_args(&now.date_naive())?;

    if has_flag(EPHEMERAL_FLAG) {
        debug!("Running without local store.");
        return run_with_store(command, &mut MemoryStore::default(), now).await;
    }

    let store_path = retrieve_arg_value(STORE_ARG).unwrap_or_else(|| DEFAULT_STORE_PATH.to_owned());
    let mut store = FileStore::open(store_path)?;
    debug!("Using store at {}", store.path().display());
    run_with_store(command, &mut store, now).await
}

async fn run_with_store<S: Store>(
    command: Command,
    store: &mut S,
    now: DateTime<FixedOffset>,
) -> Result<String> {
    let config = ApiConfig::retrieve(store.read(AUTH_TOKEN_KEY));
    let api = ApiClient::new(build_client()?, config.base_url(), config.token().clone());

    let result = Console::new(api, config.backup_token().clone(), &mut *store, now)
        .execute(command)
        .await;
    if matches!(&result, Err(ApplicationError::Api(e)) if e.is_unauthorized()) {
        warn!("Session expired, forgetting the stored token.");
        store.remove(AUTH_TOKEN_KEY);
    }
    store.persist()?;

    result
}
