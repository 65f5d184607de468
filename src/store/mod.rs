use crate::store::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod error;
pub mod file_store;
pub mod memory_store;

type Result<T, E = StoreError> = std::result::Result<T, E>;

pub const CLIENT_EXTRAS_KEY: &str = "mastergym-client-extras";
pub const LAST_BACKUP_KEY: &str = "mastergym-last-backup";
pub const AUTH_TOKEN_KEY: &str = "mastergym.authToken";

/// Key-value store for the data the console keeps on its side of the backend.
/// Values are JSON documents; typed access goes through `read` and `write`.
pub trait Store {
    fn get_raw(&self, key: &str) -> Option<&Value>;
    fn set_raw(&mut self, key: &str, value: Value);
    fn remove(&mut self, key: &str);

    /// Make the current state durable, if the store supports it.
    fn persist(&self) -> Result<()> {
        Ok(())
    }

    /// Read a value. A value that can't be read as `T` is treated as missing.
    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        let value = self.get_raw(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring malformed value in store [key: {key}]\n{e:#?}");
                None
            }
        }
    }

    fn read_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T
    where
        Self: Sized,
    {
        self.read(key).unwrap_or(fallback)
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let value = serde_json::to_value(value)?;
        self.set_raw(key, value);
        Ok(())
    }
}
