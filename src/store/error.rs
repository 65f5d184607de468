use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("The store file can't be read [path: {0}]")]
    CantReadStore(String),
    #[error("The store file can't be written [path: {0}]")]
    CantWriteStore(String),
    #[error("A value can't be serialized into the store.")]
    Serialization(#[from] serde_json::Error),
}
