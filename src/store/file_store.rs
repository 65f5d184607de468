use crate::store::error::StoreError;
use crate::store::error::StoreError::{CantReadStore, CantWriteStore};
use crate::store::Store;
use crate::tools::log_message_and_return;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_PATH: &str = "data/store.json";

/// Store backed by a single JSON file.
/// Changes stay in memory until `persist` is called.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl FileStore {
    /// Open the store at `path`.
    /// A missing file gives an empty store, as does a file that isn't a JSON object.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Store file is malformed, starting afresh [path: {path:?}]\n{e:#?}");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No store file yet [path: {path:?}]");
                BTreeMap::new()
            }
            Err(e) => {
                error!("Can't read store file [path: {path:?}]\n{e:#?}");
                return Err(CantReadStore(path.display().to_string()));
            }
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for FileStore {
    fn get_raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn set_raw(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn persist(&self) -> Result<(), StoreError> {
        let path = self.path.display().to_string();
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(log_message_and_return(
                "Can't create store folder",
                CantWriteStore(path.clone()),
            ))?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)
            .map_err(log_message_and_return("Can't write store file", CantWriteStore(path)))
    }
}
