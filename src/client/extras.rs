use crate::store::error::StoreError;
use crate::store::{CLIENT_EXTRAS_KEY, Store};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Deref;

/// Data about a client the backend does not keep.
#[derive(Debug, Clone, Default, Eq, PartialEq, Getters, Serialize, Deserialize)]
pub struct ClientExtras {
    #[serde(rename = "contactoEmergencia", default, skip_serializing_if = "Option::is_none")]
    emergency_contact: Option<String>,
}

impl ClientExtras {
    pub fn new(emergency_contact: Option<String>) -> Self {
        Self { emergency_contact }
    }
}

/// [ClientExtras] indexed by client id, as persisted in the store.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientExtrasMap {
    extras: BTreeMap<String, ClientExtras>,
}

impl Deref for ClientExtrasMap {
    type Target = BTreeMap<String, ClientExtras>;

    fn deref(&self) -> &Self::Target {
        &self.extras
    }
}

impl ClientExtrasMap {
    pub fn load<S: Store>(store: &S) -> Self {
        store.read_or(CLIENT_EXTRAS_KEY, ClientExtrasMap::default())
    }

    pub fn find(&self, client_id: u64) -> Option<&ClientExtras> {
        self.extras.get(&client_id.to_string())
    }
}

pub fn save_client_extras<S: Store>(
    store: &mut S,
    client_id: u64,
    extras: ClientExtras,
) -> Result<(), StoreError> {
    let mut map = ClientExtrasMap::load(store);
    map.extras.insert(client_id.to_string(), extras);
    store.write(CLIENT_EXTRAS_KEY, &map)
}

pub fn remove_client_extras<S: Store>(store: &mut S, client_id: u64) -> Result<(), StoreError> {
    let mut map = ClientExtrasMap::load(store);
    if map.extras.remove(&client_id.to_string()).is_some() {
        debug!("Client extras removed [client: {client_id}]");
        store.write(CLIENT_EXTRAS_KEY, &map)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory_store::MemoryStore;
    use serde_json::json;

    #[test]
    fn should_save_and_load_extras() {
        let mut store = MemoryStore::default();
        let extras = ClientExtras::new(Some("Jonette Doe 8888-0000".to_owned()));

        save_client_extras(&mut store, 42, extras.clone()).unwrap();

        let map = ClientExtrasMap::load(&store);
        assert_eq!(Some(&extras), map.find(42));
        assert_eq!(None, map.find(7));
    }

    #[test]
    fn should_store_extras_keyed_by_client_id() {
        let mut store = MemoryStore::default();

        save_client_extras(&mut store, 42, ClientExtras::new(Some("Jonette".to_owned()))).unwrap();

        assert_eq!(
            Some(&json!({"42": {"contactoEmergencia": "Jonette"}})),
            store.get_raw(CLIENT_EXTRAS_KEY)
        );
    }

    #[test]
    fn should_remove_extras() {
        let mut store = MemoryStore::default();
        save_client_extras(&mut store, 42, ClientExtras::new(Some("Jonette".to_owned()))).unwrap();
        save_client_extras(&mut store, 7, ClientExtras::default()).unwrap();

        remove_client_extras(&mut store, 42).unwrap();

        let map = ClientExtrasMap::load(&store);
        assert_eq!(None, map.find(42));
        assert!(map.find(7).is_some());
    }

    #[test]
    fn should_ignore_malformed_extras() {
        let mut store = MemoryStore::default();
        store.set_raw(CLIENT_EXTRAS_KEY, json!(["not", "a", "map"]));

        assert!(ClientExtrasMap::load(&store).is_empty());
    }
}
