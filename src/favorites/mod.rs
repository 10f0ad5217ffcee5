//! Favorites store
//!
//! A thin key-value wrapper over one collection of [`Character`] copies,
//! keyed by character id. The backend is chosen at compile time:
//! - wasm32: IndexedDB (survives across sessions, origin-scoped)
//! - native: in-process table shared by every store opened under the same
//!   database name on the current thread
//!
//! Lifecycle: construct with a [`StoreConfig`], `open()` once (idempotent),
//! `close()` on teardown. Every other call fails with [`StoreError::NotOpen`]
//! outside that window.

#[cfg(target_arch = "wasm32")]
mod idb;
#[cfg(not(target_arch = "wasm32"))]
mod memory;

use std::cell::RefCell;
use std::rc::Rc;

use crate::character::{Character, CharacterId};
use crate::consts::*;
use crate::error::StoreError;

#[cfg(target_arch = "wasm32")]
use idb::IdbBackend as Backend;
#[cfg(not(target_arch = "wasm32"))]
use memory::MemoryBackend as Backend;

/// Where favorites live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Database name
    pub db_name: String,
    /// Schema version; bumping it re-runs schema creation
    pub db_version: u32,
    /// Collection inside the database
    pub store_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_name: FAVORITES_DB_NAME.to_string(),
            db_version: FAVORITES_DB_VERSION,
            store_name: FAVORITES_STORE_NAME.to_string(),
        }
    }
}

/// Handle to the favorites collection
///
/// Methods take `&self` so one store can be shared (`Rc`) between the card
/// toggles of a render pass.
pub struct FavoritesStore {
    config: StoreConfig,
    backend: RefCell<Option<Rc<Backend>>>,
}

impl FavoritesStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            backend: RefCell::new(None),
        }
    }

    pub fn is_open(&self) -> bool {
        self.backend.borrow().is_some()
    }

    /// Open the database, creating the collection on first use
    pub async fn open(&self) -> Result<(), StoreError> {
        if self.is_open() {
            return Ok(());
        }

        let backend = Backend::open(&self.config).await?;

        // A concurrent open may have finished first; keep the earlier handle.
        let mut slot = self.backend.borrow_mut();
        if slot.is_none() {
            *slot = Some(Rc::new(backend));
            log::info!(
                "Favorites database '{}' v{} opened",
                self.config.db_name,
                self.config.db_version
            );
        }
        Ok(())
    }

    /// Drop the database handle
    pub fn close(&self) {
        if let Some(backend) = self.backend.borrow_mut().take() {
            backend.close();
            log::info!("Favorites database '{}' closed", self.config.db_name);
        }
    }

    /// Store a copy of `character`; fails with `DuplicateKey` if its id is taken
    pub async fn add(&self, character: &Character) -> Result<(), StoreError> {
        self.handle()?.add(character).await?;
        log::info!("Added '{}' ({}) to favorites", character.name, character.id);
        Ok(())
    }

    /// Delete the favorite with `id`; absent ids are not an error
    pub async fn remove(&self, id: CharacterId) -> Result<(), StoreError> {
        self.handle()?.remove(id).await?;
        log::info!("Removed {} from favorites", id);
        Ok(())
    }

    /// Every stored favorite, in no particular order
    pub async fn get_all(&self) -> Result<Vec<Character>, StoreError> {
        self.handle()?.get_all().await
    }

    pub async fn get_by_id(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        self.handle()?.get(id).await
    }

    /// Whether `id` is currently a favorite
    pub async fn contains(&self, id: CharacterId) -> Result<bool, StoreError> {
        Ok(self.get_by_id(id).await?.is_some())
    }

    /// Clone the backend out of the cell so no borrow is held across `.await`
    fn handle(&self) -> Result<Rc<Backend>, StoreError> {
        self.backend.borrow().clone().ok_or(StoreError::NotOpen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn store(name: &str) -> FavoritesStore {
        FavoritesStore::new(StoreConfig {
            db_name: name.to_string(),
            ..StoreConfig::default()
        })
    }

    fn opened(name: &str) -> FavoritesStore {
        let store = store(name);
        block_on(store.open()).unwrap();
        store
    }

    #[test]
    fn test_add_then_get_all_contains_once() {
        let store = opened("add_once");
        block_on(store.add(&Character::new(12, "Mulan"))).unwrap();

        let all = block_on(store.get_all()).unwrap();
        assert_eq!(all.iter().filter(|c| c.id == 12).count(), 1);
    }

    #[test]
    fn test_duplicate_add_fails() {
        let store = opened("dup");
        let mulan = Character::new(12, "Mulan");
        block_on(store.add(&mulan)).unwrap();

        let err = block_on(store.add(&mulan)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(12)));
        assert_eq!(block_on(store.get_all()).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let store = opened("remove_missing");
        assert!(block_on(store.remove(999)).is_ok());
    }

    #[test]
    fn test_remove_after_add() {
        let store = opened("remove_after_add");
        block_on(store.add(&Character::new(1, "Achilles"))).unwrap();
        block_on(store.add(&Character::new(2, "Abigail"))).unwrap();
        block_on(store.remove(1)).unwrap();

        let ids: Vec<_> = block_on(store.get_all())
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![2]);
        assert!(!block_on(store.contains(1)).unwrap());
    }

    #[test]
    fn test_get_by_id() {
        let store = opened("get_by_id");
        let mut abu = Character::new(7, "Abu");
        abu.films.push("Aladdin".to_string());
        block_on(store.add(&abu)).unwrap();

        assert_eq!(block_on(store.get_by_id(7)).unwrap(), Some(abu));
        assert_eq!(block_on(store.get_by_id(8)).unwrap(), None);
    }

    #[test]
    fn test_not_open() {
        let store = store("never_opened");
        assert!(!store.is_open());
        assert!(matches!(
            block_on(store.add(&Character::new(1, "Achilles"))),
            Err(StoreError::NotOpen)
        ));
        assert!(matches!(block_on(store.remove(1)), Err(StoreError::NotOpen)));
        assert!(matches!(block_on(store.get_all()), Err(StoreError::NotOpen)));
        assert!(matches!(block_on(store.get_by_id(1)), Err(StoreError::NotOpen)));
    }

    #[test]
    fn test_open_is_idempotent() {
        let store = opened("idempotent");
        block_on(store.add(&Character::new(3, "Ariel"))).unwrap();
        block_on(store.open()).unwrap();

        assert!(store.is_open());
        assert_eq!(block_on(store.get_all()).unwrap().len(), 1);
    }

    #[test]
    fn test_close_then_reopen_keeps_records() {
        let store = opened("reopen");
        block_on(store.add(&Character::new(4, "Baloo"))).unwrap();
        store.close();
        assert!(matches!(block_on(store.get_all()), Err(StoreError::NotOpen)));

        let again = opened("reopen");
        assert!(block_on(again.contains(4)).unwrap());
    }

    #[test]
    fn test_databases_are_isolated_by_name() {
        let a = opened("isolated_a");
        let b = opened("isolated_b");
        block_on(a.add(&Character::new(5, "Belle"))).unwrap();

        assert!(block_on(b.get_all()).unwrap().is_empty());
    }
}
