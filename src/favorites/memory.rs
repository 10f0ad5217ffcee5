//! In-process favorites backend for native builds and tests

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use super::StoreConfig;
use crate::character::{Character, CharacterId};
use crate::error::StoreError;

type Table = Rc<RefCell<BTreeMap<CharacterId, Character>>>;

thread_local! {
    /// Tables by "db/store", outliving individual store handles
    static TABLES: RefCell<HashMap<String, Table>> = RefCell::new(HashMap::new());
}

pub struct MemoryBackend {
    table: Table,
}

impl MemoryBackend {
    pub async fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let key = format!("{}/{}", config.db_name, config.store_name);
        let table = TABLES.with(|tables| tables.borrow_mut().entry(key).or_default().clone());
        Ok(Self { table })
    }

    pub fn close(&self) {}

    pub async fn add(&self, character: &Character) -> Result<(), StoreError> {
        let mut table = self.table.borrow_mut();
        if table.contains_key(&character.id) {
            return Err(StoreError::DuplicateKey(character.id));
        }
        table.insert(character.id, character.clone());
        Ok(())
    }

    pub async fn remove(&self, id: CharacterId) -> Result<(), StoreError> {
        self.table.borrow_mut().remove(&id);
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<Character>, StoreError> {
        Ok(self.table.borrow().values().cloned().collect())
    }

    pub async fn get(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        Ok(self.table.borrow().get(&id).cloned())
    }
}
