//! IndexedDB favorites backend
//!
//! Each operation runs in its own transaction. Request callbacks are bridged
//! to futures through a `Promise`, so a call returns only after the browser
//! has acknowledged the request.

use js_sys::{Array, JSON, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    DomException, IdbDatabase, IdbObjectStore, IdbObjectStoreParameters, IdbOpenDbRequest,
    IdbRequest, IdbTransactionMode,
};

use super::StoreConfig;
use crate::character::{Character, CharacterId};
use crate::consts::FAVORITES_KEY_PATH;
use crate::error::StoreError;

pub struct IdbBackend {
    db: IdbDatabase,
    store_name: String,
}

impl IdbBackend {
    pub async fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let factory = web_sys::window()
            .and_then(|w| w.indexed_db().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)?;

        let request = factory
            .open_with_u32(&config.db_name, config.db_version)
            .map_err(request_error)?;

        // Schema creation: one object store keyed by character id
        {
            let req = request.clone();
            let store_name = config.store_name.clone();
            let on_upgrade = Closure::once_into_js(move |_event: web_sys::IdbVersionChangeEvent| {
                if let Err(err) = create_schema(&req, &store_name) {
                    log::error!("Favorites schema upgrade failed: {}", describe(&err));
                }
            });
            request.set_onupgradeneeded(Some(on_upgrade.unchecked_ref()));
        }

        let db = settle(&request)
            .await
            .map_err(request_error)?
            .dyn_into::<IdbDatabase>()
            .map_err(|_| StoreError::Request("open did not yield a database".to_string()))?;

        Ok(Self {
            db,
            store_name: config.store_name.clone(),
        })
    }

    pub fn close(&self) {
        self.db.close();
    }

    pub async fn add(&self, character: &Character) -> Result<(), StoreError> {
        let value = JSON::parse(&serde_json::to_string(character)?).map_err(request_error)?;
        let request = self
            .object_store(IdbTransactionMode::Readwrite)?
            .add(&value)
            .map_err(request_error)?;

        match settle(&request).await {
            Ok(_) => Ok(()),
            Err(err) if is_constraint_error(&err) => Err(StoreError::DuplicateKey(character.id)),
            Err(err) => Err(request_error(err)),
        }
    }

    pub async fn remove(&self, id: CharacterId) -> Result<(), StoreError> {
        let request = self
            .object_store(IdbTransactionMode::Readwrite)?
            .delete(&key(id))
            .map_err(request_error)?;
        settle(&request).await.map_err(request_error)?;
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<Character>, StoreError> {
        let request = self
            .object_store(IdbTransactionMode::Readonly)?
            .get_all()
            .map_err(request_error)?;
        let result = settle(&request).await.map_err(request_error)?;

        Array::from(&result).iter().map(|v| decode(&v)).collect()
    }

    pub async fn get(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        let request = self
            .object_store(IdbTransactionMode::Readonly)?
            .get(&key(id))
            .map_err(request_error)?;
        let result = settle(&request).await.map_err(request_error)?;

        if result.is_undefined() || result.is_null() {
            Ok(None)
        } else {
            decode(&result).map(Some)
        }
    }

    fn object_store(&self, mode: IdbTransactionMode) -> Result<IdbObjectStore, StoreError> {
        self.db
            .transaction_with_str_and_mode(&self.store_name, mode)
            .and_then(|tx| tx.object_store(&self.store_name))
            .map_err(request_error)
    }
}

fn create_schema(request: &IdbOpenDbRequest, store_name: &str) -> Result<(), JsValue> {
    let db: IdbDatabase = request.result()?.dyn_into()?;
    if db.object_store_names().contains(store_name) {
        return Ok(());
    }

    let params = IdbObjectStoreParameters::new();
    params.set_key_path(&JsValue::from_str(FAVORITES_KEY_PATH));
    db.create_object_store_with_optional_parameters(store_name, &params)?;
    log::info!("Created favorites store '{}'", store_name);
    Ok(())
}

/// Wait for an IDB request to fire `success` (its result) or `error` (its DOMException)
async fn settle(request: &IdbRequest) -> Result<JsValue, JsValue> {
    let promise = Promise::new(&mut |resolve, reject| {
        let req = request.clone();
        let on_success = Closure::once_into_js(move |_event: web_sys::Event| {
            let result = req.result().unwrap_or(JsValue::UNDEFINED);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });

        let req = request.clone();
        let on_error = Closure::once_into_js(move |_event: web_sys::Event| {
            let error = req
                .error()
                .ok()
                .flatten()
                .map(JsValue::from)
                .unwrap_or(JsValue::UNDEFINED);
            let _ = reject.call1(&JsValue::NULL, &error);
        });

        request.set_onsuccess(Some(on_success.unchecked_ref()));
        request.set_onerror(Some(on_error.unchecked_ref()));
    });

    JsFuture::from(promise).await
}

fn key(id: CharacterId) -> JsValue {
    JsValue::from_f64(f64::from(id))
}

fn decode(value: &JsValue) -> Result<Character, StoreError> {
    let json: String = JSON::stringify(value).map_err(request_error)?.into();
    Ok(serde_json::from_str(&json)?)
}

fn is_constraint_error(err: &JsValue) -> bool {
    err.dyn_ref::<DomException>()
        .is_some_and(|e| e.name() == "ConstraintError")
}

fn describe(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<DomException>() {
        format!("{}: {}", e.name(), e.message())
    } else {
        err.as_string().unwrap_or_else(|| format!("{:?}", err))
    }
}

fn request_error(err: JsValue) -> StoreError {
    StoreError::Request(describe(&err))
}
