//! Character Browser - a searchable character catalogue with favorites
//!
//! Core modules:
//! - `character`: Entity records and the API envelope
//! - `source`: One-shot fetch of the character list
//! - `filter`: Name search
//! - `favorites`: Favorites store (IndexedDB on web, in-process table on native)
//! - `render`: Card view models and favorite toggle state
//! - `ui`: DOM painting (web only)
//! - `settings`: Configuration with LocalStorage overrides

pub mod character;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod render;
pub mod settings;
pub mod source;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use character::{Character, CharacterId};
pub use error::{SourceError, StoreError};
pub use favorites::{FavoritesStore, StoreConfig};
pub use settings::Settings;

/// Application defaults
pub mod consts {
    /// Character list endpoint
    pub const CHARACTER_API_URL: &str = "https://api.disneyapi.dev/character";

    /// IndexedDB database holding favorites
    pub const FAVORITES_DB_NAME: &str = "favoritesDB";
    pub const FAVORITES_DB_VERSION: u32 = 1;
    /// Object store inside the favorites database
    pub const FAVORITES_STORE_NAME: &str = "favoritesStore";
    /// Key path of favorite records (the character identifier)
    pub const FAVORITES_KEY_PATH: &str = "_id";

    /// Characters never rendered as cards (the API has no usable image for them)
    pub const EXCLUDED_NAMES: &[&str] = &["arabella", "amelia duckworth"];
}
