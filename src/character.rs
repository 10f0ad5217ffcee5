//! Character records as served by the character API
//!
//! Records are immutable once fetched. Fields the browser does not display
//! are kept in `extra` so a stored favorite is a faithful copy.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable character identifier (`_id` in the API)
pub type CharacterId = u32;

/// A single character record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(rename = "_id")]
    pub id: CharacterId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub tv_shows: Vec<String>,
    #[serde(default)]
    pub video_games: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Everything else the API sent (allies, park attractions, timestamps...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Character {
    /// Minimal record, mostly useful for tests and fixtures
    pub fn new(id: CharacterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: None,
            films: Vec::new(),
            tv_shows: Vec::new(),
            video_games: Vec::new(),
            source_url: None,
            extra: Map::new(),
        }
    }
}

/// Paging metadata returned alongside the records
///
/// Only decoded for logging; the browser loads the first page and stops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub count: u32,
    pub total_pages: u32,
    pub previous_page: Option<String>,
    pub next_page: Option<String>,
}

/// `data` is a list, except when the API matches exactly one record
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Character>),
    One(Box<Character>),
}

/// Top-level API response
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterPage {
    #[serde(default)]
    pub info: PageInfo,
    data: OneOrMany,
}

impl CharacterPage {
    /// Consume the page, yielding its records in API order
    pub fn into_characters(self) -> Vec<Character> {
        match self.data {
            OneOrMany::Many(list) => list,
            OneOrMany::One(single) => vec![*single],
        }
    }
}
