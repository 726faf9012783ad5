//! Shared data model types used by both native and web runtimes.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical identifier of a catalog entry: `head` followed by `tail`.
///
/// This is the only key used for persistence and lookup. The string form is
/// exactly what the stored selection arrays contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmiiboId(String);

impl AmiiboId {
    /// Builds the id from its two halves. Returns `None` when either half is blank.
    pub fn from_parts(head: &str, tail: &str) -> Option<Self> {
        if head.trim().is_empty() || tail.trim().is_empty() {
            return None;
        }
        Some(Self(format!("{head}{tail}")))
    }

    /// Rebuilds an id read back from durable storage.
    pub fn from_stored(raw: String) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AmiiboId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry as served by the remote API, before ingestion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawItem {
    pub head: String,
    pub tail: String,
    pub name: String,
    pub character: String,
    pub game_series: String,
    pub amiibo_series: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub image: String,
    /// Region code to release date. Values are frequently `null` upstream.
    pub release: Option<BTreeMap<String, Option<String>>>,
}

/// Root object of the collection endpoint (`{"amiibo": [...]}`).
#[derive(Debug, Default, Deserialize)]
pub struct CatalogResponse {
    /// Absent and `null` both mean an empty catalog.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub amiibo: Vec<RawItem>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RawItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawItem>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A validated catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: AmiiboId,
    pub head: String,
    pub tail: String,
    pub name: String,
    pub character: String,
    pub game_series: String,
    pub amiibo_series: String,
    pub item_type: String,
    pub image: String,
    pub release: BTreeMap<String, Option<String>>,
}

impl Item {
    /// Converts a raw API entry, rejecting it when the composite id cannot be formed.
    pub fn from_raw(raw: RawItem) -> Option<Self> {
        let id = AmiiboId::from_parts(&raw.head, &raw.tail)?;
        Some(Self {
            id,
            head: raw.head,
            tail: raw.tail,
            name: raw.name,
            character: raw.character,
            game_series: raw.game_series,
            amiibo_series: raw.amiibo_series,
            item_type: raw.item_type,
            image: raw.image,
            release: raw.release.unwrap_or_default(),
        })
    }

    /// Release date for `region`, if the API reported a non-empty one.
    pub fn release_in(&self, region: &str) -> Option<&str> {
        self.release
            .get(region)
            .and_then(|date| date.as_deref())
            .filter(|date| !date.trim().is_empty())
    }
}

#[cfg(test)]
pub(crate) fn test_item(name: &str, head: &str, tail: &str, item_type: &str) -> Item {
    Item {
        id: AmiiboId::from_parts(head, tail).expect("valid test id"),
        head: head.to_string(),
        tail: tail.to_string(),
        name: name.to_string(),
        character: name.to_string(),
        game_series: "Super Mario".to_string(),
        amiibo_series: "Super Mario Bros.".to_string(),
        item_type: item_type.to_string(),
        image: format!("https://example.invalid/{head}{tail}.png"),
        release: BTreeMap::new(),
    }
}
