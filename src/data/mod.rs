//! Game data aggregation.
//!
//! Champion and item data come from two public feeds: Data Dragon (DData),
//! the official static data, and Community Dragon (CData), the extracted
//! game files. Both are fetched for one game version, cleaned, merged and
//! cached as versioned JSON files so later runs work offline.
//!
//! [`GameData::load`] drives the whole pipeline:
//!
//! ```text
//! version -> cache files -> items -> item list -> champions -> champion list
//! ```

pub mod cache;
pub mod champions;
pub mod fetch;
pub mod items;
pub mod recipe;
pub mod versions;

use crate::bonus::StatBonuses;
use crate::champion::Champion;
use crate::config::{DataConfig, Links};
use crate::error::DataError;
use cache::{CacheFiles, JsonCache};
use fetch::Fetch;
use recipe::RecipeGraph;
use serde_json::{Map, Value};

/// Where and for which version the feeds are read.
#[derive(Clone, Copy)]
pub struct Feeds<'a> {
    pub fetcher: &'a dyn Fetch,
    pub config: &'a DataConfig,
    pub version: &'a str,
}

impl<'a> Feeds<'a> {
    pub fn new(fetcher: &'a dyn Fetch, config: &'a DataConfig, version: &'a str) -> Self {
        Self {
            fetcher,
            config,
            version,
        }
    }

    pub fn links(&self) -> &'a Links {
        &self.config.links
    }
}

/// Accept a Data Dragon document only if it answers for `version` and has
/// a `data` section.
pub(crate) fn ddragon_payload(payload: Value, version: &str, what: &str) -> Option<Value> {
    let received = payload.get("version").and_then(Value::as_str).unwrap_or("");
    if received != version {
        let err = DataError::VersionMismatch {
            requested: version.to_string(),
            received: received.to_string(),
        };
        tracing::warn!(error = %err, "discarding Data Dragon {what}");
        return None;
    }
    if payload.get("data").is_none() {
        tracing::warn!(version, "Data Dragon {what} has no data");
        return None;
    }
    Some(payload)
}

/// Merged item and champion data for one game version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameData {
    pub version: String,
    /// Item id to merged item record.
    pub items: Map<String, Value>,
    /// Item id to name.
    pub item_list: Map<String, Value>,
    /// Champion id to merged champion entry.
    pub champions: Map<String, Value>,
    /// Champion id to name.
    pub champion_list: Map<String, Value>,
}

impl GameData {
    /// Resolve the version, then load each dataset from the cache or, when
    /// missing or `update` is set, from the feeds.
    ///
    /// # Errors
    ///
    /// [`DataError::NoVersion`] when no version can be determined, and any
    /// cache write failure. Feed failures only leave datasets empty.
    pub fn load(config: &DataConfig, fetcher: &dyn Fetch, update: bool) -> Result<Self, DataError> {
        let version = versions::check_version(fetcher, &config.links)?;
        tracing::info!(%version, "using game version");

        let files = CacheFiles::for_version(&version);
        let cache = JsonCache::new(&config.cache_dir);
        let feeds = Feeds::new(fetcher, config, &version);

        let items = items::check_items(&cache, &feeds, &files.item_data, update)?;
        let item_list = items::check_item_list(&cache, &files.item_list, &items, update)?;
        let champions = champions::check_champs(&cache, &feeds, &files.champ_data, update)?;
        let champion_list =
            champions::check_champ_list(&cache, &files.champ_list, &champions, update)?;

        tracing::info!(
            items = items.len(),
            champions = champions.len(),
            "game data ready"
        );
        Ok(Self {
            version,
            items,
            item_list,
            champions,
            champion_list,
        })
    }

    /// Champion id for an id or display name, ignoring case.
    pub fn champion_id(&self, name: &str) -> Option<&str> {
        if let Some((id, _)) = self.champions.get_key_value(name) {
            return Some(id.as_str());
        }
        self.champion_list
            .iter()
            .find(|(id, display)| {
                id.eq_ignore_ascii_case(name)
                    || display
                        .as_str()
                        .is_some_and(|display| display.eq_ignore_ascii_case(name))
            })
            .map(|(id, _)| id.as_str())
    }

    /// Build a level 1 champion from the merged data.
    ///
    /// # Errors
    ///
    /// [`DataError::UnknownChampion`] when `name` matches no champion.
    pub fn champion(&self, name: &str) -> Result<Champion, DataError> {
        let entry = self
            .champion_id(name)
            .and_then(|id| self.champions.get(id))
            .ok_or_else(|| DataError::UnknownChampion(name.to_string()))?;
        let display = entry
            .pointer("/records_ddragon/name")
            .and_then(Value::as_str)
            .unwrap_or(name);
        let record = champions::stat_record(entry);
        Ok(Champion::from_stat_map(display, &record))
    }

    /// Fold the stats of the given items into bonuses. Repeated ids count
    /// once per occurrence.
    ///
    /// # Errors
    ///
    /// [`DataError::UnknownItem`] for the first id not in the item data.
    pub fn bonuses<S: AsRef<str>>(&self, item_ids: &[S]) -> Result<StatBonuses, DataError> {
        let items = item_ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                self.items
                    .get(id)
                    .ok_or_else(|| DataError::UnknownItem(id.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StatBonuses::from_items(items))
    }

    /// Recipe graph over the loaded items.
    pub fn recipes(&self) -> RecipeGraph {
        RecipeGraph::from_items(&self.items)
    }
}
