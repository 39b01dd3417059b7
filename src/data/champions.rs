//! Champion feeds.
//!
//! Data Dragon carries the per-level stat rows and spell texts, Community
//! Dragon carries the attack-speed ratio, range identity and raw spell
//! records. Merging puts both under one entry per champion id:
//!
//! ```text
//! {
//!   "records_ddragon": { key, name, partype, stats, rangeidentity },
//!   "spells_ddragon":  { <spell id>: {...}, "passive": {...} },
//!   "records_cdragon": { spellNames, mAbilities },
//!   "spells_cdragon":  { <spell name>: {...} }
//! }
//! ```

use crate::data::cache::JsonCache;
use crate::data::fetch::fetch_or_warn;
use crate::data::{ddragon_payload, Feeds};
use crate::error::DataError;
use serde_json::{json, Map, Value};

/// All champions from Data Dragon, or `None` if the fetch failed or
/// answered for another version.
pub fn fetch_ddragon_champs(feeds: &Feeds<'_>) -> Option<Value> {
    let url = feeds.links().ddragon_champs(feeds.version, &feeds.config.locale);
    let payload = fetch_or_warn(feeds.fetcher, &url)?;
    ddragon_payload(payload, feeds.version, "champion list")
}

/// Keep `key`, `name`, `partype` and `stats` of every champion.
pub fn clean_ddragon_champs(ddragon: &Value) -> Map<String, Value> {
    let Some(data) = ddragon.get("data") else {
        tracing::warn!("invalid or empty Data Dragon champion data");
        return Map::new();
    };
    let Value::Object(data) = data else {
        tracing::warn!("unexpected format in Data Dragon champion data");
        return Map::new();
    };

    data.iter()
        .map(|(id, subdata)| {
            let field = |name: &str, default: Value| subdata.get(name).cloned().unwrap_or(default);
            let cleaned = json!({
                "key": field("key", json!("")),
                "name": field("name", json!("")),
                "partype": field("partype", json!("")),
                "stats": field("stats", json!({})),
            });
            (id.clone(), cleaned)
        })
        .collect()
}

/// One champion's full Data Dragon document.
pub fn fetch_ddragon_champ(feeds: &Feeds<'_>, champion: &str) -> Option<Value> {
    let url = feeds
        .links()
        .ddragon_champ(feeds.version, &feeds.config.locale, champion);
    let payload = fetch_or_warn(feeds.fetcher, &url)?;
    ddragon_payload(payload, feeds.version, champion)
}

/// Spells of one champion keyed by spell id (the `id` field removed), plus
/// the passive under `passive`.
pub fn clean_ddragon_champ(ddragon: &Value) -> Map<String, Value> {
    let Some(Value::Object(data)) = ddragon.get("data") else {
        tracing::warn!("invalid or empty Data Dragon champion document");
        return Map::new();
    };
    let Some(info) = data.values().next() else {
        return Map::new();
    };

    let mut spells: Map<String, Value> = info
        .get("spells")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|spell| {
            let spell = spell.as_object()?;
            let id = spell.get("id")?.as_str()?.to_string();
            let rest: Map<String, Value> = spell
                .iter()
                .filter(|(key, _)| key.as_str() != "id")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            Some((id, Value::Object(rest)))
        })
        .collect();
    spells.insert(
        "passive".into(),
        info.get("passive").cloned().unwrap_or_else(|| json!({})),
    );
    spells
}

/// One champion's Community Dragon bin document.
pub fn fetch_cdragon_champ(feeds: &Feeds<'_>, champion: &str) -> Option<Value> {
    let url = feeds.links().cdragon_champ(feeds.version, champion);
    fetch_or_warn(feeds.fetcher, &url)
}

/// Community Dragon fields of one champion, split by where they are merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CDragonChampion {
    /// `rangeidentity` and `attackspeedratio`, merged into the stat record.
    pub record_stats: Map<String, Value>,
    /// `spellNames` and `mAbilities`.
    pub record_spells: Map<String, Value>,
    /// Spell records keyed by the path segment after `Spells/`.
    pub spells: Map<String, Value>,
}

pub fn clean_cdragon_champ(cdragon: &Value, champion: &str) -> CDragonChampion {
    let Value::Object(entries) = cdragon else {
        tracing::warn!(champion, "invalid or empty Community Dragon data");
        return CDragonChampion::default();
    };

    let empty = json!({});
    let records = entries
        .get(&format!("Characters/{champion}/CharacterRecords/Root"))
        .unwrap_or(&empty);
    let field = |name: &str, default: Value| records.get(name).cloned().unwrap_or(default);

    let mut record_stats = Map::new();
    record_stats.insert("rangeidentity".into(), field("purchaseIdentities", json!([])));
    record_stats.insert("attackspeedratio".into(), field("attackSpeedRatio", json!(0)));

    let mut record_spells = Map::new();
    record_spells.insert("spellNames".into(), field("spellNames", json!([])));
    record_spells.insert("mAbilities".into(), field("mAbilities", json!([])));

    let prefix = format!("Characters/{champion}/Spells/");
    let spells = entries
        .iter()
        .filter_map(|(path, subdata)| {
            let name = path.strip_prefix(&prefix)?;
            Some((name.to_string(), subdata.clone()))
        })
        .collect();

    CDragonChampion {
        record_stats,
        record_spells,
        spells,
    }
}

/// Fetch both per-champion documents for every cleaned Data Dragon champion
/// and merge them. Failed fetches degrade to empty sections.
pub fn merge_champs(feeds: &Feeds<'_>, ddragon: Map<String, Value>) -> Map<String, Value> {
    let mut champ_data = Map::new();
    for (id, mut records) in ddragon {
        let spells_ddragon = fetch_ddragon_champ(feeds, &id)
            .map(|doc| clean_ddragon_champ(&doc))
            .unwrap_or_default();
        let cdragon = fetch_cdragon_champ(feeds, &id)
            .map(|doc| clean_cdragon_champ(&doc, &id))
            .unwrap_or_default();

        merge_records(&mut records, &cdragon.record_stats);
        champ_data.insert(
            id.clone(),
            json!({
                "records_ddragon": records,
                "spells_ddragon": spells_ddragon,
                "records_cdragon": cdragon.record_spells,
                "spells_cdragon": cdragon.spells,
            }),
        );
        tracing::info!(champion = %id, "merged champion data");
    }
    champ_data
}

/// Reconcile Community Dragon record fields into a Data Dragon record.
fn merge_records(records: &mut Value, record_stats: &Map<String, Value>) {
    let Value::Object(records) = records else {
        return;
    };
    records.insert(
        "rangeidentity".into(),
        record_stats
            .get("rangeidentity")
            .cloned()
            .unwrap_or_else(|| json!([])),
    );
    let stats = records
        .entry("stats")
        .or_insert_with(|| json!({}));
    if let Value::Object(stats) = stats {
        stats.insert(
            "attackspeedratio".into(),
            record_stats
                .get("attackspeedratio")
                .cloned()
                .unwrap_or_else(|| json!(0)),
        );
    }
}

/// Merged champion data for the feeds' version, from `file` unless it is
/// missing, empty or `update` is set, in which case it is rebuilt from the
/// feeds and written back.
pub fn check_champs(
    cache: &JsonCache,
    feeds: &Feeds<'_>,
    file: &str,
    update: bool,
) -> Result<Map<String, Value>, DataError> {
    let champ_data = cache.read_object(file);
    if !champ_data.is_empty() && !update {
        return Ok(champ_data);
    }

    tracing::info!(version = feeds.version, "fetching champion data");
    let ddragon = fetch_ddragon_champs(feeds)
        .map(|doc| clean_ddragon_champs(&doc))
        .unwrap_or_default();
    let champ_data = merge_champs(feeds, ddragon);
    cache.write(file, &Value::Object(champ_data.clone()))?;
    Ok(champ_data)
}

/// Champion id to display name, from `file` or rebuilt from `champ_data`.
pub fn check_champ_list(
    cache: &JsonCache,
    file: &str,
    champ_data: &Map<String, Value>,
    update: bool,
) -> Result<Map<String, Value>, DataError> {
    let champ_list = cache.read_object(file);
    if !champ_list.is_empty() && !update {
        return Ok(champ_list);
    }

    let champ_list: Map<String, Value> = champ_data
        .iter()
        .map(|(id, subdata)| {
            let name = subdata
                .pointer("/records_ddragon/name")
                .cloned()
                .unwrap_or_else(|| json!(""));
            (id.clone(), name)
        })
        .collect();
    if champ_list.is_empty() {
        tracing::warn!(file, "no champion data to build the champion list from");
        return Ok(champ_list);
    }
    cache.write(file, &Value::Object(champ_list.clone()))?;
    Ok(champ_list)
}

/// Flatten a merged champion entry into the record
/// [`Champion::from_record`](crate::Champion::from_record) takes.
///
/// Accepts either a full merged entry or its `records_ddragon` section.
pub fn stat_record(entry: &Value) -> Map<String, Value> {
    let records = entry.get("records_ddragon").unwrap_or(entry);
    let mut record = records
        .get("stats")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    for key in ["partype", "rangeidentity"] {
        if let Some(value) = records.get(key) {
            record.insert(key.into(), value.clone());
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_ddragon_champs() {
        let ddragon = json!({
            "version": "14.23.1",
            "data": {
                "Ahri": {
                    "key": "103", "name": "Ahri", "partype": "Mana",
                    "title": "the Nine-Tailed Fox",
                    "stats": {"hp": 590}
                },
                "Garen": {"name": "Garen"}
            }
        });
        let cleaned = clean_ddragon_champs(&ddragon);
        assert_eq!(
            cleaned["Ahri"],
            json!({"key": "103", "name": "Ahri", "partype": "Mana", "stats": {"hp": 590}})
        );
        assert_eq!(
            cleaned["Garen"],
            json!({"key": "", "name": "Garen", "partype": "", "stats": {}})
        );
    }

    #[test]
    fn test_clean_ddragon_champs_invalid() {
        assert!(clean_ddragon_champs(&json!({})).is_empty());
        assert!(clean_ddragon_champs(&json!({"data": []})).is_empty());
    }

    #[test]
    fn test_clean_ddragon_champ_spells() {
        let doc = json!({
            "data": {
                "Ahri": {
                    "spells": [
                        {"id": "AhriQ", "name": "Orb of Deception"},
                        {"name": "no id"}
                    ],
                    "passive": {"name": "Essence Theft"}
                }
            }
        });
        let spells = clean_ddragon_champ(&doc);
        assert_eq!(spells["AhriQ"], json!({"name": "Orb of Deception"}));
        assert_eq!(spells["passive"], json!({"name": "Essence Theft"}));
        assert_eq!(spells.len(), 2);
    }

    #[test]
    fn test_clean_cdragon_champ() {
        let doc = json!({
            "Characters/Ahri/CharacterRecords/Root": {
                "purchaseIdentities": ["Ranged"],
                "attackSpeedRatio": 0.625,
                "spellNames": ["AhriQ"],
                "mAbilities": ["x"]
            },
            "Characters/Ahri/Spells/AhriQAbility": {"mName": "AhriQ"},
            "Characters/Garen/Spells/GarenQ": {}
        });
        let cdragon = clean_cdragon_champ(&doc, "Ahri");
        assert_eq!(cdragon.record_stats["rangeidentity"], json!(["Ranged"]));
        assert_eq!(cdragon.record_stats["attackspeedratio"], json!(0.625));
        assert_eq!(cdragon.record_spells["spellNames"], json!(["AhriQ"]));
        assert_eq!(cdragon.spells.len(), 1);
        assert!(cdragon.spells.contains_key("AhriQAbility"));
    }

    #[test]
    fn test_clean_cdragon_champ_missing_records() {
        let cdragon = clean_cdragon_champ(&json!({}), "Ahri");
        assert_eq!(cdragon.record_stats["rangeidentity"], json!([]));
        assert_eq!(cdragon.record_stats["attackspeedratio"], json!(0));
        assert_eq!(clean_cdragon_champ(&json!(null), "Ahri"), CDragonChampion::default());
    }

    #[test]
    fn test_stat_record_flattens() {
        let entry = json!({
            "records_ddragon": {
                "name": "Ahri", "partype": "Mana", "rangeidentity": ["Ranged"],
                "stats": {"hp": 590, "attackspeedratio": 0.625}
            }
        });
        let record = stat_record(&entry);
        assert_eq!(record["hp"], json!(590));
        assert_eq!(record["partype"], json!("Mana"));
        assert_eq!(record["rangeidentity"], json!(["Ranged"]));
        assert!(!record.contains_key("name"));
    }
}
