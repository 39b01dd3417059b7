//! Item feeds.
//!
//! Data Dragon decides which items exist on Summoner's Rift and carries the
//! shop fields; Community Dragon carries the stat values. Merged items are
//! keyed by the Data Dragon id with Community Dragon fields taking
//! precedence.

use crate::bonus::ITEM_STAT_KEYS;
use crate::data::cache::JsonCache;
use crate::data::fetch::fetch_or_warn;
use crate::data::{ddragon_payload, Feeds};
use crate::error::DataError;
use serde_json::{json, Map, Value};

/// Community Dragon item fields kept at the top level.
pub const SAVE_KEYS: &[&str] = &[
    "itemID",
    "mDisplayName",
    "epicness",
    "maxStack",
    "price",
    "mDataValues",
    "mEffectAmount",
    "mItemCalculations",
    "mItemDataClient",
];

/// Community Dragon item fields dropped entirely.
pub const REMOVE_KEYS: &[&str] = &[
    "__type",
    "mScripts",
    "mCategories",
    "mItemGroups",
    "mItemModifiers",
    "mItemAttributes",
    "mItemDataAvailability",
    "mItemDataBuild",
    "mBuildDepth",
    "mPriceInStore",
    "recipeItemLinks",
    "sidegradeCredit",
    "mRequiredChampion",
    "mRequiredAlly",
    "mRequiredPurchaseIdentities",
    "mRequiredBuffCurrencyName",
    "mRequiredBuffCurrencyCost",
    "mParentItemLink",
    "mDisabledDescriptionOverride",
    "mDisabledIconPath",
    "spellName",
    "consumed",
    "usableInStore",
    "clearUndoHistoryOnActivate",
];

/// Highest id of a regular Summoner's Rift item.
const MAX_ITEM_ID: u32 = 10000;

/// Community Dragon field behind a tooltip stat type.
///
/// Tooltip types without a champion stat (gold generation) map to nothing.
///
/// ```rust
/// use riftstat::data::items::stat_field;
///
/// assert_eq!(stat_field("Lethality"), Some("mPhysicalLethality"));
/// assert_eq!(stat_field("GoldPer10"), None);
/// ```
pub fn stat_field(tooltip: &str) -> Option<&'static str> {
    ITEM_STAT_KEYS
        .iter()
        .find(|key| key.tooltip == tooltip && key.stat.is_some())
        .map(|key| key.field)
}

pub fn fetch_ddragon_items(feeds: &Feeds<'_>) -> Option<Value> {
    let url = feeds.links().ddragon_items(feeds.version, &feeds.config.locale);
    let payload = fetch_or_warn(feeds.fetcher, &url)?;
    ddragon_payload(payload, feeds.version, "item list")
}

/// Summoner's Rift shop items, with name, description, total gold, tags and
/// the `from`/`into` recipe links.
pub fn clean_ddragon_items(ddragon: &Value) -> Map<String, Value> {
    let Some(Value::Object(data)) = ddragon.get("data") else {
        tracing::warn!("invalid or empty Data Dragon item data");
        return Map::new();
    };

    data.iter()
        .filter(|(id, subdata)| is_rift_item(id, subdata))
        .map(|(id, subdata)| {
            let field = |name: &str| subdata.get(name).cloned();
            let gold = subdata
                .pointer("/gold/total")
                .cloned()
                .unwrap_or_else(|| json!(-1));
            let cleaned = json!({
                "name": field("name").unwrap_or_else(|| json!("")),
                "description": field("description").unwrap_or_else(|| json!("")),
                "gold": gold,
                "tags": field("tags").unwrap_or_else(|| json!([])),
                "from": field("from").unwrap_or_else(|| json!([])),
                "into": field("into").unwrap_or_else(|| json!([])),
            });
            (id.clone(), cleaned)
        })
        .collect()
}

fn is_rift_item(id: &str, subdata: &Value) -> bool {
    if !subdata.is_object() {
        return false;
    }
    match id.parse::<u32>() {
        Ok(id) if id <= MAX_ITEM_ID => {}
        _ => return false,
    }

    let truthy = |value: Option<&Value>| match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Array(values)) => !values.is_empty(),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::Object(map)) => !map.is_empty(),
    };

    let tags: Vec<&str> = subdata
        .get("tags")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .collect();
    if tags.is_empty()
        || !truthy(subdata.pointer("/maps/11"))
        || truthy(subdata.get("requiredChampion"))
    {
        return false;
    }

    let obtainable = truthy(subdata.get("into"))
        || truthy(subdata.get("inStore"))
        || truthy(subdata.get("specialRecipe"))
        || truthy(subdata.pointer("/gold/purchasable"));
    if !obtainable {
        return false;
    }

    let stacks = subdata.get("stacks").and_then(Value::as_f64).unwrap_or(0.0);
    !(tags.contains(&"Jungle") || tags.contains(&"Trinket") || stacks > 0.0)
}

pub fn fetch_cdragon_items(feeds: &Feeds<'_>) -> Option<Value> {
    let url = feeds.links().cdragon_items(feeds.version);
    fetch_or_warn(feeds.fetcher, &url)
}

/// Restructure every Community Dragon item record.
///
/// [`SAVE_KEYS`] stay at the top level, [`REMOVE_KEYS`] are dropped and
/// every other field goes under `stats`. Stats listed in the tooltip are
/// always present under `stats`, zero when the record omits them.
pub fn clean_cdragon_items(cdragon: &Value) -> Map<String, Value> {
    let Some(entries) = cdragon.as_object().filter(|entries| !entries.is_empty()) else {
        tracing::warn!("invalid or empty Community Dragon item data");
        return Map::new();
    };

    entries
        .iter()
        .filter_map(|(path, subdata)| {
            let subdata = subdata.as_object()?;
            Some((path.clone(), clean_cdragon_item(subdata)))
        })
        .collect()
}

fn clean_cdragon_item(subdata: &Map<String, Value>) -> Value {
    let mut item = Map::new();
    let mut stats = Map::new();
    for (key, value) in subdata {
        if SAVE_KEYS.contains(&key.as_str()) {
            item.insert(key.clone(), value.clone());
        } else if !REMOVE_KEYS.contains(&key.as_str()) {
            stats.insert(key.clone(), value.clone());
        }
    }

    let tooltip_stats = subdata
        .get("mItemDataClient")
        .and_then(|client| client.pointer("/mTooltipData/mLists/Stats/elements"))
        .and_then(Value::as_array);
    for element in tooltip_stats.into_iter().flatten() {
        let Some(field) = element
            .get("type")
            .and_then(Value::as_str)
            .and_then(stat_field)
        else {
            continue;
        };
        let value = subdata.get(field).cloned().unwrap_or_else(|| json!(0));
        stats.insert(field.to_string(), value);
    }
    item.insert("stats".into(), Value::Object(stats));
    item.remove("mItemDataClient");

    let all_zero = item
        .get("mEffectAmount")
        .and_then(Value::as_array)
        .is_some_and(|amounts| amounts.iter().all(|v| v.as_f64() == Some(0.0)));
    if all_zero {
        item.remove("mEffectAmount");
    }

    if let Some(Value::Array(values)) = item.get("mDataValues") {
        if !values.is_empty() {
            let flattened: Map<String, Value> = values
                .iter()
                .filter_map(|entry| {
                    let name = entry.get("mName")?.as_str()?;
                    let value = entry.get("mValue").cloned().unwrap_or(Value::Null);
                    Some((name.to_string(), value))
                })
                .collect();
            item.insert("mDataValues".into(), Value::Object(flattened));
        }
    }

    Value::Object(item)
}

/// Join both feeds on `Items/<id>`. Items missing from Community Dragon are
/// skipped with a warning.
pub fn merge_items(ddragon: &Map<String, Value>, cdragon: &Map<String, Value>) -> Map<String, Value> {
    let mut item_data = Map::new();
    for (id, ddragon_subdata) in ddragon {
        let cdragon_subdata = cdragon
            .get(&format!("Items/{id}"))
            .and_then(Value::as_object)
            .filter(|subdata| !subdata.is_empty());
        let Some(cdragon_subdata) = cdragon_subdata else {
            let name = ddragon_subdata.get("name").and_then(Value::as_str).unwrap_or("");
            tracing::warn!(item = %id, name, "item missing from Community Dragon");
            continue;
        };

        let mut merged = ddragon_subdata.as_object().cloned().unwrap_or_default();
        merged.extend(cdragon_subdata.clone());
        item_data.insert(id.clone(), Value::Object(merged));
    }
    item_data
}

/// Merged item data, from `file` unless it is missing, empty or `update` is
/// set.
pub fn check_items(
    cache: &JsonCache,
    feeds: &Feeds<'_>,
    file: &str,
    update: bool,
) -> Result<Map<String, Value>, DataError> {
    let item_data = cache.read_object(file);
    if !item_data.is_empty() && !update {
        return Ok(item_data);
    }

    tracing::info!(version = feeds.version, "fetching item data");
    let ddragon = fetch_ddragon_items(feeds)
        .map(|doc| clean_ddragon_items(&doc))
        .unwrap_or_default();
    let cdragon = fetch_cdragon_items(feeds)
        .map(|doc| clean_cdragon_items(&doc))
        .unwrap_or_default();
    let item_data = merge_items(&ddragon, &cdragon);
    cache.write(file, &Value::Object(item_data.clone()))?;
    Ok(item_data)
}

/// Item id to name, from `file` or rebuilt from `item_data`.
pub fn check_item_list(
    cache: &JsonCache,
    file: &str,
    item_data: &Map<String, Value>,
    update: bool,
) -> Result<Map<String, Value>, DataError> {
    let item_list = cache.read_object(file);
    if !item_list.is_empty() && !update {
        return Ok(item_list);
    }

    let item_list: Map<String, Value> = item_data
        .iter()
        .map(|(id, subdata)| {
            let name = subdata.get("name").cloned().unwrap_or_else(|| json!(""));
            (id.clone(), name)
        })
        .collect();
    if item_list.is_empty() {
        tracing::warn!(file, "no item data to build the item list from");
        return Ok(item_list);
    }
    cache.write(file, &Value::Object(item_list.clone()))?;
    Ok(item_list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop_item(name: &str) -> Value {
        json!({
            "name": name,
            "description": "<stats>...</stats>",
            "tags": ["Damage"],
            "maps": {"11": true, "12": true},
            "gold": {"total": 1100, "purchasable": true}
        })
    }

    #[test]
    fn test_clean_ddragon_items_filters() {
        let mut trinket = shop_item("Stealth Ward");
        trinket["tags"] = json!(["Trinket"]);
        let mut aram_only = shop_item("Aram Thing");
        aram_only["maps"] = json!({"11": false, "12": true});
        let mut locked = shop_item("Kalista Spear");
        locked["requiredChampion"] = json!("Kalista");
        let mut stacking = shop_item("Potion");
        stacking["stacks"] = json!(5);
        let mut unbuyable = shop_item("Hidden");
        unbuyable["gold"] = json!({"total": 0, "purchasable": false});
        let mut untagged = shop_item("Plain");
        untagged["tags"] = json!([]);

        let ddragon = json!({
            "data": {
                "1036": shop_item("Long Sword"),
                "223036": shop_item("Ornn Upgrade"),
                "3340": trinket,
                "1037": aram_only,
                "3599": locked,
                "2003": stacking,
                "1040": unbuyable,
                "1041": untagged,
            }
        });
        let cleaned = clean_ddragon_items(&ddragon);
        assert_eq!(cleaned.keys().collect::<Vec<_>>(), vec!["1036"]);
        assert_eq!(cleaned["1036"]["gold"], json!(1100));
        assert_eq!(cleaned["1036"]["from"], json!([]));
    }

    #[test]
    fn test_clean_ddragon_items_recipe_only() {
        let mut component = shop_item("Component");
        component["gold"] = json!({"purchasable": false});
        component["into"] = json!(["3031"]);
        let cleaned = clean_ddragon_items(&json!({"data": {"1038": component}}));
        assert_eq!(cleaned["1038"]["gold"], json!(-1));
        assert_eq!(cleaned["1038"]["into"], json!(["3031"]));
    }

    #[test]
    fn test_clean_cdragon_item() {
        let cdragon = json!({
            "Items/3031": {
                "__type": "ItemData",
                "itemID": 3031,
                "mFlatPhysicalDamageMod": 65.0,
                "mScripts": ["x"],
                "mEffectAmount": [0, 0.0, 0],
                "mDataValues": [
                    {"mName": "CritDamage", "mValue": 0.4},
                    {"mName": "Unused"}
                ],
                "mItemDataClient": {
                    "mTooltipData": {
                        "mLists": {"Stats": {"elements": [
                            {"type": "AttackDamage"},
                            {"type": "CritChance"},
                            {"type": "GoldPer10"}
                        ]}}
                    }
                }
            },
            "Characters/Ahri": "not an item"
        });
        let cleaned = clean_cdragon_items(&cdragon);
        assert_eq!(cleaned.len(), 1);

        let item = &cleaned["Items/3031"];
        assert_eq!(item["itemID"], json!(3031));
        assert!(item.get("__type").is_none());
        assert!(item.get("mScripts").is_none());
        assert!(item.get("mItemDataClient").is_none());
        assert!(item.get("mEffectAmount").is_none());
        assert_eq!(
            item["stats"],
            json!({"mFlatPhysicalDamageMod": 65.0, "mFlatCritChanceMod": 0})
        );
        assert_eq!(
            item["mDataValues"],
            json!({"CritDamage": 0.4, "Unused": null})
        );
    }

    #[test]
    fn test_clean_cdragon_items_empty() {
        assert!(clean_cdragon_items(&json!({})).is_empty());
        assert!(clean_cdragon_items(&json!([1, 2])).is_empty());
    }

    #[test]
    fn test_merge_items_prefers_cdragon() {
        let ddragon = json!({
            "1036": {"name": "Long Sword", "gold": 350},
            "9999": {"name": "Missing"}
        });
        let cdragon = json!({
            "Items/1036": {"name": "Long Sword (cd)", "stats": {"mFlatPhysicalDamageMod": 10}}
        });
        let merged = merge_items(
            ddragon.as_object().unwrap(),
            cdragon.as_object().unwrap(),
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged["1036"]["name"], json!("Long Sword (cd)"));
        assert_eq!(merged["1036"]["gold"], json!(350));
        assert_eq!(merged["1036"]["stats"]["mFlatPhysicalDamageMod"], json!(10));
    }
}
