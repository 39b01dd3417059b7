//! Champion model.
//!
//! A [`Champion`] owns one [`ChampionStats`] record and the bonuses applied
//! to it. Every change to level or bonuses goes through
//! [`Champion::recompute`], so derived stats are never stale.

use crate::bonus::{Bonus, StatBonuses};
use crate::error::StatError;
use crate::formulas::{self, MAX_LEVEL, MIN_LEVEL};
use crate::stats::ChampionStats;
use serde::Serialize;
use serde_json::{Map, Value};

/// JSON type name used in error messages.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A champion at a level, with its stats and bonuses.
///
/// # Examples
///
/// ```rust
/// use riftstat::Champion;
/// use serde_json::json;
///
/// let record = json!({ "hp": 500.0, "hpperlevel": 80.0, "partype": "Mana" });
/// let mut ahri = Champion::from_record("Ahri", &record).unwrap();
///
/// assert_eq!(ahri.level(), 1);
/// assert_eq!(ahri.stats().health, 500.0);
///
/// assert_eq!(ahri.apply_damage(150.0), 350.0);
/// assert_eq!(ahri.stats().health_missing, 150.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Champion {
    name: String,
    level: u8,
    resource_type: String,
    range_type: Vec<String>,
    stats: ChampionStats,
    bonuses: StatBonuses,
}

impl Champion {
    /// Build a level 1 champion from a cleaned stat record.
    ///
    /// The record must be a JSON object. Individual missing stat fields
    /// default to `0.0`, a missing `partype` to an empty string and a missing
    /// `rangeidentity` to no tags.
    ///
    /// # Errors
    ///
    /// [`StatError::InvalidInput`] when `record` is not an object.
    pub fn from_record(name: impl Into<String>, record: &Value) -> Result<Self, StatError> {
        match record {
            Value::Object(map) => Ok(Self::from_stat_map(name, map)),
            other => Err(StatError::InvalidInput(json_type(other).to_string())),
        }
    }

    /// Build a level 1 champion from an already typed record.
    pub fn from_stat_map(name: impl Into<String>, record: &Map<String, Value>) -> Self {
        let resource_type = record
            .get("partype")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let range_type = record
            .get("rangeidentity")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut champion = Self {
            name: name.into(),
            level: MIN_LEVEL,
            resource_type,
            range_type,
            stats: ChampionStats::from_record(record),
            bonuses: StatBonuses::new(),
        };
        champion.recompute();
        champion
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Resource name such as `Mana` or `Energy`.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Range identity tags such as `Melee` or `Ranged`.
    pub fn range_type(&self) -> &[String] {
        &self.range_type
    }

    pub fn stats(&self) -> &ChampionStats {
        &self.stats
    }

    pub fn bonuses(&self) -> &StatBonuses {
        &self.bonuses
    }

    /// Re-derive every derived stat from level and bonuses.
    pub fn recompute(&mut self) {
        self.stats.recompute(self.level, &self.bonuses);
        tracing::debug!(
            champion = %self.name,
            level = self.level,
            health = self.stats.health,
            "recomputed stats"
        );
    }

    /// Move the champion to `level`.
    ///
    /// # Errors
    ///
    /// [`StatError::InvalidLevel`] outside `1..=18`; the champion is left
    /// unchanged.
    pub fn set_level(&mut self, level: u8) -> Result<(), StatError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(StatError::InvalidLevel(level));
        }
        self.level = level;
        self.recompute();
        Ok(())
    }

    /// Advance one level.
    pub fn level_up(&mut self) -> Result<(), StatError> {
        self.set_level(self.level.saturating_add(1))
    }

    /// Replace all bonuses.
    pub fn set_bonuses(&mut self, bonuses: StatBonuses) {
        self.bonuses = bonuses;
        self.recompute();
    }

    /// Add one bonus instance.
    pub fn add_bonus(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
        self.recompute();
    }

    pub fn clear_bonuses(&mut self) {
        self.bonuses.clear();
        self.recompute();
    }

    /// Reduce current health by `amount`, floored at zero.
    ///
    /// Returns the new current health.
    pub fn apply_damage(&mut self, amount: f64) -> f64 {
        self.stats.damage(amount)
    }

    /// Restore `amount` of health, capped at total health.
    pub fn heal(&mut self, amount: f64) -> f64 {
        self.stats.restore_health(amount)
    }

    /// Spend `amount` of the resource, floored at zero.
    pub fn drain_resource(&mut self, amount: f64) -> f64 {
        self.stats.drain_resource(amount)
    }

    pub fn restore_resource(&mut self, amount: f64) -> f64 {
        self.stats.restore_resource(amount)
    }

    /// Current health against physical damage.
    pub fn effective_health_physical(&self) -> f64 {
        formulas::effective_health(self.stats.health_current, self.stats.armor)
    }

    /// Current health against magic damage.
    pub fn effective_health_magic(&self) -> f64 {
        formulas::effective_health(self.stats.health_current, self.stats.magic_resist)
    }

    /// This champion's armor as seen by `attacker`.
    ///
    /// Returns `(base, bonus, total)` after the attacker's reduction and
    /// penetration.
    pub fn armor_against(&self, attacker: &Champion) -> (f64, f64, f64) {
        let a = &attacker.stats;
        formulas::resistance_post_pen(
            self.stats.armor_at_level,
            self.stats.armor - self.stats.armor_at_level,
            a.ar_red_flat,
            a.ar_red_perc,
            a.ar_pen_perc,
            a.ar_pen_flat,
        )
    }

    /// This champion's magic resist as seen by `attacker`.
    pub fn magic_resist_against(&self, attacker: &Champion) -> (f64, f64, f64) {
        let a = &attacker.stats;
        formulas::resistance_post_pen(
            self.stats.magic_resist_at_level,
            self.stats.magic_resist - self.stats.magic_resist_at_level,
            a.mr_red_flat,
            a.mr_red_perc,
            a.mr_pen_perc,
            a.mr_pen_flat,
        )
    }

    /// Damage reduction from armor against `attacker`.
    pub fn physical_damage_reduction(&self, attacker: &Champion) -> f64 {
        formulas::damage_reduction_resistances(self.armor_against(attacker).2)
    }

    /// Damage reduction from magic resist against `attacker`.
    pub fn magic_damage_reduction(&self, attacker: &Champion) -> f64 {
        formulas::damage_reduction_resistances(self.magic_resist_against(attacker).2)
    }

    /// Expected damage of one basic attack.
    pub fn avg_damage_per_attack(&self) -> f64 {
        formulas::avg_damage_per_attack(
            self.stats.attack_damage,
            self.stats.crit_chance,
            self.stats.crit_damage,
        )
    }

    /// Serialize the whole champion, stats and bonuses included.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
