//! Champion stat record.
//!
//! [`ChampionStats`] holds three groups of fields:
//!
//! 1. base inputs read from the champion record, never changed afterwards;
//! 2. derived fields written only by [`ChampionStats::recompute`];
//! 3. pool state (`*_current`, `*_missing`) carried across recomputes.
//!
//! `current <= total` and `missing == total - current` hold for the health
//! and resource pools after every operation.

use crate::bonus::{BonusStat, StatBonuses};
use crate::formulas::{self, BASE_CRIT_DAMAGE};
use crate::modifier::Modifier;
use crate::stacking::{max_value, min_value};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record field names read by [`ChampionStats::from_record`].
pub const STAT_FIELDS: [&str; 20] = [
    "hp",
    "hpperlevel",
    "hpregen",
    "hpregenperlevel",
    "armor",
    "armorperlevel",
    "spellblock",
    "spellblockperlevel",
    "attackspeedratio",
    "attackspeed",
    "attackspeedperlevel",
    "attackdamage",
    "attackdamageperlevel",
    "crit",
    "mp",
    "mpperlevel",
    "mpregen",
    "mpregenperlevel",
    "attackrange",
    "movespeed",
];

fn stat(record: &Map<String, Value>, key: &str) -> f64 {
    record.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Per-champion stat record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChampionStats {
    // base inputs
    pub health_base: f64,
    pub health_per_level: f64,
    pub health_regen_base: f64,
    pub health_regen_per_level: f64,
    pub armor_base: f64,
    pub armor_per_level: f64,
    pub magic_resist_base: f64,
    pub magic_resist_per_level: f64,
    pub attack_speed_ratio: f64,
    pub attack_speed_base: f64,
    /// Percent points per level, as published by Data Dragon.
    pub attack_speed_per_level: f64,
    pub attack_damage_base: f64,
    pub attack_damage_per_level: f64,
    pub crit_chance_base: f64,
    pub resource_base: f64,
    pub resource_per_level: f64,
    pub resource_regen_base: f64,
    pub resource_regen_per_level: f64,
    pub attack_range_base: f64,
    pub move_speed_base: f64,

    // health
    pub health_at_level: f64,
    pub health_bonus: f64,
    pub health: f64,
    pub health_current: f64,
    pub health_missing: f64,
    pub health_regen_at_level: f64,
    pub health_regen_bonus: f64,
    pub health_regen: f64,
    pub heal_shield_power: f64,

    // defense
    pub armor_at_level: f64,
    pub armor_bonus: f64,
    pub armor: f64,
    pub magic_resist_at_level: f64,
    pub magic_resist_bonus: f64,
    pub magic_resist: f64,
    pub tenacity: f64,
    pub slow_resist: f64,

    // offense
    pub attack_speed_bonus: f64,
    pub attack_speed: f64,
    pub attack_damage_at_level: f64,
    pub attack_damage_bonus: f64,
    pub attack_damage: f64,
    pub ability_power: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,

    // reduction and penetration; percent fields hold the net stacked percent
    pub ar_red_flat: f64,
    pub ar_red_perc: f64,
    pub ar_pen_perc: f64,
    pub ar_pen_flat: f64,
    pub mr_red_flat: f64,
    pub mr_red_perc: f64,
    pub mr_pen_perc: f64,
    pub mr_pen_flat: f64,

    pub life_steal: f64,
    pub phys_vamp: f64,
    pub omni_vamp: f64,

    pub ability_haste_basic: f64,
    pub ability_haste_ultim: f64,
    pub ability_haste: f64,

    // resource
    pub resource_at_level: f64,
    pub resource_bonus: f64,
    pub resource: f64,
    pub resource_current: f64,
    pub resource_missing: f64,
    pub resource_regen_at_level: f64,
    pub resource_regen_bonus: f64,
    pub resource_regen: f64,

    pub attack_range_bonus: f64,
    pub attack_range: f64,

    // movement
    pub move_speed_bonus_flat: f64,
    pub move_speed_bonus_perc: f64,
    pub move_speed_bonus_mult: f64,
    pub slow: f64,
    pub move_speed: f64,
}

impl ChampionStats {
    /// Read base inputs from a cleaned stat record.
    ///
    /// Missing or non-numeric fields default to `0.0`. Derived fields are
    /// left at zero until [`recompute`](Self::recompute) runs.
    pub fn from_record(record: &Map<String, Value>) -> Self {
        Self {
            health_base: stat(record, "hp"),
            health_per_level: stat(record, "hpperlevel"),
            health_regen_base: stat(record, "hpregen"),
            health_regen_per_level: stat(record, "hpregenperlevel"),
            armor_base: stat(record, "armor"),
            armor_per_level: stat(record, "armorperlevel"),
            magic_resist_base: stat(record, "spellblock"),
            magic_resist_per_level: stat(record, "spellblockperlevel"),
            attack_speed_ratio: stat(record, "attackspeedratio"),
            attack_speed_base: stat(record, "attackspeed"),
            attack_speed_per_level: stat(record, "attackspeedperlevel"),
            attack_damage_base: stat(record, "attackdamage"),
            attack_damage_per_level: stat(record, "attackdamageperlevel"),
            crit_chance_base: stat(record, "crit"),
            resource_base: stat(record, "mp"),
            resource_per_level: stat(record, "mpperlevel"),
            resource_regen_base: stat(record, "mpregen"),
            resource_regen_per_level: stat(record, "mpregenperlevel"),
            attack_range_base: stat(record, "attackrange"),
            move_speed_base: stat(record, "movespeed"),
            ..Self::default()
        }
    }

    /// Base inputs written back under their record field names.
    pub fn to_record(&self) -> Map<String, Value> {
        let values = [
            self.health_base,
            self.health_per_level,
            self.health_regen_base,
            self.health_regen_per_level,
            self.armor_base,
            self.armor_per_level,
            self.magic_resist_base,
            self.magic_resist_per_level,
            self.attack_speed_ratio,
            self.attack_speed_base,
            self.attack_speed_per_level,
            self.attack_damage_base,
            self.attack_damage_per_level,
            self.crit_chance_base,
            self.resource_base,
            self.resource_per_level,
            self.resource_regen_base,
            self.resource_regen_per_level,
            self.attack_range_base,
            self.move_speed_base,
        ];
        STAT_FIELDS
            .iter()
            .zip(values)
            .map(|(key, value)| (key.to_string(), Value::from(value)))
            .collect()
    }

    /// Derive every derived field for `level` and `bonuses`.
    ///
    /// Missing health and resource carry over, so leveling up or buying
    /// health raises current health by the same amount as the total.
    pub fn recompute(&mut self, level: u8, bonuses: &StatBonuses) {
        let total = |stat: BonusStat| bonuses.total(stat);

        self.health_at_level = formulas::stat_growth(self.health_base, self.health_per_level, level);
        self.health_bonus = total(BonusStat::Health);
        self.health = max_value([self.health_at_level + self.health_bonus, 0.0]);
        (self.health_current, self.health_missing) = pool(self.health, self.health_missing);

        self.health_regen_at_level =
            formulas::stat_growth(self.health_regen_base, self.health_regen_per_level, level);
        self.health_regen_bonus = self.health_regen_at_level
            * total(BonusStat::BaseHealthRegenPercent)
            + total(BonusStat::HealthRegen);
        self.health_regen = max_value([self.health_regen_at_level + self.health_regen_bonus, 0.0]);
        self.heal_shield_power = total(BonusStat::HealShieldPower);

        self.armor_at_level = formulas::stat_growth(self.armor_base, self.armor_per_level, level);
        self.armor_bonus = total(BonusStat::Armor);
        self.armor = max_value([self.armor_at_level + self.armor_bonus, 0.0]);
        self.magic_resist_at_level =
            formulas::stat_growth(self.magic_resist_base, self.magic_resist_per_level, level);
        self.magic_resist_bonus = total(BonusStat::MagicResist);
        self.magic_resist = max_value([self.magic_resist_at_level + self.magic_resist_bonus, 0.0]);
        self.tenacity = total(BonusStat::Tenacity);
        self.slow_resist = total(BonusStat::SlowResist);

        // Champions without a published ratio scale bonus attack speed off
        // their base attack speed.
        let ratio = if self.attack_speed_ratio == 0.0 {
            self.attack_speed_base
        } else {
            self.attack_speed_ratio
        };
        self.attack_speed_bonus = total(BonusStat::AttackSpeed);
        let attack_speed = formulas::attack_speed(
            self.attack_speed_base,
            self.attack_speed_per_level / 100.0,
            level,
            ratio,
            bonuses.get(BonusStat::AttackSpeed),
        );
        self.attack_speed = max_value([attack_speed, 0.0]);
        self.attack_damage_at_level =
            formulas::stat_growth(self.attack_damage_base, self.attack_damage_per_level, level);
        self.attack_damage_bonus = total(BonusStat::AttackDamage);
        self.attack_damage = max_value([self.attack_damage_at_level + self.attack_damage_bonus, 0.0]);
        self.ability_power = total(BonusStat::AbilityPower);
        self.crit_chance = min_value([self.crit_chance_base + total(BonusStat::CritChance), 1.0]);
        self.crit_damage = BASE_CRIT_DAMAGE + total(BonusStat::CritDamage);

        self.ar_red_flat = total(BonusStat::ArmorReductionFlat);
        self.ar_red_perc = total(BonusStat::ArmorReductionPercent);
        self.ar_pen_perc = total(BonusStat::ArmorPenPercent);
        self.ar_pen_flat = total(BonusStat::ArmorPenFlat);
        self.mr_red_flat = total(BonusStat::MagicReductionFlat);
        self.mr_red_perc = total(BonusStat::MagicReductionPercent);
        self.mr_pen_perc = total(BonusStat::MagicPenPercent);
        self.mr_pen_flat = total(BonusStat::MagicPenFlat);

        self.life_steal = total(BonusStat::LifeSteal);
        self.phys_vamp = total(BonusStat::PhysicalVamp);
        self.omni_vamp = total(BonusStat::Omnivamp);

        self.ability_haste = total(BonusStat::AbilityHaste);
        self.ability_haste_basic = self.ability_haste + total(BonusStat::BasicAbilityHaste);
        self.ability_haste_ultim = self.ability_haste + total(BonusStat::UltimateHaste);

        self.resource_at_level =
            formulas::stat_growth(self.resource_base, self.resource_per_level, level);
        self.resource_bonus = total(BonusStat::Resource);
        self.resource = max_value([self.resource_at_level + self.resource_bonus, 0.0]);
        (self.resource_current, self.resource_missing) = pool(self.resource, self.resource_missing);
        self.resource_regen_at_level =
            formulas::stat_growth(self.resource_regen_base, self.resource_regen_per_level, level);
        self.resource_regen_bonus = self.resource_regen_at_level
            * total(BonusStat::BaseResourceRegenPercent)
            + total(BonusStat::ResourceRegen);
        self.resource_regen =
            max_value([self.resource_regen_at_level + self.resource_regen_bonus, 0.0]);

        self.attack_range_bonus = total(BonusStat::AttackRange);
        self.attack_range = max_value([self.attack_range_base + self.attack_range_bonus, 0.0]);

        self.move_speed_bonus_flat = total(BonusStat::MoveSpeedFlat);
        self.move_speed_bonus_perc = total(BonusStat::MoveSpeedPercent);
        self.move_speed_bonus_mult = total(BonusStat::MoveSpeedMulti);
        self.slow = total(BonusStat::Slow);
        // multi_stacking folds a single value x into 1 + x, so the net slow
        // resist rides in as its offset from one.
        self.move_speed = formulas::move_speed(
            self.move_speed_base,
            bonuses.get(BonusStat::MoveSpeedFlat),
            bonuses.get(BonusStat::MoveSpeedPercent),
            bonuses.get(BonusStat::MoveSpeedMulti),
            bonuses.get(BonusStat::Slow),
            Modifier::Single(self.slow_resist - 1.0),
        );
    }

    /// Take `amount` from current health, floored at zero.
    pub(crate) fn damage(&mut self, amount: f64) -> f64 {
        self.health_current = max_value([self.health_current - amount, 0.0]);
        self.health_missing = self.health - self.health_current;
        self.health_current
    }

    /// Restore `amount` of health, capped at the total.
    pub(crate) fn restore_health(&mut self, amount: f64) -> f64 {
        self.health_current = min_value([self.health_current + amount, self.health]);
        self.health_missing = self.health - self.health_current;
        self.health_current
    }

    pub(crate) fn drain_resource(&mut self, amount: f64) -> f64 {
        self.resource_current = max_value([self.resource_current - amount, 0.0]);
        self.resource_missing = self.resource - self.resource_current;
        self.resource_current
    }

    pub(crate) fn restore_resource(&mut self, amount: f64) -> f64 {
        self.resource_current = min_value([self.resource_current + amount, self.resource]);
        self.resource_missing = self.resource - self.resource_current;
        self.resource_current
    }
}

/// Current and missing amounts of a pool after its total changed.
fn pool(total: f64, missing: f64) -> (f64, f64) {
    let current = max_value([total - missing, 0.0]);
    (current, total - current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::Bonus;
    use serde_json::json;

    fn record() -> Map<String, Value> {
        let value = json!({
            "hp": 590.0, "hpperlevel": 104.0,
            "hpregen": 5.5, "hpregenperlevel": 0.5,
            "armor": 32.0, "armorperlevel": 4.7,
            "spellblock": 30.0, "spellblockperlevel": 2.05,
            "attackspeedratio": 0.625, "attackspeed": 0.625, "attackspeedperlevel": 2.5,
            "attackdamage": 60.0, "attackdamageperlevel": 3.0,
            "crit": 0.0,
            "mp": 418.0, "mpperlevel": 25.0, "mpregen": 8.0, "mpregenperlevel": 0.8,
            "attackrange": 125.0, "movespeed": 340.0
        });
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_record_round_trip() {
        let record = record();
        let stats = ChampionStats::from_record(&record);
        assert_eq!(stats.to_record(), record);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let mut record = Map::new();
        record.insert("hp".into(), json!(500));
        record.insert("armor".into(), json!("thirty"));
        let stats = ChampionStats::from_record(&record);
        assert_eq!(stats.health_base, 500.0);
        assert_eq!(stats.armor_base, 0.0);
        assert_eq!(stats.move_speed_base, 0.0);
    }

    #[test]
    fn test_recompute_level_one() {
        let mut stats = ChampionStats::from_record(&record());
        stats.recompute(1, &StatBonuses::new());

        assert_eq!(stats.health, 590.0);
        assert_eq!(stats.health_current, 590.0);
        assert_eq!(stats.health_missing, 0.0);
        assert_eq!(stats.armor, 32.0);
        assert_eq!(stats.attack_speed, 0.625);
        assert_eq!(stats.crit_damage, BASE_CRIT_DAMAGE);
        assert_eq!(stats.move_speed, 340.0);
        assert_eq!(stats.resource_current, 418.0);
        assert_eq!(stats.ar_pen_perc, 0.0);
    }

    #[test]
    fn test_every_growing_stat_uses_the_curve() {
        let mut stats = ChampionStats::from_record(&record());
        stats.recompute(18, &StatBonuses::new());

        // the curve is exactly 17 at level 18
        assert!((stats.health - (590.0 + 104.0 * 17.0)).abs() < 1e-9);
        assert!((stats.health_regen - (5.5 + 0.5 * 17.0)).abs() < 1e-9);
        assert!((stats.armor - (32.0 + 4.7 * 17.0)).abs() < 1e-9);
        assert!((stats.magic_resist - (30.0 + 2.05 * 17.0)).abs() < 1e-9);
        assert!((stats.attack_damage - (60.0 + 3.0 * 17.0)).abs() < 1e-9);
        assert!((stats.resource - (418.0 + 25.0 * 17.0)).abs() < 1e-9);
        assert!((stats.resource_regen - (8.0 + 0.8 * 17.0)).abs() < 1e-9);
        // 2.5% per level -> 0.425 bonus attack speed at 0.625 ratio
        assert!((stats.attack_speed - (0.625 + 0.425 * 0.625)).abs() < 1e-9);
    }

    #[test]
    fn test_bonuses_feed_derived_fields() {
        let mut stats = ChampionStats::from_record(&record());
        let bonuses: StatBonuses = [
            Bonus::new(BonusStat::Health, 400.0),
            Bonus::new(BonusStat::Armor, 40.0),
            Bonus::new(BonusStat::CritChance, 0.6),
            Bonus::new(BonusStat::CritChance, 0.6),
            Bonus::new(BonusStat::BaseHealthRegenPercent, 1.0),
            Bonus::new(BonusStat::ArmorPenPercent, 0.3),
            Bonus::new(BonusStat::AbilityHaste, 20.0),
            Bonus::new(BonusStat::UltimateHaste, 30.0),
        ]
        .into_iter()
        .collect();
        stats.recompute(1, &bonuses);

        assert_eq!(stats.health, 990.0);
        assert_eq!(stats.armor_bonus, 40.0);
        assert_eq!(stats.armor, 72.0);
        assert_eq!(stats.crit_chance, 1.0);
        assert_eq!(stats.health_regen, 11.0);
        assert!((stats.ar_pen_perc - 0.3).abs() < 1e-12);
        assert_eq!(stats.ability_haste_basic, 20.0);
        assert_eq!(stats.ability_haste_ultim, 50.0);
    }

    #[test]
    fn test_stored_fields_match_bonus_totals() {
        let mut stats = ChampionStats::from_record(&record());
        let bonuses: StatBonuses = [
            Bonus::new(BonusStat::Tenacity, 0.3),
            Bonus::new(BonusStat::Tenacity, 0.3),
            Bonus::new(BonusStat::SlowResist, 0.25),
            Bonus::new(BonusStat::ArmorReductionPercent, 0.2),
            Bonus::new(BonusStat::ArmorPenPercent, 0.3),
            Bonus::new(BonusStat::ArmorPenPercent, 0.1),
            Bonus::new(BonusStat::MagicReductionPercent, 0.15),
            Bonus::new(BonusStat::MagicPenPercent, 0.4),
            Bonus::new(BonusStat::MoveSpeedMulti, 0.1),
            Bonus::new(BonusStat::Slow, 0.3),
        ]
        .into_iter()
        .collect();
        stats.recompute(1, &bonuses);

        let pairs = [
            (BonusStat::Tenacity, stats.tenacity),
            (BonusStat::SlowResist, stats.slow_resist),
            (BonusStat::ArmorReductionPercent, stats.ar_red_perc),
            (BonusStat::ArmorPenPercent, stats.ar_pen_perc),
            (BonusStat::MagicReductionPercent, stats.mr_red_perc),
            (BonusStat::MagicPenPercent, stats.mr_pen_perc),
            (BonusStat::MoveSpeedMulti, stats.move_speed_bonus_mult),
            (BonusStat::Slow, stats.slow),
        ];
        for (stat, stored) in pairs {
            assert_eq!(bonuses.total(stat), stored, "{stat:?}");
        }
        assert!((stats.tenacity - 0.51).abs() < 1e-12);
        assert!((stats.ar_pen_perc - 0.43).abs() < 1e-12);
    }

    #[test]
    fn test_negative_bonuses_floor_totals() {
        let mut stats = ChampionStats::from_record(&record());
        let bonuses: StatBonuses = [
            Bonus::new(BonusStat::Armor, -50.0),
            Bonus::new(BonusStat::MagicResist, -40.0),
            Bonus::new(BonusStat::AttackRange, -200.0),
            Bonus::new(BonusStat::AttackSpeed, -5.0),
        ]
        .into_iter()
        .collect();
        stats.recompute(1, &bonuses);

        assert_eq!(stats.armor_bonus, -50.0);
        assert_eq!(stats.armor, 0.0);
        assert_eq!(stats.magic_resist, 0.0);
        assert_eq!(stats.attack_range, 0.0);
        assert_eq!(stats.attack_speed, 0.0);
    }

    #[test]
    fn test_slow_and_slow_resist() {
        let mut stats = ChampionStats::from_record(&record());
        let mut bonuses = StatBonuses::new();
        bonuses.set(BonusStat::Slow, [0.2, 0.5]);
        stats.recompute(1, &bonuses);
        assert_eq!(stats.slow, 0.5);
        assert!((stats.move_speed - 170.0).abs() < 1e-9);

        bonuses.set(BonusStat::SlowResist, 0.5);
        stats.recompute(1, &bonuses);
        assert!((stats.slow_resist - 0.5).abs() < 1e-12);
        assert!((stats.move_speed - 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_pool_keeps_missing() {
        let mut stats = ChampionStats::from_record(&record());
        stats.recompute(1, &StatBonuses::new());
        stats.damage(90.0);
        assert_eq!(stats.health_current, 500.0);

        stats.recompute(2, &StatBonuses::new());
        assert!((stats.health_missing - 90.0).abs() < 1e-9);
        assert!((stats.health - stats.health_current - stats.health_missing).abs() < 1e-9);
    }

    #[test]
    fn test_restore_caps_at_total() {
        let mut stats = ChampionStats::from_record(&record());
        stats.recompute(1, &StatBonuses::new());
        stats.drain_resource(100.0);
        assert_eq!(stats.resource_current, 318.0);
        assert_eq!(stats.restore_resource(1000.0), 418.0);
        assert_eq!(stats.resource_missing, 0.0);

        stats.damage(50.0);
        assert_eq!(stats.restore_health(20.0), 560.0);
        assert_eq!(stats.health_missing, 30.0);
    }
}
