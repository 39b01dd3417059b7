//! Bonus inputs.
//!
//! Items, buffs and runes contribute instances to named bonus stats. Each
//! [`BonusStat`] knows the [`StackRule`] its instances combine with, and
//! [`StatBonuses`] collects the instances for one champion. The stat model
//! reads the collected [`Modifier`]s when it recomputes derived fields.

use crate::formulas;
use crate::modifier::Modifier;
use crate::stacking::{multi_stacking, StackRule};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Every stat an external modifier can contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusStat {
    Health,
    HealthRegen,
    /// Percent of level-scaled health regen, e.g. `0.5` for 50%.
    BaseHealthRegenPercent,
    Armor,
    MagicResist,
    AttackDamage,
    /// Bonus attack speed as a fraction, e.g. `0.25` for 25%.
    AttackSpeed,
    AbilityPower,
    CritChance,
    CritDamage,
    Resource,
    ResourceRegen,
    BaseResourceRegenPercent,
    AttackRange,
    MoveSpeedFlat,
    MoveSpeedPercent,
    MoveSpeedMulti,
    /// Slow strength on the champion; only the strongest applies.
    Slow,
    SlowResist,
    Tenacity,
    HealShieldPower,
    AbilityHaste,
    BasicAbilityHaste,
    UltimateHaste,
    LifeSteal,
    PhysicalVamp,
    Omnivamp,
    ArmorReductionFlat,
    ArmorReductionPercent,
    ArmorPenPercent,
    /// Lethality.
    ArmorPenFlat,
    MagicReductionFlat,
    MagicReductionPercent,
    MagicPenPercent,
    MagicPenFlat,
}

impl BonusStat {
    /// How simultaneous instances of this stat combine.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use riftstat::{BonusStat, StackRule};
    ///
    /// assert_eq!(BonusStat::Slow.rule(), StackRule::Max);
    /// assert_eq!(BonusStat::Armor.rule(), StackRule::Additive);
    /// assert_eq!(BonusStat::MoveSpeedMulti.rule(), StackRule::Multiplicative);
    /// ```
    pub fn rule(self) -> StackRule {
        match self {
            BonusStat::Slow => StackRule::Max,
            BonusStat::MoveSpeedMulti
            | BonusStat::SlowResist
            | BonusStat::Tenacity
            | BonusStat::ArmorReductionPercent
            | BonusStat::ArmorPenPercent
            | BonusStat::MagicReductionPercent
            | BonusStat::MagicPenPercent => StackRule::Multiplicative,
            _ => StackRule::Additive,
        }
    }

    /// Combined value of `instances`, as the champion model stores it.
    ///
    /// Most stats reduce with their [`rule`](Self::rule) alone. Tenacity and
    /// slow resist combine into the net reduction `1 - Π(1 - x)`, and the
    /// percent reduction and penetration stats into the net fraction
    /// `Π(1 + x) - 1`. No instances give `0` for all of these.
    ///
    /// ```rust
    /// use riftstat::{BonusStat, Modifier};
    ///
    /// assert_eq!(BonusStat::Armor.combine(&Modifier::from([10.0, 20.0])), 30.0);
    /// assert_eq!(BonusStat::Tenacity.combine(&Modifier::none()), 0.0);
    /// assert_eq!(BonusStat::ArmorPenPercent.combine(&Modifier::none()), 0.0);
    /// ```
    pub fn combine(self, instances: &Modifier) -> f64 {
        match self {
            BonusStat::Tenacity | BonusStat::SlowResist => formulas::tenacity(instances),
            BonusStat::ArmorReductionPercent
            | BonusStat::ArmorPenPercent
            | BonusStat::MagicReductionPercent
            | BonusStat::MagicPenPercent => multi_stacking(instances) - 1.0,
            _ => self.rule().apply(instances),
        }
    }
}

/// Mapping between an item tooltip stat type, its Community Dragon field
/// and the bonus it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStatKey {
    /// `type` of an entry in the item's tooltip stat list.
    pub tooltip: &'static str,
    /// Field carrying the value on the Community Dragon item record.
    pub field: &'static str,
    /// `None` for stats the champion model does not use.
    pub stat: Option<BonusStat>,
}

const fn key(tooltip: &'static str, field: &'static str, stat: BonusStat) -> ItemStatKey {
    ItemStatKey {
        tooltip,
        field,
        stat: Some(stat),
    }
}

/// Item stat fields understood by [`StatBonuses::from_items`].
pub const ITEM_STAT_KEYS: &[ItemStatKey] = &[
    key("Health", "mFlatHPPoolMod", BonusStat::Health),
    key("HealthRegen", "mFlatHPRegenMod", BonusStat::HealthRegen),
    key("BaseHealthRegen", "mPercentBaseHPRegenMod", BonusStat::BaseHealthRegenPercent),
    key("Armor", "mFlatArmorMod", BonusStat::Armor),
    key("MagicResist", "mFlatSpellBlockMod", BonusStat::MagicResist),
    key("AttackDamage", "mFlatPhysicalDamageMod", BonusStat::AttackDamage),
    key("AbilityPower", "mFlatMagicDamageMod", BonusStat::AbilityPower),
    key("AttackSpeed", "mPercentAttackSpeedMod", BonusStat::AttackSpeed),
    key("CritChance", "mFlatCritChanceMod", BonusStat::CritChance),
    key("CritDamage", "mFlatCritDamageMod", BonusStat::CritDamage),
    key("Mana", "mFlatMPPoolMod", BonusStat::Resource),
    key("BaseManaRegen", "mPercentBaseMPRegenMod", BonusStat::BaseResourceRegenPercent),
    key("MoveSpeed", "mFlatMovementSpeedMod", BonusStat::MoveSpeedFlat),
    key("PercentMoveSpeed", "mPercentMovementSpeedMod", BonusStat::MoveSpeedPercent),
    key("AbilityHaste", "mAbilityHasteMod", BonusStat::AbilityHaste),
    key("LifeSteal", "mPercentLifeStealMod", BonusStat::LifeSteal),
    key("Omnivamp", "mPercentOmnivampMod", BonusStat::Omnivamp),
    key("Lethality", "mPhysicalLethality", BonusStat::ArmorPenFlat),
    key("ArmorPenetration", "mPercentArmorPenetrationMod", BonusStat::ArmorPenPercent),
    key("MagicPenetration", "mFlatMagicPenetrationMod", BonusStat::MagicPenFlat),
    key("PercentMagicPenetration", "mPercentMagicPenetrationMod", BonusStat::MagicPenPercent),
    key("Tenacity", "mPercentTenacityItemMod", BonusStat::Tenacity),
    key("SlowResist", "mPercentSlowResistMod", BonusStat::SlowResist),
    key("HealAndShieldPower", "mPercentHealAndShieldMod", BonusStat::HealShieldPower),
    ItemStatKey {
        tooltip: "GoldPer10",
        field: "mGoldPer10Mod",
        stat: None,
    },
];

/// One instance of a bonus.
///
/// # Examples
///
/// ```rust
/// use riftstat::bonus::{Bonus, BonusStat};
///
/// let armor = Bonus::on(BonusStat::Armor).value(30.0);
/// let attack_speed = Bonus::on(BonusStat::AttackSpeed).percent_points(25.0);
///
/// assert_eq!(armor.value, 30.0);
/// assert_eq!(attack_speed.value, 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bonus {
    pub stat: BonusStat,
    pub value: f64,
}

/// Builder returned by [`Bonus::on`].
pub struct BonusBuilder {
    stat: BonusStat,
}

impl Bonus {
    pub fn new(stat: BonusStat, value: f64) -> Self {
        Self { stat, value }
    }

    /// Start a bonus for `stat`.
    pub fn on(stat: BonusStat) -> BonusBuilder {
        BonusBuilder { stat }
    }
}

impl BonusBuilder {
    /// Use `value` as is (flat amount or fraction).
    pub fn value(self, value: f64) -> Bonus {
        Bonus::new(self.stat, value)
    }

    /// Use a percentage given in points, e.g. `25.0` for 25%.
    pub fn percent_points(self, points: f64) -> Bonus {
        Bonus::new(self.stat, points / 100.0)
    }
}

/// All bonus instances currently applied to one champion.
///
/// # Examples
///
/// ```rust
/// use riftstat::bonus::{Bonus, BonusStat, StatBonuses};
///
/// let mut bonuses = StatBonuses::new();
/// bonuses.push(Bonus::new(BonusStat::Slow, 0.3));
/// bonuses.push(Bonus::new(BonusStat::Slow, 0.5));
/// bonuses.push(Bonus::new(BonusStat::Armor, 20.0));
/// bonuses.push(Bonus::new(BonusStat::Armor, 25.0));
///
/// assert_eq!(bonuses.total(BonusStat::Slow), 0.5);
/// assert_eq!(bonuses.total(BonusStat::Armor), 45.0);
/// assert_eq!(bonuses.total(BonusStat::Health), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBonuses {
    values: BTreeMap<BonusStat, Modifier>,
}

impl StatBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one instance.
    pub fn push(&mut self, bonus: Bonus) {
        self.values
            .entry(bonus.stat)
            .or_insert_with(Modifier::none)
            .push(bonus.value);
    }

    /// Replace every instance of `stat` with `modifier`.
    pub fn set(&mut self, stat: BonusStat, modifier: impl Into<Modifier>) {
        self.values.insert(stat, modifier.into());
    }

    /// Instances of `stat`, empty when none were added.
    pub fn get(&self, stat: BonusStat) -> Modifier {
        self.values.get(&stat).cloned().unwrap_or_default()
    }

    /// Instances of `stat` combined through [`BonusStat::combine`], the
    /// value [`ChampionStats`](crate::ChampionStats) derives from them.
    pub fn total(&self, stat: BonusStat) -> f64 {
        match self.values.get(&stat) {
            Some(modifier) => stat.combine(modifier),
            None => stat.combine(&Modifier::none()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(Modifier::is_empty)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Fold the stats of merged item records into bonuses.
    ///
    /// Stat values are read from each item's `stats` object, falling back to
    /// the top level of the record. Zero and non-numeric values are skipped.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut bonuses = Self::new();
        for item in items {
            bonuses.add_item(item);
        }
        bonuses
    }

    /// Add the stats of one merged item record.
    pub fn add_item(&mut self, item: &Value) {
        let stats = item.get("stats").unwrap_or(item);
        for entry in ITEM_STAT_KEYS {
            let Some(stat) = entry.stat else {
                continue;
            };
            let value = stats
                .get(entry.field)
                .or_else(|| item.get(entry.field))
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            if value != 0.0 {
                self.push(Bonus::new(stat, value));
            }
        }
    }
}

impl Extend<Bonus> for StatBonuses {
    fn extend<T: IntoIterator<Item = Bonus>>(&mut self, iter: T) {
        for bonus in iter {
            self.push(bonus);
        }
    }
}

impl FromIterator<Bonus> for StatBonuses {
    fn from_iter<T: IntoIterator<Item = Bonus>>(iter: T) -> Self {
        let mut bonuses = Self::new();
        bonuses.extend(iter);
        bonuses
    }
}
