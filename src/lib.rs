//! # riftstat - League of Legends Champion Stat Model
//!
//! A champion combat-stat model built on a small, exact formula library,
//! plus a data layer that aggregates champion and item data from Data
//! Dragon and Community Dragon.
//!
//! - **Exact** formulas over `f64`, each modifier reduced by one stacking rule
//! - **Always consistent** derived stats: every level or bonus change
//!   recomputes the whole record
//! - **Offline-friendly** data: feeds are cached as versioned JSON files
//!
//! ## Core Concepts
//!
//! ### Stat Pipeline
//!
//! ```text
//! [stat record] -> [Champion @ level] + [StatBonuses] -> [ChampionStats]
//! ```
//!
//! 1. **Records** hold base values and per-level growth
//! 2. **Bonuses** are stacked per stat (`Max`, `Min`, additive or multiplicative)
//! 3. **ChampionStats** holds every derived value for the current level
//!
//! ## Example
//!
//! ```rust
//! use riftstat::{Bonus, BonusStat, Champion};
//! use serde_json::json;
//!
//! let record = json!({
//!     "hp": 500.0, "hpperlevel": 80.0,
//!     "armor": 30.0, "armorperlevel": 4.0,
//! });
//! let mut champion = Champion::from_record("Example", &record).unwrap();
//! champion.set_level(18).unwrap();
//! assert_eq!(champion.stats().health, 1860.0);
//!
//! champion.add_bonus(Bonus::on(BonusStat::Health).value(400.0));
//! assert_eq!(champion.stats().health, 2260.0);
//! ```
//!
//! ## Modules
//!
//! - [`modifier`] - Single or multiple modifier instances
//! - [`stacking`] - Stacking rules
//! - [`formulas`] - Game formulas
//! - [`bonus`] - Stat bonuses and item stat keys
//! - [`stats`] - Champion stat record
//! - [`champion`] - Champion model
//! - [`config`] - Data layer configuration
//! - [`data`] - Feeds, cache and merged game data
//! - [`error`] - Error types

pub mod bonus;
pub mod champion;
pub mod config;
pub mod data;
pub mod error;
pub mod formulas;
pub mod modifier;
pub mod stacking;
pub mod stats;

// Re-export main types for convenience
pub use bonus::{Bonus, BonusStat, StatBonuses};
pub use champion::Champion;
pub use config::DataConfig;
pub use data::GameData;
pub use error::{DataError, StatError};
pub use modifier::Modifier;
pub use stacking::StackRule;
pub use stats::ChampionStats;
