//! Combat-stat formulas.
//!
//! Every function here is pure. Inputs that may carry several simultaneous
//! instances take `impl Into<Modifier>` and are reduced through exactly one
//! stacking combinator; the rule used is listed on each function.
//!
//! ```text
//! stat_growth        base + growth * (l-1) * (0.7025 + 0.0175 * (l-1))
//! effective_health   (1 + 0.01 * resist) * health, floored at 0
//! attack_speed       min(base + (bonus + growth curve) * ratio, 3)
//! move_speed         three-tier soft cap at 415 / 490
//! ```

use crate::modifier::Modifier;
use crate::stacking::{add_stacking, max_value, min_value, multi_stacking};

/// Lowest champion level.
pub const MIN_LEVEL: u8 = 1;
/// Highest champion level.
pub const MAX_LEVEL: u8 = 18;

/// Attacks per second no champion can exceed.
pub const ATTACK_SPEED_CAP: f64 = 3.0;

/// Raw move speed up to which no soft cap applies.
pub const MOVE_SPEED_FIRST_CAP: f64 = 415.0;
/// Raw move speed up to which the first soft-cap tier applies.
pub const MOVE_SPEED_SECOND_CAP: f64 = 490.0;

/// Damage multiplier of a critical strike without crit-damage bonuses.
pub const BASE_CRIT_DAMAGE: f64 = 1.75;

/// Stat value at `level`.
///
/// This quadratic curve is shared by every stat that grows with level. It
/// contributes nothing at level 1.
///
/// # Examples
///
/// ```rust
/// use riftstat::formulas::stat_growth;
///
/// assert_eq!(stat_growth(500.0, 80.0, 1), 500.0);
/// // 17 * (0.7025 + 0.0175 * 17) == 17.0
/// assert_eq!(stat_growth(500.0, 80.0, 18), 500.0 + 80.0 * 17.0);
/// ```
pub fn stat_growth(base: f64, growth: f64, level: u8) -> f64 {
    let steps = f64::from(level) - 1.0;
    base + growth * (steps * (0.7025 + 0.0175 * steps))
}

/// Physical or magic effective health.
///
/// `health` and `resist` stack additively. The result is floored at 0.
///
/// ```rust
/// use riftstat::formulas::effective_health;
///
/// assert_eq!(effective_health(100.0, 0.0), 100.0);
/// assert_eq!(effective_health(100.0, -50.0), 50.0);
/// assert_eq!(effective_health([400.0, 200.0], [50.0, 50.0]), 1200.0);
/// ```
pub fn effective_health(health: impl Into<Modifier>, resist: impl Into<Modifier>) -> f64 {
    let health = add_stacking(health);
    let resist = add_stacking(resist);
    let result = (0.01 * resist + 1.0) * health;
    max_value([result, 0.0])
}

/// Attacks per second at `level`.
///
/// `bonus` stacks additively. The per-level growth joins the bonus through
/// the same curve as [`stat_growth`] and the whole bonus scales with `ratio`.
/// Capped at [`ATTACK_SPEED_CAP`].
///
/// ```rust
/// use riftstat::formulas::attack_speed;
///
/// assert_eq!(attack_speed(0.625, 0.0, 1, 1.0, 0.0), 0.625);
/// assert_eq!(attack_speed(0.625, 0.0, 1, 0.625, [5.0, 5.0]), 3.0);
/// ```
pub fn attack_speed(
    base: f64,
    growth: f64,
    level: u8,
    ratio: f64,
    bonus: impl Into<Modifier>,
) -> f64 {
    let steps = f64::from(level) - 1.0;
    let bonus = add_stacking(bonus) + growth * steps * (0.7025 + 0.0175 * steps);
    min_value([base + bonus * ratio, ATTACK_SPEED_CAP])
}

/// Movement speed after modifiers and the soft cap.
///
/// | input      | stacking       |
/// |------------|----------------|
/// | `flat`     | additive       |
/// | `percent`  | additive       |
/// | `multi`    | multiplicative |
/// | `slow`     | max            |
/// | `slow_res` | multiplicative |
///
/// The raw value is `(base + flat) * (1 + percent) * multi * (1 - slow * (1 -
/// slow_res))`. Tiers are checked in ascending order and the first match
/// wins: unchanged up to 415, `ms * 0.8 + 83` up to 490, `ms * 0.5 + 230`
/// above.
///
/// ```rust
/// use riftstat::formulas::move_speed;
/// use riftstat::Modifier;
///
/// let none = Modifier::none;
/// assert_eq!(move_speed(415.0, none(), none(), none(), none(), none()), 415.0);
/// assert_eq!(move_speed(500.0, none(), none(), none(), none(), none()), 480.0);
/// ```
pub fn move_speed(
    base: f64,
    flat: impl Into<Modifier>,
    percent: impl Into<Modifier>,
    multi: impl Into<Modifier>,
    slow: impl Into<Modifier>,
    slow_res: impl Into<Modifier>,
) -> f64 {
    let flat = add_stacking(flat);
    let percent = add_stacking(percent);
    let multi = multi_stacking(multi);
    let slow = max_value(slow);
    let slow_res = multi_stacking(slow_res);

    let ms = (base + flat) * (1.0 + percent) * multi * (1.0 - (slow * (1.0 - slow_res)));
    soft_cap_move_speed(ms)
}

/// The three-tier movement speed soft cap on its own.
pub fn soft_cap_move_speed(ms: f64) -> f64 {
    if ms <= MOVE_SPEED_FIRST_CAP {
        ms
    } else if ms <= MOVE_SPEED_SECOND_CAP {
        ms * 0.8 + 83.0
    } else {
        ms * 0.5 + 230.0
    }
}

/// Outgoing damage modifier. Percent amplifiers stack additively.
pub fn damage_dealt_modifier(mods: impl Into<Modifier>) -> f64 {
    add_stacking(mods)
}

/// Incoming damage modifier. Amplifications and reductions stack
/// multiplicatively, so `-0.2` and `-0.2` give `0.64`.
pub fn damage_received_modifier(mods: impl Into<Modifier>) -> f64 {
    multi_stacking(mods)
}

/// Damage reduction granted by a resistance value.
///
/// Positive resistance reduces damage by `1 - 100 / (100 + resist)`. At or
/// below zero the `2 - 100 / (100 + resist)` branch applies, so the zero
/// boundary yields `1.0`.
///
/// That branch has a pole at `resist == -100`. The denominator is floored
/// at `1`, so anything at or below `-99` resists with the finite `-98.0`.
///
/// ```rust
/// use riftstat::formulas::damage_reduction_resistances;
///
/// assert_eq!(damage_reduction_resistances(100.0), 0.5);
/// assert_eq!(damage_reduction_resistances(0.0), 1.0);
/// assert_eq!(damage_reduction_resistances(-100.0), -98.0);
/// ```
pub fn damage_reduction_resistances(resist: f64) -> f64 {
    if resist > 0.0 {
        1.0 - 100.0 / (100.0 + resist)
    } else {
        2.0 - 100.0 / (100.0 + resist).max(1.0)
    }
}

/// Remaining fraction of a stat after percent reduction or penetration.
///
/// Instances combine multiplicatively and are re-based around zero, so a
/// single `0.3` leaves `0.7` and large stacks can go negative.
fn percent_remaining(values: impl Into<Modifier>) -> f64 {
    1.0 - (multi_stacking(values) - 1.0)
}

/// Resistance left after reduction and penetration.
///
/// `base`, `bonus`, `flat_red` and `flat_pen` stack additively; `perc_red`
/// and `perc_pen` stack multiplicatively.
///
/// Flat reduction is split between base and bonus resistance by their share
/// of the total. When the reduced total is still positive, percent reduction
/// and percent penetration scale each share, flat penetration comes off the
/// combined total and the total is floored at 0. A total already at or below
/// zero is returned as reduced, so flat reduction alone can leave it
/// negative. With no resistance at all there is nothing to split and flat
/// reduction contributes nothing.
///
/// Returns `(base_remaining, bonus_remaining, total_remaining)`.
///
/// ```rust
/// use riftstat::formulas::resistance_post_pen;
/// use riftstat::Modifier;
///
/// let none = Modifier::none;
/// let (base, bonus, total) = resistance_post_pen(60.0, 40.0, 10.0, none(), none(), 0.0);
/// assert_eq!((base, bonus, total), (54.0, 36.0, 90.0));
/// ```
pub fn resistance_post_pen(
    base: impl Into<Modifier>,
    bonus: impl Into<Modifier>,
    flat_red: impl Into<Modifier>,
    perc_red: impl Into<Modifier>,
    perc_pen: impl Into<Modifier>,
    flat_pen: impl Into<Modifier>,
) -> (f64, f64, f64) {
    let base = add_stacking(base);
    let bonus = add_stacking(bonus);
    let flat_red = add_stacking(flat_red);
    let perc_red = percent_remaining(perc_red);
    let perc_pen = percent_remaining(perc_pen);
    let flat_pen = add_stacking(flat_pen);

    let combined = base + bonus;
    let (base_ratio, bonus_ratio) = if combined == 0.0 {
        (0.0, 0.0)
    } else {
        (base / combined, bonus / combined)
    };

    let mut base = base - flat_red * base_ratio;
    let mut bonus = bonus - flat_red * bonus_ratio;
    let mut total = base + bonus;
    if total > 0.0 {
        base *= perc_red * perc_pen;
        bonus *= perc_red * perc_pen;
        total = max_value([base + bonus - flat_pen, 0.0]);
    }

    (base, bonus, total)
}

/// Expected damage of one basic attack over crit and non-crit outcomes.
///
/// ```rust
/// use riftstat::formulas::avg_damage_per_attack;
///
/// assert_eq!(avg_damage_per_attack(100.0, 0.0, 1.75), 100.0);
/// assert_eq!(avg_damage_per_attack(100.0, 1.0, 1.75), 175.0);
/// ```
pub fn avg_damage_per_attack(attack_damage: f64, crit_chance: f64, crit_mod: f64) -> f64 {
    attack_damage + (attack_damage * crit_chance * (crit_mod - 1.0))
}

/// Net percent reduction from several tenacity-style instances.
///
/// Each instance removes its share of what is left: `0.3` and `0.3` give
/// `0.51`.
pub fn tenacity(reductions: impl Into<Modifier>) -> f64 {
    1.0 - multi_stacking(reductions.into().map(|value| -value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none() -> Modifier {
        Modifier::none()
    }

    #[test]
    fn test_stat_growth_level_one() {
        for (base, growth) in [(500.0, 80.0), (0.0, 0.0), (30.0, 4.7), (-5.0, 1000.0)] {
            assert_eq!(stat_growth(base, growth, 1), base);
        }
    }

    #[test]
    fn test_stat_growth_curve() {
        // (l-1) * (0.7025 + 0.0175 * (l-1)) at level 2 is 0.72
        assert!((stat_growth(0.0, 100.0, 2) - 72.0).abs() < 1e-9);
        assert!((stat_growth(0.0, 100.0, 18) - 1700.0).abs() < 1e-9);
    }

    #[test]
    fn test_effective_health() {
        assert_eq!(effective_health(100.0, 0.0), 100.0);
        assert_eq!(effective_health(100.0, -50.0), 50.0);
        assert_eq!(effective_health(100.0, 100.0), 200.0);
        // floored at zero
        assert_eq!(effective_health(100.0, -300.0), 0.0);
    }

    #[test]
    fn test_attack_speed_cap() {
        assert_eq!(attack_speed(0.625, 0.0, 1, 1.0, 0.0), 0.625);
        for bonus in [0.0, 0.5, 1.0, 4.0, 100.0] {
            for level in MIN_LEVEL..=MAX_LEVEL {
                assert!(attack_speed(0.625, 0.025, level, 0.625, bonus) <= ATTACK_SPEED_CAP);
            }
        }
    }

    #[test]
    fn test_attack_speed_growth_joins_bonus() {
        // growth curve at level 18 is exactly 17
        let expected = 0.625 + (0.5 + 0.02 * 17.0 * 1.0) * 0.625;
        let actual = attack_speed(0.625, 0.02, 18, 0.625, 0.5);
        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn test_move_speed_tiers() {
        assert_eq!(move_speed(415.0, none(), none(), none(), none(), none()), 415.0);
        assert_eq!(
            move_speed(415.0001, none(), none(), none(), none(), none()),
            415.0001 * 0.8 + 83.0
        );
        assert_eq!(
            move_speed(490.0, none(), none(), none(), none(), none()),
            490.0 * 0.8 + 83.0
        );
        assert_eq!(
            move_speed(490.0001, none(), none(), none(), none(), none()),
            490.0001 * 0.5 + 230.0
        );
    }

    #[test]
    fn test_move_speed_modifiers() {
        // (330 + 25) * 1.1 = 390.5, under the first cap
        let ms = move_speed(330.0, 25.0, 0.1, none(), none(), none());
        assert!((ms - 390.5).abs() < 1e-9);

        // strongest slow only; no slow resist instance means multi_stacking is 1
        let slowed = move_speed(300.0, none(), none(), none(), [0.2, 0.4], -1.0);
        assert!((slowed - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_damage_modifiers() {
        assert!((damage_dealt_modifier([0.1, 0.15]) - 0.25).abs() < 1e-12);
        assert!((damage_received_modifier([-0.2, -0.2]) - 0.64).abs() < 1e-12);
        assert_eq!(damage_received_modifier(none()), 1.0);
    }

    #[test]
    fn test_damage_reduction_resistances() {
        assert_eq!(damage_reduction_resistances(100.0), 0.5);
        assert_eq!(damage_reduction_resistances(0.0), 1.0);
        assert_eq!(damage_reduction_resistances(-50.0), 0.0);
    }

    #[test]
    fn test_damage_reduction_resistances_pole() {
        assert_eq!(damage_reduction_resistances(-99.0), -98.0);
        assert_eq!(damage_reduction_resistances(-100.0), -98.0);
        assert_eq!(damage_reduction_resistances(-150.0), -98.0);
        assert!(damage_reduction_resistances(-99.5).is_finite());
        assert!(damage_reduction_resistances(-98.0) > damage_reduction_resistances(-99.0));
    }

    #[test]
    fn test_resistance_post_pen_flat_reduction_split() {
        let (base, bonus, total) = resistance_post_pen(60.0, 40.0, 10.0, none(), none(), 0.0);
        assert_eq!(base, 54.0);
        assert_eq!(bonus, 36.0);
        assert_eq!(total, 90.0);
    }

    #[test]
    fn test_resistance_post_pen_percent_and_flat_pen() {
        // 30% pen leaves 70 of 100, then 18 flat pen
        let (base, bonus, total) = resistance_post_pen(50.0, 50.0, 0.0, none(), 0.3, 18.0);
        assert!((base - 35.0).abs() < 1e-9);
        assert!((bonus - 35.0).abs() < 1e-9);
        assert!((total - 52.0).abs() < 1e-9);
    }

    #[test]
    fn test_resistance_post_pen_floors_after_pen() {
        let (_, _, total) = resistance_post_pen(20.0, 0.0, 0.0, none(), none(), 50.0);
        assert_eq!(total, 0.0);
    }

    #[test]
    fn test_resistance_post_pen_negative_after_reduction() {
        let (base, bonus, total) = resistance_post_pen(30.0, 0.0, 40.0, 0.5, 0.5, 10.0);
        assert_eq!(base, -10.0);
        assert_eq!(bonus, 0.0);
        assert_eq!(total, -10.0);
    }

    #[test]
    fn test_resistance_post_pen_zero_resistance() {
        let (base, bonus, total) = resistance_post_pen(0.0, 0.0, 25.0, 0.3, 0.3, 10.0);
        assert_eq!((base, bonus, total), (0.0, 0.0, 0.0));
        assert!(!total.is_nan());
    }

    #[test]
    fn test_avg_damage_per_attack() {
        assert_eq!(avg_damage_per_attack(200.0, 0.5, 1.75), 275.0);
        assert_eq!(avg_damage_per_attack(200.0, 0.0, 2.0), 200.0);
    }

    #[test]
    fn test_tenacity() {
        assert_eq!(tenacity(none()), 0.0);
        assert!((tenacity(0.3) - 0.3).abs() < 1e-12);
        assert!((tenacity([0.3, 0.3]) - 0.51).abs() < 1e-12);
    }
}
