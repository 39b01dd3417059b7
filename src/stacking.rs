//! Stacking combinators.
//!
//! Several simultaneous instances of the same modifier combine into one
//! effective value through exactly one of four rules. A bare value is a
//! one-element collection for every rule.

use crate::modifier::Modifier;

/// Rule for combining simultaneous instances of one modifier.
///
/// # Examples
///
/// ```rust
/// use riftstat::{Modifier, StackRule};
///
/// let slows = Modifier::from([0.3, 0.5]);
/// assert_eq!(StackRule::Max.apply(&slows), 0.5);
/// assert_eq!(StackRule::Additive.apply(&slows), 0.8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackRule {
    /// Only the strongest instance applies.
    Max,
    /// Only the weakest instance applies. Used to express hard caps.
    Min,
    /// Instances are summed.
    Additive,
    /// Instances are combined as the product of `1 + x`.
    Multiplicative,
}

impl StackRule {
    /// Reduce `values` with this rule.
    pub fn apply(self, values: &Modifier) -> f64 {
        match self {
            StackRule::Max => max_value(values),
            StackRule::Min => min_value(values),
            StackRule::Additive => add_stacking(values),
            StackRule::Multiplicative => multi_stacking(values),
        }
    }

    /// Value of an empty collection under this rule.
    pub fn identity(self) -> f64 {
        match self {
            StackRule::Multiplicative => 1.0,
            _ => 0.0,
        }
    }
}

/// Largest instance. A bare value passes through; no instance yields `0`.
///
/// ```rust
/// use riftstat::stacking::max_value;
///
/// assert_eq!(max_value(0.4), 0.4);
/// assert_eq!(max_value([0.2, 0.6, 0.4]), 0.6);
/// ```
pub fn max_value(values: impl Into<Modifier>) -> f64 {
    match values.into() {
        Modifier::Single(value) => value,
        Modifier::Many(values) => values.into_iter().reduce(f64::max).unwrap_or(0.0),
    }
}

/// Smallest instance. A bare value passes through; no instance yields `0`.
///
/// ```rust
/// use riftstat::stacking::min_value;
///
/// assert_eq!(min_value(2.5), 2.5);
/// assert_eq!(min_value([3.4, 3.0]), 3.0);
/// ```
pub fn min_value(values: impl Into<Modifier>) -> f64 {
    match values.into() {
        Modifier::Single(value) => value,
        Modifier::Many(values) => values.into_iter().reduce(f64::min).unwrap_or(0.0),
    }
}

/// Sum of all instances, `0` when empty.
pub fn add_stacking(values: impl Into<Modifier>) -> f64 {
    match values.into() {
        Modifier::Single(value) => value,
        Modifier::Many(values) => values.into_iter().sum(),
    }
}

/// Product of `1 + x` over all instances, `1` when empty.
///
/// ```rust
/// use riftstat::stacking::multi_stacking;
///
/// assert_eq!(multi_stacking(0.5), 1.5);
/// assert_eq!(multi_stacking([1.0, 1.0]), 4.0);
/// assert_eq!(multi_stacking(Vec::<f64>::new()), 1.0);
/// ```
pub fn multi_stacking(values: impl Into<Modifier>) -> f64 {
    match values.into() {
        Modifier::Single(value) => 1.0 + value,
        Modifier::Many(values) => values.into_iter().map(|value| 1.0 + value).product(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collections() {
        assert_eq!(add_stacking(Modifier::none()), 0.0);
        assert_eq!(multi_stacking(Modifier::none()), 1.0);
        assert_eq!(max_value(Modifier::none()), 0.0);
        assert_eq!(min_value(Modifier::none()), 0.0);
    }

    #[test]
    fn test_scalar_pass_through() {
        for x in [-3.5, 0.0, 0.25, 415.0] {
            assert_eq!(max_value(x), x);
            assert_eq!(min_value(x), x);
            assert_eq!(add_stacking(x), x);
            assert_eq!(multi_stacking(x), 1.0 + x);
        }
    }

    #[test]
    fn test_collections() {
        let values = Modifier::from([0.2, -0.1, 0.5]);
        assert_eq!(max_value(&values), 0.5);
        assert_eq!(min_value(&values), -0.1);
        assert!((add_stacking(&values) - 0.6).abs() < 1e-12);
        assert!((multi_stacking(&values) - 1.2 * 0.9 * 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_rule_dispatch_and_identity() {
        let empty = Modifier::none();
        for rule in [
            StackRule::Max,
            StackRule::Min,
            StackRule::Additive,
            StackRule::Multiplicative,
        ] {
            assert_eq!(rule.apply(&empty), rule.identity());
        }
        assert_eq!(StackRule::Min.apply(&Modifier::from([4.0, 3.0])), 3.0);
    }
}
