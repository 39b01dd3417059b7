//! Modifier values.
//!
//! A stat input is either a single value or a collection of simultaneous
//! instances (one per item, buff or rune). [`Modifier`] makes that explicit
//! so the stacking combinators can match on it instead of guessing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single modifier value or an ordered collection of instances.
///
/// # Examples
///
/// ```rust
/// use riftstat::Modifier;
///
/// let single: Modifier = 0.25.into();
/// let many: Modifier = vec![0.25, 0.1].into();
///
/// assert_eq!(single, Modifier::Single(0.25));
/// assert_eq!(many.len(), 2);
/// assert!(Modifier::none().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    /// A bare value, treated as a one-element collection.
    Single(f64),
    /// Zero or more instances.
    Many(Vec<f64>),
}

impl Modifier {
    /// An empty collection: no instance applies.
    pub fn none() -> Self {
        Modifier::Many(Vec::new())
    }

    /// All instances as a slice.
    pub fn values(&self) -> &[f64] {
        match self {
            Modifier::Single(value) => std::slice::from_ref(value),
            Modifier::Many(values) => values,
        }
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Append an instance, promoting a `Single` into `Many`.
    pub fn push(&mut self, value: f64) {
        match self {
            Modifier::Single(existing) => *self = Modifier::Many(vec![*existing, value]),
            Modifier::Many(values) => values.push(value),
        }
    }

    /// Apply `f` to every instance, keeping the shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Modifier::Single(value) => Modifier::Single(f(*value)),
            Modifier::Many(values) => Modifier::Many(values.iter().map(|v| f(*v)).collect()),
        }
    }
}

impl Default for Modifier {
    fn default() -> Self {
        Modifier::none()
    }
}

impl From<f64> for Modifier {
    fn from(value: f64) -> Self {
        Modifier::Single(value)
    }
}

impl From<Vec<f64>> for Modifier {
    fn from(values: Vec<f64>) -> Self {
        Modifier::Many(values)
    }
}

impl From<&[f64]> for Modifier {
    fn from(values: &[f64]) -> Self {
        Modifier::Many(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Modifier {
    fn from(values: [f64; N]) -> Self {
        Modifier::Many(values.to_vec())
    }
}

impl From<&Modifier> for Modifier {
    fn from(modifier: &Modifier) -> Self {
        modifier.clone()
    }
}

impl Serialize for Modifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Modifier::Single(value) => value.serialize(serializer),
            Modifier::Many(values) => values.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Modifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Single(f64),
            Many(Vec<f64>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Single(value) => Modifier::Single(value),
            Repr::Many(values) => Modifier::Many(values),
        })
    }
}
