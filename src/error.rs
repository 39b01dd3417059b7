//! Error types.
//!
//! The stat model only fails on malformed construction input, reported as
//! [`StatError`]. Everything that touches the network, the file system or
//! the upstream feeds reports a [`DataError`].

use thiserror::Error;

/// Format a recipe cycle path as a readable string.
fn format_cycle_path(path: &[String]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.join(" -> ")
}

/// Errors raised while building or mutating a champion.
///
/// # Examples
///
/// ```rust
/// use riftstat::StatError;
///
/// let err = StatError::InvalidLevel(19);
/// assert_eq!(err.to_string(), "Invalid champion level: 19 (expected 1..=18)");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatError {
    /// The stat record was not a mapping.
    ///
    /// Contains the JSON type that was received instead.
    #[error("Invalid stat record: expected an object, found {0}")]
    InvalidInput(String),

    /// A level outside `1..=18` was requested.
    #[error("Invalid champion level: {0} (expected 1..=18)")]
    InvalidLevel(u8),
}

/// Errors raised by the data layer (fetch, cache, config, cleaning).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A fetch failed for a reason other than transport, e.g. a status code
    /// or a missing fixture.
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Neither the realm endpoint nor the version list produced a version.
    #[error("No game version available")]
    NoVersion,

    /// A feed answered with data for another game version.
    #[error("Version mismatch: requested {requested}, received {received}")]
    VersionMismatch { requested: String, received: String },

    #[error("Unknown champion: {0}")]
    UnknownChampion(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// The item recipe graph contains a cycle.
    ///
    /// If A builds from B and B builds from A, the path is `[A, B, A]`.
    #[error("Recipe cycle detected: {}", format_cycle_path(.path))]
    RecipeCycle { path: Vec<String> },

    #[error(transparent)]
    Stat(#[from] StatError),
}

impl DataError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StatError::InvalidInput("array".into());
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_cycle_error_display() {
        let err = DataError::RecipeCycle {
            path: vec!["1001".into(), "3006".into(), "1001".into()],
        };
        let display = err.to_string();
        assert!(display.contains("Recipe cycle detected"));
        assert!(display.contains("1001 -> 3006 -> 1001"));
    }

    #[test]
    fn test_empty_cycle_display() {
        let err = DataError::RecipeCycle { path: vec![] };
        assert!(err.to_string().contains("(empty cycle)"));
    }

    #[test]
    fn test_stat_error_converts() {
        let err: DataError = StatError::InvalidLevel(0).into();
        assert!(matches!(err, DataError::Stat(StatError::InvalidLevel(0))));
    }
}
