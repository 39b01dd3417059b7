//! Game version selection.

use crate::config::Links;
use crate::data::fetch::{fetch_or_warn, Fetch};
use crate::error::DataError;
use serde_json::Value;

/// Community Dragon patch directory for a Data Dragon version.
///
/// Data Dragon versions carry a trailing build segment that Community Dragon
/// paths leave out. Versions with fewer than three segments (and aliases
/// such as `latest`) pass through.
///
/// ```rust
/// use riftstat::data::versions::cdragon_patch;
///
/// assert_eq!(cdragon_patch("14.23.1"), "14.23");
/// assert_eq!(cdragon_patch("14.3.10"), "14.3");
/// assert_eq!(cdragon_patch("latest"), "latest");
/// ```
pub fn cdragon_patch(version: &str) -> &str {
    if version.matches('.').count() >= 2 {
        version.rsplit_once('.').map_or(version, |(patch, _)| patch)
    } else {
        version
    }
}

/// Live version for the NA realm, read from the realm document's `v` field.
pub fn fetch_version(fetcher: &dyn Fetch, links: &Links) -> Option<String> {
    let realm = fetch_or_warn(fetcher, &links.realm_version)?;
    let version = realm.get("v").and_then(Value::as_str).map(str::to_string);
    if version.is_none() {
        tracing::warn!(url = %links.realm_version, "realm document has no version");
    }
    version
}

/// Every published version, newest first.
pub fn fetch_versions(fetcher: &dyn Fetch, links: &Links) -> Option<Vec<String>> {
    let versions = fetch_or_warn(fetcher, &links.versions)?;
    let Value::Array(entries) = versions else {
        tracing::warn!(url = %links.versions, "version list is not an array");
        return None;
    };
    Some(
        entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

/// Version to use: the realm's live version, else the newest listed one.
///
/// # Errors
///
/// [`DataError::NoVersion`] when neither source produces a version.
pub fn check_version(fetcher: &dyn Fetch, links: &Links) -> Result<String, DataError> {
    if let Some(version) = fetch_version(fetcher, links) {
        return Ok(version);
    }
    tracing::warn!("realm version unavailable, falling back to version list");
    fetch_versions(fetcher, links)
        .and_then(|versions| versions.into_iter().next())
        .ok_or(DataError::NoVersion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fetch::MemoryFetcher;
    use serde_json::json;

    #[test]
    fn test_cdragon_patch() {
        assert_eq!(cdragon_patch("13.1.1"), "13.1");
        assert_eq!(cdragon_patch("14.23"), "14.23");
        assert_eq!(cdragon_patch(""), "");
    }

    #[test]
    fn test_realm_version_wins() {
        let links = Links::default();
        let fetcher = MemoryFetcher::new()
            .with(&links.realm_version, json!({"v": "14.23.1", "l": "en_US"}))
            .with(&links.versions, json!(["14.24.1", "14.23.1"]));
        assert_eq!(check_version(&fetcher, &links).unwrap(), "14.23.1");
    }

    #[test]
    fn test_falls_back_to_version_list() {
        let links = Links::default();
        let fetcher = MemoryFetcher::new().with(&links.versions, json!(["14.24.1", "14.23.1"]));
        assert_eq!(check_version(&fetcher, &links).unwrap(), "14.24.1");
    }

    #[test]
    fn test_realm_without_version_falls_back() {
        let links = Links::default();
        let fetcher = MemoryFetcher::new()
            .with(&links.realm_version, json!({"l": "en_US"}))
            .with(&links.versions, json!(["14.22.1"]));
        assert_eq!(check_version(&fetcher, &links).unwrap(), "14.22.1");
    }

    #[test]
    fn test_no_version() {
        let links = Links::default();
        let fetcher = MemoryFetcher::new().with(&links.versions, json!({"oops": true}));
        assert!(matches!(
            check_version(&fetcher, &links),
            Err(DataError::NoVersion)
        ));
        assert_eq!(fetch_versions(&fetcher, &links), None);
    }
}
