//! Data layer configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all, via [`DataConfig::load_or_default`]) points at the public Data
//! Dragon and Community Dragon endpoints and caches under `./data`.
//!
//! ```toml
//! cache_dir = "cache"
//! locale = "en_US"
//! timeout_secs = 10
//!
//! [links]
//! realm_version = "https://ddragon.leagueoflegends.com/realms/na.json"
//! ```

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Endpoint templates.
///
/// Templates may use `{version}`, `{patch}` (version without its last
/// segment, as Community Dragon expects), `{locale}`, `{champion}` and
/// `{champion_lower}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    pub realm_version: String,
    pub versions: String,
    pub ddragon_items: String,
    pub cdragon_items: String,
    pub ddragon_champs: String,
    pub ddragon_champ: String,
    pub cdragon_champ: String,
}

impl Default for Links {
    fn default() -> Self {
        Self {
            realm_version: "https://ddragon.leagueoflegends.com/realms/na.json".into(),
            versions: "https://ddragon.leagueoflegends.com/api/versions.json".into(),
            ddragon_items: "https://ddragon.leagueoflegends.com/cdn/{version}/data/{locale}/item.json"
                .into(),
            cdragon_items: "https://raw.communitydragon.org/{patch}/game/items.cdtb.bin.json".into(),
            ddragon_champs:
                "https://ddragon.leagueoflegends.com/cdn/{version}/data/{locale}/champion.json"
                    .into(),
            ddragon_champ:
                "https://ddragon.leagueoflegends.com/cdn/{version}/data/{locale}/champion/{champion}.json"
                    .into(),
            cdragon_champ:
                "https://raw.communitydragon.org/{patch}/game/data/characters/{champion_lower}/{champion_lower}.bin.json"
                    .into(),
        }
    }
}

/// Values substituted into a link template.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkParams<'a> {
    pub version: &'a str,
    pub locale: &'a str,
    pub champion: &'a str,
}

impl Links {
    /// Substitute the placeholders of `template`.
    ///
    /// ```rust
    /// use riftstat::config::{LinkParams, Links};
    ///
    /// let url = Links::render(
    ///     "{patch}/{champion_lower}/{version}",
    ///     LinkParams { version: "14.23.1", locale: "en_US", champion: "MonkeyKing" },
    /// );
    /// assert_eq!(url, "14.23/monkeyking/14.23.1");
    /// ```
    pub fn render(template: &str, params: LinkParams<'_>) -> String {
        template
            .replace("{version}", params.version)
            .replace("{patch}", crate::data::versions::cdragon_patch(params.version))
            .replace("{locale}", params.locale)
            .replace("{champion_lower}", &params.champion.to_lowercase())
            .replace("{champion}", params.champion)
    }

    pub fn ddragon_items(&self, version: &str, locale: &str) -> String {
        Self::render(&self.ddragon_items, LinkParams { version, locale, champion: "" })
    }

    pub fn cdragon_items(&self, version: &str) -> String {
        Self::render(&self.cdragon_items, LinkParams { version, ..Default::default() })
    }

    pub fn ddragon_champs(&self, version: &str, locale: &str) -> String {
        Self::render(&self.ddragon_champs, LinkParams { version, locale, champion: "" })
    }

    pub fn ddragon_champ(&self, version: &str, locale: &str, champion: &str) -> String {
        Self::render(&self.ddragon_champ, LinkParams { version, locale, champion })
    }

    pub fn cdragon_champ(&self, version: &str, champion: &str) -> String {
        Self::render(
            &self.cdragon_champ,
            LinkParams { version, champion, ..Default::default() },
        )
    }
}

/// Data layer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the versioned JSON caches.
    pub cache_dir: PathBuf,
    /// Data Dragon locale.
    pub locale: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub links: Links,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("data"),
            locale: "en_US".into(),
            timeout_secs: 10,
            links: Links::default(),
        }
    }
}

impl DataConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, DataError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DataError::io(path.display().to_string(), e))?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, DataError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(DataConfig::from_toml("").unwrap(), DataConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = DataConfig::from_toml(
            r#"
            cache_dir = "/tmp/rift"
            [links]
            versions = "http://localhost/versions.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/rift"));
        assert_eq!(config.locale, "en_US");
        assert_eq!(config.links.versions, "http://localhost/versions.json");
        assert_eq!(config.links.realm_version, Links::default().realm_version);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            DataConfig::from_toml("timeout_secs = \"soon\""),
            Err(DataError::Config(_))
        ));
    }

    #[test]
    fn test_link_helpers() {
        let links = Links::default();
        assert_eq!(
            links.ddragon_champ("14.23.1", "en_US", "Ahri"),
            "https://ddragon.leagueoflegends.com/cdn/14.23.1/data/en_US/champion/Ahri.json"
        );
        assert_eq!(
            links.cdragon_champ("14.23.1", "Ahri"),
            "https://raw.communitydragon.org/14.23/game/data/characters/ahri/ahri.bin.json"
        );
        assert_eq!(
            links.cdragon_items("14.3.1"),
            "https://raw.communitydragon.org/14.3/game/items.cdtb.bin.json"
        );
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = DataConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, DataConfig::default());
    }
}
