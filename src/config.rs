use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{SubdomainError, SubdomainResult};

/// File name of the preference file inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".netlify-subdomain-config.json";

/// Number of entries kept in [`Config::recent_domains`].
pub const MAX_RECENT_DOMAINS: usize = 10;

const DEFAULT_DOMAIN: &str = "danielle.world";

const DEFAULT_ALIASES: [(&str, &str); 6] = [
    ("juice", "juice-box-musical"),
    ("wedding", "melodic-longma-cade27"),
    ("recipes", "gleeful-profiterole-f78030"),
    ("piano", "chipper-daifuku-fbdde1"),
    ("inventory", "personal-inventory"),
    ("main", "danielleworld"),
];

/// Local preferences: default base domain, site alias shortcuts and
/// recently added domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base domain used by `add` when none is given.
    pub default_domain: String,
    /// Shortcut name -> site name or id, in insertion order.
    #[serde(default)]
    pub aliases: IndexMap<String, String>,
    /// Most recent first, at most [`MAX_RECENT_DOMAINS`] entries.
    #[serde(default)]
    pub recent_domains: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_domain: DEFAULT_DOMAIN.to_string(),
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(name, site)| ((*name).to_string(), (*site).to_string()))
                .collect(),
            recent_domains: Vec::new(),
        }
    }
}

impl Config {
    /// Load the config at `path`, falling back to the defaults when
    /// the file is missing or cannot be parsed.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::debug!("no config at {}: {e}", path.display());
                return Self::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable config {}: {e}", path.display());
            Self::default()
        })
    }

    /// Write the config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> SubdomainResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        log::debug!("config saved to {}", path.display());
        Ok(())
    }

    /// Site an alias points to.
    #[must_use]
    pub fn resolve_alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// First alias name pointing at `site`.
    #[must_use]
    pub fn alias_for_site(&self, site: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(_, target)| target.as_str() == site)
            .map(|(name, _)| name.as_str())
    }

    pub fn set_alias(&mut self, name: &str, site: &str) {
        self.aliases.insert(name.to_string(), site.to_string());
    }

    /// Remove an alias, returning the site it pointed to.
    pub fn remove_alias(&mut self, name: &str) -> SubdomainResult<String> {
        self.aliases
            .shift_remove(name)
            .ok_or_else(|| SubdomainError::AliasNotFound(name.to_string()))
    }

    /// Record a domain as recently added.
    ///
    /// New domains go to the front; a domain already in the list
    /// keeps its position.
    pub fn remember_domain(&mut self, domain: &str) {
        if self.recent_domains.iter().any(|d| d == domain) {
            return;
        }
        self.recent_domains.insert(0, domain.to_string());
        self.recent_domains.truncate(MAX_RECENT_DOMAINS);
    }

    pub fn forget_domain(&mut self, domain: &str) {
        self.recent_domains.retain(|d| d != domain);
    }
}

/// `~/.netlify-subdomain-config.json`
pub fn default_config_path() -> SubdomainResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .ok_or_else(|| SubdomainError::Other("cannot determine home directory".into()))
}
