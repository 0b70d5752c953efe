use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SubdomainError, SubdomainResult};

/// Environment variable the Netlify CLI also honours.
pub const TOKEN_ENV: &str = "NETLIFY_AUTH_TOKEN";

/// Read the Netlify access token.
///
/// `NETLIFY_AUTH_TOKEN` wins if set; otherwise the token is taken
/// from the config file written by `netlify login`.
pub fn access_token() -> SubdomainResult<String> {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.trim().is_empty() {
            log::debug!("using token from {TOKEN_ENV}");
            return Ok(token.trim().to_string());
        }
    }

    for path in cli_config_paths() {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        if let Some(token) = token_from_cli_config(&content) {
            log::debug!("using token from {}", path.display());
            return Ok(token);
        }
    }

    Err(SubdomainError::NotLoggedIn)
}

/// Locations of the Netlify CLI config (macOS first, then XDG).
#[must_use]
pub fn cli_config_paths() -> Vec<PathBuf> {
    dirs::home_dir()
        .map(|home| {
            vec![
                home.join("Library/Preferences/netlify/config.json"),
                home.join(".config/netlify/config.json"),
            ]
        })
        .unwrap_or_default()
}

/// Extract the token of the logged-in user from the Netlify CLI
/// config.
///
/// The CLI stores `{"userId": "..", "users": {"<id>": {"auth":
/// {"token": ".."}}}}`. The user named by `userId` is preferred,
/// otherwise the first user with a token is used.
#[must_use]
pub fn token_from_cli_config(content: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(content).ok()?;
    let users = parsed["users"].as_object()?;

    let token_of = |user: &serde_json::Value| {
        user["auth"]["token"]
            .as_str()
            .filter(|t| !t.is_empty())
            .map(String::from)
    };

    parsed["userId"]
        .as_str()
        .and_then(|id| users.get(id))
        .and_then(token_of)
        .or_else(|| users.values().find_map(token_of))
}

/// Id of the site the project in `dir` is linked to
/// (`.netlify/state.json`, written by `netlify link`).
#[must_use]
pub fn linked_site_id(dir: &Path) -> Option<String> {
    let content = fs::read_to_string(dir.join(".netlify").join("state.json")).ok()?;
    let parsed: serde_json::Value = serde_json::from_str(&content).ok()?;
    parsed["siteId"]
        .as_str()
        .filter(|id| !id.is_empty())
        .map(String::from)
}
