//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. One config file per
//! deployment — there is no cascading, because the reader serves exactly
//! one forum at a time.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "EA Forum Reader"    # Site title, shown in page chrome and feeds
//! graphql_url = "https://forum.effectivealtruism.org/graphql"
//! path_style = "localhost"     # "localhost" (./posts?id=…) or "official" (/posts/<id>/<slug>)
//!
//! [colors]
//! link = "#326492"             # Link color
//! comment_band = "#ECF5FF"     # Background band for odd-depth comments
//!
//! [limits]
//! page_size = 50               # Records per posts/comments fetch
//! userlist_size = 500          # Rows in the user-list fetch
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Point the reader at LessWrong instead
//! title = "LessWrong 2.0 Reader"
//! graphql_url = "https://www.lesswrong.com/graphql"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::links::PathStyle;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title, shown in page chrome and feed channel metadata.
    pub title: String,
    /// GraphQL endpoint of the upstream forum.
    pub graphql_url: String,
    /// Addressing style for generated links.
    pub path_style: PathStyle,
    /// Page colors.
    pub colors: ColorConfig,
    /// Fetch page sizes.
    pub limits: LimitConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "EA Forum Reader".to_string(),
            graphql_url: "https://forum.effectivealtruism.org/graphql".to_string(),
            path_style: PathStyle::Localhost,
            colors: ColorConfig::default(),
            limits: LimitConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: SiteConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to stock defaults when the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.graphql_url.starts_with("http://") && !self.graphql_url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "graphql_url must be an http(s) URL".into(),
            ));
        }
        if !is_hex_color(&self.colors.link) {
            return Err(ConfigError::Validation(
                "colors.link must be a #rrggbb hex color".into(),
            ));
        }
        if !is_hex_color(&self.colors.comment_band) {
            return Err(ConfigError::Validation(
                "colors.comment_band must be a #rrggbb hex color".into(),
            ));
        }
        if self.limits.page_size == 0 {
            return Err(ConfigError::Validation("limits.page_size must be non-zero".into()));
        }
        if self.limits.userlist_size == 0 {
            return Err(ConfigError::Validation(
                "limits.userlist_size must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Page colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Link color.
    pub link: String,
    /// Background band for odd-depth comments (even depths stay white).
    pub comment_band: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            link: "#326492".to_string(),
            comment_band: "#ECF5FF".to_string(),
        }
    }
}

/// Fetch page sizes.
///
/// Pagination beyond one fixed page per fetch is out of scope; these set
/// the size of that single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitConfig {
    /// Records per posts/comments fetch.
    pub page_size: u32,
    /// Rows in the user-list fetch.
    pub userlist_size: u32,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            userlist_size: 500,
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Generate the config-derived CSS rules (colors only; layout lives in the
/// static stylesheet).
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!("a {{ color: {}; }}", colors.link)
}

/// A stock `config.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = SiteConfig::default();
    format!(
        r##"# forum-reader configuration
# All options are optional - the values below are the defaults.

# Site title, shown in page chrome and feed channel metadata.
title = "{title}"

# GraphQL endpoint of the upstream forum.
# For LessWrong: "https://www.lesswrong.com/graphql"
graphql_url = "{graphql_url}"

# Addressing style for generated links:
#   "localhost" - relative query-string links (./posts?id=...)
#   "official"  - the forum's canonical paths (/posts/<id>/<slug>)
path_style = "localhost"

[colors]
# Link color.
link = "{link}"
# Background band for odd-depth comments (even depths stay white).
comment_band = "{comment_band}"

[limits]
# Records per posts/comments fetch.
page_size = {page_size}
# Rows in the user-list fetch.
userlist_size = {userlist_size}
"##,
        title = defaults.title,
        graphql_url = defaults.graphql_url,
        link = defaults.colors.link,
        comment_band = defaults.colors.comment_band,
        page_size = defaults.limits.page_size,
        userlist_size = defaults.limits.userlist_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_validate() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn sparse_config_keeps_other_defaults() {
        let config: SiteConfig =
            toml::from_str(r#"title = "LessWrong 2.0 Reader""#).unwrap();
        assert_eq!(config.title, "LessWrong 2.0 Reader");
        assert_eq!(config.colors.comment_band, "#ECF5FF");
        assert_eq!(config.limits.page_size, 50);
        assert_eq!(config.path_style, PathStyle::Localhost);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("tite = \"typo\"");
        assert!(result.is_err());
    }

    #[test]
    fn path_style_parses_both_values() {
        let config: SiteConfig = toml::from_str(r#"path_style = "official""#).unwrap();
        assert_eq!(config.path_style, PathStyle::Official);
    }

    #[test]
    fn invalid_url_fails_validation() {
        let mut config = SiteConfig::default();
        config.graphql_url = "ftp://example.org/graphql".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn invalid_color_fails_validation() {
        let mut config = SiteConfig::default();
        config.colors.comment_band = "blue".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_page_size_fails_validation() {
        let mut config = SiteConfig::default();
        config.limits.page_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_toml_round_trips_through_the_loader() {
        let config: SiteConfig = toml::from_str(&stock_config_toml()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.title, SiteConfig::default().title);
    }

    #[test]
    fn load_reads_a_real_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "title = \"Test Forum\"").unwrap();
        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.title, "Test Forum");
    }

    #[test]
    fn load_or_default_falls_back_when_missing() {
        let config = SiteConfig::load_or_default(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.title, SiteConfig::default().title);
    }

    #[test]
    fn color_css_uses_configured_link_color() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains("#326492"));
    }
}
