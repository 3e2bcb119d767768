//! Router configuration
//!
//! Configuration is plain serde data so hosts can ship it alongside their
//! other settings. Every field has a default, so `{}` is a valid document.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default limit on chained validation redirects
pub const DEFAULT_MAX_REDIRECT_DEPTH: usize = 8;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Document could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A tabbed surface needs at least one tab
    #[error("Tab count must be at least 1")]
    NoTabs,

    /// Initial tab does not exist
    #[error("Initial tab {initial} out of range for {count} tabs")]
    InitialTabOutOfRange {
        /// Requested initial tab
        initial: usize,
        /// Configured tab count
        count: usize,
    },

    /// Redirect limit would block every gated route
    #[error("Max redirect depth must be at least 1")]
    ZeroRedirectDepth,
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

fn default_max_redirect_depth() -> usize {
    DEFAULT_MAX_REDIRECT_DEPTH
}

fn default_tab_count() -> usize {
    1
}

/// Per-router settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterConfig {
    /// Maximum number of gates one navigation request may be redirected through
    #[serde(default = "default_max_redirect_depth")]
    pub max_redirect_depth: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_redirect_depth: DEFAULT_MAX_REDIRECT_DEPTH,
        }
    }
}

impl RouterConfig {
    /// Set the redirect limit
    pub fn max_redirect_depth(mut self, depth: usize) -> Self {
        self.max_redirect_depth = depth;
        self
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.max_redirect_depth == 0 {
            return Err(ConfigError::ZeroRedirectDepth);
        }
        Ok(())
    }
}

/// Settings for a tabbed surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabConfig {
    /// Number of tabs, fixed for the session
    #[serde(default = "default_tab_count")]
    pub tab_count: usize,

    /// Tab selected at start
    #[serde(default)]
    pub initial_tab: usize,

    /// Settings shared by every tab's router
    #[serde(default)]
    pub router: RouterConfig,
}

impl Default for TabConfig {
    fn default() -> Self {
        Self {
            tab_count: default_tab_count(),
            initial_tab: 0,
            router: RouterConfig::default(),
        }
    }
}

impl TabConfig {
    /// Create a configuration with `tab_count` tabs
    pub fn new(tab_count: usize) -> Self {
        Self {
            tab_count,
            ..Default::default()
        }
    }

    /// Set the initially selected tab
    pub fn initial_tab(mut self, tab: usize) -> Self {
        self.initial_tab = tab;
        self
    }

    /// Set the shared router settings
    pub fn router(mut self, router: RouterConfig) -> Self {
        self.router = router;
        self
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.tab_count == 0 {
            return Err(ConfigError::NoTabs);
        }
        if self.initial_tab >= self.tab_count {
            return Err(ConfigError::InitialTabOutOfRange {
                initial: self.initial_tab,
                count: self.tab_count,
            });
        }
        self.router.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TabConfig::default();
        assert_eq!(config.tab_count, 1);
        assert_eq!(config.initial_tab, 0);
        assert_eq!(config.router.max_redirect_depth, DEFAULT_MAX_REDIRECT_DEPTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TabConfig::from_json("{}").unwrap();
        assert_eq!(config, TabConfig::default());
    }

    #[test]
    fn test_camel_case_keys() {
        let config =
            TabConfig::from_json(r#"{"tabCount": 4, "initialTab": 2, "router": {"maxRedirectDepth": 3}}"#)
                .unwrap();
        assert_eq!(config.tab_count, 4);
        assert_eq!(config.initial_tab, 2);
        assert_eq!(config.router.max_redirect_depth, 3);
    }

    #[test]
    fn test_rejects_zero_tabs() {
        let err = TabConfig::from_json(r#"{"tabCount": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoTabs));
    }

    #[test]
    fn test_rejects_initial_tab_out_of_range() {
        let err = TabConfig::new(2).initial_tab(2).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InitialTabOutOfRange {
                initial: 2,
                count: 2
            }
        ));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_rejects_zero_redirect_depth() {
        let config = TabConfig::new(3).router(RouterConfig::default().max_redirect_depth(0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroRedirectDepth)
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = TabConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
