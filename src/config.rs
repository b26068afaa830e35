//! Application configuration loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::controller::ListConfig;
use crate::highlight::HighlightConfig;
use crate::query::PageSizes;
use crate::{DEFAULT_DEBOUNCE_MS, DEFAULT_HIGHLIGHT_MS};

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by every page of the admin UI.
pub struct AppConfig {
    /// Base URL of the backend REST API, e.g. `https://pm.example.com/api`.
    pub api_base_url: String,
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<usize>,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_highlight_ms() -> u64 {
    DEFAULT_HIGHLIGHT_MS
}

fn default_page_sizes() -> Vec<usize> {
    vec![10, 20, 50, 100]
}

fn default_page_size() -> usize {
    10
}

impl AppConfig {
    /// Loads configuration from an optional `pmboard.yaml` next to the
    /// binary plus `PMBOARD_*` environment variables, env winning.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .add_source(config::File::with_name("pmboard").required(false))
            .add_source(config::Environment::with_prefix("PMBOARD"))
            .build()?
            .try_deserialize()
    }

    /// Controller configuration for a page using the shared defaults.
    pub fn list_config(&self) -> ListConfig {
        ListConfig {
            page_sizes: PageSizes::new(self.page_sizes.clone(), self.default_page_size),
            debounce: Duration::from_millis(self.search_debounce_ms),
        }
    }

    /// Same, with a page-specific default size.
    pub fn list_config_with_default(&self, default: usize) -> ListConfig {
        ListConfig {
            page_sizes: PageSizes::new(self.page_sizes.clone(), default),
            debounce: Duration::from_millis(self.search_debounce_ms),
        }
    }

    pub fn highlight_config(&self) -> HighlightConfig {
        HighlightConfig {
            duration: Duration::from_millis(self.highlight_ms),
            ..HighlightConfig::default()
        }
    }

    /// Endpoint for one resource collection, e.g. `endpoint("requirements")`.
    pub fn endpoint(&self, resource: &str) -> String {
        format!("{}/{resource}", self.api_base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let cfg = AppConfig {
            api_base_url: "https://pm.example.com/api/".to_string(),
            search_debounce_ms: default_debounce_ms(),
            highlight_ms: default_highlight_ms(),
            page_sizes: default_page_sizes(),
            default_page_size: default_page_size(),
        };
        assert_eq!(
            cfg.endpoint("requirements"),
            "https://pm.example.com/api/requirements"
        );
    }
}
