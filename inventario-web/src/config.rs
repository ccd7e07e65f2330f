//! Frontend configuration module
//!
//! Values are baked in at build time from `INVENTARIO_*` environment
//! variables, falling back to development defaults.

use log::LevelFilter;

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_LOW_STOCK: i64 = 5;

/// Largest avatar upload accepted before any request is made.
pub const MAX_AVATAR_BYTES: u64 = 2 * 1024 * 1024;

/// Frontend configuration for the API endpoint, logging and inventory defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontendConfig {
    /// Base URL every API path is appended to.
    pub api_base_url: String,
    /// Maximum level forwarded to the browser console.
    pub log_level: LevelFilter,
    /// Reorder threshold for products that do not define one.
    pub default_min_stock: i64,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self::from_values(
            option_env!("INVENTARIO_API_URL"),
            option_env!("INVENTARIO_LOG_LEVEL"),
            option_env!("INVENTARIO_LOW_STOCK_DEFAULT"),
        )
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from raw values, ignoring blank or unparsable ones.
    pub fn from_values(
        api_url: Option<&str>,
        log_level: Option<&str>,
        low_stock: Option<&str>,
    ) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        let log_level = log_level
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or(LevelFilter::Info);
        let default_min_stock = low_stock
            .and_then(|value| value.trim().parse().ok())
            .filter(|value: &i64| *value >= 0)
            .unwrap_or(DEFAULT_LOW_STOCK);

        Self {
            api_base_url,
            log_level,
            default_min_stock,
        }
    }

    /// Get the API base URL
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Resolve a stored file path, such as an avatar, to a loadable URL.
    ///
    /// Absolute, `blob:` and `data:` URLs pass through. Relative paths live
    /// under `/storage` on the API host.
    pub fn asset_url(&self, path: &str) -> String {
        if ["http://", "https://", "blob:", "data:"]
            .iter()
            .any(|scheme| path.starts_with(scheme))
        {
            return path.to_string();
        }
        let origin = self
            .api_base_url
            .strip_suffix("/api")
            .unwrap_or(&self.api_base_url);
        let path = path.trim_start_matches('/');
        if path.starts_with("storage/") {
            format!("{origin}/{path}")
        } else {
            format!("{origin}/storage/{path}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = FrontendConfig::from_values(None, None, None);
        assert_eq!(config.api_base_url(), DEFAULT_API_URL);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.default_min_stock, DEFAULT_LOW_STOCK);
    }

    #[test]
    fn values_are_trimmed_and_parsed() {
        let config =
            FrontendConfig::from_values(Some(" https://api.tienda.ec/api/ "), Some("debug"), Some("12"));
        assert_eq!(config.api_base_url(), "https://api.tienda.ec/api");
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.default_min_stock, 12);
    }

    #[test]
    fn asset_urls_resolve_against_api_host() {
        let config = FrontendConfig::from_values(Some("https://api.tienda.ec/api"), None, None);
        assert_eq!(
            config.asset_url("avatars/7.png"),
            "https://api.tienda.ec/storage/avatars/7.png"
        );
        assert_eq!(
            config.asset_url("/storage/avatars/7.png"),
            "https://api.tienda.ec/storage/avatars/7.png"
        );
        assert_eq!(
            config.asset_url("https://cdn.tienda.ec/a.png"),
            "https://cdn.tienda.ec/a.png"
        );
        assert_eq!(config.asset_url("blob:abc-123"), "blob:abc-123");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = FrontendConfig::from_values(Some("   "), Some("loud"), Some("-3"));
        assert_eq!(config.api_base_url(), DEFAULT_API_URL);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.default_min_stock, DEFAULT_LOW_STOCK);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_frontend_config_default() {
        let config = FrontendConfig::default();
        assert!(!config.api_base_url().is_empty());
        assert!(config.api_base_url().starts_with("http"));
    }
}
