// =============================================================================
// Storedesk Web - Build-Time Configuration
// =============================================================================
// Table of Contents:
// 1. Constants
// 2. API Configuration
// =============================================================================

// -----------------------------------------------------------------------------
// 1. Constants
// -----------------------------------------------------------------------------

/// Path prefix every backend request is issued against.
pub const API_BASE_PATH: &str = "/api";

// -----------------------------------------------------------------------------
// 2. API Configuration
// -----------------------------------------------------------------------------

/// Where the HTTP clients send their requests.
///
/// The origin is empty by default, so requests stay relative (`/api/...`) and
/// the hosting proxy decides which backend answers them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub origin: String,
    pub base_path: String,
}

impl ApiConfig {
    /// Create a configuration for an explicit origin.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            base_path: API_BASE_PATH.to_string(),
        }
    }

    /// Resolve the configuration from build-time environment variables.
    ///
    /// Only `API_ORIGIN` moves requests off the serving origin; development
    /// builds rely on the `trunk serve` proxy like any other deployment.
    pub fn from_env() -> Self {
        if let Some(environment) = option_env!("ENVIRONMENT") {
            log::debug!("Built for {} environment", environment);
        }
        Self::resolve(option_env!("API_ORIGIN"))
    }

    /// Relative unless a non-empty origin is given.
    pub fn resolve(origin: Option<&str>) -> Self {
        match origin.map(str::trim).filter(|origin| !origin.is_empty()) {
            Some(origin) => Self::new(origin),
            None => Self::default(),
        }
    }

    /// Origin and base path joined, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}",
            self.origin,
            self.base_path.trim_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_relative() {
        assert_eq!(ApiConfig::default().base_url(), "/api");
    }

    #[test]
    fn explicit_origin_drops_trailing_slash() {
        let config = ApiConfig::new("https://pos.example.com/");
        assert_eq!(config.origin, "https://pos.example.com");
        assert_eq!(config.base_url(), "https://pos.example.com/api");
    }

    #[test]
    fn requests_stay_relative_without_an_origin() {
        assert_eq!(ApiConfig::resolve(None).base_url(), "/api");
        assert_eq!(ApiConfig::resolve(Some("  ")).base_url(), "/api");
        assert_eq!(
            ApiConfig::resolve(Some("http://localhost:8080")).base_url(),
            "http://localhost:8080/api"
        );
    }
}
