use std::time::Duration;

use crate::constants::{ACCEPT_GEO_JSON, NWS_API_BASE, REQUEST_TIMEOUT, USER_AGENT};

/// Connection settings for the NWS client.
///
/// The binary always runs with [`WeatherConfig::default`]; the fields are
/// public so tests can point the service at a local mock server.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Base URL that alert and points paths are appended to
    pub api_base: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Value of the `Accept` header
    pub accept: String,
    /// Timeout applied to each request
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base: NWS_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            accept: ACCEPT_GEO_JSON.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl WeatherConfig {
    /// Creates a configuration targeting a different API base URL
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn alerts_url(&self, state: &str) -> String {
        format!("{}/alerts/active/area/{}", self.api_base, state)
    }

    pub fn points_url(&self, latitude: f64, longitude: f64) -> String {
        // Debug keeps the fractional part, so 39.0 stays "39.0" rather than "39"
        format!("{}/points/{:?},{:?}", self.api_base, latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_public_api() {
        let config = WeatherConfig::default();
        assert_eq!(config.api_base, "https://api.weather.gov");
        assert_eq!(config.user_agent, "weather-app/1.0");
        assert_eq!(config.accept, "application/geo+json");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn alerts_url_passes_state_through() {
        let config = WeatherConfig::default();
        assert_eq!(
            config.alerts_url("CA"),
            "https://api.weather.gov/alerts/active/area/CA"
        );
        assert_eq!(
            config.alerts_url("xx"),
            "https://api.weather.gov/alerts/active/area/xx"
        );
    }

    #[test]
    fn points_url_keeps_float_notation() {
        let config = WeatherConfig::default();
        assert_eq!(
            config.points_url(39.0, -77.0),
            "https://api.weather.gov/points/39.0,-77.0"
        );
        assert_eq!(
            config.points_url(38.8894, -77.0352),
            "https://api.weather.gov/points/38.8894,-77.0352"
        );
    }

    #[test]
    fn with_api_base_strips_trailing_slash() {
        let config = WeatherConfig::with_api_base("http://127.0.0.1:8080/");
        assert_eq!(config.alerts_url("TX"), "http://127.0.0.1:8080/alerts/active/area/TX");
        assert_eq!(config.user_agent, USER_AGENT);
    }
}
