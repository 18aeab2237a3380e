use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-app/1.0";

/// Media type requested from the NWS API
pub const ACCEPT_GEO_JSON: &str = "application/geo+json";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of forecast periods rendered
pub const FORECAST_PERIOD_LIMIT: usize = 5;

/// Separator between formatted alert or forecast blocks
pub const BLOCK_SEPARATOR: &str = "\n---\n";

/// Reply when the alerts request failed or carried no `features`
pub const ALERTS_UNAVAILABLE: &str = "Unable to fetch alerts or no alerts found.";
/// Reply when the state has no active alerts
pub const NO_ACTIVE_ALERTS: &str = "No active alerts for this state.";
/// Reply when the points lookup for a coordinate failed
pub const POINTS_UNAVAILABLE: &str = "Unable to fetch forecast data for this location.";
/// Reply when the forecast resource could not be fetched
pub const FORECAST_UNAVAILABLE: &str = "Unable to fetch detailed forecast.";
