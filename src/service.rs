use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use tokio_util::sync::CancellationToken;

use crate::client::NwsClient;
use crate::config::WeatherConfig;
use crate::constants::{
    ALERTS_UNAVAILABLE, FORECAST_UNAVAILABLE, NO_ACTIVE_ALERTS, POINTS_UNAVAILABLE,
};
use crate::error::ToolError;
use crate::formatters::{format_alerts, format_forecast};
use crate::models::{
    parse_response, AlertCollection, ForecastResponse, GetAlertsRequest, GetForecastRequest,
    PointsResponse,
};

/// MCP service exposing NWS alerts and forecasts as text tools
#[derive(Clone)]
pub struct WeatherTools {
    client: NwsClient,
    config: WeatherConfig,
    tool_router: ToolRouter<Self>,
}

impl WeatherTools {
    /// Creates a new service; outstanding requests stop when `shutdown` is cancelled
    pub fn new(config: WeatherConfig, shutdown: CancellationToken) -> Result<Self> {
        let client = NwsClient::new(&config, shutdown)?;

        Ok(Self {
            client,
            config,
            tool_router: Self::tool_router(),
        })
    }

    /// Active alerts for `state`, rendered as text.
    ///
    /// Missing data yields one of the fixed messages; only a structurally
    /// malformed body is an error.
    pub async fn alerts_text(&self, state: &str) -> Result<String, ToolError> {
        tracing::debug!("Fetching alerts for state: {}", state);

        let url = self.config.alerts_url(state);
        let Some(data) = self.client.fetch_json(&url).await else {
            tracing::warn!("No alerts data or features found");
            return Ok(ALERTS_UNAVAILABLE.to_string());
        };

        let alerts: AlertCollection = parse_response("alerts", data)?;
        match alerts.features {
            None => {
                tracing::warn!("No alerts data or features found");
                Ok(ALERTS_UNAVAILABLE.to_string())
            }
            Some(features) if features.is_empty() => {
                tracing::info!("No active alerts for this state");
                Ok(NO_ACTIVE_ALERTS.to_string())
            }
            Some(features) => Ok(format_alerts(&features)),
        }
    }

    /// Short-range forecast for a coordinate, rendered as text
    pub async fn forecast_text(&self, latitude: f64, longitude: f64) -> Result<String, ToolError> {
        tracing::debug!("Fetching forecast for lat: {}, lon: {}", latitude, longitude);

        let points_url = self.config.points_url(latitude, longitude);
        let Some(points_data) = self.client.fetch_json(&points_url).await else {
            tracing::warn!("Failed to fetch forecast data");
            return Ok(POINTS_UNAVAILABLE.to_string());
        };
        let points: PointsResponse = parse_response("points", points_data)?;

        let Some(forecast_data) = self.client.fetch_json(&points.properties.forecast).await else {
            tracing::warn!("Failed to fetch detailed forecast");
            return Ok(FORECAST_UNAVAILABLE.to_string());
        };
        let forecast: ForecastResponse = parse_response("forecast", forecast_data)?;

        Ok(format_forecast(&forecast.properties.periods))
    }
}

#[tool_handler]
impl ServerHandler for WeatherTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather alerts and forecasts from the National Weather Service API. \
                Use get_alerts with a two-letter US state code and get_forecast with \
                latitude and longitude of a US location."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl WeatherTools {
    #[tool(description = "Get weather alerts for a US state. Provide a two-letter state code (e.g., 'CA' for California, 'NY' for New York).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting alerts for state: {}", request.state);

        let text = self.alerts_text(&request.state).await?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Get weather forecast for a location. Provide latitude and longitude of a US location (e.g., latitude: 38.8894, longitude: -77.0352 for Washington, DC).")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let text = self
            .forecast_text(request.latitude, request.longitude)
            .await?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn tools_for(mock_server: &MockServer, route: &str, body: serde_json::Value) -> WeatherTools {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(mock_server)
            .await;
        WeatherTools::new(
            WeatherConfig::with_api_base(mock_server.uri()),
            CancellationToken::new(),
        )
        .unwrap()
    }

    fn only_text(result: &CallToolResult) -> &str {
        assert_eq!(result.content.len(), 1);
        result.content[0]
            .as_text()
            .map(|content| content.text.as_str())
            .unwrap()
    }

    #[test]
    fn server_info_advertises_tools() {
        let tools = WeatherTools::new(WeatherConfig::default(), CancellationToken::new()).unwrap();
        let info = tools.get_info();
        assert_eq!(info.server_info.name, "weather");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn both_tools_are_routed() {
        let tools = WeatherTools::new(WeatherConfig::default(), CancellationToken::new()).unwrap();
        let names: Vec<String> = tools
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        assert!(names.contains(&"get_alerts".to_string()));
        assert!(names.contains(&"get_forecast".to_string()));
        assert_eq!(names.len(), 2);
    }

    #[tokio::test]
    async fn get_alerts_wraps_text_in_success_result() {
        let mock_server = MockServer::start().await;
        let tools = tools_for(&mock_server, "/alerts/active/area/XX", json!({ "features": [] })).await;

        let result = tools
            .get_alerts(Parameters(GetAlertsRequest {
                state: "XX".to_string(),
            }))
            .await
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        assert_eq!(only_text(&result), "No active alerts for this state.");
    }

    #[tokio::test]
    async fn get_alerts_reports_malformed_body_as_internal_error() {
        let mock_server = MockServer::start().await;
        let tools = tools_for(
            &mock_server,
            "/alerts/active/area/CA",
            json!({ "features": [{ "id": "urn:oid:3" }] }),
        )
        .await;

        let err = tools
            .get_alerts(Parameters(GetAlertsRequest {
                state: "CA".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.starts_with("malformed alerts response"));
    }

    #[tokio::test]
    async fn get_forecast_wraps_text_in_success_result() {
        let mock_server = MockServer::start().await;
        let tools = tools_for(&mock_server, "/points/39.0,-77.0", json!({})).await;

        let result = tools
            .get_forecast(Parameters(GetForecastRequest {
                latitude: 39.0,
                longitude: -77.0,
            }))
            .await
            .unwrap();

        assert_eq!(only_text(&result), "Unable to fetch forecast data for this location.");
    }
}
