use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::config::WeatherConfig;
use crate::error::FetchError;

/// HTTP access to the NWS API.
///
/// Every failure is logged and reported as `None`; callers decide which
/// message to show for missing data.
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
    shutdown: CancellationToken,
}

impl NwsClient {
    /// Builds a client with the configured headers and timeout.
    ///
    /// Requests still pending when `shutdown` is cancelled are abandoned.
    pub fn new(config: &WeatherConfig, shutdown: CancellationToken) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, shutdown })
    }

    /// GETs `url` and returns its JSON body, or `None` if anything went wrong
    pub async fn fetch_json(&self, url: &str) -> Option<Value> {
        tracing::debug!("Making NWS request to {}", url);
        match self.try_fetch(url).await {
            Ok(data) if is_empty_body(&data) => {
                tracing::warn!("NWS returned an empty body: {}", data);
                None
            }
            Ok(data) => {
                tracing::debug!("Received response from NWS: {}", data);
                Some(data)
            }
            Err(e) => {
                tracing::error!("NWS request failed: {}", e);
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Value, FetchError> {
        let request = async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(FetchError::Transport)?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status));
            }

            response.json::<Value>().await.map_err(|e| {
                if e.is_decode() {
                    FetchError::Decode(e)
                } else {
                    FetchError::Transport(e)
                }
            })
        };

        tokio::select! {
            biased;
            () = self.shutdown.cancelled() => Err(FetchError::Cancelled),
            result = request => result,
        }
    }
}

/// A body carrying no data at all: `null`, `false`, zero, or an empty
/// string, array or object.
fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
