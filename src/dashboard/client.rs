use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use super::types::WeatherData;

/// Errors surfaced to the dashboard user. The `Display` text is the message
/// shown on screen.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Network Error when attempting to fetch resource.")]
    Network(#[source] reqwest::Error),
    #[error("{message}")]
    Gateway { status: u16, message: String },
    #[error("Erro ao buscar dados meteorológicos.")]
    Decode(#[source] reqwest::Error),
}

pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent("LuminaWeather/1.0")
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_weather(&self, location: &str) -> Result<WeatherData, DashboardError> {
        let url = format!("{}/", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("location", location)])
            .send()
            .await
            .map_err(DashboardError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Gateway returned an error");
            return Err(DashboardError::Gateway {
                status: status.as_u16(),
                message: gateway_message(status, &body),
            });
        }

        response.json().await.map_err(DashboardError::Decode)
    }
}

fn gateway_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            format!(
                "Erro {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )
        })
}
