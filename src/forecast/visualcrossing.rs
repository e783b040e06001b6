use crate::config::Config;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualCrossingError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
    #[error("API error: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },
}

pub struct VisualCrossingClient {
    client: Client,
    config: Config,
}

impl VisualCrossingClient {
    pub fn new(config: Config) -> Result<Self, VisualCrossingError> {
        let client = Client::builder()
            .user_agent("LuminaWeather/1.0")
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn timeline_url(&self, location: &str) -> String {
        format!(
            "{}{}/{}",
            self.config.visualcrossing_base_url.trim_end_matches('/'),
            self.config.visualcrossing_timeline_path,
            urlencoding::encode(location)
        )
    }

    /// Fetch the raw timeline (current conditions, days and hours) for a
    /// free-text location. One request, no retries.
    pub async fn get_timeline(&self, location: &str) -> Result<Value, VisualCrossingError> {
        let url = self.timeline_url(location);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.config.weather_api_key.as_str()),
                ("unitGroup", self.config.unit_group.as_str()),
                ("include", "days,hours,current"),
                ("lang", self.config.lang.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                location = %location,
                "Visual Crossing API error"
            );
            return Err(VisualCrossingError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let timeline: Value = serde_json::from_slice(&bytes)?;
        Ok(timeline)
    }
}
