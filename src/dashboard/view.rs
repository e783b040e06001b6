use super::client::{DashboardError, GatewayClient};
use super::types::{DailyWeather, WeatherData};

/// Local dashboard state: the last fetched record, request status and the
/// forecast day currently on display.
#[derive(Debug, Clone, Default)]
pub struct WeatherView {
    pub city: String,
    pub weather: Option<WeatherData>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected_day: usize,
}

impl WeatherView {
    pub fn new(city: &str) -> Self {
        Self {
            city: city.to_string(),
            ..Self::default()
        }
    }

    pub fn begin_search(&mut self, city: &str) {
        self.city = city.to_string();
        self.loading = true;
        self.error = None;
        self.selected_day = 0;
    }

    /// A failed search keeps the previously shown record.
    pub fn finish_search(&mut self, result: Result<WeatherData, DashboardError>) {
        match result {
            Ok(weather) => self.weather = Some(weather),
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
    }

    /// Fetch `city` through the gateway. Blank input is ignored.
    pub async fn search(&mut self, client: &GatewayClient, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }

        self.begin_search(city);
        let result = client.fetch_weather(city).await;
        self.finish_search(result);
    }

    pub fn select_day(&mut self, index: usize) -> bool {
        let available = self.weather.as_ref().map_or(0, |weather| weather.daily.len());
        if index < available {
            self.selected_day = index;
            true
        } else {
            false
        }
    }

    pub fn selected_day(&self) -> Option<&DailyWeather> {
        self.weather.as_ref()?.daily.get(self.selected_day)
    }
}
