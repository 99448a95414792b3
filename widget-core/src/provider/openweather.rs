use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    error::{FetchError, Subject},
    model::{WeatherRecord, WeatherRequest},
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch_current(&self, request: &WeatherRequest) -> Result<WeatherRecord, FetchError> {
        let url = format!("{}/weather", self.base_url);

        let mut query: Vec<(&str, String)> = match request {
            WeatherRequest::City(city) => vec![("q", city.clone())],
            WeatherRequest::Coordinates(at) => {
                vec![("lat", at.lat.to_string()), ("lon", at.lon.to_string())]
            }
        };
        query.push(("appid", self.api_key.clone()));
        query.push(("units", "metric".to_string()));

        debug!(?request, "requesting OpenWeather current weather");

        let res = self.http.get(&url).query(&query).send().await.map_err(|err| {
            warn!(error = %err, "failed to send request to OpenWeather");
            FetchError::Unavailable(Subject::Weather)
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            warn!(error = %err, "failed to read OpenWeather response body");
            FetchError::Unavailable(Subject::Weather)
        })?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "OpenWeather request failed");
            return Err(classify_status(status, request));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|err| {
            warn!(error = %err, "failed to parse OpenWeather JSON");
            FetchError::Unavailable(Subject::Weather)
        })?;

        Ok(parsed.into_record())
    }
}

/// Map a non-success status to the message the widget shows.
pub fn classify_status(status: StatusCode, request: &WeatherRequest) -> FetchError {
    match status {
        StatusCode::NOT_FOUND if matches!(request, WeatherRequest::City(_)) => {
            FetchError::CityNotFound
        }
        StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
        _ => FetchError::Unavailable(Subject::Weather),
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
}

impl OwCurrentResponse {
    fn into_record(self) -> WeatherRecord {
        let (condition_code, description) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description))
            .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string()));

        WeatherRecord {
            location: self.name,
            country_code: self.sys.country.unwrap_or_else(|| "XX".to_string()),
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            wind_speed_ms: self.wind.speed,
            pressure_hpa: self.main.pressure,
            condition_code,
            description,
            observed_at: DateTime::<Utc>::from_timestamp(self.dt, 0),
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherProvider {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherRecord, FetchError> {
        self.fetch_current(request).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::Coordinates, test_support::serve};

    const TOKYO_JSON: &str = r#"{
        "name": "Tokyo",
        "dt": 1700000000,
        "sys": { "country": "JP" },
        "main": { "temp": 24.6, "feels_like": 27.9, "humidity": 68, "pressure": 1020 },
        "weather": [{ "main": "Clear", "description": "clear sky" }],
        "wind": { "speed": 1.8 }
    }"#;

    #[test]
    fn current_response_maps_to_record() {
        let parsed: OwCurrentResponse = serde_json::from_str(TOKYO_JSON).expect("valid json");
        let record = parsed.into_record();

        assert_eq!(record.location, "Tokyo");
        assert_eq!(record.country_code, "JP");
        assert_eq!(record.condition_code, "Clear");
        assert_eq!(record.pressure_hpa, 1020);
        assert_eq!(
            record.observed_at.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn status_codes_map_to_distinct_errors() {
        let city = WeatherRequest::City("Nowhere".into());
        let here = WeatherRequest::Coordinates(Coordinates { lat: 1.0, lon: 2.0 });

        assert_eq!(classify_status(StatusCode::NOT_FOUND, &city), FetchError::CityNotFound);
        assert_eq!(classify_status(StatusCode::UNAUTHORIZED, &city), FetchError::Unauthorized);
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, &city),
            FetchError::Unavailable(Subject::Weather)
        );
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND, &here),
            FetchError::Unavailable(Subject::Weather)
        );
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let provider = OpenWeatherProvider::new("KEY".into()).with_base_url("http://localhost:9/");
        assert_eq!(provider.base_url, "http://localhost:9");
    }

    #[tokio::test]
    async fn transport_failure_is_reported_as_unavailable() {
        let provider = OpenWeatherProvider::new("KEY".into()).with_base_url("http://127.0.0.1:9");
        let err = provider
            .get_weather(&WeatherRequest::City("London".into()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Weather data unavailable");
    }

    #[tokio::test]
    async fn served_responses_map_to_record_or_error() {
        let base = serve(vec![
            (200, TOKYO_JSON),
            (404, r#"{"cod":"404","message":"city not found"}"#),
            (401, r#"{"cod":401,"message":"Invalid API key"}"#),
            (200, "{ not json"),
        ])
        .await;
        let provider = OpenWeatherProvider::new("KEY".into()).with_base_url(base);
        let tokyo = WeatherRequest::City("Tokyo".into());

        let record = provider.get_weather(&tokyo).await.unwrap();
        assert_eq!(record.location, "Tokyo");
        assert_eq!(record.temperature_c, 24.6);

        let err = provider
            .get_weather(&WeatherRequest::City("Nowhere".into()))
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::CityNotFound);

        let err = provider.get_weather(&tokyo).await.unwrap_err();
        assert_eq!(err, FetchError::Unauthorized);

        let err = provider.get_weather(&tokyo).await.unwrap_err();
        assert_eq!(err, FetchError::Unavailable(Subject::Weather));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        assert_eq!(truncate_body(&body).len(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
