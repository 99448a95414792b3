//! Built-in weather table used when no remote provider is configured.

use async_trait::async_trait;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{WeatherRecord, WeatherRequest},
};

use super::WeatherSource;

struct Row {
    name: &'static str,
    country: &'static str,
    temp: f64,
    feels_like: f64,
    humidity: u8,
    wind: f64,
    pressure: u32,
    condition: &'static str,
    description: &'static str,
}

impl Row {
    fn record(&self, name: &str) -> WeatherRecord {
        WeatherRecord {
            location: name.to_string(),
            country_code: self.country.to_string(),
            temperature_c: self.temp,
            feels_like_c: self.feels_like,
            humidity_pct: self.humidity,
            wind_speed_ms: self.wind,
            pressure_hpa: self.pressure,
            condition_code: self.condition.to_string(),
            description: self.description.to_string(),
            observed_at: None,
        }
    }
}

const CITIES: &[Row] = &[
    Row {
        name: "London",
        country: "GB",
        temp: 18.0,
        feels_like: 16.0,
        humidity: 65,
        wind: 3.2,
        pressure: 1013,
        condition: "Clouds",
        description: "partly cloudy",
    },
    Row {
        name: "New York",
        country: "US",
        temp: 22.0,
        feels_like: 25.0,
        humidity: 58,
        wind: 2.1,
        pressure: 1015,
        condition: "Clear",
        description: "clear sky",
    },
    Row {
        name: "Paris",
        country: "FR",
        temp: 15.0,
        feels_like: 13.0,
        humidity: 72,
        wind: 4.1,
        pressure: 1008,
        condition: "Rain",
        description: "light rain",
    },
    Row {
        name: "Tokyo",
        country: "JP",
        temp: 25.0,
        feels_like: 28.0,
        humidity: 68,
        wind: 1.8,
        pressure: 1020,
        condition: "Clear",
        description: "sunny",
    },
];

// `name` is ignored: the fallback carries whatever was asked for.
const UNKNOWN_CITY: Row = Row {
    name: "",
    country: "XX",
    temp: 20.0,
    feels_like: 22.0,
    humidity: 60,
    wind: 2.5,
    pressure: 1013,
    condition: "Clear",
    description: "clear sky",
};

const HERE: Row = Row {
    name: "Your Location",
    country: "XX",
    temp: 19.0,
    feels_like: 21.0,
    humidity: 62,
    wind: 2.8,
    pressure: 1012,
    condition: "Clouds",
    description: "few clouds",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoWeather;

impl DemoWeather {
    pub fn by_city(city: &str) -> WeatherRecord {
        let wanted = city.to_lowercase();
        CITIES
            .iter()
            .find(|row| row.name.to_lowercase() == wanted)
            .map(|row| row.record(row.name))
            .unwrap_or_else(|| UNKNOWN_CITY.record(city))
    }

    pub fn here() -> WeatherRecord {
        HERE.record(HERE.name)
    }
}

#[async_trait]
impl WeatherSource for DemoWeather {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherRecord, FetchError> {
        debug!(?request, "demo weather lookup");
        Ok(match request {
            WeatherRequest::City(city) => Self::by_city(city),
            WeatherRequest::Coordinates(_) => Self::here(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;

    #[test]
    fn known_city_lookup_ignores_case() {
        let upper = DemoWeather::by_city("LONDON");
        let lower = DemoWeather::by_city("london");

        assert_eq!(upper, lower);
        assert_eq!(upper.location, "London");
        assert_eq!(upper.country_code, "GB");
        assert_eq!(DemoWeather::by_city("new york").location, "New York");
    }

    #[test]
    fn unknown_city_keeps_requested_name() {
        for city in ["Atlantis", "san FRANCISCO", "Zürich"] {
            let record = DemoWeather::by_city(city);
            assert_eq!(record.location, city);
            assert_eq!(record.country_code, "XX");
            assert_eq!(record.temperature_c, 20.0);
        }
    }

    #[test]
    fn tokyo_is_clear_and_warm() {
        let record = DemoWeather::by_city("Tokyo");
        assert_eq!(record.temperature_c, 25.0);
        assert_eq!(record.condition_code, "Clear");
    }

    #[tokio::test]
    async fn coordinates_always_resolve_to_fixed_record() {
        let source = DemoWeather;
        let a = source
            .get_weather(&WeatherRequest::Coordinates(Coordinates { lat: 0.0, lon: 0.0 }))
            .await
            .expect("demo never fails");
        let b = source
            .get_weather(&WeatherRequest::Coordinates(Coordinates { lat: 48.8, lon: 2.3 }))
            .await
            .expect("demo never fails");

        assert_eq!(a, b);
        assert_eq!(a.location, "Your Location");
        assert_eq!(a.condition_code, "Clouds");
    }
}
