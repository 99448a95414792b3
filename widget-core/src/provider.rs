use crate::{
    Config, WeatherRecord, WeatherRequest,
    error::FetchError,
    provider::{demo::DemoWeather, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod demo;
pub mod openweather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Demo,
    OpenWeather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Demo => "demo",
            ProviderId::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Demo, ProviderId::OpenWeather]
    }

    /// Whether the provider needs an API key before it can be used.
    pub fn needs_api_key(&self) -> bool {
        matches!(self, ProviderId::OpenWeather)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "demo" => Ok(ProviderId::Demo),
            "openweather" => Ok(ProviderId::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: demo, openweather."
            )),
        }
    }
}

/// Source of weather records for the weather widget.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherRecord, FetchError>;
}

/// Construct a weather source from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherSource>> {
    let boxed: Box<dyn WeatherSource> = match id {
        ProviderId::Demo => Box::new(DemoWeather),
        ProviderId::OpenWeather => {
            let api_key = config.provider_api_key(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for provider '{id}'.\n\
                     Hint: run `widgets configure {id}` and enter your API key."
                )
            })?;

            let provider = OpenWeatherProvider::new(api_key.to_owned());
            match config.provider_base_url(id) {
                Some(base_url) => Box::new(provider.with_base_url(base_url)),
                None => Box::new(provider),
            }
        }
    };

    Ok(boxed)
}

/// Construct the default weather source from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("weatherapi").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn openweather_requires_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(ProviderId::OpenWeather, &cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured for provider"));
    }

    #[test]
    fn demo_needs_no_configuration() {
        let cfg = Config::default();
        assert!(provider_from_config(ProviderId::Demo, &cfg).is_ok());
        assert!(default_provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn default_provider_from_config_works_when_set_and_configured() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "KEY".to_string());

        let provider = default_provider_from_config(&cfg);
        assert!(provider.is_ok());
    }

    #[test]
    fn default_provider_errors_when_configured_provider_lacks_key() {
        let mut cfg = Config::default();
        cfg.set_default_provider(ProviderId::OpenWeather);

        let err = default_provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("Hint: run `widgets configure openweather`"));
    }
}
