use crate::{
    Config,
    error::FetchError,
    excuse::{catalog::ExcuseCatalog, http::HttpExcuseClient},
    model::{AddExcuseReply, ExcuseRecord, NewExcuse},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod catalog;
pub mod http;

/// Source of excuses for the excuse widget.
///
/// Mirrors the excuse service: list categories, pick at random, pick from a
/// category, add a new excuse.
#[async_trait]
pub trait ExcuseSource: Send + Sync + Debug {
    async fn categories(&self) -> Result<Vec<String>, FetchError>;

    async fn random(&self) -> Result<ExcuseRecord, FetchError>;

    /// `category` is a normalized key such as `late_home`.
    async fn by_category(&self, category: &str) -> Result<ExcuseRecord, FetchError>;

    async fn add(&self, excuse: &NewExcuse) -> Result<AddExcuseReply, FetchError>;
}

/// HTTP client when `[excuses] base_url` is set, built-in catalog otherwise.
pub fn excuse_source_from_config(config: &Config) -> Box<dyn ExcuseSource> {
    match config.excuses.base_url.as_deref() {
        Some(base_url) => Box::new(HttpExcuseClient::new(base_url)),
        None => Box::new(ExcuseCatalog::seeded()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_base_url_falls_back_to_catalog() {
        let source = excuse_source_from_config(&Config::default());
        let categories = source.categories().await.expect("catalog never fails");
        assert!(categories.contains(&"late_home".to_string()));
    }
}
