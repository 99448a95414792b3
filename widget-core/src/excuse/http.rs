use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    error::{FetchError, Subject},
    model::{AddExcuseReply, ExcuseRecord, NewExcuse},
};

use super::ExcuseSource;

/// Client for the excuse service.
///
/// Endpoints, relative to `base_url`:
/// - `GET categories`
/// - `GET random-excuse`
/// - `GET excuse/{category}`
/// - `POST add-excuse`
#[derive(Debug, Clone)]
pub struct HttpExcuseClient {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpExcuseClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `not_found` is returned for a 404; any other failure is `Unavailable(subject)`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        subject: Subject,
        not_found: Option<FetchError>,
    ) -> Result<T, FetchError> {
        let url = self.url(path);
        debug!(%url, "requesting excuse service");

        let res = self.http.get(&url).send().await.map_err(|err| {
            warn!(error = %err, %url, "failed to reach excuse service");
            FetchError::Unavailable(subject)
        })?;

        if res.status() == StatusCode::NOT_FOUND {
            if let Some(err) = not_found {
                return Err(err);
            }
        }
        if !res.status().is_success() {
            warn!(status = %res.status(), %url, "excuse service returned an error");
            return Err(FetchError::Unavailable(subject));
        }

        parse(res, subject).await
    }
}

async fn parse<T: DeserializeOwned>(res: Response, subject: Subject) -> Result<T, FetchError> {
    res.json::<T>().await.map_err(|err| {
        warn!(error = %err, "failed to parse excuse service response");
        FetchError::Unavailable(subject)
    })
}

#[async_trait]
impl ExcuseSource for HttpExcuseClient {
    async fn categories(&self) -> Result<Vec<String>, FetchError> {
        self.get_json("categories", Subject::Categories, None).await
    }

    async fn random(&self) -> Result<ExcuseRecord, FetchError> {
        self.get_json("random-excuse", Subject::Excuse, None).await
    }

    async fn by_category(&self, category: &str) -> Result<ExcuseRecord, FetchError> {
        let path = format!("excuse/{category}");
        self.get_json(&path, Subject::Excuse, Some(FetchError::CategoryNotFound))
            .await
    }

    async fn add(&self, excuse: &NewExcuse) -> Result<AddExcuseReply, FetchError> {
        let url = self.url("add-excuse");
        debug!(%url, category = %excuse.category, "submitting excuse");

        let res = self.http.post(&url).json(excuse).send().await.map_err(|err| {
            warn!(error = %err, %url, "failed to reach excuse service");
            FetchError::Unavailable(Subject::NewExcuse)
        })?;

        match res.status() {
            status if status.is_success() => parse(res, Subject::NewExcuse).await,
            StatusCode::BAD_REQUEST => {
                let body: ErrorBody = parse(res, Subject::NewExcuse).await?;
                Ok(AddExcuseReply {
                    success: false,
                    message: Some(body.error),
                })
            }
            status => {
                warn!(%status, %url, "excuse service rejected the new excuse");
                Err(FetchError::Unavailable(Subject::NewExcuse))
            }
        }
    }
}
