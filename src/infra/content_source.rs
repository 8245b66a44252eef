//! Content document sources: a local file or an HTTP(S) URL.

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use reqwest::{
    Client, Url,
    header::{CACHE_CONTROL, PRAGMA},
};
use time::OffsetDateTime;
use tracing::debug;

use crate::{
    application::content::{ContentError, ContentSource},
    config::{ContentLocation, ContentSettings},
};

/// Query parameter carrying the cache-busting timestamp.
pub const CACHE_BUST_PARAM: &str = "v";

/// Builds the source described by the settings.
pub fn from_settings(settings: &ContentSettings, client: &Client) -> Arc<dyn ContentSource> {
    match &settings.source {
        ContentLocation::File(path) => Arc::new(FileContentSource::new(path.clone())),
        ContentLocation::Url(url) => Arc::new(HttpContentSource::new(
            client.clone(),
            url.clone(),
            settings.cache_bust,
        )),
    }
}

#[derive(Debug, Clone)]
pub struct FileContentSource {
    path: PathBuf,
    location: String,
}

impl FileContentSource {
    pub fn new(path: PathBuf) -> Self {
        let location = path.display().to_string();
        Self { path, location }
    }
}

#[async_trait]
impl ContentSource for FileContentSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<Vec<u8>, ContentError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|err| ContentError::unavailable(&self.location, err))
    }
}

#[derive(Debug, Clone)]
pub struct HttpContentSource {
    client: Client,
    url: Url,
    cache_bust: bool,
}

impl HttpContentSource {
    pub fn new(client: Client, url: Url, cache_bust: bool) -> Self {
        Self {
            client,
            url,
            cache_bust,
        }
    }

    /// The URL actually requested at `now`; carries `v=<unix millis>` when cache busting.
    pub fn request_url(&self, now: OffsetDateTime) -> Url {
        let mut url = self.url.clone();
        if self.cache_bust {
            let millis = now.unix_timestamp_nanos() / 1_000_000;
            url.query_pairs_mut()
                .append_pair(CACHE_BUST_PARAM, &millis.to_string());
        }
        url
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    fn location(&self) -> &str {
        self.url.as_str()
    }

    async fn fetch(&self) -> Result<Vec<u8>, ContentError> {
        let url = self.request_url(OffsetDateTime::now_utc());
        debug!(target = "jornageo::content", url = %url, "fetching content document");

        let mut request = self.client.get(url);
        if self.cache_bust {
            request = request
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }

        let response = request
            .send()
            .await
            .map_err(|err| ContentError::unavailable(self.location(), err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status {
                location: self.location().to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ContentError::unavailable(self.location(), err))?;
        Ok(bytes.to_vec())
    }
}
