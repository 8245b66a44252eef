//! Content loading: fetch the document once per page view and render it onto a surface.

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    application::render::{ContentRenderer, RenderError, RenderSurface},
    domain::{content::ContentDocument, registration::RegistrationPayload},
};

const SOURCE: &str = "application::content::ContentLoader";
pub const METRIC_CONTENT_LOAD_FAILURES: &str = "jornageo_content_load_failures_total";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content source `{location}` is unavailable: {message}")]
    Unavailable { location: String, message: String },
    #[error("content source `{location}` answered with status {status}")]
    Status { location: String, status: u16 },
    #[error("content document is not valid JSON for the page: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ContentError {
    pub fn unavailable(location: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            location: location.into(),
            message: err.to_string(),
        }
    }
}

/// Where the raw content document comes from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable location used in logs and errors.
    fn location(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<u8>, ContentError>;
}

#[derive(Clone)]
pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
    renderer: ContentRenderer,
}

impl ContentLoader {
    pub fn new(source: Arc<dyn ContentSource>, renderer: ContentRenderer) -> Self {
        Self { source, renderer }
    }

    pub fn renderer(&self) -> &ContentRenderer {
        &self.renderer
    }

    pub fn location(&self) -> &str {
        self.source.location()
    }

    /// Fetches and parses the document. Failures are logged here; callers only decide what to
    /// show instead.
    pub async fn document(&self) -> Result<ContentDocument, ContentError> {
        let result = match self.source.fetch().await {
            Ok(bytes) => ContentDocument::from_slice(&bytes).map_err(ContentError::from),
            Err(err) => Err(err),
        };
        result.inspect_err(|err| self.report(err))
    }

    /// Renders an already loaded document onto `surface`, all or nothing.
    pub fn render_into<S: RenderSurface + ?Sized>(
        &self,
        document: &ContentDocument,
        surface: &mut S,
        form_values: Option<&RegistrationPayload>,
    ) -> Result<(), ContentError> {
        let plan = self
            .renderer
            .render(document, form_values)
            .map_err(ContentError::from)
            .inspect_err(|err| self.report(err))?;
        plan.apply(surface);
        debug!(
            target = "jornageo::content",
            location = self.source.location(),
            slots = plan.writes().len(),
            "content rendered"
        );
        Ok(())
    }

    /// Fetches the document and renders it. On failure the surface is left untouched.
    pub async fn load<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        form_values: Option<&RegistrationPayload>,
    ) -> Result<ContentDocument, ContentError> {
        let document = self.document().await?;
        self.render_into(&document, surface, form_values)?;
        Ok(document)
    }

    fn report(&self, err: &ContentError) {
        counter!(METRIC_CONTENT_LOAD_FAILURES).increment(1);
        error!(
            target = "jornageo::content",
            source = SOURCE,
            location = self.source.location(),
            error = %err,
            "error loading content"
        );
    }
}
