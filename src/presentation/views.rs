use crate::application::{
    error::HttpError, registration::SubmissionOutcome, render::PageSlots,
};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

pub const PAGE_TITLE: &str = "JornaGEO";

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Status message shown next to the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    /// CSS modifier: `success` or `error`.
    pub kind: &'static str,
    pub message: String,
}

impl From<&SubmissionOutcome> for NoticeView {
    fn from(outcome: &SubmissionOutcome) -> Self {
        let kind = if outcome.is_accepted() {
            "success"
        } else {
            "error"
        };
        Self {
            kind,
            message: outcome.message(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LandingPage {
    pub title: String,
    pub slots: PageSlots,
    pub coordination: bool,
    pub notice: Option<NoticeView>,
}

impl LandingPage {
    /// The page before any content has been rendered into it.
    pub fn empty() -> Self {
        Self {
            title: PAGE_TITLE.to_string(),
            slots: PageSlots::new(),
            coordination: false,
            notice: None,
        }
    }

    pub fn with_notice(self, notice: Option<NoticeView>) -> Self {
        Self { notice, ..self }
    }
}

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub page: LandingPage,
}
