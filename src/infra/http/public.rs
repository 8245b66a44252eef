use std::path::PathBuf;

use axum::{
    Form, Router,
    body::Body,
    extract::State,
    http::{
        HeaderValue, StatusCode,
        header::{CACHE_CONTROL, CONTENT_TYPE},
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    application::{
        AppContext,
        content::ContentError,
        error::{ErrorReport, HttpError},
        registration::SubmissionOutcome,
    },
    presentation::views::{LandingTemplate, render_template_response},
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub app: AppContext,
    /// Local content file served at `/content.json`; `None` for URL sources.
    pub content_file: Option<PathBuf>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/register", post(register))
        .route("/content.json", get(content_document))
        .route("/_health", get(health))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn index(State(state): State<HttpState>) -> Response {
    let page = state.app.landing_page().await;
    let mut response = render_template_response(LandingTemplate { page }, StatusCode::OK);
    set_no_store(&mut response);
    response
}

async fn register(
    State(state): State<HttpState>,
    Form(submitted): Form<Vec<(String, String)>>,
) -> Response {
    let view = state.app.register(submitted).await;

    let status = match &view.outcome {
        SubmissionOutcome::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionOutcome::Accepted { .. }
        | SubmissionOutcome::Rejected { .. }
        | SubmissionOutcome::Failed { .. } => StatusCode::OK,
    };

    let mut response = render_template_response(LandingTemplate { page: view.page }, status);
    if let SubmissionOutcome::Invalid(err) = &view.outcome {
        ErrorReport::from_error("infra::http::public::register", status, err)
            .attach(&mut response);
    }
    set_no_store(&mut response);
    response
}

async fn content_document(State(state): State<HttpState>) -> Response {
    let Some(path) = state.content_file.as_ref() else {
        return HttpError::new(
            "infra::http::public::content_document",
            StatusCode::NOT_FOUND,
            "Resource not found",
            "content is not served from a local file",
        )
        .into_response();
    };

    match tokio::fs::read(path).await {
        Ok(bytes) => Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .header(CACHE_CONTROL, "no-cache")
            .body(Body::from(bytes))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        Err(err) => {
            HttpError::from(ContentError::unavailable(path.display().to_string(), err))
                .into_response()
        }
    }
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn set_no_store(response: &mut Response) {
    let value = HeaderValue::from_static("no-store");
    response.headers_mut().insert(CACHE_CONTROL, value);
}
