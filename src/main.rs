use std::{process, sync::Arc};

use askama::Template;
use jornageo::{
    application::{
        AppContext,
        content::ContentLoader,
        error::AppError,
        registration::{RegistrationSubmitter, SubmissionOutcome},
        render::{ContentRenderer, RenderOptions},
    },
    config::{self, ContentLocation},
    infra::{
        self, content_source, error::InfraError, http, registration_client::HttpRegistrationGateway,
        telemetry,
    },
    presentation::views::LandingTemplate,
};
use tokio::io::AsyncWriteExt;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Render(args) => run_render(settings, args).await,
        config::Command::Register(args) => run_register(settings, args).await,
    }
}

fn build_application_context(settings: &config::Settings) -> Result<AppContext, AppError> {
    let client = infra::http_client()?;

    let renderer = ContentRenderer::new(RenderOptions {
        coordination: settings.render.coordination,
    });
    let loader = ContentLoader::new(
        content_source::from_settings(&settings.content, &client),
        renderer,
    );

    let gateway = HttpRegistrationGateway::new(client, settings.registration.endpoint.clone());
    let submitter = RegistrationSubmitter::new(Arc::new(gateway));

    Ok(AppContext::new(Arc::new(loader), Arc::new(submitter)))
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let app = build_application_context(&settings)?;
    let content_file = match &settings.content.source {
        ContentLocation::File(path) => Some(path.clone()),
        ContentLocation::Url(_) => None,
    };

    let router = http::build_router(http::HttpState { app, content_file });

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "jornageo::serve",
        addr = %settings.server.addr,
        content = %content_location(&settings.content.source),
        endpoint = %settings.registration.endpoint,
        "listening"
    );

    axum::serve(listener, router.into_make_service())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

async fn run_render(settings: config::Settings, args: config::RenderArgs) -> Result<(), AppError> {
    let app = build_application_context(&settings)?;
    let page = app.try_landing_page().await?;
    let html = LandingTemplate { page }
        .render()
        .map_err(|err| AppError::unexpected(format!("landing template failed: {err}")))?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, html.as_bytes())
                .await
                .map_err(|err| AppError::from(InfraError::from(err)))?;
            info!(
                target = "jornageo::render",
                path = %path.display(),
                bytes = html.len(),
                "landing page written"
            );
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(html.as_bytes())
                .await
                .map_err(|err| AppError::from(InfraError::from(err)))?;
            stdout
                .flush()
                .await
                .map_err(|err| AppError::from(InfraError::from(err)))?;
        }
    }

    Ok(())
}

async fn run_register(
    settings: config::Settings,
    args: config::RegisterArgs,
) -> Result<(), AppError> {
    let app = build_application_context(&settings)?;

    let outcome = app.submit_registration(args.fields).await;

    println!("{}", outcome.message());
    match outcome {
        SubmissionOutcome::Accepted { .. } => Ok(()),
        SubmissionOutcome::Invalid(err) => Err(AppError::from(err)),
        SubmissionOutcome::Rejected { message } => Err(AppError::unexpected(format!(
            "registration rejected by endpoint: {message}"
        ))),
        SubmissionOutcome::Failed { .. } => Err(AppError::unexpected(format!(
            "registration endpoint `{}` could not be reached",
            app.registration.endpoint()
        ))),
    }
}

fn content_location(location: &ContentLocation) -> String {
    match location {
        ContentLocation::File(path) => path.display().to_string(),
        ContentLocation::Url(url) => url.to_string(),
    }
}
