//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

mod cli;

pub use cli::{
    CliArgs, Command, ContentOverrides, LoggingOverrides, RegisterArgs, RenderArgs, ServeArgs,
    ServeOverrides,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "jornageo";
const ENV_PREFIX: &str = "JORNAGEO";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
pub(crate) const DEFAULT_CONTENT_SOURCE: &str = "content/content.json";
pub(crate) const DEFAULT_REGISTRATION_ENDPOINT: &str =
    "https://a4ax2vyqte.execute-api.us-east-1.amazonaws.com/prod/register";

/// Fully-resolved deployment settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub content: ContentSettings,
    pub registration: RegistrationSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

/// Where the content document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLocation {
    File(PathBuf),
    Url(Url),
}

#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub source: ContentLocation,
    pub cache_bust: bool,
}

#[derive(Debug, Clone)]
pub struct RegistrationSettings {
    pub endpoint: Url,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub coordination: bool,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match cli.command.as_ref() {
        Some(Command::Serve(args)) => raw.apply_serve_overrides(&args.overrides),
        Some(Command::Render(args)) => {
            raw.apply_logging_overrides(&args.logging);
            raw.apply_content_overrides(&args.content);
        }
        Some(Command::Register(args)) => {
            raw.apply_logging_overrides(&args.logging);
            raw.apply_content_overrides(&args.content);
            raw.apply_registration_endpoint(args.registration_endpoint.as_deref());
        }
        None => raw.apply_serve_overrides(&ServeOverrides::default()),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    content: RawContentSettings,
    registration: RawRegistrationSettings,
    render: RawRenderSettings,
}

impl RawSettings {
    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.server_port {
            self.server.port = Some(port);
        }

        self.apply_logging_overrides(&overrides.logging);
        self.apply_content_overrides(&overrides.content);
        self.apply_registration_endpoint(overrides.registration_endpoint.as_deref());
    }

    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_content_overrides(&mut self, overrides: &ContentOverrides) {
        if let Some(source) = overrides.content_source.as_ref() {
            self.content.source = Some(source.clone());
        }
        if let Some(cache_bust) = overrides.content_cache_bust {
            self.content.cache_bust = Some(cache_bust);
        }
        if let Some(coordination) = overrides.render_coordination {
            self.render.coordination = Some(coordination);
        }
    }

    fn apply_registration_endpoint(&mut self, endpoint: Option<&str>) {
        if let Some(endpoint) = endpoint {
            self.registration.endpoint = Some(endpoint.to_string());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            content,
            registration,
            render,
        } = raw;

        let server = build_server_settings(server)?;
        let logging = build_logging_settings(logging)?;
        let content = build_content_settings(content)?;
        let registration = build_registration_settings(registration)?;
        let render = build_render_settings(render);

        Ok(Self {
            server,
            logging,
            content,
            registration,
            render,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }

    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;

    Ok(ServerSettings { addr })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_content_settings(content: RawContentSettings) -> Result<ContentSettings, LoadError> {
    let raw_source = content
        .source
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| DEFAULT_CONTENT_SOURCE.to_string());
    if raw_source.is_empty() {
        return Err(LoadError::invalid(
            "content.source",
            "source must not be empty",
        ));
    }

    Ok(ContentSettings {
        source: parse_content_location(&raw_source)
            .map_err(|reason| LoadError::invalid("content.source", reason))?,
        cache_bust: content.cache_bust.unwrap_or(true),
    })
}

fn build_registration_settings(
    registration: RawRegistrationSettings,
) -> Result<RegistrationSettings, LoadError> {
    let raw_endpoint = registration
        .endpoint
        .unwrap_or_else(|| DEFAULT_REGISTRATION_ENDPOINT.to_string());

    let endpoint = Url::parse(raw_endpoint.trim()).map_err(|err| {
        LoadError::invalid(
            "registration.endpoint",
            format!("invalid url `{raw_endpoint}`: {err}"),
        )
    })?;
    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "registration.endpoint",
            format!("unsupported scheme `{}`", endpoint.scheme()),
        ));
    }

    Ok(RegistrationSettings { endpoint })
}

fn build_render_settings(render: RawRenderSettings) -> RenderSettings {
    RenderSettings {
        coordination: render.coordination.unwrap_or(true),
    }
}

/// `http(s)://` values are URLs; anything else is a filesystem path.
fn parse_content_location(raw: &str) -> Result<ContentLocation, String> {
    let lowered = raw.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return Url::parse(raw)
            .map(ContentLocation::Url)
            .map_err(|err| format!("invalid url `{raw}`: {err}"));
    }
    Ok(ContentLocation::File(PathBuf::from(raw)))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawContentSettings {
    source: Option<String>,
    cache_bust: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRegistrationSettings {
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    coordination: Option<bool>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
