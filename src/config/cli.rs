use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the JornaGEO binary.
#[derive(Debug, Parser)]
#[command(name = "jornageo", version, about = "JornaGEO landing page server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "JORNAGEO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Serve the landing page and the registration form over HTTP.
    Serve(Box<ServeArgs>),
    /// Render the landing page once and write the HTML to a file or stdout.
    Render(RenderArgs),
    /// Submit one registration to the configured endpoint.
    Register(RegisterArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ContentOverrides {
    /// Override the content document location (file path or http(s) URL).
    #[arg(long = "content-source", value_name = "PATH_OR_URL", value_hint = ValueHint::AnyPath)]
    pub content_source: Option<String>,

    /// Toggle the cache-busting query parameter for URL sources.
    #[arg(
        long = "content-cache-bust",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub content_cache_bust: Option<bool>,

    /// Toggle rendering of the coordination section.
    #[arg(
        long = "render-coordination",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub render_coordination: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(flatten)]
    pub content: ContentOverrides,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the registration endpoint URL.
    #[arg(long = "registration-endpoint", value_name = "URL")]
    pub registration_endpoint: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(flatten)]
    pub content: ContentOverrides,

    /// File to write the rendered page to; stdout when omitted.
    #[arg(long, short = 'o', value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(flatten)]
    pub content: ContentOverrides,

    /// Override the registration endpoint URL.
    #[arg(long = "registration-endpoint", value_name = "URL")]
    pub registration_endpoint: Option<String>,

    /// Form value as `name=value`; repeat for every field.
    #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("field name is empty in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}
