//! Infrastructure adapters and runtime bootstrap.

pub mod content_source;
pub mod error;
pub mod http;
pub mod registration_client;
pub mod telemetry;

use reqwest::Client;

use self::error::InfraError;

pub fn user_agent() -> &'static str {
    concat!("jornageo/", env!("CARGO_PKG_VERSION"))
}

/// Shared outbound client; no request timeout is configured.
pub fn http_client() -> Result<Client, InfraError> {
    Client::builder()
        .user_agent(user_agent())
        .build()
        .map_err(|err| InfraError::http_client(err.to_string()))
}
