use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::{
    application::registration::{GatewayResponse, RegistrationGateway, TransportError},
    domain::registration::RegistrationPayload,
};

/// Posts registrations as JSON to the remote endpoint.
#[derive(Debug, Clone)]
pub struct HttpRegistrationGateway {
    client: Client,
    endpoint: Url,
}

impl HttpRegistrationGateway {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl RegistrationGateway for HttpRegistrationGateway {
    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    async fn send(&self, payload: &RegistrationPayload) -> Result<GatewayResponse, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|err| TransportError::Unreachable {
                endpoint: self.endpoint.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status().as_u16();
        // Every answer, success or not, must carry a JSON body.
        let body = response
            .json::<Value>()
            .await
            .map_err(|err| TransportError::Body {
                endpoint: self.endpoint.to_string(),
                message: err.to_string(),
            })?;

        Ok(GatewayResponse { status, body })
    }
}
