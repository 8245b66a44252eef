//! Registration submission: local validation, then a JSON POST to the fixed endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::registration::{RegistrationPayload, RegistrationRules, ValidationError};

const SOURCE: &str = "application::registration::RegistrationSubmitter";
pub const METRIC_REGISTRATION_SUBMISSIONS: &str = "jornageo_registration_submissions_total";

pub const MESSAGE_ACCEPTED: &str = "Inscrição realizada com sucesso! Verifique seu e-mail para um \"AWS Notification - Subscription Confirmation\" e confirme sua inscrição.";
pub const MESSAGE_REJECTED_FALLBACK: &str = "Erro ao realizar inscrição";
pub const MESSAGE_TRANSPORT_FAILURE: &str = "Erro ao realizar inscrição. Tente novamente.";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("registration endpoint `{endpoint}` unreachable: {message}")]
    Unreachable { endpoint: String, message: String },
    #[error("registration endpoint `{endpoint}` returned an unreadable body: {message}")]
    Body { endpoint: String, message: String },
}

/// Status and decoded JSON body returned by the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: Value,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The server-declared error message, if the body carries a non-empty `error` string.
    pub fn error_message(&self) -> Option<&str> {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
    }
}

/// Transport to the remote registration endpoint.
#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    fn endpoint(&self) -> &str;

    async fn send(&self, payload: &RegistrationPayload) -> Result<GatewayResponse, TransportError>;
}

/// The form a submission reads from and resets on success.
pub trait RegistrationForm {
    fn payload(&self) -> RegistrationPayload;
    fn reset(&mut self);
}

/// Server-side form state: the submitted values until a successful submission clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedForm {
    values: RegistrationPayload,
    reset: bool,
}

impl SubmittedForm {
    pub fn new(values: RegistrationPayload) -> Self {
        Self {
            values,
            reset: false,
        }
    }

    /// Values to show again in the rendered form; `None` once the form was reset.
    pub fn values(&self) -> Option<&RegistrationPayload> {
        (!self.reset).then_some(&self.values)
    }

    pub fn is_reset(&self) -> bool {
        self.reset
    }
}

impl RegistrationForm for SubmittedForm {
    fn payload(&self) -> RegistrationPayload {
        self.values.clone()
    }

    fn reset(&mut self) {
        self.values = RegistrationPayload::new();
        self.reset = true;
    }
}

/// Result of one user-initiated submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Local validation failed; nothing was sent.
    Invalid(ValidationError),
    Accepted { message: String },
    /// The endpoint declared a failure.
    Rejected { message: String },
    /// The request or its response could not be completed.
    Failed { message: String },
}

impl SubmissionOutcome {
    pub fn message(&self) -> String {
        match self {
            SubmissionOutcome::Invalid(err) => err.to_string(),
            SubmissionOutcome::Accepted { message }
            | SubmissionOutcome::Rejected { message }
            | SubmissionOutcome::Failed { message } => message.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionOutcome::Invalid(_) => "invalid",
            SubmissionOutcome::Accepted { .. } => "accepted",
            SubmissionOutcome::Rejected { .. } => "rejected",
            SubmissionOutcome::Failed { .. } => "failed",
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }
}

/// Sends registrations to the configured endpoint.
///
/// There is no in-flight guard: two concurrent submissions of the same data both reach the
/// endpoint.
#[derive(Clone)]
pub struct RegistrationSubmitter {
    gateway: Arc<dyn RegistrationGateway>,
}

impl RegistrationSubmitter {
    pub fn new(gateway: Arc<dyn RegistrationGateway>) -> Self {
        Self { gateway }
    }

    pub fn endpoint(&self) -> &str {
        self.gateway.endpoint()
    }

    /// Validates the form locally and submits it only when the checks pass.
    pub async fn validate_and_submit<F: RegistrationForm + ?Sized>(
        &self,
        form: &mut F,
        rules: &RegistrationRules,
    ) -> SubmissionOutcome {
        if let Err(err) = rules.validate(&form.payload()) {
            let outcome = SubmissionOutcome::Invalid(err);
            record(&outcome);
            return outcome;
        }
        self.submit(form).await
    }

    /// Posts the form payload and resets the form when the endpoint accepts it.
    pub async fn submit<F: RegistrationForm + ?Sized>(&self, form: &mut F) -> SubmissionOutcome {
        let payload = form.payload();
        let outcome = match self.gateway.send(&payload).await {
            Ok(response) if response.is_success() => {
                form.reset();
                info!(
                    target = "jornageo::registration",
                    status = response.status,
                    fields = payload.len(),
                    "registration accepted"
                );
                SubmissionOutcome::Accepted {
                    message: MESSAGE_ACCEPTED.to_string(),
                }
            }
            Ok(response) => {
                let message = response
                    .error_message()
                    .unwrap_or(MESSAGE_REJECTED_FALLBACK)
                    .to_string();
                warn!(
                    target = "jornageo::registration",
                    status = response.status,
                    message = %message,
                    "registration rejected by endpoint"
                );
                SubmissionOutcome::Rejected { message }
            }
            Err(err) => {
                error!(
                    target = "jornageo::registration",
                    source = SOURCE,
                    endpoint = self.gateway.endpoint(),
                    error = %err,
                    "error submitting registration"
                );
                SubmissionOutcome::Failed {
                    message: MESSAGE_TRANSPORT_FAILURE.to_string(),
                }
            }
        };
        record(&outcome);
        outcome
    }
}

fn record(outcome: &SubmissionOutcome) {
    counter!(METRIC_REGISTRATION_SUBMISSIONS, "outcome" => outcome.kind()).increment(1);
}
