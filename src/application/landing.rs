//! Landing page assembly: the loaded document, the submitted form and the outcome notice.

use std::sync::Arc;

use tracing::debug;

use crate::{
    application::{
        content::{ContentError, ContentLoader},
        registration::{RegistrationSubmitter, SubmissionOutcome, SubmittedForm},
        render::PageSlots,
    },
    domain::{
        content::ContentDocument,
        registration::{RegistrationPayload, RegistrationRules, payload_from_form},
    },
    presentation::views::{LandingPage, NoticeView},
};

/// Services shared by every delivery surface, built once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub content: Arc<ContentLoader>,
    pub registration: Arc<RegistrationSubmitter>,
}

/// What a registration request produced: the outcome and the page to show next.
#[derive(Debug, Clone)]
pub struct RegistrationView {
    pub outcome: SubmissionOutcome,
    pub page: LandingPage,
}

impl AppContext {
    pub fn new(content: Arc<ContentLoader>, registration: Arc<RegistrationSubmitter>) -> Self {
        Self {
            content,
            registration,
        }
    }

    /// Loads the document and renders a fresh page. A failed load yields the empty page.
    pub async fn landing_page(&self) -> LandingPage {
        self.try_landing_page()
            .await
            .unwrap_or_else(|_| LandingPage::empty())
    }

    /// Like [`AppContext::landing_page`], but reports why the content could not be shown.
    pub async fn try_landing_page(&self) -> Result<LandingPage, ContentError> {
        let document = self.content.document().await?;
        self.render_page(&document, None)
    }

    /// Validates and submits the raw form pairs, then renders the page with the outcome notice.
    pub async fn register(&self, submitted: Vec<(String, String)>) -> RegistrationView {
        let document = self.content.document().await.ok();
        let (outcome, form) = self.submit_pairs(document.as_ref(), submitted).await;

        let page = document
            .as_ref()
            .and_then(|document| self.render_page(document, form.values()).ok())
            .unwrap_or_else(LandingPage::empty)
            .with_notice(Some(NoticeView::from(&outcome)));
        RegistrationView { outcome, page }
    }

    /// Validates and submits the raw form pairs without rendering a page.
    pub async fn submit_registration(
        &self,
        submitted: Vec<(String, String)>,
    ) -> SubmissionOutcome {
        let document = self.content.document().await.ok();
        self.submit_pairs(document.as_ref(), submitted).await.0
    }

    /// The document's form decides which submitted fields are kept and which are required. When
    /// there is no document the pairs are submitted as given under the baseline rules.
    async fn submit_pairs(
        &self,
        document: Option<&ContentDocument>,
        submitted: Vec<(String, String)>,
    ) -> (SubmissionOutcome, SubmittedForm) {
        let (payload, rules) = match document {
            Some(document) => (
                payload_from_form(
                    &document.registration.form,
                    submitted
                        .iter()
                        .map(|(name, value)| (name.as_str(), value.as_str())),
                ),
                RegistrationRules::from_form(&document.registration.form),
            ),
            None => (
                submitted.into_iter().collect::<RegistrationPayload>(),
                RegistrationRules::default(),
            ),
        };

        let mut form = SubmittedForm::new(payload);
        let outcome = self
            .registration
            .validate_and_submit(&mut form, &rules)
            .await;
        debug!(
            target = "jornageo::registration",
            outcome = outcome.kind(),
            reset = form.is_reset(),
            "registration request handled"
        );
        (outcome, form)
    }

    fn render_page(
        &self,
        document: &ContentDocument,
        form_values: Option<&RegistrationPayload>,
    ) -> Result<LandingPage, ContentError> {
        let mut slots = PageSlots::new();
        self.content.render_into(document, &mut slots, form_values)?;
        Ok(LandingPage {
            coordination: self.content.renderer().shows_coordination(document),
            slots,
            ..LandingPage::empty()
        })
    }
}
