//! Deterministic projection of a content document into page slots.
//!
//! Rendering is split in two steps: [`ContentRenderer::render`] computes every slot write into a
//! [`RenderPlan`], and [`RenderPlan::apply`] hands them to a surface. A plan is only produced
//! when every section rendered, so a surface never sees a partial render.

mod sections;
mod surface;
mod types;

use askama::Template;

use crate::{
    domain::{content::ContentDocument, registration::RegistrationPayload},
    presentation::fragments::{
        CoordinationFragment, FeaturesFragment, FormFieldsFragment, IncludesFragment,
        ScheduleFragment,
    },
};

pub use sections::{days, features, form_fields, group_coordinators, session};
pub use surface::{PageSlots, RenderSurface};
pub use types::{Markup, RenderError, Slot, SlotContent};

/// Top-level document section a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    About,
    Schedule,
    Registration,
    Coordination,
}

struct TextBinding {
    slot: Slot,
    section: Section,
    read: fn(&ContentDocument) -> Option<&str>,
}

struct MarkupBinding {
    slot: Slot,
    section: Section,
    render: fn(&ContentDocument, Option<&RegistrationPayload>) -> Option<Result<String, askama::Error>>,
}

static TEXT_BINDINGS: [TextBinding; 19] = [
    TextBinding {
        slot: Slot::HeroTag,
        section: Section::Hero,
        read: |doc| Some(doc.hero.tag.as_str()),
    },
    TextBinding {
        slot: Slot::HeroTitle,
        section: Section::Hero,
        read: |doc| Some(doc.hero.title.as_str()),
    },
    TextBinding {
        slot: Slot::HeroDescription,
        section: Section::Hero,
        read: |doc| Some(doc.hero.description.as_str()),
    },
    TextBinding {
        slot: Slot::HeroPrimaryButton,
        section: Section::Hero,
        read: |doc| Some(doc.hero.primary_button.as_str()),
    },
    TextBinding {
        slot: Slot::HeroSecondaryButton,
        section: Section::Hero,
        read: |doc| Some(doc.hero.secondary_button.as_str()),
    },
    TextBinding {
        slot: Slot::ParticipantsCount,
        section: Section::Hero,
        read: |doc| Some(doc.hero.stats.participants.as_str()),
    },
    TextBinding {
        slot: Slot::ParticipantsLabel,
        section: Section::Hero,
        read: |doc| Some(doc.hero.stats.participants_label.as_str()),
    },
    TextBinding {
        slot: Slot::DaysCount,
        section: Section::Hero,
        read: |doc| Some(doc.hero.stats.days.as_str()),
    },
    TextBinding {
        slot: Slot::DaysLabel,
        section: Section::Hero,
        read: |doc| Some(doc.hero.stats.days_label.as_str()),
    },
    TextBinding {
        slot: Slot::AboutTitle,
        section: Section::About,
        read: |doc| Some(doc.about.title.as_str()),
    },
    TextBinding {
        slot: Slot::AboutSubtitle,
        section: Section::About,
        read: |doc| Some(doc.about.subtitle.as_str()),
    },
    TextBinding {
        slot: Slot::AboutMainTitle,
        section: Section::About,
        read: |doc| Some(doc.about.main_title.as_str()),
    },
    TextBinding {
        slot: Slot::AboutDescription,
        section: Section::About,
        read: |doc| Some(doc.about.description.as_str()),
    },
    TextBinding {
        slot: Slot::ScheduleTitle,
        section: Section::Schedule,
        read: |doc| Some(doc.schedule.title.as_str()),
    },
    TextBinding {
        slot: Slot::ScheduleSubtitle,
        section: Section::Schedule,
        read: |doc| Some(doc.schedule.subtitle.as_str()),
    },
    TextBinding {
        slot: Slot::RegistrationTitle,
        section: Section::Registration,
        read: |doc| Some(doc.registration.title.as_str()),
    },
    TextBinding {
        slot: Slot::RegistrationSubtitle,
        section: Section::Registration,
        read: |doc| Some(doc.registration.subtitle.as_str()),
    },
    TextBinding {
        slot: Slot::RegistrationPrice,
        section: Section::Registration,
        read: |doc| Some(doc.registration.price.as_str()),
    },
    TextBinding {
        slot: Slot::CoordinationTitle,
        section: Section::Coordination,
        read: |doc| doc.coordination.as_ref().map(|c| c.title.as_str()),
    },
];

static MARKUP_BINDINGS: [MarkupBinding; 5] = [
    MarkupBinding {
        slot: Slot::FeaturesGrid,
        section: Section::About,
        render: |doc, _| {
            let features = sections::features(&doc.about);
            Some(FeaturesFragment { features: &features }.render())
        },
    },
    MarkupBinding {
        slot: Slot::ScheduleContent,
        section: Section::Schedule,
        render: |doc, _| {
            let days = sections::days(&doc.schedule);
            Some(ScheduleFragment { days: &days }.render())
        },
    },
    MarkupBinding {
        slot: Slot::RegistrationIncludes,
        section: Section::Registration,
        render: |doc, _| {
            Some(
                IncludesFragment {
                    items: &doc.registration.includes,
                }
                .render(),
            )
        },
    },
    MarkupBinding {
        slot: Slot::FormFields,
        section: Section::Registration,
        render: |doc, values| {
            let fields = sections::form_fields(&doc.registration.form, values);
            Some(FormFieldsFragment { fields: &fields }.render())
        },
    },
    MarkupBinding {
        slot: Slot::CoordinationContent,
        section: Section::Coordination,
        render: |doc, _| {
            let coordination = doc.coordination.as_ref()?;
            let groups = sections::group_coordinators(&coordination.coordinators);
            Some(CoordinationFragment { groups: &groups }.render())
        },
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render the optional coordination section when the document carries one.
    pub coordination: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { coordination: true }
    }
}

/// Ordered slot writes computed from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPlan {
    writes: Vec<(Slot, SlotContent)>,
}

impl RenderPlan {
    pub fn writes(&self) -> &[(Slot, SlotContent)] {
        &self.writes
    }

    pub fn get(&self, slot: Slot) -> Option<&SlotContent> {
        self.writes
            .iter()
            .find(|(candidate, _)| *candidate == slot)
            .map(|(_, content)| content)
    }

    pub fn apply<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        for (slot, content) in &self.writes {
            match content {
                SlotContent::Text(text) => surface.write_text(*slot, text),
                SlotContent::Markup(markup) => surface.write_markup(*slot, markup),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContentRenderer {
    options: RenderOptions,
}

impl ContentRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Whether the page should expose the coordination section for this document.
    pub fn shows_coordination(&self, document: &ContentDocument) -> bool {
        self.options.coordination && document.coordination.is_some()
    }

    /// Computes every slot write for `document`.
    ///
    /// `form_values` prefills the registration form; pass `None` for a fresh form. Empty text
    /// fields produce no write and leave their slot untouched.
    pub fn render(
        &self,
        document: &ContentDocument,
        form_values: Option<&RegistrationPayload>,
    ) -> Result<RenderPlan, RenderError> {
        let mut writes = Vec::with_capacity(TEXT_BINDINGS.len() + MARKUP_BINDINGS.len());

        for binding in TEXT_BINDINGS.iter().filter(|b| self.enabled(b.section)) {
            if let Some(text) = (binding.read)(document).filter(|text| !text.is_empty()) {
                writes.push((binding.slot, SlotContent::Text(text.to_string())));
            }
        }

        for binding in MARKUP_BINDINGS.iter().filter(|b| self.enabled(b.section)) {
            let Some(rendered) = (binding.render)(document, form_values) else {
                continue;
            };
            let html = rendered.map_err(|source| RenderError::Fragment {
                slot: binding.slot,
                source,
            })?;
            writes.push((
                binding.slot,
                SlotContent::Markup(Markup::from_rendered(html)),
            ));
        }

        Ok(RenderPlan { writes })
    }

    fn enabled(&self, section: Section) -> bool {
        section != Section::Coordination || self.options.coordination
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{
        Coordination, Coordinator, Feature, FormField, ScheduleDay, Session,
    };

    fn document() -> ContentDocument {
        let raw = r#"{
            "hero": {"tag": "2ª edição", "title": "JornaGEO", "stats": {"participants": "200+"}},
            "about": {"features": [{"title": "Palestras", "description": "d1"}]},
            "schedule": {"title": "Programação", "days": []},
            "registration": {"price": "Gratuito", "includes": ["Certificado"], "form": {"fields": []}}
        }"#;
        ContentDocument::from_slice(raw.as_bytes()).expect("valid document")
    }

    fn markup(plan: &RenderPlan, slot: Slot) -> &str {
        match plan.get(slot) {
            Some(SlotContent::Markup(markup)) => markup.as_str(),
            other => panic!("expected markup in {slot}, found {other:?}"),
        }
    }

    #[test]
    fn text_slots_follow_the_binding_table() {
        let plan = ContentRenderer::default()
            .render(&document(), None)
            .expect("render");

        assert_eq!(
            plan.get(Slot::HeroTitle),
            Some(&SlotContent::Text("JornaGEO".into()))
        );
        assert_eq!(
            plan.get(Slot::ParticipantsCount),
            Some(&SlotContent::Text("200+".into()))
        );
        assert_eq!(
            plan.get(Slot::RegistrationPrice),
            Some(&SlotContent::Text("Gratuito".into()))
        );
        assert_eq!(plan.get(Slot::HeroDescription), None);
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = ContentRenderer::default();
        let first = renderer.render(&document(), None).expect("render");
        let second = renderer.render(&document(), None).expect("render");
        assert_eq!(first, second);
    }

    #[test]
    fn missing_coordination_is_skipped() {
        let plan = ContentRenderer::default()
            .render(&document(), None)
            .expect("render");
        assert_eq!(plan.get(Slot::CoordinationTitle), None);
        assert_eq!(plan.get(Slot::CoordinationContent), None);
    }

    #[test]
    fn coordination_flag_disables_the_section() {
        let mut document = document();
        document.coordination = Some(Coordination {
            title: "Coordenação".into(),
            coordinators: vec![Coordinator {
                section: "Geral".into(),
                name: "Eva".into(),
                ..Default::default()
            }],
        });

        let enabled = ContentRenderer::default()
            .render(&document, None)
            .expect("render");
        assert!(markup(&enabled, Slot::CoordinationContent).contains("Eva"));
        assert!(ContentRenderer::default().shows_coordination(&document));

        let disabled = ContentRenderer::new(RenderOptions {
            coordination: false,
        });
        let plan = disabled.render(&document, None).expect("render");
        assert_eq!(plan.get(Slot::CoordinationTitle), None);
        assert_eq!(plan.get(Slot::CoordinationContent), None);
        assert!(!disabled.shows_coordination(&document));
    }

    #[test]
    fn fragments_escape_document_values() {
        let mut document = document();
        document.about.features = vec![Feature {
            title: "<script>alert(1)</script>".into(),
            description: "a & b".into(),
        }];

        let plan = ContentRenderer::default()
            .render(&document, None)
            .expect("render");
        let html = markup(&plan, Slot::FeaturesGrid);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&#60;script&#62;alert(1)&#60;/script&#62;"));
        assert!(html.contains("a &#38; b"));
    }

    #[test]
    fn select_renders_placeholder_and_required() {
        let mut document = document();
        document.registration.form.fields = vec![FormField {
            name: "area".into(),
            label: "Área".into(),
            kind: "select".into(),
            required: true,
            options: Some(vec!["x".into(), "y".into()]),
        }];

        let plan = ContentRenderer::default()
            .render(&document, None)
            .expect("render");
        let html = markup(&plan, Slot::FormFields);
        assert_eq!(html.matches("<option").count(), 3);
        assert!(html.contains("<option value=\"\">Selecione...</option>"));
        assert!(html.contains("<option value=\"x\">x</option>"));
        assert!(html.contains(" required>"));
        assert!(html.contains("Área *</label>"));
    }

    #[test]
    fn checkbox_and_generic_input_shapes() {
        let mut document = document();
        document.registration.form.fields = vec![
            FormField {
                name: "newsletter".into(),
                label: "Receber novidades".into(),
                kind: "checkbox".into(),
                ..Default::default()
            },
            FormField {
                name: "phone".into(),
                label: "Telefone".into(),
                kind: "tel".into(),
                ..Default::default()
            },
        ];

        let plan = ContentRenderer::default()
            .render(&document, None)
            .expect("render");
        let html = markup(&plan, Slot::FormFields);
        assert!(html.contains(
            "<input type=\"checkbox\" id=\"newsletter\" name=\"newsletter\" value=\"sim\">"
        ));
        assert!(html.contains("<input type=\"tel\" id=\"phone\" name=\"phone\">"));
        assert!(!html.contains("required"));
        assert!(!html.contains(" *"));
    }

    #[test]
    fn schedule_lists_every_session_in_order() {
        let mut document = document();
        document.schedule.days = vec![ScheduleDay {
            day: "Dia 1".into(),
            date: "10/11".into(),
            sessions: ["Abertura", "Painel", "Encerramento"]
                .into_iter()
                .map(|title| Session {
                    time: "09:00".into(),
                    title: title.into(),
                    ..Default::default()
                })
                .collect(),
        }];

        let plan = ContentRenderer::default()
            .render(&document, None)
            .expect("render");
        let html = markup(&plan, Slot::ScheduleContent);
        assert_eq!(html.matches("class=\"session\"").count(), 3);
        let abertura = html.find("Abertura").expect("first session");
        let painel = html.find("Painel").expect("second session");
        let encerramento = html.find("Encerramento").expect("third session");
        assert!(abertura < painel && painel < encerramento);
    }

    #[test]
    fn plan_applies_to_any_surface() {
        #[derive(Default)]
        struct Recorder {
            texts: Vec<Slot>,
            markups: Vec<Slot>,
        }

        impl RenderSurface for Recorder {
            fn write_text(&mut self, slot: Slot, _text: &str) {
                self.texts.push(slot);
            }

            fn write_markup(&mut self, slot: Slot, _markup: &Markup) {
                self.markups.push(slot);
            }
        }

        let plan = ContentRenderer::default()
            .render(&document(), None)
            .expect("render");
        let mut recorder = Recorder::default();
        plan.apply(&mut recorder);

        assert_eq!(
            recorder.texts,
            [
                Slot::HeroTag,
                Slot::HeroTitle,
                Slot::ParticipantsCount,
                Slot::ScheduleTitle,
                Slot::RegistrationPrice
            ]
        );
        assert_eq!(
            recorder.markups,
            [
                Slot::FeaturesGrid,
                Slot::ScheduleContent,
                Slot::RegistrationIncludes,
                Slot::FormFields
            ]
        );
    }
}
