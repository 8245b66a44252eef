use std::fmt;

use thiserror::Error;

/// Uniquely identified page element that rendering writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    HeroTag,
    HeroTitle,
    HeroDescription,
    HeroPrimaryButton,
    HeroSecondaryButton,
    ParticipantsCount,
    ParticipantsLabel,
    DaysCount,
    DaysLabel,
    AboutTitle,
    AboutSubtitle,
    AboutMainTitle,
    AboutDescription,
    FeaturesGrid,
    ScheduleTitle,
    ScheduleSubtitle,
    ScheduleContent,
    RegistrationTitle,
    RegistrationSubtitle,
    RegistrationPrice,
    RegistrationIncludes,
    FormFields,
    CoordinationTitle,
    CoordinationContent,
}

impl Slot {
    pub const ALL: [Slot; 24] = [
        Slot::HeroTag,
        Slot::HeroTitle,
        Slot::HeroDescription,
        Slot::HeroPrimaryButton,
        Slot::HeroSecondaryButton,
        Slot::ParticipantsCount,
        Slot::ParticipantsLabel,
        Slot::DaysCount,
        Slot::DaysLabel,
        Slot::AboutTitle,
        Slot::AboutSubtitle,
        Slot::AboutMainTitle,
        Slot::AboutDescription,
        Slot::FeaturesGrid,
        Slot::ScheduleTitle,
        Slot::ScheduleSubtitle,
        Slot::ScheduleContent,
        Slot::RegistrationTitle,
        Slot::RegistrationSubtitle,
        Slot::RegistrationPrice,
        Slot::RegistrationIncludes,
        Slot::FormFields,
        Slot::CoordinationTitle,
        Slot::CoordinationContent,
    ];

    /// Element id used by the page markup.
    pub fn id(self) -> &'static str {
        match self {
            Slot::HeroTag => "hero-tag",
            Slot::HeroTitle => "hero-title",
            Slot::HeroDescription => "hero-description",
            Slot::HeroPrimaryButton => "hero-primary-btn",
            Slot::HeroSecondaryButton => "hero-secondary-btn",
            Slot::ParticipantsCount => "participants-count",
            Slot::ParticipantsLabel => "participants-label",
            Slot::DaysCount => "days-count",
            Slot::DaysLabel => "days-label",
            Slot::AboutTitle => "about-title",
            Slot::AboutSubtitle => "about-subtitle",
            Slot::AboutMainTitle => "about-main-title",
            Slot::AboutDescription => "about-description",
            Slot::FeaturesGrid => "features-grid",
            Slot::ScheduleTitle => "schedule-title",
            Slot::ScheduleSubtitle => "schedule-subtitle",
            Slot::ScheduleContent => "schedule-content",
            Slot::RegistrationTitle => "registration-title",
            Slot::RegistrationSubtitle => "registration-subtitle",
            Slot::RegistrationPrice => "registration-price",
            Slot::RegistrationIncludes => "registration-includes",
            Slot::FormFields => "form-fields",
            Slot::CoordinationTitle => "coordination-title",
            Slot::CoordinationContent => "coordination-content",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.id() == id)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// HTML produced by an auto-escaping fragment template.
///
/// Only the renderer constructs values of this type, so document text can never reach a
/// surface as markup without passing through a template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup(String);

impl Markup {
    pub(crate) fn from_rendered(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What a single slot write carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotContent {
    /// Raw text; the surface is responsible for escaping it on output.
    Text(String),
    Markup(Markup),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to render `{slot}` fragment")]
    Fragment {
        slot: Slot,
        #[source]
        source: askama::Error,
    },
}
