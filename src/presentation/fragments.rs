//! View models and auto-escaping templates for the repeated page items.

use askama::Template;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureView {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub day: String,
    pub date: String,
    pub sessions: Vec<SessionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub time: String,
    pub title: String,
    pub has_speaker: bool,
    pub speaker_cards: Vec<SpeakerCardView>,
    /// Speaker name shown as plain text when no rich speaker details exist.
    pub speaker_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerCardView {
    pub name: String,
    pub photo: String,
    pub lattes: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub name: String,
    pub label: String,
    pub input_type: String,
    pub required: bool,
    pub is_select: bool,
    pub is_checkbox: bool,
    pub options: Vec<OptionView>,
    pub value: Option<String>,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorGroupView {
    pub section: String,
    pub members: Vec<CoordinatorCardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorCardView {
    pub name: String,
    pub photo: String,
    pub lattes: String,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
}

#[derive(Template)]
#[template(path = "fragments/features.html")]
pub struct FeaturesFragment<'a> {
    pub features: &'a [FeatureView],
}

#[derive(Template)]
#[template(path = "fragments/schedule.html")]
pub struct ScheduleFragment<'a> {
    pub days: &'a [DayView],
}

#[derive(Template)]
#[template(path = "fragments/includes.html")]
pub struct IncludesFragment<'a> {
    pub items: &'a [String],
}

#[derive(Template)]
#[template(path = "fragments/form_fields.html")]
pub struct FormFieldsFragment<'a> {
    pub fields: &'a [FormFieldView],
}

#[derive(Template)]
#[template(path = "fragments/coordination.html")]
pub struct CoordinationFragment<'a> {
    pub groups: &'a [CoordinatorGroupView],
}
