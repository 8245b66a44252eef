//! Projection of document sections into view models, item by item in document order.

use crate::{
    domain::{
        content::{
            About, Coordinator, FieldShape, FormField, RegistrationFormSpec, Schedule, Session,
            present,
        },
        registration::{CHECKBOX_AFFIRMATIVE, RegistrationPayload},
    },
    presentation::fragments::{
        CoordinatorCardView, CoordinatorGroupView, DayView, FeatureView, FormFieldView,
        OptionView, SessionView, SpeakerCardView,
    },
};

pub fn features(about: &About) -> Vec<FeatureView> {
    about
        .features
        .iter()
        .map(|feature| FeatureView {
            title: feature.title.clone(),
            description: feature.description.clone(),
        })
        .collect()
}

pub fn days(schedule: &Schedule) -> Vec<DayView> {
    schedule
        .days
        .iter()
        .map(|day| DayView {
            day: day.day.clone(),
            date: day.date.clone(),
            sessions: day.sessions.iter().map(session).collect(),
        })
        .collect()
}

/// `speakers` wins over `speakerInfo`; `speakerInfo` needs the `speaker` name to pair with;
/// a bare `speaker` renders as plain text.
pub fn session(session: &Session) -> SessionView {
    let name = present(&session.speaker);
    let has_speaker = name.is_some() || session.speakers.is_some();

    let (speaker_cards, speaker_text) = match (&session.speakers, &session.speaker_info, name) {
        (Some(speakers), _, _) => (
            speakers
                .iter()
                .map(|speaker| SpeakerCardView {
                    name: speaker.name.clone(),
                    photo: speaker.photo.clone(),
                    lattes: present(&speaker.lattes).map(str::to_string),
                    linkedin: present(&speaker.linkedin).map(str::to_string),
                })
                .collect(),
            None,
        ),
        (None, Some(info), Some(name)) => (
            vec![SpeakerCardView {
                name: name.to_string(),
                photo: info.photo.clone(),
                lattes: non_empty(&info.lattes),
                linkedin: non_empty(&info.linkedin),
            }],
            None,
        ),
        (None, _, name) => (Vec::new(), name.map(str::to_string)),
    };

    SessionView {
        time: session.time.clone(),
        title: session.title.clone(),
        has_speaker,
        speaker_cards,
        speaker_text,
    }
}

/// Builds the form field views, prefilled from `values` when a failed submission is shown again.
pub fn form_fields(
    form: &RegistrationFormSpec,
    values: Option<&RegistrationPayload>,
) -> Vec<FormFieldView> {
    form.fields
        .iter()
        .map(|field| form_field(field, values.and_then(|values| values.get(&field.name))))
        .collect()
}

fn form_field(field: &FormField, value: Option<&str>) -> FormFieldView {
    let shape = field.shape();
    let options = match shape {
        FieldShape::Select => field
            .options
            .iter()
            .flatten()
            .map(|option| OptionView {
                value: option.clone(),
                selected: value == Some(option.as_str()),
            })
            .collect(),
        FieldShape::Checkbox | FieldShape::Input => Vec::new(),
    };

    FormFieldView {
        name: field.name.clone(),
        label: field.label.clone(),
        input_type: field.kind.clone(),
        required: field.required,
        is_select: shape == FieldShape::Select,
        is_checkbox: shape == FieldShape::Checkbox,
        options,
        value: match shape {
            FieldShape::Input => value.filter(|value| !value.is_empty()).map(str::to_string),
            FieldShape::Select | FieldShape::Checkbox => None,
        },
        checked: shape == FieldShape::Checkbox && value == Some(CHECKBOX_AFFIRMATIVE),
    }
}

/// Groups runs of consecutive coordinators sharing a section.
///
/// A section that reappears after a different one opens a new group; this is sequential
/// grouping, not a group-by.
pub fn group_coordinators(coordinators: &[Coordinator]) -> Vec<CoordinatorGroupView> {
    let mut groups: Vec<CoordinatorGroupView> = Vec::new();
    for coordinator in coordinators {
        let card = coordinator_card(coordinator);
        match groups.last_mut() {
            Some(group) if group.section == coordinator.section => group.members.push(card),
            _ => groups.push(CoordinatorGroupView {
                section: coordinator.section.clone(),
                members: vec![card],
            }),
        }
    }
    groups
}

fn coordinator_card(coordinator: &Coordinator) -> CoordinatorCardView {
    CoordinatorCardView {
        name: coordinator.name.clone(),
        photo: coordinator.photo.clone(),
        lattes: coordinator.lattes.clone(),
        linkedin: present(&coordinator.linkedin).map(str::to_string),
        website: present(&coordinator.website).map(str::to_string),
        phone: present(&coordinator.phone).map(str::to_string),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
