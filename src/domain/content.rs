//! Content document model: the static JSON structure describing all page text.
//!
//! The document is trusted content. Only the four top-level sections are required; every
//! leaf field falls back to an empty value and is rendered as absent.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentDocument {
    pub hero: Hero,
    pub about: About,
    pub schedule: Schedule,
    pub registration: Registration,
    #[serde(default)]
    pub coordination: Option<Coordination>,
}

impl ContentDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hero {
    pub tag: String,
    pub title: String,
    pub description: String,
    pub primary_button: String,
    pub secondary_button: String,
    pub stats: HeroStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroStats {
    #[serde(deserialize_with = "string_or_number")]
    pub participants: String,
    pub participants_label: String,
    #[serde(deserialize_with = "string_or_number")]
    pub days: String,
    pub days_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct About {
    pub title: String,
    pub subtitle: String,
    pub main_title: String,
    pub description: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub title: String,
    pub subtitle: String,
    pub days: Vec<ScheduleDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScheduleDay {
    pub day: String,
    pub date: String,
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    pub time: String,
    pub title: String,
    pub speaker: Option<String>,
    pub speakers: Option<Vec<Speaker>>,
    pub speaker_info: Option<SpeakerInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Speaker {
    pub name: String,
    pub photo: String,
    pub lattes: Option<String>,
    pub linkedin: Option<String>,
}

/// Rich details for a session whose speaker is named by [`Session::speaker`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpeakerInfo {
    pub photo: String,
    pub lattes: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Registration {
    pub title: String,
    pub subtitle: String,
    pub price: String,
    pub includes: Vec<String>,
    pub form: RegistrationFormSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistrationFormSpec {
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub options: Option<Vec<String>>,
}

impl FormField {
    pub fn shape(&self) -> FieldShape {
        match self.kind.as_str() {
            "select" => FieldShape::Select,
            "checkbox" => FieldShape::Checkbox,
            _ => FieldShape::Input,
        }
    }
}

/// The three rendered shapes of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    Select,
    Checkbox,
    Input,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Coordination {
    pub title: String,
    pub coordinators: Vec<Coordinator>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Coordinator {
    pub section: String,
    pub name: String,
    pub photo: String,
    pub lattes: String,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
}

/// Returns the value when it is set and non-empty.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(text) => text,
        Scalar::Number(number) => number_text(&number),
        Scalar::Missing(()) => String::new(),
    })
}

/// Integral floats print without a fractional part, so `200.0` reads as `200`.
fn number_text(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() => value.to_string(),
        _ => number.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "hero": {"title": "JornaGEO", "stats": {"participants": 200, "days": "2"}},
        "about": {},
        "schedule": {"days": []},
        "registration": {"form": {"fields": []}}
    }"#;

    #[test]
    fn missing_leaf_fields_default_to_empty() {
        let document = ContentDocument::from_slice(MINIMAL.as_bytes()).expect("valid document");
        assert_eq!(document.hero.title, "JornaGEO");
        assert!(document.hero.tag.is_empty());
        assert!(document.about.features.is_empty());
        assert!(document.coordination.is_none());
    }

    #[test]
    fn stats_accept_numbers_and_strings() {
        let document = ContentDocument::from_slice(MINIMAL.as_bytes()).expect("valid document");
        assert_eq!(document.hero.stats.participants, "200");
        assert_eq!(document.hero.stats.days, "2");
    }

    #[test]
    fn integral_float_stats_drop_the_fraction() {
        let raw = r#"{
            "hero": {"stats": {"participants": 200.0, "days": 2.5}},
            "about": {},
            "schedule": {},
            "registration": {}
        }"#;
        let document = ContentDocument::from_slice(raw.as_bytes()).expect("valid document");
        assert_eq!(document.hero.stats.participants, "200");
        assert_eq!(document.hero.stats.days, "2.5");
    }

    #[test]
    fn missing_top_level_section_is_an_error() {
        let raw = r#"{"hero": {}, "about": {}, "schedule": {}}"#;
        let err = ContentDocument::from_slice(raw.as_bytes()).expect_err("registration missing");
        assert!(err.to_string().contains("registration"));
    }

    #[test]
    fn field_shape_follows_type() {
        let field = |kind: &str| FormField {
            kind: kind.to_string(),
            ..Default::default()
        };
        assert_eq!(field("select").shape(), FieldShape::Select);
        assert_eq!(field("checkbox").shape(), FieldShape::Checkbox);
        assert_eq!(field("email").shape(), FieldShape::Input);
        assert_eq!(field("tel").shape(), FieldShape::Input);
    }

    #[test]
    fn empty_optional_values_are_absent() {
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some("x".to_string())), Some("x"));
    }
}
