//! Registration payload and the local checks run before anything is sent.

use serde::{Serialize, Serializer, ser::SerializeMap};
use thiserror::Error;

use super::content::{FieldShape, RegistrationFormSpec};

/// Value submitted for a ticked checkbox.
pub const CHECKBOX_AFFIRMATIVE: &str = "sim";

/// Fields every registration must carry, whatever the document declares.
pub const BASELINE_REQUIRED: [&str; 2] = ["name", "email"];

/// Field name to submitted value, kept in submission order.
///
/// Inserting an existing name replaces its value in place, so the last submitted value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationPayload {
    entries: Vec<(String, String)>,
}

impl RegistrationPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RegistrationPayload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Self::new();
        for (name, value) in iter {
            payload.insert(name, value);
        }
        payload
    }
}

impl Serialize for RegistrationPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor, preencha todos os campos obrigatórios.")]
    MissingRequired { field: String },
    #[error("Por favor, insira um e-mail válido.")]
    InvalidEmail,
}

/// Required-field set applied to a payload before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRules {
    required: Vec<String>,
}

impl Default for RegistrationRules {
    fn default() -> Self {
        Self {
            required: BASELINE_REQUIRED.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl RegistrationRules {
    /// Baseline fields plus every field the document marks as required.
    pub fn from_form(form: &RegistrationFormSpec) -> Self {
        let mut rules = Self::default();
        for field in form.fields.iter().filter(|field| field.required) {
            if !rules.required.iter().any(|name| *name == field.name) {
                rules.required.push(field.name.clone());
            }
        }
        rules
    }

    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    pub fn validate(&self, payload: &RegistrationPayload) -> Result<(), ValidationError> {
        if let Some(field) = self
            .required()
            .find(|name| payload.get(name).is_none_or(str::is_empty))
        {
            return Err(ValidationError::MissingRequired {
                field: field.to_string(),
            });
        }

        match payload.get("email") {
            Some(email) if is_valid_email(email) => Ok(()),
            _ => Err(ValidationError::InvalidEmail),
        }
    }
}

/// Builds a payload from raw submitted pairs, keeping only fields the form declares.
///
/// Checkboxes are only submitted when ticked; any value for a ticked checkbox is normalised to
/// [`CHECKBOX_AFFIRMATIVE`].
pub fn payload_from_form<'a, I>(form: &RegistrationFormSpec, submitted: I) -> RegistrationPayload
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut payload = RegistrationPayload::new();
    for (name, value) in submitted {
        let Some(field) = form.fields.iter().find(|field| field.name == name) else {
            continue;
        };
        match field.shape() {
            FieldShape::Checkbox => payload.insert(name, CHECKBOX_AFFIRMATIVE),
            FieldShape::Select | FieldShape::Input => payload.insert(name, value),
        }
    }
    payload
}

/// Non-space local part, `@`, non-space domain containing a dot with text on both sides.
///
/// "Space" is the class browsers match with `\s`, not Rust's `char::is_whitespace`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(is_form_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

/// Unicode `White_Space` without U+0085, plus U+FEFF: the set browsers match with `\s`.
fn is_form_whitespace(ch: char) -> bool {
    ch == '\u{feff}' || (ch != '\u{85}' && ch.is_whitespace())
}
