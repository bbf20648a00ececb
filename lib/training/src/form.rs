//! The training editor form.
//!
//! The editor is a five-step wizard; every field belongs to exactly one step
//! so a failed submit can send the admin back to the first broken step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of steps in the training editor.
pub const FORM_STEP_COUNT: usize = 5;

/// How attendees register for a training.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationMethod {
    /// Registration happens inside training-hub.
    #[default]
    Internal,
    /// Registration happens on an external site linked from the training.
    External,
}

/// A field of the training editor, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainingField {
    Name,
    CategoryId,
    Description,
    ShortDescription,
    Date,
    EndDate,
    AvailableSlots,
    MaxRegistrations,
    ExternalLink,
    RegistrationMethod,
    Location,
    Speakers,
    IsRegistrationOpen,
}

impl TrainingField {
    /// Every field in wizard order.
    pub const ALL: [Self; 13] = [
        Self::Name,
        Self::CategoryId,
        Self::Description,
        Self::ShortDescription,
        Self::Date,
        Self::EndDate,
        Self::AvailableSlots,
        Self::MaxRegistrations,
        Self::ExternalLink,
        Self::RegistrationMethod,
        Self::Location,
        Self::Speakers,
        Self::IsRegistrationOpen,
    ];

    /// Returns the camelCase field name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CategoryId => "categoryId",
            Self::Description => "description",
            Self::ShortDescription => "shortDescription",
            Self::Date => "date",
            Self::EndDate => "endDate",
            Self::AvailableSlots => "availableSlots",
            Self::MaxRegistrations => "maxRegistrations",
            Self::ExternalLink => "externalLink",
            Self::RegistrationMethod => "registrationMethod",
            Self::Location => "location",
            Self::Speakers => "speakers",
            Self::IsRegistrationOpen => "isRegistrationOpen",
        }
    }

    /// Returns the zero-based wizard step the field is edited on.
    #[must_use]
    pub fn step(&self) -> usize {
        match self {
            Self::Name | Self::CategoryId | Self::Description | Self::ShortDescription => 0,
            Self::Date | Self::EndDate => 1,
            Self::AvailableSlots
            | Self::MaxRegistrations
            | Self::ExternalLink
            | Self::RegistrationMethod => 2,
            Self::Location | Self::Speakers => 3,
            Self::IsRegistrationOpen => 4,
        }
    }

    /// Returns the fields edited on `step`, in wizard order.
    #[must_use]
    pub fn on_step(step: usize) -> Vec<Self> {
        Self::ALL.into_iter().filter(|f| f.step() == step).collect()
    }
}

impl fmt::Display for TrainingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TrainingField {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Training data as submitted from the editor.
///
/// Dates are kept as the strings the editor produced; validation decides
/// whether they parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainingForm {
    pub name: String,
    pub category_id: String,
    pub description: String,
    pub short_description: Option<String>,
    pub date: Option<String>,
    pub end_date: Option<String>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub available_slots: i64,
    pub max_registrations: i64,
    pub registration_method: RegistrationMethod,
    pub external_link: Option<String>,
    pub location: Option<String>,
    pub speakers: Option<String>,
    pub is_registration_open: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_step_has_fields() {
        for step in 0..FORM_STEP_COUNT {
            assert!(!TrainingField::on_step(step).is_empty(), "step {step}");
        }
        assert!(TrainingField::on_step(FORM_STEP_COUNT).is_empty());
    }

    #[test]
    fn step_two_holds_registration_fields() {
        assert_eq!(
            TrainingField::on_step(2),
            vec![
                TrainingField::AvailableSlots,
                TrainingField::MaxRegistrations,
                TrainingField::ExternalLink,
                TrainingField::RegistrationMethod,
            ]
        );
    }

    #[test]
    fn form_deserializes_from_editor_payload() {
        let json = r#"{
            "name": "Project Management Fundamentals",
            "categoryId": "category-1",
            "description": "Core workshop",
            "date": "2026-02-15T00:00:00.000Z",
            "availableSlots": 20,
            "maxRegistrations": 25,
            "registrationMethod": "external",
            "externalLink": "https://example.com/register"
        }"#;

        let form: TrainingForm = serde_json::from_str(json).expect("deserialize");

        assert_eq!(form.category_id, "category-1");
        assert_eq!(form.registration_method, RegistrationMethod::External);
        assert_eq!(form.max_registrations, 25);
        assert!(form.end_date.is_none());
    }

    #[test]
    fn field_serializes_as_wire_name() {
        let json = serde_json::to_string(&TrainingField::IsRegistrationOpen).expect("serialize");
        assert_eq!(json, "\"isRegistrationOpen\"");
    }
}
