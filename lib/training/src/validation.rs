//! Submit-time validation of the training form.
//!
//! Every rule runs on each submit; a field keeps only its first error, and
//! errors are reported in the order the rules ran.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::form::{RegistrationMethod, TrainingField, TrainingForm};

/// Maximum length of the training name, in characters.
pub const MAX_NAME_LEN: usize = 200;
/// Maximum length of the description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 5000;
/// Maximum length of the short description, in characters.
pub const MAX_SHORT_DESCRIPTION_LEN: usize = 300;
/// Upper bound for both slot counts.
pub const MAX_SEATS: i64 = 10_000;

/// A validation failure on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: TrainingField,
    pub message: String,
}

/// Result of validating a training form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingFormValidation {
    pub is_valid: bool,
    /// One error per invalid field, in the order found.
    pub errors: Vec<FieldError>,
    /// `"<field>: <message>"` for every error.
    pub error_summary: Vec<String>,
    pub invalid_fields: Vec<TrainingField>,
    /// Lowest wizard step holding an invalid field, or 0.
    pub first_invalid_step: usize,
}

impl TrainingFormValidation {
    /// Returns the error message for `field`, if it is invalid.
    #[must_use]
    pub fn error(&self, field: TrainingField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Ordered, first-wins collection of field errors.
#[derive(Default)]
struct Errors(Vec<FieldError>);

impl Errors {
    fn set(&mut self, field: TrainingField, message: &str) {
        if self.0.iter().any(|e| e.field == field) {
            return;
        }
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
    }
}

/// Returns the lowest step that holds one of `invalid_fields`, or 0.
#[must_use]
pub fn first_invalid_step(invalid_fields: &[TrainingField]) -> usize {
    invalid_fields
        .iter()
        .map(TrainingField::step)
        .min()
        .unwrap_or(0)
}

/// Parses a date the editor may produce.
///
/// Accepts RFC 3339, then `YYYY-MM-DDTHH:MM[:SS]`, then `YYYY-MM-DD`.
/// Values without an offset are taken as UTC. Blank input is `None`.
#[must_use]
pub fn parse_form_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Validates a training form before it is submitted.
#[must_use]
pub fn validate_training_form(form: &TrainingForm) -> TrainingFormValidation {
    let mut errors = Errors::default();

    if form.name.trim().is_empty() {
        errors.set(TrainingField::Name, "Training name is required");
    } else if form.name.chars().count() > MAX_NAME_LEN {
        errors.set(TrainingField::Name, "Name must be less than 200 characters");
    }

    if form.category_id.is_empty() {
        errors.set(TrainingField::CategoryId, "Category is required");
    }

    if form.description.trim().is_empty() {
        errors.set(TrainingField::Description, "Description is required");
    } else if form.description.chars().count() > MAX_DESCRIPTION_LEN {
        errors.set(
            TrainingField::Description,
            "Description must be less than 5000 characters",
        );
    }

    if form
        .short_description
        .as_deref()
        .is_some_and(|s| s.chars().count() > MAX_SHORT_DESCRIPTION_LEN)
    {
        errors.set(
            TrainingField::ShortDescription,
            "Short description must be less than 300 characters",
        );
    }

    let start = form.date.as_deref().and_then(parse_form_date);
    if start.is_none() {
        errors.set(TrainingField::Date, "Start date is required");
    }

    let end = form.end_date.as_deref().and_then(parse_form_date);
    if !is_blank(form.end_date.as_deref()) && end.is_none() {
        errors.set(TrainingField::EndDate, "End date is invalid");
    } else if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        errors.set(
            TrainingField::EndDate,
            "End date cannot be earlier than start date",
        );
    }

    if form.available_slots < 0 {
        errors.set(
            TrainingField::AvailableSlots,
            "Available slots cannot be negative",
        );
    } else if form.available_slots > MAX_SEATS {
        errors.set(TrainingField::AvailableSlots, "Maximum 10,000 slots allowed");
    }

    if form.max_registrations < 1 {
        errors.set(
            TrainingField::MaxRegistrations,
            "Maximum registrations must be at least 1",
        );
    } else if form.max_registrations > MAX_SEATS {
        errors.set(
            TrainingField::MaxRegistrations,
            "Maximum 10,000 registrations allowed",
        );
    }

    if form.available_slots > form.max_registrations {
        errors.set(
            TrainingField::AvailableSlots,
            "Available slots cannot exceed max registrations",
        );
    }

    if form.registration_method == RegistrationMethod::External {
        let link = form.external_link.as_deref().map(str::trim).unwrap_or_default();
        if link.is_empty() {
            errors.set(
                TrainingField::ExternalLink,
                "External registration URL is required",
            );
        } else if !link.starts_with("https://") {
            errors.set(TrainingField::ExternalLink, "URL must start with https://");
        }
    }

    let errors = errors.0;
    let invalid_fields: Vec<TrainingField> = errors.iter().map(|e| e.field).collect();
    TrainingFormValidation {
        is_valid: errors.is_empty(),
        error_summary: errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect(),
        first_invalid_step: first_invalid_step(&invalid_fields),
        invalid_fields,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> TrainingForm {
        TrainingForm {
            name: "Project Management Fundamentals".to_string(),
            category_id: "category-1".to_string(),
            description: "Core workshop".to_string(),
            short_description: Some("Short description".to_string()),
            date: Some("2026-02-15T00:00:00.000Z".to_string()),
            end_date: Some("2026-02-15T00:00:00.000Z".to_string()),
            time_from: Some("09:00".to_string()),
            time_to: Some("17:00".to_string()),
            available_slots: 20,
            max_registrations: 25,
            registration_method: RegistrationMethod::Internal,
            external_link: Some(String::new()),
            location: Some("Training Room A".to_string()),
            speakers: Some("Speaker Name".to_string()),
            is_registration_open: true,
        }
    }

    #[test]
    fn complete_internal_form_is_valid() {
        let result = validate_training_form(&base_form());

        assert!(result.is_valid);
        assert!(result.error_summary.is_empty());
        assert_eq!(result.first_invalid_step, 0);
    }

    #[test]
    fn blocked_submit_reports_first_step_and_summary() {
        let mut form = base_form();
        form.name = String::new();
        form.category_id = String::new();
        form.available_slots = 30;
        form.max_registrations = 10;

        let result = validate_training_form(&form);

        assert!(!result.is_valid);
        assert_eq!(result.first_invalid_step, 0);
        assert!(
            result
                .error(TrainingField::Name)
                .is_some_and(|m| m.contains("required"))
        );
        assert!(
            result
                .error(TrainingField::CategoryId)
                .is_some_and(|m| m.contains("required"))
        );
        assert!(
            result
                .error(TrainingField::AvailableSlots)
                .is_some_and(|m| m.contains("cannot exceed"))
        );
        assert_eq!(
            result.invalid_fields,
            vec![
                TrainingField::Name,
                TrainingField::CategoryId,
                TrainingField::AvailableSlots,
            ]
        );
        assert_eq!(result.error_summary[0], "name: Training name is required");
    }

    #[test]
    fn external_registration_requires_https_link() {
        let mut form = base_form();
        form.registration_method = RegistrationMethod::External;
        form.external_link = Some("http://example.com".to_string());

        let result = validate_training_form(&form);

        assert!(!result.is_valid);
        assert_eq!(
            result.error(TrainingField::ExternalLink),
            Some("URL must start with https://")
        );
        assert_eq!(result.first_invalid_step, 2);
    }

    #[test]
    fn external_registration_without_link() {
        let mut form = base_form();
        form.registration_method = RegistrationMethod::External;
        form.external_link = Some("   ".to_string());

        let result = validate_training_form(&form);

        assert_eq!(
            result.error(TrainingField::ExternalLink),
            Some("External registration URL is required")
        );
    }

    #[test]
    fn first_error_per_field_wins() {
        let mut form = base_form();
        form.available_slots = -1;
        form.max_registrations = -5;

        let result = validate_training_form(&form);

        // -1 also exceeds max registrations; only the first message sticks.
        assert_eq!(
            result.error(TrainingField::AvailableSlots),
            Some("Available slots cannot be negative")
        );
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn end_date_before_start_is_rejected() {
        let mut form = base_form();
        form.date = Some("2026-02-15".to_string());
        form.end_date = Some("2026-02-14T23:59".to_string());

        let result = validate_training_form(&form);

        assert_eq!(
            result.error(TrainingField::EndDate),
            Some("End date cannot be earlier than start date")
        );
        assert_eq!(result.first_invalid_step, 1);
    }

    #[test]
    fn unparseable_dates() {
        let mut form = base_form();
        form.date = None;
        form.end_date = Some("next tuesday".to_string());

        let result = validate_training_form(&form);

        assert_eq!(
            result.error(TrainingField::Date),
            Some("Start date is required")
        );
        assert_eq!(
            result.error(TrainingField::EndDate),
            Some("End date is invalid")
        );
    }

    #[test]
    fn blank_end_date_is_optional() {
        let mut form = base_form();
        form.end_date = Some(String::new());

        assert!(validate_training_form(&form).is_valid);
    }

    #[test]
    fn length_limits_count_characters() {
        let mut form = base_form();
        form.name = "é".repeat(MAX_NAME_LEN);
        form.short_description = Some("x".repeat(MAX_SHORT_DESCRIPTION_LEN + 1));

        let result = validate_training_form(&form);

        assert!(result.error(TrainingField::Name).is_none());
        assert!(result.error(TrainingField::ShortDescription).is_some());
    }

    #[test]
    fn seat_upper_bounds() {
        let mut form = base_form();
        form.available_slots = MAX_SEATS + 1;
        form.max_registrations = MAX_SEATS + 1;

        let result = validate_training_form(&form);

        assert_eq!(
            result.error(TrainingField::AvailableSlots),
            Some("Maximum 10,000 slots allowed")
        );
        assert_eq!(
            result.error(TrainingField::MaxRegistrations),
            Some("Maximum 10,000 registrations allowed")
        );
    }

    #[test]
    fn first_invalid_step_defaults_to_zero() {
        assert_eq!(first_invalid_step(&[]), 0);
        assert_eq!(
            first_invalid_step(&[TrainingField::Speakers, TrainingField::EndDate]),
            1
        );
    }

    #[test]
    fn parses_editor_date_shapes() {
        assert!(parse_form_date("2026-02-15T09:30:00+04:00").is_some());
        assert!(parse_form_date("2026-02-15T09:30").is_some());
        assert!(parse_form_date("2026-02-15").is_some());
        assert!(parse_form_date("").is_none());
        assert!(parse_form_date("15/02/2026").is_none());
    }

    #[test]
    fn validation_serializes_camel_case() {
        let mut form = base_form();
        form.name = String::new();

        let json = serde_json::to_value(validate_training_form(&form)).expect("serialize");

        assert_eq!(json["isValid"], false);
        assert_eq!(json["invalidFields"][0], "name");
        assert_eq!(json["firstInvalidStep"], 0);
    }
}
