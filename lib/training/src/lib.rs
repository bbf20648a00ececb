//! Training records for training-hub.
//!
//! Currently this is the editor form ([`TrainingForm`]) and the checks run on
//! it before a training is saved ([`validate_training_form`]).

pub mod form;
pub mod validation;

pub use form::{FORM_STEP_COUNT, RegistrationMethod, TrainingField, TrainingForm};
pub use validation::{
    FieldError, TrainingFormValidation, first_invalid_step, parse_form_date,
    validate_training_form,
};
