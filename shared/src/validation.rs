//! Boundary validation for the field parameter form
//!
//! Range rules live on `FarmerForm` as `validator` attributes; the checks
//! here cover what those rules cannot express (non-finite numbers) and turn
//! the result into a single field-level error.

use thiserror::Error;
use validator::Validate;

use crate::models::{FarmerForm, FarmerInput, LifecycleRequest, DEFAULT_LOCATION_NAME};

/// A rejected form field
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl TryFrom<FarmerForm> for FarmerInput {
    type Error = ValidationError;

    fn try_from(form: FarmerForm) -> Result<Self, Self::Error> {
        validate_finite(&form)?;
        form.validate().map_err(first_field_error)?;
        Ok(FarmerInput { form })
    }
}

/// Validate a form and wrap it as checked input
pub fn validate_farmer_form(form: FarmerForm) -> Result<FarmerInput, ValidationError> {
    FarmerInput::try_from(form)
}

/// NaN and infinities slip through range rules, so they are rejected first
fn validate_finite(form: &FarmerForm) -> Result<(), ValidationError> {
    let numbers = [
        ("latitude", form.latitude),
        ("longitude", form.longitude),
        ("acreage", form.acreage),
        ("rainfall", form.rainfall),
        ("fertilizer_usage", form.fertilizer_usage),
    ];

    for (field, value) in numbers {
        if !value.is_finite() {
            return Err(ValidationError::new(field, "Must be a finite number"));
        }
    }
    Ok(())
}

/// Check a calendar request before it is sent upstream
pub fn validate_lifecycle_request(request: &LifecycleRequest) -> Result<(), ValidationError> {
    let numbers = [
        ("latitude", request.latitude),
        ("longitude", request.longitude),
        ("acreage", request.acreage),
    ];
    for (field, value) in numbers {
        if !value.is_finite() {
            return Err(ValidationError::new(field, "Must be a finite number"));
        }
    }
    if request.acreage <= 0.0 {
        return Err(ValidationError::new("acreage", "Acreage must be greater than 0"));
    }
    request.validate().map_err(first_field_error)
}

/// Pick one error deterministically: the alphabetically first field
fn first_field_error(errors: validator::ValidationErrors) -> ValidationError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .next()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {}", field));
            ValidationError::new(field, message)
        })
        .unwrap_or_else(|| ValidationError::new("form", "Invalid field parameters"))
}

/// Trim the location name, substituting the default for blank input
pub fn normalize_location_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_LOCATION_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
