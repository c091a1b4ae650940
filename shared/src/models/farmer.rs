//! Farmer-supplied field parameters
//!
//! `FarmerForm` is the raw form record as it arrives from the browser.
//! `FarmerInput` only exists once a form has passed boundary validation
//! (see `TryFrom<FarmerForm>` in `validation`), so every estimator and
//! network call works on checked values.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use validator::Validate;

use super::crop::{CropType, IrrigationType, SoilType};

/// Location name sent upstream when the farmer leaves the field blank
pub const DEFAULT_LOCATION_NAME: &str = "Field";

/// Field parameter form state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FarmerForm {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,

    #[validate(length(max = 120, message = "Location name must be at most 120 characters"))]
    pub location_name: String,

    pub crop_type: CropType,
    pub soil_type: SoilType,
    pub irrigation_type: IrrigationType,

    /// Cultivated area in acres
    #[validate(range(min = 0.1, message = "Acreage must be at least 0.1"))]
    pub acreage: f64,

    /// Seasonal rainfall in mm
    #[validate(range(min = 0.0, message = "Rainfall cannot be negative"))]
    pub rainfall: f64,

    /// Fertilizer application in kg/ha
    #[validate(range(min = 0.0, message = "Fertilizer usage cannot be negative"))]
    pub fertilizer_usage: f64,

    pub sowing_date: NaiveDate,
}

impl Default for FarmerForm {
    fn default() -> Self {
        Self {
            latitude: 20.5937,
            longitude: 78.9629,
            location_name: "My Farm".to_string(),
            crop_type: CropType::Wheat,
            soil_type: SoilType::Alluvial,
            irrigation_type: IrrigationType::Canal,
            acreage: 1.5,
            rainfall: 80.0,
            fertilizer_usage: 45.0,
            sowing_date: Utc::now().date_naive(),
        }
    }
}

/// A validated `FarmerForm`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct FarmerInput {
    pub(crate) form: FarmerForm,
}

impl FarmerInput {
    pub fn into_form(self) -> FarmerForm {
        self.form
    }
}

impl Deref for FarmerInput {
    type Target = FarmerForm;

    fn deref(&self) -> &Self::Target {
        &self.form
    }
}

/// Farmer parameters in the snake_case shape expected by the prediction
/// and advice endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmerPayload {
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub crop_type: CropType,
    pub soil_type: SoilType,
    pub irrigation_type: IrrigationType,
    pub acreage: f64,
    pub rainfall: f64,
    pub fertilizer_usage: f64,
    pub sowing_date: NaiveDate,
}

impl From<&FarmerInput> for FarmerPayload {
    fn from(input: &FarmerInput) -> Self {
        Self {
            latitude: input.latitude,
            longitude: input.longitude,
            location_name: crate::validation::normalize_location_name(&input.location_name),
            crop_type: input.crop_type,
            soil_type: input.soil_type,
            irrigation_type: input.irrigation_type,
            acreage: input.acreage,
            rainfall: input.rainfall,
            fertilizer_usage: input.fertilizer_usage,
            sowing_date: input.sowing_date,
        }
    }
}
