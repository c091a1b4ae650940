//! Common types used across the workspace

use serde::{Deserialize, Serialize};

use crate::models::FarmerForm;

/// Banner shown when the live prediction service could not be used
pub const OFFLINE_PREDICTION_ADVISORY: &str =
    "Live prediction service is unreachable. Displaying an offline estimate instead.";

/// Banner shown when only the live advice service failed
pub const OFFLINE_ADVICE_ADVISORY: &str =
    "Live agronomy advice is unavailable. Showing default recommendations.";

/// Location picked on the map, merged into the form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
}

impl FarmerForm {
    /// Replace the location fields, keeping every other parameter
    pub fn with_location(self, location: FieldLocation) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            location_name: location.location_name,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CropType;

    #[test]
    fn test_with_location_keeps_other_fields() {
        let form = FarmerForm {
            crop_type: CropType::Cotton,
            ..FarmerForm::default()
        };
        let moved = form.clone().with_location(FieldLocation {
            latitude: 11.0,
            longitude: 77.0,
            location_name: "Coimbatore".to_string(),
        });

        assert_eq!(moved.latitude, 11.0);
        assert_eq!(moved.location_name, "Coimbatore");
        assert_eq!(moved.crop_type, CropType::Cotton);
        assert_eq!(moved.acreage, form.acreage);
    }
}
