//! Reference option lists shown in the field parameter form

use serde::{Deserialize, Serialize};

use super::crop::{CropType, IrrigationType, SoilType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropOption {
    pub id: CropType,
    pub name: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilOption {
    pub id: SoilType,
    pub name: String,
    pub suitability: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationOption {
    pub id: IrrigationType,
    pub name: String,
    pub water_use: String,
}

/// Enumerated crop, soil and irrigation choices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceOptions {
    pub crops: Vec<CropOption>,
    pub soils: Vec<SoilOption>,
    pub irrigation: Vec<IrrigationOption>,
}

impl Default for ReferenceOptions {
    /// Option set bundled with the client, used when the backend is unavailable
    fn default() -> Self {
        let crop = |id: CropType, duration: &str| CropOption {
            id,
            name: format!("{}", id),
            duration: duration.to_string(),
        };
        let soil = |id: SoilType, suitability: &str| SoilOption {
            id,
            name: format!("{}", id),
            suitability: suitability.to_string(),
        };
        let irrigation = |id: IrrigationType, water_use: &str| IrrigationOption {
            id,
            name: format!("{}", id),
            water_use: water_use.to_string(),
        };

        Self {
            crops: vec![
                crop(CropType::Wheat, "120-150 days"),
                crop(CropType::Rice, "110-135 days"),
                crop(CropType::Maize, "90-110 days"),
                crop(CropType::Cotton, "150-180 days"),
                crop(CropType::Soybean, "90-110 days"),
                crop(CropType::Sugarcane, "270-365 days"),
            ],
            soils: vec![
                soil(SoilType::Alluvial, "High fertility"),
                soil(SoilType::Black, "Moisture retentive"),
                soil(SoilType::Red, "Well-drained"),
                soil(SoilType::Laterite, "Requires inputs"),
                soil(SoilType::Loamy, "Versatile"),
                soil(SoilType::Sandy, "Low retention"),
            ],
            irrigation: vec![
                irrigation(IrrigationType::Rainfed, "Seasonal rainfall"),
                irrigation(IrrigationType::Drip, "High efficiency"),
                irrigation(IrrigationType::Sprinkler, "Moderate efficiency"),
                irrigation(IrrigationType::Canal, "Surface irrigation"),
            ],
        }
    }
}
