//! Crop, soil and irrigation enumerations

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::validation::ValidationError;

/// Crops supported by the yield workspace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Wheat,
    Rice,
    Maize,
    Cotton,
    Soybean,
    Sugarcane,
}

impl CropType {
    pub const ALL: [CropType; 6] = [
        CropType::Wheat,
        CropType::Rice,
        CropType::Maize,
        CropType::Cotton,
        CropType::Soybean,
        CropType::Sugarcane,
    ];

    /// Wire identifier, as used by the prediction service
    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Wheat => "wheat",
            CropType::Rice => "rice",
            CropType::Maize => "maize",
            CropType::Cotton => "cotton",
            CropType::Soybean => "soybean",
            CropType::Sugarcane => "sugarcane",
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropType::Wheat => write!(f, "Wheat"),
            CropType::Rice => write!(f, "Rice"),
            CropType::Maize => write!(f, "Maize"),
            CropType::Cotton => write!(f, "Cotton"),
            CropType::Soybean => write!(f, "Soybean"),
            CropType::Sugarcane => write!(f, "Sugarcane"),
        }
    }
}

impl FromStr for CropType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CropType::ALL
            .into_iter()
            .find(|crop| crop.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| ValidationError::new("crop_type", format!("Unknown crop type: {}", s)))
    }
}

/// Soil classes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Alluvial,
    Black,
    Red,
    Laterite,
    Loamy,
    Sandy,
}

impl SoilType {
    pub const ALL: [SoilType; 6] = [
        SoilType::Alluvial,
        SoilType::Black,
        SoilType::Red,
        SoilType::Laterite,
        SoilType::Loamy,
        SoilType::Sandy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Alluvial => "alluvial",
            SoilType::Black => "black",
            SoilType::Red => "red",
            SoilType::Laterite => "laterite",
            SoilType::Loamy => "loamy",
            SoilType::Sandy => "sandy",
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilType::Alluvial => write!(f, "Alluvial"),
            SoilType::Black => write!(f, "Black"),
            SoilType::Red => write!(f, "Red"),
            SoilType::Laterite => write!(f, "Laterite"),
            SoilType::Loamy => write!(f, "Loamy"),
            SoilType::Sandy => write!(f, "Sandy"),
        }
    }
}

impl FromStr for SoilType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoilType::ALL
            .into_iter()
            .find(|soil| soil.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| ValidationError::new("soil_type", format!("Unknown soil type: {}", s)))
    }
}

/// Irrigation methods
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationType {
    Rainfed,
    Drip,
    Sprinkler,
    Canal,
}

impl IrrigationType {
    pub const ALL: [IrrigationType; 4] = [
        IrrigationType::Rainfed,
        IrrigationType::Drip,
        IrrigationType::Sprinkler,
        IrrigationType::Canal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationType::Rainfed => "rainfed",
            IrrigationType::Drip => "drip",
            IrrigationType::Sprinkler => "sprinkler",
            IrrigationType::Canal => "canal",
        }
    }
}

impl std::fmt::Display for IrrigationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrrigationType::Rainfed => write!(f, "Rainfed"),
            IrrigationType::Drip => write!(f, "Drip"),
            IrrigationType::Sprinkler => write!(f, "Sprinkler"),
            IrrigationType::Canal => write!(f, "Canal"),
        }
    }
}

impl FromStr for IrrigationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IrrigationType::ALL
            .into_iter()
            .find(|irrigation| irrigation.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| {
                ValidationError::new("irrigation_type", format!("Unknown irrigation type: {}", s))
            })
    }
}
