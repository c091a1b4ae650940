//! Offline yield estimator and canned advice
//!
//! Used when the live prediction service cannot be reached. Both functions
//! are pure: the same input always yields the same output and nothing
//! touches the network.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    AdviceCategory, AdviceResponse, CropType, FarmerInput, HistoricalYield, IrrigationType,
    KnowledgeBaseEntry, SoilType, WeatherOutlook, YieldPrediction, YieldUnit,
};

pub const CONFIDENCE_MIN: f64 = 0.45;
pub const CONFIDENCE_MAX: f64 = 0.85;

pub const RAINFALL_FACTOR_MIN: f64 = 0.6;
pub const RAINFALL_FACTOR_MAX: f64 = 1.25;

pub const FERTILIZER_FACTOR_MIN: f64 = 0.7;
pub const FERTILIZER_FACTOR_MAX: f64 = 1.2;

/// Rainfall (mm) below which a moisture-stress alert is raised
pub const MOISTURE_STRESS_RAINFALL_MM: f64 = 60.0;

/// Fertilizer (kg/ha) below which a nutrient-deficit alert is raised
pub const NUTRIENT_DEFICIT_FERTILIZER_KG: f64 = 30.0;

pub const MOISTURE_STRESS_ALERT: &str =
    "Moisture stress risk: rainfall has trailed the seasonal norm. Plan supplemental irrigation.";

pub const NUTRIENT_DEFICIT_ALERT: &str =
    "Nutrient deficit risk: fertilizer application is below the recommended range.";

/// Synthesized history: (season, multiple of the crop baseline)
const HISTORY_OFFSETS: [(&str, f64); 3] = [
    ("Kharif 2022", 0.92),
    ("Rabi 2023", 0.97),
    ("Kharif 2024", 1.02),
];

const RECOMMENDED_PRACTICES: [&str; 3] = [
    "Calibrate fertilizer application to crop stage and soil tests.",
    "Walk the field after each irrigation cycle to spot stress early.",
    "Log scouting observations in the SmartYield notebook to refine forecasts.",
];

/// Typical yield in tons/hectare
pub fn crop_baseline(crop: CropType) -> f64 {
    match crop {
        CropType::Wheat => 3.2,
        CropType::Rice => 4.5,
        CropType::Maize => 4.1,
        CropType::Cotton => 2.8,
        CropType::Soybean => 2.5,
        CropType::Sugarcane => 75.0,
    }
}

pub fn irrigation_factor(irrigation: IrrigationType) -> f64 {
    match irrigation {
        IrrigationType::Rainfed => 0.9,
        IrrigationType::Drip => 1.1,
        IrrigationType::Sprinkler => 1.05,
        IrrigationType::Canal => 1.0,
    }
}

pub fn soil_factor(soil: SoilType) -> f64 {
    match soil {
        SoilType::Alluvial => 1.1,
        SoilType::Black => 1.05,
        SoilType::Red => 0.95,
        SoilType::Laterite => 0.9,
        SoilType::Loamy => 1.0,
        SoilType::Sandy => 0.85,
    }
}

pub fn rainfall_factor(rainfall_mm: f64) -> f64 {
    (0.75 + rainfall_mm / 300.0).clamp(RAINFALL_FACTOR_MIN, RAINFALL_FACTOR_MAX)
}

pub fn fertilizer_factor(fertilizer_kg_per_ha: f64) -> f64 {
    (0.8 + fertilizer_kg_per_ha / 200.0).clamp(FERTILIZER_FACTOR_MIN, FERTILIZER_FACTOR_MAX)
}

/// Round to two decimal places, half away from zero on the exact binary value
pub fn round_to_hundredths(value: f64) -> f64 {
    round_half_away(value, 2)
}

/// Round to `places` decimals with ties away from zero
pub fn round_half_away(value: f64, places: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

fn offline_confidence(rainfall_factor: f64, input: &FarmerInput) -> f64 {
    let mut confidence: f64 = 0.55;
    confidence += if rainfall_factor > 1.0 { 0.08 } else { -0.05 };
    if input.irrigation_type == IrrigationType::Drip {
        confidence += 0.05;
    }
    if input.soil_type == SoilType::Sandy {
        confidence -= 0.08;
    }
    confidence.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX)
}

fn offline_weather(input: &FarmerInput) -> WeatherOutlook {
    let rainfall_status = if input.rainfall < 70.0 {
        "Below seasonal average rainfall"
    } else if input.rainfall > 120.0 {
        "Above seasonal rainfall"
    } else {
        "Seasonal rainfall tracking normal range"
    };

    let rainfall_outlook = if input.rainfall < 70.0 {
        "Carry forward moisture conservation practices; forecast suggests intermittent showers."
    } else {
        "Rainfall outlook stable with periodic events maintaining soil moisture."
    };

    let temperature_trend = match input.crop_type {
        CropType::Wheat => "Cool nights expected through heading stage",
        _ => "Daytime temperatures trending slightly above seasonal average",
    };

    WeatherOutlook {
        summary: format!(
            "{}. Keep monitoring forecasts during the crop's sensitive stages.",
            rainfall_status
        ),
        rainfall_outlook: rainfall_outlook.to_string(),
        temperature_trend: temperature_trend.to_string(),
    }
}

/// Estimate yield from lookup tables and clamped linear factors
pub fn generate_offline_prediction(input: &FarmerInput) -> YieldPrediction {
    let baseline = crop_baseline(input.crop_type);
    let rainfall = rainfall_factor(input.rainfall);
    let fertilizer = fertilizer_factor(input.fertilizer_usage);

    let predicted = baseline
        * irrigation_factor(input.irrigation_type)
        * soil_factor(input.soil_type)
        * rainfall
        * fertilizer;

    let mut risk_alerts = Vec::new();
    if input.rainfall < MOISTURE_STRESS_RAINFALL_MM {
        risk_alerts.push(MOISTURE_STRESS_ALERT.to_string());
    }
    if input.fertilizer_usage < NUTRIENT_DEFICIT_FERTILIZER_KG {
        risk_alerts.push(NUTRIENT_DEFICIT_ALERT.to_string());
    }

    YieldPrediction {
        predicted_yield: round_to_hundredths(predicted),
        unit: YieldUnit::TonsPerHectare,
        confidence: offline_confidence(rainfall, input),
        baseline_yield: baseline,
        historical_yields: HISTORY_OFFSETS
            .iter()
            .map(|(season, offset)| HistoricalYield {
                season: season.to_string(),
                value: round_to_hundredths(baseline * offset),
            })
            .collect(),
        risk_alerts,
        recommended_practices: RECOMMENDED_PRACTICES.iter().map(|p| p.to_string()).collect(),
        weather_outlook: offline_weather(input),
    }
}

/// Canned knowledge-base entries keyed off irrigation type and predicted yield
pub fn generate_offline_advice(prediction: &YieldPrediction, input: &FarmerInput) -> AdviceResponse {
    let irrigation_message = match input.irrigation_type {
        IrrigationType::Rainfed => "Plan supplemental irrigation if rainfall gaps persist.",
        _ => "Inspect emitters and distribution uniformity weekly.",
    };

    let entry = |title: &str, summary: String, actions: [&str; 3], category| KnowledgeBaseEntry {
        title: title.to_string(),
        summary,
        actions: actions.iter().map(|a| a.to_string()).collect(),
        category,
    };

    AdviceResponse {
        knowledge_base: vec![
            entry(
                "Water management next steps",
                format!(
                    "Optimize {} scheduling to safeguard yield potential.",
                    input.irrigation_type.as_str()
                ),
                [
                    irrigation_message,
                    "Log irrigation events in SmartYield to refine recommendations.",
                    "Ensure soil moisture stays within optimal range using tensiometers or feel method.",
                ],
                AdviceCategory::Water,
            ),
            entry(
                "Soil nutrition follow-up",
                "Align fertilizer plan with current growth stage and soil test data.".to_string(),
                [
                    "Schedule a quick soil health check if one has not been done this season.",
                    "Balance nitrogen with micronutrient sprays during vegetative phase.",
                    "Record application dates to correlate with yield outcomes.",
                ],
                AdviceCategory::Nutrition,
            ),
            entry(
                "Crop scouting checklist",
                format!(
                    "Stay ahead of stresses to preserve the projected {:.2} t/ha outcome.",
                    round_to_hundredths(prediction.predicted_yield)
                ),
                [
                    "Scout twice weekly focusing on pest hot spots and disease-prone zones.",
                    "Capture photos in the mobile app to compare with remote sensing cues.",
                    "Escalate anomalies to agronomy advisors for swift intervention.",
                ],
                AdviceCategory::Soil,
            ),
        ],
    }
}
