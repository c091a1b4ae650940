//! Crop lifecycle calendar
//!
//! Request and response records for the stage-by-stage growing calendar.
//! Both travel in the backend's snake_case shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::crop::CropType;

/// Calendar request for one planting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct LifecycleRequest {
    pub crop_type: CropType,
    pub planting_date: NaiveDate,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,

    #[validate(length(min = 2, max = 120, message = "Location name must be 2 to 120 characters"))]
    pub location_name: String,

    /// Must be strictly positive; checked in `validate_lifecycle_request`
    pub acreage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropStage {
    pub stage_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: u32,
    pub description: String,
    #[serde(default)]
    pub care_activities: Vec<String>,
    pub irrigation_frequency: String,
    #[serde(default)]
    pub fertilizer_recommendations: Vec<String>,
    #[serde(default)]
    pub weather_considerations: String,
    #[serde(default)]
    pub risk_factors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherAlert {
    pub date: NaiveDate,
    pub alert_type: String,
    pub severity: String,
    pub description: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl WeatherAlert {
    pub fn severity_level(&self) -> AlertSeverity {
        match self.severity.to_lowercase().as_str() {
            "high" => AlertSeverity::High,
            "medium" => AlertSeverity::Medium,
            _ => AlertSeverity::Low,
        }
    }
}

/// Display bucket for a weather alert; unknown labels count as low
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

/// Irrigation guidance for one remaining stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IrrigationWindow {
    pub stage: String,
    /// e.g. "Nov 01 - Nov 20"
    pub period: String,
    pub frequency: String,
    /// Weather-adjusted advice; older backends omit it
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub is_critical: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FertilizerApplication {
    pub date: NaiveDate,
    pub stage: String,
    pub fertilizer: String,
    /// e.g. "Day 21"
    pub timing: String,
}

/// Generated calendar for a planting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropLifecycle {
    pub crop_type: String,
    pub crop_name: String,
    pub planting_date: NaiveDate,
    pub harvest_date: NaiveDate,
    pub total_duration_days: u32,
    pub current_stage: String,
    pub current_day: u32,
    pub location: String,
    pub stages: Vec<CropStage>,
    #[serde(default)]
    pub weather_alerts: Vec<WeatherAlert>,
    #[serde(default)]
    pub irrigation_schedule: Vec<IrrigationWindow>,
    #[serde(default)]
    pub fertilizer_schedule: Vec<FertilizerApplication>,
    #[serde(default)]
    pub general_care_tips: Vec<String>,
    #[serde(default)]
    pub harvest_readiness_indicators: Vec<String>,
}

impl CropLifecycle {
    /// Share of the season elapsed, 0-100
    pub fn progress_percent(&self) -> u32 {
        if self.total_duration_days == 0 {
            return 0;
        }
        let percent = (f64::from(self.current_day) / f64::from(self.total_duration_days) * 100.0).round();
        (percent as u32).min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lifecycle_json() -> serde_json::Value {
        json!({
            "crop_type": "wheat",
            "crop_name": "Wheat",
            "planting_date": "2024-11-01",
            "harvest_date": "2025-03-21",
            "total_duration_days": 140,
            "current_stage": "Tillering",
            "current_day": 35,
            "location": "Ludhiana",
            "stages": [{
                "stage_name": "Germination",
                "start_date": "2024-11-01",
                "end_date": "2024-11-10",
                "duration_days": 10,
                "description": "Seed emergence",
                "care_activities": ["Light irrigation"],
                "irrigation_frequency": "Critical - every 3 days",
                "fertilizer_recommendations": ["Basal DAP"],
                "weather_considerations": "Avoid waterlogging",
                "risk_factors": ["Poor emergence"]
            }],
            "weather_alerts": [{
                "date": "2024-12-05",
                "alert_type": "Heat Stress",
                "severity": "HIGH",
                "description": "High temperature",
                "recommendations": ["Increase irrigation frequency"]
            }],
            "irrigation_schedule": [{
                "stage": "Germination",
                "period": "Nov 01 - Nov 10",
                "frequency": "Critical - every 3 days",
                "is_critical": true
            }],
            "fertilizer_schedule": [{
                "date": "2024-11-01",
                "stage": "Germination",
                "fertilizer": "Basal DAP",
                "timing": "Day 0"
            }],
            "general_care_tips": ["Scout twice a week"],
            "harvest_readiness_indicators": ["Golden grain"]
        })
    }

    #[test]
    fn test_parse_backend_calendar() {
        let lifecycle: CropLifecycle = serde_json::from_value(lifecycle_json()).unwrap();
        assert_eq!(lifecycle.stages[0].duration_days, 10);
        assert!(lifecycle.irrigation_schedule[0].is_critical);
        assert!(lifecycle.irrigation_schedule[0].recommendation.is_none());
        assert_eq!(lifecycle.fertilizer_schedule[0].timing, "Day 0");
        assert_eq!(lifecycle.weather_alerts[0].severity_level(), AlertSeverity::High);
    }

    #[test]
    fn test_progress_is_capped() {
        let mut lifecycle: CropLifecycle = serde_json::from_value(lifecycle_json()).unwrap();
        assert_eq!(lifecycle.progress_percent(), 25);

        lifecycle.current_day = 400;
        assert_eq!(lifecycle.progress_percent(), 100);

        lifecycle.total_duration_days = 0;
        assert_eq!(lifecycle.progress_percent(), 0);
    }

    #[test]
    fn test_unknown_severity_is_low() {
        let alert = WeatherAlert {
            date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            alert_type: "Strong Winds".to_string(),
            severity: "moderate".to_string(),
            description: String::new(),
            recommendations: vec![],
        };
        assert_eq!(alert.severity_level(), AlertSeverity::Low);
    }
}
