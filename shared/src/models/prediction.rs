//! Yield prediction models

use serde::{Deserialize, Serialize};

use super::weather::WeatherOutlook;

/// Unit attached to every yield figure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum YieldUnit {
    #[default]
    #[serde(rename = "tons_per_hectare")]
    TonsPerHectare,
}

/// Where a prediction or advice set came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    /// Returned by the live prediction or advice service
    Remote,
    /// Computed locally because the live service failed
    Offline,
}

impl PredictionSource {
    pub fn is_offline(&self) -> bool {
        matches!(self, PredictionSource::Offline)
    }
}

/// One season of the historical yield series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalYield {
    pub season: String,
    #[serde(rename = "yield")]
    pub value: f64,
}

/// Yield forecast as held by the workspace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YieldPrediction {
    /// Tons per hectare
    pub predicted_yield: f64,
    pub unit: YieldUnit,
    /// In [0, 1]
    pub confidence: f64,
    pub baseline_yield: f64,
    pub historical_yields: Vec<HistoricalYield>,
    pub risk_alerts: Vec<String>,
    pub recommended_practices: Vec<String>,
    pub weather_outlook: WeatherOutlook,
}

/// History point as returned by the prediction service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiHistoryPoint {
    pub season: String,
    pub yield_t_per_ha: f64,
}

/// Response body of `POST /api/yield/predict`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionApiResponse {
    pub predicted_yield: f64,
    #[serde(default)]
    pub unit: YieldUnit,
    pub confidence: f64,
    pub baseline_yield: f64,
    #[serde(default)]
    pub historical_yields: Vec<ApiHistoryPoint>,
    #[serde(default)]
    pub risk_alerts: Vec<String>,
    #[serde(default)]
    pub recommended_practices: Vec<String>,
    #[serde(default)]
    pub weather_outlook: WeatherOutlook,
}

impl From<PredictionApiResponse> for YieldPrediction {
    fn from(payload: PredictionApiResponse) -> Self {
        Self {
            predicted_yield: payload.predicted_yield,
            unit: payload.unit,
            confidence: payload.confidence,
            baseline_yield: payload.baseline_yield,
            historical_yields: payload
                .historical_yields
                .into_iter()
                .map(|point| HistoricalYield {
                    season: point.season,
                    value: point.yield_t_per_ha,
                })
                .collect(),
            risk_alerts: payload.risk_alerts,
            recommended_practices: payload.recommended_practices,
            weather_outlook: payload.weather_outlook,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKEND_RESPONSE: &str = r#"{
        "predicted_yield": 3.87,
        "unit": "tons_per_hectare",
        "confidence": 0.77,
        "baseline_yield": 3.34,
        "historical_yields": [
            {"season": "Kharif 22", "yield_t_per_ha": 3.17},
            {"season": "Current", "yield_t_per_ha": 3.87}
        ],
        "risk_alerts": ["Low rainfall detected; plan supplemental irrigation."],
        "recommended_practices": ["Incorporate organic matter to improve soil structure."],
        "weather_outlook": {
            "summary": "Stable",
            "rainfallOutlook": "+12% vs normal",
            "temperatureTrend": "+0.8°C anomaly"
        }
    }"#;

    #[test]
    fn test_maps_backend_response() {
        let payload: PredictionApiResponse = serde_json::from_str(BACKEND_RESPONSE).unwrap();
        let prediction = YieldPrediction::from(payload);

        assert_eq!(prediction.predicted_yield, 3.87);
        assert_eq!(prediction.historical_yields.len(), 2);
        assert_eq!(prediction.historical_yields[1].season, "Current");
        assert_eq!(prediction.historical_yields[1].value, 3.87);
        assert_eq!(prediction.weather_outlook.rainfall_outlook, "+12% vs normal");
    }

    #[test]
    fn test_prediction_serializes_camel_case() {
        let payload: PredictionApiResponse = serde_json::from_str(BACKEND_RESPONSE).unwrap();
        let json = serde_json::to_value(YieldPrediction::from(payload)).unwrap();

        assert_eq!(json["predictedYield"], 3.87);
        assert_eq!(json["unit"], "tons_per_hectare");
        assert_eq!(json["historicalYields"][0]["yield"], 3.17);
        assert_eq!(json["weatherOutlook"]["temperatureTrend"], "+0.8°C anomaly");
    }

    #[test]
    fn test_missing_optional_sections_default() {
        let payload: PredictionApiResponse = serde_json::from_str(
            r#"{"predicted_yield": 2.1, "confidence": 0.6, "baseline_yield": 2.0}"#,
        )
        .unwrap();
        let prediction = YieldPrediction::from(payload);
        assert!(prediction.risk_alerts.is_empty());
        assert_eq!(prediction.unit, YieldUnit::TonsPerHectare);
        assert_eq!(prediction.weather_outlook, WeatherOutlook::default());
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let result = serde_json::from_str::<PredictionApiResponse>(r#"{"confidence": 0.6}"#);
        assert!(result.is_err());
    }
}
