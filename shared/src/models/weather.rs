//! Weather outlook attached to a yield prediction

use serde::{Deserialize, Serialize};

/// Near-term weather signals, free text as produced by the prediction service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherOutlook {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub rainfall_outlook: String,
    #[serde(default)]
    pub temperature_trend: String,
}
