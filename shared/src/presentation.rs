//! View-model for the prediction summary and advice panels
//!
//! Turns a prediction and advice set into display-ready strings so every
//! renderer formats yields, confidence and fallbacks the same way.

use serde::Serialize;

use crate::estimator::{round_half_away, round_to_hundredths};
use crate::models::{AdviceCategory, AdviceResponse, YieldPrediction};

pub const EMPTY_HEADLINE: &str = "Plan your season with data-driven insights.";

const NOT_AVAILABLE: &str = "N/A";

/// "4.03 t/ha"
pub fn format_yield(value: f64) -> String {
    format!("{:.2} t/ha", round_to_hundredths(value))
}

/// "68%"
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.0}%", round_half_away(confidence * 100.0, 0))
}

pub fn headline(prediction: Option<&YieldPrediction>) -> String {
    match prediction {
        None => EMPTY_HEADLINE.to_string(),
        Some(p) => format!(
            "Estimated yield: {} · Confidence {}",
            format_yield(p.predicted_yield),
            format_confidence(p.confidence)
        ),
    }
}

fn or_not_available(text: &str) -> String {
    if text.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        text.to_string()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCard {
    pub predicted_yield: String,
    pub confidence: String,
    pub baseline_yield: String,
    pub weather_summary: String,
    pub rainfall_line: String,
    pub temperature_line: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryPoint {
    pub season: String,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdviceCard {
    pub title: String,
    pub summary: String,
    pub category: AdviceCategory,
    pub actions: Vec<String>,
}

/// Everything the workspace page shows after a submission
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceView {
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryCard>,
    pub history: Vec<HistoryPoint>,
    pub risk_alerts: Vec<String>,
    pub practices: Vec<String>,
    pub advice_cards: Vec<AdviceCard>,
}

pub fn summary_card(prediction: &YieldPrediction) -> SummaryCard {
    let weather = &prediction.weather_outlook;
    SummaryCard {
        predicted_yield: format_yield(prediction.predicted_yield),
        confidence: format!("Confidence: {}", format_confidence(prediction.confidence)),
        baseline_yield: format_yield(prediction.baseline_yield),
        weather_summary: or_not_available(&weather.summary),
        rainfall_line: format!("Rainfall: {}", or_not_available(&weather.rainfall_outlook)),
        temperature_line: format!(
            "Temperature: {}",
            or_not_available(&weather.temperature_trend)
        ),
    }
}

pub fn build_view(
    prediction: Option<&YieldPrediction>,
    advice: Option<&AdviceResponse>,
    advisory: Option<&str>,
) -> WorkspaceView {
    WorkspaceView {
        headline: headline(prediction),
        advisory: advisory.map(str::to_string),
        summary: prediction.map(summary_card),
        history: prediction
            .map(|p| {
                p.historical_yields
                    .iter()
                    .map(|h| HistoryPoint {
                        season: h.season.clone(),
                        label: format_yield(h.value),
                        value: h.value,
                    })
                    .collect()
            })
            .unwrap_or_default(),
        risk_alerts: prediction.map(|p| p.risk_alerts.clone()).unwrap_or_default(),
        practices: prediction
            .map(|p| p.recommended_practices.clone())
            .unwrap_or_default(),
        advice_cards: advice
            .map(|a| {
                a.knowledge_base
                    .iter()
                    .map(|entry| AdviceCard {
                        title: entry.title.clone(),
                        summary: entry.summary.clone(),
                        category: entry.category,
                        actions: entry.actions.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}
