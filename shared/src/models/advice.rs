//! Agronomy advice models

use serde::{Deserialize, Serialize};

use super::farmer::FarmerPayload;

/// Knowledge-base categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdviceCategory {
    Soil,
    Water,
    Nutrition,
    Pest,
}

impl std::fmt::Display for AdviceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdviceCategory::Soil => write!(f, "soil"),
            AdviceCategory::Water => write!(f, "water"),
            AdviceCategory::Nutrition => write!(f, "nutrition"),
            AdviceCategory::Pest => write!(f, "pest"),
        }
    }
}

/// A titled, categorized bundle of recommended actions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeBaseEntry {
    pub title: String,
    pub summary: String,
    pub actions: Vec<String>,
    pub category: AdviceCategory,
}

/// Advice as held by the workspace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResponse {
    pub knowledge_base: Vec<KnowledgeBaseEntry>,
}

/// Request body of `POST /api/advice`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdviceRequest {
    pub farmer: FarmerPayload,
    pub predicted_yield: f64,
}

/// Response body of `POST /api/advice`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdviceApiResponse {
    pub knowledge_base: Vec<KnowledgeBaseEntry>,
}

impl From<AdviceApiResponse> for AdviceResponse {
    fn from(payload: AdviceApiResponse) -> Self {
        Self {
            knowledge_base: payload.knowledge_base,
        }
    }
}
