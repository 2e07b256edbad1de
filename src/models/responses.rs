use serde::{Deserialize, Serialize};

use crate::core::finder::MatchStats;
use crate::models::domain::{Property, SearchCriteria};

/// Number of matched properties echoed back in the results payload.
pub const RESULT_PREVIEW_LIMIT: usize = 4;

/// Wizard session state as seen by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardStateResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub step: u8,
    #[serde(rename = "totalSteps")]
    pub total_steps: u8,
    pub criteria: SearchCriteria,
    #[serde(rename = "featureChoices")]
    pub feature_choices: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MatchOutcome>,
}

/// Result summary shown on the final step. Averages are display-rounded:
/// price to the nearest thousand (in thousands), area to the nearest m².
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub count: usize,
    #[serde(rename = "averagePriceK", default, skip_serializing_if = "Option::is_none")]
    pub average_price_k: Option<u64>,
    #[serde(rename = "averageAreaM2", default, skip_serializing_if = "Option::is_none")]
    pub average_area_m2: Option<u64>,
    pub preview: Vec<Property>,
}

impl MatchOutcome {
    pub fn from_stats(stats: &MatchStats, matches: &[Property]) -> Self {
        Self {
            count: stats.count,
            average_price_k: stats
                .average_price
                .map(|mean| (mean / 1000.0).round() as u64),
            average_area_m2: stats.average_area.map(|mean| mean.round() as u64),
            preview: matches.iter().take(RESULT_PREVIEW_LIMIT).cloned().collect(),
        }
    }
}

/// Response for the wizard submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub matched: usize,
    #[serde(rename = "navigateTo")]
    pub navigate_to: String,
}

/// Response for document creation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
