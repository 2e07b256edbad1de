use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Operation;

/// One wizard answer. The variant must match the session's current step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StepSelection {
    Operation {
        operation: Operation,
    },
    PropertyType {
        #[serde(rename = "type")]
        property_type: String,
    },
    Bedrooms {
        minimum: u32,
    },
    Bathrooms {
        minimum: u32,
    },
    Surface {
        #[serde(rename = "minM2")]
        min_m2: u32,
    },
    Features {
        #[serde(default)]
        features: Vec<String>,
        #[serde(default)]
        notes: Option<String>,
    },
    Budget {
        #[serde(rename = "maxPrice")]
        max_price: u64,
    },
}

/// Body for the advance call. The selection is optional so steps whose
/// defaults mean "no preference" can be skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceRequest {
    #[serde(default)]
    pub selection: Option<StepSelection>,
}

/// Contact payload for the final submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Direct lead form, bypassing the wizard.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRequestBody {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub operation: Operation,
    #[serde(rename = "type", default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(rename = "priceMax", default)]
    pub price_max: Option<u64>,
    #[serde(default)]
    pub zone: Option<String>,
    #[validate(length(min = 1))]
    pub description: String,
}

/// Partial update for a search request. Only provided fields are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequestBody {
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Admin property payload. The id comes from the path on updates and
/// from the store on creates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PropertyInput {
    #[validate(length(min = 1))]
    pub title: String,
    pub operation: Operation,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub property_type: String,
    pub price: u64,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub area: Option<u32>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "mainImage", default)]
    pub main_image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(rename = "energyCertificate", default)]
    pub energy_certificate: Option<String>,
    #[serde(rename = "isVIP", default)]
    pub is_vip: bool,
}

/// Partial settings update, merged into the stored blob.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSettingsBody {
    #[serde(rename = "magazineUrl", default)]
    #[validate(url)]
    pub magazine_url: Option<String>,
    #[serde(rename = "magazineActive", default)]
    pub magazine_active: Option<bool>,
    #[serde(rename = "quizFeatures", default)]
    pub quiz_features: Option<Vec<String>>,
}
