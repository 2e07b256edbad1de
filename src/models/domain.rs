use serde::{Deserialize, Serialize};
use std::fmt;

/// Type label marking a commercial unit. Bedroom/bathroom criteria are
/// never collected or applied for this type.
pub const COMMERCIAL_TYPE: &str = "Local";

/// Transaction the client is looking for. Wire values match the stored
/// documents ("venta", "alquiler", "opcion_compra").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "venta")]
    Sale,
    #[serde(rename = "alquiler")]
    Rental,
    #[serde(rename = "opcion_compra")]
    RentToOwn,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Sale => "venta",
            Operation::Rental => "alquiler",
            Operation::RentToOwn => "opcion_compra",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listed property. Numeric fields are optional because stored documents
/// omit what was never filled in; an absent field must not exclude a
/// candidate on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub operation: Operation,
    #[serde(rename = "type")]
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
    #[serde(default)]
    pub location: Option<PropertyLocation>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyLocation {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: Option<String>,
}

/// Accumulated wizard criteria. Zero / empty means "no preference" for
/// the optional dimensions; operation and max price are required by the
/// step gating before matches are ever computed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub operation: Option<Operation>,
    #[serde(rename = "type", default)]
    pub property_type: Option<String>,
    #[serde(rename = "bedrooms", default)]
    pub min_bedrooms: u32,
    #[serde(rename = "bathrooms", default)]
    pub min_bathrooms: u32,
    #[serde(rename = "surfaceMin", default)]
    pub min_surface: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "priceMax", default)]
    pub max_price: Option<u64>,
}

impl SearchCriteria {
    /// Whether the selected type is the commercial-unit variant.
    pub fn is_commercial(&self) -> bool {
        self.property_type.as_deref() == Some(COMMERCIAL_TYPE)
    }
}

/// Contact details collected on the final step. Travels with the
/// submission call, never stored inside the criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Persisted search request ("encargo"). Always created unpublished;
/// publishing is an admin-side update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub id: String,
    pub name: String,
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
    pub description: String,
    #[serde(default)]
    pub published: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Mutable site settings blob. A missing document reads as defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(rename = "magazineUrl", default)]
    pub magazine_url: Option<String>,
    #[serde(rename = "magazineActive", default)]
    pub magazine_active: bool,
    #[serde(rename = "quizFeatures", default)]
    pub quiz_features: Vec<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            magazine_url: None,
            magazine_active: false,
            quiz_features: Vec::new(),
            updated_at: None,
        }
    }
}
