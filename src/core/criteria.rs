use chrono::Utc;

use crate::models::domain::{ContactDetails, SearchCriteria, SearchRequest};

/// Feature tags always offered on the residential path.
pub const RESIDENTIAL_FEATURES: [&str; 9] = [
    "Jardín",
    "Piscina",
    "Vistas",
    "Chimenea",
    "Garaje",
    "Reformado",
    "Terraza",
    "Trastero",
    "Jacuzzi",
];

/// Feature tags always offered for commercial units.
pub const COMMERCIAL_FEATURES: [&str; 6] = [
    "Salida de humos",
    "Escaparate",
    "A pie de calle",
    "Almacén",
    "Reformado",
    "Diáfano",
];

/// Build the feature list offered on the features step: the static list
/// for the current branch followed by the dynamic vocabulary from the
/// settings blob, first occurrence wins, order preserved.
pub fn feature_choices(commercial: bool, vocabulary: &[String]) -> Vec<String> {
    let statics: &[&str] = if commercial {
        &COMMERCIAL_FEATURES
    } else {
        &RESIDENTIAL_FEATURES
    };

    let mut choices: Vec<String> = Vec::with_capacity(statics.len() + vocabulary.len());
    for tag in statics.iter().map(|s| s.to_string()).chain(vocabulary.iter().cloned()) {
        if !choices.contains(&tag) {
            choices.push(tag);
        }
    }
    choices
}

/// Synthesize the free-text description stored on a search request.
///
/// Fixed line order: operation, type, bedroom and bathroom minimums
/// (both lines dropped for commercial units), surface minimum, feature
/// tags, notes, maximum price. Empty feature lists and blank notes get
/// an explicit placeholder so the admin side never sees a dangling label.
pub fn synthesize_description(criteria: &SearchCriteria) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(8);

    let operation = criteria
        .operation
        .map(|op| op.to_string())
        .unwrap_or_else(|| "Indiferente".to_string());
    lines.push(format!("Operación: {}", operation));

    let property_type = criteria
        .property_type
        .as_deref()
        .unwrap_or("Indiferente");
    lines.push(format!("Tipo: {}", property_type));

    if !criteria.is_commercial() {
        lines.push(format!("Habitaciones: {}+", criteria.min_bedrooms));
        lines.push(format!("Baños: {}+", criteria.min_bathrooms));
    }

    lines.push(format!("Superficie mín: {} m²", criteria.min_surface));

    let features = if criteria.features.is_empty() {
        "Ninguna".to_string()
    } else {
        criteria.features.join(", ")
    };
    lines.push(format!("Imprescindibles: {}", features));

    let notes = match criteria.notes.as_deref() {
        Some(notes) if !notes.trim().is_empty() => notes,
        _ => "Ninguna",
    };
    lines.push(format!("Notas: {}", notes));

    let max_price = criteria
        .max_price
        .map(|price| price.to_string())
        .unwrap_or_else(|| "Indiferente".to_string());
    lines.push(format!("Presupuesto máx: {} €", max_price));

    lines.join("\n")
}

/// Combine contact fields and criteria into the record handed to the
/// request sink. Always unpublished. Returns `None` when no operation
/// was ever selected; step gating keeps that off the wizard path.
pub fn build_search_request(
    criteria: &SearchCriteria,
    contact: &ContactDetails,
) -> Option<SearchRequest> {
    let operation = criteria.operation?;

    Some(SearchRequest {
        id: String::new(),
        name: contact.name.clone(),
        email: contact.email.clone(),
        phone: contact.phone.clone(),
        operation,
        property_type: criteria.property_type.clone(),
        bedrooms: criteria.min_bedrooms,
        bathrooms: criteria.min_bathrooms,
        price_max: criteria.max_price,
        zone: None,
        description: synthesize_description(criteria),
        published: false,
        created_at: Some(Utc::now()),
    })
}
