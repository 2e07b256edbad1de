use crate::models::domain::{Property, SearchCriteria};

/// Check if a property satisfies every criteria clause.
///
/// All clauses are conjunctive and a dimension left at its default never
/// excludes anything. Missing numeric fields on the candidate do not
/// exclude it either; only a present value can fail a comparison.
#[inline]
pub fn matches_criteria(property: &Property, criteria: &SearchCriteria) -> bool {
    matches_operation(property, criteria)
        && matches_type(property, criteria)
        && matches_rooms(property, criteria)
        && matches_surface(property, criteria)
        && matches_price(property, criteria)
        && matches_features(property, criteria)
}

/// Operation must equal the selected one. Criteria without an operation
/// never reach the finder (step gating), but an unset operation matches
/// everything so partial criteria stay usable.
#[inline]
pub fn matches_operation(property: &Property, criteria: &SearchCriteria) -> bool {
    match criteria.operation {
        Some(operation) => property.operation == operation,
        None => true,
    }
}

/// Exact type match when a type was selected.
#[inline]
pub fn matches_type(property: &Property, criteria: &SearchCriteria) -> bool {
    match criteria.property_type.as_deref() {
        Some(wanted) => property.property_type == wanted,
        None => true,
    }
}

/// Bedroom and bathroom minimums. Skipped entirely for commercial units
/// and for zero minimums; a candidate that omits the count passes.
#[inline]
pub fn matches_rooms(property: &Property, criteria: &SearchCriteria) -> bool {
    if criteria.is_commercial() {
        return true;
    }

    if criteria.min_bedrooms > 0 {
        if let Some(bedrooms) = property.bedrooms {
            if bedrooms < criteria.min_bedrooms {
                return false;
            }
        }
    }

    if criteria.min_bathrooms > 0 {
        if let Some(bathrooms) = property.bathrooms {
            if bathrooms < criteria.min_bathrooms {
                return false;
            }
        }
    }

    true
}

/// Surface minimum. Only a present, too-small area excludes.
#[inline]
pub fn matches_surface(property: &Property, criteria: &SearchCriteria) -> bool {
    if criteria.min_surface == 0 {
        return true;
    }

    match property.area {
        Some(area) => area >= criteria.min_surface,
        None => true,
    }
}

/// Price ceiling when a maximum is set.
#[inline]
pub fn matches_price(property: &Property, criteria: &SearchCriteria) -> bool {
    match criteria.max_price {
        Some(max) => property.price <= max,
        None => true,
    }
}

/// Every required feature tag must be present on the candidate.
#[inline]
pub fn matches_features(property: &Property, criteria: &SearchCriteria) -> bool {
    criteria
        .features
        .iter()
        .all(|feature| property.features.contains(feature))
}
