use crate::core::filters::matches_criteria;
use crate::models::domain::{Property, SearchCriteria};

/// Result of one match computation over a catalog snapshot.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub matches: Vec<Property>,
    pub total_candidates: usize,
    pub stats: MatchStats,
}

/// Aggregates over the match set. The area mean only counts matches that
/// define an area; it is `None` when no match does. Means are raw here,
/// display rounding happens in the response layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchStats {
    pub count: usize,
    pub average_price: Option<f64>,
    pub average_area: Option<f64>,
}

/// Filter the catalog against the criteria, preserving catalog order.
///
/// No ranking and no re-sorting: the caller sees the surviving candidates
/// exactly as the catalog listed them. Recomputing over the same inputs
/// yields the same result.
pub fn find_matches(catalog: &[Property], criteria: &SearchCriteria) -> MatchResult {
    let total_candidates = catalog.len();

    let matches: Vec<Property> = catalog
        .iter()
        .filter(|property| matches_criteria(property, criteria))
        .cloned()
        .collect();

    let stats = compute_stats(&matches);

    MatchResult {
        matches,
        total_candidates,
        stats,
    }
}

fn compute_stats(matches: &[Property]) -> MatchStats {
    let count = matches.len();

    let average_price = if count > 0 {
        let sum: u64 = matches.iter().map(|p| p.price).sum();
        Some(sum as f64 / count as f64)
    } else {
        None
    };

    let areas: Vec<u32> = matches.iter().filter_map(|p| p.area).collect();
    let average_area = if !areas.is_empty() {
        let sum: u64 = areas.iter().map(|&a| a as u64).sum();
        Some(sum as f64 / areas.len() as f64)
    } else {
        None
    };

    MatchStats {
        count,
        average_price,
        average_area,
    }
}
