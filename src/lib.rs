//! Finca Finder - property finder and lead capture service for Fincas Costa Brava
//!
//! This library implements the guided search wizard used on the agency website.
//! Visitors step through their criteria, get matched against the live property
//! catalog and can file a search request for the agency to follow up on.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{find_matches, MatchResult, Step, WizardError, WizardSession, TOTAL_STEPS};
pub use crate::models::{Operation, Property, SearchCriteria, SearchRequest, SiteSettings};
pub use crate::services::{FirestoreClient, SessionStore};
