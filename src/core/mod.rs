// Core wizard exports
pub mod criteria;
pub mod filters;
pub mod finder;
pub mod session;
pub mod steps;

pub use criteria::{build_search_request, feature_choices, synthesize_description};
pub use filters::matches_criteria;
pub use finder::{find_matches, MatchResult, MatchStats};
pub use session::{WizardError, WizardSession};
pub use steps::{Step, TOTAL_STEPS};
