// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ContactDetails, Operation, Property, PropertyLocation, SearchCriteria, SearchRequest, SiteSettings, COMMERCIAL_TYPE};
pub use requests::{AdvanceRequest, CreateRequestBody, PropertyInput, StepSelection, SubmitRequest, UpdateRequestBody, UpdateSettingsBody};
pub use responses::{CreatedResponse, ErrorResponse, HealthResponse, MatchOutcome, SubmitResponse, WizardStateResponse};
