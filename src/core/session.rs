use thiserror::Error;

use crate::core::criteria::{build_search_request, feature_choices};
use crate::core::finder::{find_matches, MatchResult};
use crate::core::steps::Step;
use crate::models::domain::{ContactDetails, Property, SearchCriteria, SearchRequest};
use crate::models::requests::StepSelection;

#[derive(Error, Debug, PartialEq)]
pub enum WizardError {
    #[error("Step {step} expects a {expected} selection")]
    SelectionMismatch { step: u8, expected: &'static str },
    #[error("Step {step} requires a {missing} before advancing")]
    StepIncomplete { step: u8, missing: &'static str },
    #[error("Cannot go {direction} from step {step}")]
    InvalidTransition { step: u8, direction: &'static str },
    #[error("Invalid selection: {0}")]
    InvalidSelection(&'static str),
    #[error("Feature \"{0}\" is not among the offered choices")]
    UnknownFeature(String),
    #[error("Criteria are frozen once results are computed")]
    CriteriaFrozen,
    #[error("Submission is only available on the results step (current step {0})")]
    NotAtResults(u8),
    #[error("A submission for this session is already in flight")]
    SubmissionInFlight,
    #[error("This session already filed its search request")]
    AlreadySubmitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmissionState {
    Idle,
    InFlight,
    Completed,
}

/// One client's walk through the finder. Owns a catalog snapshot taken at
/// creation, the criteria being accumulated, and the one-shot match
/// outcome computed on entering the results step.
#[derive(Debug)]
pub struct WizardSession {
    catalog: Vec<Property>,
    vocabulary: Vec<String>,
    step: Step,
    criteria: SearchCriteria,
    outcome: Option<MatchResult>,
    submission: SubmissionState,
}

impl WizardSession {
    pub fn new(catalog: Vec<Property>, vocabulary: Vec<String>) -> Self {
        Self {
            catalog,
            vocabulary,
            step: Step::Operation,
            criteria: SearchCriteria::default(),
            outcome: None,
            submission: SubmissionState::Idle,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn outcome(&self) -> Option<&MatchResult> {
        self.outcome.as_ref()
    }

    /// Feature tags offered on the features step for the current branch.
    pub fn feature_choices(&self) -> Vec<String> {
        feature_choices(self.criteria.is_commercial(), &self.vocabulary)
    }

    pub fn first_match_id(&self) -> Option<&str> {
        self.outcome
            .as_ref()
            .and_then(|result| result.matches.first())
            .map(|property| property.id.as_str())
    }

    /// Apply one answer to the current step. The selection variant must
    /// match the step; nothing is accepted once results are computed.
    pub fn apply(&mut self, selection: StepSelection) -> Result<(), WizardError> {
        if self.step == Step::Results {
            return Err(WizardError::CriteriaFrozen);
        }

        match (self.step, selection) {
            (Step::Operation, StepSelection::Operation { operation }) => {
                self.criteria.operation = Some(operation);
            }
            (Step::PropertyType, StepSelection::PropertyType { property_type }) => {
                if property_type.trim().is_empty() {
                    return Err(WizardError::InvalidSelection(
                        "property type must not be empty",
                    ));
                }
                self.criteria.property_type = Some(property_type);
                // Room minimums are never collected or applied for
                // commercial units, even if set before re-selecting.
                if self.criteria.is_commercial() {
                    self.criteria.min_bedrooms = 0;
                    self.criteria.min_bathrooms = 0;
                }
            }
            (Step::Bedrooms, StepSelection::Bedrooms { minimum }) => {
                self.criteria.min_bedrooms = minimum;
            }
            (Step::Bathrooms, StepSelection::Bathrooms { minimum }) => {
                self.criteria.min_bathrooms = minimum;
            }
            (Step::Surface, StepSelection::Surface { min_m2 }) => {
                self.criteria.min_surface = min_m2;
            }
            (Step::Features, StepSelection::Features { features, notes }) => {
                let choices = self.feature_choices();
                let mut selected: Vec<String> = Vec::with_capacity(features.len());
                for feature in features {
                    if !choices.contains(&feature) {
                        return Err(WizardError::UnknownFeature(feature));
                    }
                    if !selected.contains(&feature) {
                        selected.push(feature);
                    }
                }
                self.criteria.features = selected;
                self.criteria.notes = notes.filter(|n| !n.trim().is_empty());
            }
            (Step::Budget, StepSelection::Budget { max_price }) => {
                if max_price == 0 {
                    return Err(WizardError::InvalidSelection(
                        "maximum price must be positive",
                    ));
                }
                self.criteria.max_price = Some(max_price);
            }
            (step, _) => {
                return Err(WizardError::SelectionMismatch {
                    step: step.number(),
                    expected: step.label(),
                });
            }
        }

        Ok(())
    }

    /// Apply an optional selection, check the step's gating, and move
    /// forward. Entering the results step computes the match set, once.
    pub fn advance(&mut self, selection: Option<StepSelection>) -> Result<(), WizardError> {
        if let Some(selection) = selection {
            self.apply(selection)?;
        }

        self.check_gating()?;

        let next = self
            .step
            .next(self.criteria.is_commercial())
            .ok_or(WizardError::InvalidTransition {
                step: self.step.number(),
                direction: "forward",
            })?;

        if next == Step::Results {
            self.outcome = Some(find_matches(&self.catalog, &self.criteria));
        }
        self.step = next;

        Ok(())
    }

    /// Move back one step, branching on the commercial flag. Step 1 and
    /// the results step have no backward edge.
    pub fn retreat(&mut self) -> Result<(), WizardError> {
        let prev = self
            .step
            .prev(self.criteria.is_commercial())
            .ok_or(WizardError::InvalidTransition {
                step: self.step.number(),
                direction: "back",
            })?;

        self.step = prev;
        Ok(())
    }

    /// Mark a submission in flight and hand back the record to persist.
    /// The caller reports the outcome via `complete_submission` or
    /// `abort_submission`.
    pub fn begin_submission(
        &mut self,
        contact: &ContactDetails,
    ) -> Result<SearchRequest, WizardError> {
        if self.step != Step::Results {
            return Err(WizardError::NotAtResults(self.step.number()));
        }
        match self.submission {
            SubmissionState::InFlight => return Err(WizardError::SubmissionInFlight),
            SubmissionState::Completed => return Err(WizardError::AlreadySubmitted),
            SubmissionState::Idle => {}
        }

        let request = build_search_request(&self.criteria, contact).ok_or(
            WizardError::StepIncomplete {
                step: Step::Operation.number(),
                missing: "operation",
            },
        )?;

        self.submission = SubmissionState::InFlight;
        Ok(request)
    }

    pub fn complete_submission(&mut self) {
        self.submission = SubmissionState::Completed;
    }

    /// Clear the in-flight mark after a failed create so the client can
    /// retry with criteria and contact intact.
    pub fn abort_submission(&mut self) {
        if self.submission == SubmissionState::InFlight {
            self.submission = SubmissionState::Idle;
        }
    }

    fn check_gating(&self) -> Result<(), WizardError> {
        match self.step {
            Step::Operation if self.criteria.operation.is_none() => {
                Err(WizardError::StepIncomplete {
                    step: self.step.number(),
                    missing: "operation",
                })
            }
            Step::PropertyType if self.criteria.property_type.is_none() => {
                Err(WizardError::StepIncomplete {
                    step: self.step.number(),
                    missing: "property type",
                })
            }
            Step::Budget if self.criteria.max_price.is_none() => {
                Err(WizardError::StepIncomplete {
                    step: self.step.number(),
                    missing: "maximum price",
                })
            }
            _ => Ok(()),
        }
    }
}
