use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use super::{validation_error_response, AppState};
use crate::core::session::{WizardError, WizardSession};
use crate::core::steps::TOTAL_STEPS;
use crate::models::domain::ContactDetails;
use crate::models::requests::{AdvanceRequest, SubmitRequest};
use crate::models::responses::{ErrorResponse, MatchOutcome, SubmitResponse, WizardStateResponse};

/// Configure the wizard session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/finder/sessions", web::post().to(create_session))
        .route("/finder/sessions/{id}", web::get().to(get_session))
        .route("/finder/sessions/{id}/advance", web::post().to(advance_session))
        .route("/finder/sessions/{id}/retreat", web::post().to(retreat_session))
        .route("/finder/sessions/{id}/submit", web::post().to(submit_session));
}

/// Create a wizard session
///
/// POST /api/v1/finder/sessions
///
/// Fetches the catalog snapshot and the feature vocabulary concurrently;
/// if either fetch fails no session is created and the client is told to
/// retry.
async fn create_session(state: web::Data<AppState>) -> impl Responder {
    let (catalog, settings) = match tokio::try_join!(
        state.firestore.list_properties(),
        state.firestore.get_site_settings(),
    ) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load wizard data: {}", e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to load wizard data".to_string(),
                message: format!("{}. Retry the request.", e),
                status_code: 502,
            });
        }
    };

    tracing::info!(
        "Starting wizard session over {} properties, {} vocabulary tags",
        catalog.len(),
        settings.quiz_features.len()
    );

    let session = WizardSession::new(catalog, settings.quiz_features);
    let step = session.step().number();
    let criteria = session.criteria().clone();
    let feature_choices = session.feature_choices();
    let session_id = state.sessions.insert(session).await;

    tracing::debug!("{} wizard sessions active", state.sessions.active_count());

    HttpResponse::Created().json(WizardStateResponse {
        session_id,
        step,
        total_steps: TOTAL_STEPS,
        criteria,
        feature_choices,
        outcome: None,
    })
}

/// Current state of a session
///
/// GET /api/v1/finder/sessions/{id}
async fn get_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    let entry = match state.sessions.get(&session_id).await {
        Some(entry) => entry,
        None => return session_not_found(&session_id),
    };

    let session = entry.lock().await;
    HttpResponse::Ok().json(state_response(&session_id, &session))
}

/// Apply an optional selection and move forward
///
/// POST /api/v1/finder/sessions/{id}/advance
///
/// Request body:
/// ```json
/// {
///   "selection": { "kind": "operation", "operation": "venta" }
/// }
/// ```
async fn advance_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<AdvanceRequest>,
) -> impl Responder {
    let session_id = path.into_inner();

    let entry = match state.sessions.get(&session_id).await {
        Some(entry) => entry,
        None => return session_not_found(&session_id),
    };

    let mut session = entry.lock().await;
    match session.advance(body.into_inner().selection) {
        Ok(()) => HttpResponse::Ok().json(state_response(&session_id, &session)),
        Err(e) => wizard_error_response(e),
    }
}

/// Move back one step
///
/// POST /api/v1/finder/sessions/{id}/retreat
async fn retreat_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    let entry = match state.sessions.get(&session_id).await {
        Some(entry) => entry,
        None => return session_not_found(&session_id),
    };

    let mut session = entry.lock().await;
    match session.retreat() {
        Ok(()) => HttpResponse::Ok().json(state_response(&session_id, &session)),
        Err(e) => wizard_error_response(e),
    }
}

/// File the search request from the results step
///
/// POST /api/v1/finder/sessions/{id}/submit
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "email": "string",
///   "phone": "string"
/// }
/// ```
async fn submit_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SubmitRequest>,
) -> impl Responder {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    let session_id = path.into_inner();

    let entry = match state.sessions.get(&session_id).await {
        Some(entry) => entry,
        None => return session_not_found(&session_id),
    };

    let contact = ContactDetails {
        name: body.name.clone(),
        email: body.email.clone(),
        phone: body.phone.clone(),
    };

    // Mark the submission in flight and snapshot the outcome under the
    // lock; the store call happens without it
    let (request, matched, navigate_to) = {
        let mut session = entry.lock().await;
        let request = match session.begin_submission(&contact) {
            Ok(request) => request,
            Err(e) => return wizard_error_response(e),
        };
        let matched = session.outcome().map(|o| o.matches.len()).unwrap_or(0);
        let navigate_to = session
            .first_match_id()
            .map(|id| format!("/propiedad/{}", id))
            .unwrap_or_else(|| "/".to_string());
        (request, matched, navigate_to)
    };

    match state.firestore.create_search_request(&request).await {
        Ok(request_id) => {
            entry.lock().await.complete_submission();
            state.sessions.remove(&session_id).await;

            tracing::info!(
                "Session {} filed request {} ({} matches)",
                session_id,
                request_id,
                matched
            );

            HttpResponse::Created().json(SubmitResponse {
                request_id,
                matched,
                navigate_to,
            })
        }
        Err(e) => {
            entry.lock().await.abort_submission();
            tracing::error!("Failed to file search request: {}", e);

            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to file search request".to_string(),
                message: format!("{}. Retry the submission.", e),
                status_code: 502,
            })
        }
    }
}

fn state_response(session_id: &str, session: &WizardSession) -> WizardStateResponse {
    WizardStateResponse {
        session_id: session_id.to_string(),
        step: session.step().number(),
        total_steps: TOTAL_STEPS,
        criteria: session.criteria().clone(),
        feature_choices: session.feature_choices(),
        outcome: session
            .outcome()
            .map(|result| MatchOutcome::from_stats(&result.stats, &result.matches)),
    }
}

fn session_not_found(session_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Session not found".to_string(),
        message: format!("No active wizard session {} (it may have expired)", session_id),
        status_code: 404,
    })
}

fn wizard_error_response(error: WizardError) -> HttpResponse {
    let status_code = match error {
        WizardError::SelectionMismatch { .. }
        | WizardError::StepIncomplete { .. }
        | WizardError::InvalidSelection(_)
        | WizardError::UnknownFeature(_) => 400,
        WizardError::InvalidTransition { .. }
        | WizardError::CriteriaFrozen
        | WizardError::NotAtResults(_)
        | WizardError::SubmissionInFlight
        | WizardError::AlreadySubmitted => 409,
    };

    let response = ErrorResponse {
        error: "Wizard error".to_string(),
        message: error.to_string(),
        status_code,
    };

    match status_code {
        400 => HttpResponse::BadRequest().json(response),
        _ => HttpResponse::Conflict().json(response),
    }
}
