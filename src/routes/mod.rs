// Route exports
pub mod auth;
pub mod encargos;
pub mod finder;
pub mod properties;
pub mod settings;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::models::responses::{ErrorResponse, HealthResponse};
use crate::services::{FirestoreClient, FirestoreError, SessionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub firestore: Arc<FirestoreClient>,
    pub sessions: Arc<SessionStore>,
    pub admin_token: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(finder::configure)
            .configure(properties::configure)
            .configure(encargos::configure)
            .configure(settings::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.firestore.health_check().await.is_ok();

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Map a store failure onto the wire: unknown documents are the client's
/// 404, everything else surfaces as an upstream failure.
pub(crate) fn store_error_response(context: &str, error: &FirestoreError) -> HttpResponse {
    match error {
        FirestoreError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: error.to_string(),
            status_code: 404,
        }),
        _ => {
            tracing::error!("{}: {}", context, error);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: context.to_string(),
                message: error.to_string(),
                status_code: 502,
            })
        }
    }
}

pub(crate) fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
