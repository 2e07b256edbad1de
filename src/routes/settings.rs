use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use super::auth::AdminAuth;
use super::{store_error_response, validation_error_response, AppState};
use crate::models::requests::UpdateSettingsBody;

/// Configure the settings routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/settings", web::get().to(get_settings))
        .route("/settings", web::put().to(update_settings));
}

/// GET /api/v1/settings
async fn get_settings(state: web::Data<AppState>) -> impl Responder {
    match state.firestore.get_site_settings().await {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(e) => store_error_response("Failed to fetch settings", &e),
    }
}

/// PUT /api/v1/settings (admin)
///
/// Merge semantics: only the provided fields change.
async fn update_settings(
    _auth: AdminAuth,
    state: web::Data<AppState>,
    body: web::Json<UpdateSettingsBody>,
) -> impl Responder {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state.firestore.update_site_settings(&body).await {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(e) => store_error_response("Failed to update settings", &e),
    }
}
