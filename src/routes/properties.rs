use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use super::auth::AdminAuth;
use super::{store_error_response, validation_error_response, AppState};
use crate::models::requests::PropertyInput;
use crate::models::responses::{CreatedResponse, ErrorResponse};

/// Configure the catalog routes. The listing and lookups are public;
/// mutations require the admin token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/properties", web::get().to(list_properties))
        .route("/properties", web::post().to(create_property))
        .route("/properties/highlighted", web::get().to(list_highlighted))
        .route("/properties/{id}", web::get().to(get_property))
        .route("/properties/{id}", web::put().to(update_property))
        .route("/properties/{id}", web::delete().to(delete_property));
}

/// GET /api/v1/properties
async fn list_properties(state: web::Data<AppState>) -> impl Responder {
    match state.firestore.list_properties().await {
        Ok(properties) => HttpResponse::Ok().json(properties),
        Err(e) => store_error_response("Failed to list properties", &e),
    }
}

/// GET /api/v1/properties/highlighted
async fn list_highlighted(state: web::Data<AppState>) -> impl Responder {
    match state.firestore.list_highlighted_properties().await {
        Ok(properties) => HttpResponse::Ok().json(properties),
        Err(e) => store_error_response("Failed to list highlighted properties", &e),
    }
}

/// GET /api/v1/properties/{id}
async fn get_property(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.firestore.get_property(&id).await {
        Ok(Some(property)) => HttpResponse::Ok().json(property),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: format!("No property {}", id),
            status_code: 404,
        }),
        Err(e) => store_error_response("Failed to fetch property", &e),
    }
}

/// POST /api/v1/properties (admin)
async fn create_property(
    _auth: AdminAuth,
    state: web::Data<AppState>,
    body: web::Json<PropertyInput>,
) -> impl Responder {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state.firestore.create_property(&body).await {
        Ok(id) => HttpResponse::Created().json(CreatedResponse { id }),
        Err(e) => store_error_response("Failed to create property", &e),
    }
}

/// PUT /api/v1/properties/{id} (admin)
async fn update_property(
    _auth: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PropertyInput>,
) -> impl Responder {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    let id = path.into_inner();
    match state.firestore.update_property(&id, &body).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error_response("Failed to update property", &e),
    }
}

/// DELETE /api/v1/properties/{id} (admin)
async fn delete_property(
    _auth: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    match state.firestore.delete_property(&id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error_response("Failed to delete property", &e),
    }
}
