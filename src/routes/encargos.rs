use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use super::auth::AdminAuth;
use super::{store_error_response, validation_error_response, AppState};
use crate::models::domain::SearchRequest;
use crate::models::requests::{CreateRequestBody, UpdateRequestBody};
use crate::models::responses::CreatedResponse;

/// Configure the search request routes. Creation and the published
/// listing are public; management requires the admin token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/encargos", web::post().to(create_request))
        .route("/encargos", web::get().to(list_requests))
        .route("/encargos/published", web::get().to(list_published))
        .route("/encargos/{id}", web::patch().to(update_request))
        .route("/encargos/{id}", web::delete().to(delete_request));
}

/// POST /api/v1/encargos
///
/// Direct lead form. Requests always start unpublished regardless of the
/// payload.
async fn create_request(
    state: web::Data<AppState>,
    body: web::Json<CreateRequestBody>,
) -> impl Responder {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    let body = body.into_inner();
    let request = SearchRequest {
        id: String::new(),
        name: body.name,
        email: body.email,
        phone: body.phone,
        operation: body.operation,
        property_type: body.property_type,
        bedrooms: body.bedrooms,
        bathrooms: body.bathrooms,
        price_max: body.price_max,
        zone: body.zone,
        description: body.description,
        published: false,
        created_at: None,
    };

    match state.firestore.create_search_request(&request).await {
        Ok(id) => HttpResponse::Created().json(CreatedResponse { id }),
        Err(e) => store_error_response("Failed to file search request", &e),
    }
}

/// GET /api/v1/encargos (admin), newest first
async fn list_requests(_auth: AdminAuth, state: web::Data<AppState>) -> impl Responder {
    match state.firestore.list_search_requests().await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => store_error_response("Failed to list search requests", &e),
    }
}

/// GET /api/v1/encargos/published
async fn list_published(state: web::Data<AppState>) -> impl Responder {
    match state.firestore.list_published_requests().await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => store_error_response("Failed to list published requests", &e),
    }
}

/// PATCH /api/v1/encargos/{id} (admin)
///
/// Partial update; the publish toggle lives here.
async fn update_request(
    _auth: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateRequestBody>,
) -> impl Responder {
    let id = path.into_inner();

    match state.firestore.update_search_request(&id, &body).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error_response("Failed to update search request", &e),
    }
}

/// DELETE /api/v1/encargos/{id} (admin)
async fn delete_request(
    _auth: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    match state.firestore.delete_search_request(&id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error_response("Failed to delete search request", &e),
    }
}
