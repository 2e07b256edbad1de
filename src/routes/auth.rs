use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use std::future::{ready, Ready};
use thiserror::Error;

use super::AppState;
use crate::models::responses::ErrorResponse;

/// Extractor guarding the admin routes. Accepts only
/// `Authorization: Bearer <token>` matching the configured admin token;
/// an empty configured token rejects everything.
pub struct AdminAuth;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Invalid bearer token")]
    InvalidToken,
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized().json(ErrorResponse {
            error: "Unauthorized".to_string(),
            message: self.to_string(),
            status_code: 401,
        })
    }
}

impl FromRequest for AdminAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let configured = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.admin_token.as_str())
            .unwrap_or("");

        let provided = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let result = match provided {
            None => Err(AuthError::MissingToken),
            Some(token) if !configured.is_empty() && token == configured => Ok(AdminAuth),
            Some(_) => Err(AuthError::InvalidToken),
        };

        ready(result)
    }
}
