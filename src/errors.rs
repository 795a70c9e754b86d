use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

use crate::generate::GenerateError;

#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request fields, detected before touching the store.
    Validation(String),
    /// Unknown presentation id.
    NotFound,
    /// No generation credential available for any supported backend.
    Configuration(String),
    /// Generation backend unreachable, timed out, or returned unusable content.
    Upstream(String),
    /// Internal store fault (poisoned lock).
    Store(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "Validation error: {e}"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::Configuration(e) => write!(f, "Configuration error: {e}"),
            AppError::Upstream(e) => write!(f, "Upstream error: {e}"),
            AppError::Store(e) => write!(f, "Store error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => {
                HttpResponse::BadRequest().json(json!({ "error": msg }))
            }
            AppError::NotFound => {
                HttpResponse::NotFound().json(json!({ "error": "Presentation not found" }))
            }
            AppError::Configuration(_) | AppError::Upstream(_) => {
                log::error!("{self}");
                HttpResponse::InternalServerError().json(json!({ "error": "Generation failed" }))
            }
            AppError::Store(_) => {
                log::error!("{self}");
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "Internal server error" }))
            }
        }
    }
}

impl From<GenerateError> for AppError {
    fn from(e: GenerateError) -> Self {
        match e {
            GenerateError::Configuration(msg) => AppError::Configuration(msg),
            GenerateError::Upstream(msg) => AppError::Upstream(msg),
        }
    }
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(e: actix_multipart::MultipartError) -> Self {
        AppError::Validation(format!("Invalid multipart payload: {e}"))
    }
}
