use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};

use super::views;
use crate::domain::order::ValidationError;
use crate::store::PersistenceError;

/// Failures a request can end in. Both render a failure page; neither
/// takes the process down.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Validation(e) => e.to_string(),
            AppError::Persistence(_) => {
                "Orders are unavailable right now. Please try again shortly.".to_string()
            }
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(views::failure(&message))
    }
}
