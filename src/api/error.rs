//! HTTP mapping of [`Error`] and the extractors that report rejections with it.
//!
//! Every failure leaves the server as a status code and a JSON
//! `{ "error": "<message>" }` body. Server-side failures are logged before
//! they are turned into a 500.

use crate::{errors::Error, models::ErrorBody};
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

impl Error {
    /// Status code this error is reported with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField { .. }
            | Self::MalformedRequest { .. }
            | Self::DuplicateIngredient { .. }
            | Self::NoIngredientSelected => StatusCode::BAD_REQUEST,
            Self::RecipeNotFound { .. }
            | Self::IngredientNotFound { .. }
            | Self::LinkNotFound { .. }
            | Self::SourceNotFound { .. }
            | Self::RecipeIngredientsNotFound { .. }
            | Self::SourcesNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Api { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Config { .. } | Self::Database(_) | Self::Io(_) | Self::Http(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::MalformedRequest {
            message: rejection.body_text(),
        }
    }
}

/// JSON body extractor whose rejections become a 400 with an `{error}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections (e.g. a non-numeric id) become a 400 with
/// an `{error}` body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::MissingField { field: "nom" }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::DuplicateIngredient { ingredient_id: 1 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::SourcesNotFound { ingredient_id: 1 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Database(sea_orm::DbErr::Custom("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Api {
                status: 418,
                message: String::new()
            }
            .status_code(),
            StatusCode::IM_A_TEAPOT
        );
    }
}
