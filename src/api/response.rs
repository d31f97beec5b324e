//! Error → HTTP response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::Error;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
    pub error_type: String,
}

/// Status code for each error kind.
///
/// Bad input is the client's fault (400); anything that failed after the
/// input was accepted is reported as unprocessable (422).
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Validation(_) | Error::Extraction(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Processing(_) | Error::Service(_) | Error::Config(_) | Error::Internal(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = status_for(&self);

        // Full detail stays in the logs; the body only carries the public message
        match &self {
            Error::Validation(_) | Error::Extraction(_) | Error::NotFound(_) => {
                warn!(status = status.as_u16(), error = %self, "Request rejected");
            }
            _ => {
                error!(status = status.as_u16(), error = %self, "Request failed");
            }
        }

        let body = ErrorBody {
            detail: self.public_detail(),
            error_type: self.error_type().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
