//! HTTP adapter mapping for service errors and results.
//!
//! Purpose: keep the service layer HTTP-agnostic while allowing Actix
//! handlers to turn validation and service failures into consistent JSON
//! responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{ServiceError, ServiceErrorCode, ServiceResult};

const REDACTED_MESSAGE: &str = "Internal server error";

/// JSON body returned for a failed [`ServiceResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureBody {
    /// Primary error code.
    pub code: ServiceErrorCode,
    /// Primary error message.
    pub message: String,
    /// Every message carried by the result.
    pub errors: Vec<String>,
}

/// HTTP status for a service error code.
pub fn status_for(code: ServiceErrorCode) -> StatusCode {
    match code {
        ServiceErrorCode::ValidationFailed | ServiceErrorCode::InvalidFormat => {
            StatusCode::BAD_REQUEST
        }
        ServiceErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ServiceErrorCode::InsufficientPermissions => StatusCode::FORBIDDEN,
        ServiceErrorCode::NotFound => StatusCode::NOT_FOUND,
        ServiceErrorCode::AlreadyExists
        | ServiceErrorCode::ConcurrencyConflict
        | ServiceErrorCode::DependencyExists => StatusCode::CONFLICT,
        ServiceErrorCode::DependencyFailure => StatusCode::FAILED_DEPENDENCY,
        ServiceErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(err: &ServiceError) -> ServiceError {
    if err.code() == ServiceErrorCode::InternalError {
        error!(detail = %err.message(), "internal service error redacted");
        ServiceError::internal_error(REDACTED_MESSAGE)
    } else {
        err.clone()
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl<T: Serialize> ServiceResult<T> {
    /// Render the result: `200 OK` with the data, or the mapped failure.
    pub fn into_http_response(self) -> HttpResponse {
        let Some(primary) = self.primary_error() else {
            return HttpResponse::Ok().json(self.data());
        };
        let primary = redact_if_internal(&primary);
        let errors = if primary.code() == ServiceErrorCode::InternalError {
            vec![REDACTED_MESSAGE.to_owned()]
        } else if self.structured_errors().is_empty() {
            self.errors().to_vec()
        } else {
            self.structured_errors()
                .iter()
                .map(|error| redact_if_internal(error).message().to_owned())
                .collect()
        };
        HttpResponse::build(status_for(primary.code())).json(FailureBody {
            code: primary.code(),
            message: primary.message().to_owned(),
            errors,
        })
    }
}
