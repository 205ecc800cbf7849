use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

use crate::external::google_maps::ExtractionFailure;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        Error::env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::database_error(err)
    }
}

impl From<oso::OsoError> for Error {
    fn from(err: oso::OsoError) -> Self {
        Error::authorization_error(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io_error(err)
    }
}

impl From<ExtractionFailure> for Error {
    fn from(err: ExtractionFailure) -> Self {
        Error::extraction_error(err)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::invalid_input_error(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::invalid_input_error(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::invalid_input_error(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => {
                tracing::error!(code = self.code, message = %self.message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            102 => (StatusCode::NOT_FOUND, self.message.as_str()),
            103 => (StatusCode::UNAUTHORIZED, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl Error {
    pub fn env_var_error(err: env::VarError) -> Error {
        Error {
            code: 1,
            message: format!("environment variable error: {err}"),
        }
    }

    pub fn database_error<T: Debug>(err: T) -> Error {
        Error {
            code: 2,
            message: format!("database error: {err:?}"),
        }
    }

    pub fn authorization_error<T: Debug>(err: T) -> Error {
        Error {
            code: 3,
            message: format!("authorization error: {err:?}"),
        }
    }

    pub fn io_error(err: std::io::Error) -> Error {
        Error {
            code: 4,
            message: format!("io error: {err}"),
        }
    }

    pub fn unexpected_error() -> Error {
        Error {
            code: 5,
            message: "unexpected error".into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Error {
        Error {
            code: 6,
            message: message.into(),
        }
    }

    pub fn invalid_input_error(message: impl Into<String>) -> Error {
        Error {
            code: 101,
            message: message.into(),
        }
    }

    pub fn not_found_error() -> Error {
        Error {
            code: 102,
            message: "Place not found".into(),
        }
    }

    pub fn unauthorized_error() -> Error {
        Error {
            code: 103,
            message: "Unauthorized: Invalid or missing admin secret.".into(),
        }
    }

    pub fn extraction_error(err: ExtractionFailure) -> Error {
        Error {
            code: 104,
            message: err.message().into(),
        }
    }

    pub fn missing_fields_error() -> Error {
        Error {
            code: 105,
            message: "Missing required fields: name, category, city, mapUrl".into(),
        }
    }

    pub fn is_not_found_error(&self) -> bool {
        self.code == 102
    }

    pub fn is_internal_error(&self) -> bool {
        (1..=99).contains(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::google_maps::extract_coordinates;

    #[test]
    fn extraction_failure_keeps_message() {
        let failure = extract_coordinates("not a url at all").unwrap_err();
        let err: Error = failure.clone().into();

        assert_eq!(err.code, 104);
        assert_eq!(err.message, failure.message());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            Error::not_found_error().into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::unauthorized_error().into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::missing_fields_error().into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::database_error("boom").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors() {
        assert!(Error::unexpected_error().is_internal_error());
        assert!(Error::config_error("bad port").is_internal_error());
        assert!(!Error::invalid_input_error("bad category").is_internal_error());
    }
}
