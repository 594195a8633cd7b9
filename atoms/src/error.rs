use lambda_http::{http::StatusCode, Body, Error, Response};
use thiserror::Error;

/// Form-level validation failures. Returned, never thrown, so callers can
/// map each variant to a field-level message.
#[derive(Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("la fecha de fin no puede ser anterior a la fecha de inicio")]
    EndBeforeStart,

    #[error("el receso no puede exceder los {max} días hábiles (solicitado: {days})")]
    ExceedsMaxDuration { days: i64, max: i64 },

    #[error("el valor de {field} debe ser un número positivo")]
    NotPositive { field: &'static str },

    #[error("el valor de {field} debe estar entre {min} y {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

/// Authorization failures from the gate in [`crate::authz`].
#[derive(Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("usuario no autenticado")]
    Unauthenticated,

    #[error("usuario no autorizado")]
    Forbidden,
}

/// Opaque record-store failures. The domain layer decides whether an
/// operation is *allowed*, not whether the store call *succeeded*; store
/// errors pass through uninterpreted.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("registro no encontrado")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("store request failed: {0}")]
    Store(String),
}

impl StoreError {
    pub fn store(e: impl std::fmt::Display) -> Self {
        StoreError::Store(e.to_string())
    }
}

fn json_error(status: StatusCode, message: &str) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(
            serde_json::json!({ "error": message }).to_string().into(),
        )
        .map_err(Box::new)?)
}

pub fn validation_response(err: &ValidationError) -> Result<Response<Body>, Error> {
    json_error(StatusCode::BAD_REQUEST, &err.to_string())
}

pub fn auth_response(err: &AuthError) -> Result<Response<Body>, Error> {
    let status = match err {
        AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
        AuthError::Forbidden => StatusCode::FORBIDDEN,
    };
    json_error(status, &err.to_string())
}

pub fn store_response(err: &StoreError) -> Result<Response<Body>, Error> {
    let status = match err {
        StoreError::NotFound => StatusCode::NOT_FOUND,
        StoreError::Conflict(_) => StatusCode::CONFLICT,
        StoreError::Store(_) => {
            tracing::error!("store error: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    json_error(status, &err.to_string())
}

pub fn bad_request(message: &str) -> Result<Response<Body>, Error> {
    json_error(StatusCode::BAD_REQUEST, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_field_level() {
        let err = ValidationError::ExceedsMaxDuration { days: 5, max: 3 };
        assert!(err.to_string().contains("3 días hábiles"));
        assert!(err.to_string().contains("5"));
    }

    #[test]
    fn store_not_found_maps_to_404() {
        let resp = store_response(&StoreError::NotFound).unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        let resp = auth_response(&AuthError::Unauthenticated).unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let resp = auth_response(&AuthError::Forbidden).unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
