use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use snipstore_common::{ServiceError, SnipError, ValidationError};

/// Erro devolvido pelos handlers HTTP.
///
/// Só `NotFound` e erros de validação chegam ao cliente com detalhe; o
/// resto vira 500 genérico e a causa fica no log.
#[derive(Debug)]
pub struct ApiError(SnipError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SnipError::Service(ServiceError::NotFound) => StatusCode::NOT_FOUND,
            SnipError::Validation(_) => StatusCode::BAD_REQUEST,
            SnipError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError(e.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("erro interno: {}", self.0);
            return (status, "internal server error").into_response();
        }
        (status, self.0.to_string()).into_response()
    }
}
