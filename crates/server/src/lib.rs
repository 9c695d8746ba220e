//! HTTP layer of the budgeting service.
//!
//! Handlers parse and validate requests, check cross-entity rules, call the
//! engine and map its errors to `{"error": "<kind>"}` responses.

use api_types::ErrorBody;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use engine::EngineError;

pub use server::{ServerState, router, run};

mod budgets;
mod categories;
mod health;
mod server;
mod state;
mod transactions;
mod validate;

#[derive(Debug)]
pub enum ServerError {
    /// The body was not valid JSON for the expected shape.
    BadJson(String),
    Engine(EngineError),
}

impl ServerError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Engine(EngineError::Validation(msg.into()))
    }

    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::BadJson(_) => (StatusCode::BAD_REQUEST, "bad_json"),
            ServerError::Engine(EngineError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "validation")
            }
            ServerError::Engine(EngineError::KeyNotFound(_)) => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            ServerError::Engine(EngineError::Conflict(_)) => (StatusCode::CONFLICT, "conflict"),
            ServerError::Engine(EngineError::Database(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        match &self {
            ServerError::Engine(EngineError::Database(db_err)) => {
                tracing::error!("database error: {db_err}");
            }
            ServerError::BadJson(msg) => tracing::debug!("rejected body: {msg}"),
            ServerError::Engine(err) => tracing::debug!("request failed: {err}"),
        }

        (
            status,
            Json(ErrorBody {
                error: kind.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::BadJson(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let res = ServerError::validation("bad month").into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn bad_json_maps_to_400() {
        let res = ServerError::BadJson("eof".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::Conflict("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn database_maps_to_500_without_details() {
        let err = ServerError::from(EngineError::Database(sea_orm::DbErr::Custom(
            "disk on fire".to_string(),
        )));
        assert_eq!(
            err.status_and_kind(),
            (StatusCode::INTERNAL_SERVER_ERROR, "internal")
        );
    }
}
