use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use report::ReportError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod alerts;
mod budgets;
mod dashboard;
mod goals;
mod report_pdf;
mod server;
mod transactions;
mod views;

pub enum ServerError {
    Engine(EngineError),
    Report(ReportError),
    /// Unexpected failure while producing a report; the cause goes in `details`.
    ReportFailed(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidName(_)
        | EngineError::InvalidKind(_)
        | EngineError::InvalidId(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

fn report_error_body(err: ReportError) -> (StatusCode, Error) {
    match err {
        ReportError::NoData => (
            StatusCode::BAD_REQUEST,
            Error {
                error: err.to_string(),
                details: None,
            },
        ),
        ReportError::EmptyOutput => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Error {
                error: err.to_string(),
                details: None,
            },
        ),
        ReportError::Pdf(cause) => {
            tracing::error!("pdf encoding failed: {cause}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Error {
                    error: "Failed to generate report".to_string(),
                    details: Some(cause.to_string()),
                },
            )
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => (
                status_for_engine_error(&err),
                Error {
                    error: message_for_engine_error(err),
                    details: None,
                },
            ),
            ServerError::Report(err) => report_error_body(err),
            ServerError::ReportFailed(details) => {
                tracing::error!("report failed: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Error {
                        error: "Failed to generate report".to_string(),
                        details: Some(details),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<ReportError> for ServerError {
    fn from(value: ReportError) -> Self {
        Self::Report(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let res = ServerError::from(EngineError::InvalidName("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn report_without_data_maps_to_400() {
        let res = ServerError::from(ReportError::NoData).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn empty_pdf_maps_to_500() {
        let res = ServerError::from(ReportError::EmptyOutput).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let res = ServerError::ReportFailed("boom".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
