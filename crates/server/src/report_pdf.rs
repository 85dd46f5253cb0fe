//! PDF report download

use axum::{
    Extension,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use engine::{EngineError, User};
use report::ReportError;

use crate::{ServerError, server::ServerState};

pub async fn download(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Response, ServerError> {
    let snapshot = state
        .engine
        .report_snapshot(&user.username)
        .await
        .map_err(|err| match err {
            EngineError::KeyNotFound(_) => ServerError::Report(ReportError::NoData),
            other => ServerError::ReportFailed(other.to_string()),
        })?;

    let now = state.now();
    let bytes = report::render(&snapshot, state.engine.currency(), &now)?;
    tracing::info!(user = %user.username, bytes = bytes.len(), "report generated");

    let disposition = format!("attachment; filename=\"{}\"", report::file_name(&now));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        bytes,
    )
        .into_response())
}
