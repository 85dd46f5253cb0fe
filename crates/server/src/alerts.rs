//! Alerts API endpoints

use api_types::alert::AlertList;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::User;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, views};

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<AlertList>, ServerError> {
    let alerts = state.engine.list_alerts(&user.username).await?;
    Ok(Json(AlertList {
        alerts: alerts.into_iter().map(views::alert).collect(),
    }))
}

pub async fn mark_read(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.mark_alert_read(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.clear_alert(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
