//! Goals API endpoints

use api_types::goal::{GoalList, GoalNew, GoalSaved, GoalUpdate};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use engine::{Alert, Goal, GoalPatch, NewGoal, User};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, views};

fn saved(goal: Goal, alert: Option<Alert>) -> GoalSaved {
    GoalSaved {
        goal: views::goal(goal, Utc::now()),
        alert: alert.map(views::alert),
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<GoalList>, ServerError> {
    let goals = state.engine.list_goals(&user.username).await?;
    let now = Utc::now();
    Ok(Json(GoalList {
        goals: goals.into_iter().map(|goal| views::goal(goal, now)).collect(),
    }))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<GoalNew>,
) -> Result<(StatusCode, Json<GoalSaved>), ServerError> {
    let (goal, alert) = state
        .engine
        .add_goal(
            &user.username,
            NewGoal {
                name: payload.name,
                target_amount: payload.target_amount,
                current_amount: payload.current_amount,
                deadline: payload.deadline,
                category: payload.category,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(saved(goal, alert))))
}

/// Partial update; `204` when the goal does not exist for this user.
pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GoalUpdate>,
) -> Result<Response, ServerError> {
    let updated = state
        .engine
        .update_goal(
            &user.username,
            id,
            GoalPatch {
                name: payload.name,
                target_amount: payload.target_amount,
                current_amount: payload.current_amount,
                deadline: payload.deadline,
                category: payload.category,
            },
        )
        .await?;

    Ok(match updated {
        Some((goal, alert)) => Json(saved(goal, alert)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_goal(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
