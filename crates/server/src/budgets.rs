//! Budgets API endpoints

use api_types::budget::{BudgetList, BudgetNew, BudgetUpdate, BudgetView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{BudgetPatch, NewBudget, User};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, views};

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<BudgetList>, ServerError> {
    let budgets = state.engine.list_budgets(&user.username).await?;
    Ok(Json(BudgetList {
        budgets: budgets.into_iter().map(views::budget).collect(),
    }))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let budget = state
        .engine
        .add_budget(
            &user.username,
            NewBudget {
                category: payload.category,
                limit: payload.limit,
                period: views::period_from_api(payload.period),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::budget(budget))))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BudgetUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_budget(
            &user.username,
            id,
            BudgetPatch {
                category: payload.category,
                limit: payload.limit,
                spent: payload.spent,
                period: payload.period.map(views::period_from_api),
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_budget(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rebuild every budget's `spent` from the stored expenses.
pub async fn recompute(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<BudgetList>, ServerError> {
    let budgets = state.engine.recompute_budget_spent(&user.username).await?;
    Ok(Json(BudgetList {
        budgets: budgets.into_iter().map(views::budget).collect(),
    }))
}
