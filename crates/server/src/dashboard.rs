//! Dashboard API endpoints

use api_types::dashboard::{Summary, Trends};
use axum::{Extension, Json, extract::State};
use engine::User;

use crate::{ServerError, server::ServerState, views};

pub async fn summary(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Summary>, ServerError> {
    let finances = state.engine.finances(&user.username).await?;
    let summary = finances.summary(&state.now());

    Ok(Json(Summary {
        total_income: summary.total_income,
        total_expenses: summary.total_expenses,
        balance: summary.balance,
        monthly_income: summary.monthly_income,
        monthly_expenses: summary.monthly_expenses,
        savings_rate: summary.savings_rate,
        avg_daily_spending: summary.avg_daily_spending,
        budget_adherence: summary.budget_adherence,
        goals_progress: summary.goals_progress,
    }))
}

/// Daily totals for the last week and weekly totals for the last four weeks.
pub async fn trends(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Trends>, ServerError> {
    let finances = state.engine.finances(&user.username).await?;
    let trends = finances.trends(&state.now());

    Ok(Json(Trends {
        daily: trends.daily.into_iter().map(views::period).collect(),
        weekly: trends.weekly.into_iter().map(views::period).collect(),
    }))
}
