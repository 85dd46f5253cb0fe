//! Transactions API endpoints

use api_types::transaction::{
    TransactionCreated, TransactionList, TransactionNew, TransactionUpdate,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::{NewTransaction, TransactionPatch, User};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, views};

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<TransactionList>, ServerError> {
    let transactions = state.engine.list_transactions(&user.username).await?;
    Ok(Json(TransactionList {
        transactions: transactions.into_iter().map(views::transaction).collect(),
    }))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionCreated>), ServerError> {
    let outcome = state
        .engine
        .add_transaction(
            &user.username,
            NewTransaction {
                kind: views::kind_from_api(payload.kind),
                amount: payload.amount,
                category: payload.category,
                description: payload.description,
                date: payload.date.with_timezone(&Utc),
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionCreated {
            transaction: views::transaction(outcome.transaction),
            budgets: outcome.budgets.into_iter().map(views::budget).collect(),
            alerts: outcome.alerts.into_iter().map(views::alert).collect(),
        }),
    ))
}

/// Partial update. Unknown ids succeed without changing anything.
pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_transaction(
            &user.username,
            id,
            TransactionPatch {
                kind: payload.kind.map(views::kind_from_api),
                amount: payload.amount,
                category: payload.category,
                description: payload.description,
                date: payload.date.map(|date| date.with_timezone(&Utc)),
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
    state.engine.delete_transaction(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
