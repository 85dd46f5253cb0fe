use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    Alert, Budget, Collection, NewTransaction, ResultEngine, Transaction, TransactionPatch,
    alerts, budget_alert, budgets, transactions,
    util::{ensure_non_negative, normalize_required_text},
};

use super::{Engine, patch_value, with_tx};

/// Everything written by [`Engine::add_transaction`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionOutcome {
    pub transaction: Transaction,
    /// Budgets whose `spent` was incremented, after the increment.
    pub budgets: Vec<Budget>,
    pub alerts: Vec<Alert>,
}

impl Engine {
    /// All transactions of `user_id`, newest first.
    ///
    /// Entries sharing a date come back in insertion order.
    pub async fn list_transactions(&self, user_id: &str) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::OccurredAt)
            .order_by_asc(transactions::Column::CreatedAt)
            .order_by_asc(transactions::Column::Id)
            .all(&self.database)
            .await?;
        models.into_iter().map(Transaction::try_from).collect()
    }

    /// Record a transaction.
    ///
    /// Expenses add their amount to every budget of the user with the same
    /// category, in the same DB transaction, and each of those budgets is
    /// checked for a usage alert.
    pub async fn add_transaction(
        &self,
        user_id: &str,
        input: NewTransaction,
    ) -> ResultEngine<TransactionOutcome> {
        ensure_non_negative(input.amount, "amount")?;
        let category = normalize_required_text(&input.category, "category")?;
        let transaction = Transaction {
            id: Uuid::new_v4(),
            kind: input.kind,
            amount: input.amount,
            category,
            description: input.description.trim().to_string(),
            date: input.date,
        };
        let now = Utc::now();

        let outcome: ResultEngine<TransactionOutcome> = with_tx!(self, |db_tx| {
            transactions::ActiveModel::new_row(user_id, &transaction, now)
                .insert(&db_tx)
                .await?;

            let mut touched = Vec::new();
            let mut raised = Vec::new();
            if transaction.is_expense() {
                let updated = budgets::Entity::update_many()
                    .col_expr(
                        budgets::Column::Spent,
                        // Sticks at i64::MAX; SQLite would switch to REAL on overflow.
                        Expr::case(
                            Expr::col(budgets::Column::Spent).gt(i64::MAX - transaction.amount),
                            i64::MAX,
                        )
                        .finally(Expr::col(budgets::Column::Spent).add(transaction.amount))
                        .into(),
                    )
                    .col_expr(budgets::Column::UpdatedAt, Expr::value(now))
                    .filter(budgets::Column::UserId.eq(user_id))
                    .filter(budgets::Column::Category.eq(transaction.category.as_str()))
                    .exec(&db_tx)
                    .await?;

                if updated.rows_affected > 0 {
                    let models = budgets::Entity::find()
                        .filter(budgets::Column::UserId.eq(user_id))
                        .filter(budgets::Column::Category.eq(transaction.category.as_str()))
                        .order_by_asc(budgets::Column::CreatedAt)
                        .all(&db_tx)
                        .await?;
                    for model in models {
                        let budget = Budget::try_from(model)?;
                        if let Some(alert) = budget_alert(&budget, self.currency, now) {
                            alerts::ActiveModel::new_row(user_id, &alert)
                                .insert(&db_tx)
                                .await?;
                            raised.push(alert);
                        }
                        touched.push(budget);
                    }
                }
            }

            Ok(TransactionOutcome {
                transaction: transaction.clone(),
                budgets: touched,
                alerts: raised,
            })
        });
        let outcome = outcome?;

        tracing::info!(
            user = user_id,
            transaction = %outcome.transaction.id,
            budgets = outcome.budgets.len(),
            alerts = outcome.alerts.len(),
            "transaction recorded"
        );
        let mut collections = vec![Collection::Transactions];
        if !outcome.budgets.is_empty() {
            collections.push(Collection::Budgets);
        }
        if !outcome.alerts.is_empty() {
            collections.push(Collection::Alerts);
        }
        self.notify(user_id, &collections);
        Ok(outcome)
    }

    /// Apply the provided fields to a transaction of `user_id`.
    ///
    /// Budgets are not adjusted. A missing id, or one owned by another user,
    /// is not an error: nothing is written.
    pub async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: Uuid,
        patch: TransactionPatch,
    ) -> ResultEngine<()> {
        if let Some(amount) = patch.amount {
            ensure_non_negative(amount, "amount")?;
        }
        let category = patch
            .category
            .as_deref()
            .map(|c| normalize_required_text(c, "category"))
            .transpose()?;

        let changes = transactions::ActiveModel {
            kind: patch_value(patch.kind.map(|k| k.as_str().to_string())),
            amount: patch_value(patch.amount),
            category: patch_value(category),
            description: patch_value(patch.description.map(|d| d.trim().to_string())),
            occurred_at: patch_value(patch.date),
            updated_at: patch_value(Some(Utc::now())),
            ..Default::default()
        };
        let result = transactions::Entity::update_many()
            .set(changes)
            .filter(transactions::Column::Id.eq(transaction_id.to_string()))
            .filter(transactions::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            tracing::debug!(user = user_id, transaction = %transaction_id, "no transaction to update");
        }

        self.notify(user_id, &[Collection::Transactions]);
        Ok(())
    }

    /// Remove a transaction of `user_id`. Budgets are not adjusted.
    pub async fn delete_transaction(&self, user_id: &str, transaction_id: Uuid) -> ResultEngine<()> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(transaction_id.to_string()))
            .filter(transactions::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            tracing::debug!(user = user_id, transaction = %transaction_id, "no transaction to delete");
        }

        self.notify(user_id, &[Collection::Transactions]);
        Ok(())
    }
}
