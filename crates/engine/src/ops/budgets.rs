use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Budget, BudgetPatch, Collection, NewBudget, ResultEngine, TransactionKind, budgets, metrics,
    transactions,
    util::{ensure_non_negative, ensure_positive, normalize_required_text},
};

use super::{Engine, patch_value, with_tx};

impl Engine {
    /// Budgets of `user_id`, oldest first.
    pub async fn list_budgets(&self, user_id: &str) -> ResultEngine<Vec<Budget>> {
        let models = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .order_by_asc(budgets::Column::CreatedAt)
            .order_by_asc(budgets::Column::Id)
            .all(&self.database)
            .await?;
        models.into_iter().map(Budget::try_from).collect()
    }

    /// Create a budget with `spent = 0`.
    ///
    /// Existing expenses are not counted; see [`Engine::recompute_budget_spent`].
    pub async fn add_budget(&self, user_id: &str, input: NewBudget) -> ResultEngine<Budget> {
        ensure_positive(input.limit, "limit")?;
        let budget = Budget {
            id: Uuid::new_v4(),
            category: normalize_required_text(&input.category, "category")?,
            limit: input.limit,
            spent: 0,
            period: input.period,
        };

        budgets::ActiveModel::new_row(user_id, &budget, Utc::now())
            .insert(&self.database)
            .await?;

        tracing::info!(user = user_id, budget = %budget.id, category = %budget.category, "budget created");
        self.notify(user_id, &[Collection::Budgets]);
        Ok(budget)
    }

    /// Apply the provided fields to a budget of `user_id`. Missing ids are a no-op.
    pub async fn update_budget(
        &self,
        user_id: &str,
        budget_id: Uuid,
        patch: BudgetPatch,
    ) -> ResultEngine<()> {
        if let Some(limit) = patch.limit {
            ensure_positive(limit, "limit")?;
        }
        if let Some(spent) = patch.spent {
            ensure_non_negative(spent, "spent")?;
        }
        let category = patch
            .category
            .as_deref()
            .map(|c| normalize_required_text(c, "category"))
            .transpose()?;

        let changes = budgets::ActiveModel {
            category: patch_value(category),
            limit_amount: patch_value(patch.limit),
            spent: patch_value(patch.spent),
            period: patch_value(patch.period.map(|p| p.as_str().to_string())),
            updated_at: patch_value(Some(Utc::now())),
            ..Default::default()
        };
        let result = budgets::Entity::update_many()
            .set(changes)
            .filter(budgets::Column::Id.eq(budget_id.to_string()))
            .filter(budgets::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            tracing::debug!(user = user_id, budget = %budget_id, "no budget to update");
        }

        self.notify(user_id, &[Collection::Budgets]);
        Ok(())
    }

    pub async fn delete_budget(&self, user_id: &str, budget_id: Uuid) -> ResultEngine<()> {
        budgets::Entity::delete_many()
            .filter(budgets::Column::Id.eq(budget_id.to_string()))
            .filter(budgets::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;

        self.notify(user_id, &[Collection::Budgets]);
        Ok(())
    }

    /// Rebuild `spent` of every budget of `user_id` from the stored expenses.
    ///
    /// A budget counts the expenses of its category dated at or after its own
    /// creation. No alerts are raised.
    pub async fn recompute_budget_spent(&self, user_id: &str) -> ResultEngine<Vec<Budget>> {
        let recomputed: ResultEngine<Vec<Budget>> = with_tx!(self, |db_tx| {
            let budget_models = budgets::Entity::find()
                .filter(budgets::Column::UserId.eq(user_id))
                .order_by_asc(budgets::Column::CreatedAt)
                .order_by_asc(budgets::Column::Id)
                .all(&db_tx)
                .await?;
            let expenses = transactions::Entity::find()
                .filter(transactions::Column::UserId.eq(user_id))
                .filter(transactions::Column::Kind.eq(TransactionKind::Expense.as_str()))
                .all(&db_tx)
                .await?;

            let mut by_category: HashMap<&str, Vec<&transactions::Model>> = HashMap::new();
            for expense in &expenses {
                by_category
                    .entry(expense.category.as_str())
                    .or_default()
                    .push(expense);
            }

            let now = Utc::now();
            let mut out = Vec::with_capacity(budget_models.len());
            for model in budget_models {
                let spent: i64 = by_category
                    .get(model.category.as_str())
                    .map(|rows| {
                        metrics::saturating_sum(
                            rows.iter()
                                .filter(|tx| tx.occurred_at >= model.created_at)
                                .map(|tx| tx.amount),
                        )
                    })
                    .unwrap_or(0);

                let mut budget = Budget::try_from(model.clone())?;
                if budget.spent != spent {
                    tracing::debug!(
                        user = user_id,
                        budget = %budget.id,
                        from = budget.spent,
                        to = spent,
                        "budget spent corrected"
                    );
                    let mut active: budgets::ActiveModel = model.into();
                    active.spent = ActiveValue::Set(spent);
                    active.updated_at = ActiveValue::Set(now);
                    active.update(&db_tx).await?;
                    budget.spent = spent;
                }
                out.push(budget);
            }
            Ok(out)
        });
        let recomputed = recomputed?;

        self.notify(user_id, &[Collection::Budgets]);
        Ok(recomputed)
    }
}
