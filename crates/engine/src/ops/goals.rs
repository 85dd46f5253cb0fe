use chrono::Utc;
use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Alert, Collection, Goal, GoalPatch, NewGoal, ResultEngine, alerts, goal_alert, goals,
    util::{ensure_non_negative, ensure_positive, normalize_required_text},
};

use super::{Engine, patch_value, with_tx};

/// Evaluate `goal` and persist the resulting alert, if any.
async fn raise_goal_alert(
    db_tx: &DatabaseTransaction,
    user_id: &str,
    goal: &Goal,
) -> ResultEngine<Option<Alert>> {
    let Some(alert) = goal_alert(goal, Utc::now()) else {
        return Ok(None);
    };
    alerts::ActiveModel::new_row(user_id, &alert)
        .insert(db_tx)
        .await?;
    Ok(Some(alert))
}

impl Engine {
    /// Goals of `user_id`, oldest first.
    pub async fn list_goals(&self, user_id: &str) -> ResultEngine<Vec<Goal>> {
        let models = goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id))
            .order_by_asc(goals::Column::CreatedAt)
            .order_by_asc(goals::Column::Id)
            .all(&self.database)
            .await?;
        models.into_iter().map(Goal::try_from).collect()
    }

    /// Create a goal; a goal created already halfway or complete raises an alert.
    pub async fn add_goal(&self, user_id: &str, input: NewGoal) -> ResultEngine<(Goal, Option<Alert>)> {
        ensure_positive(input.target_amount, "target_amount")?;
        ensure_non_negative(input.current_amount, "current_amount")?;
        let goal = Goal {
            id: Uuid::new_v4(),
            name: normalize_required_text(&input.name, "name")?,
            target_amount: input.target_amount,
            current_amount: input.current_amount,
            deadline: input.deadline,
            category: normalize_required_text(&input.category, "category")?,
        };

        let alert: ResultEngine<Option<Alert>> = with_tx!(self, |db_tx| {
            goals::ActiveModel::new_row(user_id, &goal, Utc::now())
                .insert(&db_tx)
                .await?;
            raise_goal_alert(&db_tx, user_id, &goal).await
        });
        let alert = alert?;

        tracing::info!(user = user_id, goal = %goal.id, alert = alert.is_some(), "goal created");
        let mut collections = vec![Collection::Goals];
        if alert.is_some() {
            collections.push(Collection::Alerts);
        }
        self.notify(user_id, &collections);
        Ok((goal, alert))
    }

    /// Apply the provided fields to a goal of `user_id` and re-evaluate it.
    ///
    /// Returns `None` when the goal does not exist for this user.
    pub async fn update_goal(
        &self,
        user_id: &str,
        goal_id: Uuid,
        patch: GoalPatch,
    ) -> ResultEngine<Option<(Goal, Option<Alert>)>> {
        if let Some(target) = patch.target_amount {
            ensure_positive(target, "target_amount")?;
        }
        if let Some(current) = patch.current_amount {
            ensure_non_negative(current, "current_amount")?;
        }
        let name = patch
            .name
            .as_deref()
            .map(|n| normalize_required_text(n, "name"))
            .transpose()?;
        let category = patch
            .category
            .as_deref()
            .map(|c| normalize_required_text(c, "category"))
            .transpose()?;

        let changes = goals::ActiveModel {
            name: patch_value(name),
            target_amount: patch_value(patch.target_amount),
            current_amount: patch_value(patch.current_amount),
            deadline: patch_value(patch.deadline),
            category: patch_value(category),
            updated_at: patch_value(Some(Utc::now())),
            ..Default::default()
        };

        let updated: ResultEngine<Option<(Goal, Option<Alert>)>> = with_tx!(self, |db_tx| {
            let result = goals::Entity::update_many()
                .set(changes)
                .filter(goals::Column::Id.eq(goal_id.to_string()))
                .filter(goals::Column::UserId.eq(user_id))
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                Ok(None)
            } else {
                match goals::Entity::find_by_id(goal_id.to_string())
                    .one(&db_tx)
                    .await?
                {
                    Some(model) => {
                        let goal = Goal::try_from(model)?;
                        let alert = raise_goal_alert(&db_tx, user_id, &goal).await?;
                        Ok(Some((goal, alert)))
                    }
                    None => Ok(None),
                }
            }
        });
        let updated = updated?;

        let mut collections = vec![Collection::Goals];
        match &updated {
            Some((_, Some(_))) => collections.push(Collection::Alerts),
            Some((_, None)) => {}
            None => tracing::debug!(user = user_id, goal = %goal_id, "no goal to update"),
        }
        self.notify(user_id, &collections);
        Ok(updated)
    }

    pub async fn delete_goal(&self, user_id: &str, goal_id: Uuid) -> ResultEngine<()> {
        goals::Entity::delete_many()
            .filter(goals::Column::Id.eq(goal_id.to_string()))
            .filter(goals::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;

        self.notify(user_id, &[Collection::Goals]);
        Ok(())
    }
}
