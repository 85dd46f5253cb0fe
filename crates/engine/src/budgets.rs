//! Budget records.
//!
//! A budget caps spending for one category. `spent` is a denormalized counter
//! bumped when an expense with the same category is created; it is never
//! recomputed on transaction update/delete unless
//! [`Engine::recompute_budget_spent`](crate::Engine::recompute_budget_spent)
//! is called explicitly.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, metrics, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    Monthly,
    Weekly,
}

impl BudgetPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
        }
    }
}

impl TryFrom<&str> for BudgetPeriod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "monthly" => Ok(Self::Monthly),
            "weekly" => Ok(Self::Weekly),
            other => Err(EngineError::InvalidKind(format!(
                "invalid budget period: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub category: String,
    pub limit: i64,
    pub spent: i64,
    pub period: BudgetPeriod,
}

impl Budget {
    /// Spent as a percentage of the limit (0 when the limit is not positive).
    pub fn usage(&self) -> f64 {
        metrics::usage_percentage(self.spent, self.limit)
    }

    pub fn status(&self) -> metrics::BudgetStatus {
        metrics::classify_budget(self.spent, self.limit)
    }
}

#[derive(Clone, Debug)]
pub struct NewBudget {
    pub category: String,
    pub limit: i64,
    pub period: BudgetPeriod,
}

#[derive(Clone, Debug, Default)]
pub struct BudgetPatch {
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub spent: Option<i64>,
    pub period: Option<BudgetPeriod>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub limit_amount: i64,
    pub spent: i64,
    pub period: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Username",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new_row(user_id: &str, budget: &Budget, now: DateTime<Utc>) -> Self {
        Self {
            id: ActiveValue::Set(budget.id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            category: ActiveValue::Set(budget.category.clone()),
            limit_amount: ActiveValue::Set(budget.limit),
            spent: ActiveValue::Set(budget.spent),
            period: ActiveValue::Set(budget.period.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "budget")?,
            category: model.category,
            limit: model.limit_amount,
            spent: model.spent,
            period: BudgetPeriod::try_from(model.period.as_str())?,
        })
    }
}
