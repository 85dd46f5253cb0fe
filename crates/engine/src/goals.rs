//! Savings goals. `current_amount` is set by the user, never derived.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, metrics, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: i64,
    pub current_amount: i64,
    pub deadline: NaiveDate,
    pub category: String,
}

impl Goal {
    pub fn progress(&self) -> f64 {
        metrics::progress_percentage(self.current_amount, self.target_amount)
    }

    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        metrics::days_remaining(self.deadline, now)
    }
}

#[derive(Clone, Debug)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: i64,
    pub current_amount: i64,
    pub deadline: NaiveDate,
    pub category: String,
}

#[derive(Clone, Debug, Default)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub target_amount: Option<i64>,
    pub current_amount: Option<i64>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: i64,
    pub current_amount: i64,
    pub deadline: Date,
    pub category: String,
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
    pub(crate) fn new_row(user_id: &str, goal: &Goal, now: DateTime<Utc>) -> Self {
        Self {
            id: ActiveValue::Set(goal.id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            name: ActiveValue::Set(goal.name.clone()),
            target_amount: ActiveValue::Set(goal.target_amount),
            current_amount: ActiveValue::Set(goal.current_amount),
            deadline: ActiveValue::Set(goal.deadline),
            category: ActiveValue::Set(goal.category.clone()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
    }
}

impl TryFrom<Model> for Goal {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "goal")?,
            name: model.name,
            target_amount: model.target_amount,
            current_amount: model.current_amount,
            deadline: model.deadline,
            category: model.category,
        })
    }
}
