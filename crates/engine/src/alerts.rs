//! Alert records and the policy deciding when a mutation produces one.
//!
//! Alerts are informational. The policy performs no de-duplication: every
//! mutation that lands in an alerting band produces a fresh alert.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Budget, Currency, EngineError, Goal, Money, ResultEngine, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Warning,
    Info,
    Success,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Success => "success",
        }
    }
}

impl TryFrom<&str> for AlertKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            other => Err(EngineError::InvalidKind(format!(
                "invalid alert kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl Alert {
    fn new(kind: AlertKind, message: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message,
            timestamp,
            read: false,
        }
    }
}

/// Warning for a budget whose usage entered `[90, 100)` or reached `>= 100`.
///
/// Bands are decided on integers so that `spent == limit` is always an
/// overage and never a rounding artefact.
pub fn budget_alert(budget: &Budget, currency: Currency, now: DateTime<Utc>) -> Option<Alert> {
    if budget.limit <= 0 {
        return None;
    }
    let spent = i128::from(budget.spent);
    let limit = i128::from(budget.limit);

    if spent >= limit {
        let over = Money::new(budget.spent - budget.limit, currency);
        return Some(Alert::new(
            AlertKind::Warning,
            format!(
                "You've exceeded your {} budget by {over}",
                budget.category
            ),
            now,
        ));
    }
    if spent * 10 >= limit * 9 {
        return Some(Alert::new(
            AlertKind::Warning,
            format!(
                "You've spent {}% of your {} budget",
                budget.usage().round() as i64,
                budget.category
            ),
            now,
        ));
    }
    None
}

/// Info when progress is in `[50, 75)`, success once the target is reached.
pub fn goal_alert(goal: &Goal, now: DateTime<Utc>) -> Option<Alert> {
    if goal.target_amount <= 0 {
        return None;
    }
    let current = i128::from(goal.current_amount);
    let target = i128::from(goal.target_amount);

    if current >= target {
        return Some(Alert::new(
            AlertKind::Success,
            format!("Congratulations! You've achieved your \"{}\" goal!", goal.name),
            now,
        ));
    }
    if current * 2 >= target && current * 4 < target * 3 {
        return Some(Alert::new(
            AlertKind::Info,
            format!("You're halfway to your \"{}\" goal! Keep it up!", goal.name),
            now,
        ));
    }
    None
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub message: String,
    pub timestamp: DateTimeUtc,
    pub read: bool,
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
    pub(crate) fn new_row(user_id: &str, alert: &Alert) -> Self {
        Self {
            id: ActiveValue::Set(alert.id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            kind: ActiveValue::Set(alert.kind.as_str().to_string()),
            message: ActiveValue::Set(alert.message.clone()),
            timestamp: ActiveValue::Set(alert.timestamp),
            read: ActiveValue::Set(alert.read),
            created_at: ActiveValue::Set(alert.timestamp),
            updated_at: ActiveValue::Set(alert.timestamp),
        }
    }
}

impl TryFrom<Model> for Alert {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "alert")?,
            kind: AlertKind::try_from(model.kind.as_str())?,
            message: model.message,
            timestamp: model.timestamp,
            read: model.read,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::BudgetPeriod;

    fn budget(limit: i64, spent: i64) -> Budget {
        Budget {
            id: Uuid::new_v4(),
            category: "Food".to_string(),
            limit,
            spent,
            period: BudgetPeriod::Monthly,
        }
    }

    fn goal(target: i64, current: i64) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            name: "Emergency Fund".to_string(),
            target_amount: target,
            current_amount: current,
            deadline: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            category: "Savings".to_string(),
        }
    }

    #[test]
    fn budget_below_ninety_percent_is_silent() {
        assert!(budget_alert(&budget(50_000, 44_999), Currency::Ngn, Utc::now()).is_none());
        assert!(budget_alert(&budget(50_000, 40_000), Currency::Ngn, Utc::now()).is_none());
    }

    #[test]
    fn budget_approaching_limit_warns_with_percentage() {
        let alert = budget_alert(&budget(50_000, 46_000), Currency::Ngn, Utc::now()).unwrap();
        assert_eq!(alert.kind, AlertKind::Warning);
        assert_eq!(alert.message, "You've spent 92% of your Food budget");
        assert!(!alert.read);
    }

    #[test]
    fn budget_overage_reports_amount() {
        let alert = budget_alert(&budget(50_000, 51_000), Currency::Ngn, Utc::now()).unwrap();
        assert_eq!(alert.kind, AlertKind::Warning);
        assert_eq!(alert.message, "You've exceeded your Food budget by ₦1,000");
    }

    #[test]
    fn budget_at_exact_limit_is_an_overage() {
        let alert = budget_alert(&budget(100, 100), Currency::Ngn, Utc::now()).unwrap();
        assert_eq!(alert.message, "You've exceeded your Food budget by ₦0");
    }

    #[test]
    fn zero_limit_never_alerts() {
        assert!(budget_alert(&budget(0, 10), Currency::Ngn, Utc::now()).is_none());
    }

    #[test]
    fn goal_bands() {
        assert!(goal_alert(&goal(100_000, 49_999), Utc::now()).is_none());
        assert_eq!(
            goal_alert(&goal(100_000, 50_000), Utc::now()).unwrap().kind,
            AlertKind::Info
        );
        assert!(goal_alert(&goal(100_000, 75_000), Utc::now()).is_none());
        let done = goal_alert(&goal(100_000, 120_000), Utc::now()).unwrap();
        assert_eq!(done.kind, AlertKind::Success);
        assert_eq!(
            done.message,
            "Congratulations! You've achieved your \"Emergency Fund\" goal!"
        );
    }

    #[test]
    fn zero_target_never_alerts() {
        assert!(goal_alert(&goal(0, 0), Utc::now()).is_none());
    }
}
