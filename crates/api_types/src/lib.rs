//! JSON bodies exchanged with the HTTP API.
//!
//! Field names are camelCase on the wire; enum values are lowercase.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod transaction {
    use super::*;
    use crate::{alert::AlertView, budget::BudgetView};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        /// Whole currency units, `>= 0`.
        pub amount: i64,
        pub category: String,
        #[serde(default)]
        pub description: String,
        /// RFC3339; any offset is accepted and normalized to UTC.
        pub date: DateTime<FixedOffset>,
    }

    /// Partial update: absent fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionUpdate {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        pub kind: Option<TransactionKind>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub amount: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: Uuid,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: i64,
        pub category: String,
        pub description: String,
        pub date: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionList {
        pub transactions: Vec<TransactionView>,
    }

    /// Response of a create: the row plus the side effects it caused.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub transaction: TransactionView,
        pub budgets: Vec<BudgetView>,
        pub alerts: Vec<AlertView>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BudgetPeriod {
        Monthly,
        Weekly,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BudgetStatus {
        Normal,
        NearLimit,
        OverBudget,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetNew {
        pub category: String,
        pub limit: i64,
        pub period: BudgetPeriod,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub limit: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub spent: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub period: Option<BudgetPeriod>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetView {
        pub id: Uuid,
        pub category: String,
        pub limit: i64,
        pub spent: i64,
        pub period: BudgetPeriod,
        /// `spent / limit * 100`.
        pub usage: f64,
        pub status: BudgetStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetList {
        pub budgets: Vec<BudgetView>,
    }
}

pub mod goal {
    use super::*;
    use crate::alert::AlertView;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GoalNew {
        pub name: String,
        pub target_amount: i64,
        #[serde(default)]
        pub current_amount: i64,
        pub deadline: NaiveDate,
        pub category: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GoalUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub target_amount: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub current_amount: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub deadline: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GoalView {
        pub id: Uuid,
        pub name: String,
        pub target_amount: i64,
        pub current_amount: i64,
        pub deadline: NaiveDate,
        pub category: String,
        pub progress: f64,
        /// Negative once the deadline has passed.
        pub days_remaining: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalList {
        pub goals: Vec<GoalView>,
    }

    /// Response of a create or an update that matched a goal.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalSaved {
        pub goal: GoalView,
        pub alert: Option<AlertView>,
    }
}

pub mod alert {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AlertKind {
        Warning,
        Info,
        Success,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AlertView {
        pub id: Uuid,
        #[serde(rename = "type")]
        pub kind: AlertKind,
        pub message: String,
        pub timestamp: DateTime<Utc>,
        pub read: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AlertList {
        pub alerts: Vec<AlertView>,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Summary {
        pub total_income: i64,
        pub total_expenses: i64,
        pub balance: i64,
        pub monthly_income: i64,
        pub monthly_expenses: i64,
        pub savings_rate: f64,
        pub avg_daily_spending: f64,
        pub budget_adherence: f64,
        pub goals_progress: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PeriodView {
        pub label: String,
        pub start: NaiveDate,
        pub end: NaiveDate,
        pub income: i64,
        pub expenses: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Trends {
        pub daily: Vec<PeriodView>,
        pub weekly: Vec<PeriodView>,
    }
}

#[cfg(test)]
mod tests {
    use super::transaction::{TransactionKind, TransactionNew, TransactionUpdate};

    #[test]
    fn transaction_body_uses_type_field() {
        let body: TransactionNew = serde_json::from_str(
            r#"{"type":"expense","amount":6000,"category":"Food","date":"2026-10-19T08:30:00+01:00"}"#,
        )
        .unwrap();
        assert_eq!(body.kind, TransactionKind::Expense);
        assert_eq!(body.description, "");
        assert_eq!(body.date.naive_utc().to_string(), "2026-10-19 07:30:00");
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let json = serde_json::to_string(&TransactionUpdate::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
