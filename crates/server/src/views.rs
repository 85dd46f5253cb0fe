//! Conversions between engine records and wire bodies.

use api_types::{
    alert::{AlertKind as ApiAlertKind, AlertView},
    budget::{BudgetPeriod as ApiPeriod, BudgetStatus as ApiStatus, BudgetView},
    dashboard::PeriodView,
    goal::GoalView,
    transaction::{TransactionKind as ApiKind, TransactionView},
};
use chrono::{DateTime, Utc};
use engine::{
    Alert, AlertKind, Budget, BudgetPeriod, BudgetStatus, Goal, PeriodTotals, Transaction,
    TransactionKind,
};

pub(crate) fn kind_from_api(kind: ApiKind) -> TransactionKind {
    match kind {
        ApiKind::Income => TransactionKind::Income,
        ApiKind::Expense => TransactionKind::Expense,
    }
}

fn map_kind(kind: TransactionKind) -> ApiKind {
    match kind {
        TransactionKind::Income => ApiKind::Income,
        TransactionKind::Expense => ApiKind::Expense,
    }
}

pub(crate) fn period_from_api(period: ApiPeriod) -> BudgetPeriod {
    match period {
        ApiPeriod::Monthly => BudgetPeriod::Monthly,
        ApiPeriod::Weekly => BudgetPeriod::Weekly,
    }
}

fn map_period(period: BudgetPeriod) -> ApiPeriod {
    match period {
        BudgetPeriod::Monthly => ApiPeriod::Monthly,
        BudgetPeriod::Weekly => ApiPeriod::Weekly,
    }
}

fn map_status(status: BudgetStatus) -> ApiStatus {
    match status {
        BudgetStatus::Normal => ApiStatus::Normal,
        BudgetStatus::NearLimit => ApiStatus::NearLimit,
        BudgetStatus::OverBudget => ApiStatus::OverBudget,
    }
}

fn map_alert_kind(kind: AlertKind) -> ApiAlertKind {
    match kind {
        AlertKind::Warning => ApiAlertKind::Warning,
        AlertKind::Info => ApiAlertKind::Info,
        AlertKind::Success => ApiAlertKind::Success,
    }
}

pub(crate) fn transaction(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: map_kind(tx.kind),
        amount: tx.amount,
        category: tx.category,
        description: tx.description,
        date: tx.date,
    }
}

pub(crate) fn budget(budget: Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        usage: budget.usage(),
        status: map_status(budget.status()),
        category: budget.category,
        limit: budget.limit,
        spent: budget.spent,
        period: map_period(budget.period),
    }
}

pub(crate) fn goal(goal: Goal, now: DateTime<Utc>) -> GoalView {
    GoalView {
        id: goal.id,
        progress: goal.progress(),
        days_remaining: goal.days_remaining(now),
        name: goal.name,
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        deadline: goal.deadline,
        category: goal.category,
    }
}

pub(crate) fn alert(alert: Alert) -> AlertView {
    AlertView {
        id: alert.id,
        kind: map_alert_kind(alert.kind),
        message: alert.message,
        timestamp: alert.timestamp,
        read: alert.read,
    }
}

pub(crate) fn period(totals: PeriodTotals) -> PeriodView {
    PeriodView {
        label: totals.label,
        start: totals.start,
        end: totals.end,
        income: totals.income,
        expenses: totals.expenses,
    }
}
