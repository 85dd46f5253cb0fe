pub use alerts::{Alert, AlertKind, budget_alert, goal_alert};
pub use budgets::{Budget, BudgetPatch, BudgetPeriod, NewBudget};
pub use currency::Currency;
pub use error::EngineError;
pub use goals::{Goal, GoalPatch, NewGoal};
pub use invalidation::{Collection, Invalidation, LogInvalidation, RecordingInvalidation};
pub use metrics::{BudgetStatus, DashboardSummary, PeriodTotals};
pub use money::Money;
pub use ops::{Engine, EngineBuilder, Finances, TransactionOutcome, Trends};
pub use report::{CategoryTotal, ReportSnapshot, ReportSummary};
pub use transactions::{NewTransaction, Transaction, TransactionKind, TransactionPatch};
pub use users::User;
pub use util::MAX_AMOUNT;

mod alerts;
mod budgets;
mod currency;
mod error;
mod goals;
mod invalidation;
pub mod metrics;
mod money;
mod ops;
mod report;
mod transactions;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
