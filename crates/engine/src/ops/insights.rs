use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::{
    Budget, Goal, ReportSnapshot, ResultEngine, Transaction,
    metrics::{self, DashboardSummary, PeriodTotals},
};

use super::Engine;

const DAILY_TREND_DAYS: u64 = 7;
const WEEKLY_TREND_WEEKS: u64 = 4;

/// The three collections of one user, loaded together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Finances {
    /// Newest first.
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trends {
    pub daily: Vec<PeriodTotals>,
    pub weekly: Vec<PeriodTotals>,
}

impl Finances {
    pub fn summary<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardSummary {
        metrics::summarize(&self.transactions, &self.budgets, &self.goals, now)
    }

    /// Last 7 days and last 4 weeks, oldest bucket first.
    pub fn trends<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Trends {
        Trends {
            daily: metrics::daily_series(&self.transactions, now, DAILY_TREND_DAYS),
            weekly: metrics::weekly_series(&self.transactions, now, WEEKLY_TREND_WEEKS),
        }
    }
}

impl Engine {
    pub async fn finances(&self, user_id: &str) -> ResultEngine<Finances> {
        Ok(Finances {
            transactions: self.list_transactions(user_id).await?,
            budgets: self.list_budgets(user_id).await?,
            goals: self.list_goals(user_id).await?,
        })
    }

    /// Everything the PDF report shows for `user_id`.
    ///
    /// Fails with [`crate::EngineError::KeyNotFound`] when the user row is gone.
    pub async fn report_snapshot(&self, user_id: &str) -> ResultEngine<ReportSnapshot> {
        let user = self.user(user_id).await?;
        let finances = self.finances(user_id).await?;
        let snapshot = ReportSnapshot::build(
            user,
            finances.transactions,
            finances.budgets,
            finances.goals,
        );
        tracing::debug!(
            user = user_id,
            transactions = snapshot.summary.transaction_count,
            "report snapshot built"
        );
        Ok(snapshot)
    }
}
