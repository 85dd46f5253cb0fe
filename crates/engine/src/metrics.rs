//! Derived numbers shown next to the raw records: budget usage, goal
//! progress, the dashboard summary and the spending trend series.
//!
//! Everything here is a pure function of the records passed in. Calendar
//! questions ("this month", "today") are answered in the time zone of the
//! `now` argument.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::{Budget, Goal, Transaction, TransactionKind};

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Normal,
    NearLimit,
    OverBudget,
}

/// `spent / limit * 100`, or 0 when the limit is not positive.
pub fn usage_percentage(spent: i64, limit: i64) -> f64 {
    if limit <= 0 {
        return 0.0;
    }
    spent as f64 / limit as f64 * 100.0
}

/// `< 80%` normal, `[80, 100)` near limit, `>= 100%` over budget.
pub fn classify_budget(spent: i64, limit: i64) -> BudgetStatus {
    if limit <= 0 {
        return BudgetStatus::Normal;
    }
    let spent = i128::from(spent);
    let limit = i128::from(limit);
    if spent >= limit {
        BudgetStatus::OverBudget
    } else if spent * 5 >= limit * 4 {
        BudgetStatus::NearLimit
    } else {
        BudgetStatus::Normal
    }
}

/// `current / target * 100`, or 0 when the target is not positive.
pub fn progress_percentage(current: i64, target: i64) -> f64 {
    if target <= 0 {
        return 0.0;
    }
    current as f64 / target as f64 * 100.0
}

/// Whole days until midnight UTC of `deadline`, rounded up. Negative once
/// the deadline has passed.
pub fn days_remaining(deadline: NaiveDate, now: DateTime<Utc>) -> i64 {
    let deadline = deadline.and_time(NaiveTime::MIN).and_utc();
    let diff = (deadline - now).num_milliseconds();
    let days = diff.div_euclid(MILLIS_PER_DAY);
    if diff.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// Number of days of the month `date` falls in.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(first);
    (next - first).num_days().max(1) as u32
}

/// Sum that sticks at the `i64` bounds instead of overflowing.
pub fn saturating_sum(values: impl IntoIterator<Item = i64>) -> i64 {
    values.into_iter().fold(0, i64::saturating_add)
}

/// Income and expense totals of a set of transactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: i64,
    pub expenses: i64,
}

impl Totals {
    pub fn of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        transactions
            .into_iter()
            .fold(Self::default(), |mut acc, tx| {
                match tx.kind {
                    TransactionKind::Income => {
                        acc.income = acc.income.saturating_add(tx.amount);
                    }
                    TransactionKind::Expense => {
                        acc.expenses = acc.expenses.saturating_add(tx.amount);
                    }
                }
                acc
            })
    }

    pub fn net(self) -> i64 {
        self.income.saturating_sub(self.expenses)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSummary {
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

/// Dashboard-level aggregation over one user's collections.
pub fn summarize<Tz: TimeZone>(
    transactions: &[Transaction],
    budgets: &[Budget],
    goals: &[Goal],
    now: &DateTime<Tz>,
) -> DashboardSummary {
    let tz = now.timezone();
    let today = now.date_naive();

    let all = Totals::of(transactions);
    let monthly = Totals::of(transactions.iter().filter(|tx| {
        let local = tx.date.with_timezone(&tz).date_naive();
        local.year() == today.year() && local.month() == today.month()
    }));

    let savings_rate = if monthly.income > 0 {
        monthly.net() as f64 / monthly.income as f64 * 100.0
    } else {
        0.0
    };
    let avg_daily_spending = monthly.expenses as f64 / f64::from(days_in_month(today));

    let total_limit = saturating_sum(budgets.iter().map(|b| b.limit));
    let total_spent = saturating_sum(budgets.iter().map(|b| b.spent));
    let budget_adherence = if total_limit > 0 {
        total_limit.saturating_sub(total_spent) as f64 / total_limit as f64 * 100.0
    } else {
        0.0
    };

    let total_target = saturating_sum(goals.iter().map(|g| g.target_amount));
    let total_current = saturating_sum(goals.iter().map(|g| g.current_amount));

    DashboardSummary {
        total_income: all.income,
        total_expenses: all.expenses,
        balance: all.net(),
        monthly_income: monthly.income,
        monthly_expenses: monthly.expenses,
        savings_rate,
        avg_daily_spending,
        budget_adherence,
        goals_progress: progress_percentage(total_current, total_target),
    }
}

/// Totals for a contiguous range of calendar days (`start..=end`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: i64,
    pub expenses: i64,
}

fn period_totals<Tz: TimeZone>(
    transactions: &[Transaction],
    tz: &Tz,
    label: String,
    start: NaiveDate,
    end: NaiveDate,
) -> PeriodTotals {
    let totals = Totals::of(transactions.iter().filter(|tx| {
        let day = tx.date.with_timezone(tz).date_naive();
        day >= start && day <= end
    }));
    PeriodTotals {
        label,
        start,
        end,
        income: totals.income,
        expenses: totals.expenses,
    }
}

/// One bucket per day for the last `days` days, oldest first, today last.
pub fn daily_series<Tz: TimeZone>(
    transactions: &[Transaction],
    now: &DateTime<Tz>,
    days: u64,
) -> Vec<PeriodTotals> {
    let tz = now.timezone();
    let today = now.date_naive();
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|day| {
            period_totals(
                transactions,
                &tz,
                day.format("%b %-d").to_string(),
                day,
                day,
            )
        })
        .collect()
}

/// `weeks` consecutive 7-day buckets ending today, oldest first.
pub fn weekly_series<Tz: TimeZone>(
    transactions: &[Transaction],
    now: &DateTime<Tz>,
    weeks: u64,
) -> Vec<PeriodTotals> {
    let tz = now.timezone();
    let today = now.date_naive();
    (0..weeks)
        .filter_map(|idx| {
            let end = today.checked_sub_days(Days::new((weeks - 1 - idx) * 7))?;
            let start = end.checked_sub_days(Days::new(6))?;
            Some(period_totals(
                transactions,
                &tz,
                format!("Week {}", idx + 1),
                start,
                end,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset};
    use uuid::Uuid;

    use super::*;
    use crate::BudgetPeriod;

    fn tx(kind: TransactionKind, amount: i64, date: DateTime<Utc>) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            kind,
            amount,
            category: "General".to_string(),
            description: String::new(),
            date,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn classification_matches_integer_thresholds() {
        for limit in [1_i64, 3, 7, 100, 50_000] {
            for spent in 0..=(limit * 2) {
                let status = classify_budget(spent, limit);
                let expected = if spent >= limit {
                    BudgetStatus::OverBudget
                } else if 5 * spent >= 4 * limit {
                    BudgetStatus::NearLimit
                } else {
                    BudgetStatus::Normal
                };
                assert_eq!(status, expected, "spent={spent} limit={limit}");
            }
        }
        assert_eq!(classify_budget(10, 0), BudgetStatus::Normal);
    }

    #[test]
    fn usage_is_zero_guarded() {
        assert_eq!(usage_percentage(10, 0), 0.0);
        assert!((usage_percentage(51_000, 50_000) - 102.0).abs() < 1e-9);
    }

    #[test]
    fn progress_reaches_hundred_only_at_target() {
        assert!(progress_percentage(99_999, 100_000) < 100.0);
        assert!(progress_percentage(100_000, 100_000) >= 100.0);
        assert_eq!(progress_percentage(5, 0), 0.0);
    }

    #[test]
    fn days_remaining_rounds_up_and_goes_negative() {
        let deadline = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
        assert_eq!(days_remaining(deadline, at(2026, 10, 19, 12)), 2);
        assert_eq!(days_remaining(deadline, at(2026, 10, 21, 0)), 0);
        assert_eq!(days_remaining(deadline, at(2026, 10, 22, 12)), -1);
        assert_eq!(days_remaining(deadline, at(2026, 10, 23, 0)), -2);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()), 29);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()), 28);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()), 31);
    }

    #[test]
    fn summary_restricts_monthly_figures_to_calendar_month() {
        let now = at(2026, 10, 19, 12);
        let transactions = vec![
            tx(TransactionKind::Income, 250_000, at(2026, 10, 1, 9)),
            tx(TransactionKind::Expense, 62_000, at(2026, 10, 5, 9)),
            tx(TransactionKind::Expense, 10_000, at(2026, 9, 30, 23)),
        ];
        let budgets = vec![Budget {
            id: Uuid::new_v4(),
            category: "Food".to_string(),
            limit: 50_000,
            spent: 12_500,
            period: BudgetPeriod::Monthly,
        }];

        let summary = summarize(&transactions, &budgets, &[], &now);
        assert_eq!(summary.total_income, 250_000);
        assert_eq!(summary.total_expenses, 72_000);
        assert_eq!(summary.balance, 178_000);
        assert_eq!(summary.monthly_income, 250_000);
        assert_eq!(summary.monthly_expenses, 62_000);
        assert!((summary.savings_rate - 75.2).abs() < 1e-9);
        assert!((summary.avg_daily_spending - 2_000.0).abs() < 1e-9);
        assert!((summary.budget_adherence - 75.0).abs() < 1e-9);
        assert_eq!(summary.goals_progress, 0.0);
    }

    #[test]
    fn summary_uses_local_calendar() {
        // 23:00 UTC on Sep 30 is already October in UTC+2.
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = at(2026, 10, 19, 12).with_timezone(&tz);
        let transactions = vec![tx(TransactionKind::Expense, 10_000, at(2026, 9, 30, 23))];
        let summary = summarize(&transactions, &[], &[], &now);
        assert_eq!(summary.monthly_expenses, 10_000);
    }

    #[test]
    fn huge_totals_saturate() {
        let now = at(2026, 10, 19, 12);
        let half = i64::MAX / 2 + 1;
        let transactions = vec![
            tx(TransactionKind::Income, half, now),
            tx(TransactionKind::Income, half, now),
        ];
        let budgets = vec![
            Budget {
                id: Uuid::new_v4(),
                category: "Food".to_string(),
                limit: half,
                spent: 0,
                period: BudgetPeriod::Monthly,
            },
            Budget {
                id: Uuid::new_v4(),
                category: "Rent".to_string(),
                limit: half,
                spent: 0,
                period: BudgetPeriod::Monthly,
            },
        ];
        let summary = summarize(&transactions, &budgets, &[], &now);
        assert_eq!(summary.total_income, i64::MAX);
        assert_eq!(summary.balance, i64::MAX);
        assert!((summary.budget_adherence - 100.0).abs() < 1e-9);
        assert_eq!(saturating_sum([i64::MAX, 1, 5]), i64::MAX);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let summary = summarize(&[], &[], &[], &at(2026, 10, 19, 12));
        assert_eq!(summary.balance, 0);
        assert_eq!(summary.savings_rate, 0.0);
        assert_eq!(summary.avg_daily_spending, 0.0);
    }

    #[test]
    fn daily_series_ends_today() {
        let now = at(2026, 10, 19, 12);
        let transactions = vec![
            tx(TransactionKind::Expense, 500, now - Duration::hours(1)),
            tx(TransactionKind::Income, 900, now - Duration::days(6)),
            tx(TransactionKind::Income, 100, now - Duration::days(7)),
        ];
        let series = daily_series(&transactions, &now, 7);
        assert_eq!(series.len(), 7);
        assert_eq!(series[6].start, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(series[6].expenses, 500);
        assert_eq!(series[0].income, 900);
        assert_eq!(series.iter().map(|p| p.income).sum::<i64>(), 900);
    }

    #[test]
    fn weekly_series_covers_four_weeks() {
        let now = at(2026, 10, 19, 12);
        let transactions = vec![
            tx(TransactionKind::Expense, 300, now),
            tx(TransactionKind::Expense, 200, now - Duration::days(27)),
            tx(TransactionKind::Expense, 999, now - Duration::days(28)),
        ];
        let series = weekly_series(&transactions, &now, 4);
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].label, "Week 1");
        assert_eq!(series[0].expenses, 200);
        assert_eq!(series[3].expenses, 300);
        assert_eq!(series[3].end, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    }
}
