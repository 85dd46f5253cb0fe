//! Point-in-time snapshot of one user's finances, the input of the PDF report.

use serde::Serialize;

use crate::{Budget, Goal, Transaction, User, metrics::Totals};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_income: i64,
    pub total_expenses: i64,
    pub net_savings: i64,
    pub transaction_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportSnapshot {
    pub user: User,
    /// Newest first.
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
    pub summary: ReportSummary,
    /// Expense totals per category, in order of first appearance.
    pub category_breakdown: Vec<CategoryTotal>,
}

impl ReportSnapshot {
    /// Assembles the snapshot.
    ///
    /// Transactions are sorted newest first with a stable sort, so entries
    /// sharing a date keep the order they were handed in.
    pub fn build(
        user: User,
        mut transactions: Vec<Transaction>,
        budgets: Vec<Budget>,
        goals: Vec<Goal>,
    ) -> Self {
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        let totals = Totals::of(&transactions);
        let summary = ReportSummary {
            total_income: totals.income,
            total_expenses: totals.expenses,
            net_savings: totals.net(),
            transaction_count: transactions.len(),
        };

        let category_breakdown = category_breakdown(&transactions);

        Self {
            user,
            transactions,
            budgets,
            goals,
            summary,
            category_breakdown,
        }
    }
}

fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut breakdown: Vec<CategoryTotal> = Vec::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        match breakdown.iter_mut().find(|c| c.category == tx.category) {
            Some(entry) => entry.total = entry.total.saturating_add(tx.amount),
            None => breakdown.push(CategoryTotal {
                category: tx.category.clone(),
                total: tx.amount,
            }),
        }
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::TransactionKind;

    fn user() -> User {
        User {
            username: "ada".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn tx(kind: TransactionKind, amount: i64, category: &str, days_ago: i64) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            kind,
            amount,
            category: category.to_string(),
            description: format!("{category} {amount}"),
            date: base() - Duration::days(days_ago),
        }
    }

    #[test]
    fn income_and_rent() {
        let snapshot = ReportSnapshot::build(
            user(),
            vec![
                tx(TransactionKind::Income, 250_000, "Salary", 0),
                tx(TransactionKind::Expense, 45_000, "Rent", 2),
            ],
            vec![],
            vec![],
        );
        assert_eq!(
            snapshot.summary,
            ReportSummary {
                total_income: 250_000,
                total_expenses: 45_000,
                net_savings: 205_000,
                transaction_count: 2,
            }
        );
        assert_eq!(
            snapshot.category_breakdown,
            vec![CategoryTotal {
                category: "Rent".to_string(),
                total: 45_000
            }]
        );
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        let snapshot = ReportSnapshot::build(user(), vec![], vec![], vec![]);
        assert_eq!(snapshot.summary, ReportSummary::default());
        assert!(snapshot.category_breakdown.is_empty());
    }

    #[test]
    fn sorts_newest_first_and_keeps_tie_order() {
        let first = tx(TransactionKind::Expense, 1, "Food", 3);
        let mut tie_a = tx(TransactionKind::Expense, 2, "Transport", 1);
        let mut tie_b = tx(TransactionKind::Expense, 3, "Food", 1);
        tie_a.date = base();
        tie_b.date = base();
        let snapshot = ReportSnapshot::build(
            user(),
            vec![first.clone(), tie_a.clone(), tie_b.clone()],
            vec![],
            vec![],
        );
        let ids: Vec<_> = snapshot.transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![tie_a.id, tie_b.id, first.id]);
        let order: Vec<_> = snapshot
            .category_breakdown
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(order, vec!["Transport", "Food"]);
    }

    #[test]
    fn breakdown_sums_expenses_only() {
        let transactions = vec![
            tx(TransactionKind::Expense, 12_500, "Food", 1),
            tx(TransactionKind::Income, 90_000, "Food", 2),
            tx(TransactionKind::Expense, 8_000, "Transport", 3),
            tx(TransactionKind::Expense, 2_500, "Food", 4),
        ];
        let snapshot = ReportSnapshot::build(user(), transactions.clone(), vec![], vec![]);
        for entry in &snapshot.category_breakdown {
            let expected: i64 = transactions
                .iter()
                .filter(|t| t.is_expense() && t.category == entry.category)
                .map(|t| t.amount)
                .sum();
            assert_eq!(entry.total, expected);
        }
        assert_eq!(snapshot.category_breakdown.len(), 2);
        assert_eq!(snapshot.summary.net_savings, 90_000 - 23_000);
    }

    #[test]
    fn huge_amounts_do_not_overflow() {
        let half = i64::MAX / 2 + 1;
        let snapshot = ReportSnapshot::build(
            user(),
            vec![
                tx(TransactionKind::Income, half, "Salary", 0),
                tx(TransactionKind::Income, half, "Salary", 1),
                tx(TransactionKind::Expense, half, "Rent", 2),
                tx(TransactionKind::Expense, half, "Rent", 3),
            ],
            vec![],
            vec![],
        );
        assert_eq!(snapshot.summary.total_income, i64::MAX);
        assert_eq!(snapshot.summary.total_expenses, i64::MAX);
        assert_eq!(snapshot.summary.net_savings, 0);
        assert_eq!(snapshot.category_breakdown[0].total, i64::MAX);
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let transactions: Vec<_> = (0..30)
            .map(|i| tx(TransactionKind::Expense, 100 + i, "Food", i % 5))
            .collect();
        let a = ReportSnapshot::build(user(), transactions.clone(), vec![], vec![]);
        let b = ReportSnapshot::build(user(), transactions, vec![], vec![]);
        assert_eq!(a, b);
    }
}
