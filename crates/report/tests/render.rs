use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use engine::{
    Budget, BudgetPeriod, Currency, Goal, ReportSnapshot, Transaction, TransactionKind, User,
};
use report::layout::Document;
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 14, 3, 27).unwrap()
}

fn user() -> User {
    User {
        username: "ada".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    }
}

fn transaction(kind: TransactionKind, amount: i64, category: &str, days_ago: i64) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        kind,
        amount,
        category: category.to_string(),
        description: format!("tx {days_ago}"),
        date: now() - Duration::days(days_ago),
    }
}

fn expenses(count: i64) -> Vec<Transaction> {
    (0..count)
        .map(|i| transaction(TransactionKind::Expense, 100, "Food", i))
        .collect()
}

fn compose(snapshot: &ReportSnapshot) -> Document {
    report::compose(snapshot, Currency::Ngn, &now())
}

fn y_of(document: &Document, text: &str) -> f32 {
    document.find(text).map(|run| run.y).unwrap()
}

#[test]
fn empty_report_shows_placeholders() {
    let snapshot = ReportSnapshot::build(user(), vec![], vec![], vec![]);
    let document = compose(&snapshot);

    assert_eq!(document.pages.len(), 1);
    for text in [
        "Financial Report",
        "Generated: 10/19/2026, 2:03:27 PM",
        "User: Ada (ada@example.com)",
        "Category Breakdown",
        "No budgets set",
        "No goals set",
        "No transactions found",
        "Page 1 of 1",
    ] {
        assert!(document.find(text).is_some(), "missing {text:?}");
    }
    assert!(document.find("Total Spent").is_none());
    let zeros = document.pages[0]
        .texts()
        .filter(|run| run.text == "NGN 0.00")
        .count();
    assert_eq!(zeros, 3);

    let bytes = report::render(&snapshot, Currency::Ngn, &now()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn sections_follow_fixed_order() {
    let snapshot = ReportSnapshot::build(
        user(),
        vec![
            transaction(TransactionKind::Income, 250_000, "Salary", 0),
            transaction(TransactionKind::Expense, 45_000, "Rent", 2),
        ],
        vec![],
        vec![],
    );
    let document = compose(&snapshot);

    assert_eq!(document.pages.len(), 1);
    let order = [
        "Financial Report",
        "Financial Summary",
        "Category Breakdown",
        "Budgets",
        "Goals",
        "Recent Transactions",
    ];
    for pair in order.windows(2) {
        assert!(
            y_of(&document, pair[0]) < y_of(&document, pair[1]),
            "{} should precede {}",
            pair[0],
            pair[1]
        );
    }
    assert!(document.find("NGN 205,000.00").is_some());
    assert!(document.find("NGN 45,000.00").is_some());
    assert!(document.find("Total Spent").is_some());
    assert!(document.find("No transactions found").is_none());
}

#[test]
fn budget_and_goal_rows_are_formatted() {
    let budgets = vec![Budget {
        id: Uuid::new_v4(),
        category: "Food".to_string(),
        limit: 50_000,
        spent: 51_000,
        period: BudgetPeriod::Monthly,
    }];
    let goals = vec![Goal {
        id: Uuid::new_v4(),
        name: "Laptop".to_string(),
        target_amount: 1_200_000,
        current_amount: 300_000,
        deadline: NaiveDate::from_ymd_opt(2027, 3, 1).unwrap(),
        category: "Savings".to_string(),
    }];
    let snapshot = ReportSnapshot::build(user(), vec![], budgets, goals);
    let document = compose(&snapshot);

    for text in [
        "NGN 50,000.00",
        "NGN 51,000.00",
        "monthly",
        "102.0%",
        "NGN 1,200,000.00",
        "NGN 300,000.00",
        "3/1/2027",
        "25.0%",
    ] {
        assert!(document.find(text).is_some(), "missing {text:?}");
    }
    assert!(document.find("No budgets set").is_none());
    assert!(document.find("No goals set").is_none());
}

#[test]
fn many_transactions_start_on_a_new_page() {
    let ten = compose(&ReportSnapshot::build(user(), expenses(10), vec![], vec![]));
    assert_eq!(ten.page_of("Recent Transactions"), Some(0));

    let eleven = compose(&ReportSnapshot::build(user(), expenses(11), vec![], vec![]));
    assert_eq!(eleven.page_of("Goals"), Some(0));
    assert_eq!(eleven.page_of("Recent Transactions"), Some(1));
}

fn budgets(count: usize) -> Vec<Budget> {
    (0..count)
        .map(|i| Budget {
            id: Uuid::new_v4(),
            category: format!("Category {i}"),
            limit: 10_000,
            spent: 2_500,
            period: BudgetPeriod::Weekly,
        })
        .collect()
}

fn first_count_moving(heading: &str) -> usize {
    (1..40)
        .find(|&count| {
            let snapshot = ReportSnapshot::build(user(), vec![], budgets(count), vec![]);
            compose(&snapshot).page_of(heading) == Some(1)
        })
        .unwrap()
}

#[test]
fn long_budget_table_pushes_later_sections_down() {
    let short = compose(&ReportSnapshot::build(user(), vec![], budgets(1), vec![]));
    assert_eq!(short.pages.len(), 1);

    // The transactions section breaks at a higher cursor than goals, so it
    // moves first even with no transactions at all.
    let transactions_move = first_count_moving("Recent Transactions");
    let goals_move = first_count_moving("Goals");
    assert!(transactions_move < goals_move);

    let document = compose(&ReportSnapshot::build(
        user(),
        vec![],
        budgets(transactions_move),
        vec![],
    ));
    assert_eq!(document.page_of("Goals"), Some(0));
    assert_eq!(document.page_of("No goals set"), Some(0));
    assert_eq!(document.page_of("Recent Transactions"), Some(1));
    assert!(y_of(&document, "Recent Transactions") < 40.0);
    let previous = compose(&ReportSnapshot::build(
        user(),
        vec![],
        budgets(transactions_move - 1),
        vec![],
    ));
    assert_eq!(previous.page_of("Recent Transactions"), Some(0));
    assert!(y_of(&previous, "Recent Transactions") > 200.0);

    let document = compose(&ReportSnapshot::build(
        user(),
        vec![],
        budgets(goals_move),
        vec![],
    ));
    assert_eq!(document.page_of("Budgets"), Some(0));
    assert_eq!(document.page_of("Goals"), Some(1));
    assert_eq!(document.page_of("Recent Transactions"), Some(1));
    assert!(y_of(&document, "Goals") < 40.0);
}

#[test]
fn transactions_table_is_truncated_to_fifty_rows() {
    let snapshot = ReportSnapshot::build(user(), expenses(60), vec![], vec![]);
    let document = compose(&snapshot);

    assert_eq!(snapshot.summary.transaction_count, 60);
    assert_eq!(snapshot.category_breakdown[0].total, 6_000);
    assert!(document.find("NGN 6,000.00").is_some());
    assert!(document.find("60").is_some());

    for i in 0..60 {
        let shown = document.find(&format!("tx {i}")).is_some();
        assert_eq!(shown, i < 50, "row tx {i}");
    }
}

#[test]
fn every_page_gets_a_footer() {
    let document = compose(&ReportSnapshot::build(user(), expenses(50), vec![], vec![]));
    let total = document.pages.len();
    assert!(total >= 3);
    for (idx, page) in document.pages.iter().enumerate() {
        let footers: Vec<_> = page
            .texts()
            .filter(|run| run.text.starts_with("Page "))
            .collect();
        assert_eq!(footers.len(), 1);
        assert_eq!(footers[0].text, format!("Page {} of {total}", idx + 1));
    }

    let snapshot = ReportSnapshot::build(user(), expenses(50), vec![], vec![]);
    let bytes = report::render(&snapshot, Currency::Ngn, &now()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
