//! Page layout of the financial report.
//!
//! The report is first laid out into a [`Document`] of positioned text runs
//! and boxes, then encoded by [`crate::pdf`]. Coordinates are millimetres from
//! the top-left corner of an A4 page with `y` growing downwards; the `y` of a
//! text run is its baseline.

use std::fmt;

use chrono::{DateTime, TimeZone};
use engine::{Currency, Money, ReportSnapshot};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 14.0;

/// Cursor position of a fresh page.
const TOP: f32 = 20.0;
const FOOTER_Y: f32 = PAGE_HEIGHT - 10.0;
const TABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const PT_TO_MM: f32 = 25.4 / 72.0;
const CELL_PADDING: f32 = 5.0 * PT_TO_MM;
const LINE_HEIGHT: f32 = 1.15;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.5;

const TITLE_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 10.0;
const TRANSACTION_SIZE: f32 = 8.0;
const FOOTER_SIZE: f32 = 8.0;

/// Sections other than transactions move to a new page past this line.
const SECTION_BREAK_Y: f32 = 250.0;
const TRANSACTIONS_BREAK_Y: f32 = 230.0;
/// More transactions than this always start on a fresh page.
const TRANSACTIONS_INLINE_MAX: usize = 10;
pub const TRANSACTION_ROWS: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const HEADER_FILL: Rgb = Rgb(59, 130, 246);
const STRIPE_FILL: Rgb = Rgb(245, 245, 245);
const GRID_LINE: Rgb = Rgb(200, 200, 200);
const BODY_TEXT: Rgb = Rgb(20, 20, 20);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub style: FontStyle,
    pub align: Align,
    pub color: Rgb,
}

impl TextRun {
    /// X of the first glyph once alignment is applied.
    pub fn left(&self) -> f32 {
        match self.align {
            Align::Left => self.x,
            Align::Center => self.x - text_width(&self.text, self.size) / 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Text(TextRun),
    Block(Block),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text(run) => Some(run),
            Element::Block(_) => None,
        })
    }

    pub fn contains(&self, text: &str) -> bool {
        self.texts().any(|run| run.text == text)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
}

impl Document {
    /// Index of the first page holding a run with exactly `text`.
    pub fn page_of(&self, text: &str) -> Option<usize> {
        self.pages.iter().position(|page| page.contains(text))
    }

    pub fn find(&self, text: &str) -> Option<&TextRun> {
        self.pages
            .iter()
            .flat_map(Page::texts)
            .find(|run| run.text == text)
    }
}

/// Approximate rendered width of `text` in millimetres.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_CHAR_WIDTH * PT_TO_MM
}

/// Greedy word wrap to `width` millimetres; words longer than a line are split.
fn wrap(text: &str, width: f32, size: f32) -> Vec<String> {
    let max_chars = ((width / (size * AVG_CHAR_WIDTH * PT_TO_MM)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for piece in chars.chunks(max_chars) {
            if current_len > 0 && current_len + 1 + piece.len() > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(piece);
            current_len += piece.len();
        }
    }
    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Theme {
    Grid,
    Striped,
}

struct Table {
    head: &'static [&'static str],
    body: Vec<Vec<String>>,
    theme: Theme,
    font_size: f32,
}

struct Row {
    cells: Vec<Vec<String>>,
    height: f32,
}

impl Table {
    fn column_width(&self) -> f32 {
        TABLE_WIDTH / self.head.len().max(1) as f32
    }

    fn row<S: AsRef<str>>(&self, cells: &[S]) -> Row {
        let inner = self.column_width() - 2.0 * CELL_PADDING;
        let cells: Vec<Vec<String>> = cells
            .iter()
            .map(|cell| wrap(cell.as_ref(), inner, self.font_size))
            .collect();
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1);
        Row {
            cells,
            height: lines as f32 * self.font_size * PT_TO_MM * LINE_HEIGHT + 2.0 * CELL_PADDING,
        }
    }
}

struct Composer {
    pages: Vec<Page>,
    y: f32,
}

impl Composer {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: TOP,
        }
    }

    fn page(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.y = TOP;
    }

    fn break_past(&mut self, limit: f32) {
        if self.y > limit {
            self.add_page();
        }
    }

    fn text(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        align: Align,
        color: Rgb,
    ) {
        self.page().elements.push(Element::Text(TextRun {
            text: text.into(),
            x,
            y,
            size,
            style,
            align,
            color,
        }));
    }

    fn centered(&mut self, text: impl Into<String>, y: f32, size: f32, style: FontStyle) {
        self.text(text, PAGE_WIDTH / 2.0, y, size, style, Align::Center, BLACK);
    }

    fn heading(&mut self, text: &str) {
        let y = self.y;
        self.text(text, MARGIN, y, HEADING_SIZE, FontStyle::Bold, Align::Left, BLACK);
        self.y += 10.0;
    }

    fn placeholder(&mut self, text: &str) {
        let y = self.y;
        self.text(text, MARGIN, y, BODY_SIZE, FontStyle::Italic, Align::Left, BLACK);
        self.y += 15.0;
    }

    /// Draw `table` at the cursor, continuing on new pages with the header
    /// repeated. Leaves the cursor 15 mm below the last row.
    fn table(&mut self, table: &Table) {
        let bottom = PAGE_HEIGHT - MARGIN;
        let head = table.row(table.head);
        let body: Vec<Row> = table.body.iter().map(|cells| table.row(cells)).collect();

        let mut y = self.y;
        let first = body.first().map_or(0.0, |row| row.height);
        if y + head.height + first > bottom {
            self.pages.push(Page::default());
            y = MARGIN;
        }
        self.draw_row(table, &head, y, None);
        y += head.height;

        for (idx, row) in body.iter().enumerate() {
            if y + row.height > bottom {
                self.pages.push(Page::default());
                y = MARGIN;
                self.draw_row(table, &head, y, None);
                y += head.height;
            }
            self.draw_row(table, row, y, Some(idx));
            y += row.height;
        }

        self.y = y + 15.0;
    }

    /// `body_index` is `None` for the header row.
    fn draw_row(&mut self, table: &Table, row: &Row, y: f32, body_index: Option<usize>) {
        let width = table.column_width();
        let line = table.font_size * PT_TO_MM * LINE_HEIGHT;
        let ascent = table.font_size * PT_TO_MM * 0.8;

        let (fill, style, color) = match body_index {
            None => (Some(HEADER_FILL), FontStyle::Bold, WHITE),
            Some(idx) if table.theme == Theme::Striped && idx % 2 == 0 => {
                (Some(STRIPE_FILL), FontStyle::Normal, BODY_TEXT)
            }
            Some(_) => (None, FontStyle::Normal, BODY_TEXT),
        };
        let stroke = (table.theme == Theme::Grid).then_some(GRID_LINE);

        for (col, lines) in row.cells.iter().enumerate() {
            let x = MARGIN + col as f32 * width;
            if fill.is_some() || stroke.is_some() {
                self.page().elements.push(Element::Block(Block {
                    x,
                    y,
                    width,
                    height: row.height,
                    fill,
                    stroke,
                }));
            }
            for (n, text) in lines.iter().enumerate() {
                let baseline = y + CELL_PADDING + ascent + n as f32 * line;
                self.text(
                    text.clone(),
                    x + CELL_PADDING,
                    baseline,
                    table.font_size,
                    style,
                    Align::Left,
                    color,
                );
            }
        }
    }

    fn footers(&mut self) {
        let total = self.pages.len();
        for (idx, page) in self.pages.iter_mut().enumerate() {
            page.elements.push(Element::Text(TextRun {
                text: format!("Page {} of {total}", idx + 1),
                x: PAGE_WIDTH / 2.0,
                y: FOOTER_Y,
                size: FOOTER_SIZE,
                style: FontStyle::Normal,
                align: Align::Center,
                color: BLACK,
            }));
        }
    }
}

/// Lay out the whole report.
///
/// `generated` is the already formatted generation time; dates in the
/// tables are shown in the time zone of `generated_at`.
pub fn compose<Tz>(
    snapshot: &ReportSnapshot,
    currency: Currency,
    generated: &str,
    generated_at: &DateTime<Tz>,
) -> Document
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let money = |amount: i64| Money::new(amount, currency).report_label();
    let tz = generated_at.timezone();
    let mut c = Composer::new();

    let y = c.y;
    c.centered("Financial Report", y, TITLE_SIZE, FontStyle::Bold);
    c.y += 15.0;
    let y = c.y;
    c.centered(format!("Generated: {generated}"), y, BODY_SIZE, FontStyle::Normal);
    c.centered(
        format!("User: {} ({})", snapshot.user.name, snapshot.user.email),
        y + 5.0,
        BODY_SIZE,
        FontStyle::Normal,
    );
    c.y += 20.0;

    let summary = &snapshot.summary;
    c.heading("Financial Summary");
    c.table(&Table {
        head: &["Metric", "Value"],
        body: vec![
            vec!["Total Income".to_string(), money(summary.total_income)],
            vec!["Total Expenses".to_string(), money(summary.total_expenses)],
            vec!["Net Savings".to_string(), money(summary.net_savings)],
            vec![
                "Total Transactions".to_string(),
                summary.transaction_count.to_string(),
            ],
        ],
        theme: Theme::Grid,
        font_size: BODY_SIZE,
    });

    c.heading("Category Breakdown");
    if !snapshot.category_breakdown.is_empty() {
        c.table(&Table {
            head: &["Category", "Total Spent"],
            body: snapshot
                .category_breakdown
                .iter()
                .map(|entry| vec![entry.category.clone(), money(entry.total)])
                .collect(),
            theme: Theme::Striped,
            font_size: BODY_SIZE,
        });
    }

    c.break_past(SECTION_BREAK_Y);
    c.heading("Budgets");
    if snapshot.budgets.is_empty() {
        c.placeholder("No budgets set");
    } else {
        c.table(&Table {
            head: &["Category", "Limit", "Spent", "Period", "Usage"],
            body: snapshot
                .budgets
                .iter()
                .map(|budget| {
                    vec![
                        budget.category.clone(),
                        money(budget.limit),
                        money(budget.spent),
                        budget.period.as_str().to_string(),
                        format!("{:.1}%", budget.usage()),
                    ]
                })
                .collect(),
            theme: Theme::Grid,
            font_size: BODY_SIZE,
        });
    }

    c.break_past(SECTION_BREAK_Y);
    c.heading("Goals");
    if snapshot.goals.is_empty() {
        c.placeholder("No goals set");
    } else {
        c.table(&Table {
            head: &["Name", "Target", "Current", "Deadline", "Progress"],
            body: snapshot
                .goals
                .iter()
                .map(|goal| {
                    vec![
                        goal.name.clone(),
                        money(goal.target_amount),
                        money(goal.current_amount),
                        goal.deadline.format("%-m/%-d/%Y").to_string(),
                        format!("{:.1}%", goal.progress()),
                    ]
                })
                .collect(),
            theme: Theme::Grid,
            font_size: BODY_SIZE,
        });
    }

    if c.y > TRANSACTIONS_BREAK_Y || snapshot.transactions.len() > TRANSACTIONS_INLINE_MAX {
        c.add_page();
    }
    c.heading("Recent Transactions");
    if snapshot.transactions.is_empty() {
        c.placeholder("No transactions found");
    } else {
        c.table(&Table {
            head: &["Date", "Type", "Category", "Description", "Amount"],
            body: snapshot
                .transactions
                .iter()
                .take(TRANSACTION_ROWS)
                .map(|tx| {
                    vec![
                        tx.date.with_timezone(&tz).format("%-m/%-d/%Y").to_string(),
                        tx.kind.as_str().to_string(),
                        tx.category.clone(),
                        tx.description.clone(),
                        money(tx.amount),
                    ]
                })
                .collect(),
            theme: Theme::Striped,
            font_size: TRANSACTION_SIZE,
        });
    }

    c.footers();
    Document {
        title: "Financial Report".to_string(),
        pages: c.pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap("Lunch at work", 50.0, 10.0), vec!["Lunch at work"]);
        assert_eq!(wrap("", 50.0, 10.0), vec![""]);
    }

    #[test]
    fn wrap_breaks_on_words_and_splits_long_words() {
        // 10pt glyphs are ~1.76 mm wide, so 10 mm holds 5 characters.
        assert_eq!(wrap("ab cd ef", 10.0, 10.0), vec!["ab cd", "ef"]);
        assert_eq!(wrap("abcdefghijk", 10.0, 10.0), vec!["abcde", "fghij", "k"]);
    }

    #[test]
    fn centered_text_is_shifted_by_half_its_width() {
        let run = TextRun {
            text: "abcd".to_string(),
            x: 100.0,
            y: 10.0,
            size: 10.0,
            style: FontStyle::Normal,
            align: Align::Center,
            color: BLACK,
        };
        let width = text_width("abcd", 10.0);
        assert!((run.left() - (100.0 - width / 2.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn long_tables_continue_with_repeated_header() {
        let mut c = Composer::new();
        let table = Table {
            head: &["Metric", "Value"],
            body: (0..80).map(|i| vec![format!("row {i}"), i.to_string()]).collect(),
            theme: Theme::Grid,
            font_size: BODY_SIZE,
        };
        c.table(&table);
        assert!(c.pages.len() > 1);
        for page in &c.pages {
            assert!(page.contains("Metric"));
            for run in page.texts() {
                assert!(run.y <= PAGE_HEIGHT - MARGIN);
            }
        }
        let rows: usize = c
            .pages
            .iter()
            .map(|p| p.texts().filter(|r| r.text.starts_with("row ")).count())
            .sum();
        assert_eq!(rows, 80);
    }
}
