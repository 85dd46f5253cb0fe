//! PDF rendering of a [`ReportSnapshot`].
//!
//! Rendering happens in two steps: [`layout::compose`] places every element on
//! A4 pages (including the "Page i of N" footers, added once the page count
//! is known) and [`render`] encodes the result.

use std::fmt;

use chrono::{DateTime, TimeZone};
use engine::{Currency, ReportSnapshot};

pub use error::ReportError;

mod error;
pub mod layout;
mod pdf;

const GENERATED_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Lay out the report generated at `generated_at`.
pub fn compose<Tz>(
    snapshot: &ReportSnapshot,
    currency: Currency,
    generated_at: &DateTime<Tz>,
) -> layout::Document
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let generated = generated_at.format(GENERATED_FORMAT).to_string();
    layout::compose(snapshot, currency, &generated, generated_at)
}

/// Render the report to PDF bytes.
pub fn render<Tz>(
    snapshot: &ReportSnapshot,
    currency: Currency,
    generated_at: &DateTime<Tz>,
) -> Result<Vec<u8>, ReportError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let document = compose(snapshot, currency, generated_at);
    let bytes = pdf::encode(&document)?;
    if bytes.is_empty() {
        return Err(ReportError::EmptyOutput);
    }
    tracing::debug!(
        user = %snapshot.user.username,
        pages = document.pages.len(),
        bytes = bytes.len(),
        "report rendered"
    );
    Ok(bytes)
}

/// Attachment name, e.g. `financial-report-2026-10-19-14-03-27.pdf`.
pub fn file_name<Tz>(generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!(
        "financial-report-{}.pdf",
        generated_at.format("%Y-%m-%d-%H-%M-%S")
    )
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};

    use super::*;

    #[test]
    fn file_name_uses_local_time() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 23, 5, 9).unwrap();
        assert_eq!(file_name(&at), "financial-report-2026-10-19-23-05-09.pdf");

        let lagos = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(
            file_name(&at.with_timezone(&lagos)),
            "financial-report-2026-10-20-00-05-09.pdf"
        );
    }
}
