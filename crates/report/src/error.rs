use thiserror::Error;

/// Report generation errors.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The snapshot could not be assembled for the requesting user.
    #[error("No data available for report")]
    NoData,
    #[error("Failed to generate PDF")]
    EmptyOutput,
    #[error("pdf encoding failed: {0}")]
    Pdf(#[from] printpdf::Error),
}
