//! Error types for the generator

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or persisting a workbook
#[derive(Debug, Error)]
pub enum Error {
    /// Workbook model error
    #[error(transparent)]
    Core(#[from] rootsheets_core::Error),

    /// XLSX read/write error
    #[error(transparent)]
    Xlsx(#[from] rootsheets_xlsx::XlsxError),

    /// File extension with no reader/writer
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
