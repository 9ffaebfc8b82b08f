//! # rootsheets-xlsx
//!
//! XLSX (Office Open XML) writer and reader for rootsheets workbooks.
//!
//! The writer emits formulas as text with no cached results, so the
//! spreadsheet application computes every value when the file is opened.

pub mod error;
pub mod reader;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
