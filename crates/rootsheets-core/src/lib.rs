//! # rootsheets-core
//!
//! In-memory workbook model used by the rootsheets generator.
//!
//! - [`CellAddress`] / [`CellRange`] - A1 coordinates
//! - [`CellValue`] - numbers, labels and formula text
//! - [`Style`] - the bold / alignment subset of cell formatting
//! - [`Worksheet`] and [`Workbook`] - the document structure
//!
//! ## Example
//!
//! ```rust
//! use rootsheets_core::{Workbook, Style, HorizontalAlignment};
//!
//! let mut workbook = Workbook::empty();
//! let idx = workbook.add_worksheet_with_name("Demo").unwrap();
//! let sheet = workbook.worksheet_mut(idx).unwrap();
//!
//! sheet.set_cell_value("A1", "Tolerancia").unwrap();
//! sheet.set_cell_value("B1", 1e-6).unwrap();
//! sheet.set_cell_formula("C1", "=B1*2").unwrap();
//!
//! let header = Style::new().bold(true).horizontal_alignment(HorizontalAlignment::Center);
//! sheet.set_cell_style("A1", &header).unwrap();
//! sheet.set_freeze_panes(1, 0);
//! ```

pub mod cell;
pub mod error;
pub mod style;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellData, CellRange, CellValue, SharedString};
pub use error::{Error, Result};
pub use style::{Alignment, FontStyle, HorizontalAlignment, Style, StylePool};
pub use workbook::{Workbook, DEFAULT_SHEET_NAME};
pub use worksheet::{FreezePanes, Worksheet};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
