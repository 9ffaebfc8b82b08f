//! # rootsheets
//!
//! Generates an XLSX workbook that teaches four classical root-finding
//! methods (bisection, Newton-Raphson, secant, fixed-point iteration) by
//! unrolling each one into a fixed grid of spreadsheet formulas. Nothing is
//! computed here; the spreadsheet application evaluates every cell when the
//! file is opened.
//!
//! Each method is a declarative [`MethodSheet`]: a list of columns whose
//! [`Rule`] says what the seed row holds and how every later row is derived
//! from the one above it. [`unroll`] turns any descriptor into a worksheet.
//!
//! ## Example
//!
//! ```rust
//! use rootsheets::prelude::*;
//!
//! let config = GeneratorConfig::default().with_iterations(10);
//! let workbook = build_workbook(&config).unwrap();
//!
//! assert_eq!(
//!     workbook.sheet_names(),
//!     vec!["Biseccion", "Newton-Raphson", "Secante", "Punto Fijo"]
//! );
//!
//! let newton = workbook.worksheet_by_name("Newton-Raphson").unwrap();
//! assert_eq!(newton.get_formula_at(6, 1), Some("=E6"));
//!
//! // workbook.save("metodos_numericos.xlsx").unwrap();
//! ```

pub mod assembler;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod layout;
pub mod methods;
pub mod prelude;
pub mod unroll;

pub use assembler::{build_workbook, generate};
pub use config::{GeneratorConfig, DEFAULT_ITERATIONS, DEFAULT_OUTPUT, DEFAULT_TOLERANCE};
pub use descriptor::{ColumnSpec, Fallback, MethodSheet, Rule, Template};
pub use error::{Error, Result};
pub use layout::{Col, RowRefs};
pub use unroll::{header_style, unroll, write_headers};

// Re-export the workbook model and the XLSX collaborator
pub use rootsheets_core::{
    CellAddress, CellRange, CellValue, FreezePanes, HorizontalAlignment, Style, Workbook,
    Worksheet,
};
pub use rootsheets_xlsx::{XlsxError, XlsxReader, XlsxWriter};

use std::path::Path;

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt {
    /// Open a workbook from a file
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook>;

    /// Save the workbook to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

fn is_xlsx(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"))
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        let path = path.as_ref();
        if !is_xlsx(path) {
            return Err(Error::UnsupportedFormat(path.to_path_buf()));
        }
        Ok(XlsxReader::read_file(path)?)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !is_xlsx(path) {
            return Err(Error::UnsupportedFormat(path.to_path_buf()));
        }
        XlsxWriter::write_file(self, path)?;
        log::info!("saved {} sheets to {}", self.sheet_count(), path.display());
        Ok(())
    }
}
