//! Prelude module - common imports for rootsheets users
//!
//! ```rust
//! use rootsheets::prelude::*;
//! ```

pub use crate::{
    // Generator
    build_workbook,
    generate,
    CellAddress,
    // Cell types
    CellValue,
    Col,
    ColumnSpec,
    // Error types
    Error,
    Fallback,
    GeneratorConfig,
    HorizontalAlignment,
    MethodSheet,
    Result,
    Rule,
    Style,
    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,

    // I/O types
    XlsxReader,
    XlsxWriter,
};
