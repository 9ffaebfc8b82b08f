//! Fixed sheet layout shared by every method
//!
//! ```text
//! row 1   Tolerancia | <tolerance>
//! row 5   column headers (bold, centered)
//! row 6   seed row, counter 0
//! row 7+  one row per iteration, each built from the row above
//! ```
//!
//! Panes are frozen at `A6` so the header stays visible.

use rootsheets_core::CellAddress;

/// Label written to `A1`
pub const TOLERANCE_LABEL: &str = "Tolerancia";

/// Cell holding the tolerance label
pub const TOLERANCE_LABEL_CELL: CellAddress = CellAddress::new(0, 0);

/// Cell holding the tolerance value, absolute so formulas render `$B$1`
pub const TOLERANCE_CELL: CellAddress = CellAddress::absolute(0, 1);

/// Header row (0-based, row 5 in the sheet)
pub const HEADER_ROW: u32 = 4;

/// Seed row (0-based, row 6 in the sheet); also the first unfrozen row
pub const FIRST_DATA_ROW: u32 = 5;

/// Convergence label when the error is within tolerance
pub const FLAG_CONVERGED: &str = "Cumple";

/// Convergence label otherwise
pub const FLAG_CONTINUE: &str = "Continuar";

/// Worksheet columns used by the method descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Col {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
}

impl Col {
    /// 0-based column index
    pub const fn index(self) -> u16 {
        self as u16
    }
}

/// Renders A1 references relative to the row being written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRefs {
    row: u32,
}

impl RowRefs {
    /// References for a 0-based row
    pub fn new(row: u32) -> Self {
        Self { row }
    }

    /// The 0-based row being written
    pub fn row(&self) -> u32 {
        self.row
    }

    /// A column in the current row, e.g. `B7`
    pub fn cur(&self, col: Col) -> String {
        self.cur_at(col.index())
    }

    /// A column in the previous row, e.g. `B6`
    pub fn prev(&self, col: Col) -> String {
        self.prev_at(col.index())
    }

    /// The tolerance cell, `$B$1`
    pub fn tol(&self) -> String {
        TOLERANCE_CELL.to_string()
    }

    pub(crate) fn cur_at(&self, col: u16) -> String {
        CellAddress::new(self.row, col).to_string()
    }

    pub(crate) fn prev_at(&self, col: u16) -> String {
        CellAddress::new(self.row.saturating_sub(1), col).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_refs() {
        let refs = RowRefs::new(6);
        assert_eq!(refs.cur(Col::B), "B7");
        assert_eq!(refs.prev(Col::J), "J6");
        assert_eq!(refs.tol(), "$B$1");
    }

    #[test]
    fn test_layout_cells() {
        assert_eq!(TOLERANCE_LABEL_CELL.to_string(), "A1");
        assert_eq!(TOLERANCE_CELL.to_relative().to_string(), "B1");
        assert_eq!(Col::J.index(), 9);
    }
}
