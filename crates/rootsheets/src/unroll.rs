//! Turns a [`MethodSheet`] into a populated worksheet

use rootsheets_core::{HorizontalAlignment, Style, Workbook, Worksheet};

use crate::config::GeneratorConfig;
use crate::descriptor::MethodSheet;
use crate::error::Result;
use crate::layout::{
    RowRefs, FIRST_DATA_ROW, HEADER_ROW, TOLERANCE_CELL, TOLERANCE_LABEL, TOLERANCE_LABEL_CELL,
};

/// Bold, centered header cells
pub fn header_style() -> Style {
    Style::new()
        .bold(true)
        .horizontal_alignment(HorizontalAlignment::Center)
}

/// Write `headers` left to right starting at (`row`, `start_col`), styled
/// with [`header_style`]
pub fn write_headers(
    sheet: &mut Worksheet,
    row: u32,
    start_col: u16,
    headers: &[&str],
) -> Result<()> {
    let style = header_style();
    for (col, header) in (start_col..).zip(headers) {
        sheet.set_cell_value_at(row, col, *header)?;
        sheet.set_cell_style_at(row, col, &style)?;
    }
    Ok(())
}

/// Append a sheet for `method` to `workbook` and fill it, returning the
/// new sheet's index.
///
/// The seed row gets the literal starting values; every later row is
/// rendered from the column templates with references to the row above.
pub fn unroll(
    workbook: &mut Workbook,
    method: &MethodSheet,
    config: &GeneratorConfig,
) -> Result<usize> {
    let index = workbook.add_worksheet_with_name(method.name)?;
    let count = workbook.sheet_count();
    let sheet = workbook
        .worksheet_mut(index)
        .ok_or(rootsheets_core::Error::SheetOutOfBounds(index, count))?;

    sheet.set_cell_value_at(
        TOLERANCE_LABEL_CELL.row,
        TOLERANCE_LABEL_CELL.col,
        TOLERANCE_LABEL,
    )?;
    sheet.set_cell_value_at(TOLERANCE_CELL.row, TOLERANCE_CELL.col, config.tolerance)?;

    write_headers(sheet, HEADER_ROW, 0, &method.headers())?;

    for i in 0..config.iterations {
        let refs = RowRefs::new(FIRST_DATA_ROW + i);
        for (col, spec) in (0u16..).zip(method.columns) {
            let value = spec.rule.render(&refs, col, i == 0);
            sheet.set_cell_value_at(refs.row(), col, value)?;
        }
    }

    sheet.set_freeze_panes(FIRST_DATA_ROW, 0);

    log::info!(
        "built sheet '{}' ({} columns, {} rows)",
        method.name,
        method.columns.len(),
        config.iterations
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ColumnSpec, Rule};
    use crate::layout::Col;
    use pretty_assertions::assert_eq;

    fn halve(refs: &RowRefs) -> String {
        format!("{}/2", refs.prev(Col::B))
    }

    fn error(refs: &RowRefs) -> String {
        format!("ABS({})", refs.cur(Col::B))
    }

    const HALVING: MethodSheet = MethodSheet {
        name: "Halving",
        columns: &[
            ColumnSpec {
                header: "Iter",
                rule: Rule::Counter,
            },
            ColumnSpec {
                header: "x",
                rule: Rule::Recurrence {
                    seed: 8.0,
                    next: halve,
                },
            },
            ColumnSpec {
                header: "Error",
                rule: Rule::Derived(error),
            },
            ColumnSpec {
                header: "Condicion",
                rule: Rule::Flag { error: Col::C },
            },
        ],
    };

    #[test]
    fn test_write_headers() {
        let mut sheet = Worksheet::new("Test");
        write_headers(&mut sheet, 4, 1, &["a", "b"]).unwrap();

        assert_eq!(sheet.get_value("B5").unwrap().as_string(), Some("a"));
        assert_eq!(sheet.get_value("C5").unwrap().as_string(), Some("b"));
        assert_eq!(sheet.cell_style("C5").unwrap(), Some(&header_style()));
        assert!(sheet.cell_at(4, 0).is_none());
    }

    #[test]
    fn test_unroll_layout() {
        let mut wb = Workbook::empty();
        let config = GeneratorConfig::new().with_iterations(3);
        let idx = unroll(&mut wb, &HALVING, &config).unwrap();
        assert_eq!(wb.sheet_count(), idx + 1);
        let sheet = wb.worksheet(idx).unwrap();

        assert_eq!(sheet.name(), "Halving");
        assert_eq!(sheet.get_value("A1").unwrap().as_string(), Some("Tolerancia"));
        assert_eq!(sheet.get_value("B1").unwrap().as_number(), Some(1e-6));
        assert_eq!(sheet.get_value("D5").unwrap().as_string(), Some("Condicion"));

        assert_eq!(sheet.get_value("A6").unwrap().as_number(), Some(0.0));
        assert_eq!(sheet.get_value("B6").unwrap().as_number(), Some(8.0));
        assert_eq!(sheet.get_formula_at(5, 2), Some("=ABS(B6)"));
        assert_eq!(sheet.get_formula_at(7, 0), Some("=A7+1"));
        assert_eq!(sheet.get_formula_at(7, 1), Some("=B7/2"));

        assert_eq!(sheet.used_range().unwrap().to_string(), "A1:D8");
        assert_eq!(sheet.freeze_panes().unwrap().top_left_cell().to_string(), "A6");
    }

    #[test]
    fn test_unroll_rejects_duplicate_sheet() {
        let mut wb = Workbook::empty();
        let config = GeneratorConfig::default();
        unroll(&mut wb, &HALVING, &config).unwrap();
        assert!(unroll(&mut wb, &HALVING, &config).is_err());
    }
}
