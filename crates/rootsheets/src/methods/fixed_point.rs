//! Fixed-point iteration with g(x) = √((10 − x³)/4)

use rootsheets_core::Workbook;

use crate::config::GeneratorConfig;
use crate::descriptor::{ColumnSpec, MethodSheet, Rule};
use crate::error::Result;
use crate::layout::{Col, RowRefs};
use crate::unroll::unroll;

/// Worksheet layout for fixed-point iteration
pub static FIXED_POINT: MethodSheet = MethodSheet {
    name: "Punto Fijo",
    columns: &[
        ColumnSpec {
            header: "Iter",
            rule: Rule::Counter,
        },
        ColumnSpec {
            header: "x_n",
            rule: Rule::Recurrence {
                seed: 1.0,
                next: previous_image,
            },
        },
        ColumnSpec {
            header: "g(x_n)",
            rule: Rule::Derived(g),
        },
        ColumnSpec {
            header: "Error",
            rule: Rule::Derived(error),
        },
        ColumnSpec {
            header: "Condicion",
            rule: Rule::Flag { error: Col::D },
        },
    ],
};

/// Append the `Punto Fijo` sheet
pub fn build(workbook: &mut Workbook, config: &GeneratorConfig) -> Result<usize> {
    unroll(workbook, &FIXED_POINT, config)
}

fn previous_image(refs: &RowRefs) -> String {
    refs.prev(Col::C)
}

fn g(refs: &RowRefs) -> String {
    format!("SQRT((10-{}^3)/4)", refs.cur(Col::B))
}

fn error(refs: &RowRefs) -> String {
    format!("ABS({}-{})", refs.cur(Col::C), refs.cur(Col::B))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows() {
        let mut wb = Workbook::empty();
        let config = GeneratorConfig::new().with_iterations(2);
        build(&mut wb, &config).unwrap();
        let ws = wb.worksheet(0).unwrap();

        assert_eq!(ws.get_value("B6").unwrap().as_number(), Some(1.0));
        assert_eq!(ws.get_formula_at(5, 2), Some("=SQRT((10-B6^3)/4)"));
        assert_eq!(ws.get_formula_at(5, 3), Some("=ABS(C6-B6)"));
        assert_eq!(ws.get_formula_at(6, 1), Some("=C6"));
        assert_eq!(
            ws.get_formula_at(6, 4),
            Some("=IF(D7<=$B$1,\"Cumple\",\"Continuar\")")
        );
        assert!(ws.cell_at(7, 0).is_none());
    }
}
