//! Newton-Raphson on f(x) = x·atan(x/2) + ln(x² + 4) − 3

use rootsheets_core::Workbook;

use crate::config::GeneratorConfig;
use crate::descriptor::{ColumnSpec, Fallback, MethodSheet, Rule};
use crate::error::Result;
use crate::layout::{Col, RowRefs};
use crate::unroll::unroll;

/// Worksheet layout for Newton-Raphson
pub static NEWTON_RAPHSON: MethodSheet = MethodSheet {
    name: "Newton-Raphson",
    columns: &[
        ColumnSpec {
            header: "Iter",
            rule: Rule::Counter,
        },
        ColumnSpec {
            header: "x_n",
            rule: Rule::Recurrence {
                seed: 1.5,
                next: previous_next_iterate,
            },
        },
        ColumnSpec {
            header: "f(x_n)",
            rule: Rule::Derived(f),
        },
        ColumnSpec {
            header: "f'(x_n)",
            rule: Rule::Derived(df),
        },
        ColumnSpec {
            header: "x_{n+1}",
            rule: Rule::Step {
                fallback: Fallback::ZeroDivisor {
                    divisor: Col::D,
                    hold: Col::B,
                },
                update: newton_step,
            },
        },
        ColumnSpec {
            header: "Error",
            rule: Rule::Derived(error),
        },
        ColumnSpec {
            header: "Condicion",
            rule: Rule::Flag { error: Col::F },
        },
    ],
};

/// Append the `Newton-Raphson` sheet
pub fn build(workbook: &mut Workbook, config: &GeneratorConfig) -> Result<usize> {
    unroll(workbook, &NEWTON_RAPHSON, config)
}

fn previous_next_iterate(refs: &RowRefs) -> String {
    refs.prev(Col::E)
}

fn f(refs: &RowRefs) -> String {
    let x = refs.cur(Col::B);
    format!("{x}*ATAN({x}/2)+LN({x}^2+4)-3")
}

fn df(refs: &RowRefs) -> String {
    let x = refs.cur(Col::B);
    format!("ATAN({x}/2)+{x}/(2*(1+({x}/2)^2))+2*{x}/({x}^2+4)")
}

fn newton_step(refs: &RowRefs) -> String {
    format!(
        "{}-{}/{}",
        refs.cur(Col::B),
        refs.cur(Col::C),
        refs.cur(Col::D)
    )
}

fn error(refs: &RowRefs) -> String {
    format!("ABS({}-{})", refs.cur(Col::E), refs.cur(Col::B))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rows() {
        let mut wb = Workbook::empty();
        build(&mut wb, &GeneratorConfig::default()).unwrap();
        let ws = wb.worksheet(0).unwrap();

        assert_eq!(ws.name(), "Newton-Raphson");
        assert_eq!(ws.get_value("B6").unwrap().as_number(), Some(1.5));
        assert_eq!(
            ws.get_formula_at(5, 2),
            Some("=B6*ATAN(B6/2)+LN(B6^2+4)-3")
        );
        assert_eq!(
            ws.get_formula_at(5, 3),
            Some("=ATAN(B6/2)+B6/(2*(1+(B6/2)^2))+2*B6/(B6^2+4)")
        );
        assert_eq!(ws.get_formula_at(5, 4), Some("=IF(D6=0,B6,B6-C6/D6)"));
        assert_eq!(ws.get_formula_at(5, 5), Some("=ABS(E6-B6)"));
        assert_eq!(
            ws.get_formula_at(5, 6),
            Some("=IF(F6<=$B$1,\"Cumple\",\"Continuar\")")
        );

        assert_eq!(ws.get_formula_at(6, 1), Some("=E6"));
        assert_eq!(ws.get_formula_at(6, 4), Some("=IF(D7=0,B7,B7-C7/D7)"));
    }
}
