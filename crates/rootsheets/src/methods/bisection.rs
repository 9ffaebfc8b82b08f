//! Bisection on f(x) = eˣ − cos x over [−1, 1]

use rootsheets_core::Workbook;

use crate::config::GeneratorConfig;
use crate::descriptor::{ColumnSpec, MethodSheet, Rule};
use crate::error::Result;
use crate::layout::{Col, RowRefs};
use crate::unroll::unroll;

/// Worksheet layout for bisection
pub static BISECTION: MethodSheet = MethodSheet {
    name: "Biseccion",
    columns: &[
        ColumnSpec {
            header: "Iter",
            rule: Rule::Counter,
        },
        ColumnSpec {
            header: "a",
            rule: Rule::Recurrence {
                seed: -1.0,
                next: next_a,
            },
        },
        ColumnSpec {
            header: "b",
            rule: Rule::Recurrence {
                seed: 1.0,
                next: next_b,
            },
        },
        ColumnSpec {
            header: "f(a)",
            rule: Rule::Derived(f_a),
        },
        ColumnSpec {
            header: "f(b)",
            rule: Rule::Derived(f_b),
        },
        ColumnSpec {
            header: "m",
            rule: Rule::Derived(midpoint),
        },
        ColumnSpec {
            header: "f(m)",
            rule: Rule::Derived(f_m),
        },
        ColumnSpec {
            header: "Intervalo",
            rule: Rule::Derived(width),
        },
        ColumnSpec {
            header: "Error",
            rule: Rule::Derived(half_width),
        },
        ColumnSpec {
            header: "Condicion",
            rule: Rule::Flag { error: Col::I },
        },
    ],
};

/// Append the `Biseccion` sheet
pub fn build(workbook: &mut Workbook, config: &GeneratorConfig) -> Result<usize> {
    unroll(workbook, &BISECTION, config)
}

fn f(x: &str) -> String {
    format!("EXP({x})-COS({x})")
}

/// Keep the previous endpoint once the previous row converged, otherwise
/// take `update`
fn hold_if_converged(refs: &RowRefs, endpoint: Col, update: String) -> String {
    format!(
        "IF(OR(ABS({fm})<={tol},{err}<={tol}),{keep},{update})",
        fm = refs.prev(Col::G),
        err = refs.prev(Col::I),
        tol = refs.tol(),
        keep = refs.prev(endpoint),
    )
}

/// The endpoint whose value shares the midpoint's sign is replaced by m
fn next_a(refs: &RowRefs) -> String {
    let update = format!(
        "IF({}*{}<0,{},{})",
        refs.prev(Col::D),
        refs.prev(Col::G),
        refs.prev(Col::B),
        refs.prev(Col::F)
    );
    hold_if_converged(refs, Col::B, update)
}

fn next_b(refs: &RowRefs) -> String {
    let update = format!(
        "IF({}*{}<0,{},{})",
        refs.prev(Col::D),
        refs.prev(Col::G),
        refs.prev(Col::F),
        refs.prev(Col::C)
    );
    hold_if_converged(refs, Col::C, update)
}

fn f_a(refs: &RowRefs) -> String {
    f(&refs.cur(Col::B))
}

fn f_b(refs: &RowRefs) -> String {
    f(&refs.cur(Col::C))
}

fn midpoint(refs: &RowRefs) -> String {
    format!("({}+{})/2", refs.cur(Col::B), refs.cur(Col::C))
}

fn f_m(refs: &RowRefs) -> String {
    f(&refs.cur(Col::F))
}

fn width(refs: &RowRefs) -> String {
    format!("{}-{}", refs.cur(Col::C), refs.cur(Col::B))
}

fn half_width(refs: &RowRefs) -> String {
    format!("ABS({})/2", refs.cur(Col::H))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet() -> Workbook {
        let mut wb = Workbook::empty();
        build(&mut wb, &GeneratorConfig::default()).unwrap();
        wb
    }

    #[test]
    fn test_headers() {
        assert_eq!(
            BISECTION.headers(),
            vec!["Iter", "a", "b", "f(a)", "f(b)", "m", "f(m)", "Intervalo", "Error", "Condicion"]
        );
    }

    #[test]
    fn test_seed_row() {
        let wb = sheet();
        let ws = wb.worksheet_by_name("Biseccion").unwrap();
        assert_eq!(ws.get_value("B6").unwrap().as_number(), Some(-1.0));
        assert_eq!(ws.get_value("C6").unwrap().as_number(), Some(1.0));
        assert_eq!(ws.get_formula_at(5, 3), Some("=EXP(B6)-COS(B6)"));
        assert_eq!(ws.get_formula_at(5, 5), Some("=(B6+C6)/2"));
        assert_eq!(ws.get_formula_at(5, 6), Some("=EXP(F6)-COS(F6)"));
        assert_eq!(ws.get_formula_at(5, 7), Some("=C6-B6"));
        assert_eq!(ws.get_formula_at(5, 8), Some("=ABS(H6)/2"));
        assert_eq!(
            ws.get_formula_at(5, 9),
            Some("=IF(I6<=$B$1,\"Cumple\",\"Continuar\")")
        );
    }

    #[test]
    fn test_bracket_update() {
        let wb = sheet();
        let ws = wb.worksheet_by_name("Biseccion").unwrap();
        assert_eq!(
            ws.get_formula_at(6, 1),
            Some("=IF(OR(ABS(G6)<=$B$1,I6<=$B$1),B6,IF(D6*G6<0,B6,F6))")
        );
        assert_eq!(
            ws.get_formula_at(6, 2),
            Some("=IF(OR(ABS(G6)<=$B$1,I6<=$B$1),C6,IF(D6*G6<0,F6,C6))")
        );
        assert_eq!(ws.get_formula_at(6, 0), Some("=A6+1"));
    }
}
