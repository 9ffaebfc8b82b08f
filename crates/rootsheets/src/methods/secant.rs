//! Secant method on f(x) = 0.5 + x²/4 − x·sin x − cos(2x)/2

use rootsheets_core::Workbook;

use crate::config::GeneratorConfig;
use crate::descriptor::{ColumnSpec, Fallback, MethodSheet, Rule};
use crate::error::Result;
use crate::layout::{Col, RowRefs};
use crate::unroll::unroll;

/// Worksheet layout for the secant method
pub static SECANT: MethodSheet = MethodSheet {
    name: "Secante",
    columns: &[
        ColumnSpec {
            header: "Iter",
            rule: Rule::Counter,
        },
        ColumnSpec {
            header: "x_{n-1}",
            rule: Rule::Recurrence {
                seed: 0.5,
                next: shift_current,
            },
        },
        ColumnSpec {
            header: "x_n",
            rule: Rule::Recurrence {
                seed: 1.0,
                next: shift_next,
            },
        },
        ColumnSpec {
            header: "f(x_{n-1})",
            rule: Rule::Derived(f_previous),
        },
        ColumnSpec {
            header: "f(x_n)",
            rule: Rule::Derived(f_current),
        },
        ColumnSpec {
            header: "x_{n+1}",
            rule: Rule::Step {
                fallback: Fallback::EqualValues {
                    left: Col::E,
                    right: Col::D,
                    hold: Col::C,
                },
                update: secant_step,
            },
        },
        ColumnSpec {
            header: "Error",
            rule: Rule::Derived(error),
        },
        ColumnSpec {
            header: "Condicion",
            rule: Rule::Flag { error: Col::G },
        },
    ],
};

/// Append the `Secante` sheet
pub fn build(workbook: &mut Workbook, config: &GeneratorConfig) -> Result<usize> {
    unroll(workbook, &SECANT, config)
}

fn f(x: &str) -> String {
    format!("0.5+0.25*{x}^2-{x}*SIN({x})-0.5*COS(2*{x})")
}

fn shift_current(refs: &RowRefs) -> String {
    refs.prev(Col::C)
}

fn shift_next(refs: &RowRefs) -> String {
    refs.prev(Col::F)
}

fn f_previous(refs: &RowRefs) -> String {
    f(&refs.cur(Col::B))
}

fn f_current(refs: &RowRefs) -> String {
    f(&refs.cur(Col::C))
}

fn secant_step(refs: &RowRefs) -> String {
    let (b, c, d, e) = (
        refs.cur(Col::B),
        refs.cur(Col::C),
        refs.cur(Col::D),
        refs.cur(Col::E),
    );
    format!("{c}-{e}*({c}-{b})/({e}-{d})")
}

fn error(refs: &RowRefs) -> String {
    format!("ABS({}-{})", refs.cur(Col::F), refs.cur(Col::C))
}
