//! Declarative method descriptors
//!
//! A method sheet is a list of columns, each with a header and a [`Rule`]
//! saying what goes into that column on the seed row and on every row after
//! it. Column position in the list is the worksheet column (A, B, ...).

use std::fmt;

use rootsheets_core::CellValue;

use crate::layout::{Col, RowRefs, FLAG_CONTINUE, FLAG_CONVERGED};

/// Renders formula text (without the leading `=`) for one row
pub type Template = fn(&RowRefs) -> String;

/// A root-finding method laid out as a worksheet
#[derive(Clone, Copy)]
pub struct MethodSheet {
    /// Worksheet name
    pub name: &'static str,
    /// Columns in worksheet order, starting at column A
    pub columns: &'static [ColumnSpec],
}

impl MethodSheet {
    /// Column headers in worksheet order
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }
}

impl fmt::Debug for MethodSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodSheet")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .finish()
    }
}

/// One worksheet column of a method
#[derive(Clone, Copy)]
pub struct ColumnSpec {
    /// Text written on the header row
    pub header: &'static str,
    /// How each data row is filled
    pub rule: Rule,
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.header, self.rule.kind())
    }
}

/// What a column holds on each data row
#[derive(Clone, Copy)]
pub enum Rule {
    /// `0` on the seed row, previous value plus one afterwards
    Counter,
    /// Literal seed, then a template over the previous row
    Recurrence { seed: f64, next: Template },
    /// Same-row template on every row
    Derived(Template),
    /// Next-iterate update wrapped by a guard
    Step { fallback: Fallback, update: Template },
    /// `Cumple` / `Continuar` depending on the error column
    Flag { error: Col },
}

/// Guard that holds the current iterate when an update is undefined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// `IF(divisor=0,hold,update)`
    ZeroDivisor { divisor: Col, hold: Col },
    /// `IF(left=right,hold,update)`
    EqualValues { left: Col, right: Col, hold: Col },
}

impl Fallback {
    fn wrap(&self, refs: &RowRefs, update: &str) -> String {
        match *self {
            Fallback::ZeroDivisor { divisor, hold } => {
                format!("IF({}=0,{},{})", refs.cur(divisor), refs.cur(hold), update)
            }
            Fallback::EqualValues { left, right, hold } => format!(
                "IF({}={},{},{})",
                refs.cur(left),
                refs.cur(right),
                refs.cur(hold),
                update
            ),
        }
    }
}

impl Rule {
    /// Short name of the rule variant
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::Counter => "counter",
            Rule::Recurrence { .. } => "recurrence",
            Rule::Derived(_) => "derived",
            Rule::Step { .. } => "step",
            Rule::Flag { .. } => "flag",
        }
    }

    /// Cell content for column `col` on the row described by `refs`.
    ///
    /// `seed` selects the literal starting values of the first data row.
    pub fn render(&self, refs: &RowRefs, col: u16, seed: bool) -> CellValue {
        match self {
            Rule::Counter if seed => CellValue::Number(0.0),
            Rule::Counter => formula(format!("{}+1", refs.prev_at(col))),
            Rule::Recurrence { seed: value, .. } if seed => CellValue::Number(*value),
            Rule::Recurrence { next, .. } => formula(next(refs)),
            Rule::Derived(template) => formula(template(refs)),
            Rule::Step { fallback, update } => formula(fallback.wrap(refs, &update(refs))),
            Rule::Flag { error } => formula(format!(
                "IF({}<={},\"{}\",\"{}\")",
                refs.cur(*error),
                refs.tol(),
                FLAG_CONVERGED,
                FLAG_CONTINUE
            )),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Recurrence { seed, .. } => write!(f, "Recurrence(seed = {})", seed),
            Rule::Step { fallback, .. } => write!(f, "Step({:?})", fallback),
            Rule::Flag { error } => write!(f, "Flag({:?})", error),
            other => f.write_str(other.kind()),
        }
    }
}

fn formula(text: String) -> CellValue {
    CellValue::Formula {
        text: format!("={}", text),
    }
}
