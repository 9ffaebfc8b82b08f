//! Builds the complete workbook

use std::path::Path;

use rootsheets_core::{Workbook, DEFAULT_SHEET_NAME};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::methods;
use crate::WorkbookExt;

/// Build the four method sheets in order (bisection, Newton-Raphson,
/// secant, fixed point) and drop the workbook's initial blank sheet.
pub fn build_workbook(config: &GeneratorConfig) -> Result<Workbook> {
    let mut workbook = Workbook::new();

    for build in methods::BUILDERS {
        build(&mut workbook, config)?;
    }

    workbook.remove_worksheet_by_name(DEFAULT_SHEET_NAME)?;
    workbook.set_active_sheet(0)?;

    log::debug!("assembled sheets {:?}", workbook.sheet_names());
    Ok(workbook)
}

/// Build the workbook and save it to `path`
pub fn generate<P: AsRef<Path>>(path: P, config: &GeneratorConfig) -> Result<Workbook> {
    let workbook = build_workbook(config)?;
    workbook.save(path)?;
    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sheet_order() {
        let wb = build_workbook(&GeneratorConfig::default()).unwrap();
        assert_eq!(
            wb.sheet_names(),
            vec!["Biseccion", "Newton-Raphson", "Secante", "Punto Fijo"]
        );
        assert_eq!(wb.active_sheet(), 0);
    }

    #[test]
    fn test_builders_append_in_order() {
        let mut wb = Workbook::empty();
        let config = GeneratorConfig::new().with_iterations(2);
        let indices: Vec<usize> = methods::BUILDERS
            .iter()
            .map(|build| build(&mut wb, &config).unwrap())
            .collect();

        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(
            wb.sheet_names(),
            vec![
                methods::BISECTION.name,
                methods::NEWTON_RAPHSON.name,
                methods::SECANT.name,
                methods::FIXED_POINT.name,
            ]
        );
    }

    #[test]
    fn test_zero_iterations_keeps_headers() {
        let config = GeneratorConfig::new().with_iterations(0);
        let wb = build_workbook(&config).unwrap();
        for sheet in wb.worksheets() {
            assert_eq!(sheet.used_range().unwrap().end.row, 4);
            assert_eq!(sheet.formula_cells().count(), 0);
        }
    }
}
