//! Properties of the generated workbook

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use regex::Regex;
use rootsheets::layout::{FIRST_DATA_ROW, HEADER_ROW};
use rootsheets::prelude::*;
use std::io::Cursor;

const SHEETS: [&str; 4] = ["Biseccion", "Newton-Raphson", "Secante", "Punto Fijo"];

fn cell_ref_regex() -> Regex {
    Regex::new(r"\$?\b([A-Z]{1,3})\$?([0-9]+)\b").unwrap()
}

/// 1-based rows referenced by a formula, with `$B$1` reported as `None`
fn referenced_rows(re: &Regex, formula: &str) -> Vec<Option<u32>> {
    re.captures_iter(formula)
        .map(|caps| {
            if &caps[0] == "$B$1" {
                None
            } else {
                Some(caps[2].parse().unwrap())
            }
        })
        .collect()
}

fn assert_workbook_shape(wb: &Workbook, config: &GeneratorConfig) {
    assert_eq!(wb.sheet_names(), SHEETS.to_vec());

    for sheet in wb.worksheets() {
        let last_row = FIRST_DATA_ROW + config.iterations;
        let rows: Vec<u32> = sheet.populated_rows().collect();
        let mut expected = vec![0, HEADER_ROW];
        expected.extend(FIRST_DATA_ROW..last_row);
        assert_eq!(rows, expected, "populated rows of {}", sheet.name());

        // Counter: 0 on the seed row, then =A{p}+1
        assert_eq!(
            sheet.get_value_at(FIRST_DATA_ROW, 0).as_number(),
            Some(0.0)
        );
        for row in FIRST_DATA_ROW + 1..last_row {
            let expected = format!("=A{}+1", row);
            assert_eq!(sheet.get_formula_at(row, 0), Some(expected.as_str()));
        }

        assert_eq!(
            sheet.get_value_at(0, 1).as_number(),
            Some(config.tolerance)
        );
    }
}

#[test]
fn test_default_workbook() {
    let config = GeneratorConfig::default();
    let wb = build_workbook(&config).unwrap();
    assert_workbook_shape(&wb, &config);

    assert!(wb.worksheet_by_name("Sheet").is_none());
    for sheet in wb.worksheets() {
        let range = sheet.used_range().unwrap();
        assert_eq!(range.start.row, 0);
        assert_eq!(range.end.row + 1, 30);
    }
}

#[test]
fn test_header_row_and_freeze() {
    let wb = build_workbook(&GeneratorConfig::default()).unwrap();
    for sheet in wb.worksheets() {
        assert_eq!(sheet.get_value("A1").unwrap().as_string(), Some("Tolerancia"));
        assert_eq!(sheet.get_value("A5").unwrap().as_string(), Some("Iter"));

        let header_style = sheet.cell_style("A5").unwrap().unwrap();
        assert!(header_style.font.bold);
        assert_eq!(
            header_style.alignment.horizontal,
            HorizontalAlignment::Center
        );

        let panes = sheet.freeze_panes().unwrap();
        assert_eq!(panes.top_left_cell().to_string(), "A6");
    }
}

#[test]
fn test_formulas_reference_only_current_previous_or_tolerance() {
    let re = cell_ref_regex();
    let wb = build_workbook(&GeneratorConfig::default()).unwrap();

    for sheet in wb.worksheets() {
        for (row, col, formula) in sheet.formula_cells() {
            let current = row + 1;
            for referenced in referenced_rows(&re, formula) {
                let Some(r) = referenced else { continue };
                let allowed = if row == FIRST_DATA_ROW {
                    r == current
                } else {
                    r == current || r + 1 == current
                };
                assert!(
                    allowed,
                    "{}!{} = {} references row {}",
                    sheet.name(),
                    CellAddress::new(row, col),
                    formula,
                    r
                );
            }
        }
    }
}

#[test]
fn test_flag_formulas() {
    let flag = Regex::new(r#"^=IF\(([A-Z])([0-9]+)<=\$B\$1,"Cumple","Continuar"\)$"#).unwrap();
    let wb = build_workbook(&GeneratorConfig::default()).unwrap();

    for sheet in wb.worksheets() {
        let flag_col = sheet.used_range().unwrap().end.col;
        for row in FIRST_DATA_ROW..FIRST_DATA_ROW + 25 {
            let formula = sheet.get_formula_at(row, flag_col).unwrap();
            let caps = flag.captures(formula).unwrap();
            assert_eq!(caps[2].parse::<u32>().unwrap(), row + 1);
            // The error column sits just left of the flag
            assert_eq!(
                CellAddress::letters_to_column(&caps[1]).unwrap(),
                flag_col - 1
            );
        }
    }
}

#[test]
fn test_generation_is_deterministic() {
    let config = GeneratorConfig::default();
    let first = build_workbook(&config).unwrap();
    let second = build_workbook(&config).unwrap();

    for (a, b) in first.worksheets().zip(second.worksheets()) {
        let fa: Vec<_> = a.formula_cells().collect();
        let fb: Vec<_> = b.formula_cells().collect();
        assert_eq!(fa, fb);
    }

    let mut buf_a = Vec::new();
    let mut buf_b = Vec::new();
    XlsxWriter::write(&first, Cursor::new(&mut buf_a)).unwrap();
    XlsxWriter::write(&second, Cursor::new(&mut buf_b)).unwrap();
    assert!(buf_a == buf_b, "written archives differ");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_row_count_follows_iterations(iterations in 1u32..80, exponent in 1i32..12) {
        let config = GeneratorConfig::new()
            .with_iterations(iterations)
            .with_tolerance(10f64.powi(-exponent));
        let wb = build_workbook(&config).unwrap();

        for sheet in wb.worksheets() {
            let range = sheet.used_range().unwrap();
            prop_assert_eq!(range.end.row, FIRST_DATA_ROW + iterations - 1);
            prop_assert_eq!(sheet.get_value_at(0, 1).as_number(), Some(config.tolerance));
        }
    }
}
