//! rootsheets CLI - writes the root-finding methods workbook

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use rootsheets::prelude::*;
use rootsheets::DEFAULT_OUTPUT;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rootsheets")]
#[command(
    author,
    version,
    about = "Generate a workbook that unrolls bisection, Newton-Raphson, secant and fixed-point iteration into spreadsheet formulas"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output workbook (xlsx)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Tolerance written to B1 of every sheet
    #[arg(short, long, default_value_t = rootsheets::DEFAULT_TOLERANCE, value_parser = parse_tolerance)]
    tolerance: f64,

    /// Data rows per sheet, the seed row included
    #[arg(short, long, default_value_t = rootsheets::DEFAULT_ITERATIONS)]
    iterations: u32,

    /// More logging (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a workbook
    Info {
        /// Input workbook
        input: PathBuf,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input workbook
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        None => {
            let config = GeneratorConfig::new()
                .with_tolerance(cli.tolerance)
                .with_iterations(cli.iterations);
            generate_workbook(&cli.output, &config)
        }
        Some(Commands::Info { input }) => show_info(&input),
        Some(Commands::Sheets { input }) => list_sheets(&input),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_tolerance(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("tolerance must be a positive number, got {s}"))
    }
}

fn generate_workbook(output: &Path, config: &GeneratorConfig) -> Result<()> {
    tracing::info!(
        tolerance = config.tolerance,
        iterations = config.iterations,
        "generating workbook"
    );

    generate(output, config)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    println!("Archivo Excel generado: {}", output.display());
    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let workbook =
        Workbook::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("File: {}", input.display());
    println!("Sheets: {}", workbook.sheet_count());

    for (i, sheet) in workbook.worksheets().enumerate() {
        println!();
        println!("  Sheet {}: \"{}\"", i, sheet.name());

        match sheet.used_range() {
            Some(range) => println!(
                "    Used range: {} ({} rows x {} columns)",
                range,
                range.end.row + 1,
                range.end.col + 1
            ),
            None => println!("    Used range: empty"),
        }
        println!("    Formulas: {}", sheet.formula_cells().count());
        match sheet.freeze_panes() {
            Some(panes) => println!("    Frozen at: {}", panes.top_left_cell()),
            None => println!("    Frozen at: none"),
        }
    }

    Ok(())
}

fn list_sheets(input: &Path) -> Result<()> {
    let workbook =
        Workbook::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    for (i, sheet) in workbook.worksheets().enumerate() {
        println!("{}\t{}", i, sheet.name());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["rootsheets"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output, PathBuf::from("metodos_numericos.xlsx"));
        assert_eq!(cli.tolerance, 1e-6);
        assert_eq!(cli.iterations, 25);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "rootsheets",
            "-vv",
            "--output",
            "out.xlsx",
            "--tolerance",
            "1e-4",
            "--iterations",
            "40",
        ])
        .unwrap();
        assert_eq!(cli.output, PathBuf::from("out.xlsx"));
        assert_eq!(cli.tolerance, 1e-4);
        assert_eq!(cli.iterations, 40);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_subcommands() {
        let cli = Cli::try_parse_from(["rootsheets", "sheets", "book.xlsx"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Sheets { .. })));

        let cli = Cli::try_parse_from(["rootsheets", "info", "book.xlsx", "-v"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Info { .. })));
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_rejects_non_positive_tolerance() {
        assert!(Cli::try_parse_from(["rootsheets", "--tolerance", "0"]).is_err());
        assert!(Cli::try_parse_from(["rootsheets", "--tolerance", "abc"]).is_err());
        assert!(parse_tolerance("0.001").is_ok());
    }

    #[test]
    fn test_generate_workbook_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metodos.xlsx");

        generate_workbook(&path, &GeneratorConfig::default()).unwrap();
        assert!(path.exists());

        let workbook = Workbook::open(&path).unwrap();
        assert_eq!(
            workbook.sheet_names(),
            vec!["Biseccion", "Newton-Raphson", "Secante", "Punto Fijo"]
        );
        list_sheets(&path).unwrap();
        show_info(&path).unwrap();
    }

    #[test]
    fn test_generate_workbook_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("metodos.xlsx");

        let err = generate_workbook(&path, &GeneratorConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to write '"));
        assert!(format!("{:#}", err).contains("I/O failure"));
        assert!(!path.exists());
    }
}
