//! `dspace export`: write the squares as a workbook, CSV or JSON.
//!
//! The destination defaults to `export.fileName` from settings
//! (`divisible_space.xlsx` out of the box). The format follows `--format`,
//! else the destination's extension, else xlsx.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use divspace_io::ExportFormat;

use crate::{CliError, Context};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Xlsx,
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

#[derive(Args)]
#[command(after_help = "\
Examples:
  dspace export
  dspace export --out hall.xlsx
  dspace export --format csv --out -
  dspace export --out squares.json")]
pub struct ExportArgs {
    /// Output format (default: from the destination's extension, else xlsx)
    #[arg(long, short = 'f')]
    format: Option<FormatArg>,

    /// Destination file; `-` writes CSV/JSON to stdout
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

/// Resolve (destination, format) from flags and the configured file name.
///
/// With `--format` and no `--out`, the configured name takes the format's
/// extension.
fn resolve(args: &ExportArgs, default_file: &str) -> (PathBuf, ExportFormat) {
    match (&args.out, args.format.map(ExportFormat::from)) {
        (Some(out), Some(format)) => (out.clone(), format),
        (Some(out), None) => (out.clone(), ExportFormat::from_path(out).unwrap_or_default()),
        (None, Some(format)) => (PathBuf::from(default_file).with_extension(format.extension()), format),
        (None, None) => {
            let out = PathBuf::from(default_file);
            let format = ExportFormat::from_path(&out).unwrap_or_default();
            (out, format)
        }
    }
}

pub(crate) fn cmd_export(ctx: &Context, args: ExportArgs) -> Result<(), CliError> {
    let state = ctx.load();
    let cells = state.grid.cells();
    let (out, format) = resolve(&args, &ctx.settings.export_file_name);

    if out.as_os_str() == "-" {
        return export_stdout(cells, format);
    }

    let rows = divspace_io::export(cells, &out, format)
        .map_err(|e| CliError::export(e).with_hint(format!("check that {} is writable", out.display())))?;
    ctx.note(format!("export: wrote {} squares to {}", rows, out.display()));
    Ok(())
}

fn export_stdout(cells: &[divspace_engine::Cell], format: ExportFormat) -> Result<(), CliError> {
    match format {
        ExportFormat::Csv => {
            divspace_io::csv::write_table(cells, std::io::stdout().lock())
                .map_err(CliError::export)?;
        }
        ExportFormat::Json => {
            let rows = divspace_io::table::to_table(cells);
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| CliError::export(format!("JSON error: {e}")))?;
            println!("{json}");
        }
        ExportFormat::Xlsx => {
            return Err(CliError::args("xlsx cannot be written to stdout")
                .with_hint("pass --out <FILE> or --format csv"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(format: Option<FormatArg>, out: Option<&str>) -> ExportArgs {
        ExportArgs { format, out: out.map(PathBuf::from) }
    }

    #[test]
    fn test_resolve_defaults() {
        let (out, format) = resolve(&args(None, None), "divisible_space.xlsx");
        assert_eq!(out, PathBuf::from("divisible_space.xlsx"));
        assert_eq!(format, ExportFormat::Xlsx);
    }

    #[test]
    fn test_resolve_format_renames_default_file() {
        let (out, format) = resolve(&args(Some(FormatArg::Csv), None), "divisible_space.xlsx");
        assert_eq!(out, PathBuf::from("divisible_space.csv"));
        assert_eq!(format, ExportFormat::Csv);
    }

    #[test]
    fn test_resolve_extension_and_override() {
        let (_, format) = resolve(&args(None, Some("hall.json")), "x.xlsx");
        assert_eq!(format, ExportFormat::Json);

        let (out, format) = resolve(&args(Some(FormatArg::Csv), Some("-")), "x.xlsx");
        assert_eq!(out, PathBuf::from("-"));
        assert_eq!(format, ExportFormat::Csv);

        let (_, format) = resolve(&args(None, Some("hall.dat")), "x.xlsx");
        assert_eq!(format, ExportFormat::Xlsx);
    }
}
