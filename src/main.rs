use clap::{ArgAction, Parser};
use color_eyre::Result;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bim_picker::export::{export_csv, export_json, write_csv, write_json};
use bim_picker::model::{ColumnSpec, Row};
use bim_picker::source::{self, Format};
use bim_picker::{logging, Picker, Settings};

/// Exit status when the user cancels, as for an interrupted shell command.
const EXIT_CANCELLED: i32 = 130;

#[derive(Parser, Debug)]
#[command(name = "bim-picker")]
#[command(about = "BIM Picker - filter and pick rows from CSV or JSON in the terminal")]
#[command(version)]
struct Args {
    /// Input file (CSV, TSV or JSON); `-` or omitted reads stdin
    file: Option<PathBuf>,

    /// Input format when the file extension does not tell
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Columns to show, in order
    #[arg(short, long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Row indices selected when the picker opens
    #[arg(short, long, value_delimiter = ',')]
    select: Vec<usize>,

    /// Dialog title
    #[arg(short, long)]
    title: Option<String>,

    /// Initial filter query
    #[arg(short, long)]
    query: Option<String>,

    /// Sort filtered rows by the first column
    #[arg(long, overrides_with = "no_sort")]
    sort: bool,

    /// Keep filtered rows in input order
    #[arg(long, overrides_with = "sort")]
    no_sort: bool,

    /// Stretch the dialog across the whole terminal width
    #[arg(long)]
    span: bool,

    /// Write the chosen rows here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (defaults to the input format)
    #[arg(long, value_enum)]
    output_format: Option<Format>,

    /// Settings file (defaults to the per-user config file)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a log to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// More log detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if self.sort {
            settings.sort_by_first_column = true;
        }
        if self.no_sort {
            settings.sort_by_first_column = false;
        }
        if self.span {
            settings.span_all_screens = true;
        }
        Ok(settings)
    }

    fn input_format(&self) -> Format {
        self.format
            .or_else(|| self.file.as_deref().and_then(Format::from_path))
            .unwrap_or(Format::Csv)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let settings = args.settings()?;

    if let Some(log_file) = &args.log_file {
        let level = logging::level_from(args.verbose, settings.log_level.as_deref());
        logging::init(log_file, level)?;
    }

    let input_format = args.input_format();
    let records = source::load(args.file.as_deref(), input_format)?;
    let columns = ColumnSpec::resolve(args.columns.clone(), &records);

    let mut picker = Picker::new(&records)
        .settings(settings)
        .columns(columns.names().iter().cloned())
        .initial_selection(args.select.iter().copied());
    if let Some(title) = &args.title {
        picker = picker.title(title.as_str());
    }
    if let Some(query) = &args.query {
        picker = picker.query(query.as_str());
    }

    // Accept always carries at least one row, so empty means cancelled.
    let chosen = picker.select()?;
    if chosen.is_empty() {
        std::process::exit(EXIT_CANCELLED);
    }

    let output_format = args.output_format.unwrap_or(input_format);
    write_output(&chosen, &columns, output_format, args.output.as_deref())
}

fn write_output(
    chosen: &[&Row],
    columns: &ColumnSpec,
    format: Format,
    path: Option<&Path>,
) -> Result<()> {
    match (path, format.delimiter()) {
        (Some(path), Some(delimiter)) => export_csv(chosen, columns, path, delimiter)?,
        (Some(path), None) => export_json(chosen, columns, path)?,
        (None, Some(delimiter)) => write_csv(io::stdout().lock(), chosen, columns, delimiter)?,
        (None, None) => write_json(io::stdout().lock(), chosen, columns)?,
    }
    io::stdout().flush()?;
    Ok(())
}
