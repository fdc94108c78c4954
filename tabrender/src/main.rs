//! # tabrender
//!
//! A CLI tool for turning CSV data into reports.
//!
//! ## Overview
//!
//! tabrender is built on top of tabrenderlib. It loads a CSV file, optionally
//! projects, sorts and groups it, then renders it with one of the built-in
//! formatters to stdout or a file.
//!
//! ## Usage
//!
//! ```bash
//! # Bordered text table sized to the terminal
//! tabrender sales.csv
//!
//! # Two columns, sorted by amount, largest first
//! tabrender sales.csv -c region,amount -s amount --desc --infer-types
//!
//! # One HTML table per region
//! tabrender sales.csv -f html -g region --title "Sales by region"
//!
//! # PDF written to a file
//! tabrender sales.csv -f pdf -o sales.pdf
//!
//! # Render options from a JSON file, overridden by flags
//! tabrender sales.csv --options report.json --align right
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::{style, Term};
use log::LevelFilter;
use tabrenderlib::{
    parse_delimiter, Alignment, GroupingStyle, LoadOptions, Order, RenderOptions, Rendered,
    Table,
};

const FORMATS: [&str; 5] = ["text", "csv", "html", "pdf", "json"];

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("tabrender")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Render CSV data as text tables, CSV, HTML, PDF or JSON reports")
        .arg(
            Arg::new("input")
                .required(true)
                .help("CSV file to render"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .default_value("text")
                .value_parser(FORMATS)
                .help("Output format"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write to FILE instead of stdout"),
        )
        .arg(
            Arg::new("columns")
                .short('c')
                .long("columns")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .help("Columns to keep, in order (comma-separated)"),
        )
        .arg(
            Arg::new("sort")
                .short('s')
                .long("sort")
                .help("Sort rows by column"),
        )
        .arg(
            Arg::new("desc")
                .long("desc")
                .action(ArgAction::SetTrue)
                .requires("sort")
                .help("Sort in descending order"),
        )
        .arg(
            Arg::new("group-by")
                .short('g')
                .long("group-by")
                .help("Render one group per distinct value of column"),
        )
        .arg(
            Arg::new("grouping-style")
                .long("grouping-style")
                .value_parser(["inline", "justified", "raw"])
                .help("CSV layout for grouped output"),
        )
        .arg(
            Arg::new("no-headers")
                .long("no-headers")
                .action(ArgAction::SetTrue)
                .help("Do not print column headers"),
        )
        .arg(
            Arg::new("no-input-headers")
                .long("no-input-headers")
                .action(ArgAction::SetTrue)
                .help("Input has no header row; columns are named column_1..n"),
        )
        .arg(
            Arg::new("delimiter")
                .short('d')
                .long("delimiter")
                .default_value(",")
                .help("Input field delimiter (a single character, or 'tab')"),
        )
        .arg(
            Arg::new("infer-types")
                .long("infer-types")
                .action(ArgAction::SetTrue)
                .help("Read numeric and boolean cells as typed values"),
        )
        .arg(Arg::new("title").long("title").help("Report title"))
        .arg(
            Arg::new("width")
                .long("width")
                .value_parser(clap::value_parser!(usize))
                .help("Maximum text line width (defaults to the terminal width)"),
        )
        .arg(
            Arg::new("align")
                .long("align")
                .value_parser(["left", "right", "center"])
                .help("Cell alignment for text and PDF output"),
        )
        .arg(
            Arg::new("options")
                .long("options")
                .value_parser(clap::value_parser!(PathBuf))
                .help("JSON file with render options (flags take precedence)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v, -vv, -vvv)"),
        )
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Load the input file according to the input flags
fn load_table(matches: &ArgMatches) -> anyhow::Result<Table> {
    let input = matches
        .get_one::<String>("input")
        .context("missing input file")?;
    let delimiter = matches
        .get_one::<String>("delimiter")
        .map(|d| parse_delimiter(d).map_err(anyhow::Error::msg))
        .transpose()?
        .unwrap_or(b',');

    let options = LoadOptions::new()
        .has_headers(!matches.get_flag("no-input-headers"))
        .delimiter(delimiter)
        .infer_types(matches.get_flag("infer-types"));

    Table::load_csv(input, &options).with_context(|| format!("failed to load '{}'", input))
}

/// Apply projection and sorting flags
fn shape_table(mut table: Table, matches: &ArgMatches) -> anyhow::Result<Table> {
    if let Some(columns) = matches.get_many::<String>("columns") {
        let columns: Vec<&str> = columns.map(|c| c.trim()).collect();
        table = table.project(columns)?;
    }

    if let Some(column) = matches.get_one::<String>("sort") {
        let order = if matches.get_flag("desc") {
            Order::Descending
        } else {
            Order::Ascending
        };
        table.sort_rows_by(column, order)?;
    }

    Ok(table)
}

/// Terminal width when stdout is a terminal
fn terminal_width() -> Option<usize> {
    Term::stdout()
        .size_checked()
        .map(|(_, columns)| columns as usize)
}

/// Render options: the options file first, then individual flags
fn build_options(matches: &ArgMatches) -> anyhow::Result<RenderOptions> {
    let mut options = match matches.get_one::<PathBuf>("options") {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read options file '{}'", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid options file '{}'", path.display()))?
        }
        None => RenderOptions::default(),
    };

    if matches.get_flag("no-headers") {
        options.show_table_headers = false;
    }
    if let Some(title) = matches.get_one::<String>("title") {
        options.title = Some(title.clone());
    }
    if let Some(width) = matches.get_one::<usize>("width") {
        options.table_width = Some(*width);
    } else if options.table_width.is_none() {
        options.table_width = terminal_width();
    }
    if let Some(align) = matches.get_one::<String>("align") {
        options.alignment = align.parse::<Alignment>().map_err(anyhow::Error::msg)?;
    }
    if let Some(style) = matches.get_one::<String>("grouping-style") {
        options.grouping_style = style.parse::<GroupingStyle>().map_err(anyhow::Error::msg)?;
    }
    if let Some(path) = matches.get_one::<PathBuf>("output") {
        options.file = Some(path.clone());
    }

    Ok(options)
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let format = matches
        .get_one::<String>("format")
        .map(|s| s.as_str())
        .unwrap_or("text");

    let table = shape_table(load_table(matches)?, matches)?;
    let options = build_options(matches)?;
    log::info!(
        "rendering {} rows x {} columns as {}",
        table.len(),
        table.column_count(),
        format
    );

    let rendered: Rendered = match matches.get_one::<String>("group-by") {
        Some(column) => table.group_by(column)?.render(format, &options)?,
        None => table.render(format, &options)?,
    };

    // The engine already wrote the file when --output was given
    if options.file.is_none() {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").for_stderr().red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_options_file_delimiter_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opts.json");
        std::fs::write(&path, r#"{"delimiter": ";"}"#).unwrap();

        let matches = build_command().get_matches_from([
            "tabrender",
            "in.csv",
            "--options",
            path.to_str().unwrap(),
        ]);
        let options = build_options(&matches).unwrap();
        assert_eq!(options.delimiter, b';');
    }

    #[test]
    fn test_flags_override_defaults() {
        let matches = build_command().get_matches_from([
            "tabrender",
            "in.csv",
            "--title",
            "Q3",
            "--width",
            "40",
            "--align",
            "right",
            "--no-headers",
            "--grouping-style",
            "raw",
        ]);
        let options = build_options(&matches).unwrap();
        assert_eq!(options.title.as_deref(), Some("Q3"));
        assert_eq!(options.table_width, Some(40));
        assert_eq!(options.alignment, Alignment::Right);
        assert_eq!(options.grouping_style, GroupingStyle::Raw);
        assert!(!options.show_table_headers);
        assert!(options.file.is_none());
    }

    #[test]
    fn test_options_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opts.json");
        std::fs::write(&path, r#"{"title": "From file", "table_width": 50}"#).unwrap();

        let matches = build_command().get_matches_from([
            "tabrender",
            "in.csv",
            "--options",
            path.to_str().unwrap(),
            "--title",
            "From flag",
        ]);
        let options = build_options(&matches).unwrap();
        assert_eq!(options.title.as_deref(), Some("From flag"));
        assert_eq!(options.table_width, Some(50));
    }
}
