//! csvmatch - keyed comparison of delimited tables

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use csvmatch::config::{Config, KeyMode, OutputFormat};
use csvmatch::diff::compare_tables;
use csvmatch::parser::{parse_path, resolve_delimiter, resolve_output_delimiter};
use csvmatch::preview::{render_preview, PREVIEW_ROWS};
use csvmatch::report::{
    build_review_sheet, matched_export, render_workbook, JsonSummary, ReportLabels,
};
use csvmatch::validate::validate;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Compare two delimited tables row by row and report mismatched fields
#[derive(Parser, Debug)]
#[command(name = "csvmatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First table to compare (side A)
    table_a: PathBuf,

    /// Second table to compare (side B)
    table_b: PathBuf,

    /// Column holding the unique row identifier; rows match by position when omitted
    #[arg(short, long)]
    key: Option<String>,

    /// Annotator initials stamped on side A report rows
    #[arg(long, default_value = "AC")]
    initials_a: String,

    /// Annotator initials stamped on side B report rows
    #[arg(long, default_value = "KL")]
    initials_b: String,

    /// Source label for side A report rows (default: file name)
    #[arg(long)]
    source_a: Option<String>,

    /// Source label for side B report rows (default: file name)
    #[arg(long)]
    source_b: Option<String>,

    /// Where to write the review spreadsheet
    #[arg(long, default_value = "errors.xlsx")]
    report: PathBuf,

    /// Where to write the matched-rows export
    #[arg(long, default_value = "matched.csv")]
    matched: PathBuf,

    /// Field delimiter: a single ASCII character or 'tab' (default: by file extension)
    #[arg(short, long, value_parser = parse_delimiter)]
    delimiter: Option<u8>,

    /// Skip the input previews
    #[arg(long)]
    no_preview: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" => Ok(b'\t'),
        "comma" => Ok(b','),
        "semicolon" => Ok(b';'),
        "pipe" => Ok(b'|'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be an ASCII character".to_string());
            }
            Ok(first as u8)
        }
    }
}

fn init_logging() {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if std::env::var("RUST_LOG").is_err() {
        builder.filter_module("csvmatch", LevelFilter::Info);
    }
    let _ = builder.format_timestamp_millis().try_init();
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    let config = Config {
        table_a: cli.table_a,
        table_b: cli.table_b,
        key_mode: match cli.key {
            Some(name) => KeyMode::Keyed(name),
            None => KeyMode::Positional,
        },
        initials_a: cli.initials_a,
        initials_b: cli.initials_b,
        source_a: cli.source_a,
        source_b: cli.source_b,
        delimiter: cli.delimiter,
        output_format: cli.format.into(),
    };

    let delim_a = resolve_delimiter(&config.table_a, config.delimiter);
    let delim_b = resolve_delimiter(&config.table_b, config.delimiter);

    let table_a = parse_path(&config.table_a, delim_a)
        .with_context(|| format!("Failed to parse table A: {}", config.table_a.display()))?;
    let table_b = parse_path(&config.table_b, delim_b)
        .with_context(|| format!("Failed to parse table B: {}", config.table_b.display()))?;

    info!(
        "parsed {} ({} rows) and {} ({} rows)",
        config.table_a.display(),
        table_a.row_count(),
        config.table_b.display(),
        table_b.row_count()
    );

    let terminal = config.output_format == OutputFormat::Terminal;
    if terminal && !cli.no_preview {
        println!("{}:", config.table_a.display());
        println!("{}", render_preview(&table_a, PREVIEW_ROWS));
        println!();
        println!("{}:", config.table_b.display());
        println!("{}", render_preview(&table_b, PREVIEW_ROWS));
        println!();
    }

    if let Err(e) = validate(&table_a, &table_b, &config.key_mode) {
        if terminal {
            print_status(Color::Red, &format!("Validation failed: {e}"))?;
        } else {
            eprintln!("Validation failed: {e}");
        }
        return Ok(ExitCode::from(2));
    }
    if terminal {
        print_status(Color::Green, "Tables validated; comparing rows.")?;
    }

    let report = compare_tables(&table_a, &table_b, &config.key_mode)?;

    let labels = ReportLabels::from_config(&config);
    let sheet = build_review_sheet(&table_a, &table_b, &report, &config.key_mode, &labels)?;
    let workbook_bytes = render_workbook(&sheet)?;
    std::fs::write(&cli.report, &workbook_bytes)
        .with_context(|| format!("Failed to write report: {}", cli.report.display()))?;

    let matched_delim = resolve_output_delimiter(&cli.matched, config.delimiter, delim_a);
    let matched_bytes = matched_export(&table_a, &report, &config.key_mode, matched_delim)?;
    std::fs::write(&cli.matched, &matched_bytes)
        .with_context(|| format!("Failed to write matched rows: {}", cli.matched.display()))?;

    info!(
        "wrote {} and {}",
        cli.report.display(),
        cli.matched.display()
    );

    match config.output_format {
        OutputFormat::Terminal => {
            println!();
            println!("Rows compared:    {}", report.stats.row_count);
            println!("Matched rows:     {}", report.stats.rows_matched);
            println!("Non-matched rows: {}", report.stats.rows_non_matched);
            println!("Fields differing: {}", report.stats.fields_differing);
            println!();
            println!("Review sheet:   {}", cli.report.display());
            println!("Matched export: {}", cli.matched.display());
        }
        OutputFormat::Json => {
            let summary = JsonSummary::build(&config, &report);
            serde_json::to_writer_pretty(std::io::stdout(), &summary)?;
            println!();
        }
    }

    Ok(if report.has_differences() {
        ExitCode::from(1) // Differences found
    } else {
        ExitCode::SUCCESS // All rows matched
    })
}

fn print_status(color: Color, message: &str) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    writeln!(stdout, "{}", message)?;
    stdout.reset()?;
    Ok(())
}
