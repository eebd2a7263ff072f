//! First-Word Report Tool
//!
//! Reads a delimited text export of a spreadsheet, finds the first word of
//! every row in the description column, and prints the ranked counts with a
//! bar chart.
//!
//! ## Usage
//!
//! ```bash
//! # Comma-separated file with a "Description" column
//! ./target/release/leadword items.csv
//!
//! # Tab-separated, Portuguese column name, skip some words
//! ./target/release/leadword items.tsv --column Descrição --ignore item --ignore produto
//!
//! # Product-catalog setup: stopwords, short words dropped, top 20 charted
//! ./target/release/leadword items.csv --stopwords --min-len 3 --chart 20
//!
//! # Voltage tags from a rule table, ranked words saved for a spreadsheet
//! ./target/release/leadword items.csv --attributes rules.csv --output ranked.csv
//! ```
//!
//! ## Options
//!
//! - `--delimiter <c>`: cell separator (default: tab for `.tsv`, comma otherwise)
//! - `--column <name>`: description column (default: `Description`)
//! - `--ignore <word>`: ignore a word; repeatable
//! - `--categories <file>`: `Word` / `Category` table for a per-category breakdown
//! - `--attributes <file>`: `Attribute` / `Variation` / `Patterns` rule table
//! - `--output <file>`: also write the ranked table as delimited text
//! - `--stopwords`: preload the built-in stopword list
//! - `--min-len <n>`: drop first words shorter than `n` characters
//! - `--chart <n>`: chart only the top `n` words
//! - `--strip-diacritics`: fold "Café" and "cafe" together
//!
//! Set `RUST_LOG=leadword_core=debug` to trace each pass.

use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::process::ExitCode;

use leadword_core::{
    export, AnalysisConfig, AttributeRules, CategoryMap, Report, RowSource, Session, Table,
};
use tracing_subscriber::EnvFilter;

const TABLE_ROWS: usize = 50;
const BAR_WIDTH: usize = 40;

struct Options {
    path: String,
    delimiter: u8,
    ignore: Vec<String>,
    categories: Option<String>,
    attributes: Option<String>,
    output: Option<String>,
    config: AnalysisConfig,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("Usage: leadword <path> [--delimiter <c>] [--column <name>] [--ignore <word>]... [--categories <file>] [--attributes <file>] [--output <file>] [--stopwords] [--min-len <n>] [--chart <n>] [--strip-diacritics]");
            return ExitCode::from(2);
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: Options) -> Result<(), String> {
    let text = read(&options.path)?;
    let table = parse(&options.path, &text, options.delimiter)?;

    let mut session = Session::new(options.config).map_err(|e| e.to_string())?;
    session
        .extend_ignore(&options.ignore)
        .map_err(|e| e.to_string())?;
    if let Some(path) = &options.categories {
        let map = load_categories(path, options.delimiter, &session)?;
        session.set_categories(Some(map));
    }
    if let Some(path) = &options.attributes {
        let rules = load_attributes(path, options.delimiter)?;
        session.set_attributes(Some(rules));
    }
    let ignoring = session.ignore_set().len();

    session.load(&table).map_err(|e| e.to_string())?;
    let report = session.report().ok_or("no report after loading")?;

    println!("File      : {}", options.path);
    println!("Rows      : {}", report.stats());
    println!("Ignoring  : {ignoring} words\n");

    print_table(report);
    print_chart(report);
    print_categories(report);
    print_attributes(report);

    if let Some(path) = &options.output {
        let file = File::create(path).map_err(|e| format!("cannot create {path}: {e}"))?;
        export::write_ranked(
            BufWriter::new(file),
            report.ranked(),
            session.categories(),
            options.delimiter,
        )
        .map_err(|e| format!("{path}: {e}"))?;
        println!("\nRanked table written to {path}");
    }
    Ok(())
}

fn read(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))
}

fn parse(path: &str, text: &str, delimiter: u8) -> Result<Table, String> {
    Table::parse_delimited(text, delimiter).map_err(|e| format!("{path}: {e}"))
}

/// Reads a `Word<delim>Category` table into a map that normalizes like the
/// session does.
fn load_categories(path: &str, delimiter: u8, session: &Session) -> Result<CategoryMap, String> {
    let table = parse(path, &read(path)?, delimiter)?;
    let words = table.column("Word").map_err(|e| format!("{path}: {e}"))?;
    let categories = table.column("Category").map_err(|e| format!("{path}: {e}"))?;

    let mut map = CategoryMap::new(*session.normalizer());
    for (word, category) in words.into_iter().zip(categories) {
        if let (Some(word), Some(category)) = (word, category) {
            map.insert(word, category);
        }
    }
    Ok(map)
}

fn load_attributes(path: &str, delimiter: u8) -> Result<AttributeRules, String> {
    let table = parse(path, &read(path)?, delimiter)?;
    AttributeRules::from_source(&table).map_err(|e| format!("{path}: {e}"))
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut path = None;
    let mut delimiter = None;
    let mut ignore = Vec::new();
    let mut categories = None;
    let mut attributes = None;
    let mut output = None;
    let mut config = AnalysisConfig::default();

    let mut it = args.iter();
    while let Some(arg) = it.next() {
        let mut value = |flag: &str| {
            it.next()
                .cloned()
                .ok_or_else(|| format!("{flag} needs a value"))
        };

        match arg.as_str() {
            "--delimiter" => delimiter = Some(parse_delimiter(&value("--delimiter")?)?),
            "--column" => config.description_column = value("--column")?,
            "--ignore" => ignore.push(value("--ignore")?),
            "--categories" => categories = Some(value("--categories")?),
            "--attributes" => attributes = Some(value("--attributes")?),
            "--output" => output = Some(value("--output")?),
            "--stopwords" => config.seed_default_stopwords = true,
            "--strip-diacritics" => config.strip_diacritics = true,
            "--min-len" => config.min_token_len = parse_number("--min-len", &value("--min-len")?)?,
            "--chart" => config.chart_limit = Some(parse_number("--chart", &value("--chart")?)?),
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            other => {
                if path.replace(other.to_string()).is_some() {
                    return Err("only one input file is supported".into());
                }
            }
        }
    }

    let path = path.ok_or("missing input file")?;
    let delimiter = delimiter.unwrap_or(if path.ends_with(".tsv") { b'\t' } else { b',' });

    Ok(Options {
        path,
        delimiter,
        ignore,
        categories,
        attributes,
        output,
        config,
    })
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "\\t" | "tab" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        s => Err(format!("delimiter must be one ASCII character, got {s:?}")),
    }
}

fn parse_number(flag: &str, raw: &str) -> Result<usize, String> {
    raw.parse()
        .map_err(|_| format!("{flag} expects a number, got {raw:?}"))
}

fn print_table(report: &Report) {
    let ranked = report.ranked();
    if ranked.is_empty() {
        println!("No first words found.");
        return;
    }

    let width = ranked
        .iter()
        .take(TABLE_ROWS)
        .map(|e| e.token.char_len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!("=== First words ===");
    println!("{:>5}  {:<width$}  {:>8}", "Rank", "Word", "Count");
    for entry in ranked.iter().take(TABLE_ROWS) {
        println!("{:>5}  {:<width$}  {:>8}", entry.rank, entry.token.as_str(), entry.count);
    }
    if ranked.len() > TABLE_ROWS {
        println!("  ... {} more", ranked.len() - TABLE_ROWS);
    }
    println!();
}

fn print_chart(report: &Report) {
    let chart = report.chart();
    let Some(max) = chart.iter().map(|p| p.value).max() else {
        return;
    };

    let width = chart.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);

    println!("=== Chart ===");
    for point in chart {
        let bar = (point.value * BAR_WIDTH as u64).div_ceil(max) as usize;
        println!("{:<width$} | {} {}", point.label, "#".repeat(bar), point.value);
    }
}

fn print_categories(report: &Report) {
    let Some(categories) = &report.categories else {
        return;
    };

    println!("\n=== Categories ===");
    if categories.is_empty() {
        println!("No ranked word has a category.");
        return;
    }
    for c in categories {
        println!("{:>8}  {}", c.count, c.category);
    }
}

fn print_attributes(report: &Report) {
    let Some(attributes) = &report.attributes else {
        return;
    };

    println!("\n=== Attributes ===");
    if attributes.is_empty() {
        println!("No description matched an attribute rule.");
        return;
    }
    let mut current = None;
    for a in attributes {
        if current != Some(&a.attribute) {
            println!("{}", a.attribute);
            current = Some(&a.attribute);
        }
        println!("{:>8}  {}", a.count, a.value);
    }
}
