//! Command-line tool for checking and inspecting JSON documents.
//!
//! Usage: jsonparse [OPTIONS] [FILE|DIR]
//!
//! Reads FILE (or stdin when absent or `-`), parses it, and prints the value
//! tree. Given a directory, every `.json` file in it is processed.

use clap::Parser;
use libjsonparse::{parse_with_options, ParseContext, ParseOptions, Value};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "jsonparse",
    version,
    about = "Parse JSON documents and inspect the resulting value tree",
    after_help = r#"EXAMPLES
  $ jsonparse data.json
  $ curl -s https://hn.algolia.com/api/v1/search?tags=front_page | jsonparse --pointer /hits/0/title
  $ jsonparse --check fixtures/

Set RUST_LOG=debug (or trace) to log parser activity to stderr."#
)]
struct Cli {
    /// Input file or directory (stdin when absent or "-")
    input: Option<PathBuf>,

    /// Only validate; print "ok" on success
    #[arg(long)]
    check: bool,

    /// Print only the value at this JSON Pointer (e.g. /hits/0/title)
    #[arg(long, value_name = "PATH")]
    pointer: Option<String>,

    /// Reject documents nested deeper than this many containers
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut options = ParseOptions::new();
    if let Some(depth) = cli.max_depth {
        options = options.with_max_depth(depth);
    }

    let input_path = cli.input.as_deref().filter(|p| *p != Path::new("-"));

    if let Some(path) = input_path {
        if path.is_dir() {
            process::exit(process_directory(path, &cli, &options));
        }
    }

    let input = match read_input(input_path) {
        Ok(input) => input,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(1);
        }
    };

    let exit_code = process_input(&input, input_path, &cli, &options);
    process::exit(exit_code);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Read the whole input as UTF-8 from a file or stdin.
fn read_input(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path.display(), e))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("reading stdin: {}", e))?;
            Ok(buffer)
        }
    }
}

/// Process every `.json` file in a directory. Returns the exit code.
fn process_directory(dir: &Path, cli: &Cli, options: &ParseOptions) -> i32 {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: reading directory {}: {}", dir.display(), e);
            return 1;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|e| e == "json"))
        .collect();
    paths.sort();
    info!(dir = %dir.display(), files = paths.len(), "processing directory");

    let mut had_errors = false;
    for path in &paths {
        let exit_code = match read_input(Some(path)) {
            Ok(input) => process_input(&input, Some(path), cli, options),
            Err(message) => {
                eprintln!("Error: {}", message);
                1
            }
        };
        had_errors |= exit_code != 0;
    }

    i32::from(had_errors)
}

/// Parse one document and print the requested view of it.
fn process_input(input: &str, path: Option<&Path>, cli: &Cli, options: &ParseOptions) -> i32 {
    let name = path.map(|p| p.display().to_string());
    let ctx = ParseContext::new(name.as_deref());

    let value = match parse_with_options(input, options) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Error: {}", ctx.describe(&err, input));
            return 1;
        }
    };
    debug!(depth = value.depth(), kind = value.kind_name(), "parsed");

    if cli.check {
        match &name {
            Some(name) => println!("{}: ok", name),
            None => println!("ok"),
        }
        return 0;
    }

    let selected: &Value = match &cli.pointer {
        Some(pointer) => match value.pointer(pointer) {
            Some(v) => v,
            None => {
                eprintln!(
                    "Error: no value at pointer {:?}{}",
                    pointer,
                    name.map(|n| format!(" of <{}>", n)).unwrap_or_default()
                );
                return 1;
            }
        },
        None => &value,
    };

    println!("{:#?}", selected);
    0
}
