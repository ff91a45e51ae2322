//! # csvql CLI Entry Point
//!
//! Binary entry point for the csvql command-line tool.
//!
//! ## Usage
//!
//! ```bash
//! # Query
//! csvql -f people.csv --select "name,age" --where "age > 25" --order "age desc" --limit 1
//!
//! # Mutate
//! csvql -f people.csv --update "age=99" --where "name='B'"
//!
//! # Show help
//! csvql --help
//! ```
//!
//! Exits with status 1 and an `Error:` line on stderr when the operation
//! fails.

use clap::Parser;
use csvql::cli::{self, Args, Renderer};
use csvql::Database;
use eyre::{Result, WrapErr};
use std::io;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    cli::init_logging();
    let args = Args::parse();

    let delimiter = args.delimiter_byte()?;
    let statement = args.statement()?;

    let mut db = Database::builder()
        .path(&args.file)
        .delimiter(delimiter)
        .row_matcher(args.row_matcher()?)
        .open()?;

    tracing::debug!(file = %args.file.display(), ?statement, "executing");
    let result = db.execute(statement)?;

    let stdout = io::stdout();
    let mut renderer = Renderer::new(stdout.lock())
        .raw(args.raw)
        .output(args.output.clone())
        .delimiter(delimiter);
    renderer
        .render(&result)
        .wrap_err("failed to write results")?;

    Ok(())
}
