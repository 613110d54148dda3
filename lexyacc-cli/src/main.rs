mod grammar_io;
mod parse;
mod scan;
mod table;
mod tables;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "lexyacc", about = "Lexical scanner and LR(1) parser construction from declarative grammars")]
pub struct LexyaccArgs {
    /// Suppress diagnostic logging to stderr; the command's own output on
    /// stdout is unaffected.
    #[arg(long, global = true)]
    pub no_log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run only the lexer and print the resulting token stream.
    Scan(ScanArgs),
    /// Run the lexer then the parser and report accept/reject.
    Parse(ParseArgs),
    /// Build and print the ACTION/GOTO tables for a syntactic grammar.
    Tables(TablesArgs),
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Path to the lexical grammar JSON file.
    pub lexical: PathBuf,
    /// Path to the source file to tokenize.
    pub source: PathBuf,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Path to the lexical grammar JSON file.
    pub lexical: PathBuf,
    /// Path to the syntactic grammar JSON file.
    pub syntax: PathBuf,
    /// Path to the source file to parse.
    pub source: PathBuf,
    /// Print the full shift/reduce trace instead of just accept/reject.
    #[arg(long)]
    pub trace: bool,
}

#[derive(Debug, Args)]
pub struct TablesArgs {
    /// Path to the syntactic grammar JSON file.
    pub syntax: PathBuf,
}

fn main() -> ExitCode {
    let args = LexyaccArgs::parse();

    let result = match &args.command {
        Command::Scan(scan_args) => scan::scan(&args, scan_args).map_err(|e| e.to_string()),
        Command::Parse(parse_args) => parse::parse(&args, parse_args).map_err(|e| e.to_string()),
        Command::Tables(tables_args) => tables::tables(&args, tables_args).map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
