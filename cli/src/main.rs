use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use ljob_core::Section;
use ljob_parser::output::{OutputFormat, format_report, format_store};
use ljob_parser::{ParsedListing, parse_listing, parse_listing_with_report};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Table,
    Json,
    Yaml,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Table => Self::Table,
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
        }
    }
}

/// CLI-side section selector for scoped lookups.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliSection {
    Header,
    JobInformation,
    AgentInformation,
    Prose,
}

impl From<CliSection> for Section {
    fn from(section: CliSection) -> Self {
        match section {
            CliSection::Header => Self::Header,
            CliSection::JobInformation => Self::JobInformation,
            CliSection::AgentInformation => Self::AgentInformation,
            CliSection::Prose => Self::Prose,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ljob-extract")]
#[command(about = "Parse CA 7 LJOB listings into queryable attribute stores")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a listing from a file and print its attributes.
    ParseFile(ParseFileArgs),
    /// Parse a listing from stdin and print its attributes.
    ParseStdin(ParseStdinArgs),
    /// Look up a single attribute value in a listing file.
    Get(GetArgs),
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    /// Listing file to parse.
    path: PathBuf,
    /// Output format for the attribute store.
    #[arg(long, value_enum, default_value = "table")]
    format: CliOutputFormat,
    /// Also print the parse report (coverage, unresolved lines).
    #[arg(long)]
    report: bool,
}

#[derive(Debug, Args)]
struct ParseStdinArgs {
    /// Output format for the attribute store.
    #[arg(long, value_enum, default_value = "table")]
    format: CliOutputFormat,
    /// Also print the parse report (coverage, unresolved lines).
    #[arg(long)]
    report: bool,
}

#[derive(Debug, Args)]
struct GetArgs {
    /// Listing file to parse.
    path: PathBuf,
    /// Attribute label, matched case-insensitively.
    token: String,
    /// Restrict the lookup to one section instead of precedence order.
    #[arg(long, value_enum)]
    section: Option<CliSection>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::ParseFile(args) => {
            let Some(listing) = read_file(&args.path) else {
                return ExitCode::FAILURE;
            };
            parse_and_print(&listing, args.format, args.report)
        }
        Command::ParseStdin(args) => {
            let Some(listing) = read_stdin() else {
                return ExitCode::FAILURE;
            };
            parse_and_print(&listing, args.format, args.report)
        }
        Command::Get(args) => {
            let Some(listing) = read_file(&args.path) else {
                return ExitCode::FAILURE;
            };
            get_token(&listing, &args.token, args.section)
        }
    }
}

fn parse_and_print(listing: &str, format: CliOutputFormat, with_report: bool) -> ExitCode {
    if with_report {
        let run = parse_listing_with_report(listing);
        match format_report(&run.report, format.into()) {
            Ok(rendered) => println!("{rendered}"),
            Err(error) => {
                eprintln!("error: {error}");
                return ExitCode::FAILURE;
            }
        }
        match run.result {
            Ok(parsed) => print_store(&parsed, format),
            Err(error) => {
                eprintln!("error: {error}");
                ExitCode::FAILURE
            }
        }
    } else {
        match parse_listing(listing) {
            Ok(parsed) => {
                for warning in &parsed.warnings {
                    eprintln!("warning: {warning}");
                }
                print_store(&parsed, format)
            }
            Err(error) => {
                eprintln!("error: {error}");
                ExitCode::FAILURE
            }
        }
    }
}

fn print_store(parsed: &ParsedListing, format: CliOutputFormat) -> ExitCode {
    match format_store(&parsed.store, format.into()) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn get_token(listing: &str, token: &str, section: Option<CliSection>) -> ExitCode {
    let parsed = match parse_listing(listing) {
        Ok(parsed) => parsed,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };
    let value = match section {
        Some(section) => parsed.store.get_in(section.into(), token),
        None => parsed.store.get(token),
    };
    match value {
        Some(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("{token}: absent");
            ExitCode::from(2)
        }
    }
}

fn read_file(path: &PathBuf) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(listing) => Some(listing),
        Err(error) => {
            eprintln!("error: cannot read {}: {error}", path.display());
            None
        }
    }
}

fn read_stdin() -> Option<String> {
    let mut listing = String::new();
    match std::io::stdin().read_to_string(&mut listing) {
        Ok(_) => Some(listing),
        Err(error) => {
            eprintln!("error: cannot read stdin: {error}");
            None
        }
    }
}
