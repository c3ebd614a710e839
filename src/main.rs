//! goinspect CLI: list declarations and struct fields of Go source files.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use goinspect::{FieldsConfig, ListConfig, OutputEncoding};

/// Lists declarations of Go source files
///
/// Examples:
///   goinspect list funcs -p '^New' *.go
///   goinspect list fields --columns name,type,tag[json] models.go User
#[derive(Parser, Debug)]
#[command(name = "goinspect")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List declarations of the source files
    #[command(subcommand)]
    List(ListCommand),
}

#[derive(Subcommand, Debug)]
enum ListCommand {
    /// List functions and methods
    Funcs(NamesArgs),
    /// List variables and constants
    Values(NamesArgs),
    /// List types
    Types(NamesArgs),
    /// List fields of a struct or methods of an interface
    Fields(FieldsArgs),
}

#[derive(Args, Debug)]
struct NamesArgs {
    /// Only print names matching the pattern
    #[arg(short, long)]
    pattern: Option<String>,

    /// Go source files, processed in order
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct FieldsArgs {
    /// Only print fields whose name matches the pattern
    #[arg(short, long)]
    pattern: Option<String>,

    /// Follow every column value with a NUL byte instead of joining by spaces
    #[arg(short = '0', long)]
    print0: bool,

    /// Columns to output: name, type, tags, tag[KEY]
    #[arg(long, value_delimiter = ',', default_value = "name")]
    columns: Vec<String>,

    /// Go source file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Name of the struct or interface type
    #[arg(value_name = "TYPE")]
    type_name: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    // Records written before a failure still reach stdout.
    let result = match cli.command {
        Command::List(cmd) => run_list(cmd, &mut out),
    };
    let flushed = out.flush().context("flushing output");
    result.and(flushed)
}

fn run_list(cmd: ListCommand, out: &mut impl Write) -> Result<()> {
    match cmd {
        ListCommand::Funcs(args) => {
            let config = ListConfig::new(args.pattern.as_deref())?;
            goinspect::list_funcs(&args.files, &config, out)?;
        }
        ListCommand::Values(args) => {
            let config = ListConfig::new(args.pattern.as_deref())?;
            goinspect::list_values(&args.files, &config, out)?;
        }
        ListCommand::Types(args) => {
            let config = ListConfig::new(args.pattern.as_deref())?;
            goinspect::list_types(&args.files, &config, out)?;
        }
        ListCommand::Fields(args) => {
            let encoding = if args.print0 {
                OutputEncoding::NulTerminated
            } else {
                OutputEncoding::Lines
            };
            let config = FieldsConfig::new(args.pattern.as_deref(), &args.columns, encoding)?;
            goinspect::list_fields(&args.file, &args.type_name, &config, out)
                .with_context(|| format!("listing fields of {}", args.type_name))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fields_columns_split_on_commas() {
        let cli = Cli::try_parse_from([
            "goinspect",
            "list",
            "fields",
            "-0",
            "--columns",
            "name,tag[json]",
            "m.go",
            "User",
        ])
        .unwrap();
        let Command::List(ListCommand::Fields(args)) = cli.command else {
            panic!("expected fields");
        };
        assert!(args.print0);
        assert_eq!(args.columns, ["name", "tag[json]"]);
        assert_eq!(args.type_name, "User");
    }

    #[test]
    fn list_requires_a_file() {
        assert!(Cli::try_parse_from(["goinspect", "list", "funcs"]).is_err());
    }
}
