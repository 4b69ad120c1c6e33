/*!
Main binary for `jsoncols`.
*/

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};
use std::path::PathBuf;
use std::process::ExitCode;

use dotpath::commands::cols::{self, ColsOptions};
use dotpath::commands::generate::{self, GenerateCommand};
use dotpath::utils;

const EXAMPLES: &str = r#"Examples:
  If myblob.json contains
      {"name": "Doe, Jane", "email":"jane.doe@example.org", "age": 42}

  Get just the name:
      jsoncols -i myblob.json .name
      "Doe, Jane"

  Name and age as pipe delimited columns:
      jsoncols -i myblob.json -d '|' --quote false .name .age
      Doe, Jane|42

  Pipe JSON in and write a CSV row:
      cat myblob.json | jsoncols --csv .name .email .age
      "Doe, Jane",jane.doe@example.org,42"#;

/// Extract values from a JSON document with dot paths and print them as
/// columns.
#[derive(Parser)]
#[command(
    name = "jsoncols",
    version,
    about,
    long_about = None,
    after_long_help = EXAMPLES,
    disable_help_subcommand = true
)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    /// Dot path expressions (e.g., ".name"). None, or "", selects the whole
    /// document
    #[arg(value_name = "EXPRESSION")]
    expressions: Vec<String>,
    /// Read JSON from FILE. If omitted or "-", reads from STDIN
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Write to FILE. If omitted or "-", writes to STDOUT
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Delimiter between columns; "\t" and "\n" are expanded
    #[arg(short, long, default_value = ",")]
    delimiter: String,
    /// Write the columns as a single CSV row
    #[arg(long, action = ArgAction::SetTrue)]
    csv: bool,
    /// Quote string values
    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        value_name = "BOOL"
    )]
    quote: bool,
    /// Pretty-print objects and arrays
    #[arg(short, long, action = ArgAction::SetTrue)]
    pretty: bool,
    /// Add a trailing newline
    #[arg(long = "newline", visible_alias = "nl", action = ArgAction::SetTrue)]
    newline: bool,
    #[command(flatten)]
    verbose: Verbosity<ErrorLevel>,
}

/// Available subcommands for `jsoncols`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Entry point for main binary.
///
/// Errors are logged to STDERR (silenced by `-q`) and turn into a non-zero
/// exit status.
fn main() -> ExitCode {
    let args = Args::parse();
    utils::init_logging(args.verbose.log_level_filter());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(Commands::Generate(cmd)) = args.command {
        return generate::run(cmd, Args::command());
    }

    let input = args.input.as_deref();
    if utils::stdin_is_interactive(input) {
        // No piped input and no file specified
        let mut cmd = Args::command();
        return Ok(cmd.print_help()?);
    }
    let src = utils::read_input(input)?;

    let output = args.output.as_deref();
    let opts = ColsOptions {
        delimiter: utils::normalize_delimiter(&args.delimiter),
        csv: args.csv,
        quote: args.quote,
        pretty: args.pretty,
        color: utils::output_is_terminal(output),
        newline: args.newline,
    };
    log::debug!("jsoncols options: {opts:?}");

    let mut out = utils::open_output(output)?;
    let result = cols::run(&src, &args.expressions, &opts, &mut out);
    utils::ignore_broken_pipe(result)
}
