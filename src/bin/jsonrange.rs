/*!
Main binary for `jsonrange`.
*/

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};
use std::path::PathBuf;
use std::process::ExitCode;

use dotpath::commands::generate::{self, GenerateCommand};
use dotpath::commands::range::{self, RangeOptions};
use dotpath::utils;

const EXAMPLES: &str = r#"Examples:
  List the keys of an object:
      echo '{"name": "Doe, Jane", "age": 42}' | jsonrange
      name
      age

  List the values of an array:
      echo '["one", 2, {"label":"three","value":3}]' | jsonrange --values
      "one"
      2
      {"label":"three","value":3}

  Count the elements, or find the last index:
      echo '["one","two","three"]' | jsonrange --length
      3
      echo '["one","two","three"]' | jsonrange --last
      2

  Range over a nested array, at most two items:
      echo '{"tags": [10,20,30,40,50]}' | jsonrange --values --limit 2 .tags
      10
      20"#;

/// List the keys, indices or values of a JSON object or array.
#[derive(Parser)]
#[command(
    name = "jsonrange",
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
    /// Dot paths selecting the object or array to range over. Defaults to
    /// the whole document
    #[arg(value_name = "DOT_PATH")]
    paths: Vec<String>,
    /// Read JSON from FILE. If omitted or "-", reads from STDIN
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Write to FILE. If omitted or "-", writes to STDOUT
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Delimiter between items; "\t" and "\n" are expanded
    #[arg(short, long, default_value = r"\n")]
    delimiter: String,
    /// Return the values instead of the keys
    #[arg(long, action = ArgAction::SetTrue)]
    values: bool,
    /// Return the number of keys or values
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "last")]
    length: bool,
    /// Return the index of the last element (length - 1), or the last value
    /// with --values
    #[arg(long, action = ArgAction::SetTrue)]
    last: bool,
    /// Limit the number of items output
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
    /// Add a trailing newline
    #[arg(long = "newline", visible_alias = "nl", action = ArgAction::SetTrue)]
    newline: bool,
    #[command(flatten)]
    verbose: Verbosity<ErrorLevel>,
}

/// Available subcommands for `jsonrange`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

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
        let mut cmd = Args::command();
        return Ok(cmd.print_help()?);
    }
    let src = utils::read_input(input)?;

    let opts = RangeOptions {
        delimiter: utils::normalize_delimiter(&args.delimiter),
        values: args.values,
        length: args.length,
        last: args.last,
        limit: args.limit,
        newline: args.newline,
    };
    log::debug!("jsonrange options: {opts:?}");

    let mut out = utils::open_output(args.output.as_deref())?;
    utils::ignore_broken_pipe(range::run(&src, &args.paths, &opts, &mut out))
}
