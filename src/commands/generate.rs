//! `generate` subcommand shared by `jsoncols` and `jsonrange`.
use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs::{self, File};
use std::io::stdout;
use std::path::{Path, PathBuf};

/// Generate shell completions and man page
#[derive(Subcommand, Debug)]
pub enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate a man page to output directory if specified, else the
    /// current directory.
    Man {
        /// The output directory to write the man pages.
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Run a `generate` subcommand for the command-line interface `cmd`.
///
/// # Errors
///
/// Returns an error if a man page could not be written.
pub fn run(generate: GenerateCommand, mut cmd: clap::Command) -> Result<()> {
    match generate {
        GenerateCommand::Shell { shell } => {
            let name = cmd.get_name().to_string();
            let mut out = stdout().lock();
            clap_complete::generate(shell, &mut cmd, name, &mut out);
        }
        GenerateCommand::Man { output_dir } => {
            for page in generate_man_pages(&cmd, output_dir)? {
                println!("Generated: {}", page.display());
            }
        }
    }
    Ok(())
}

/// Write `<name>.1` for `cmd` and `<name>-<sub>.1` for every subcommand,
/// recursively, into `output_dir` (the current directory if `None`).
///
/// Returns the paths written, parents before children.
///
/// # Errors
///
/// Returns an error if the directory or a page could not be written.
pub fn generate_man_pages(
    cmd: &clap::Command,
    output_dir: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Opening current directory")?,
    };
    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create {}", output_dir.display())
    })?;

    let mut written = Vec::new();
    write_pages(cmd.clone(), &output_dir, &mut written)?;
    Ok(written)
}

fn write_pages(
    cmd: clap::Command,
    dir: &Path,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let name = cmd.get_name().to_string();
    let page = dir.join(format!("{name}.1"));
    let mut file = File::create(&page)
        .with_context(|| format!("failed to create {}", page.display()))?;
    clap_mangen::Man::new(cmd.clone()).render(&mut file)?;
    written.push(page);

    for sub in cmd.get_subcommands() {
        // NAME and SYNOPSIS are rendered from the command's own name
        let prefixed = sub
            .clone()
            .name(format!("{name}-{}", sub.get_name()))
            .disable_help_subcommand(true);
        write_pages(prefixed, dir, written)?;
    }
    Ok(())
}
