//! Miscellaneous helpers shared by the command-line tools.

use anyhow::Context as _;
use colored::Colorize;
use serde::Serialize;
use serde_json::ser::{
    CharEscape, CompactFormatter, Formatter, PrettyFormatter, Serializer,
};
use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, IsTerminal, Read, Write};
use std::path::Path;

use crate::value::Value;

/// Read the whole input document from `path`, or from STDIN when `path` is
/// absent or `-`.
///
/// # Errors
///
/// Returns an error if the file or STDIN cannot be read.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => fs::read(path)
            .with_context(|| format!("Failed to read file {}", path.display())),
        _ => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read STDIN")?;
            Ok(buffer)
        }
    }
}

/// Returns `true` when input would come from an interactive terminal, i.e.
/// nothing was piped in and no input file was named.
#[must_use]
pub fn stdin_is_interactive(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p == Path::new("-")) && io::stdin().is_terminal()
}

/// Open the output sink: `path`, or STDOUT when `path` is absent or `-`.
///
/// # Errors
///
/// Returns an error if the output file cannot be created.
pub fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::create(path).with_context(|| {
                format!("Failed to create {}", path.display())
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Returns `true` if output goes to STDOUT and STDOUT is a terminal.
#[must_use]
pub fn output_is_terminal(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p == Path::new("-")) && io::stdout().is_terminal()
}

/// Expand the `\t` and `\n` escapes users type for delimiters on the
/// command line.
#[must_use]
pub fn normalize_delimiter(delimiter: &str) -> String {
    delimiter.replace(r"\n", "\n").replace(r"\t", "\t")
}

/// Set up `env_logger` at `level`, printing records as `level: message`.
pub fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{}: {}",
                record.level().as_str().to_lowercase(),
                record.args()
            )
        })
        .init();
}

/// Treat a broken pipe as success so that piping to tools like `head`
/// exits cleanly.
///
/// # Errors
///
/// Returns any error other than [`ErrorKind::BrokenPipe`].
pub fn ignore_broken_pipe(result: anyhow::Result<()>) -> anyhow::Result<()> {
    match result {
        Err(err)
            if err
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            Ok(())
        }
        other => other,
    }
}

// =============================================================================
// JSON Output
// =============================================================================

/// Write `value` as JSON, compact or pretty, optionally with syntax
/// highlighting.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_json<W: Write>(
    writer: &mut W,
    value: &Value,
    pretty: bool,
    color: bool,
) -> io::Result<()> {
    let result = match (pretty, color) {
        (false, false) => serde_json::to_writer(&mut *writer, value),
        (true, false) => serde_json::to_writer_pretty(&mut *writer, value),
        (false, true) => value.serialize(&mut Serializer::with_formatter(
            &mut *writer,
            Highlighter::new(CompactFormatter),
        )),
        (true, true) => value.serialize(&mut Serializer::with_formatter(
            &mut *writer,
            Highlighter::new(PrettyFormatter::new()),
        )),
    };
    result.map_err(io::Error::from)
}

/// Wraps a [`Formatter`] and paints scalar tokens: keys cyan, strings
/// green, numbers and booleans yellow, `null` dimmed red.
///
/// Layout (indentation, separators) is left to the wrapped formatter.
struct Highlighter<F> {
    inner: F,
    in_key: bool,
    /// The string being written, buffered so it is painted as one token
    string: Option<Vec<u8>>,
}

impl<F> Highlighter<F> {
    const fn new(inner: F) -> Self {
        Self { inner, in_key: false, string: None }
    }
}

impl<F: Formatter> Formatter for Highlighter<F> {
    fn write_null<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        write!(w, "{}", "null".red().dimmed())
    }

    fn write_bool<W: ?Sized + Write>(
        &mut self,
        w: &mut W,
        value: bool,
    ) -> io::Result<()> {
        write!(w, "{}", value.to_string().yellow().bold())
    }

    fn write_number_str<W: ?Sized + Write>(
        &mut self,
        w: &mut W,
        value: &str,
    ) -> io::Result<()> {
        write!(w, "{}", value.yellow())
    }

    fn begin_string<W: ?Sized + Write>(&mut self, _: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();
        self.inner.begin_string(&mut buf)?;
        self.string = Some(buf);
        Ok(())
    }

    fn end_string<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        let mut buf = self.string.take().unwrap_or_default();
        self.inner.end_string(&mut buf)?;
        let text = String::from_utf8(buf).map_err(io::Error::other)?;
        if self.in_key {
            write!(w, "{}", text.as_str().cyan())
        } else {
            write!(w, "{}", text.as_str().green())
        }
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        w: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        match self.string.as_mut() {
            Some(buf) => self.inner.write_string_fragment(buf, fragment),
            None => self.inner.write_string_fragment(w, fragment),
        }
    }

    fn write_char_escape<W: ?Sized + Write>(
        &mut self,
        w: &mut W,
        char_escape: CharEscape,
    ) -> io::Result<()> {
        match self.string.as_mut() {
            Some(buf) => self.inner.write_char_escape(buf, char_escape),
            None => self.inner.write_char_escape(w, char_escape),
        }
    }

    fn begin_array<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.inner.begin_array(w)
    }

    fn end_array<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.inner.end_array(w)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        w: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(w, first)
    }

    fn end_array_value<W: ?Sized + Write>(
        &mut self,
        w: &mut W,
    ) -> io::Result<()> {
        self.inner.end_array_value(w)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.inner.begin_object(w)
    }

    fn end_object<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.inner.end_object(w)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        w: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.in_key = true;
        self.inner.begin_object_key(w, first)
    }

    fn end_object_key<W: ?Sized + Write>(
        &mut self,
        w: &mut W,
    ) -> io::Result<()> {
        self.in_key = false;
        self.inner.end_object_key(w)
    }

    fn begin_object_value<W: ?Sized + Write>(
        &mut self,
        w: &mut W,
    ) -> io::Result<()> {
        self.inner.begin_object_value(w)
    }

    fn end_object_value<W: ?Sized + Write>(
        &mut self,
        w: &mut W,
    ) -> io::Result<()> {
        self.inner.end_object_value(w)
    }
}
