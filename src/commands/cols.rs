//! Column extraction behind `jsoncols`: evaluate several dot paths against
//! one document and write the results side by side.
use anyhow::{Context, Result, bail};
use std::io::Write;

use crate::path::{self, DotPathError, ROOT};
use crate::utils::write_json;
use crate::value::Value;

/// Output settings for [`run`].
#[derive(Debug, Clone)]
pub struct ColsOptions {
    /// Column separator, with escapes already expanded
    pub delimiter: String,
    /// Write a single CSV row instead of delimited text
    pub csv: bool,
    /// Quote string results in delimited text mode
    pub quote: bool,
    /// Pretty-print objects and arrays
    pub pretty: bool,
    /// Syntax-highlight objects and arrays
    pub color: bool,
    /// Append a trailing newline in delimited text mode
    pub newline: bool,
}

impl Default for ColsOptions {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            csv: false,
            quote: true,
            pretty: false,
            color: false,
            newline: false,
        }
    }
}

/// Evaluate each of `expressions` against the JSON document `src` and write
/// the results to `out`. No expressions, or an empty one, means `.`.
///
/// # Errors
///
/// Returns an error if `src` is not JSON, an expression fails to evaluate,
/// or writing fails.
pub fn run<W: Write>(
    src: &[u8],
    expressions: &[String],
    opts: &ColsOptions,
    out: &mut W,
) -> Result<()> {
    let expressions: Vec<&str> = if expressions.is_empty() {
        vec![ROOT]
    } else {
        expressions
            .iter()
            .map(|e| if e.is_empty() { ROOT } else { e.as_str() })
            .collect()
    };

    let root = Value::decode(src)
        .map_err(|cause| DotPathError::DecodeError { cause })?;

    if opts.csv {
        return write_csv_row(&root, &expressions, opts, out);
    }

    for (i, expr) in expressions.iter().enumerate() {
        if i > 0 {
            out.write_all(opts.delimiter.as_bytes())?;
        }
        if *expr == ROOT {
            // The whole document is echoed as it was given
            out.write_all(src)?;
            continue;
        }
        let result = evaluate(expr, &root)?;
        match &*result {
            Value::String(s) if opts.quote => {
                out.write_all(serde_json::to_string(s)?.as_bytes())?;
            }
            Value::String(s) => out.write_all(s.as_bytes())?,
            Value::Number(n) => write!(out, "{n}")?,
            other => write_json(out, other, opts.pretty, opts.color)?,
        }
    }
    if opts.newline {
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn evaluate<'a>(
    expr: &str,
    root: &'a Value,
) -> Result<std::borrow::Cow<'a, Value>> {
    log::debug!("evaluating {expr:?}");
    path::eval(expr, root).with_context(|| format!("evaluating {expr:?}"))
}

/// Write the results as one CSV row. Strings and numbers become bare
/// cells; anything else is embedded as JSON text.
fn write_csv_row<W: Write>(
    root: &Value,
    expressions: &[&str],
    opts: &ColsOptions,
    out: &mut W,
) -> Result<()> {
    let delimiter = match opts.delimiter.chars().next() {
        None => b',',
        Some(c) => match u8::try_from(c) {
            Ok(byte) if c.is_ascii() => byte,
            _ => bail!("CSV delimiter {c:?} must be an ASCII character"),
        },
    };

    let row = expressions
        .iter()
        .map(|expr| -> Result<String> {
            let result = evaluate(expr, root)?;
            let cell = match &*result {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                other if opts.pretty => other.to_json_pretty()?,
                other => other.to_json()?,
            };
            Ok(cell)
        })
        .collect::<Result<Vec<String>>>()?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(&mut *out);
    writer.write_record(&row)?;
    writer.flush()?;
    Ok(())
}
