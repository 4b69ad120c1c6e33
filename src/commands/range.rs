//! Key and value listing behind `jsonrange`.
use anyhow::{Context, Result, bail};
use std::io::Write;

use crate::path::{self, DotPathError, ROOT};
use crate::value::Value;

/// Output settings for [`run`].
#[derive(Debug, Clone)]
pub struct RangeOptions {
    /// Separator between listed items, with escapes already expanded
    pub delimiter: String,
    /// List values instead of keys or indices
    pub values: bool,
    /// Print the number of entries
    pub length: bool,
    /// Print the last index, or the last value with `values`
    pub last: bool,
    /// Maximum number of items listed
    pub limit: Option<usize>,
    /// Append a trailing newline once everything is written
    pub newline: bool,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            delimiter: "\n".to_string(),
            values: false,
            length: false,
            last: false,
            limit: None,
            newline: false,
        }
    }
}

/// Range over the object or array each of `paths` selects in the JSON
/// document `src`. No paths means `.`.
///
/// # Errors
///
/// Returns an error if `src` is not JSON, a path fails to evaluate or
/// selects a scalar, or writing fails.
pub fn run<W: Write>(
    src: &[u8],
    paths: &[String],
    opts: &RangeOptions,
    out: &mut W,
) -> Result<()> {
    let root = Value::decode(src)
        .map_err(|cause| DotPathError::DecodeError { cause })?;

    let default_paths = [ROOT.to_string()];
    let paths = if paths.is_empty() { &default_paths[..] } else { paths };

    for p in paths {
        log::debug!("ranging over {p:?}");
        let target = path::eval(p, &root)
            .with_context(|| format!("evaluating {p:?}"))?;

        if opts.length {
            write!(out, "{}", entry_count(&target)?)?;
        } else if opts.last {
            // `--limit` applies to listings, not to the last entry
            let empty = || format!("{} at {p:?} is empty", target.shape());
            if opts.values {
                let item = values(&target, None)?.last().with_context(empty)?;
                write!(out, "{}", item.to_json()?)?;
            } else {
                let count = entry_count(&target)?;
                let last = count.checked_sub(1).with_context(empty)?;
                write!(out, "{last}")?;
            }
        } else {
            let items = if opts.values {
                values(&target, opts.limit)?
                    .map(Value::to_json)
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                keys(&target, opts.limit)?
            };
            writeln!(out, "{}", items.join(&opts.delimiter))?;
        }
    }
    if opts.newline {
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Number of keys or elements.
fn entry_count(value: &Value) -> Result<usize> {
    match value {
        Value::Object(map) => Ok(map.len()),
        Value::Array(items) => Ok(items.len()),
        other => bail!("{} does not support range", other.shape()),
    }
}

/// Object keys in document order, or array indices.
fn keys(value: &Value, limit: Option<usize>) -> Result<Vec<String>> {
    let limit = limit.unwrap_or(usize::MAX);
    match value {
        Value::Object(map) => Ok(map.keys().take(limit).cloned().collect()),
        Value::Array(items) => {
            Ok((0..items.len()).take(limit).map(|i| i.to_string()).collect())
        }
        other => bail!("{} does not support range", other.shape()),
    }
}

/// Values in document order.
fn values(
    value: &Value,
    limit: Option<usize>,
) -> Result<Box<dyn Iterator<Item = &Value> + '_>> {
    let items: Box<dyn Iterator<Item = &Value> + '_> = match value {
        Value::Object(map) => Box::new(map.values()),
        Value::Array(items) => Box::new(items.iter()),
        other => bail!("{} does not support range", other.shape()),
    };
    Ok(Box::new(items.take(limit.unwrap_or(usize::MAX))))
}
