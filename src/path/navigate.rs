//! Walks a [`Value`] tree one [`Segment`] at a time.
use std::borrow::Cow;

use super::{DotPathError, Segment};
use crate::value::{Shape, Value};

/// Follow `segments` from `value`, returning the value reached after the
/// last one.
///
/// Lookups borrow from `value`; a slice builds a new array, and any
/// segments after it are applied to every selected element.
///
/// # Errors
///
/// Returns the [`DotPathError`] describing the first step that could not be
/// taken, or [`DotPathError::PathExhausted`] for an empty segment list.
pub fn navigate<'a>(
    segments: &[Segment],
    value: &'a Value,
) -> Result<Cow<'a, Value>, DotPathError> {
    let Some((segment, rest)) = segments.split_first() else {
        return Err(DotPathError::PathExhausted);
    };

    log::trace!("applying {segment} to {}", value.shape());

    match (segment, value) {
        (Segment::Key(key), Value::Object(map)) => {
            let found = map
                .get(key)
                .ok_or_else(|| DotPathError::KeyNotFound { key: key.clone() })?;
            descend(rest, found)
        }
        (Segment::Index(idx), Value::Array(items)) => {
            let found = usize::try_from(*idx)
                .ok()
                .and_then(|i| items.get(i))
                .ok_or(DotPathError::IndexOutOfBounds {
                    index: *idx,
                    length: items.len(),
                })?;
            descend(rest, found)
        }
        (Segment::Slice(start, end), Value::Array(items)) => {
            let selected = select(items, *start, *end)?;
            if rest.is_empty() {
                return Ok(Cow::Owned(Value::Array(selected.to_vec())));
            }
            // Map the remaining path over every element of the slice
            let mapped = selected
                .iter()
                .map(|item| navigate(rest, item).map(Cow::into_owned))
                .collect::<Result<Vec<Value>, _>>()?;
            Ok(Cow::Owned(Value::Array(mapped)))
        }
        (Segment::Key(_), other) => Err(DotPathError::TypeMismatch {
            expected: Shape::Object,
            actual: other.shape(),
        }),
        (Segment::Index(_) | Segment::Slice(..), other) => {
            Err(DotPathError::TypeMismatch {
                expected: Shape::Array,
                actual: other.shape(),
            })
        }
    }
}

/// Return `found` if the path ends here, else keep walking.
fn descend<'a>(
    rest: &[Segment],
    found: &'a Value,
) -> Result<Cow<'a, Value>, DotPathError> {
    if rest.is_empty() {
        Ok(Cow::Borrowed(found))
    } else {
        navigate(rest, found)
    }
}

/// Resolve a half-open slice against `items`, defaulting to the whole array.
fn select(
    items: &[Value],
    start: Option<usize>,
    end: Option<usize>,
) -> Result<&[Value], DotPathError> {
    let length = items.len();
    let start = start.unwrap_or(0);
    let end = end.unwrap_or(length);

    if end > length {
        return Err(out_of_bounds(end, length));
    }
    if start > end {
        return Err(out_of_bounds(start, length));
    }
    Ok(&items[start..end])
}

fn out_of_bounds(index: usize, length: usize) -> DotPathError {
    DotPathError::IndexOutOfBounds {
        index: i64::try_from(index).unwrap_or(i64::MAX),
        length,
    }
}
