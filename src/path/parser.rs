/*!
# Dot Path Parser

Parser for converting dot path strings into [`DotPath`] objects.

## Examples

```rust
use dotpath::path::{DotPath, Segment, parser};
let parsed: DotPath = parser::parse_dot_path(".works[1:3].pubdate")
    .expect("Invalid dot path");
assert_eq!(
    parsed.segments(),
    [
        Segment::key("works"),
        Segment::Slice(Some(1), Some(3)),
        Segment::key("pubdate"),
    ]
);
```

## Errors

A path that does not start with `.` or `[` and has no `.` anywhere is
rejected, as is anything the grammar does not accept:

```rust
use dotpath::path::{DotPathError, parser};

let result = parser::parse_dot_path("name");
assert!(matches!(result, Err(DotPathError::InvalidPath { .. })));

let result = parser::parse_dot_path(".list[one]");
assert!(matches!(result, Err(DotPathError::InvalidIndex { .. })));
```
*/

use pest::Parser;
use pest::error::LineColLocation;
use pest_derive::Parser;

use super::{DotPath, DotPathError, Segment};

/// Parser for turning raw dot path strings into [`DotPath`] objects.
#[derive(Parser)]
#[grammar = "path/grammar/dotpath.pest"]
pub struct DotPathParser;

/// Parse an input dot path string into a [`DotPath`]
///
/// # Errors
///
/// Returns [`DotPathError::InvalidPath`] when the text is not a dot path and
/// [`DotPathError::InvalidIndex`] when bracket content is not an integer.
pub fn parse_dot_path(input: &str) -> Result<DotPath, DotPathError> {
    let anchored = input.starts_with('.') || input.starts_with('[');
    if !anchored && !input.contains('.') {
        return Err(invalid_path(
            input,
            "a dot path starts with '.' or '[', or contains a '.'".to_string(),
        ));
    }

    let mut pairs =
        DotPathParser::parse(Rule::dot_path, input).map_err(|e| {
            invalid_path(input, describe_pest_error(e))
        })?;
    let dot_path = pairs
        .next()
        .ok_or_else(|| invalid_path(input, "empty dot path".to_string()))?;

    let segments = dot_path
        .into_inner()
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .map(parse_segment)
        .collect::<Result<Vec<Segment>, _>>()?;

    log::debug!("parsed dot path {input:?} into {segments:?}");

    DotPath::new(segments)
}

fn invalid_path(input: &str, reason: String) -> DotPathError {
    DotPathError::InvalidPath { path: input.to_string(), reason }
}

/// Flatten a pest error into a one-line reason with a column number.
fn describe_pest_error(err: pest::error::Error<Rule>) -> String {
    let err = err.renamed_rules(|rule| match rule {
        Rule::field => "key".to_string(),
        Rule::quoted_key | Rule::quoted_inner | Rule::escape => {
            "quoted key".to_string()
        }
        Rule::slice | Rule::bound => "slice".to_string(),
        Rule::index => "index".to_string(),
        Rule::EOI => "end of path".to_string(),
        other => format!("{other:?}"),
    });
    let column = match err.line_col {
        LineColLocation::Pos((_, col))
        | LineColLocation::Span((_, col), _) => col,
    };
    format!("{} at column {column}", err.variant.message())
}

/// Parse one `field`, `quoted_key`, `slice` or `index` pair into a
/// [`Segment`].
fn parse_segment(
    pair: pest::iterators::Pair<Rule>,
) -> Result<Segment, DotPathError> {
    match pair.as_rule() {
        Rule::field => Ok(Segment::Key(pair.as_str().to_string())),
        Rule::quoted_key => {
            let inner = pair.into_inner().next().map_or("", |p| p.as_str());
            Ok(Segment::Key(unescape_quoted_key(inner)))
        }
        Rule::slice => {
            let mut bounds = pair.into_inner();
            let start = parse_bound(bounds.next())?;
            let end = parse_bound(bounds.next())?;
            Ok(Segment::Slice(start, end))
        }
        Rule::index => {
            let text = pair.as_str().trim();
            if text.is_empty() {
                // `[]` selects every element
                return Ok(Segment::Slice(None, None));
            }
            text.parse::<i64>().map(Segment::Index).map_err(|_| {
                DotPathError::InvalidIndex { text: text.to_string() }
            })
        }
        rule => Err(DotPathError::InvalidPath {
            path: pair.as_str().to_string(),
            reason: format!("unexpected {rule:?}"),
        }),
    }
}

/// Parse an optional slice bound; an empty bound is open.
fn parse_bound(
    pair: Option<pest::iterators::Pair<Rule>>,
) -> Result<Option<usize>, DotPathError> {
    let text = pair.map_or("", |p| p.as_str()).trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<usize>()
        .map(Some)
        .map_err(|_| DotPathError::InvalidIndex { text: text.to_string() })
}

/// Resolve `\"` and `\\` inside a quoted key.
fn unescape_quoted_key(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(escaped);
            }
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(input: &str) -> Vec<Segment> {
        parse_dot_path(input).unwrap().segments().to_vec()
    }

    #[test]
    fn parse_single_key() {
        assert_eq!(segments(".name"), [Segment::key("name")]);
    }

    #[test]
    fn parse_without_leading_dot() {
        assert_eq!(
            segments("name.family"),
            [Segment::key("name"), Segment::key("family")]
        );
    }

    #[test]
    fn parse_bare_index() {
        assert_eq!(segments("[0]"), [Segment::Index(0)]);
        assert_eq!(segments(".[12]"), [Segment::Index(12)]);
    }

    #[test]
    fn parse_key_index_and_quoted_key() {
        assert_eq!(
            segments(r#".author[0]["@id"]"#),
            [Segment::key("author"), Segment::Index(0), Segment::key("@id")]
        );
    }

    #[test]
    fn quoted_key_may_hold_reserved_chars() {
        assert_eq!(
            segments(r#"["a.b"]["[x]"]["say \"hi\" \\o/"]"#),
            [
                Segment::key("a.b"),
                Segment::key("[x]"),
                Segment::key(r#"say "hi" \o/"#)
            ]
        );
    }

    #[test]
    fn spaces_inside_brackets() {
        assert_eq!(
            segments(r#".a[ 1 ][ "b" ]"#),
            [Segment::key("a"), Segment::Index(1), Segment::key("b")]
        );
    }

    #[test]
    fn parse_slices() {
        assert_eq!(
            segments(".works[:].title"),
            [
                Segment::key("works"),
                Segment::Slice(None, None),
                Segment::key("title")
            ]
        );
        assert_eq!(
            segments(".works[1:3]"),
            [Segment::key("works"), Segment::Slice(Some(1), Some(3))]
        );
        assert_eq!(
            segments(".count_string[]"),
            [Segment::key("count_string"), Segment::Slice(None, None)]
        );
        assert_eq!(segments("[2:]"), [Segment::Slice(Some(2), None)]);
    }

    #[test]
    fn negative_index_parses() {
        assert_eq!(segments("[-1]"), [Segment::Index(-1)]);
    }

    #[test]
    fn parse_empty() {
        assert!(matches!(
            parse_dot_path(""),
            Err(DotPathError::InvalidPath { .. })
        ));
    }

    #[test]
    fn lone_dot_has_no_segments() {
        assert!(matches!(
            parse_dot_path("."),
            Err(DotPathError::InvalidPath { .. })
        ));
    }

    #[test]
    fn bare_word_is_not_a_dot_path() {
        let err = parse_dot_path("name").unwrap_err();
        assert!(matches!(
            err,
            DotPathError::InvalidPath { ref path, .. } if path == "name"
        ));
    }

    #[test]
    fn malformed_paths() {
        for input in [
            "a..b",
            ".a.",
            ".a[0",
            ".a]",
            r#".a["b]"#,
            r#".a["b"c]"#,
            ".a[1:2:3]",
            "..",
        ] {
            assert!(
                matches!(
                    parse_dot_path(input),
                    Err(DotPathError::InvalidPath { .. })
                ),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn parse_invalid_number() {
        let err = parse_dot_path(".list[one]").unwrap_err();
        assert!(matches!(
            err,
            DotPathError::InvalidIndex { ref text } if text == "one"
        ));
        assert!(matches!(
            parse_dot_path(".list[1.5]"),
            Err(DotPathError::InvalidIndex { .. })
        ));
        assert!(matches!(
            parse_dot_path(".list[-1:]"),
            Err(DotPathError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn error_reason_names_the_column() {
        let err = parse_dot_path("a..b").unwrap_err();
        let DotPathError::InvalidPath { reason, .. } = err else {
            panic!("expected InvalidPath, got {err:?}");
        };
        assert!(reason.contains("column"), "{reason}");
    }
}
