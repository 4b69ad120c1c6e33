//! # Dot Path Evaluation
//!
//! A compact notation for addressing a node inside a JSON tree:
//! - `.name` or `name.family` descend into object keys
//! - `[3]` selects an array element
//! - `["@id"]` selects a key containing reserved characters
//! - `[1:3]`, `[2:]`, `[:]`, `[]` select array slices; segments after a
//!   slice apply to every element
//! - `.` on its own selects the whole document
//!
//! ```
//! use dotpath::eval_json;
//!
//! let src = br#"{"author": [{"@id": "A"}]}"#;
//! let value = eval_json(r#".author[0]["@id"]"#, src).unwrap();
//! assert_eq!(value.as_str(), Some("A"));
//! ```

pub mod ast;
pub mod error;
pub mod navigate;
pub mod parser;

use std::borrow::Cow;

use crate::value::Value;

// Re-exports
pub use ast::*;
pub use error::DotPathError;
pub use navigate::navigate;
pub use parser::parse_dot_path;

/// The path that selects the root value itself.
pub const ROOT: &str = ".";

impl DotPath {
    /// Evaluate this path against `root`.
    ///
    /// # Errors
    ///
    /// Returns the [`DotPathError`] describing why navigation stopped.
    pub fn eval<'a>(
        &self,
        root: &'a Value,
    ) -> Result<Cow<'a, Value>, DotPathError> {
        navigate(self.segments(), root)
    }
}

/// Evaluate the dot path `path` against an already decoded `root`.
///
/// # Errors
///
/// Returns [`DotPathError::InvalidPath`] or [`DotPathError::InvalidIndex`]
/// if `path` does not parse, otherwise the navigation error for the first
/// step that could not be taken.
pub fn eval<'a>(
    path: &str,
    root: &'a Value,
) -> Result<Cow<'a, Value>, DotPathError> {
    if path == ROOT {
        return Ok(Cow::Borrowed(root));
    }
    path.parse::<DotPath>()?.eval(root)
}

/// Decode `src` as JSON, preserving numbers as decimal text, and evaluate
/// the dot path `path` against it.
///
/// # Errors
///
/// Returns [`DotPathError::DecodeError`] if `src` is not valid JSON,
/// otherwise whatever [`eval`] returns.
pub fn eval_json(path: &str, src: &[u8]) -> Result<Value, DotPathError> {
    let root = Value::decode(src)
        .map_err(|cause| DotPathError::DecodeError { cause })?;
    eval(path, &root).map(Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Shape;

    /// Document with nested objects, string and number arrays, and an array
    /// of objects.
    const WORKS: &str = r#"{
        "display_name": "Fred Zip",
        "sort_name": "Zip, Fred",
        "count_string": ["One", "Two", "Three"],
        "count_number": [1, 2, 3],
        "name": { "first": "Fred", "last": "Zip" },
        "works": [
            { "title": "One",
              "pubdate": { "year": 1992, "month": 10, "day": 23 } },
            { "title": "Two",
              "pubdate": { "year": 2017, "month": 2, "day": 21 } },
            { "title": "Three",
              "pubdate": { "year": 2003, "month": 12, "day": 1 } }
        ]
    }"#;

    fn json(src: &str) -> Value {
        src.parse().unwrap()
    }

    #[test]
    fn scenario_key_in_object() {
        let src = concat!(
            r#"{"name": "Doe, Jane", "email":"jane.doe@example.org", "#,
            r#""age": 42}"#,
        )
        .as_bytes();
        assert_eq!(eval_json(".name", src).unwrap(), Value::from("Doe, Jane"));
    }

    #[test]
    fn scenario_index_in_array() {
        let src = br#"["one", 2, {"label":"three","value":3}]"#;
        assert_eq!(eval_json("[0]", src).unwrap(), Value::from("one"));
    }

    #[test]
    fn scenario_quoted_key_after_index() {
        let src = br#"{"author":[{"@id":"A"}]}"#;
        assert_eq!(
            eval_json(r#".author[0]["@id"]"#, src).unwrap(),
            Value::from("A")
        );
    }

    #[test]
    fn scenario_missing_key() {
        let err = eval_json(".b", br#"{"a":1}"#).unwrap_err();
        assert!(
            matches!(err, DotPathError::KeyNotFound { ref key } if key == "b")
        );
    }

    #[test]
    fn scenario_index_out_of_bounds() {
        let err = eval_json("[5]", b"[1,2,3]").unwrap_err();
        assert!(matches!(
            err,
            DotPathError::IndexOutOfBounds { index: 5, length: 3 }
        ));
    }

    #[test]
    fn scenario_nested_number_keeps_decimal_text() {
        let found = eval_json(".a.b.c", br#"{"a":{"b":{"c":42}}}"#).unwrap();
        let number = found.as_number().unwrap();
        assert_eq!(number.to_string(), "42");
        assert_eq!(number.as_i64(), Some(42));
    }

    #[test]
    fn large_numbers_survive() {
        let src = br#"{"id": 123456789012345678901234567890.000}"#;
        let found = eval_json(".id", src).unwrap();
        assert_eq!(
            found.to_json().unwrap(),
            "123456789012345678901234567890.000"
        );
    }

    #[test]
    fn root_selects_everything() {
        for src in [
            r#""Hello World""#,
            "1",
            r#"{"greeting": "Hello World"}"#,
            "[1,2,3]",
            "null",
        ] {
            let root = json(src);
            assert_eq!(*eval(ROOT, &root).unwrap(), root);
        }
    }

    #[test]
    fn single_key_returns_value() {
        let root = json(r#"{"k": {"v": [true, null]}, "other": 1}"#);
        assert_eq!(
            *eval(".k", &root).unwrap(),
            json(r#"{"v": [true, null]}"#)
        );
    }

    #[test]
    fn every_index_in_bounds() {
        let root = json(r#"["a", 1, null, {"x": 2}, [3]]"#);
        let items = root.as_array().unwrap();
        for (i, item) in items.iter().enumerate() {
            assert_eq!(*eval(&format!("[{i}]"), &root).unwrap(), *item);
        }
        for i in [items.len(), items.len() + 10] {
            assert!(matches!(
                eval(&format!("[{i}]"), &root),
                Err(DotPathError::IndexOutOfBounds { .. })
            ));
        }
        assert!(matches!(
            eval("[-1]", &root),
            Err(DotPathError::IndexOutOfBounds { index: -1, length: 5 })
        ));
    }

    #[test]
    fn chained_paths_match_manual_nesting() {
        let root = json(WORKS);
        for (outer, inner) in [
            (".name", ".first"),
            (".works", "[1]"),
            (".works[2]", ".pubdate"),
            (".works[0].pubdate", ".year"),
        ] {
            let chained = eval(&format!("{outer}{inner}"), &root).unwrap();
            let first = eval(outer, &root).unwrap();
            let nested = eval(inner, &first).unwrap();
            assert_eq!(*chained, *nested, "{outer}{inner}");
        }
    }

    #[test]
    fn bytes_and_value_agree() {
        let root = json(WORKS);
        for path in
            [".display_name", ".works[1].title", ".count_number", ".name"]
        {
            assert_eq!(
                eval_json(path, WORKS.as_bytes()).unwrap(),
                *eval(path, &root).unwrap()
            );
        }
    }

    #[test]
    fn slices_over_documents() {
        let root = json(WORKS);
        assert_eq!(
            eval(".works[:].title", &root).unwrap().to_json().unwrap(),
            r#"["One","Two","Three"]"#
        );
        assert_eq!(
            eval(".count_string[]", &root).unwrap().to_json().unwrap(),
            r#"["One","Two","Three"]"#
        );
        let pubdates = eval(".works[1:3].pubdate", &root).unwrap();
        assert_eq!(
            pubdates.to_json().unwrap(),
            concat!(
                r#"[{"year":2017,"month":2,"day":21},"#,
                r#"{"year":2003,"month":12,"day":1}]"#,
            )
        );
    }

    #[test]
    fn wrong_shape_is_an_error_not_a_panic() {
        let root = json(WORKS);
        assert!(matches!(
            eval(".count_string.first", &root),
            Err(DotPathError::TypeMismatch {
                expected: Shape::Object,
                actual: Shape::Array
            })
        ));
        assert!(matches!(
            eval(".name[0]", &root),
            Err(DotPathError::TypeMismatch {
                expected: Shape::Array,
                actual: Shape::Object
            })
        ));
        assert!(matches!(
            eval(".display_name.x", &root),
            Err(DotPathError::TypeMismatch { actual: Shape::String, .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        for src in [
            &b""[..],
            &b"{"[..],
            &b"[1,"[..],
            &b"{\"a\" 1}"[..],
            &b"nul"[..],
            &b"\xff"[..],
        ] {
            let err = eval_json(".a", src).unwrap_err();
            assert!(matches!(err, DotPathError::DecodeError { .. }), "{err:?}");
            assert!(std::error::Error::source(&err).is_some());
        }
    }

    #[test]
    fn invalid_paths_propagate() {
        let root = json(WORKS);
        assert!(matches!(
            eval("", &root),
            Err(DotPathError::InvalidPath { .. })
        ));
        assert!(matches!(
            eval("display_name", &root),
            Err(DotPathError::InvalidPath { .. })
        ));
        assert!(matches!(
            eval(".works[x]", &root),
            Err(DotPathError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn parsed_path_reused_across_documents() {
        let path: DotPath = ".id".parse().unwrap();
        let ids: Vec<String> = [r#"{"id": 1}"#, r#"{"id": "x"}"#]
            .iter()
            .map(|src| path.eval(&json(src)).unwrap().to_json().unwrap())
            .collect();
        assert_eq!(ids, ["1", r#""x""#]);
    }
}
