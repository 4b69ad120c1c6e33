/*!
# JSON Value

Defines the decoded JSON tree that dot paths are evaluated against.

Numbers are kept losslessly as decimal text (`serde_json` is built with
`arbitrary_precision`), so large integers such as database identifiers and
long fractions survive a decode/re-encode cycle untouched. Plain integer and
fraction text is kept as written; exponent forms are normalised (`1E5`
becomes `1e+5`) without changing the value. Numbers are only converted to a
machine type when a caller asks for one.

```
use dotpath::Value;

let value = Value::decode(br#"{"id": 12345678901234567890123}"#).unwrap();
assert_eq!(value.to_json().unwrap(), r#"{"id":12345678901234567890123}"#);
```
*/
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A JSON number held losslessly as decimal text.
pub use serde_json::Number;

/// Primary JSON AST definition
#[derive(PartialEq, Eq, Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A JSON object (mapping). Keys are unique and keep document order.
    Object(IndexMap<String, Value>),
    /// A JSON array (sequence), zero-indexed
    Array(Vec<Value>),
    /// A JSON number, stored losslessly as decimal text
    Number(Number),
    /// A JSON string
    String(String),
    /// A JSON boolean
    Bool(bool),
    /// The JSON `null` value
    Null,
}

/// The coarse shape of a [`Value`], reported when a path segment does not
/// fit the value it is applied to.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Shape {
    /// A JSON object
    Object,
    /// A JSON array
    Array,
    /// A JSON string
    String,
    /// A JSON number
    Number,
    /// A JSON boolean
    Bool,
    /// The JSON `null` value
    Null,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "boolean",
            Self::Null => "null",
        };
        write!(f, "{name}")
    }
}

impl Value {
    /// Decode a JSON document, preserving numbers as decimal text.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if `bytes` is not a
    /// single well-formed JSON document.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        Ok(value.into())
    }

    /// The shape of this value.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        match self {
            Self::Object(_) => Shape::Object,
            Self::Array(_) => Shape::Array,
            Self::Number(_) => Shape::Number,
            Self::String(_) => Shape::String,
            Self::Bool(_) => Shape::Bool,
            Self::Null => Shape::Null,
        }
    }

    /// Returns the string slice if this value is a JSON string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this value is a JSON number.
    #[must_use]
    pub const fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the entries if this value is a JSON object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements if this value is a JSON array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Convert to pretty-printed JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to compact JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(number) => Self::Number(number),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(values) => {
                Self::Array(values.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl FromStr for Value {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s.as_bytes())
    }
}
