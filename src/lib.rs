/*!
# `dotpath` Library

Addresses values inside JSON documents with dot path notation such as
`.name`, `.author[0]["@id"]` or `.works[1:3].pubdate`. Numbers are decoded
losslessly as decimal text.

```
use dotpath::{Value, eval};

let doc: Value = r#"{"a": {"b": {"c": 42}}}"#.parse().unwrap();
assert_eq!(eval(".a.b.c", &doc).unwrap().to_json().unwrap(), "42");
```
*/

pub mod commands;
pub mod path;
pub mod utils;
pub mod value;

pub use path::{DotPath, DotPathError, Segment, eval, eval_json};
pub use value::{Shape, Value};
