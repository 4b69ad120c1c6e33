//! Implementations behind the `jsoncols` and `jsonrange` binaries.

pub mod cols;
pub mod generate;
pub mod range;
