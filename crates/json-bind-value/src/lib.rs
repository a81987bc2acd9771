//! Ordered JSON value model with a canonical text renderer and a strict
//! RFC 8259 parser.
//!
//! Objects keep insertion order, so rendering the same tree always yields
//! the same bytes.

pub mod error;
pub mod number;
pub mod parse;
pub mod render;
pub mod value;

pub use error::ParseError;
pub use parse::{parse, MAX_DEPTH};
pub use render::{render, write_escaped_str};
pub use number::Number;
pub use value::{Map, Value};
