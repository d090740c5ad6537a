//! Path patterns and their per-locale translation.

mod pattern;
mod translator;

pub use pattern::{Node, PathPattern};
pub use translator::PathTranslator;
