//! Identifier normalization shared by the IR builders and the renderers.

pub mod identifiers;
pub mod path;

pub use identifiers::{camel_case, camel_case_split, capital_camel_case, snake_case};
pub use path::{TokenizedPath, tokenize_path};

#[cfg(test)]
mod tests;
