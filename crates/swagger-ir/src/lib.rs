//! Swagger 2.0 parsing and intermediate representation.
//!
//! The pipeline runs in one direction:
//!
//! 1. [`raw::parse_yaml`] composes a YAML (or JSON) document into the raw
//!    spec model, keeping the source line of every mapping and collecting
//!    structural errors without stopping at the first one.
//! 2. [`intermediate::build`] resolves `$ref` pointers, builds the typedef
//!    table, derives JSON-Schema text per named type and produces the
//!    endpoint/parameter/response model consumed by renderers.
//!
//! ```no_run
//! use swagger_ir::{intermediate::{self, BuildOptions}, raw};
//!
//! # fn example() -> anyhow::Result<()> {
//! let (swagger, errors) = raw::parse_yaml_file("swagger.yaml")?;
//! if !errors.is_empty() {
//!   anyhow::bail!("invalid spec:\n{}", errors.join("\n"));
//! }
//!
//! let ir = intermediate::build(&swagger, &BuildOptions::default())?;
//! for endpoint in &ir.endpoints {
//!   println!("{} {}", endpoint.method, endpoint.path);
//! }
//! # Ok(())
//! # }
//! ```
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]

pub mod errors;
pub mod intermediate;
pub mod metrics;
pub mod naming;
pub mod raw;
pub mod refs;
pub mod reserved;

pub use errors::{IrError, SpecError};
pub use naming::{TokenizedPath, camel_case, camel_case_split, capital_camel_case, snake_case, tokenize_path};
pub use refs::{parse_definition_ref, parse_parameter_ref};
