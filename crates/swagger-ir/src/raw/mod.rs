//! Raw spec model: YAML composition and the structural Swagger parser.

pub(crate) mod composer;
pub mod model;
pub mod node;
pub mod parser;

use std::{path::Path, sync::Arc};

pub use model::{
  Definition, Method, Parameter, ParameterLocation, Path as SwaggerPath, Response, SKIP_EXTENSION, Swagger, Typedef,
};
pub use node::{Provenance, RawDict, RawValue};
pub use parser::{parse_method, parse_parameter, parse_path, parse_response, parse_swagger, parse_typedef};

use crate::errors::SpecError;

const UNNAMED_SOURCE: &str = "<string>";

/// Parses a Swagger document held in memory.
///
/// The outer `Result` fails only when the text is not a readable YAML
/// mapping. Structural problems are returned as the list of errors next to
/// the (partial) spec.
pub fn parse_yaml(text: &str) -> Result<(Swagger, Vec<String>), SpecError> {
  parse_yaml_with_source(text, UNNAMED_SOURCE)
}

/// Like [`parse_yaml`], attributing every node to `source`.
pub fn parse_yaml_with_source(text: &str, source: &str) -> Result<(Swagger, Vec<String>), SpecError> {
  let source: Arc<str> = Arc::from(source);

  let root = match composer::compose(text, &source)? {
    None | Some(RawValue::Null) => {
      return Err(SpecError::EmptyDocument {
        source_name: source.to_string(),
      });
    }
    Some(RawValue::Mapping(root)) => root,
    Some(other) => {
      return Err(SpecError::NotAMapping {
        source_name: source.to_string(),
        found: other.kind_name(),
      });
    }
  };

  let (swagger, errors) = parse_swagger(&root);
  tracing::debug!(
    source = %source,
    paths = swagger.paths.len(),
    definitions = swagger.definitions.len(),
    parameters = swagger.parameters.len(),
    errors = errors.len(),
    "parsed swagger document"
  );

  Ok((swagger, errors))
}

/// Reads and parses a Swagger document from disk.
pub fn parse_yaml_file(path: impl AsRef<Path>) -> Result<(Swagger, Vec<String>), SpecError> {
  let path = path.as_ref();
  let text = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
    path: path.to_path_buf(),
    source,
  })?;

  parse_yaml_with_source(&text, &path.display().to_string())
}

#[cfg(test)]
mod tests;
