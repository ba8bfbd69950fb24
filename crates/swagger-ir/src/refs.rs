use std::sync::LazyLock;

use regex::Regex;

use crate::errors::IrError;

pub const DEFINITION_REF_PREFIX: &str = "#/definitions/";
pub const PARAMETER_REF_PREFIX: &str = "#/parameters/";

static REFERENCED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.\- ]+$").unwrap());

/// Extracts the definition name from a `$ref` such as `#/definitions/Pet`.
///
/// Only references local to the document are supported. References into
/// other files, URLs or other sections of the document (for example the
/// OpenAPI 3 `#/components/schemas/Pet`) fail with
/// [`IrError::UnsupportedReference`].
pub fn parse_definition_ref(reference: &str) -> Result<&str, IrError> {
  parse_local_ref(reference, DEFINITION_REF_PREFIX)
}

/// Extracts the parameter name from a `$ref` such as `#/parameters/limit`.
pub fn parse_parameter_ref(reference: &str) -> Result<&str, IrError> {
  parse_local_ref(reference, PARAMETER_REF_PREFIX)
}

fn parse_local_ref<'a>(reference: &'a str, prefix: &'static str) -> Result<&'a str, IrError> {
  let name = reference
    .strip_prefix(prefix)
    .ok_or_else(|| IrError::UnsupportedReference {
      reference: reference.to_string(),
      expected_prefix: prefix,
    })?;

  if !REFERENCED_NAME_RE.is_match(name) {
    return Err(IrError::InvalidReferenceName {
      reference: reference.to_string(),
      name: name.to_string(),
    });
  }

  Ok(name)
}
