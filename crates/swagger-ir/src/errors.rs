use std::path::PathBuf;

use thiserror::Error;

/// Failures that prevent a document from being composed at all.
///
/// Structural problems inside an otherwise readable document are not
/// reported here; the raw parser collects those as plain strings.
#[derive(Debug, Error)]
pub enum SpecError {
  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("{source_name}:{line}: failed to parse YAML: {message}")]
  Yaml {
    source_name: String,
    line: usize,
    message: String,
  },
  #[error("{source_name}:{line}: {message}")]
  Composition {
    source_name: String,
    line: usize,
    message: String,
  },
  #[error("{source_name}: the document is empty")]
  EmptyDocument { source_name: String },
  #[error("{source_name}: expected the document to be a mapping, but got {found}")]
  NotAMapping { source_name: String, found: &'static str },
}

/// Referential failures that abort the intermediate build.
///
/// Each variant renders as a single line; callers print it and stop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
  #[error("unsupported reference {reference:?}: only local references of the form '{expected_prefix}<name>' are supported")]
  UnsupportedReference {
    reference: String,
    expected_prefix: &'static str,
  },
  #[error("invalid name {name:?} in the reference {reference:?}")]
  InvalidReferenceName { reference: String, name: String },
  #[error("line {line}: the definition referenced by {reference:?} has not been defined")]
  UndefinedDefinition { reference: String, line: usize },
  #[error("line {line}: the parameter referenced by {reference:?} has not been defined")]
  UndefinedParameter { reference: String, line: usize },
  #[error("line {line}: unexpected type {type_name:?} in {context}")]
  UnexpectedType {
    context: String,
    type_name: String,
    line: usize,
  },
  #[error("line {line}: the definition {identifier:?} is a bare '$ref' alias, which is not supported")]
  AliasDefinition { identifier: String, line: usize },
  #[error("line {line}: the array in {context} has no items")]
  MissingItems { context: String, line: usize },
  #[error("line {line}: expected no '$ref' in the parameter definition {name:?}, but got {reference:?}")]
  RefInParameterDefinition {
    name: String,
    reference: String,
    line: usize,
  },
  #[error("line {line}: could not resolve the type of the parameter {name:?}, neither 'type' nor 'schema' defined")]
  UntypedParameter { name: String, line: usize },
  #[error("line {line}: unexpected location {location:?} of the parameter {name:?}")]
  UnexpectedLocation {
    name: String,
    location: String,
    line: usize,
  },
  #[error("line {line}: duplicate identifier {identifier:?} in {context} even after disambiguation")]
  DuplicateIdentifier {
    identifier: String,
    context: String,
    line: usize,
  },
  #[error("line {line}: the definition {identifier:?} conflicts with the reserved identifier {reserved:?}")]
  ReservedIdentifier {
    identifier: String,
    reserved: String,
    line: usize,
  },
}
