//! Intermediate representation built from a parsed Swagger spec.
//!
//! [`build`] runs the whole conversion. The individual stages are exposed as
//! well: [`to_typedefs`], then [`to_parameters`], then [`to_endpoints`], each
//! taking the tables built by the stages before it.

pub(crate) mod endpoints;
pub(crate) mod graph;
pub(crate) mod json_schema;
pub(crate) mod parameters;
pub(crate) mod typedefs;
pub mod types;

use indexmap::IndexMap;
use serde::Serialize;

pub use endpoints::{endpoint_path, to_endpoints};
pub use parameters::{to_parameter, to_parameters};
pub use typedefs::to_typedefs;
pub use types::{
  Arraydef, Endpoint, JsonSchema, Mapdef, Objectdef, Parameter, Primitivedef, Propertydef, Response, TypeRef, Typedef,
  TypedefId, TypedefKind, TypedefShape, Typedefs,
};

pub use crate::raw::ParameterLocation;
use crate::{
  errors::IrError,
  metrics::{BuildStats, BuildWarning},
  raw::Swagger,
  reserved::ReservedIdentifiers,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
  /// Replaces the `basePath` of the document when set.
  pub base_path: Option<String>,
  /// Keep methods marked with `x-swagger-to-skip`.
  pub include_skipped: bool,
  /// Symbols reserved in addition to the renderer symbols.
  pub reserved_identifiers: Vec<String>,
}

/// The complete IR of one spec.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intermediate {
  pub typedefs: Typedefs,
  pub parameters: IndexMap<String, Parameter>,
  pub endpoints: Vec<Endpoint>,
  #[serde(skip)]
  pub stats: BuildStats,
}

/// Builds the IR of `swagger`, stopping at the first referential error.
pub fn build(swagger: &Swagger, options: &BuildOptions) -> Result<Intermediate, IrError> {
  let reserved = ReservedIdentifiers::with_extra(options.reserved_identifiers.iter().cloned());

  let typedefs = typedefs::build_typedefs(swagger, &reserved)?;
  let parameters = to_parameters(swagger, &typedefs)?;
  let endpoints = to_endpoints(swagger, &typedefs, &parameters, options)?;

  let mut stats = BuildStats::default();
  stats.record_typedefs(&typedefs);
  stats.record_parameters(parameters.len());
  stats.record_cycles(graph::detect_cycles(&swagger.definitions));

  if !options.include_skipped {
    for path in swagger.paths.values() {
      for method in path.methods.iter().filter(|method| method.skip) {
        stats.record_skipped_endpoint(&method.identifier, &path.identifier);
      }
    }
  }

  for endpoint in &endpoints {
    stats.record_endpoint();
    stats.record_warnings(
      endpoint
        .parameters
        .iter()
        .filter(|param| param.identifier != param.name)
        .map(|param| BuildWarning::RenamedParameter {
          operation_id: endpoint.operation_id.clone(),
          name: param.name.clone(),
          identifier: param.identifier.clone(),
        }),
    );
  }

  tracing::debug!(
    typedefs = stats.typedefs_built,
    parameters = stats.parameters_built,
    endpoints = stats.endpoints_built,
    skipped = stats.endpoints_skipped,
    cycles = stats.cycles_detected,
    "built intermediate representation"
  );

  Ok(Intermediate {
    typedefs,
    parameters,
    endpoints,
    stats,
  })
}

#[cfg(test)]
mod tests;
