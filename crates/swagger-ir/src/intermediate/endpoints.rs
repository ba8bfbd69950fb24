use std::collections::HashSet;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
  errors::IrError,
  intermediate::{
    BuildOptions,
    json_schema::to_json_schema,
    parameters::anonymous_or_get_parameter,
    typedefs::{PRIMITIVE_TYPES, anonymous_or_get_typedef},
    types::{Endpoint, Parameter, Response, Typedefs},
  },
  raw::{
    Method, Parameter as RawParameter, ParameterLocation, Response as RawResponse, Swagger, Typedef as RawTypedef,
  },
  refs::parse_parameter_ref,
};

/// Joins the base path and a path template with exactly one slash.
pub fn endpoint_path(base_path: &str, path: &str) -> String {
  if base_path.is_empty() {
    return path.to_string();
  }
  format!("{}/{}", base_path.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Converts every path and method of the spec to an endpoint, in document
/// order. Methods marked with the skip extension are left out unless
/// [`BuildOptions::include_skipped`] is set.
pub fn to_endpoints(
  swagger: &Swagger,
  typedefs: &Typedefs,
  params: &IndexMap<String, Parameter>,
  options: &BuildOptions,
) -> Result<Vec<Endpoint>, IrError> {
  let base_path = options.base_path.as_deref().unwrap_or(&swagger.base_path);

  let mut endpoints = Vec::new();
  for path in swagger.paths.values() {
    for method in &path.methods {
      if method.skip && !options.include_skipped {
        tracing::trace!(path = %path.identifier, method = %method.identifier, "skipping endpoint");
        continue;
      }

      let endpoint = to_endpoint(
        &endpoint_path(base_path, &path.identifier),
        method,
        swagger,
        typedefs,
        params,
      )?;
      endpoints.push(endpoint);
    }
  }

  tracing::debug!(count = endpoints.len(), "converted endpoints");
  Ok(endpoints)
}

fn to_endpoint(
  path: &str,
  method: &Method,
  swagger: &Swagger,
  typedefs: &Typedefs,
  params: &IndexMap<String, Parameter>,
) -> Result<Endpoint, IrError> {
  let mut parameters = Vec::with_capacity(method.parameters.len());
  for original in &method.parameters {
    let mut param = anonymous_or_get_parameter(original, typedefs, params)?;

    if param.in_what == ParameterLocation::Body
      && let Some(schema) = body_schema(original, swagger)
    {
      let identifier = match typedefs.resolve(&param.typedef) {
        Some(typedef) if !typedef.is_anonymous() => typedef.identifier.clone(),
        _ => format!("{}_{}", method.operation_id, param.name),
      };
      param.json_schema = Some(to_json_schema(&identifier, schema, &swagger.definitions));
    }

    parameters.push(param);
  }

  disambiguate_parameters(&mut parameters, &method.operation_id)?;

  let mut responses = IndexMap::with_capacity(method.responses.len());
  for (code, original) in &method.responses {
    responses.insert(code.clone(), to_response(original, typedefs)?);
  }

  Ok(Endpoint {
    path: path.to_string(),
    method: method.identifier.clone(),
    operation_id: method.operation_id.clone(),
    description: method.description.clone(),
    parameters,
    responses,
    produces: method.produces.clone(),
    consumes: method.consumes.clone(),
    line: method.line(),
  })
}

/// The raw schema of a body parameter; a `$ref` parameter takes the schema of
/// the shared definition.
fn body_schema<'a>(original: &'a RawParameter, swagger: &'a Swagger) -> Option<&'a RawTypedef> {
  if original.reference.is_empty() {
    return original.schema.as_ref();
  }

  let name = parse_parameter_ref(&original.reference).ok()?;
  swagger.parameters.get(name)?.schema.as_ref()
}

/// Renames parameters whose name occurs more than once in the endpoint to
/// `{in}_{name}`.
///
/// Fails if two parameters still share an identifier afterwards, e.g. two
/// query parameters of the same name.
pub(crate) fn disambiguate_parameters(parameters: &mut [Parameter], operation_id: &str) -> Result<(), IrError> {
  let occurrences = parameters.iter().map(|param| param.name.clone()).counts();

  for param in parameters.iter_mut() {
    if occurrences.get(&param.name).is_some_and(|&count| count > 1) {
      param.identifier = format!("{}_{}", param.in_what, param.name);
    }
  }

  let mut seen = HashSet::with_capacity(parameters.len());
  for param in parameters.iter() {
    if !seen.insert(param.identifier.as_str()) {
      return Err(IrError::DuplicateIdentifier {
        identifier: param.identifier.clone(),
        context: format!("the parameters of the endpoint {operation_id:?}"),
        line: param.line,
      });
    }
  }

  Ok(())
}

fn to_response(original: &RawResponse, typedefs: &Typedefs) -> Result<Response, IrError> {
  let context = format!("the response {:?}", original.code);

  let typedef = if !original.type_name.is_empty() {
    if !PRIMITIVE_TYPES.contains(&original.type_name.as_str()) {
      return Err(IrError::UnexpectedType {
        context,
        type_name: original.type_name.clone(),
        line: original.line(),
      });
    }

    let primitive = RawTypedef::primitive(
      &original.type_name,
      &original.format,
      &original.pattern,
      original.raw.clone(),
    );
    Some(anonymous_or_get_typedef(&primitive, typedefs, &context)?)
  } else if let Some(schema) = &original.schema {
    Some(anonymous_or_get_typedef(schema, typedefs, &context)?)
  } else {
    None
  };

  Ok(Response {
    code: original.code.clone(),
    description: original.description.clone(),
    typedef,
    line: original.line(),
  })
}
