use indexmap::IndexMap;

use crate::{
  errors::IrError,
  intermediate::{
    typedefs::{PRIMITIVE_TYPES, anonymous_or_get_typedef},
    types::{Parameter, Typedefs},
  },
  raw::{Parameter as RawParameter, ParameterLocation, Swagger, Typedef as RawTypedef},
  refs::parse_parameter_ref,
};

/// Converts the shared parameter definitions under `parameters`, keyed by
/// their definition key.
pub fn to_parameters(swagger: &Swagger, typedefs: &Typedefs) -> Result<IndexMap<String, Parameter>, IrError> {
  let mut params = IndexMap::with_capacity(swagger.parameters.len());

  for (key, original) in &swagger.parameters {
    if !original.reference.is_empty() {
      return Err(IrError::RefInParameterDefinition {
        name: key.clone(),
        reference: original.reference.clone(),
        line: original.line(),
      });
    }

    params.insert(key.clone(), to_parameter(original, typedefs)?);
  }

  tracing::debug!(count = params.len(), "converted shared parameters");
  Ok(params)
}

/// Converts a parameter given inline, typed either by `type` or by `schema`.
pub fn to_parameter(original: &RawParameter, typedefs: &Typedefs) -> Result<Parameter, IrError> {
  let in_what = original
    .in_what
    .parse::<ParameterLocation>()
    .map_err(|_| IrError::UnexpectedLocation {
      name: original.name.clone(),
      location: original.in_what.clone(),
      line: original.line(),
    })?;

  let context = format!("the parameter {:?}", original.name);
  let typedef = if !original.type_name.is_empty() {
    if original.type_name != "array" && !PRIMITIVE_TYPES.contains(&original.type_name.as_str()) {
      return Err(IrError::UnexpectedType {
        context,
        type_name: original.type_name.clone(),
        line: original.line(),
      });
    }

    let mut primitive = RawTypedef::primitive(
      &original.type_name,
      &original.format,
      &original.pattern,
      original.raw.clone(),
    );
    primitive.items.clone_from(&original.items);
    anonymous_or_get_typedef(&primitive, typedefs, &context)?
  } else if let Some(schema) = &original.schema {
    anonymous_or_get_typedef(schema, typedefs, &context)?
  } else {
    return Err(IrError::UntypedParameter {
      name: original.name.clone(),
      line: original.line(),
    });
  };

  Ok(Parameter {
    name: original.name.clone(),
    identifier: original.name.clone(),
    in_what,
    typedef,
    required: original.required,
    description: original.description.clone(),
    json_schema: None,
    line: original.line(),
  })
}

/// Takes a `$ref` parameter from the shared table, or converts the parameter
/// in place.
pub(crate) fn anonymous_or_get_parameter(
  original: &RawParameter,
  typedefs: &Typedefs,
  params: &IndexMap<String, Parameter>,
) -> Result<Parameter, IrError> {
  if original.reference.is_empty() {
    return to_parameter(original, typedefs);
  }

  let name = parse_parameter_ref(&original.reference)?;
  params.get(name).cloned().ok_or_else(|| IrError::UndefinedParameter {
    reference: original.reference.clone(),
    line: original.line(),
  })
}
