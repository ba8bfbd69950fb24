use indexmap::IndexMap;

use crate::{
  errors::IrError,
  intermediate::{
    json_schema::to_json_schema,
    types::{Arraydef, Mapdef, Objectdef, Primitivedef, Propertydef, TypeRef, Typedef, TypedefId, TypedefKind,
      TypedefShape, Typedefs},
  },
  raw::{Swagger, Typedef as RawTypedef},
  refs::parse_definition_ref,
  reserved::ReservedIdentifiers,
};

pub(crate) const PRIMITIVE_TYPES: [&str; 5] = ["string", "number", "integer", "boolean", "file"];

/// Lookup of named typedefs by identifier, available before their bodies are built.
pub(crate) trait NamedTypedefs {
  fn id_of(&self, identifier: &str) -> Option<TypedefId>;
}

impl NamedTypedefs for Typedefs {
  fn id_of(&self, identifier: &str) -> Option<TypedefId> {
    Self::id_of(self, identifier)
  }
}

/// Identifier and shape of every definition, in definition order. The id of a
/// reservation is the id its typedef gets in the final table.
#[derive(Debug, Default)]
struct Reservations {
  shapes: IndexMap<String, TypedefShape>,
}

impl NamedTypedefs for Reservations {
  fn id_of(&self, identifier: &str) -> Option<TypedefId> {
    self.shapes.get_index_of(identifier).map(TypedefId)
  }
}

/// Converts every definition of the spec to a named typedef.
///
/// Definitions may refer to each other in any order and recursively; every
/// `$ref` resolves to the [`TypedefId`] of its target.
pub fn to_typedefs(swagger: &Swagger) -> Result<Typedefs, IrError> {
  build_typedefs(swagger, &ReservedIdentifiers::default())
}

pub(crate) fn build_typedefs(swagger: &Swagger, reserved: &ReservedIdentifiers) -> Result<Typedefs, IrError> {
  let reservations = preallocate(swagger, reserved)?;
  tracing::debug!(count = reservations.shapes.len(), "pre-allocated named typedefs");

  let mut entries = IndexMap::with_capacity(reservations.shapes.len());
  for (identifier, shape) in &reservations.shapes {
    let Some(definition) = swagger.definitions.get(identifier) else {
      continue;
    };
    let context = format!("the definition {identifier:?}");
    let typedef = build_typedef(identifier, &definition.typedef, *shape, &reservations, &context)?;
    entries.insert(identifier.clone(), typedef);
  }

  let mut typedefs = Typedefs::new(entries);
  for typedef in typedefs.values_mut() {
    if let Some(definition) = swagger.definitions.get(&typedef.identifier) {
      typedef.json_schema = Some(to_json_schema(
        &typedef.identifier,
        &definition.typedef,
        &swagger.definitions,
      ));
    }
  }
  tracing::debug!(count = typedefs.len(), "resolved named typedefs");

  Ok(typedefs)
}

/// Registers every definition under its identifier before any reference is
/// followed.
fn preallocate(swagger: &Swagger, reserved: &ReservedIdentifiers) -> Result<Reservations, IrError> {
  let mut reservations = Reservations::default();

  for definition in swagger.definitions.values() {
    let original = &definition.typedef;
    if !original.reference.is_empty() {
      return Err(IrError::AliasDefinition {
        identifier: definition.identifier.clone(),
        line: original.line(),
      });
    }

    if let Some(symbol) = reserved.conflict(&definition.identifier) {
      return Err(IrError::ReservedIdentifier {
        identifier: definition.identifier.clone(),
        reserved: symbol.to_string(),
        line: original.line(),
      });
    }

    let shape = shape_of(original, &format!("the definition {:?}", definition.identifier))?;
    tracing::trace!(identifier = %definition.identifier, %shape, "reserved typedef");
    reservations.shapes.insert(definition.identifier.clone(), shape);
  }

  Ok(reservations)
}

fn shape_of(original: &RawTypedef, context: &str) -> Result<TypedefShape, IrError> {
  match original.type_name.as_str() {
    type_name if PRIMITIVE_TYPES.contains(&type_name) => Ok(TypedefShape::Primitive),
    "array" => Ok(TypedefShape::Array),
    "object" | "" if original.additional_properties.is_some() => Ok(TypedefShape::Map),
    "object" | "" => Ok(TypedefShape::Object),
    other => Err(IrError::UnexpectedType {
      context: context.to_string(),
      type_name: other.to_string(),
      line: original.line(),
    }),
  }
}

/// Resolves a `$ref` against the named typedefs, or builds an anonymous
/// typedef in place.
pub(crate) fn anonymous_or_get_typedef(
  original: &RawTypedef,
  names: &impl NamedTypedefs,
  context: &str,
) -> Result<TypeRef, IrError> {
  if !original.reference.is_empty() {
    let name = parse_definition_ref(&original.reference)?;
    let id = names.id_of(name).ok_or_else(|| IrError::UndefinedDefinition {
      reference: original.reference.clone(),
      line: original.line(),
    })?;
    return Ok(TypeRef::Named(id));
  }

  let shape = shape_of(original, context)?;
  let typedef = build_typedef("", original, shape, names, context)?;
  Ok(TypeRef::anonymous(typedef))
}

fn build_typedef(
  identifier: &str,
  original: &RawTypedef,
  shape: TypedefShape,
  names: &impl NamedTypedefs,
  context: &str,
) -> Result<Typedef, IrError> {
  let kind = match shape {
    TypedefShape::Primitive => TypedefKind::Primitive(Primitivedef {
      type_name: original.type_name.clone(),
      format: original.format.clone(),
      pattern: original.pattern.clone(),
    }),
    TypedefShape::Array => {
      let items = original.items.as_deref().ok_or_else(|| IrError::MissingItems {
        context: context.to_string(),
        line: original.line(),
      })?;
      TypedefKind::Array(Arraydef {
        items: anonymous_or_get_typedef(items, names, &format!("{context}, items"))?,
      })
    }
    TypedefShape::Map => {
      let values = original
        .additional_properties
        .as_deref()
        .ok_or_else(|| IrError::UnexpectedType {
          context: context.to_string(),
          type_name: original.type_name.clone(),
          line: original.line(),
        })?;
      TypedefKind::Map(Mapdef {
        values: anonymous_or_get_typedef(values, names, &format!("{context}, additionalProperties"))?,
      })
    }
    TypedefShape::Object => {
      let mut properties = IndexMap::with_capacity(original.properties.len());
      for (prop_name, prop_typedef) in &original.properties {
        let typedef = anonymous_or_get_typedef(prop_typedef, names, &format!("{context}, property {prop_name:?}"))?;
        properties.insert(
          prop_name.clone(),
          Propertydef {
            name: prop_name.clone(),
            typedef,
            description: prop_typedef.description.clone(),
            required: original.required.contains(prop_name),
            line: prop_typedef.line(),
          },
        );
      }
      TypedefKind::Object(Objectdef {
        properties,
        required: original.required.clone(),
      })
    }
  };

  Ok(Typedef {
    identifier: identifier.to_string(),
    description: original.description.clone(),
    json_schema: None,
    line: original.line(),
    kind,
  })
}
