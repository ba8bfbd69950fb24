//! The intermediate representation handed to renderers.
//!
//! Named typedefs live in a single [`Typedefs`] table and are referred to by
//! [`TypedefId`]; anonymous typedefs are owned inline by whatever uses them.
//! A recursive definition such as `Node { children: [Node] }` therefore holds
//! the id of `Node` in its array items instead of a nested copy.

use indexmap::IndexMap;
use serde::Serialize;
use strum::Display;

use crate::raw::ParameterLocation;

/// Index of a named typedef in its [`Typedefs`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypedefId(pub(crate) usize);

impl TypedefId {
  pub const fn index(self) -> usize {
    self.0
  }
}

/// Use of a typedef at a property, array items, map values, parameter or
/// response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
  Named(TypedefId),
  Anonymous(Box<Typedef>),
}

impl TypeRef {
  pub const fn id(&self) -> Option<TypedefId> {
    match self {
      Self::Named(id) => Some(*id),
      Self::Anonymous(_) => None,
    }
  }

  pub fn anonymous(typedef: Typedef) -> Self {
    Self::Anonymous(Box::new(typedef))
  }
}

/// A standalone JSON-Schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonSchema {
  pub identifier: String,
  pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Typedef {
  /// Empty for anonymous typedefs.
  pub identifier: String,
  pub description: String,
  /// Only set on named typedefs.
  pub json_schema: Option<JsonSchema>,
  pub line: usize,
  pub kind: TypedefKind,
}

impl Typedef {
  pub fn is_anonymous(&self) -> bool {
    self.identifier.is_empty()
  }

  pub const fn shape(&self) -> TypedefShape {
    match self.kind {
      TypedefKind::Primitive(_) => TypedefShape::Primitive,
      TypedefKind::Array(_) => TypedefShape::Array,
      TypedefKind::Map(_) => TypedefShape::Map,
      TypedefKind::Object(_) => TypedefShape::Object,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TypedefKind {
  Primitive(Primitivedef),
  Array(Arraydef),
  Map(Mapdef),
  Object(Objectdef),
}

/// The variant of a typedef without its body, known before any reference is
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TypedefShape {
  Primitive,
  Array,
  Map,
  Object,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Primitivedef {
  pub type_name: String,
  pub format: String,
  pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arraydef {
  pub items: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapdef {
  pub values: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Objectdef {
  pub properties: IndexMap<String, Propertydef>,
  pub required: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Propertydef {
  pub name: String,
  pub typedef: TypeRef,
  pub description: String,
  pub required: bool,
  pub line: usize,
}

/// Named typedefs in definition order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Typedefs {
  entries: IndexMap<String, Typedef>,
}

impl Typedefs {
  pub(crate) const fn new(entries: IndexMap<String, Typedef>) -> Self {
    Self { entries }
  }

  pub(crate) fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, String, Typedef> {
    self.entries.values_mut()
  }

  pub fn get(&self, identifier: &str) -> Option<&Typedef> {
    self.entries.get(identifier)
  }

  pub fn id_of(&self, identifier: &str) -> Option<TypedefId> {
    self.entries.get_index_of(identifier).map(TypedefId)
  }

  pub fn get_by_id(&self, id: TypedefId) -> Option<&Typedef> {
    self.entries.get_index(id.0).map(|(_, typedef)| typedef)
  }

  /// Follows a named reference into the table; anonymous typedefs resolve to
  /// themselves.
  pub fn resolve<'a>(&'a self, type_ref: &'a TypeRef) -> Option<&'a Typedef> {
    match type_ref {
      TypeRef::Named(id) => self.get_by_id(*id),
      TypeRef::Anonymous(typedef) => Some(typedef),
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (TypedefId, &Typedef)> {
    self
      .entries
      .values()
      .enumerate()
      .map(|(index, typedef)| (TypedefId(index), typedef))
  }

  pub fn identifiers(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl<'a> IntoIterator for &'a Typedefs {
  type Item = &'a Typedef;
  type IntoIter = indexmap::map::Values<'a, String, Typedef>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.values()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
  pub name: String,
  /// Name used in generated code; `{in}_{name}` when the plain name is
  /// ambiguous within its endpoint.
  pub identifier: String,
  pub in_what: ParameterLocation,
  pub typedef: TypeRef,
  pub required: bool,
  pub description: String,
  /// Only set on body parameters.
  pub json_schema: Option<JsonSchema>,
  pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
  /// Status code, or the literal `default`.
  pub code: String,
  pub description: String,
  pub typedef: Option<TypeRef>,
  pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
  /// Path with the base path prepended.
  pub path: String,
  pub method: String,
  pub operation_id: String,
  pub description: String,
  pub parameters: Vec<Parameter>,
  pub responses: IndexMap<String, Response>,
  pub produces: Vec<String>,
  pub consumes: Vec<String>,
  pub line: usize,
}
