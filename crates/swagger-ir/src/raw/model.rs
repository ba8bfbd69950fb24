//! Structural mirror of the Swagger 2.0 grammar.
//!
//! Nothing here is resolved: references are kept as strings and every node
//! holds on to the mapping it was parsed from. The raw parser is the only
//! writer of these types.

use indexmap::IndexMap;
use serde::Serialize;
use strum::{Display, EnumString};

use crate::raw::node::RawDict;

/// Vendor extension that excludes an operation from the endpoint list.
pub const SKIP_EXTENSION: &str = "x-swagger-to-skip";

/// A schema node: a definition, a property, array items, map values, or the
/// schema of a parameter or response.
#[derive(Debug, Clone, PartialEq)]
pub struct Typedef {
  pub reference: String,
  pub description: String,
  pub type_name: String,
  pub format: String,
  pub pattern: String,
  pub properties: IndexMap<String, Typedef>,
  pub required: Vec<String>,
  pub items: Option<Box<Typedef>>,
  pub additional_properties: Option<Box<Typedef>>,
  /// The mapping this typedef was parsed from, embedded verbatim in JSON schemas.
  pub raw: RawDict,
}

impl Typedef {
  /// A primitive typedef without a node of its own, e.g. the type of a
  /// `type: string` query parameter.
  pub fn primitive(type_name: &str, format: &str, pattern: &str, raw: RawDict) -> Self {
    Self {
      reference: String::new(),
      description: String::new(),
      type_name: type_name.to_string(),
      format: format.to_string(),
      pattern: pattern.to_string(),
      properties: IndexMap::new(),
      required: Vec::new(),
      items: None,
      additional_properties: None,
      raw,
    }
  }

  pub const fn line(&self) -> usize {
    self.raw.line()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
  pub identifier: String,
  pub typedef: Typedef,
}

/// Location of a parameter, the `in` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
  Query,
  Path,
  Header,
  Body,
  FormData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
  pub name: String,
  pub in_what: String,
  pub description: String,
  pub required: bool,
  pub type_name: String,
  pub format: String,
  pub pattern: String,
  /// Element type of an `array` parameter outside the body.
  pub items: Option<Box<Typedef>>,
  pub schema: Option<Typedef>,
  pub reference: String,
  pub raw: RawDict,
}

impl Parameter {
  pub const fn line(&self) -> usize {
    self.raw.line()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
  pub code: String,
  pub description: String,
  pub schema: Option<Typedef>,
  pub type_name: String,
  pub format: String,
  pub pattern: String,
  pub raw: RawDict,
}

impl Response {
  pub const fn line(&self) -> usize {
    self.raw.line()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
  /// Lower-case HTTP method, e.g. `get`.
  pub identifier: String,
  pub operation_id: String,
  pub tags: Vec<String>,
  pub description: String,
  pub parameters: Vec<Parameter>,
  pub responses: IndexMap<String, Response>,
  pub produces: Vec<String>,
  pub consumes: Vec<String>,
  /// Set by the skip extension.
  pub skip: bool,
  pub raw: RawDict,
}

impl Method {
  pub const fn line(&self) -> usize {
    self.raw.line()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
  pub identifier: String,
  pub methods: Vec<Method>,
  pub raw: RawDict,
}

impl Path {
  pub const fn line(&self) -> usize {
    self.raw.line()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Swagger {
  /// Name of the service, taken from the first `tags[].name`.
  pub name: String,
  pub base_path: String,
  pub description: String,
  pub paths: IndexMap<String, Path>,
  pub definitions: IndexMap<String, Definition>,
  pub parameters: IndexMap<String, Parameter>,
  pub raw: RawDict,
}
