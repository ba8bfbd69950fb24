use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

/// Where a raw node starts: the document it came from and its 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Provenance {
  source: Arc<str>,
  line: usize,
}

impl Provenance {
  pub fn new(source: impl Into<Arc<str>>, line: usize) -> Self {
    Self {
      source: source.into(),
      line,
    }
  }

  pub(crate) fn with_shared_source(source: &Arc<str>, line: usize) -> Self {
    Self {
      source: Arc::clone(source),
      line,
    }
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  pub const fn line(&self) -> usize {
    self.line
  }
}

impl fmt::Display for Provenance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.source, self.line)
  }
}

/// A composed YAML value.
///
/// Scalars are resolved with the YAML 1.2 core schema. Mapping keys keep the
/// literal text they had in the document, so a response code written as
/// `200:` is keyed by `"200"`.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
  Null,
  Bool(bool),
  Integer(i64),
  Float(f64),
  String(String),
  Sequence(Vec<RawValue>),
  Mapping(RawDict),
}

impl RawValue {
  /// Human-readable name of the value kind, used in error messages.
  pub const fn kind_name(&self) -> &'static str {
    match self {
      Self::Null => "null",
      Self::Bool(_) => "a boolean",
      Self::Integer(_) => "an integer",
      Self::Float(_) => "a float",
      Self::String(_) => "a string",
      Self::Sequence(_) => "a sequence",
      Self::Mapping(_) => "a mapping",
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(value) => Some(value),
      _ => None,
    }
  }

  pub const fn as_bool(&self) -> Option<bool> {
    match self {
      Self::Bool(value) => Some(*value),
      _ => None,
    }
  }

  pub const fn as_mapping(&self) -> Option<&RawDict> {
    match self {
      Self::Mapping(dict) => Some(dict),
      _ => None,
    }
  }

  pub fn as_sequence(&self) -> Option<&[RawValue]> {
    match self {
      Self::Sequence(items) => Some(items),
      _ => None,
    }
  }

  /// Number of nodes in the value, the value itself included.
  pub fn node_count(&self) -> usize {
    match self {
      Self::Sequence(items) => 1 + items.iter().map(Self::node_count).sum::<usize>(),
      Self::Mapping(dict) => 1 + dict.iter().map(|(_, value)| value.node_count()).sum::<usize>(),
      _ => 1,
    }
  }

  /// Converts the value to JSON, keeping mapping order.
  ///
  /// Non-finite floats have no JSON counterpart and become `null`.
  pub fn to_json(&self) -> Value {
    match self {
      Self::Null => Value::Null,
      Self::Bool(value) => Value::Bool(*value),
      Self::Integer(value) => Value::Number(Number::from(*value)),
      Self::Float(value) => Number::from_f64(*value).map_or(Value::Null, Value::Number),
      Self::String(value) => Value::String(value.clone()),
      Self::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
      Self::Mapping(dict) => dict.to_json(),
    }
  }
}

/// An ordered mapping node together with its provenance.
///
/// Immutable once composed; the raw parser only reads from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDict {
  entries: IndexMap<String, RawValue>,
  provenance: Provenance,
}

impl RawDict {
  pub fn new(entries: IndexMap<String, RawValue>, provenance: Provenance) -> Self {
    Self { entries, provenance }
  }

  /// An empty mapping attributed to `provenance`; used for typedefs that
  /// have no node of their own in the document.
  pub fn empty(provenance: Provenance) -> Self {
    Self::new(IndexMap::new(), provenance)
  }

  pub fn get(&self, key: &str) -> Option<&RawValue> {
    self.entries.get(key)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.contains_key(key)
  }

  pub fn iter(&self) -> indexmap::map::Iter<'_, String, RawValue> {
    self.entries.iter()
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub const fn provenance(&self) -> &Provenance {
    &self.provenance
  }

  pub const fn line(&self) -> usize {
    self.provenance.line
  }

  pub fn source(&self) -> &str {
    self.provenance.source()
  }

  pub fn to_json(&self) -> Value {
    Value::Object(self.to_json_map())
  }

  pub fn to_json_map(&self) -> Map<String, Value> {
    self
      .entries
      .iter()
      .map(|(key, value)| (key.clone(), value.to_json()))
      .collect()
  }
}

impl<'a> IntoIterator for &'a RawDict {
  type Item = (&'a String, &'a RawValue);
  type IntoIter = indexmap::map::Iter<'a, String, RawValue>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}
