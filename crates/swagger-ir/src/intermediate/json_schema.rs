use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::{
  intermediate::types::JsonSchema,
  raw::{Definition, Typedef as RawTypedef},
  refs::parse_definition_ref,
};

const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-04/schema#";

/// Renders a standalone JSON-Schema for `original`.
///
/// Every definition reachable from `original` is embedded under
/// `definitions`, dependencies first, and the fields of `original` follow at
/// the top level. Descriptions are trimmed throughout.
pub(crate) fn to_json_schema(
  identifier: &str,
  original: &RawTypedef,
  definitions: &IndexMap<String, Definition>,
) -> JsonSchema {
  let mut schema = Map::new();
  schema.insert("title".to_string(), Value::String(identifier.to_string()));
  schema.insert("$schema".to_string(), Value::String(JSON_SCHEMA_DRAFT.to_string()));

  let mut referenced = Vec::new();
  collect_referenced_definitions(original, definitions, &mut Vec::new(), &mut referenced);

  let mut schema_definitions = Map::new();
  for name in referenced.into_iter().rev() {
    if schema_definitions.contains_key(name) {
      continue;
    }
    if let Some(definition) = definitions.get(name) {
      schema_definitions.insert(name.to_string(), definition.typedef.raw.to_json());
    }
  }
  if !schema_definitions.is_empty() {
    schema.insert("definitions".to_string(), Value::Object(schema_definitions));
  }

  for (key, value) in original.raw.to_json_map() {
    schema.insert(key, value);
  }

  let mut schema = Value::Object(schema);
  strip_descriptions(&mut schema);

  JsonSchema {
    identifier: identifier.to_string(),
    text: format!("{schema:#}"),
  }
}

/// Collects referenced definition names top-down. A definition already on the
/// current reference chain is not entered again, so recursive definitions
/// terminate.
fn collect_referenced_definitions<'a>(
  typedef: &'a RawTypedef,
  definitions: &'a IndexMap<String, Definition>,
  chain: &mut Vec<&'a str>,
  referenced: &mut Vec<&'a str>,
) {
  if !typedef.reference.is_empty() {
    if let Ok(name) = parse_definition_ref(&typedef.reference)
      && let Some((name, definition)) = definitions.get_key_value(name)
      && !chain.contains(&name.as_str())
    {
      referenced.push(name);
      chain.push(name);
      collect_referenced_definitions(&definition.typedef, definitions, chain, referenced);
      chain.pop();
    }
    return;
  }

  for prop_typedef in typedef.properties.values() {
    collect_referenced_definitions(prop_typedef, definitions, chain, referenced);
  }
  if let Some(items) = &typedef.items {
    collect_referenced_definitions(items, definitions, chain, referenced);
  }
  if let Some(additional_properties) = &typedef.additional_properties {
    collect_referenced_definitions(additional_properties, definitions, chain, referenced);
  }
}

fn strip_descriptions(value: &mut Value) {
  match value {
    Value::Object(map) => {
      for (key, item) in map.iter_mut() {
        match item {
          Value::String(text) if key.eq_ignore_ascii_case("description") => *text = text.trim().to_string(),
          _ => strip_descriptions(item),
        }
      }
    }
    Value::Array(items) => items.iter_mut().for_each(strip_descriptions),
    _ => {}
  }
}
