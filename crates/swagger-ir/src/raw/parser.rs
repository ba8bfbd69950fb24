use indexmap::IndexMap;

use crate::raw::{
  model::{Definition, Method, Parameter, ParameterLocation, Path, Response, SKIP_EXTENSION, Swagger, Typedef},
  node::{RawDict, RawValue},
};

const HTTP_METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];
const NUMBER_FORMATS: [&str; 2] = ["float", "double"];
const INTEGER_FORMATS: [&str; 2] = ["int32", "int64"];

/// Reads typed fields out of a mapping, collecting type mismatches as errors.
struct NodeReader<'a> {
  dict: &'a RawDict,
  errors: Vec<String>,
}

impl<'a> NodeReader<'a> {
  const fn new(dict: &'a RawDict) -> Self {
    Self {
      dict,
      errors: Vec::new(),
    }
  }

  fn error(&mut self, message: String) {
    self.errors.push(message);
  }

  fn nested(&mut self, context: &str, errors: Vec<String>) {
    self
      .errors
      .extend(errors.into_iter().map(|error| format!("{context}: {error}")));
  }

  fn mismatch(&mut self, key: &str, expected: &str, found: &RawValue) {
    self.error(format!(
      "expected {expected} in '{key}', but got {}",
      found.kind_name()
    ));
  }

  fn string(&mut self, key: &str) -> String {
    match self.dict.get(key) {
      None | Some(RawValue::Null) => String::new(),
      Some(RawValue::String(value)) => value.clone(),
      Some(other) => {
        self.mismatch(key, "a string", other);
        String::new()
      }
    }
  }

  fn trimmed_string(&mut self, key: &str) -> String {
    self.string(key).trim().to_string()
  }

  fn boolean(&mut self, key: &str) -> bool {
    match self.dict.get(key) {
      None | Some(RawValue::Null) => false,
      Some(RawValue::Bool(value)) => *value,
      Some(other) => {
        self.mismatch(key, "a boolean", other);
        false
      }
    }
  }

  fn strings(&mut self, key: &str) -> Vec<String> {
    let items = self.sequence(key);
    let mut result = Vec::with_capacity(items.len());
    for item in items {
      match item {
        RawValue::String(value) => result.push(value.clone()),
        other => self.mismatch(key, "a list of strings", other),
      }
    }
    result
  }

  fn sequence(&mut self, key: &str) -> &'a [RawValue] {
    let dict = self.dict;
    match dict.get(key) {
      None | Some(RawValue::Null) => &[],
      Some(RawValue::Sequence(items)) => items,
      Some(other) => {
        self.mismatch(key, "a sequence", other);
        &[]
      }
    }
  }

  fn mapping(&mut self, key: &str) -> Option<&'a RawDict> {
    let dict = self.dict;
    match dict.get(key) {
      None | Some(RawValue::Null) => None,
      Some(RawValue::Mapping(value)) => Some(value),
      Some(other) => {
        self.mismatch(key, "a mapping", other);
        None
      }
    }
  }

  fn finish(self) -> Vec<String> {
    self.errors
  }
}

fn expect_mapping(value: &RawValue) -> Result<&RawDict, String> {
  value
    .as_mapping()
    .ok_or_else(|| format!("expected a mapping, but got {}", value.kind_name()))
}

/// Parses a schema node. Nested nodes are parsed even when they carry errors,
/// so the returned typedef is the best effort the document allows.
pub fn parse_typedef(dict: &RawDict) -> (Typedef, Vec<String>) {
  let mut reader = NodeReader::new(dict);

  let reference = reader.string("$ref");
  let description = reader.trimmed_string("description");
  let type_name = reader.string("type");
  let format = reader.string("format");
  let pattern = reader.string("pattern");

  let mut properties = IndexMap::new();
  if let Some(props) = reader.mapping("properties") {
    for (prop_name, prop_value) in props {
      let context = format!("in property '{prop_name}'");
      match expect_mapping(prop_value) {
        Ok(prop_dict) => {
          let (prop_typedef, prop_errors) = parse_typedef(prop_dict);
          reader.nested(&context, prop_errors);
          properties.insert(prop_name.clone(), prop_typedef);
        }
        Err(error) => reader.error(format!("{context}: {error}")),
      }
    }
  }

  let required = reader.strings("required");
  for prop_name in &required {
    if !properties.contains_key(prop_name) {
      reader.error(format!("required property not defined: '{prop_name}'"));
    }
  }

  let additional_properties = match dict.get("additionalProperties") {
    None | Some(RawValue::Null) => None,
    Some(RawValue::Bool(false)) => {
      tracing::trace!(line = dict.line(), "ignoring additionalProperties: false");
      None
    }
    Some(RawValue::Bool(true)) => {
      reader.error("additionalProperties given as 'true' is not supported, expected a schema".to_string());
      None
    }
    Some(RawValue::Mapping(add_prop_dict)) => {
      let (add_prop_typedef, add_prop_errors) = parse_typedef(add_prop_dict);
      reader.nested("in additionalProperties", add_prop_errors);
      Some(Box::new(add_prop_typedef))
    }
    Some(other) => {
      reader.mismatch("additionalProperties", "a mapping", other);
      None
    }
  };

  let items = match reader.mapping("items") {
    Some(items_dict) => {
      let (items_typedef, items_errors) = parse_typedef(items_dict);
      reader.nested("in items", items_errors);
      Some(Box::new(items_typedef))
    }
    None => None,
  };

  // An empty format is accepted here; renderers decide what it maps to.
  match type_name.as_str() {
    "number" if !format.is_empty() && !NUMBER_FORMATS.contains(&format.as_str()) => {
      reader.error(format!("Unexpected format for type 'number': '{format}'"));
    }
    "integer" if !format.is_empty() && !INTEGER_FORMATS.contains(&format.as_str()) => {
      reader.error(format!("Unexpected format for type 'integer': '{format}'"));
    }
    _ => {}
  }

  let typedef = Typedef {
    reference,
    description,
    type_name,
    format,
    pattern,
    properties,
    required,
    items,
    additional_properties,
    raw: dict.clone(),
  };

  (typedef, reader.finish())
}

pub fn parse_parameter(dict: &RawDict) -> (Parameter, Vec<String>) {
  let mut reader = NodeReader::new(dict);

  let name = reader.string("name");
  let in_what = reader.string("in");
  let description = reader.trimmed_string("description");
  let required = reader.boolean("required");
  let type_name = reader.string("type");
  let format = reader.string("format");
  let pattern = reader.string("pattern");
  let reference = reader.string("$ref");

  let items = match reader.mapping("items") {
    Some(items_dict) => {
      let (items_typedef, items_errors) = parse_typedef(items_dict);
      reader.nested("in items", items_errors);
      Some(Box::new(items_typedef))
    }
    None => None,
  };

  let schema = match reader.mapping("schema") {
    Some(schema_dict) => {
      let (typedef, schema_errors) = parse_typedef(schema_dict);
      reader.nested("in schema", schema_errors);
      Some(typedef)
    }
    None => None,
  };

  if reference.is_empty() {
    if in_what.is_empty() {
      reader.error("missing 'in'".to_string());
    } else if in_what.parse::<ParameterLocation>().is_err() {
      reader.error(format!("unexpected 'in': '{in_what}'"));
    }

    if in_what == "body" && schema.is_none() {
      reader.error("parameter in body, but no schema".to_string());
    } else if type_name.is_empty() && schema.is_none() {
      reader.error("parameter has neither 'type' nor 'schema'".to_string());
    }

    if !type_name.is_empty() && schema.is_some() {
      reader.error("parameter has both 'type' and 'schema'".to_string());
    }
  }

  if dict.contains_key("default") {
    reader.error("default values of parameters are not supported".to_string());
  }

  let param = Parameter {
    name,
    in_what,
    description,
    required,
    type_name,
    format,
    pattern,
    items,
    schema,
    reference,
    raw: dict.clone(),
  };

  (param, reader.finish())
}

pub fn parse_response(code: &str, dict: &RawDict) -> (Response, Vec<String>) {
  let mut reader = NodeReader::new(dict);

  let description = reader.trimmed_string("description");
  let type_name = reader.string("type");
  let format = reader.string("format");
  let pattern = reader.string("pattern");

  let schema = match reader.mapping("schema") {
    Some(schema_dict) => {
      let (typedef, schema_errors) = parse_typedef(schema_dict);
      reader.nested("in schema", schema_errors);
      Some(typedef)
    }
    None => None,
  };

  let resp = Response {
    code: code.to_string(),
    description,
    schema,
    type_name,
    format,
    pattern,
    raw: dict.clone(),
  };

  (resp, reader.finish())
}

/// Parses a `parameters` list. Every parameter is returned, including the
/// ones with errors; the caller drops its parent node if any error is reported.
fn parse_parameter_list(reader: &mut NodeReader<'_>) -> Vec<Parameter> {
  let mut params = Vec::new();

  for (i, param_value) in reader.sequence("parameters").iter().enumerate() {
    match expect_mapping(param_value) {
      Ok(param_dict) => {
        let (param, param_errors) = parse_parameter(param_dict);
        reader.nested(&format!("in parameter {i} (name: '{}')", param.name), param_errors);
        params.push(param);
      }
      Err(error) => reader.error(format!("in parameter {i}: {error}")),
    }
  }

  params
}

/// Parses an operation. Parameters declared on the enclosing path come first
/// unless the operation redeclares the same name and location.
pub fn parse_method(identifier: &str, dict: &RawDict, path_parameters: &[Parameter]) -> (Method, Vec<String>) {
  let mut reader = NodeReader::new(dict);

  let operation_id = reader.string("operationId");
  if operation_id.is_empty() {
    reader.error("missing operationId".to_string());
  }

  let tags = reader.strings("tags");
  let description = reader.trimmed_string("description");
  let skip = reader.boolean(SKIP_EXTENSION);
  let produces = reader.strings("produces");
  let consumes = reader.strings("consumes");

  let own_parameters = parse_parameter_list(&mut reader);
  let mut parameters: Vec<Parameter> = path_parameters
    .iter()
    .filter(|inherited| !own_parameters.iter().any(|own| overrides(own, inherited)))
    .cloned()
    .collect();
  parameters.extend(own_parameters);

  let mut responses = IndexMap::new();
  if let Some(responses_dict) = reader.mapping("responses") {
    for (resp_code, resp_value) in responses_dict {
      let context = format!("in response '{resp_code}'");
      match expect_mapping(resp_value) {
        Ok(resp_dict) => {
          let (resp, resp_errors) = parse_response(resp_code, resp_dict);
          reader.nested(&context, resp_errors);
          responses.insert(resp_code.clone(), resp);
        }
        Err(error) => reader.error(format!("{context}: {error}")),
      }
    }
  }

  let method = Method {
    identifier: identifier.to_string(),
    operation_id,
    tags,
    description,
    parameters,
    responses,
    produces,
    consumes,
    skip,
    raw: dict.clone(),
  };

  (method, reader.finish())
}

fn overrides(own: &Parameter, inherited: &Parameter) -> bool {
  if !inherited.reference.is_empty() {
    return own.reference == inherited.reference;
  }
  own.name == inherited.name && own.in_what == inherited.in_what
}

/// Parses a path item. Methods with errors are dropped from the path while
/// their errors are still reported.
pub fn parse_path(identifier: &str, dict: &RawDict) -> (Path, Vec<String>) {
  let mut reader = NodeReader::new(dict);
  let path_parameters = parse_parameter_list(&mut reader);

  let mut methods = Vec::new();
  for (method_id, method_value) in dict {
    if method_id == "parameters" {
      continue;
    }
    if !HTTP_METHODS.contains(&method_id.as_str()) {
      tracing::trace!(path = identifier, key = %method_id, "skipping a path key which is not a method");
      continue;
    }

    let context = format!("in method '{method_id}'");
    match expect_mapping(method_value) {
      Ok(method_dict) => {
        let (method, method_errors) = parse_method(method_id, method_dict, &path_parameters);
        if method_errors.is_empty() {
          methods.push(method);
        } else {
          reader.nested(&context, method_errors);
        }
      }
      Err(error) => reader.error(format!("{context}: {error}")),
    }
  }

  let path = Path {
    identifier: identifier.to_string(),
    methods,
    raw: dict.clone(),
  };

  (path, reader.finish())
}

/// Parses the root mapping of a Swagger document.
///
/// Paths, definitions and parameters with errors are left out of the result,
/// but their siblings are still parsed so that every problem is reported.
pub fn parse_swagger(root: &RawDict) -> (Swagger, Vec<String>) {
  let mut reader = NodeReader::new(root);

  let name = reader
    .sequence("tags")
    .iter()
    .filter_map(RawValue::as_mapping)
    .find_map(|tag| tag.get("name").and_then(RawValue::as_str))
    .unwrap_or_default()
    .to_string();

  if name.is_empty() {
    reader.error(r#"missing tag "name" in the swagger specification"#.to_string());
  }

  let base_path = reader.string("basePath");

  let description = match reader.mapping("info") {
    Some(info) => {
      let mut info_reader = NodeReader::new(info);
      let description = info_reader.trimmed_string("description");
      reader.nested("in info", info_reader.finish());
      description
    }
    None => String::new(),
  };

  let mut paths = IndexMap::new();
  if let Some(paths_dict) = reader.mapping("paths") {
    for (path_id, path_value) in paths_dict {
      let context = format!("in path '{path_id}'");
      match expect_mapping(path_value) {
        Ok(path_dict) => {
          let (path, path_errors) = parse_path(path_id, path_dict);
          if path_errors.is_empty() {
            paths.insert(path_id.clone(), path);
          } else {
            reader.nested(&context, path_errors);
          }
        }
        Err(error) => reader.error(format!("{context}: {error}")),
      }
    }
  }

  let mut definitions = IndexMap::new();
  if let Some(definitions_dict) = reader.mapping("definitions") {
    for (def_id, def_value) in definitions_dict {
      let context = format!("in definition '{def_id}'");
      match expect_mapping(def_value) {
        Ok(def_dict) => {
          let (typedef, def_errors) = parse_typedef(def_dict);
          if def_errors.is_empty() {
            let definition = Definition {
              identifier: def_id.clone(),
              typedef,
            };
            definitions.insert(def_id.clone(), definition);
          } else {
            reader.nested(&context, def_errors);
          }
        }
        Err(error) => reader.error(format!("{context}: {error}")),
      }
    }
  }

  let mut parameters = IndexMap::new();
  if let Some(parameters_dict) = reader.mapping("parameters") {
    for (param_id, param_value) in parameters_dict {
      let context = format!("in parameter '{param_id}'");
      match expect_mapping(param_value) {
        Ok(param_dict) => {
          let (param, param_errors) = parse_parameter(param_dict);
          if param_errors.is_empty() {
            parameters.insert(param_id.clone(), param);
          } else {
            reader.nested(&context, param_errors);
          }
        }
        Err(error) => reader.error(format!("{context}: {error}")),
      }
    }
  }

  let swagger = Swagger {
    name,
    base_path,
    description,
    paths,
    definitions,
    parameters,
    raw: root.clone(),
  };

  (swagger, reader.finish())
}
