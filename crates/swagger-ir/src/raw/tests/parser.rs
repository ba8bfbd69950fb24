use pretty_assertions::assert_eq;

use crate::{
  errors::SpecError,
  raw::{Swagger, parse_yaml, parse_yaml_with_source},
};

fn parse(text: &str) -> (Swagger, Vec<String>) {
  parse_yaml(text).expect("failed to compose the YAML")
}

const PETSTORE: &str = "\
swagger: '2.0'
info:
  title: Petstore
  description: '  Pets and their owners. '
basePath: /api
tags:
- name: petstore
- name: other
paths:
  /pets/{id}:
    parameters:
    - name: id
      in: path
      required: true
      type: string
    - name: verbose
      in: query
      type: boolean
    x-owner: team
    get:
      operationId: getPet
      tags: [pets]
      description: Fetches a pet.
      produces: [application/json]
      parameters:
      - name: verbose
        in: query
        type: boolean
        description: Include everything.
      responses:
        200:
          description: The pet.
          schema:
            $ref: '#/definitions/Pet'
        default:
          description: Error.
    delete:
      operationId: deletePet
      x-swagger-to-skip: true
      responses: {}
definitions:
  Pet:
    type: object
    required: [name]
    properties:
      name:
        type: string
parameters:
  limit:
    name: limit
    in: query
    type: integer
    format: int32
";

#[test]
fn test_parse_petstore() {
  let (swagger, errors) = parse(PETSTORE);
  assert!(errors.is_empty(), "unexpected errors: {errors:?}");

  assert_eq!(swagger.name, "petstore");
  assert_eq!(swagger.base_path, "/api");
  assert_eq!(swagger.description, "Pets and their owners.");
  assert_eq!(swagger.definitions.keys().collect::<Vec<_>>(), ["Pet"]);
  assert_eq!(swagger.parameters.keys().collect::<Vec<_>>(), ["limit"]);

  let path = &swagger.paths["/pets/{id}"];
  assert_eq!(path.line(), 11);
  let methods: Vec<&str> = path.methods.iter().map(|method| method.identifier.as_str()).collect();
  assert_eq!(methods, ["get", "delete"]);

  let get = &path.methods[0];
  assert_eq!(get.operation_id, "getPet");
  assert_eq!(get.tags, ["pets"]);
  assert_eq!(get.description, "Fetches a pet.");
  assert_eq!(get.produces, ["application/json"]);
  assert!(!get.skip);
  assert_eq!(get.line(), 21);
  assert_eq!(get.responses.keys().collect::<Vec<_>>(), ["200", "default"]);
  assert_eq!(
    get.responses["200"].schema.as_ref().map(|schema| schema.reference.as_str()),
    Some("#/definitions/Pet")
  );

  assert!(path.methods[1].skip);

  let pet = &swagger.definitions["Pet"];
  assert_eq!(pet.identifier, "Pet");
  assert_eq!(pet.typedef.line(), 43);
  assert_eq!(pet.typedef.required, ["name"]);
  assert_eq!(pet.typedef.properties["name"].type_name, "string");
}

#[test]
fn test_path_parameters_are_inherited_unless_overridden() {
  let (swagger, errors) = parse(PETSTORE);
  assert!(errors.is_empty(), "unexpected errors: {errors:?}");

  let path = &swagger.paths["/pets/{id}"];
  let get_params: Vec<(&str, &str, &str)> = path.methods[0]
    .parameters
    .iter()
    .map(|param| (param.name.as_str(), param.in_what.as_str(), param.description.as_str()))
    .collect();
  assert_eq!(
    get_params,
    [("id", "path", ""), ("verbose", "query", "Include everything.")]
  );

  let delete_params: Vec<&str> = path.methods[1]
    .parameters
    .iter()
    .map(|param| param.name.as_str())
    .collect();
  assert_eq!(delete_params, ["id", "verbose"]);
}

#[test]
fn test_definitions_with_errors_are_dropped() {
  let text = "\
swagger: '2.0'
tags:
- name: test
definitions:
  Pet:
    type: object
    required: [name, age]
    properties:
      name:
        type: string
  Price:
    type: number
    format: decimal
  Count:
    type: integer
  Owner:
    type: object
  Broken: 3
";
  let (swagger, errors) = parse(text);

  assert_eq!(
    errors,
    [
      "in definition 'Pet': required property not defined: 'age'",
      "in definition 'Price': Unexpected format for type 'number': 'decimal'",
      "in definition 'Broken': expected a mapping, but got an integer",
    ]
  );
  assert_eq!(swagger.definitions.keys().collect::<Vec<_>>(), ["Count", "Owner"]);
}

#[test]
fn test_nested_typedef_errors_carry_their_context() {
  let text = "\
swagger: '2.0'
tags:
- name: test
definitions:
  Order:
    type: object
    properties:
      lines:
        type: array
        items:
          type: integer
          format: int16
      extra:
        type: object
        additionalProperties: true
      labels:
        type: object
        additionalProperties: false
";
  let (_, errors) = parse(text);
  assert_eq!(
    errors,
    [
      "in definition 'Order': in property 'lines': in items: Unexpected format for type 'integer': 'int16'",
      "in definition 'Order': in property 'extra': additionalProperties given as 'true' is not supported, expected a schema",
    ]
  );
}

#[test]
fn test_method_errors() {
  let text = "\
swagger: '2.0'
tags:
- name: test
paths:
  /pets:
    post:
      parameters:
      - name: pet
        in: body
      - name: limit
        in: query
        type: integer
        default: 10
      - name: mode
        in: cookie
        type: string
      responses: {}
  /owners:
    get:
      operationId: listOwners
      responses: {}
";
  let (swagger, errors) = parse(text);

  assert_eq!(
    errors,
    [
      "in path '/pets': in method 'post': missing operationId",
      "in path '/pets': in method 'post': in parameter 0 (name: 'pet'): parameter in body, but no schema",
      "in path '/pets': in method 'post': in parameter 1 (name: 'limit'): default values of parameters are not supported",
      "in path '/pets': in method 'post': in parameter 2 (name: 'mode'): unexpected 'in': 'cookie'",
    ]
  );
  assert_eq!(swagger.paths.keys().collect::<Vec<_>>(), ["/owners"]);
}

#[test]
fn test_untyped_parameter() {
  let text = "\
swagger: '2.0'
tags:
- name: test
parameters:
  limit:
    name: limit
    in: query
  page:
    name: page
    in: query
    type: integer
    schema:
      type: integer
";
  let (swagger, errors) = parse(text);
  assert_eq!(
    errors,
    [
      "in parameter 'limit': parameter has neither 'type' nor 'schema'",
      "in parameter 'page': parameter has both 'type' and 'schema'",
    ]
  );
  assert!(swagger.parameters.is_empty());
}

#[test]
fn test_missing_service_name() {
  let (swagger, errors) = parse("swagger: '2.0'\ntags: []\n");
  assert_eq!(errors, [r#"missing tag "name" in the swagger specification"#]);
  assert_eq!(swagger.name, "");
}

#[test]
fn test_type_mismatches_are_reported() {
  let text = "\
swagger: '2.0'
tags:
- name: test
basePath: [api]
";
  let (_, errors) = parse(text);
  assert_eq!(errors, ["expected a string in 'basePath', but got a sequence"]);
}

#[test]
fn test_document_errors() {
  assert!(matches!(parse_yaml(""), Err(SpecError::EmptyDocument { .. })));
  assert!(matches!(parse_yaml("null\n"), Err(SpecError::EmptyDocument { .. })));

  let err = parse_yaml_with_source("- a\n- b\n", "list.yaml").unwrap_err();
  assert_eq!(
    err.to_string(),
    "list.yaml: expected the document to be a mapping, but got a sequence"
  );
}

#[test]
fn test_provenance_of_nodes() {
  let (swagger, _) = parse_yaml_with_source(PETSTORE, "petstore.yaml").unwrap();
  let pet = &swagger.definitions["Pet"];
  assert_eq!(pet.typedef.raw.provenance().to_string(), "petstore.yaml:43");
  assert_eq!(swagger.raw.source(), "petstore.yaml");
}
