//! End-to-end tests through the public API: YAML text or file in, IR out.

use std::io::Write;

use pretty_assertions::assert_eq;
use swagger_ir::{
  IrError, SpecError,
  intermediate::{self, BuildOptions, ParameterLocation, TypeRef, TypedefKind, TypedefShape},
  raw,
};

const PETSTORE: &str = r#"swagger: '2.0'
basePath: /v1
info:
  title: Petstore
  description: A sample pet store.
tags:
- name: petstore
paths:
  /pets:
    get:
      operationId: listPets
      parameters:
      - $ref: '#/parameters/limit'
      responses:
        '200':
          description: A list of pets.
          schema:
            $ref: '#/definitions/Pets'
    post:
      operationId: createPet
      parameters:
      - name: pet
        in: body
        required: true
        schema:
          $ref: '#/definitions/Pet'
      responses:
        '201':
          description: Created.
  /pets/{petId}:
    parameters:
    - name: petId
      in: path
      required: true
      type: string
    get:
      operationId: showPetById
      responses:
        '200':
          description: The pet.
          schema:
            $ref: '#/definitions/Pet'
parameters:
  limit:
    name: limit
    in: query
    type: integer
    format: int32
definitions:
  Pet:
    type: object
    required: [id, name]
    properties:
      id:
        type: integer
        format: int64
      name:
        type: string
      tags:
        type: object
        additionalProperties:
          type: string
  Pets:
    type: array
    items:
      $ref: '#/definitions/Pet'
"#;

#[test]
fn test_petstore_pipeline() {
  let (swagger, errors) = raw::parse_yaml(PETSTORE).unwrap();
  assert!(errors.is_empty(), "unexpected errors: {errors:?}");
  assert_eq!(swagger.name, "petstore");

  let ir = intermediate::build(&swagger, &BuildOptions::default()).unwrap();

  let identifiers: Vec<&str> = ir.typedefs.identifiers().collect();
  assert_eq!(identifiers, ["Pet", "Pets"]);

  let pets = ir.typedefs.get("Pets").unwrap();
  let TypedefKind::Array(array) = &pets.kind else {
    panic!("expected an array, got {:?}", pets.shape());
  };
  assert_eq!(array.items, TypeRef::Named(ir.typedefs.id_of("Pet").unwrap()));

  let pet = ir.typedefs.get("Pet").unwrap();
  let TypedefKind::Object(object) = &pet.kind else {
    panic!("expected an object, got {:?}", pet.shape());
  };
  assert_eq!(object.required, ["id", "name"]);
  assert!(object.properties["id"].required);
  assert!(!object.properties["tags"].required);
  assert_eq!(
    ir.typedefs.resolve(&object.properties["tags"].typedef).map(|tags| tags.shape()),
    Some(TypedefShape::Map)
  );

  let operations: Vec<(&str, &str, &str)> = ir
    .endpoints
    .iter()
    .map(|endpoint| (endpoint.method.as_str(), endpoint.path.as_str(), endpoint.operation_id.as_str()))
    .collect();
  assert_eq!(
    operations,
    [
      ("get", "/v1/pets", "listPets"),
      ("post", "/v1/pets", "createPet"),
      ("get", "/v1/pets/{petId}", "showPetById"),
    ]
  );

  let show_pet = &ir.endpoints[2];
  assert_eq!(show_pet.parameters.len(), 1);
  assert_eq!(show_pet.parameters[0].in_what, ParameterLocation::Path);
  assert!(show_pet.parameters[0].required);

  let create_pet = &ir.endpoints[1];
  let body = &create_pet.parameters[0];
  assert_eq!(body.in_what, ParameterLocation::Body);
  let body_schema = body.json_schema.as_ref().unwrap();
  assert_eq!(body_schema.identifier, "Pet");
  let body_value: serde_json::Value = serde_json::from_str(&body_schema.text).unwrap();
  assert_eq!(body_value["$ref"], "#/definitions/Pet");
  assert!(body_value["definitions"].get("Pet").is_some());

  assert_eq!(ir.stats.typedefs_built, 2);
  assert_eq!(ir.stats.parameters_built, 1);
  assert_eq!(ir.stats.endpoints_built, 3);
  assert_eq!(ir.stats.cycles_detected, 0);
}

#[test]
fn test_json_schema_embeds_referenced_definitions() {
  let (swagger, _) = raw::parse_yaml(PETSTORE).unwrap();
  let ir = intermediate::build(&swagger, &BuildOptions::default()).unwrap();

  let schema = &ir.typedefs.get("Pets").unwrap().json_schema.as_ref().unwrap().text;
  let value: serde_json::Value = serde_json::from_str(schema).unwrap();
  assert_eq!(value["title"], "Pets");
  assert_eq!(value["$schema"], "http://json-schema.org/draft-04/schema#");
  assert_eq!(value["items"]["$ref"], "#/definitions/Pet");
  assert_eq!(value["definitions"]["Pet"]["properties"]["id"]["format"], "int64");
}

#[test]
fn test_dump_serializes_ir() {
  let (swagger, _) = raw::parse_yaml(PETSTORE).unwrap();
  let ir = intermediate::build(&swagger, &BuildOptions::default()).unwrap();

  let value = serde_json::to_value(&ir).unwrap();
  assert_eq!(value["typedefs"]["Pet"]["kind"]["shape"], "object");
  assert_eq!(value["endpoints"][0]["operation_id"], "listPets");
  assert!(value.get("stats").is_none());
}

#[test]
fn test_parse_yaml_file_names_the_source() {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  file.write_all(PETSTORE.as_bytes()).unwrap();

  let (swagger, errors) = raw::parse_yaml_file(file.path()).unwrap();
  assert!(errors.is_empty(), "unexpected errors: {errors:?}");

  let pet = &swagger.definitions["Pet"].typedef.raw;
  assert_eq!(pet.line(), 51);
  assert_eq!(pet.provenance().to_string(), format!("{}:51", file.path().display()));
}

#[test]
fn test_missing_file() {
  let dir = tempfile::tempdir().unwrap();
  let missing = dir.path().join("missing.yaml");

  let err = raw::parse_yaml_file(&missing).unwrap_err();
  assert!(matches!(err, SpecError::Io { ref path, .. } if path == &missing), "got {err:?}");
}

#[test]
fn test_structural_errors_are_collected() {
  let text = r"swagger: '2.0'
paths:
  /a:
    get:
      responses: {}
  /b:
    put:
      operationId: putB
      parameters:
      - name: x
        in: query
      responses: {}
";
  let (_, errors) = raw::parse_yaml(text).unwrap();
  assert!(errors.len() >= 2, "expected several errors, got {errors:?}");
}

#[test]
fn test_referential_error_stops_the_build() {
  let text = r"swagger: '2.0'
tags:
- name: broken
definitions:
  Owner:
    type: object
    properties:
      pet:
        $ref: '#/definitions/Pet'
";
  let (swagger, errors) = raw::parse_yaml(text).unwrap();
  assert!(errors.is_empty(), "unexpected errors: {errors:?}");

  let err = intermediate::build(&swagger, &BuildOptions::default()).unwrap_err();
  assert!(
    matches!(err, IrError::UndefinedDefinition { ref reference, .. } if reference == "#/definitions/Pet"),
    "got {err:?}"
  );
}
