use super::{resolve, spec};
use crate::{
  errors::IrError,
  intermediate::{ParameterLocation, TypeRef, TypedefKind, to_parameters, to_typedefs},
};

#[test]
fn test_shared_parameters_are_keyed_by_definition_key() {
  let swagger = spec(
    r#"
definitions:
  Pet:
    type: object
parameters:
  pageLimit:
    name: limit
    in: query
    type: integer
    format: int32
    description: "  Page size. "
  petBody:
    name: pet
    in: body
    required: true
    schema:
      $ref: '#/definitions/Pet'
"#,
  );

  let typedefs = to_typedefs(&swagger).unwrap();
  let params = to_parameters(&swagger, &typedefs).unwrap();
  assert_eq!(params.keys().collect::<Vec<_>>(), ["pageLimit", "petBody"]);

  let limit = &params["pageLimit"];
  assert_eq!(limit.name, "limit");
  assert_eq!(limit.identifier, "limit");
  assert_eq!(limit.in_what, ParameterLocation::Query);
  assert_eq!(limit.description, "Page size.");
  assert!(!limit.required);
  let TypedefKind::Primitive(primitive) = &resolve(&typedefs, &limit.typedef).kind else {
    panic!("expected a primitive");
  };
  assert_eq!((primitive.type_name.as_str(), primitive.format.as_str()), ("integer", "int32"));

  let pet = &params["petBody"];
  assert_eq!(pet.in_what, ParameterLocation::Body);
  assert!(pet.required);
  assert_eq!(pet.typedef, TypeRef::Named(typedefs.id_of("Pet").unwrap()));
}

#[test]
fn test_array_query_parameter_keeps_its_items() {
  let swagger = spec(
    r#"
parameters:
  tags:
    name: tags
    in: query
    type: array
    items:
      type: string
"#,
  );

  let typedefs = to_typedefs(&swagger).unwrap();
  let params = to_parameters(&swagger, &typedefs).unwrap();
  let TypedefKind::Array(array) = &resolve(&typedefs, &params["tags"].typedef).kind else {
    panic!("expected an array");
  };
  assert!(matches!(
    &resolve(&typedefs, &array.items).kind,
    TypedefKind::Primitive(primitive) if primitive.type_name == "string"
  ));
}

#[test]
fn test_reference_in_shared_parameter_is_fatal() {
  let swagger = spec(
    r#"
parameters:
  limit:
    name: limit
    in: query
    type: integer
  alias:
    $ref: '#/parameters/limit'
"#,
  );

  let typedefs = to_typedefs(&swagger).unwrap();
  assert!(matches!(
    to_parameters(&swagger, &typedefs),
    Err(IrError::RefInParameterDefinition { name, .. }) if name == "alias"
  ));
}

#[test]
fn test_unexpected_parameter_type_is_fatal() {
  let swagger = spec("parameters:\n  filter:\n    name: filter\n    in: query\n    type: object\n");

  let typedefs = to_typedefs(&swagger).unwrap();
  let err = to_parameters(&swagger, &typedefs).unwrap_err();
  assert_eq!(
    err.to_string(),
    r#"line 6: unexpected type "object" in the parameter "filter""#
  );
}
