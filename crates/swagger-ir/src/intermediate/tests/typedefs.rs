use super::{resolve, spec};
use crate::{
  errors::IrError,
  intermediate::{TypeRef, TypedefKind, TypedefShape, to_typedefs},
};

#[test]
fn test_recursive_definition_points_back_to_itself() {
  let swagger = spec(
    r#"
definitions:
  Node:
    type: object
    properties:
      children:
        type: array
        items:
          $ref: '#/definitions/Node'
"#,
  );

  let typedefs = to_typedefs(&swagger).unwrap();
  let node_id = typedefs.id_of("Node").unwrap();
  let node = typedefs.get_by_id(node_id).unwrap();
  assert_eq!(node.identifier, "Node");

  let TypedefKind::Object(obj) = &node.kind else {
    panic!("expected an object, got {:?}", node.shape());
  };
  let children = resolve(&typedefs, &obj.properties["children"].typedef);
  assert!(children.is_anonymous());
  let TypedefKind::Array(array) = &children.kind else {
    panic!("expected an array, got {:?}", children.shape());
  };
  assert_eq!(array.items, TypeRef::Named(node_id));
}

#[test]
fn test_forward_and_backward_references_resolve_to_the_same_typedef() {
  let swagger = spec(
    r#"
definitions:
  Before:
    type: object
    properties:
      target:
        $ref: '#/definitions/Target'
  Target:
    type: object
    properties:
      name:
        type: string
  After:
    type: object
    properties:
      target:
        $ref: '#/definitions/Target'
"#,
  );

  let typedefs = to_typedefs(&swagger).unwrap();
  let target_id = typedefs.id_of("Target").unwrap();

  for referrer in ["Before", "After"] {
    let TypedefKind::Object(obj) = &typedefs.get(referrer).unwrap().kind else {
      panic!("expected {referrer} to be an object");
    };
    assert_eq!(
      obj.properties["target"].typedef.id(),
      Some(target_id),
      "failed for {referrer}"
    );
  }
}

#[test]
fn test_mutually_recursive_definitions() {
  let swagger = spec(
    r#"
definitions:
  Parent:
    type: object
    properties:
      child:
        $ref: '#/definitions/Child'
  Child:
    type: object
    properties:
      parent:
        $ref: '#/definitions/Parent'
"#,
  );

  let typedefs = to_typedefs(&swagger).unwrap();
  let parent_id = typedefs.id_of("Parent").unwrap();
  let child = typedefs.get("Child").unwrap();
  let TypedefKind::Object(obj) = &child.kind else {
    panic!("expected an object");
  };
  assert_eq!(obj.properties["parent"].typedef, TypeRef::Named(parent_id));
}

#[test]
fn test_shapes_of_definitions() {
  let swagger = spec(
    r#"
definitions:
  Timestamp:
    type: string
    format: date-time
  Names:
    type: array
    items:
      type: string
  Labels:
    type: object
    additionalProperties:
      type: string
  Pet:
    type: object
    required: [name]
    properties:
      name:
        type: string
        description: Name of the pet.
      age:
        type: integer
        format: int32
  Anything: {}
"#,
  );

  let typedefs = to_typedefs(&swagger).unwrap();
  let shapes: Vec<(&str, TypedefShape)> = typedefs
    .iter()
    .map(|(_, typedef)| (typedef.identifier.as_str(), typedef.shape()))
    .collect();
  assert_eq!(
    shapes,
    [
      ("Timestamp", TypedefShape::Primitive),
      ("Names", TypedefShape::Array),
      ("Labels", TypedefShape::Map),
      ("Pet", TypedefShape::Object),
      ("Anything", TypedefShape::Object),
    ]
  );
  assert_eq!(TypedefShape::Map.to_string(), "map");

  let TypedefKind::Primitive(timestamp) = &typedefs.get("Timestamp").unwrap().kind else {
    panic!("expected a primitive");
  };
  assert_eq!(timestamp.type_name, "string");
  assert_eq!(timestamp.format, "date-time");

  let TypedefKind::Object(pet) = &typedefs.get("Pet").unwrap().kind else {
    panic!("expected an object");
  };
  assert_eq!(pet.required, ["name"]);
  assert!(pet.properties["name"].required);
  assert!(!pet.properties["age"].required);
  assert_eq!(pet.properties["name"].description, "Name of the pet.");

  let TypedefKind::Object(anything) = &typedefs.get("Anything").unwrap().kind else {
    panic!("expected an object");
  };
  assert!(anything.properties.is_empty());
}

#[test]
fn test_anonymous_nested_object() {
  let swagger = spec(
    r#"
definitions:
  Order:
    type: object
    properties:
      shipping:
        type: object
        required: [street]
        properties:
          street:
            type: string
"#,
  );

  let typedefs = to_typedefs(&swagger).unwrap();
  assert_eq!(typedefs.len(), 1);

  let TypedefKind::Object(order) = &typedefs.get("Order").unwrap().kind else {
    panic!("expected an object");
  };
  let TypeRef::Anonymous(shipping) = &order.properties["shipping"].typedef else {
    panic!("expected an anonymous typedef");
  };
  assert!(shipping.json_schema.is_none());
  let TypedefKind::Object(shipping) = &shipping.kind else {
    panic!("expected an object");
  };
  assert!(shipping.properties["street"].required);
}

#[test]
fn test_named_typedefs_carry_line_and_description() {
  let swagger = spec(
    r#"definitions:
  Pet:
    description: "  A pet.  "
    type: object
"#,
  );

  let typedefs = to_typedefs(&swagger).unwrap();
  let pet = typedefs.get("Pet").unwrap();
  assert_eq!(pet.line, 6);
  assert_eq!(pet.description, "A pet.");
  assert!(pet.json_schema.is_some());
}

#[test]
fn test_undefined_reference_is_fatal() {
  let swagger = spec(
    r#"
definitions:
  Pet:
    type: object
    properties:
      owner:
        $ref: '#/definitions/Missing'
"#,
  );

  let err = to_typedefs(&swagger).unwrap_err();
  assert!(
    matches!(&err, IrError::UndefinedDefinition { reference, .. } if reference == "#/definitions/Missing"),
    "unexpected error: {err}"
  );
}

#[test]
fn test_openapi3_reference_is_rejected() {
  let swagger = spec(
    r#"
definitions:
  Pet:
    type: object
    properties:
      owner:
        $ref: '#/components/schemas/Owner'
"#,
  );

  assert!(matches!(
    to_typedefs(&swagger),
    Err(IrError::UnsupportedReference { .. })
  ));
}

#[test]
fn test_fatal_definition_errors() {
  let cases = [
    (
      "definitions:\n  Alias:\n    $ref: '#/definitions/Pet'\n  Pet:\n    type: object\n",
      "the definition \"Alias\" is a bare '$ref' alias",
    ),
    (
      "definitions:\n  Weird:\n    type: tuple\n",
      "unexpected type \"tuple\" in the definition \"Weird\"",
    ),
    (
      "definitions:\n  Names:\n    type: array\n",
      "the array in the definition \"Names\" has no items",
    ),
    (
      "definitions:\n  Pet:\n    type: object\n    properties:\n      tags:\n        type: array\n        items:\n          type: set\n",
      "unexpected type \"set\" in the definition \"Pet\", property \"tags\", items",
    ),
  ];
  for (body, expected) in cases {
    let err = to_typedefs(&spec(body)).unwrap_err();
    assert!(err.to_string().contains(expected), "failed for {body:?}: {err}");
  }
}

#[test]
fn test_reserved_identifier_is_fatal() {
  let swagger = spec("definitions:\n  handler:\n    type: object\n");
  assert_eq!(
    to_typedefs(&swagger).unwrap_err(),
    IrError::ReservedIdentifier {
      identifier: "handler".to_string(),
      reserved: "Handler".to_string(),
      line: 6,
    }
  );
}
