mod parameters;
mod typedefs;

use crate::{
  intermediate::{TypeRef, Typedef, Typedefs},
  raw::{Swagger, parse_yaml},
};

const HEADER: &str = "swagger: '2.0'\ntags:\n- name: test\n";

/// Parses `body` below a minimal header, asserting the spec is structurally valid.
pub(super) fn spec(body: &str) -> Swagger {
  let (swagger, errors) = parse_yaml(&format!("{HEADER}{body}")).expect("failed to compose the YAML");
  assert!(errors.is_empty(), "unexpected structural errors: {errors:?}");
  swagger
}

pub(super) fn resolve<'a>(typedefs: &'a Typedefs, type_ref: &'a TypeRef) -> &'a Typedef {
  typedefs.resolve(type_ref).expect("dangling typedef reference")
}
