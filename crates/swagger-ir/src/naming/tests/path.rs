use crate::naming::{camel_case, path::tokenize_path};

#[test]
fn test_tokenize_path() {
  let pth = "/{hello}/from-me/hello/{hello}/{wicked / one}/some more?q=1#a{unclosed&}";
  let token_pth = tokenize_path(pth);

  assert_eq!(
    token_pth.tokens,
    [
      "/",
      "{hello}",
      "/from-me/hello/",
      "{hello}",
      "/",
      "{",
      "wicked / one}/some more?q=1#a",
      "{",
      "unclosed&}",
    ]
  );
  assert_eq!(token_pth.parameter_to_token_indices.len(), 1);
  assert_eq!(token_pth.parameter_to_token_indices["hello"], [1, 3]);
  assert_eq!(token_pth.token_index_to_parameter.get(&1).map(String::as_str), Some("hello"));
  assert_eq!(token_pth.token_index_to_parameter.get(&3).map(String::as_str), Some("hello"));
  assert_eq!(token_pth.tokens.concat(), pth);
}

#[test]
fn test_tokens_concatenate_to_the_original_path() {
  let cases = ["", "/", "/pets", "/pets/{pet_id}", "{a}{b}", "/{", "/}{x", "/{ünï}/ç"];
  for input in cases {
    assert_eq!(tokenize_path(input).tokens.concat(), input, "failed for input {input:?}");
  }
}

#[test]
fn test_parameter_names_in_order_of_appearance() {
  let token_pth = tokenize_path("/shops/{shop_id}/pets/{pet_id}/owners/{shop_id}");
  assert_eq!(token_pth.parameter_names().collect::<Vec<_>>(), ["shop_id", "pet_id"]);
  assert_eq!(token_pth.parameter_to_token_indices["shop_id"], [1, 5]);
}

#[test]
fn test_substitute() {
  let token_pth = tokenize_path("/pets/{pet_id}/toys/{toy_id}");
  assert_eq!(
    token_pth.substitute(|name| format!(":{}", camel_case(name))),
    "/pets/:petID/toys/:toyID"
  );
  assert_eq!(token_pth.substitute(|name| format!("{{{name}}}")), "/pets/{pet_id}/toys/{toy_id}");
}
