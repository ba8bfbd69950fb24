mod parser;

use crate::raw::{RawDict, RawValue};

pub(super) fn mapping<'a>(value: &'a RawValue, key: &str) -> &'a RawDict {
  value
    .as_mapping()
    .and_then(|dict| dict.get(key))
    .and_then(RawValue::as_mapping)
    .unwrap_or_else(|| panic!("expected a mapping under {key:?}"))
}
