use std::collections::HashSet;

use crate::naming::capital_camel_case;

/// Symbols the renderers emit next to the generated types.
pub const RENDERER_SYMBOLS: [&str; 3] = ["RemoteCaller", "Handler", "SetupRouter"];

/// Identifiers a definition may not take once converted to CapitalCamelCase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedIdentifiers {
  symbols: HashSet<String>,
}

impl Default for ReservedIdentifiers {
  fn default() -> Self {
    Self::with_extra(std::iter::empty::<String>())
  }
}

impl ReservedIdentifiers {
  /// The renderer symbols plus `extra`, e.g. symbols of a custom template.
  pub fn with_extra<I, S>(extra: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let symbols = RENDERER_SYMBOLS
      .iter()
      .map(|symbol| (*symbol).to_string())
      .chain(extra.into_iter().map(Into::into))
      .collect();
    Self { symbols }
  }

  pub fn contains(&self, symbol: &str) -> bool {
    self.symbols.contains(symbol)
  }

  /// Returns the reserved symbol `identifier` would be rendered as, if any.
  pub fn conflict(&self, identifier: &str) -> Option<&str> {
    if identifier.is_empty() {
      return None;
    }

    let rendered = capital_camel_case(identifier);
    self.symbols.get(&rendered).map(String::as_str)
  }
}
