use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

/// A placeholder `{name}`, a maximal run of anything but `{`, or a single
/// stray character such as an unbalanced `{`.
static PATH_TOKENIZATION_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?s)\{(?P<name>[a-zA-Z0-9_]*)\}|[^{]+|.").unwrap());

/// A Swagger path template split into literal and placeholder tokens.
///
/// Concatenating `tokens` gives back the original path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedPath {
  pub tokens: Vec<String>,
  /// Placeholder name to the indices of its tokens; a parameter may appear
  /// more than once in the same path.
  pub parameter_to_token_indices: IndexMap<String, Vec<usize>>,
  pub token_index_to_parameter: IndexMap<usize, String>,
}

impl TokenizedPath {
  /// Rebuilds the path with every placeholder rendered by `render`, which
  /// receives the parameter name.
  pub fn substitute(&self, mut render: impl FnMut(&str) -> String) -> String {
    self
      .tokens
      .iter()
      .enumerate()
      .map(|(i, token)| match self.token_index_to_parameter.get(&i) {
        Some(name) => render(name),
        None => token.clone(),
      })
      .collect()
  }

  pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
    self.parameter_to_token_indices.keys().map(String::as_str)
  }
}

pub fn tokenize_path(path: &str) -> TokenizedPath {
  let mut token_pth = TokenizedPath::default();

  for captures in PATH_TOKENIZATION_RE.captures_iter(path) {
    let Some(whole) = captures.get(0) else {
      continue;
    };
    let index = token_pth.tokens.len();
    token_pth.tokens.push(whole.as_str().to_string());

    if let Some(name) = captures.name("name") {
      let name = name.as_str().to_string();
      token_pth
        .parameter_to_token_indices
        .entry(name.clone())
        .or_default()
        .push(index);
      token_pth.token_index_to_parameter.insert(index, name);
    }
  }

  token_pth
}
