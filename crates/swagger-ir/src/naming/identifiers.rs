/// Abbreviations kept as single tokens when splitting camel case, longest first.
const ABBREVIATIONS: [&str; 10] = [
  "JSONLD", "HTTPS", "HTTP", "JSON", "URLs", "UUID", "URL", "IDs", "API", "ID",
];

const IDENTIFIER_SEPARATORS: [char; 2] = ['_', '-'];

/// Matches an abbreviation at `pos`. An abbreviation followed by a lower-case
/// letter is not a match, since that letter belongs to the next word
/// (`HTTPServer` is `HTTP` + `Server`, not `HTTPS` + `erver`).
fn match_abbreviation(chars: &[char], pos: usize) -> Option<&'static str> {
  ABBREVIATIONS.into_iter().find(|abbreviation| {
    let len = abbreviation.len();
    let Some(window) = chars.get(pos..pos + len) else {
      return false;
    };

    window.iter().copied().eq(abbreviation.chars()) && !chars.get(pos + len).is_some_and(|c| c.is_lowercase())
  })
}

/// Splits a camelCase or PascalCase identifier into its words.
///
/// Every upper-case letter opens a new word unless it starts one of the known
/// abbreviations, which are kept whole: `SomeURLs` splits into `Some` and
/// `URLs`.
pub fn camel_case_split(identifier: &str) -> Vec<String> {
  debug_assert!(!identifier.is_empty(), "unexpected empty identifier");

  let chars: Vec<char> = identifier.chars().collect();
  let mut parts: Vec<String> = Vec::new();

  let mut cur = 0;
  while cur < chars.len() {
    if let Some(abbreviation) = match_abbreviation(&chars, cur) {
      parts.push(abbreviation.to_string());
      cur += abbreviation.len();
      continue;
    }

    let c = chars[cur];
    match parts.last_mut() {
      Some(last) if !c.is_uppercase() => last.push(c),
      _ => parts.push(c.to_string()),
    }
    cur += 1;
  }

  parts
}

/// An identifier with its leading and trailing non-letters set aside.
struct Affixed<'a> {
  prefix: &'a str,
  tokens: Vec<String>,
  suffix: &'a str,
}

impl<'a> Affixed<'a> {
  fn split(identifier: &'a str) -> Self {
    let start = identifier.find(char::is_alphabetic).unwrap_or(identifier.len());
    let end = identifier
      .char_indices()
      .rev()
      .find(|(_, c)| c.is_alphabetic())
      .map_or(start, |(i, c)| i + c.len_utf8());

    let tokens = identifier[start..end]
      .split(IDENTIFIER_SEPARATORS)
      .filter(|part| !part.is_empty())
      .flat_map(camel_case_split)
      .collect();

    Self {
      prefix: &identifier[..start],
      tokens: settle(tokens),
      suffix: &identifier[end..],
    }
  }

  fn join(&self, middle: &str) -> String {
    format!("{}{middle}{}", self.prefix, self.suffix)
  }
}

/// Re-splits the capitalized tokens until no further tokens merge, so that
/// single letters spelling an abbreviation (`h_t_t_p`) are read as the
/// abbreviation a second conversion would see. Each round strictly reduces
/// the token count.
fn settle(mut tokens: Vec<String>) -> Vec<String> {
  loop {
    let joined: String = tokens.iter().map(|token| capitalize_token(token)).collect();
    if joined.is_empty() {
      return tokens;
    }

    let resplit = camel_case_split(&joined);
    if resplit.len() >= tokens.len() {
      return tokens;
    }
    tokens = resplit;
  }
}

fn capitalize_token(token: &str) -> String {
  let lower = token.to_lowercase();
  match lower.as_str() {
    "url" | "id" => lower.to_uppercase(),
    "urls" => "URLs".to_string(),
    "ids" => "IDs".to_string(),
    _ => {
      let mut chars = lower.chars();
      match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
      }
    }
  }
}

/// Converts an identifier to CapitalCamelCase.
///
/// Leading and trailing non-letters are kept as they are, e.g. `_some_urls2`
/// becomes `_SomeURLs2`.
pub fn capital_camel_case(identifier: &str) -> String {
  debug_assert!(!identifier.is_empty(), "unexpected empty identifier");

  let affixed = Affixed::split(identifier);
  let middle: String = affixed.tokens.iter().map(|token| capitalize_token(token)).collect();
  affixed.join(&middle)
}

/// Converts an identifier to camelCase. The first word is lower-cased as a
/// whole, so `URLsToFind` becomes `urlsToFind`.
pub fn camel_case(identifier: &str) -> String {
  debug_assert!(!identifier.is_empty(), "unexpected empty identifier");

  let affixed = Affixed::split(identifier);
  let mut tokens = affixed.tokens.iter();
  let mut middle = tokens.next().map(|first| first.to_lowercase()).unwrap_or_default();
  middle.extend(tokens.map(|token| capitalize_token(token)));
  affixed.join(&middle)
}

/// Converts an identifier to lower-case snake_case.
pub fn snake_case(identifier: &str) -> String {
  debug_assert!(!identifier.is_empty(), "unexpected empty identifier");

  let affixed = Affixed::split(identifier);
  let middle = affixed
    .tokens
    .iter()
    .map(|token| token.to_lowercase())
    .collect::<Vec<_>>()
    .join("_");
  affixed.join(&middle)
}
