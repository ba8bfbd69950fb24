//! Event-driven composition of YAML into [`RawValue`] trees.

use std::{
  collections::HashMap,
  sync::{Arc, LazyLock},
};

use indexmap::IndexMap;
use regex::Regex;
use yaml_rust2::{
  parser::{Event, MarkedEventReceiver, Parser},
  scanner::{Marker, TScalarStyle},
};

use crate::{
  errors::SpecError,
  raw::node::{Provenance, RawDict, RawValue},
};

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").unwrap());
static OCTAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^0o[0-7]+$").unwrap());
static HEX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]+$").unwrap());
static FLOAT_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?$").unwrap());

const MERGE_KEY: &str = "<<";

/// Nodes that aliases may copy in, summed over the whole document.
pub(crate) const MAX_ALIAS_EXPANSION: usize = 1_000_000;

/// Composes the first document of `text` into a value tree.
///
/// Returns `Ok(None)` for a stream without documents.
pub(crate) fn compose(text: &str, source: &Arc<str>) -> Result<Option<RawValue>, SpecError> {
  let mut composer = Composer::new(Arc::clone(source));
  let mut parser = Parser::new_from_str(text);

  parser.load(&mut composer, false).map_err(|err| SpecError::Yaml {
    source_name: source.to_string(),
    line: err.marker().line(),
    message: err.info().to_string(),
  })?;

  composer.finish()
}

/// Resolves a plain scalar following the YAML 1.2 core schema.
pub(crate) fn resolve_plain_scalar(text: &str) -> RawValue {
  match text {
    "" | "~" | "null" | "Null" | "NULL" => return RawValue::Null,
    "true" | "True" | "TRUE" => return RawValue::Bool(true),
    "false" | "False" | "FALSE" => return RawValue::Bool(false),
    ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => return RawValue::Float(f64::INFINITY),
    "-.inf" | "-.Inf" | "-.INF" => return RawValue::Float(f64::NEG_INFINITY),
    ".nan" | ".NaN" | ".NAN" => return RawValue::Float(f64::NAN),
    _ => {}
  }

  if INTEGER_RE.is_match(text)
    && let Ok(value) = text.parse::<i64>()
  {
    return RawValue::Integer(value);
  }

  if OCTAL_RE.is_match(text)
    && let Ok(value) = i64::from_str_radix(&text[2..], 8)
  {
    return RawValue::Integer(value);
  }

  if HEX_RE.is_match(text)
    && let Ok(value) = i64::from_str_radix(&text[2..], 16)
  {
    return RawValue::Integer(value);
  }

  if FLOAT_RE.is_match(text)
    && let Ok(value) = text.parse::<f64>()
  {
    return RawValue::Float(value);
  }

  RawValue::String(text.to_string())
}

enum Frame {
  Sequence {
    items: Vec<RawValue>,
    anchor: usize,
  },
  Mapping {
    entries: IndexMap<String, RawValue>,
    pending_key: Option<String>,
    line: usize,
    anchor: usize,
  },
}

struct Composer {
  source: Arc<str>,
  stack: Vec<Frame>,
  /// Anchored values with their node counts.
  anchors: HashMap<usize, (RawValue, usize)>,
  expanded_nodes: usize,
  root: Option<RawValue>,
  error: Option<SpecError>,
}

impl Composer {
  fn new(source: Arc<str>) -> Self {
    Self {
      source,
      stack: Vec::new(),
      anchors: HashMap::new(),
      expanded_nodes: 0,
      root: None,
      error: None,
    }
  }

  fn finish(self) -> Result<Option<RawValue>, SpecError> {
    match self.error {
      Some(err) => Err(err),
      None => Ok(self.root),
    }
  }

  fn fail(&mut self, line: usize, message: String) {
    if self.error.is_none() {
      self.error = Some(SpecError::Composition {
        source_name: self.source.to_string(),
        line,
        message,
      });
    }
  }

  fn expects_key(&self) -> bool {
    matches!(self.stack.last(), Some(Frame::Mapping { pending_key: None, .. }))
  }

  fn on_scalar(&mut self, text: String, style: TScalarStyle, anchor: usize, line: usize) {
    if self.expects_key() {
      if anchor > 0 {
        self.anchors.insert(anchor, (RawValue::String(text.clone()), 1));
      }
      if let Some(Frame::Mapping { pending_key, .. }) = self.stack.last_mut() {
        *pending_key = Some(text);
      }
      return;
    }

    let value = if matches!(style, TScalarStyle::Plain) {
      resolve_plain_scalar(&text)
    } else {
      RawValue::String(text)
    };
    self.push_value(value, anchor, line);
  }

  fn on_alias(&mut self, anchor: usize, line: usize) {
    let Some(nodes) = self.anchors.get(&anchor).map(|(_, nodes)| *nodes) else {
      self.fail(line, format!("unknown alias with the anchor id {anchor}"));
      return;
    };

    self.expanded_nodes = self.expanded_nodes.saturating_add(nodes);
    if self.expanded_nodes > MAX_ALIAS_EXPANSION {
      self.fail(line, format!("aliases expand to more than {MAX_ALIAS_EXPANSION} nodes"));
      return;
    }

    let Some((value, _)) = self.anchors.get(&anchor).cloned() else {
      return;
    };

    if self.expects_key() {
      match value {
        RawValue::String(text) => {
          if let Some(Frame::Mapping { pending_key, .. }) = self.stack.last_mut() {
            *pending_key = Some(text);
          }
        }
        other => self.fail(line, format!("expected a scalar mapping key, but got {}", other.kind_name())),
      }
      return;
    }

    self.push_value(value, 0, line);
  }

  fn open(&mut self, frame: Frame, line: usize) {
    if self.expects_key() {
      self.fail(line, "complex mapping keys are not supported".to_string());
    }
    self.stack.push(frame);
  }

  fn close(&mut self, line: usize) {
    match self.stack.pop() {
      Some(Frame::Sequence { items, anchor }) => self.push_value(RawValue::Sequence(items), anchor, line),
      Some(Frame::Mapping {
        entries, line, anchor, ..
      }) => {
        let dict = RawDict::new(entries, Provenance::with_shared_source(&self.source, line));
        self.push_value(RawValue::Mapping(dict), anchor, line);
      }
      None => self.fail(line, "unbalanced end of a collection".to_string()),
    }
  }

  fn push_value(&mut self, value: RawValue, anchor: usize, line: usize) {
    if anchor > 0 {
      self.anchors.insert(anchor, (value.clone(), value.node_count()));
    }

    match self.stack.last_mut() {
      None => {
        if self.root.is_none() {
          self.root = Some(value);
        }
      }
      Some(Frame::Sequence { items, .. }) => items.push(value),
      Some(Frame::Mapping {
        entries, pending_key, ..
      }) => {
        let Some(key) = pending_key.take() else {
          self.fail(line, "complex mapping keys are not supported".to_string());
          return;
        };

        if key == MERGE_KEY {
          if let Err(message) = merge_into(entries, value) {
            self.fail(line, message);
          }
        } else {
          entries.insert(key, value);
        }
      }
    }
  }
}

/// Applies a `<<` merge: keys already present keep their values.
fn merge_into(entries: &mut IndexMap<String, RawValue>, value: RawValue) -> Result<(), String> {
  let sources = match value {
    RawValue::Mapping(dict) => vec![dict],
    RawValue::Sequence(items) => items
      .into_iter()
      .map(|item| match item {
        RawValue::Mapping(dict) => Ok(dict),
        other => Err(format!("expected a mapping to merge, but got {}", other.kind_name())),
      })
      .collect::<Result<Vec<_>, _>>()?,
    other => return Err(format!("expected a mapping to merge, but got {}", other.kind_name())),
  };

  for dict in sources {
    for (key, value) in &dict {
      if !entries.contains_key(key) {
        entries.insert(key.clone(), value.clone());
      }
    }
  }

  Ok(())
}

impl MarkedEventReceiver for Composer {
  fn on_event(&mut self, event: Event, mark: Marker) {
    if self.error.is_some() {
      return;
    }

    let line = mark.line();
    match event {
      Event::Scalar(text, style, anchor, ..) => self.on_scalar(text, style, anchor, line),
      Event::Alias(anchor) => self.on_alias(anchor, line),
      Event::SequenceStart(anchor, ..) => self.open(
        Frame::Sequence {
          items: Vec::new(),
          anchor,
        },
        line,
      ),
      Event::MappingStart(anchor, ..) => self.open(
        Frame::Mapping {
          entries: IndexMap::new(),
          pending_key: None,
          line,
          anchor,
        },
        line,
      ),
      Event::SequenceEnd | Event::MappingEnd => self.close(line),
      _ => {}
    }
  }
}
