use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use crate::{
  raw::{Definition, Typedef as RawTypedef},
  refs::parse_definition_ref,
};

/// Direct references from each definition to other definitions.
pub(crate) fn definition_dependencies(definitions: &IndexMap<String, Definition>) -> BTreeMap<&str, BTreeSet<&str>> {
  definitions
    .iter()
    .map(|(name, definition)| {
      let mut refs = BTreeSet::new();
      collect_refs(&definition.typedef, definitions, &mut refs);
      (name.as_str(), refs)
    })
    .collect()
}

fn collect_refs<'a>(
  typedef: &'a RawTypedef,
  definitions: &'a IndexMap<String, Definition>,
  refs: &mut BTreeSet<&'a str>,
) {
  if let Ok(name) = parse_definition_ref(&typedef.reference)
    && let Some((name, _)) = definitions.get_key_value(name)
  {
    refs.insert(name.as_str());
  }

  for prop_typedef in typedef.properties.values() {
    collect_refs(prop_typedef, definitions, refs);
  }
  if let Some(items) = &typedef.items {
    collect_refs(items, definitions, refs);
  }
  if let Some(additional_properties) = &typedef.additional_properties {
    collect_refs(additional_properties, definitions, refs);
  }
}

/// Strongly connected components of the definition graph that form a cycle,
/// including definitions referring to themselves. Cycles are legal; they are
/// reported for diagnostics only.
pub(crate) fn detect_cycles(definitions: &IndexMap<String, Definition>) -> Vec<Vec<String>> {
  let dependencies = definition_dependencies(definitions);

  let mut graph = DiGraphMap::<&str, ()>::new();
  for (&node, deps) in &dependencies {
    graph.add_node(node);
    for &dep in deps {
      graph.add_edge(node, dep, ());
    }
  }

  let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
    .into_iter()
    .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
    .map(|scc| {
      let mut cycle: Vec<String> = scc.into_iter().map(String::from).collect();
      cycle.sort_unstable();
      cycle
    })
    .collect();
  cycles.sort_unstable();
  cycles
}
