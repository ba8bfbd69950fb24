use strum::Display;

use crate::intermediate::types::{Typedef, TypedefKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildStats {
  pub typedefs_built: usize,
  pub primitives_built: usize,
  pub arrays_built: usize,
  pub maps_built: usize,
  pub objects_built: usize,
  pub json_schemas_rendered: usize,
  pub parameters_built: usize,
  pub endpoints_built: usize,
  pub endpoints_skipped: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<BuildWarning>,
}

impl BuildStats {
  pub fn record_typedef(&mut self, typedef: &Typedef) {
    self.typedefs_built += 1;
    match typedef.kind {
      TypedefKind::Primitive(_) => self.primitives_built += 1,
      TypedefKind::Array(_) => self.arrays_built += 1,
      TypedefKind::Map(_) => self.maps_built += 1,
      TypedefKind::Object(_) => self.objects_built += 1,
    }
    if typedef.json_schema.is_some() {
      self.json_schemas_rendered += 1;
    }
  }

  pub fn record_typedefs<'a>(&mut self, typedefs: impl IntoIterator<Item = &'a Typedef>) {
    for typedef in typedefs {
      self.record_typedef(typedef);
    }
  }

  pub fn record_parameters(&mut self, count: usize) {
    self.parameters_built += count;
  }

  pub fn record_endpoint(&mut self) {
    self.endpoints_built += 1;
  }

  pub fn record_skipped_endpoint(&mut self, method: &str, path: &str) {
    self.endpoints_skipped += 1;
    self.record_warning(BuildWarning::SkippedEndpoint {
      method: method.to_string(),
      path: path.to_string(),
    });
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_warning(&mut self, warning: BuildWarning) {
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = BuildWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BuildWarning {
  #[strum(to_string = "Skipped endpoint '{method} {path}' marked with x-swagger-to-skip")]
  SkippedEndpoint { method: String, path: String },
  #[strum(to_string = "[{operation_id}] renamed parameter '{name}' to '{identifier}'")]
  RenamedParameter {
    operation_id: String,
    name: String,
    identifier: String,
  },
}

impl BuildWarning {
  pub const fn is_skipped_item(&self) -> bool {
    matches!(self, Self::SkippedEndpoint { .. })
  }
}
