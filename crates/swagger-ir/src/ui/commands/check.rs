use crossterm::style::Stylize;
use num_format::{Locale, ToFormattedString};
use swagger_ir::{intermediate, metrics::BuildStats};

use crate::{
  ui::{Colors, SpecArgs, format_timestamp},
  utils::SpecLoader,
};

fn count(value: usize) -> String {
  value.to_formatted_string(&Locale::en)
}

struct CheckLogger<'a> {
  colors: &'a Colors,
  verbose: bool,
}

impl<'a> CheckLogger<'a> {
  const fn new(colors: &'a Colors, verbose: bool) -> Self {
    Self { colors, verbose }
  }

  fn info(&self, message: &str) {
    println!(
      "{} {}",
      format_timestamp().with(self.colors.timestamp()),
      message.with(self.colors.primary())
    );
  }

  fn stat(&self, label: &str, value: String) {
    println!(
      "            {:<25} {}",
      label.with(self.colors.label()),
      value.with(self.colors.value())
    );
  }

  fn print_errors(&self, errors: &[String]) {
    for error in errors {
      eprintln!("{} {}", "Error:".with(self.colors.error()), error.as_str().with(self.colors.primary()));
    }
  }

  fn print_statistics(&self, name: &str, stats: &BuildStats) {
    self.stat("Service:", name.to_string());
    self.stat("Typedefs:", count(stats.typedefs_built));
    self.stat("", format!("{} objects", count(stats.objects_built)));
    self.stat("", format!("{} arrays", count(stats.arrays_built)));
    self.stat("", format!("{} maps", count(stats.maps_built)));
    self.stat("", format!("{} primitives", count(stats.primitives_built)));
    self.stat("JSON schemas:", count(stats.json_schemas_rendered));
    self.stat("Shared parameters:", count(stats.parameters_built));
    self.stat("Endpoints:", count(stats.endpoints_built));
    if stats.endpoints_skipped > 0 {
      self.stat("", format!("{} skipped", count(stats.endpoints_skipped)));
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", count(stats.warnings.len()));
    }

    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &BuildStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", count(stats.cycles_detected));

    if self.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_warnings(&self, stats: &BuildStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      if !warning.is_skipped_item() && !self.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_success(&self) {
    println!();
    println!(
      "{} {}",
      format_timestamp().with(self.colors.timestamp()),
      "The spec is valid".with(self.colors.success())
    );
  }
}

/// Parses and builds the spec, printing every structural error or a summary
/// of the resulting IR.
pub async fn check_spec(args: &SpecArgs, verbose: bool, colors: &Colors) -> anyhow::Result<()> {
  let logger = CheckLogger::new(colors, verbose);

  logger.info(&format!("Loading Swagger spec from: {}", args.input.display()));
  let loader = SpecLoader::open(&args.input).await?;
  let (swagger, errors) = loader.parse()?;
  if !errors.is_empty() {
    logger.print_errors(&errors);
    anyhow::bail!("{} structural error(s) in {}", errors.len(), loader.source());
  }

  logger.info("Building the intermediate representation...");
  let ir = intermediate::build(&swagger, &args.build_options())?;
  logger.print_statistics(&swagger.name, &ir.stats);
  logger.log_success();

  Ok(())
}
