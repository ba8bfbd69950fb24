use std::path::Path;

use anyhow::Context;
use crossterm::style::Stylize;
use num_format::{Locale, ToFormattedString};

use crate::ui::{Colors, SpecArgs, commands::load_intermediate, format_timestamp};

/// Writes `<identifier>.json` for every named typedef.
pub async fn write_schemas(args: &SpecArgs, output: &Path, colors: &Colors) -> anyhow::Result<()> {
  let ir = load_intermediate(args).await?;
  tokio::fs::create_dir_all(output)
    .await
    .with_context(|| format!("failed to create {}", output.display()))?;

  let mut written = 0usize;
  for typedef in &ir.typedefs {
    let Some(json_schema) = &typedef.json_schema else {
      continue;
    };
    if json_schema.identifier.contains(['/', '\\']) {
      tracing::warn!(identifier = %json_schema.identifier, "skipping a schema whose identifier is not a file name");
      continue;
    }

    let path = output.join(format!("{}.json", json_schema.identifier));
    tokio::fs::write(&path, &json_schema.text)
      .await
      .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote JSON schema");
    written += 1;
  }

  println!(
    "{} {}",
    format_timestamp().with(colors.timestamp()),
    format!(
      "Wrote {} JSON schemas to {}",
      written.to_formatted_string(&Locale::en),
      output.display()
    )
    .with(colors.success())
  );

  Ok(())
}
