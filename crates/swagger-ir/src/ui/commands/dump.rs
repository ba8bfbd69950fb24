use crate::ui::{SpecArgs, commands::load_intermediate};

/// Prints the IR as pretty JSON on stdout.
pub async fn dump_intermediate(args: &SpecArgs) -> anyhow::Result<()> {
  let ir = load_intermediate(args).await?;
  println!("{}", serde_json::to_string_pretty(&ir)?);
  Ok(())
}
