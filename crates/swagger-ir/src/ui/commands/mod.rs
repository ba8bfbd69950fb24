pub mod check;
pub mod dump;
pub mod list;
pub mod schemas;

pub use check::check_spec;
pub use dump::dump_intermediate;
pub use list::{list_endpoints, list_typedefs};
pub use schemas::write_schemas;
use swagger_ir::intermediate::{self, Intermediate};

use crate::{ui::SpecArgs, utils::SpecLoader};

/// Loads the spec and builds its IR, failing on any structural error.
async fn load_intermediate(args: &SpecArgs) -> anyhow::Result<Intermediate> {
  let loader = SpecLoader::open(&args.input).await?;
  let (swagger, errors) = loader.parse()?;
  if !errors.is_empty() {
    anyhow::bail!(
      "{} structural error(s) in {}:\n{}",
      errors.len(),
      loader.source(),
      errors.join("\n")
    );
  }

  Ok(intermediate::build(&swagger, &args.build_options())?)
}
