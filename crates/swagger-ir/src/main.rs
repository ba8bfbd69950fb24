#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
use clap::Parser;
use tracing_subscriber::{EnvFilter, prelude::*};

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod ui;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::Check(spec) => ui::commands::check_spec(&spec, cli.verbose, &colors).await?,
    Commands::List { list_command } => match list_command {
      ListCommands::Endpoints(spec) => ui::commands::list_endpoints(&spec, &colors).await?,
      ListCommands::Typedefs(spec) => ui::commands::list_typedefs(&spec, &colors).await?,
    },
    Commands::Schemas { spec, output } => ui::commands::write_schemas(&spec, &output, &colors).await?,
    Commands::Dump(spec) => ui::commands::dump_intermediate(&spec).await?,
  }

  Ok(())
}

fn init_tracing(verbose: bool) {
  let default_filter = if verbose { "swagger_ir=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  let fmt_layer = tracing_subscriber::fmt::layer()
    .with_writer(std::io::stderr)
    .with_target(true)
    .with_filter(filter);

  if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
    eprintln!("Warning: tracing subscriber already initialized");
  }
}
