use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use swagger_ir::intermediate::BuildOptions;

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "swagger-ir")]
#[command(author, version, about = "Inspect the intermediate representation of a Swagger 2.0 spec")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,

  /// Log pipeline stages to stderr (RUST_LOG takes precedence)
  #[arg(short, long, default_value_t = false, global = true)]
  pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Parse the spec, build the intermediate representation and report problems
  Check(SpecArgs),
  /// List information from the intermediate representation
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Write the JSON-Schema of every named definition to a directory
  Schemas {
    #[command(flatten)]
    spec: SpecArgs,

    /// Directory the `<identifier>.json` files are written to
    #[arg(short, long, value_name = "DIR")]
    output: PathBuf,
  },
  /// Print the intermediate representation as JSON
  Dump(SpecArgs),
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List the endpoints with their method, path and operation id
  Endpoints(SpecArgs),
  /// List the named type definitions
  Typedefs(SpecArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SpecArgs {
  /// Path to the Swagger 2.0 specification (YAML or JSON)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Override the basePath of the spec
  #[arg(long, value_name = "PATH")]
  pub base_path: Option<String>,

  /// Keep endpoints marked with x-swagger-to-skip
  #[arg(long, default_value_t = false)]
  pub include_skipped: bool,

  /// Additional identifiers definitions may not use (comma-separated)
  #[arg(long, value_name = "NAMES", value_delimiter = ',')]
  pub reserved: Vec<String>,
}

impl SpecArgs {
  pub fn build_options(&self) -> BuildOptions {
    BuildOptions {
      base_path: self.base_path.clone(),
      include_skipped: self.include_skipped,
      reserved_identifiers: self.reserved.clone(),
    }
  }
}
