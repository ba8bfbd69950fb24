use std::path::Path;

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use swagger_ir::raw::{self, Swagger};

/// A memory-mapped spec file. JSON specs are read by the YAML parser as well.
pub struct SpecLoader {
  file: AsyncMmapFile,
  source: String,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self {
      file,
      source: path.display().to_string(),
    })
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  /// Parses the spec and returns it with its structural errors.
  pub fn parse(&self) -> anyhow::Result<(Swagger, Vec<String>)> {
    let content = std::str::from_utf8(self.file.as_slice())
      .with_context(|| format!("{} is not valid UTF-8", self.source))?;
    Ok(raw::parse_yaml_with_source(content, &self.source)?)
  }
}
