//! Rasterizing receipt PDFs into images.

use crate::{error::Result, Error};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Converts a PDF document into image bytes.
///
/// Implementations must be usable from several threads at once.
pub trait Rasterizer: Send + Sync {
    /// Rasterize the first page of `document`.
    fn rasterize(&self, document: &[u8]) -> Result<Vec<u8>>;

    /// File extension of the produced image.
    fn extension(&self) -> &'static str {
        "jpg"
    }

    /// MIME type of the produced image.
    fn content_type(&self) -> &'static str {
        "image/jpeg"
    }
}

/// Rasterizer backed by poppler's `pdftoppm` binary, producing JPEG.
#[derive(Debug, Clone)]
pub struct Pdftoppm {
    program: PathBuf,
    dpi: u32,
}

impl Pdftoppm {
    pub fn new(program: impl Into<PathBuf>, dpi: u32) -> Self {
        Self {
            program: program.into(),
            dpi,
        }
    }
}

impl Default for Pdftoppm {
    fn default() -> Self {
        Self::new("pdftoppm", 150)
    }
}

impl Rasterizer for Pdftoppm {
    fn rasterize(&self, document: &[u8]) -> Result<Vec<u8>> {
        let workdir = TempDir::new().map_err(|e| Error::Rasterize(e.to_string()))?;
        let input = workdir.path().join("receipt.pdf");
        let output_root = workdir.path().join("receipt");
        fs::write(&input, document).map_err(|e| Error::Rasterize(e.to_string()))?;

        let output = Command::new(&self.program)
            .arg("-jpeg")
            .arg("-singlefile")
            .arg("-f")
            .arg("1")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(&input)
            .arg(&output_root)
            .output()
            .map_err(|e| {
                Error::Rasterize(format!("failed to run {}: {}", self.program.display(), e))
            })?;

        if !output.status.success() {
            return Err(Error::Rasterize(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        fs::read(output_root.with_extension("jpg")).map_err(|e| Error::Rasterize(e.to_string()))
    }
}
