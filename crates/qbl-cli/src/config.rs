//! Output format and output path resolution.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// The output formats QBL can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Canonical QBL re-serialization (the default).
    Qbl,
    /// D2L / Brightspace CSV quiz upload.
    D2l,
    /// GradeScope LaTeX packet.
    GradeScope,
    /// Plain LaTeX document.
    Latex,
    /// HTML/JS/CSS quiz triple.
    Web,
    /// Plain-text debug dump.
    Debug,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Qbl => "QBL",
            Format::D2l => "D2L",
            Format::GradeScope => "GradeScope",
            Format::Latex => "LaTeX",
            Format::Web => "Web",
            Format::Debug => "Debug",
        };
        write!(f, "{name}")
    }
}

/// Map an output-file extension (without the dot) to a format.
pub fn infer_format(extension: &str) -> Option<Format> {
    match extension {
        "csv" | "d2l" => Some(Format::D2l),
        "gscope" => Some(Format::GradeScope),
        "html" | "htm" => Some(Format::Web),
        "tex" => Some(Format::Latex),
        "qbl" => Some(Format::Qbl),
        _ => None,
    }
}

/// A resolved output destination: directory, filename stem, and extension.
/// The web renderer derives its `.js` and `.css` siblings from the stem.
#[derive(Debug, Clone)]
pub struct OutputTarget {
    pub dir: PathBuf,
    pub stem: String,
    pub extension: String,
}

impl OutputTarget {
    pub fn resolve(path: &Path) -> Result<Self> {
        let raw = path.as_os_str().to_string_lossy();
        if raw.ends_with('/') || path.file_name().is_none() {
            bail!("must provide a filename (not a directory) for output");
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if stem.is_empty() {
            bail!("must provide a filename (not a directory) for output");
        }
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self {
            dir,
            stem,
            extension,
        })
    }

    /// The path the main artifact is written to.
    pub fn main_path(&self) -> PathBuf {
        if self.extension.is_empty() {
            self.dir.join(&self.stem)
        } else {
            self.dir.join(format!("{}.{}", self.stem, self.extension))
        }
    }

    /// A sibling artifact path sharing the stem with a different extension.
    pub fn sibling(&self, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{extension}", self.stem))
    }
}
