//! URL list writer
//!
//! Writes one URL per line, each terminated by `\n`, in list order.
//! Existing files are truncated; missing parent directories are created.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Path value that selects standard output
pub const STDOUT_PATH: &str = "-";

/// Where the URL list goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    /// `-` means stdout, anything else is a file path
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == STDOUT_PATH {
            Self::Stdout
        } else {
            Self::File(path.to_path_buf())
        }
    }
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => f.write_str("<stdout>"),
        }
    }
}

/// Writes URL lists to a file or stdout
#[derive(Debug, Clone)]
pub struct UrlFileWriter {
    target: OutputTarget,
}

impl UrlFileWriter {
    /// Create a writer for `path` (`-` for stdout)
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            target: OutputTarget::from_path(path.as_ref()),
        }
    }

    /// Create a writer for stdout
    pub fn stdout() -> Self {
        Self {
            target: OutputTarget::Stdout,
        }
    }

    /// Where this writer writes
    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    /// Write `urls`, replacing any previous content
    ///
    /// Returns the number of lines written.
    pub fn write(&self, urls: &[String]) -> Result<usize> {
        match &self.target {
            OutputTarget::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        Error::output(format!(
                            "Failed to create directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                let file = File::create(path).map_err(|e| {
                    Error::output(format!("Failed to create {}: {e}", path.display()))
                })?;
                let mut out = BufWriter::new(file);
                write_lines(&mut out, urls)?;
                out.flush()?;
            }
            OutputTarget::Stdout => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                write_lines(&mut out, urls)?;
                out.flush()?;
            }
        }
        Ok(urls.len())
    }
}

/// Write each URL followed by a newline
pub fn write_lines<W: Write>(out: &mut W, urls: &[String]) -> Result<()> {
    for url in urls {
        writeln!(out, "{url}")?;
    }
    Ok(())
}
