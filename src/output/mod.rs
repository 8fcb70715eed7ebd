//! Output module
//!
//! Persists the collected URL list as plain text, one URL per line.

mod writer;

pub use writer::{write_lines, OutputTarget, UrlFileWriter, STDOUT_PATH};
