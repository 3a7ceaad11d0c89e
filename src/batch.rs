//! Batch output: `<input>.txt` with the full dump and `<input>.unk` with the
//! diagnostics. An empty `.unk` is removed, so its absence means every chunk,
//! enum value and flag bit in the input was recognized.

use crate::dispatch::{parse, ROOT_NAME};
use crate::dump::{export_diagnostics, export_text_with, DumpOptions};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("{}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{}: write failed: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("{}: remove failed: {source}", .path.display())]
    Remove { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Write (or remove) the `.unk` companion file.
    pub write_unk: bool,
    pub dump: DumpOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            write_unk: true,
            dump: DumpOptions::default(),
        }
    }
}

/// What [`dump_file`] produced for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub txt_path: PathBuf,
    /// Set only when a non-empty `.unk` was written.
    pub unk_path: Option<PathBuf>,
    pub node_count: usize,
    pub diagnostic_count: usize,
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

/// `<input>.txt`
pub fn txt_path(input: &Path) -> PathBuf {
    with_suffix(input, ".txt")
}

/// `<input>.unk`
pub fn unk_path(input: &Path) -> PathBuf {
    with_suffix(input, ".unk")
}

/// Parse `input` and write its reports next to it.
///
/// The `.txt` report is always written, even for malformed input.
pub fn dump_file(input: &Path, options: BatchOptions) -> Result<BatchReport, BatchError> {
    let data = fs::read(input).map_err(|source| BatchError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let mut result = parse(&data);
    result.root.name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| ROOT_NAME.to_string());

    let txt = txt_path(input);
    fs::write(&txt, export_text_with(&result.root, options.dump)).map_err(|source| BatchError::Write {
        path: txt.clone(),
        source,
    })?;

    let mut written_unk = None;
    if options.write_unk {
        let unk = unk_path(input);
        let diags = export_diagnostics(&result.diagnostics);
        if diags.is_empty() {
            match fs::remove_file(&unk) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(BatchError::Remove { path: unk, source }),
            }
        } else {
            fs::write(&unk, diags).map_err(|source| BatchError::Write {
                path: unk.clone(),
                source,
            })?;
            written_unk = Some(unk);
        }
    }

    tracing::info!(
        "{}: {} nodes, {} diagnostics",
        input.display(),
        result.root.node_count(),
        result.diagnostics.len()
    );
    Ok(BatchReport {
        txt_path: txt,
        unk_path: written_unk,
        node_count: result.root.node_count(),
        diagnostic_count: result.diagnostics.len(),
    })
}
