// src/file.rs

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::config::consts::DEFAULT_FILE;
use crate::error::Result;

/// Write the serialized document. `None` means stdout.
/// Returns the final path written to, if any.
pub fn write_output(path: Option<&Path>, contents: &str) -> Result<Option<PathBuf>> {
    let Some(path) = path else {
        let mut out = io::stdout().lock();
        out.write_all(contents.as_bytes())?;
        out.flush()?;
        return Ok(None);
    };

    let path = resolve_out_path(path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(&path, contents)?;
    Ok(Some(path))
}

/// A trailing separator or an existing directory means "put the default file in here".
pub fn resolve_out_path(p: &Path) -> Result<PathBuf> {
    if looks_like_dir_hint(p) || p.is_dir() {
        ensure_directory(p)?;
        Ok(p.join(DEFAULT_FILE))
    } else {
        Ok(p.to_path_buf())
    }
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )
        .into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
