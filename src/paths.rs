use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub fn docs_dir() -> PathBuf {
    PathBuf::from("docs")
}

pub fn page_path(out_dir: &Path, date_key: &str) -> PathBuf {
    out_dir.join(format!("{date_key}.html"))
}

pub fn record_path(out_dir: &Path, date_key: &str) -> PathBuf {
    out_dir.join(format!("{date_key}.json"))
}

/// Write-then-rename so a crashed run never leaves a truncated artifact.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create output directory {}", parent.display()))?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move {} into place", path.display()))?;
    Ok(())
}
