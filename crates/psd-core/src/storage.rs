//! Persisting the downloaded response body.
//!
//! The body is written to a hidden temp file in the target directory and
//! atomically renamed into place, so repeated submissions never leave a
//! half-written download behind.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes `body` to `<dir>/<filename>` via temp file + rename.
///
/// `filename` must already be sanitized (a single path component).
/// Refuses to replace an existing file unless `overwrite` is set.
/// Returns the final path on success.
pub fn save_download(dir: &Path, filename: &str, body: &[u8], overwrite: bool) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("cannot create download directory {}", dir.display()))?;

    let final_path = dir.join(filename);
    if final_path.exists() && !overwrite {
        anyhow::bail!(
            "refusing to overwrite existing file {}",
            final_path.display()
        );
    }

    let temp_path = dir.join(temp_name(filename));
    let result = write_and_rename(&temp_path, &final_path, body);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result?;

    tracing::info!(path = %final_path.display(), bytes = body.len(), "download saved");
    Ok(final_path)
}

/// Temp-file name for a download: `.{base}.part`, with the base truncated
/// so the decorated name still fits NAME_MAX. The final filename may use
/// the full 255 bytes; only the temp name needs the headroom.
fn temp_name(filename: &str) -> String {
    const NAME_MAX: usize = 255;
    const SUFFIX: &str = ".part";

    let budget = NAME_MAX - SUFFIX.len() - 1; // leading dot
    let mut cut = filename.len().min(budget);
    while cut > 0 && !filename.is_char_boundary(cut) {
        cut -= 1;
    }
    format!(".{}{}", &filename[..cut], SUFFIX)
}

fn write_and_rename(temp_path: &Path, final_path: &Path, body: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path)
        .with_context(|| format!("cannot create temp file {}", temp_path.display()))?;
    file.write_all(body).context("write failed")?;
    file.sync_all().context("sync failed")?;
    drop(file);

    fs::rename(temp_path, final_path).with_context(|| {
        format!(
            "cannot move {} into place as {}",
            temp_path.display(),
            final_path.display()
        )
    })
}
