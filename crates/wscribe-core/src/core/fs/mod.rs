//! Filesystem Helpers
//!
//! Crash-tolerant writes for settings and exported documents. A write lands
//! in a sibling `.tmp` file first and is renamed over the destination, so a
//! reader sees either the old file or the new one.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::core::{formats::export_file_name, CoreError, CoreResult, View};

// =============================================================================
// Atomic Writes
// =============================================================================

/// Writes `bytes` to `path` through a synced temporary sibling
pub fn atomic_write_bytes(path: &Path, bytes: &[u8]) -> CoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = sibling_path(path, "tmp");
    {
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        writer.write_all(bytes)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    replace_with(path, &tmp_path)
}

/// Writes `value` as pretty-printed JSON
pub fn atomic_write_json_pretty<T: serde::Serialize>(path: &Path, value: &T) -> CoreResult<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    atomic_write_bytes(path, &bytes)
}

/// Writes an exported document and returns where it landed
///
/// With no explicit `output`, the file goes into `dir` under a timestamped
/// name built from `view`, `extension` and `at`.
pub fn write_export(
    output: Option<&Path>,
    dir: &Path,
    view: View,
    extension: &str,
    content: &str,
    at: NaiveDateTime,
) -> CoreResult<PathBuf> {
    let path = match output {
        Some(path) if path.is_dir() => path.join(export_file_name(view, extension, at)),
        Some(path) => path.to_path_buf(),
        None => dir.join(export_file_name(view, extension, at)),
    };

    atomic_write_bytes(&path, content.as_bytes())?;
    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(path)
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wscribe".to_string());
    path.with_file_name(format!("{file_name}.{suffix}"))
}

#[cfg(not(windows))]
fn replace_with(dest: &Path, tmp: &Path) -> CoreResult<()> {
    std::fs::rename(tmp, dest).map_err(|e| {
        let _ = std::fs::remove_file(tmp);
        CoreError::IoError(e)
    })
}

// Rename-over-existing is not reliable on every Windows filesystem
#[cfg(windows)]
fn replace_with(dest: &Path, tmp: &Path) -> CoreResult<()> {
    if !dest.exists() {
        std::fs::rename(tmp, dest)?;
        return Ok(());
    }

    let bak = sibling_path(dest, "bak");
    let _ = std::fs::remove_file(&bak);
    std::fs::rename(dest, &bak)?;

    match std::fs::rename(tmp, dest) {
        Ok(()) => {
            let _ = std::fs::remove_file(&bak);
            Ok(())
        }
        Err(e) => {
            let _ = std::fs::rename(&bak, dest);
            let _ = std::fs::remove_file(tmp);
            Err(CoreError::IoError(e))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 58))
            .unwrap()
    }

    #[test]
    fn test_atomic_write_creates_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("file.json");

        atomic_write_bytes(&path, b"one").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one");

        atomic_write_bytes(&path, b"two").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "two");
        assert!(!sibling_path(&path, "tmp").exists());
    }

    #[test]
    fn test_atomic_write_json_pretty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v.json");

        atomic_write_json_pretty(&path, &serde_json::json!({ "a": 1 })).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_write_export_default_name() {
        let dir = TempDir::new().unwrap();
        let path = write_export(None, dir.path(), View::Transcript, "srt", "body", at()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "wscribe_transcript_25_12_31_23_59_58.srt"
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "body");
    }

    #[test]
    fn test_write_export_explicit_paths() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("out.vtt");

        let written =
            write_export(Some(&file), Path::new("/unused"), View::Subtitle, "vtt", "x", at())
                .unwrap();
        assert_eq!(written, file);

        let into_dir =
            write_export(Some(dir.path()), Path::new("/unused"), View::Subtitle, "txt", "y", at())
                .unwrap();
        assert_eq!(into_dir.parent().unwrap(), dir.path());
        assert!(into_dir.to_string_lossy().ends_with("wscribe_sub_25_12_31_23_59_58.txt"));
    }
}
