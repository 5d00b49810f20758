//! Output directory resolution
//!
//! Downloads land in `<Downloads>/<YYYY.MM.DD> - <title>/`. The date comes
//! from the video's upload or release date when one is known, today
//! otherwise. Directory creation failure is fatal for the invocation.

use crate::error::VdlError;
use crate::utils::filename::sanitize_title;
use crate::Result;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Date layout yt-dlp reports (`upload_date` / `release_date`)
const SOURCE_DATE_FORMAT: &str = "%Y%m%d";
/// Date layout used in directory names
const FOLDER_DATE_FORMAT: &str = "%Y.%m.%d";

/// Resolve and create the output directory under the user's Downloads
/// folder.
pub fn resolve_output_dir(title: &str, date_str: Option<&str>) -> Result<PathBuf> {
    let base = dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .ok_or_else(|| VdlError::OutputDir("no home directory".to_string()))?;
    resolve_output_dir_in(&base, title, date_str)
}

/// Same as [`resolve_output_dir`] with an explicit base directory.
pub fn resolve_output_dir_in(base: &Path, title: &str, date_str: Option<&str>) -> Result<PathBuf> {
    let date_fmt = match date_str {
        Some(raw) => match NaiveDate::parse_from_str(raw, SOURCE_DATE_FORMAT) {
            Ok(date) => date.format(FOLDER_DATE_FORMAT).to_string(),
            Err(_) => {
                warn!("Invalid date format: {}", raw);
                Local::now().format(FOLDER_DATE_FORMAT).to_string()
            }
        },
        None => Local::now().format(FOLDER_DATE_FORMAT).to_string(),
    };

    let folder_name = format!("{} - {}", date_fmt, sanitize_title(title));
    let output_dir = base.join(folder_name);

    fs::create_dir_all(&output_dir)
        .map_err(|e| VdlError::OutputDir(format!("{}: {}", output_dir.display(), e)))?;

    Ok(output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_valid_date() {
        let base = tempfile::tempdir().unwrap();
        let dir = resolve_output_dir_in(base.path(), "My Video", Some("20240131")).unwrap();
        assert_eq!(
            dir.file_name().unwrap().to_str().unwrap(),
            "2024.01.31 - My Video"
        );
        assert!(dir.is_dir());
    }

    #[test]
    fn test_resolve_with_invalid_date_uses_today() {
        let base = tempfile::tempdir().unwrap();
        let dir = resolve_output_dir_in(base.path(), "My Video", Some("not-a-date")).unwrap();
        let today = Local::now().format(FOLDER_DATE_FORMAT).to_string();
        assert_eq!(
            dir.file_name().unwrap().to_str().unwrap(),
            format!("{} - My Video", today)
        );
    }

    #[test]
    fn test_resolve_without_date_uses_today() {
        let base = tempfile::tempdir().unwrap();
        let dir = resolve_output_dir_in(base.path(), "Untitled", None).unwrap();
        let today = Local::now().format(FOLDER_DATE_FORMAT).to_string();
        assert!(dir
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with(&today));
    }

    #[test]
    fn test_resolve_sanitizes_title() {
        let base = tempfile::tempdir().unwrap();
        let dir = resolve_output_dir_in(base.path(), "a/b: c?", Some("20240101")).unwrap();
        assert_eq!(
            dir.file_name().unwrap().to_str().unwrap(),
            "2024.01.01 - ab c"
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let base = tempfile::tempdir().unwrap();
        let first = resolve_output_dir_in(base.path(), "Video", Some("20240101")).unwrap();
        let second = resolve_output_dir_in(base.path(), "Video", Some("20240101")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_fails_on_unwritable_base() {
        // A base that is a file, not a directory
        let base = tempfile::tempdir().unwrap();
        let file = base.path().join("blocker");
        std::fs::write(&file, b"x").unwrap();
        let err = resolve_output_dir_in(&file, "Video", None).unwrap_err();
        assert!(matches!(err, VdlError::OutputDir(_)));
    }
}
