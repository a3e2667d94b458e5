use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::SynonymError;

/// Suffix of the scratch file written before the final rename.
const PART_SUFFIX: &str = ".part";

/// Read a UTF-8 file in full.
pub fn read_text(path: &Path) -> Result<String, SynonymError> {
    Ok(fs::read_to_string(path)?)
}

/// Replace `path` with `contents` as a whole-file rewrite.
///
/// Bytes land in a sibling `.part` file first and are renamed over the target,
/// so readers never observe a half-written table.
pub fn write_whole(path: &Path, contents: &[u8]) -> Result<(), SynonymError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let temp_target = part_path(path);
    if temp_target.exists() {
        let _ = fs::remove_file(&temp_target);
    }
    fs::write(&temp_target, contents)?;
    if let Err(err) = fs::rename(&temp_target, path) {
        let _ = fs::remove_file(&temp_target);
        return Err(err.into());
    }
    debug!(
        "[biosynonyms] wrote {} bytes -> {}",
        contents.len(),
        path.display()
    );
    Ok(())
}

fn part_path(path: &Path) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(PART_SUFFIX);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_whole_replaces_and_cleans_up() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("nested").join("table.tsv");

        write_whole(&target, b"first").unwrap();
        write_whole(&target, b"second").unwrap();

        assert_eq!(read_text(&target).unwrap(), "second");
        assert!(!part_path(&target).exists());
    }

    #[test]
    fn part_path_keeps_the_original_extension() {
        let path = Path::new("/tmp/positives.tsv");
        assert_eq!(part_path(path), PathBuf::from("/tmp/positives.tsv.part"));
    }

    #[test]
    fn read_text_reports_missing_files_as_io() {
        let temp = tempdir().unwrap();
        let err = read_text(&temp.path().join("missing.tsv")).unwrap_err();
        assert!(matches!(err, SynonymError::Io(_)));
    }
}
