//! Applies the proposed names. Failures are classified, logged and collected;
//! nothing here aborts the batch or retries.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::{debug, warn};

use super::batch::FileItem;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("target already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("permission denied")]
    NoPermission(#[source] io::Error),

    #[error("source not found")]
    SourceNotFound(#[source] io::Error),

    #[error("rename failed: {0}")]
    Other(#[source] io::Error),
}

impl From<io::Error> for RenameError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::PermissionDenied => RenameError::NoPermission(e),
            io::ErrorKind::NotFound => RenameError::SourceNotFound(e),
            _ => RenameError::Other(e),
        }
    }
}

/// What happened to the changed items of a batch.
#[derive(Debug, Default)]
pub struct RenameSummary {
    pub renamed: usize,
    pub failed: Vec<(FileItem, RenameError)>,
}

/// Move one file. An existing target is only replaced when it is the source
/// itself (a case-only rename on a case-insensitive filesystem).
pub fn rename_file(from: &Path, to: &Path) -> Result<(), RenameError> {
    if to.exists() && !is_same_file(from, to) {
        return Err(RenameError::AlreadyExists(to.to_path_buf()));
    }
    fs::rename(from, to)?;
    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Rename every changed item in order.
pub fn apply(items: &[FileItem], quiet: bool) -> RenameSummary {
    let changed: Vec<&FileItem> = items.iter().filter(|i| i.changed).collect();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(changed.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    };

    let mut summary = RenameSummary::default();

    for item in changed {
        match rename_file(&item.original_path, &item.proposed_path) {
            Ok(()) => {
                debug!(
                    from = %item.original_path.display(),
                    to = %item.proposed_path.display(),
                    "renamed"
                );
                summary.renamed += 1;
            }
            Err(e) => {
                warn!(
                    "could not rename {} to {}: {e}",
                    item.original_path.display(),
                    item.proposed_path.display()
                );
                summary.failed.push((item.clone(), e));
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    summary
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn item(id: usize, from: PathBuf, to: PathBuf) -> FileItem {
        FileItem::new(id, from, to)
    }

    #[test]
    fn renames_changed_items_only() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("1 A.mp3");
        let b = tmp.path().join("01 - B.mp3");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let items = vec![
            item(1, a.clone(), tmp.path().join("01 - A.mp3")),
            item(2, b.clone(), b.clone()),
        ];
        let summary = apply(&items, true);

        assert_eq!(summary.renamed, 1);
        assert!(summary.failed.is_empty());
        assert!(tmp.path().join("01 - A.mp3").exists());
        assert!(!a.exists());
        assert!(b.exists());
    }

    #[test]
    fn existing_target_is_a_conflict() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("1 Song.mp3");
        let second = tmp.path().join("01 Song.mp3");
        let target = tmp.path().join("01 - Song.mp3");
        fs::write(&first, "first").unwrap();
        fs::write(&second, "second").unwrap();

        let items = vec![
            item(1, first.clone(), target.clone()),
            item(2, second.clone(), target.clone()),
        ];
        let summary = apply(&items, true);

        assert_eq!(summary.renamed, 1);
        assert_eq!(summary.failed.len(), 1);
        assert!(matches!(summary.failed[0].1, RenameError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(&target).unwrap(), "first");
        assert!(second.exists(), "loser keeps its original name");
    }

    #[test]
    fn missing_source_is_reported() {
        let tmp = TempDir::new().unwrap();
        let err = rename_file(&tmp.path().join("1 Gone.mp3"), &tmp.path().join("01 - Gone.mp3"))
            .unwrap_err();
        assert!(matches!(err, RenameError::SourceNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn read_only_folder_is_a_permission_failure() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("locked");
        fs::create_dir(&dir).unwrap();
        let from = dir.join("1 Song.mp3");
        fs::write(&from, "x").unwrap();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

        // root ignores directory modes
        let writable = fs::write(dir.join("write-check"), "").is_ok();
        let result = rename_file(&from, &dir.join("01 - Song.mp3"));
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
        if writable {
            return;
        }

        assert!(matches!(result, Err(RenameError::NoPermission(_))));
        assert!(from.exists());
    }

    #[cfg(unix)]
    #[test]
    fn target_under_a_file_is_another_failure() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("1 Song.mp3");
        let blocker = tmp.path().join("Disc 1");
        fs::write(&from, "x").unwrap();
        fs::write(&blocker, "not a folder").unwrap();

        let err = rename_file(&from, &blocker.join("01 - Song.mp3")).unwrap_err();
        assert!(matches!(err, RenameError::Other(_)));
        assert!(from.exists());
    }
}
