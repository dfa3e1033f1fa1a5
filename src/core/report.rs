//! Plain-text change log written next to the renamed files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::batch::FileItem;

/// Write one `original\nto\nproposed\n\n` block per changed item.
pub fn write_entries<W: Write>(out: &mut W, items: &[FileItem]) -> std::io::Result<usize> {
    let mut written = 0;
    for item in items.iter().filter(|i| i.changed) {
        write!(
            out,
            "{}\nto\n{}\n\n",
            item.original_path.display(),
            item.proposed_path.display()
        )?;
        written += 1;
    }
    Ok(written)
}

/// Truncate (or create) `path` and write the change log into it.
pub fn write_log(path: &Path, items: &[FileItem]) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create change log {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let written = write_entries(&mut out, items)
        .with_context(|| format!("Failed to write change log {}", path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to flush change log {}", path.display()))?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn only_changed_items_are_logged() {
        let items = vec![
            FileItem::new(1, PathBuf::from("a/3 Intro.mp3"), PathBuf::from("a/01 - Intro.mp3")),
            FileItem::new(2, PathBuf::from("a/02 - Same.mp3"), PathBuf::from("a/02 - Same.mp3")),
        ];
        let mut buf = Vec::new();
        let n = write_entries(&mut buf, &items).unwrap();

        assert_eq!(n, 1);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "a/3 Intro.mp3\nto\na/01 - Intro.mp3\n\n"
        );
    }

    #[test]
    fn log_is_truncated_each_run() {
        let tmp = tempfile::TempDir::new().unwrap();
        let log = tmp.path().join("renum.log");
        std::fs::write(&log, "stale contents from a previous run\n").unwrap();

        let n = write_log(&log, &[]).unwrap();

        assert_eq!(n, 0);
        assert_eq!(std::fs::read_to_string(&log).unwrap(), "");
    }
}
