//! Shared test utilities for integration tests
//!
//! Fixture folders of numbered files and helpers to inspect them.

#![allow(dead_code)]

use std::path::Path;

use assert_fs::prelude::*;

/// Create a temporary root holding one file per relative path.
pub fn make_fixture(files: &[&str]) -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    for rel in files
    {
        // Contents carry the original name so moves can be traced
        tmp.child(rel)
            .write_str(rel)
            .expect("write fixture file");
    }

    tmp
}

/// File names (not paths) directly inside `dir`, sorted.
pub fn names_in(dir: &Path) -> Vec<String>
{
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read_dir")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type()
                .map(|t| t.is_file())
                .unwrap_or(false)
        })
        .map(|e| {
            e.file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
