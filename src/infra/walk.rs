//! Filepath: src/infra/walk.rs
//! Directory enumeration for a renaming run.
//! - Flat (root only) or recursive listing of regular files
//! - Optional .gitignore/.ignore awareness and extra ignore globs
//! - Skips configured extensions and explicitly excluded files (the change log)
//! - Folder-contiguous, deterministic ordering
//!
//! Backed by ripgrep's `ignore` crate and `globset`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use tracing::debug;

/// Enumerates candidate files below a root.
/// Extra globs are applied in two places:
///   1) Early: prune directories during traversal (filter_entry).
///   2) Late: filter out files that still slipped through.
pub struct FileWalker
{
    /// Compiled set of additional ignore patterns
    ignore_patterns: GlobSet,

    /// Descend into sub-folders; default false
    recursive: bool,

    /// Include hidden (dot) files and folders; default true
    include_hidden: bool,

    /// Honor .gitignore/.ignore files; default false
    respect_ignore_files: bool,

    /// Lower-cased extensions (no dot) that are never listed
    skip_extensions: Vec<String>,

    /// Exact paths that are never listed
    excluded: Vec<PathBuf>,
}

impl FileWalker
{
    /// Build a walker with additional ignore patterns (e.g., "Extras/**",
    /// "**/*.nfo"). Patterns match on paths relative to the root.
    pub fn new(additional_ignores: &[String]) -> Result<Self>
    {
        let mut builder = GlobSetBuilder::new();

        for pattern in additional_ignores
        {
            builder.add(Glob::new(pattern)?);
        }

        Ok(Self {
            ignore_patterns: builder.build()?,
            recursive: false,
            include_hidden: true,
            respect_ignore_files: false,
            skip_extensions: Vec::new(),
            excluded: Vec::new(),
        })
    }

    /// Walk sub-folders too.
    pub fn with_recursive(
        mut self,
        recursive: bool,
    ) -> Self
    {
        self.recursive = recursive;
        self
    }

    /// Include or exclude hidden files (dotfiles).
    pub fn with_include_hidden(
        mut self,
        include_hidden: bool,
    ) -> Self
    {
        self.include_hidden = include_hidden;
        self
    }

    /// Honor or bypass .gitignore/.ignore rules.
    pub fn with_respect_ignore_files(
        mut self,
        respect: bool,
    ) -> Self
    {
        self.respect_ignore_files = respect;
        self
    }

    /// Never list files with these extensions (case-insensitive, dot optional).
    pub fn with_skip_extensions(
        mut self,
        extensions: &[String],
    ) -> Self
    {
        self.skip_extensions = extensions
            .iter()
            .map(|e| {
                e.trim_start_matches('.')
                    .to_ascii_lowercase()
            })
            .collect();
        self
    }

    /// Never list this exact path.
    pub fn with_excluded(
        mut self,
        path: PathBuf,
    ) -> Self
    {
        self.excluded
            .push(path);
        self
    }

    /// Internal: construct a configured WalkBuilder for `root`.
    fn build_walk(
        &self,
        root: &Path,
    ) -> WalkBuilder
    {
        let mut b = WalkBuilder::new(root);

        // WalkBuilder::hidden(true) skips dotfiles
        b.hidden(!self.include_hidden);

        b.ignore(self.respect_ignore_files);
        b.git_ignore(self.respect_ignore_files);
        // A user's global gitignore has nothing to say about a media folder
        b.git_global(false);
        b.git_exclude(self.respect_ignore_files);
        b.parents(self.respect_ignore_files);
        // Media folders are rarely inside a git repository.
        b.require_git(false);

        b.follow_links(false);

        // Depth 1 lists the root's own entries only
        b.max_depth(if self.recursive { None } else { Some(1) });

        let extra = self
            .ignore_patterns
            .clone();
        let root_owned = root.to_path_buf();
        b.filter_entry(move |ent: &DirEntry| {
            let is_dir = ent
                .file_type()
                .map(|ft| ft.is_dir())
                .unwrap_or(false);

            if is_dir && ent.depth() > 0
            {
                let rel = ent
                    .path()
                    .strip_prefix(&root_owned)
                    .unwrap_or(ent.path());
                if extra.is_match(rel)
                {
                    return false;
                }
            }
            true
        });

        b
    }

    fn is_skipped(
        &self,
        path: &Path,
    ) -> bool
    {
        let skipped_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.skip_extensions
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(ext))
            });

        skipped_ext
            || self
                .excluded
                .iter()
                .any(|ex| ex == path)
    }

    /// Traverse files under `root`. The result is sorted by (parent folder,
    /// file name) so each folder's files are contiguous and a folder's own
    /// files precede those of its sub-folders.
    pub fn walk_files<P: AsRef<Path>>(
        &self,
        root: P,
    ) -> Vec<PathBuf>
    {
        let root_path = root.as_ref();
        let walker = self
            .build_walk(root_path)
            .build();

        let mut out: Vec<PathBuf> = walker
            .filter_map(|res| match res
            {
                Ok(entry) => Some(entry),
                Err(err) =>
                {
                    debug!("skipping unreadable entry: {err}");
                    None
                }
            })
            // Keep only regular files
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|ft| ft.is_file())
            })
            .map(|entry| entry.into_path())
            // Late file-level extra ignore filtering using RELATIVE path
            .filter(|abs| {
                let rel = abs
                    .strip_prefix(root_path)
                    .unwrap_or(abs);
                !self
                    .ignore_patterns
                    .is_match(rel)
            })
            .filter(|abs| !self.is_skipped(abs))
            .collect();

        out.sort_by(|a, b| {
            a.parent()
                .cmp(&b.parent())
                .then_with(|| {
                    a.file_name()
                        .cmp(&b.file_name())
                })
        });

        out
    }
}
