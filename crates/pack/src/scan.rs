//! Directory scanning.
//!
//! Enumerates every regular file beneath a root directory and resolves it to
//! a root-relative logical path. The result is sorted by logical path, not
//! by native directory-listing order, so the same tree produces the same
//! sequence on every machine.

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use std::path::{Component, Path, PathBuf};
use tracing::instrument;
use walkdir::WalkDir;

/// A file discovered by the [`Scanner`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedFile {
    /// Location on disk, used to read the content.
    pub source: PathBuf,
    /// Root-relative, forward-slash separated path.
    pub path: String,
}

/// Recursive regular-file scanner for an asset root.
///
/// # Examples
///
/// ```no_run
/// use embedpack_pack::Scanner;
///
/// let files = Scanner::new("public/").scan().unwrap();
/// for file in files {
///     println!("{} <- {}", file.path, file.source.display());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Scanner {
    root: PathBuf,
    follow_symlinks: bool,
}

impl Scanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            follow_symlinks: false,
        }
    }

    /// Descend into symlinked directories while walking. Symlinks to regular
    /// files are always included; dangling links are always left out.
    #[must_use]
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Walk the root and return every regular file, ordered by logical path.
    ///
    /// Fails with [`ErrorKind::Scan`] if the root (or any directory below it)
    /// cannot be traversed; no partial listing is returned.
    #[instrument(skip(self), fields(root = %self.root.display(), files))]
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(self.follow_symlinks) {
            let entry = entry.or_raise(|| ErrorKind::Scan(self.root.clone()))?;
            // Without `follow_links` walkdir reports the link itself, so
            // resolve it to see whether it points at a regular file.
            let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }
            let path = self.logical_path(entry.path())?;
            files.push(ScannedFile { source: entry.into_path(), path });
        }
        files.sort_unstable_by(|a, b| a.path.cmp(&b.path));
        tracing::Span::current().record("files", files.len());
        Ok(files)
    }

    fn logical_path(&self, path: &Path) -> Result<String> {
        let invalid = || ErrorKind::InvalidPath(path.to_path_buf());
        let relative = match path.strip_prefix(&self.root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative,
            // The root itself is a file; it is known by its own name.
            _ => path.file_name().map(Path::new).ok_or_raise(invalid)?,
        };
        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_str().ok_or_raise(invalid)?),
                _ => exn::bail!(invalid()),
            }
        }
        Ok(segments.join("/"))
    }
}
