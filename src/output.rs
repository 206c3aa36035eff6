//! Writing the generated module to disk.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `contents` in one step.
///
/// The data goes to a temporary file next to the target, which is renamed
/// over it only once fully written. On any failure the temporary file is
/// removed and whatever was at `path` is left untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let error = || ErrorKind::Write(path.to_path_buf());
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).or_raise(error)?;
    let mut file = NamedTempFile::new_in(dir).or_raise(error)?;
    file.write_all(contents).or_raise(error)?;
    // Temporary files are created owner-only; generated sources should look
    // like any other file in the tree.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file().set_permissions(fs::Permissions::from_mode(0o644)).or_raise(error)?;
    }
    // A failed rename hands the temporary file back; drop it so it is removed.
    file.persist(path).map_err(|err| err.error).or_raise(error)?;
    Ok(())
}
