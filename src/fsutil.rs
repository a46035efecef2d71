//! Owner-only directories and atomic file writes.
//!
//! Every file keystash writes goes through `write_private`: the bytes
//! land in a temp file in the same directory (created `0600` on Unix),
//! get fsynced, and are then renamed over the target.  Readers never
//! observe a half-written key file or envelope.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Whether `write_private` may replace an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    Replace,
    Refuse,
}

/// Create `dir` (and parents) if needed.  Directories created here are
/// restricted to the owner; existing ones keep their permissions.
pub fn ensure_private_dir(dir: &Path) -> io::Result<()> {
    let mut created = Vec::new();
    for ancestor in dir.ancestors() {
        if ancestor.as_os_str().is_empty() || ancestor.try_exists()? {
            break;
        }
        created.push(ancestor);
    }

    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        for path in created {
            fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
        }
    }
    #[cfg(not(unix))]
    drop(created);

    Ok(())
}

/// Atomically write `contents` to `path` with owner-only permissions.
///
/// With `Overwrite::Refuse` an existing target is left untouched and
/// an `AlreadyExists` error is returned.
pub fn write_private(path: &Path, contents: &[u8], overwrite: Overwrite) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    let file = match overwrite {
        Overwrite::Replace => tmp.persist(path).map_err(|e| e.error)?,
        Overwrite::Refuse => tmp.persist_noclobber(path).map_err(|e| e.error)?,
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    #[cfg(not(unix))]
    drop(file);

    Ok(())
}

/// Remove `path`, treating a missing file as success.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
