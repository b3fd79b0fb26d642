//! Filesystem helpers for in-place rewrites.
//!
//! Every failure is reported with the path it happened on.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants;
use crate::error::{Error, Result};

/// Copy `source` to `backup` and flush the copy to disk.
///
/// An existing backup is overwritten. The copy is synced before returning so
/// that a crash during a following rewrite still leaves the backup intact.
pub fn backup(source: &Path, backup: &Path) -> Result<()> {
    fs::copy(source, backup).map_err(|e| Error::fs(backup, e))?;
    File::open(backup)
        .and_then(|f| f.sync_all())
        .map_err(|e| Error::fs(backup, e))?;
    debug!(from = %source.display(), to = %backup.display(), "backup written");
    Ok(())
}

/// Replace `path` with `content` via a temporary sibling and a rename.
///
/// Permissions of an existing file are carried over.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let tmp = temp_sibling(path);
    let permissions = fs::metadata(path).ok().map(|m| m.permissions());

    let result = (|| -> std::io::Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(content)?;
        file.sync_all()?;
        if let Some(permissions) = permissions {
            fs::set_permissions(&tmp, permissions)?;
        }
        fs::rename(&tmp, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(Error::fs(path, e));
    }

    debug!(path = %path.display(), bytes = content.len(), "file replaced");
    Ok(())
}

/// Write a file readable only by the owner (0600 on Unix).
pub fn write_private(path: &Path, content: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.create(true).truncate(true).write(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let result = (|| -> std::io::Result<()> {
        let mut file = options.open(path)?;
        file.write_all(content)?;
        file.flush()?;

        // Tighten permissions even when overwriting an existing file.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    })();

    result.map_err(|e| Error::fs(path, e))
}

/// Append `entry` to `dir/.gitignore` unless a line already equals it.
///
/// When `create` is false and there is no `.gitignore`, nothing is written
/// and `Ok(false)` is returned. Returns whether the file changed.
pub fn ensure_ignored(dir: &Path, entry: &str, create: bool) -> Result<bool> {
    let path = dir.join(constants::GITIGNORE_FILE);

    let existing = if path.exists() {
        fs::read_to_string(&path).map_err(|e| Error::fs(&path, e))?
    } else if create {
        String::new()
    } else {
        return Ok(false);
    };

    if existing.lines().any(|l| l.trim() == entry) {
        return Ok(false);
    }

    let mut updated = existing;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(entry);
    updated.push('\n');

    fs::write(&path, updated).map_err(|e| Error::fs(&path, e))?;
    debug!(path = %path.display(), entry, "ignore entry added");
    Ok(true)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!("{}.envault-tmp", name))
}
