//! # Filesystem Boundary
//!
//! The only place the reorganizer mutates the filesystem. Read-only queries
//! (listing, existence checks) are done directly by the caller so that a
//! dry run plans exactly what a live run would.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{AnimelinkError, Result};

/// Mutating filesystem operations used by the reorganizer.
pub trait FileSystem {
    /// Creates `path` and any missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Creates `dst` as a hard link to `src`.
    fn hard_link(&self, src: &Path, dst: &Path) -> Result<()>;

    /// Moves the directory `src` to `dst`, creating `dst`'s parent first.
    fn move_dir(&self, src: &Path, dst: &Path) -> Result<()>;

    /// Returns `true` if this implementation never touches the disk.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Performs every operation with `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveFs;

impl FileSystem for LiveFs {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|source| AnimelinkError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
    }

    fn hard_link(&self, src: &Path, dst: &Path) -> Result<()> {
        fs::hard_link(src, dst).map_err(|source| AnimelinkError::Link {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
            source,
        })
    }

    fn move_dir(&self, src: &Path, dst: &Path) -> Result<()> {
        let archive_err = |source| AnimelinkError::Archive {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
            source,
        };
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).map_err(archive_err)?;
        }
        fs::rename(src, dst).map_err(archive_err)
    }
}

/// Logs what would happen and changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunFs;

impl FileSystem for DryRunFs {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        info!("[DRY RUN] Would create directory: {}", path.display());
        Ok(())
    }

    fn hard_link(&self, src: &Path, dst: &Path) -> Result<()> {
        debug!(
            "[DRY RUN] Would link: {} -> {}",
            src.display(),
            dst.display()
        );
        Ok(())
    }

    fn move_dir(&self, src: &Path, dst: &Path) -> Result<()> {
        info!("[DRY RUN] Would move: {} -> {}", src.display(), dst.display());
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}
