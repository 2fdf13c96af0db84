//! # Reorganization Settings
//!
//! Where the library and archive live, which inputs to skip, and how to react
//! to filesystem failures.

use std::path::{Path, PathBuf};

/// Default destination library root.
pub const DEFAULT_LIBRARY_ROOT: &str = "/Volumes/NAS_SSD/Media/Anime";

/// Default archive root for processed source directories.
pub const DEFAULT_ARCHIVE_ROOT: &str = "/Volumes/NAS_SSD/Media/orig";

/// Extensions (with leading dot, case-sensitive) that are never linked.
pub const DEFAULT_IGNORED_EXTENSIONS: &[&str] =
    &[".zip", ".rar", ".7z", ".tar", ".gz", ".xz", ".png", ".txt"];

/// File names that are never linked.
pub const DEFAULT_IGNORED_FILE_NAMES: &[&str] = &[".DS_Store"];

/// Special-content subfolders scanned for extras, in scan order.
pub const DEFAULT_SPECIAL_FOLDERS: &[&str] =
    &["SPs", "映像特典", "特典", "OVA", "OAD", "Specials", "Extras", "Bonus"];

/// Configuration for a [`Reorganizer`](super::Reorganizer).
#[derive(Debug, Clone)]
pub struct ReorganizeConfig {
    /// Root holding `<series>/Season NN` and `<series>/extras`.
    pub library_root: PathBuf,
    /// Root the source directory is moved into after linking.
    pub archive_root: PathBuf,
    /// Plan and log only; every mutating call becomes a no-op.
    pub dry_run: bool,
    /// Stop the run at the first failed link instead of continuing.
    pub abort_on_link_error: bool,
    /// Suffixes skipped while scanning.
    pub ignored_extensions: Vec<String>,
    /// Exact file names skipped while scanning.
    pub ignored_file_names: Vec<String>,
    /// Subfolder names routed into the extras folder.
    pub special_folders: Vec<String>,
}

impl Default for ReorganizeConfig {
    fn default() -> Self {
        Self {
            library_root: PathBuf::from(DEFAULT_LIBRARY_ROOT),
            archive_root: PathBuf::from(DEFAULT_ARCHIVE_ROOT),
            dry_run: false,
            abort_on_link_error: false,
            ignored_extensions: to_owned(DEFAULT_IGNORED_EXTENSIONS),
            ignored_file_names: to_owned(DEFAULT_IGNORED_FILE_NAMES),
            special_folders: to_owned(DEFAULT_SPECIAL_FOLDERS),
        }
    }
}

impl ReorganizeConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the library root.
    pub fn with_library_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.library_root = root.into();
        self
    }

    /// Set the archive root.
    pub fn with_archive_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.archive_root = root.into();
        self
    }

    /// Enable or disable dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Choose whether a failed link aborts the run.
    pub fn with_abort_on_link_error(mut self, abort: bool) -> Self {
        self.abort_on_link_error = abort;
        self
    }

    /// Replace the ignored extension list.
    pub fn with_ignored_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the special-folder list.
    pub fn with_special_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.special_folders = folders.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if the file should be skipped while scanning.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        let suffix = suffix_of(path);

        self.ignored_file_names.iter().any(|n| *n == name)
            || (!suffix.is_empty() && self.ignored_extensions.iter().any(|e| *e == suffix))
    }
}

/// The final extension with its leading dot, or an empty string.
///
/// Dot-files such as `.DS_Store` have no suffix.
pub fn suffix_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_library_layout() {
        let config = ReorganizeConfig::default();
        assert_eq!(config.library_root, PathBuf::from(DEFAULT_LIBRARY_ROOT));
        assert_eq!(config.archive_root, PathBuf::from(DEFAULT_ARCHIVE_ROOT));
        assert!(!config.dry_run);
        assert!(!config.abort_on_link_error);
        assert_eq!(config.special_folders.first().map(String::as_str), Some("SPs"));
    }

    #[test]
    fn builder_overrides() {
        let config = ReorganizeConfig::new()
            .with_library_root("/lib")
            .with_archive_root("/orig")
            .with_dry_run(true)
            .with_abort_on_link_error(true)
            .with_special_folders(["SPs"]);
        assert_eq!(config.library_root, PathBuf::from("/lib"));
        assert_eq!(config.archive_root, PathBuf::from("/orig"));
        assert!(config.dry_run);
        assert!(config.abort_on_link_error);
        assert_eq!(config.special_folders, vec!["SPs"]);
    }

    #[test]
    fn ignored_inputs() {
        let config = ReorganizeConfig::default();
        assert!(config.is_ignored(Path::new("/x/.DS_Store")));
        assert!(config.is_ignored(Path::new("/x/scans.zip")));
        assert!(config.is_ignored(Path::new("/x/readme.txt")));
        assert!(config.is_ignored(Path::new("/x/cover.png")));
        assert!(!config.is_ignored(Path::new("/x/cover.PNG")));
        assert!(!config.is_ignored(Path::new("/x/Show [01].mkv")));
    }

    #[test]
    fn txt_can_be_kept() {
        let config = ReorganizeConfig::default().with_ignored_extensions([".zip", ".png"]);
        assert!(!config.is_ignored(Path::new("/x/readme.txt")));
    }

    #[test]
    fn suffix_matches_last_extension() {
        assert_eq!(suffix_of(Path::new("a.zh-TW.srt")), ".srt");
        assert_eq!(suffix_of(Path::new("a.mkv")), ".mkv");
        assert_eq!(suffix_of(Path::new(".DS_Store")), "");
        assert_eq!(suffix_of(Path::new("noext")), "");
    }
}
