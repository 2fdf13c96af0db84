use std::fmt;

use serde::{Deserialize, Serialize};

/// The bracket-level decomposition of a single release name.
///
/// Produced for both directory names and individual file names; the
/// directory-level form is wrapped in [`SeriesMetadata`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameParts {
    /// Cleaned title with every bracket section and leading separator removed.
    pub series_name: String,

    /// Release groups from the first bracket section, split on `&`.
    pub release_groups: Vec<String>,

    /// Remaining bracket sections that are not the episode range, in order.
    pub video_format_tags: Vec<String>,

    /// First bracket section (after the group) that looks like `01-12`.
    pub episode_range: Option<String>,
}

impl NameParts {
    /// Returns the first video-format tag, used to name extras.
    #[must_use]
    pub fn first_tag(&self) -> Option<&str> {
        self.video_format_tags.first().map(String::as_str)
    }
}

/// Series-level metadata parsed once per source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    /// Cleaned series title.
    pub series_name: String,

    /// Release groups, empty iff the name had no bracket sections.
    pub release_groups: Vec<String>,

    /// Video-format tags such as `BDRip` or `1080p`.
    pub video_format_tags: Vec<String>,

    /// Episode range such as `01-12`, if one was bracketed.
    pub episode_range: Option<String>,

    /// The path exactly as it was given.
    pub source_path: String,

    /// Parent of `source_path` (`.` for a bare name).
    pub source_root: String,

    /// Final component of `source_path`, used as the archive folder name.
    pub source_dir_name: String,
}

impl SeriesMetadata {
    /// Combines parsed name parts with the path they came from.
    #[must_use]
    pub fn from_parts(
        parts: NameParts,
        source_path: impl Into<String>,
        source_root: impl Into<String>,
        source_dir_name: impl Into<String>,
    ) -> Self {
        Self {
            series_name: parts.series_name,
            release_groups: parts.release_groups,
            video_format_tags: parts.video_format_tags,
            episode_range: parts.episode_range,
            source_path: source_path.into(),
            source_root: source_root.into(),
            source_dir_name: source_dir_name.into(),
        }
    }

    /// Renders the metadata as the pretty JSON record printed before a run.
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        // Plain strings and vectors cannot fail to serialize.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl fmt::Display for SeriesMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeriesMetadata(name={:?}", self.series_name)?;
        if !self.release_groups.is_empty() {
            write!(f, ", groups={}", self.release_groups.join("&"))?;
        }
        if let Some(ref range) = self.episode_range {
            write!(f, ", range={range}")?;
        }
        if !self.video_format_tags.is_empty() {
            write!(f, ", tags=[{}]", self.video_format_tags.join("]["))?;
        }
        write!(f, ")")
    }
}
