//! # Name Parser
//!
//! Decomposes a release directory or file name into series name, release
//! groups, video-format tags and an optional episode range.

use std::path::Path;

use crate::error::Result;
use crate::parser::patterns::PatternLibrary;
use crate::types::{NameParts, SeriesMetadata};

/// Bracket-driven release-name parser.
///
/// ```rust
/// use animelink_core::parser::NameParser;
///
/// let parser = NameParser::new().unwrap();
/// let parts = parser.parse_name("[GroupA&GroupB] Show Title [01-12][BDRip]");
///
/// assert_eq!(parts.series_name, "Show Title");
/// assert_eq!(parts.release_groups, vec!["GroupA", "GroupB"]);
/// assert_eq!(parts.episode_range.as_deref(), Some("01-12"));
/// assert_eq!(parts.video_format_tags, vec!["BDRip"]);
/// ```
#[derive(Debug, Clone)]
pub struct NameParser {
    patterns: PatternLibrary,
}

impl NameParser {
    /// Constructs a parser with a freshly compiled [`PatternLibrary`].
    ///
    /// # Errors
    ///
    /// Returns `AnimelinkError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self::with_patterns(PatternLibrary::new()?))
    }

    /// Constructs a parser sharing an already compiled pattern library.
    #[must_use]
    pub fn with_patterns(patterns: PatternLibrary) -> Self {
        Self { patterns }
    }

    /// The pattern library backing this parser.
    #[must_use]
    pub fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }

    /// Parses the final component of `path` and records where it came from.
    pub fn parse(&self, path: impl AsRef<Path>) -> SeriesMetadata {
        let path = path.as_ref();
        let dir_name = final_component(path);
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
            _ => ".".to_string(),
        };

        let parts = self.parse_name(&dir_name);
        SeriesMetadata::from_parts(parts, path.to_string_lossy(), root, dir_name)
    }

    /// Parses a bare name (no path handling).
    ///
    /// The first bracket section becomes the release-group list. Each later
    /// section is either the episode range (first range-looking section only)
    /// or a video-format tag. Every consumed section is removed from the
    /// name, and what remains, minus leading dashes and whitespace, is the
    /// series name.
    pub fn parse_name(&self, name: &str) -> NameParts {
        let sections = self.patterns.bracket_sections(name);
        let mut parts = NameParts::default();

        let Some((first, rest)) = sections.split_first() else {
            parts.series_name = self.patterns.strip_leading_separators(name.trim()).trim().to_string();
            return parts;
        };

        parts.release_groups = first.split('&').map(|g| g.trim().to_string()).collect();
        let mut work = name.replace(&format!("[{first}]"), "").trim().to_string();

        for section in rest {
            let value = section.trim().to_string();
            if parts.episode_range.is_none() && self.patterns.is_episode_range(section) {
                parts.episode_range = Some(value);
            } else {
                parts.video_format_tags.push(value);
            }
            work = work.replace(&format!("[{section}]"), "").trim().to_string();
        }

        parts.series_name = self.patterns.strip_leading_separators(&work).trim().to_string();
        parts
    }
}

/// Final path component as text, falling back to the whole path for inputs
/// such as `.` or `/` that have none.
pub(crate) fn final_component(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
