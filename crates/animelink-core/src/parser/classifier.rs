//! # Episode / Season / Language Classifier
//!
//! Turns a single file name plus its folder context into a
//! [`FileClassification`]. Episode and season detection are ordered fallback
//! chains: each matcher is tried in turn and the first hit wins.

use std::path::Path;

use crate::error::Result;
use crate::parser::name::{final_component, NameParser};
use crate::parser::patterns::PatternLibrary;
use crate::types::FileClassification;

type NumberMatcher = fn(&PatternLibrary, &str) -> Option<u32>;

/// Episode matchers in priority order: `[08]`, `S02E23`, `第08話`.
const EPISODE_MATCHERS: [NumberMatcher; 3] = [
    PatternLibrary::episode_bracket,
    PatternLibrary::episode_sxxexx,
    PatternLibrary::episode_japanese,
];

/// Season matchers in priority order: `Season 2`, `S02`, `第2期`.
const SEASON_MATCHERS: [NumberMatcher; 3] = [
    PatternLibrary::season_word,
    PatternLibrary::season_sxx,
    PatternLibrary::season_japanese,
];

/// Season assumed when no season marker is present.
pub const DEFAULT_SEASON: u32 = 1;

/// Per-file classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    names: NameParser,
}

impl Classifier {
    /// Constructs a classifier with a freshly compiled pattern library.
    ///
    /// # Errors
    ///
    /// Returns `AnimelinkError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self::with_name_parser(NameParser::new()?))
    }

    /// Constructs a classifier around an existing name parser.
    #[must_use]
    pub fn with_name_parser(names: NameParser) -> Self {
        Self { names }
    }

    /// The name parser sharing this classifier's patterns.
    #[must_use]
    pub fn name_parser(&self) -> &NameParser {
        &self.names
    }

    fn patterns(&self) -> &PatternLibrary {
        self.names.patterns()
    }

    /// Detects the episode number of a file name.
    ///
    /// ```rust
    /// use animelink_core::parser::Classifier;
    ///
    /// let c = Classifier::new().unwrap();
    /// assert_eq!(c.parse_episode_number("Tower.of.God.S02E23.mkv"), Some(23));
    /// assert_eq!(c.parse_episode_number("[Group] Show [08].mkv"), Some(8));
    /// assert_eq!(c.parse_episode_number("no_episode_here.mkv"), None);
    /// ```
    pub fn parse_episode_number(&self, file_name: &str) -> Option<u32> {
        first_match(&EPISODE_MATCHERS, self.patterns(), file_name)
    }

    /// Detects the season number of a folder or file name, defaulting to `1`.
    pub fn parse_season_number(&self, name: &str) -> u32 {
        first_match(&SEASON_MATCHERS, self.patterns(), name).unwrap_or(DEFAULT_SEASON)
    }

    /// Returns `true` if the name carries a special-content marker.
    pub fn is_special_content(&self, name: &str) -> bool {
        self.patterns().is_special_content(name)
    }

    /// Extracts the subtitle language code, e.g. `zh-TW` from `x.zh-TW.srt`.
    ///
    /// Anything that does not end in a subtitle extension yields `None`.
    pub fn extract_language_code(&self, file_name: &str) -> Option<String> {
        if !self.patterns().has_subtitle_extension(file_name) {
            return None;
        }
        self.patterns().language_code(file_name).map(str::to_string)
    }

    /// Classifies a file given the series it belongs to.
    ///
    /// A file is a main episode when an episode number was found and its
    /// parent folder is named exactly `series_name`. Files in any other
    /// folder, including a bracketed release folder, are named as extras
    /// whatever their own name says.
    pub fn classify(&self, file: &Path, series_name: &str) -> FileClassification {
        let file_name = final_component(file);
        let parent_name = file
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let episode_number = self.parse_episode_number(&file_name);
        let in_series_folder = !parent_name.is_empty() && parent_name == series_name;

        FileClassification {
            episode_number,
            season_number: self.parse_season_number(&file_name),
            is_special_content: self.is_special_content(&parent_name)
                || self.is_special_content(&file_name),
            language_code: self.extract_language_code(&file_name),
            is_main_episode: in_series_folder && episode_number.is_some(),
        }
    }
}

fn first_match(matchers: &[NumberMatcher], patterns: &PatternLibrary, input: &str) -> Option<u32> {
    matchers.iter().find_map(|matcher| matcher(patterns, input))
}
