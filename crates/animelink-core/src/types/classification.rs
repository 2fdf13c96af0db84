use serde::{Deserialize, Serialize};

/// Per-file classification computed by the
/// [`Classifier`](crate::parser::Classifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileClassification {
    /// Episode number from the first matching episode pattern.
    pub episode_number: Option<u32>,

    /// Season number from the file name, `1` when nothing matched.
    pub season_number: u32,

    /// The file or its parent folder carries a special-content marker.
    pub is_special_content: bool,

    /// Subtitle language code such as `zh-TW`, only for subtitle files.
    pub language_code: Option<String>,

    /// The file sits directly in the series folder and has an episode number.
    pub is_main_episode: bool,
}

impl FileClassification {
    /// Returns the episode number only when the file is a main episode.
    ///
    /// Anything that is not a main episode is named through the extras
    /// branch, even if an episode number was detected.
    #[must_use]
    pub fn main_episode(&self) -> Option<u32> {
        if self.is_main_episode {
            self.episode_number
        } else {
            None
        }
    }
}
