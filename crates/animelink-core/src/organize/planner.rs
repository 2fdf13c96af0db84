//! # Rename Planner
//!
//! Builds canonical destination names and tracks which destinations a run
//! has already produced. A clash is reported, never resolved: both files keep
//! the same destination and the second link attempt fails at the filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::parser::NameParser;
use crate::types::{FileClassification, SeriesMetadata};

/// Base name used for extras whose file name has no format tag.
pub const NO_NAME: &str = "NO_NAME";

/// One destination produced by [`RenamePlanner::plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedName {
    /// Canonical file name, e.g. `Show S01E03.mkv`.
    pub file_name: String,
    /// `dst_dir` joined with `file_name`.
    pub destination: PathBuf,
    /// 1-based position of this file within the run.
    pub position: usize,
    /// 1-based position of the earlier file with the same destination.
    pub duplicate_of: Option<usize>,
}

/// Per-run destination name planner.
#[derive(Debug)]
pub struct RenamePlanner<'a> {
    names: &'a NameParser,
    seen: HashMap<PathBuf, usize>,
    planned: usize,
}

impl<'a> RenamePlanner<'a> {
    /// Starts a run with no destinations recorded.
    pub fn new(names: &'a NameParser) -> Self {
        Self {
            names,
            seen: HashMap::new(),
            planned: 0,
        }
    }

    /// Number of names planned so far in this run.
    pub fn len(&self) -> usize {
        self.planned
    }

    /// Returns `true` if nothing has been planned yet.
    pub fn is_empty(&self) -> bool {
        self.planned == 0
    }

    /// Computes the canonical file name without recording it.
    ///
    /// Main episodes become `<series> SxxEyy`; everything else is named after
    /// the first format tag of its own file name, or [`NO_NAME`]. A language
    /// code goes between the base and `suffix`.
    pub fn canonical_name(
        &self,
        file_name: &str,
        classification: &FileClassification,
        series: &SeriesMetadata,
        season: u32,
        suffix: &str,
    ) -> String {
        let base = match classification.main_episode() {
            Some(episode) => format!("{} S{season:02}E{episode:02}", series.series_name),
            None => self
                .names
                .parse_name(file_name)
                .first_tag()
                .unwrap_or(NO_NAME)
                .to_string(),
        };

        match classification.language_code {
            Some(ref code) => format!("{base}.{code}{suffix}"),
            None => format!("{base}{suffix}"),
        }
    }

    /// Plans the destination for one file and records it.
    ///
    /// Emits an INFO line `NN. <new> <- <old>`, or a WARN line naming the
    /// earlier position when the destination was already planned.
    pub fn plan(
        &mut self,
        dst_dir: &Path,
        file_name: &str,
        classification: &FileClassification,
        series: &SeriesMetadata,
        season: u32,
        suffix: &str,
    ) -> PlannedName {
        let new_name = self.canonical_name(file_name, classification, series, season, suffix);
        let destination = dst_dir.join(&new_name);

        self.planned += 1;
        let position = self.planned;
        let duplicate_of = self.seen.get(&destination).copied();

        match duplicate_of {
            Some(first) => warn!(
                "{position:02}. duplicate with {first:02}. :{new_name} <- {file_name}"
            ),
            None => {
                info!("{position:02}. {new_name} <- {file_name}");
                self.seen.insert(destination.clone(), position);
            }
        }

        PlannedName {
            file_name: new_name,
            destination,
            position,
            duplicate_of,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NameParts;

    fn series() -> SeriesMetadata {
        SeriesMetadata::from_parts(
            NameParts {
                series_name: "Show".into(),
                ..NameParts::default()
            },
            "/dl/Show",
            "/dl",
            "Show",
        )
    }

    fn episode(n: Option<u32>, main: bool, lang: Option<&str>) -> FileClassification {
        FileClassification {
            episode_number: n,
            season_number: 1,
            is_special_content: !main,
            language_code: lang.map(str::to_string),
            is_main_episode: main,
        }
    }

    #[test]
    fn main_episode_name() {
        let names = NameParser::new().unwrap();
        let planner = RenamePlanner::new(&names);
        let name = planner.canonical_name(
            "[Group] Show [03].mkv",
            &episode(Some(3), true, None),
            &series(),
            2,
            ".mkv",
        );
        assert_eq!(name, "Show S02E03.mkv");
    }

    #[test]
    fn three_digit_episode_is_not_truncated() {
        let names = NameParser::new().unwrap();
        let planner = RenamePlanner::new(&names);
        let name = planner.canonical_name(
            "Show - 108.mkv",
            &episode(Some(108), true, None),
            &series(),
            1,
            ".mkv",
        );
        assert_eq!(name, "Show S01E108.mkv");
    }

    #[test]
    fn language_code_sits_before_suffix() {
        let names = NameParser::new().unwrap();
        let planner = RenamePlanner::new(&names);
        let name = planner.canonical_name(
            "[Group] Show [03].zh-TW.srt",
            &episode(Some(3), true, Some("zh-TW")),
            &series(),
            1,
            ".srt",
        );
        assert_eq!(name, "Show S01E03.zh-TW.srt");
    }

    #[test]
    fn extras_use_first_tag_of_their_own_name() {
        let names = NameParser::new().unwrap();
        let planner = RenamePlanner::new(&names);
        let name = planner.canonical_name(
            "[Group] Show [NCOP][1080p].mkv",
            &episode(None, false, None),
            &series(),
            1,
            ".mkv",
        );
        assert_eq!(name, "NCOP.mkv");
    }

    #[test]
    fn numbered_file_outside_series_folder_is_an_extra() {
        let names = NameParser::new().unwrap();
        let planner = RenamePlanner::new(&names);
        let name = planner.canonical_name(
            "[Group] Show [05][Menu].mkv",
            &episode(Some(5), false, None),
            &series(),
            1,
            ".mkv",
        );
        assert_eq!(name, "05.mkv");
    }

    #[test]
    fn extras_without_tag_get_placeholder() {
        let names = NameParser::new().unwrap();
        let planner = RenamePlanner::new(&names);
        let name = planner.canonical_name(
            "bonus_clip.mp4",
            &episode(None, false, None),
            &series(),
            1,
            ".mp4",
        );
        assert_eq!(name, "NO_NAME.mp4");
    }

    #[test]
    fn collision_is_reported_not_renamed() {
        let names = NameParser::new().unwrap();
        let mut planner = RenamePlanner::new(&names);
        let dst = Path::new("/lib/Show/extras");
        let extra = episode(None, false, None);

        let a = planner.plan(dst, "[A] x [CM].mkv", &extra, &series(), 1, ".mkv");
        let b = planner.plan(dst, "[A] y [PV].mkv", &extra, &series(), 1, ".mkv");
        let c = planner.plan(dst, "[B] z [CM].mkv", &extra, &series(), 1, ".mkv");

        assert_eq!(a.duplicate_of, None);
        assert_eq!(b.duplicate_of, None);
        assert_eq!(c.position, 3);
        assert_eq!(c.duplicate_of, Some(1));
        assert_eq!(c.destination, a.destination);
        assert_eq!(c.file_name, "CM.mkv");
        assert_eq!(planner.len(), 3);
    }

    #[test]
    fn same_name_in_different_folders_is_not_a_collision() {
        let names = NameParser::new().unwrap();
        let mut planner = RenamePlanner::new(&names);
        let extra = episode(None, false, None);

        planner.plan(Path::new("/lib/a"), "[A] x [CM].mkv", &extra, &series(), 1, ".mkv");
        let b = planner.plan(Path::new("/lib/b"), "[A] x [CM].mkv", &extra, &series(), 1, ".mkv");
        assert_eq!(b.duplicate_of, None);
    }
}
