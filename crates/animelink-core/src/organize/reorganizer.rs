//! # Directory Reorganizer
//!
//! Drives one source directory through parse, classify, plan and link, then
//! archives it. All mutations go through a [`FileSystem`], so a dry run
//! produces the same report as a live run without touching the disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{AnimelinkError, Result};
use crate::organize::config::{ReorganizeConfig, suffix_of};
use crate::organize::fs::{DryRunFs, FileSystem, LiveFs};
use crate::organize::planner::RenamePlanner;
use crate::parser::{Classifier, NameParser};
use crate::types::{FileClassification, SeriesMetadata};

/// Name of the extras folder inside a series folder.
pub const EXTRAS_DIR: &str = "extras";

/// A single source file and where it is linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedLink {
    /// The file being linked.
    pub source: PathBuf,
    /// The link to create.
    pub destination: PathBuf,
    /// 1-based position within the run.
    pub position: usize,
    /// Position of an earlier file planned to the same destination.
    pub duplicate_of: Option<usize>,
    /// How the file was classified.
    pub classification: FileClassification,
}

/// What happened to the source directory at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveOutcome {
    /// The source was moved to this path.
    Moved(PathBuf),
    /// Dry run: the source would have been moved to this path.
    WouldMove(PathBuf),
    /// An entry with the same name already exists in the archive root.
    Skipped(PathBuf),
    /// Links failed, so the source was left in place.
    Kept,
}

/// Everything a reorganization run decided and did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorganizeReport {
    /// Series-level metadata of the source directory.
    pub series: SeriesMetadata,
    /// Season detected from the source directory name.
    pub season: u32,
    /// `<library>/<series>/Season NN`.
    pub season_dir: PathBuf,
    /// `<library>/<series>/extras`.
    pub extras_dir: PathBuf,
    /// Every planned link, in processing order.
    pub links: Vec<PlannedLink>,
    /// Number of links whose destination clashed with an earlier one.
    pub duplicates: usize,
    /// Number of link attempts that failed.
    pub link_failures: usize,
    /// Fate of the source directory.
    pub archive: ArchiveOutcome,
}

/// Reorganizes release directories into the library layout.
pub struct Reorganizer {
    config: ReorganizeConfig,
    classifier: Classifier,
    fs: Box<dyn FileSystem>,
}

impl std::fmt::Debug for Reorganizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reorganizer")
            .field("config", &self.config)
            .field("dry_run", &self.fs.is_dry_run())
            .finish_non_exhaustive()
    }
}

impl Reorganizer {
    /// Create a reorganizer; `config.dry_run` selects [`DryRunFs`] over [`LiveFs`].
    ///
    /// # Errors
    ///
    /// Returns `AnimelinkError::RegexError` if a pattern fails to compile.
    pub fn new(config: ReorganizeConfig) -> Result<Self> {
        let fs: Box<dyn FileSystem> = if config.dry_run {
            Box::new(DryRunFs)
        } else {
            Box::new(LiveFs)
        };
        Ok(Self {
            config,
            classifier: Classifier::new()?,
            fs,
        })
    }

    /// Replace the filesystem boundary.
    pub fn with_file_system(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ReorganizeConfig {
        &self.config
    }

    /// The name parser used for series-level metadata.
    pub fn name_parser(&self) -> &NameParser {
        self.classifier.name_parser()
    }

    /// Checks that `source` exists and is a directory.
    ///
    /// # Errors
    ///
    /// `NotFound` or `NotADirectory`.
    pub fn validate(source: &Path) -> Result<()> {
        if !source.exists() {
            return Err(AnimelinkError::NotFound {
                path: source.to_path_buf(),
            });
        }
        if !source.is_dir() {
            return Err(AnimelinkError::NotADirectory {
                path: source.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Reorganizes one source directory.
    ///
    /// # Errors
    ///
    /// Validation errors, directory creation or listing failures, archive
    /// failures, and link failures when `abort_on_link_error` is set.
    pub fn reorganize(&self, source: &Path) -> Result<ReorganizeReport> {
        Self::validate(source)?;
        let series = self.name_parser().parse(source);
        self.reorganize_series(source, series)
    }

    /// Reorganizes a source directory whose metadata was already parsed.
    ///
    /// # Errors
    ///
    /// See [`Reorganizer::reorganize`].
    pub fn reorganize_series(
        &self,
        source: &Path,
        series: SeriesMetadata,
    ) -> Result<ReorganizeReport> {
        let season = self.classifier.parse_season_number(&series.source_dir_name);
        debug!("detected season: {season}");

        let series_dir = self.config.library_root.join(&series.series_name);
        let season_dir = series_dir.join(format!("Season {season:02}"));
        let extras_dir = series_dir.join(EXTRAS_DIR);

        debug!("name: {}", series.series_name);
        debug!("root: {}", series.source_root);
        debug!("src dir: {}", source.display());
        debug!("dst dir: {}", series_dir.display());

        self.fs.create_dir_all(&series_dir)?;
        self.fs.create_dir_all(&season_dir)?;
        self.fs.create_dir_all(&extras_dir)?;

        let mut report = ReorganizeReport {
            series,
            season,
            season_dir,
            extras_dir,
            links: Vec::new(),
            duplicates: 0,
            link_failures: 0,
            archive: ArchiveOutcome::Kept,
        };
        let mut planner = RenamePlanner::new(self.name_parser());

        info!("Start Season Episode");
        let season_dir = report.season_dir.clone();
        self.link_folder(source, &season_dir, &mut planner, &mut report)?;

        info!("## START SPECIAL CONTENT");
        let extras_dir = report.extras_dir.clone();
        for folder in &self.config.special_folders {
            let special = source.join(folder);
            if special.is_dir() {
                info!("Found special content folder: {folder}");
                self.link_folder(&special, &extras_dir, &mut planner, &mut report)?;
            }
        }

        report.archive = self.archive(source, &report)?;
        Ok(report)
    }

    fn link_folder(
        &self,
        src_dir: &Path,
        dst_dir: &Path,
        planner: &mut RenamePlanner<'_>,
        report: &mut ReorganizeReport,
    ) -> Result<()> {
        info!("Source directory: {}", src_dir.display());
        info!("Target directory: {}", dst_dir.display());

        for file in self.list_files(src_dir)? {
            if self.config.is_ignored(&file) {
                debug!("SKIP file: {}", file.display());
                continue;
            }

            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let classification = self.classifier.classify(&file, &report.series.series_name);
            debug!("language_code: {:?}", classification.language_code);
            debug!("ep_num: {:?}", classification.episode_number);
            debug!("special: {}", classification.is_special_content);

            let planned = planner.plan(
                dst_dir,
                &file_name,
                &classification,
                &report.series,
                report.season,
                &suffix_of(&file),
            );
            debug!("<< SRC File: {}", file.display());
            debug!(">> DST File: {}", planned.destination.display());

            if planned.duplicate_of.is_some() {
                report.duplicates += 1;
            }

            if let Err(e) = self.fs.hard_link(&file, &planned.destination) {
                error!("{e}");
                report.link_failures += 1;
                if self.config.abort_on_link_error {
                    return Err(e);
                }
            }

            report.links.push(PlannedLink {
                source: file,
                destination: planned.destination,
                position: planned.position,
                duplicate_of: planned.duplicate_of,
                classification,
            });
        }
        Ok(())
    }

    /// Regular files directly under `dir`, sorted by name.
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let read_err = |source| AnimelinkError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn archive(&self, source: &Path, report: &ReorganizeReport) -> Result<ArchiveOutcome> {
        let archive_dir = self.config.archive_root.join(&report.series.source_dir_name);

        if report.link_failures > 0 {
            warn!(
                "{} link(s) failed, keeping source in place: {}",
                report.link_failures,
                source.display()
            );
            return Ok(ArchiveOutcome::Kept);
        }

        info!("Moving SRC to : {}", archive_dir.display());
        if archive_dir.exists() {
            warn!("Directory exists: {}", archive_dir.display());
            return Ok(ArchiveOutcome::Skipped(archive_dir));
        }

        self.fs.move_dir(source, &archive_dir)?;
        if self.fs.is_dry_run() {
            Ok(ArchiveOutcome::WouldMove(archive_dir))
        } else {
            Ok(ArchiveOutcome::Moved(archive_dir))
        }
    }
}
