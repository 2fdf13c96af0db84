//! # Animelink Core
//!
//! Parses anime release directory and file names into structured metadata
//! and uses it to hard-link releases into a `Season NN` / `extras` library
//! layout.
//!
//! ## Quick Start
//!
//! ```rust
//! use animelink_core::parser::{Classifier, NameParser};
//!
//! let parser = NameParser::new().unwrap();
//! let meta = parser.parse("/downloads/[GroupA&GroupB] Show Title [01-12][BDRip]");
//!
//! assert_eq!(meta.series_name, "Show Title");
//! assert_eq!(meta.release_groups, vec!["GroupA", "GroupB"]);
//!
//! let classifier = Classifier::new().unwrap();
//! assert_eq!(classifier.parse_season_number("Tower.of.God.S02E23.mkv"), 2);
//! ```
pub mod error;
pub mod organize;
pub mod parser;
pub mod types;

// Re-export primary API
pub use error::{AnimelinkError, Result};
pub use organize::{
    ArchiveOutcome, DryRunFs, FileSystem, LiveFs, PlannedLink, PlannedName, RenamePlanner,
    ReorganizeConfig, ReorganizeReport, Reorganizer,
};
pub use parser::{Classifier, NameParser, PatternLibrary};
pub use types::{FileClassification, NameParts, SeriesMetadata};
