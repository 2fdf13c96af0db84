pub mod config;
pub mod fs;
pub mod planner;
pub mod reorganizer;

pub use config::ReorganizeConfig;
pub use fs::{DryRunFs, FileSystem, LiveFs};
pub use planner::{NO_NAME, PlannedName, RenamePlanner};
pub use reorganizer::{ArchiveOutcome, EXTRAS_DIR, PlannedLink, ReorganizeReport, Reorganizer};
