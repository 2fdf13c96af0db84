//! Animelink
//!
//! Parses anime release folder names, hard-links their episodes and extras
//! into `<library>/<series>/Season NN` and `<library>/<series>/extras`, then
//! moves each processed folder into the archive root.

mod logging;

use std::path::PathBuf;

use animelink_core::organize::config::{DEFAULT_ARCHIVE_ROOT, DEFAULT_LIBRARY_ROOT};
use animelink_core::{AnimelinkError, ReorganizeConfig, Reorganizer};
use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};

use crate::logging::LogLevel;

/// CLI arguments
#[derive(Parser)]
#[command(name = "animelink")]
#[command(about = "Parse anime folder names and link them into a season/extras library")]
#[command(version)]
struct Cli {
    /// Folder(s) to parse and reorganize
    #[arg(required = true)]
    names: Vec<PathBuf>,

    /// Show what would be done without modifying anything
    #[arg(long)]
    dry_run: bool,

    /// Logging level (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(long, value_enum, ignore_case = true, default_value = "info")]
    log_level: LogLevel,

    /// Library root receiving `<series>/Season NN` and `<series>/extras`
    #[arg(long, env = "ANIMELINK_LIBRARY_ROOT", default_value = DEFAULT_LIBRARY_ROOT)]
    library_root: PathBuf,

    /// Archive root receiving processed source folders
    #[arg(long, env = "ANIMELINK_ARCHIVE_ROOT", default_value = DEFAULT_ARCHIVE_ROOT)]
    archive_root: PathBuf,

    /// Stop everything at the first failed hard link
    #[arg(long)]
    abort_on_link_error: bool,
}

impl Cli {
    fn config(&self) -> ReorganizeConfig {
        ReorganizeConfig::new()
            .with_library_root(&self.library_root)
            .with_archive_root(&self.archive_root)
            .with_dry_run(self.dry_run)
            .with_abort_on_link_error(self.abort_on_link_error)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level, cli.dry_run);

    let reorganizer = Reorganizer::new(cli.config()).context("failed to compile name patterns")?;
    let mut failed = 0usize;

    for path in &cli.names {
        if let Err(e) = Reorganizer::validate(path) {
            error!("{e}");
            failed += 1;
            continue;
        }

        let series = reorganizer.name_parser().parse(path);
        println!("{}", series.to_pretty_json());

        match reorganizer.reorganize_series(path, series) {
            Ok(report) => info!(
                "Linked {} file(s) for {:?} ({} duplicate, {} failed)",
                report.links.len(),
                report.series.series_name,
                report.duplicates,
                report.link_failures
            ),
            Err(e @ AnimelinkError::Link { .. }) => {
                return Err(e).with_context(|| format!("aborting at {}", path.display()));
            }
            Err(e) => {
                error!("{e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} path(s) could not be processed", cli.names.len());
    }
    Ok(())
}
