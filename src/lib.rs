//! Plot benchmark history from a CSV export: one subplot per package, one
//! line per benchmark, nanoseconds per operation over commits.
//!
//! The stages can be used on their own ([`Filter`], [`Dataset`],
//! [`GridLayout`], [`chart::render`]) or chained with [`run`], which shows
//! the figure in an image viewer and waits for it to be closed.

use chart::Subplot;
use config::SCRATCH_FIGURE;
use dataset::Dataset;
use filter::Filter;
use layout::GridLayout;
use utils::print_dataset;

pub mod chart;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod layout;
pub mod utils;
pub mod viewer;

pub use config::PlotConfig;
pub use error::{Error, Result};

/// What was derived from the data for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    /// Retained packages, in first-seen order. One subplot each.
    pub packages: Vec<String>,
    /// Retained benchmark names, in first-seen order.
    pub names: Vec<String>,
    pub grid: GridLayout,
    pub subplots: Vec<Subplot>,
}

/// Load, filter and lay out, without drawing.
///
/// Pattern errors are reported before the file is read. The filtered table
/// is printed to stdout.
pub fn prepare(config: &PlotConfig) -> Result<PlotSpec> {
    if config.max_columns < 1 {
        return Err(Error::MaxColumns);
    }
    let filter = Filter::compile(config.pkg_regex.as_deref(), config.bench_regex.as_deref())?;

    let dataset = Dataset::load(&config.csv_path)?;
    let filtered = dataset.apply(&filter);
    print_dataset(&filtered.dataset);

    let grid = GridLayout::plan(filtered.packages.len(), config.max_columns);
    log::debug!("grid {}x{} for {} packages", grid.rows, grid.columns, filtered.packages.len());

    let subplots = chart::subplots(&filtered);
    Ok(PlotSpec {
        packages: filtered.packages,
        names: filtered.names,
        grid,
        subplots,
    })
}

/// [`prepare`], then draw the figure and, if `config.show` is set, open it
/// in an image viewer and block until the viewer is closed.
///
/// The figure is written to `config.output` when one is given. Otherwise it
/// is drawn into a temporary directory that is removed before returning, so
/// nothing is left on disk.
pub fn run(config: &PlotConfig) -> Result<PlotSpec> {
    let spec = prepare(config)?;

    // Lives until the viewer is closed.
    let scratch;
    let path = match &config.output {
        Some(output) => output.clone(),
        None => {
            scratch = scratch_dir()?;
            scratch.path().join(SCRATCH_FIGURE)
        }
    };

    chart::render(&spec.subplots, spec.grid, config, &path)?;
    log::info!("wrote {}", path.display());

    if config.show {
        viewer::open_blocking(&path)?;
    } else if config.output.is_none() {
        log::warn!("figure discarded; pass --output to keep it");
    }
    Ok(spec)
}

fn scratch_dir() -> Result<tempfile::TempDir> {
    tempfile::Builder::new()
        .prefix("bench-plot")
        .tempdir()
        .map_err(|source| Error::Io {
            path: std::env::temp_dir(),
            source,
        })
}

pub mod prelude {
    pub use crate::chart::{render, subplots, Line, Subplot};
    pub use crate::config::{PlotConfig, PlotConfigBuilder};
    pub use crate::dataset::{BenchmarkRecord, Dataset, FilteredDataset};
    pub use crate::error::{Error, Result};
    pub use crate::filter::{retain_matching, validate_max_columns, Filter};
    pub use crate::layout::GridLayout;
    pub use crate::utils::{print_dataset, truncate_commit};
    pub use crate::{prepare, run, PlotSpec};
}
