use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{PlotConfig, WIDTH};
use crate::error::Result;
use crate::filter::validate_max_columns;

/// Spelling of the column cap flag used by existing scripts. clap has no
/// single-dash long options, so it is rewritten before parsing.
const LEGACY_MAX_COLUMNS: &str = "-max-plots-collums";

/// Plot a csv file of benchmark history: one subplot per package, one line
/// per benchmark, ns/op over commits.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "bench-plot", version, about)]
pub struct Cli {
    /// The csv file (columns ID, commit, pkg, name, ns_per_op)
    #[arg(value_name = "file")]
    pub csv_file: PathBuf,

    /// Only packages matching this expression are displayed. If empty all
    /// packages are shown in different subplots
    #[arg(long = "pkg-regex", value_name = "exp")]
    pub pkg_regex: Option<String>,

    /// Only benchmarks matching this expression are shown
    #[arg(long = "bench-regex", value_name = "exp")]
    pub bench_regex: Option<String>,

    /// Maximum amount of plots to appear in the x axis
    #[arg(
        long = "max-plots-collums",
        visible_alias = "max-plots-columns",
        value_name = "int",
        default_value_t = 3,
        allow_negative_numbers = true
    )]
    pub max_plots_columns: i64,

    /// Also keep the figure at this path; a .svg extension writes SVG.
    /// Without it nothing is left on disk
    #[arg(short, long, value_name = "path")]
    pub output: Option<PathBuf>,

    /// Figure width in pixels
    #[arg(
        long,
        value_name = "px",
        default_value_t = WIDTH,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub width: u32,

    /// Figure height in pixels [default: 420 per row of subplots]
    #[arg(long, value_name = "px", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Draw a legend with the benchmark names
    #[arg(long)]
    pub legend: bool,

    /// Do not open the figure in an image viewer
    #[arg(long)]
    pub no_show: bool,

    /// Log what every stage is doing
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse an argument vector, accepting the legacy `-max-plots-collums`.
    pub fn try_parse_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Cli::try_parse_from(normalize_args(args))
    }

    /// Validate the column cap and build the invocation config.
    pub fn into_config(self) -> Result<PlotConfig> {
        let max_columns = validate_max_columns(self.max_plots_columns)?;

        let mut builder = PlotConfig::builder()
            .csv_path(self.csv_file)
            .pkg_regex(self.pkg_regex)
            .bench_regex(self.bench_regex)
            .max_columns(max_columns)
            .width(self.width)
            .height(self.height)
            .show_legend(self.legend)
            .show(!self.no_show);
        if let Some(output) = self.output {
            builder = builder.output(output);
        }
        Ok(builder.build())
    }
}

/// Rewrite `-max-plots-collums[=N]` to its double-dash form. Arguments after
/// `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut positional_only = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg: OsString| {
            if positional_only {
                return arg;
            }
            if arg == "--" {
                positional_only = true;
                return arg;
            }
            match arg.to_str() {
                Some(s) if s == LEGACY_MAX_COLUMNS || s.starts_with("-max-plots-collums=") => {
                    OsString::from(format!("-{s}"))
                }
                _ => arg,
            }
        })
        .collect()
}
