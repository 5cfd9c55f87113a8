use std::path::PathBuf;

/// File name of the figure when it is only written to be displayed
pub const SCRATCH_FIGURE: &str = "bench_plot.png";

/// The default maximum number of subplot columns
pub const MAX_COLUMNS: usize = 3;

/// The default figure width in pixels
pub const WIDTH: u32 = 1400;

/// Height given to each subplot row when no explicit height is set
pub const ROW_HEIGHT: u32 = 420;

/// Settings for one invocation, built once and passed to every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// The benchmark csv to plot.
    pub csv_path: PathBuf,

    /// Only packages matching this pattern get a subplot.
    pub pkg_regex: Option<String>,

    /// Only benchmarks matching this pattern get a line.
    pub bench_regex: Option<String>,

    /// Cap on the number of subplot columns.
    pub max_columns: usize,

    /// Where the figure is kept. An `.svg` extension selects the SVG backend.
    /// `None` draws into a temporary directory that is removed once the
    /// viewer has been closed.
    pub output: Option<PathBuf>,

    pub width: u32,

    /// `None` sizes the figure by its number of rows.
    pub height: Option<u32>,

    /// Draw a legend of benchmark names in every subplot.
    pub show_legend: bool,

    /// Open the figure in an image viewer and wait for it to close.
    pub show: bool,
}

impl PlotConfig {
    /// Builder pattern for configuring a plot
    pub fn builder() -> PlotConfigBuilder {
        PlotConfigBuilder::default()
    }

    /// Figure height for a grid with `rows` rows.
    pub fn height_for(&self, rows: usize) -> u32 {
        self.height
            .unwrap_or_else(|| ROW_HEIGHT * (rows.max(1) as u32))
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig::builder().build()
    }
}

/// Builder for `PlotConfig`
#[derive(Debug, Default)]
pub struct PlotConfigBuilder {
    csv_path: Option<PathBuf>,
    pkg_regex: Option<String>,
    bench_regex: Option<String>,
    max_columns: Option<usize>,
    output: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    show_legend: Option<bool>,
    show: Option<bool>,
}

impl PlotConfigBuilder {
    pub fn csv_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.csv_path = Some(path.into());
        self
    }

    pub fn pkg_regex(mut self, exp: Option<String>) -> Self {
        self.pkg_regex = exp;
        self
    }

    pub fn bench_regex(mut self, exp: Option<String>) -> Self {
        self.bench_regex = exp;
        self
    }

    pub fn max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = Some(max_columns);
        self
    }

    pub fn output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: Option<u32>) -> Self {
        self.height = height;
        self
    }

    pub fn show_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = Some(show_legend);
        self
    }

    pub fn show(mut self, show: bool) -> Self {
        self.show = Some(show);
        self
    }

    /// Build and return the final `PlotConfig`
    pub fn build(self) -> PlotConfig {
        PlotConfig {
            csv_path: self.csv_path.unwrap_or_default(),
            pkg_regex: self.pkg_regex,
            bench_regex: self.bench_regex,
            max_columns: self.max_columns.unwrap_or(MAX_COLUMNS),
            output: self.output,
            width: self.width.unwrap_or(WIDTH),
            height: self.height,
            show_legend: self.show_legend.unwrap_or(false),
            show: self.show.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PlotConfig::default();
        assert_eq!(config.max_columns, 3);
        assert_eq!(config.output, None);
        assert_eq!(config.width, 1400);
        assert!(!config.show_legend);
        assert!(config.show);
        assert!(config.pkg_regex.is_none());
        assert!(config.bench_regex.is_none());
    }

    #[test]
    fn height_follows_rows_unless_set() {
        let config = PlotConfig::default();
        assert_eq!(config.height_for(0), 420);
        assert_eq!(config.height_for(3), 1260);

        let config = PlotConfig::builder().height(Some(500)).build();
        assert_eq!(config.height_for(3), 500);
    }

    #[test]
    fn builder_sets_fields() {
        let config = PlotConfig::builder()
            .csv_path("bench.csv")
            .pkg_regex(Some("store".into()))
            .bench_regex(Some("Get".into()))
            .max_columns(2)
            .output("out.svg")
            .width(800)
            .show_legend(true)
            .build();
        assert_eq!(config.csv_path, PathBuf::from("bench.csv"));
        assert_eq!(config.pkg_regex.as_deref(), Some("store"));
        assert_eq!(config.bench_regex.as_deref(), Some("Get"));
        assert_eq!(config.max_columns, 2);
        assert_eq!(config.output, Some(PathBuf::from("out.svg")));
        assert_eq!(config.width, 800);
        assert!(config.show_legend);
        assert!(config.show);

        let config = PlotConfig::builder().show(false).build();
        assert!(!config.show);
    }
}
