use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::config::PlotConfig;
use crate::dataset::{Dataset, FilteredDataset};
use crate::error::{Error, Result};
use crate::layout::GridLayout;
use crate::utils::*;

type Float = f64;

/// One benchmark line of a subplot.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub name: String,
    /// `(commit position, ns_per_op)`, in descending id order.
    pub points: Vec<(usize, Float)>,
}

/// Everything needed to draw the chart of one package.
#[derive(Debug, Clone, PartialEq)]
pub struct Subplot {
    pub title: String,
    /// Shortened commit labels in the order they first appear.
    pub commits: Vec<String>,
    /// One line per retained benchmark name, empty when the package has no
    /// rows for that benchmark.
    pub lines: Vec<Line>,
}

impl Subplot {
    /// Collect the lines of `pkg`, one per name in `names`.
    ///
    /// Commits are categories: rows whose shortened commits are equal share
    /// an x position.
    pub fn build(dataset: &Dataset, pkg: &str, names: &[String]) -> Self {
        let mut commits: Vec<String> = Vec::new();
        let mut lines = Vec::with_capacity(names.len());

        for name in names {
            let mut points = Vec::new();
            for (commit, ns_per_op) in dataset.series(pkg, name) {
                let label = truncate_commit(&commit);
                let x = match commits.iter().position(|c| *c == label) {
                    Some(x) => x,
                    None => {
                        commits.push(label);
                        commits.len() - 1
                    }
                };
                points.push((x, ns_per_op));
            }
            lines.push(Line {
                name: name.clone(),
                points,
            });
        }

        Subplot {
            title: format!("Benchmarks: {pkg}"),
            commits,
            lines,
        }
    }

    /// x values are positions in `commits`.
    pub fn x_range(&self) -> Range<Float> {
        -0.5..(self.commits.len().max(1) as Float - 0.5)
    }

    /// Span of all points with 10% padding on both sides.
    pub fn y_range(&self) -> Range<Float> {
        let values: Vec<Float> = self
            .lines
            .iter()
            .flat_map(|l| l.points.iter().map(|p| p.1))
            .collect();
        let min = values.iter().cloned().fold(Float::INFINITY, Float::min);
        let max = values.iter().cloned().fold(Float::NEG_INFINITY, Float::max);

        if !min.is_finite() || !max.is_finite() {
            return 0.0..1.0;
        }
        if min == max {
            let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
            return (min - pad)..(max + pad);
        }
        let padding = (max - min) * 0.1;
        (min - padding)..(max + padding)
    }

    fn commit_label(&self, x: Float) -> String {
        let pos = x.round();
        if (x - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        self.commits.get(pos as usize).cloned().unwrap_or_default()
    }
}

/// The subplots of a filtered dataset, in package order.
pub fn subplots(filtered: &FilteredDataset) -> Vec<Subplot> {
    filtered
        .packages
        .iter()
        .map(|pkg| Subplot::build(&filtered.dataset, pkg, &filtered.names))
        .collect()
}

fn render_err<E>(err: DrawingAreaErrorKind<E>) -> Error
where
    E: std::error::Error + Send + Sync,
{
    Error::Render(err.to_string())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("svg"))
}

/// Draw every subplot into a `grid.rows x grid.columns` figure and write it
/// to `path`.
///
/// # Arguments
/// * `subplots` - One entry per package, placed row by row
/// * `grid` - The planned grid, at least as many cells as subplots
/// * `config` - Figure size and legend setting
/// * `path` - Target file, an `.svg` extension selects the SVG backend
pub fn render(
    subplots: &[Subplot],
    grid: GridLayout,
    config: &PlotConfig,
    path: &Path,
) -> Result<()> {
    let size = (config.width, config.height_for(grid.rows));
    if size.0 == 0 || size.1 == 0 {
        return Err(Error::Render(format!(
            "figure size must be positive, got {}x{}",
            size.0, size.1
        )));
    }
    log::debug!(
        "drawing {} subplots on a {}x{} grid, {}x{} px",
        subplots.len(),
        grid.rows,
        grid.columns,
        size.0,
        size.1
    );

    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_figure(&root, subplots, grid, config.show_legend)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_figure(&root, subplots, grid, config.show_legend)
    }
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    subplots: &[Subplot],
    grid: GridLayout,
    show_legend: bool,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    if !grid.is_empty() {
        // Every line gets the same color in every subplot.
        let names = subplots.first().map_or(0, |s| s.lines.len());
        let colors = series_colors(names);

        let cells = root.split_evenly((grid.rows, grid.columns));
        for (subplot, cell) in subplots.iter().zip(cells.iter()) {
            draw_subplot(cell, subplot, &colors, show_legend)?;
        }
    }

    // Save the figure to file
    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_subplot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    subplot: &Subplot,
    colors: &[RGBColor],
    show_legend: bool,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(&subplot.title, ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(subplot.x_range(), subplot.y_range())
        .map_err(render_err)?;

    let label_commit = |x: &Float| subplot.commit_label(*x);
    chart
        .configure_mesh()
        .x_desc("commit")
        .y_desc("ns per op")
        .x_labels(subplot.commits.len().max(1))
        .y_labels(8)
        .x_label_formatter(&label_commit)
        .draw()
        .map_err(render_err)?;

    for (i, line) in subplot.lines.iter().enumerate() {
        if line.points.is_empty() {
            continue;
        }
        let color = colors.get(i).copied().unwrap_or(RED);
        let points: Vec<(Float, Float)> = line
            .points
            .iter()
            .map(|&(x, y)| (x as Float, y))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(render_err)?
            .label(line.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart
            .draw_series(points.into_iter().map(|p| Circle::new(p, 3, color.filled())))
            .map_err(render_err)?;
    }

    if show_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}
