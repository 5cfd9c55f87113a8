use hsl::HSL;
use plotters::style::RGBColor;
use prettytable::{Cell, Row, Table};

use crate::dataset::Dataset;

/// Commit hashes are shortened to this many characters on the x axis.
pub const COMMIT_LABEL_LEN: usize = 6;

/// Shorten a commit id for display. Ids of at most six characters are kept as is.
pub fn truncate_commit(commit: &str) -> String {
    if commit.chars().count() > COMMIT_LABEL_LEN {
        commit.chars().take(COMMIT_LABEL_LEN).collect()
    } else {
        commit.to_string()
    }
}

/// Render the dataset as a text table, one row per record. The `n` column
/// is only shown when the export has one.
pub fn dataset_table(dataset: &Dataset) -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(
        dataset.columns().into_iter().map(Cell::new).collect(),
    ));

    for record in dataset.records() {
        let mut cells = vec![
            Cell::new(&record.id.to_string()),
            Cell::new(&record.pkg),
            Cell::new(&record.commit),
            Cell::new(&record.name),
        ];
        if dataset.has_iterations() {
            let n = record.n.map(|n| n.to_string()).unwrap_or_default();
            cells.push(Cell::new(&n));
        }
        cells.push(Cell::new(&record.ns_per_op.to_string()));
        table.add_row(Row::new(cells));
    }

    table
}

/// The `[rows x columns]` line printed under the table.
pub fn table_footer(dataset: &Dataset) -> String {
    format!(
        "[{} rows x {} columns]",
        dataset.len(),
        dataset.columns().len()
    )
}

pub fn print_dataset(dataset: &Dataset) {
    dataset_table(dataset).printstd();
    println!("{}", table_footer(dataset));
}

/// Evenly spread hues, one per benchmark, with fixed saturation and lightness.
pub fn series_colors(count: usize) -> Vec<RGBColor> {
    (0..count)
        .map(|i| {
            let hue = i as f64 * 360.0 / count as f64;
            let (r, g, b) = HSL {
                h: hue,
                s: 0.7,
                l: 0.45,
            }
            .to_rgb();
            RGBColor(r, g, b)
        })
        .collect()
}
