use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::filter::{retain_matching, Filter};

/// One benchmark measurement as written by the benchmark history collector.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkRecord {
    /// Sequence number of the run; later commits get larger ids.
    #[serde(rename = "ID")]
    pub id: i64,
    pub commit: String,
    pub pkg: String,
    pub name: String,
    /// Iteration count, only present in newer exports.
    #[serde(default)]
    pub n: Option<u64>,
    pub ns_per_op: f64,
}

/// Columns every export carries, in display order.
const COLUMNS: [&str; 5] = ["ID", "pkg", "commit", "name", "ns_per_op"];

/// All records of one CSV file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<BenchmarkRecord>,
    /// The export has an `n` column.
    iterations: bool,
}

/// The dataset after package and benchmark filtering, together with the
/// retained package and benchmark names in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredDataset {
    pub dataset: Dataset,
    pub packages: Vec<String>,
    pub names: Vec<String>,
}

impl Dataset {
    pub fn new(records: Vec<BenchmarkRecord>) -> Self {
        let iterations = records.iter().any(|r| r.n.is_some());
        Dataset {
            records,
            iterations,
        }
    }

    /// Load a CSV file with a header row.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        log::debug!("loaded {} rows from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let iterations = reader.headers()?.iter().any(|h| h == "n");

        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<BenchmarkRecord>, csv::Error>>()?;

        Ok(Dataset {
            records,
            iterations,
        })
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_iterations(&self) -> bool {
        self.iterations
    }

    /// Names of the columns read from the export, in display order. `n`
    /// follows `name` when present.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = COLUMNS.to_vec();
        if self.iterations {
            columns.insert(4, "n");
        }
        columns
    }

    /// Distinct package names in first-seen order.
    pub fn packages(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.pkg.as_str()))
    }

    /// Distinct benchmark names in first-seen order.
    pub fn names(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.name.as_str()))
    }

    /// Restrict the rows to the packages, then to the benchmark names, that
    /// `filter` accepts. Benchmark names are collected from the
    /// package-filtered rows only.
    pub fn apply(&self, filter: &Filter) -> FilteredDataset {
        let packages = retain_matching(self.packages(), filter.pkg.as_ref());
        let by_pkg = self.retain(|r| packages.contains(&r.pkg));

        let names = retain_matching(by_pkg.names(), filter.bench.as_ref());
        let dataset = by_pkg.retain(|r| names.contains(&r.name));

        log::debug!(
            "filter kept {} packages, {} benchmarks, {} of {} rows",
            packages.len(),
            names.len(),
            dataset.len(),
            self.len()
        );

        FilteredDataset {
            dataset,
            packages,
            names,
        }
    }

    /// Rows of one package, sorted by descending id. The sort is stable so
    /// rows sharing an id keep their file order.
    pub fn package_rows(&self, pkg: &str) -> Vec<&BenchmarkRecord> {
        let mut rows: Vec<&BenchmarkRecord> =
            self.records.iter().filter(|r| r.pkg == pkg).collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        rows
    }

    /// `(commit, ns_per_op)` points of one benchmark within one package, in
    /// descending id order. Empty when the pair does not exist.
    pub fn series(&self, pkg: &str, name: &str) -> Vec<(String, f64)> {
        self.package_rows(pkg)
            .into_iter()
            .filter(|r| r.name == name)
            .map(|r| (r.commit.clone(), r.ns_per_op))
            .collect()
    }

    fn retain<F>(&self, keep: F) -> Dataset
    where
        F: Fn(&BenchmarkRecord) -> bool,
    {
        Dataset {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
            iterations: self.iterations,
        }
    }
}

fn distinct<'a, I>(values: I) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
