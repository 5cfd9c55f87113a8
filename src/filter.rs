use regex::Regex;

use crate::error::{Error, Result};

/// Package and benchmark-name matchers. A missing matcher matches everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub pkg: Option<Regex>,
    pub bench: Option<Regex>,
}

impl Filter {
    /// Compile the optional package and benchmark patterns.
    ///
    /// The package pattern is compiled first, so when both are invalid the
    /// package error is the one reported.
    pub fn compile(pkg: Option<&str>, bench: Option<&str>) -> Result<Self> {
        let pkg = pkg
            .map(|exp| Regex::new(exp).map_err(Error::InvalidPkgRegex))
            .transpose()?;
        let bench = bench
            .map(|exp| Regex::new(exp).map_err(Error::InvalidBenchRegex))
            .transpose()?;

        Ok(Filter { pkg, bench })
    }

    pub fn matches_pkg(&self, pkg: &str) -> bool {
        is_match(self.pkg.as_ref(), pkg)
    }

    pub fn matches_bench(&self, name: &str) -> bool {
        is_match(self.bench.as_ref(), name)
    }
}

/// Substring semantics: the pattern only has to match somewhere in `value`.
fn is_match(matcher: Option<&Regex>, value: &str) -> bool {
    matcher.map_or(true, |re| re.is_match(value))
}

/// Keep the values accepted by `matcher`, preserving their relative order.
pub fn retain_matching(values: Vec<String>, matcher: Option<&Regex>) -> Vec<String> {
    values
        .into_iter()
        .filter(|value| is_match(matcher, value))
        .collect()
}

/// The grid needs at least one column.
pub fn validate_max_columns(max_columns: i64) -> Result<usize> {
    if max_columns < 1 {
        return Err(Error::MaxColumns);
    }
    usize::try_from(max_columns).map_err(|_| Error::MaxColumns)
}
