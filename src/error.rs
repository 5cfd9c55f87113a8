use std::path::PathBuf;

/// Errors produced while turning a benchmark CSV into a figure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `--max-plots-collums` was below 1.
    #[error("minimum value for x plots is 1")]
    MaxColumns,

    #[error("Invalid pkg-filter-regex: {0}")]
    InvalidPkgRegex(#[source] regex::Error),

    #[error("Invalid bench-regex: {0}")]
    InvalidBenchRegex(#[source] regex::Error),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed benchmark csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to render figure: {0}")]
    Render(String),

    /// None of the image viewers could be started.
    #[error(
        "no image viewer found to display {}; set {} or pass --no-show",
        .path.display(),
        crate::viewer::VIEWER_ENV
    )]
    NoViewer { path: PathBuf },
}

impl Error {
    /// Usage and pattern errors are reported as a single line and exit 1,
    /// everything else propagates out of `main`.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::MaxColumns | Error::InvalidPkgRegex(_) | Error::InvalidBenchRegex(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
