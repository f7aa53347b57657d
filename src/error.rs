//! Error types for colormap loading and color lookup.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Result type alias for colormap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors signaled by the store, the interpolator and the legend
/// generator.  None of them is logged by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The definitions directory (or one of its files) could not be
    /// read.
    #[error("colormap store unavailable at {}: {source}", path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A definition file contains a line that is not `R G B` with
    /// integers in 0..=255.  `line` is 1-based; 0 means the file holds
    /// no color stop at all.
    #[error("malformed colormap {}: line {line}", file.display())]
    MalformedColormap { file: PathBuf, line: usize },

    /// No colormap is registered under this name.
    #[error("unknown colormap: {name}")]
    UnknownColormap { name: String },

    /// A sample value, fill value or range bound is NaN or infinite.
    #[error("invalid value: NaN or infinite input")]
    InvalidValue,

    /// Legend images need a positive width and height.
    #[error("invalid legend size: {width}x{height}")]
    InvalidLegendSize { width: usize, height: usize },
}
