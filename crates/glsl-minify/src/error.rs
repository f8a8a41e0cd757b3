//! Errors produced by a minification run

use thiserror::Error;

/// Requester label used when the including buffer has no path
pub const INLINE_SOURCE: &str = "inline";

/// Failure of a minification run
///
/// Every variant is an inclusion failure: the run is aborted and no partial output is produced.
#[derive(Debug, Error)]
pub enum MinifyError {
    /// The include resolver could not find or read the requested file
    #[error("failed to include \"{filename}\" requested by {requested_by}: {source}")]
    Inclusion {
        filename: String,
        requested_by: String,
        #[source]
        source: std::io::Error,
    },
    /// The filename of an `@include` directive is not a valid string literal
    #[error("malformed include filename {literal} in {requested_by}: {source}")]
    MalformedInclude {
        literal: String,
        requested_by: String,
        #[source]
        source: serde_json::Error,
    },
    /// The file is already being expanded further up the include stack
    #[error("\"{filename}\" is recursively included; triggered in {requested_by}")]
    IncludeCycle { filename: String, requested_by: String },
}

impl MinifyError {
    /// The filename named by the failing include directive
    pub fn filename(&self) -> &str {
        match self {
            Self::Inclusion { filename, .. } | Self::IncludeCycle { filename, .. } => filename,
            Self::MalformedInclude { literal, .. } => literal,
        }
    }

    /// Path of the file containing the failing directive, or `"inline"`
    pub fn requested_by(&self) -> &str {
        match self {
            Self::Inclusion { requested_by, .. } | Self::MalformedInclude { requested_by, .. } | Self::IncludeCycle { requested_by, .. } => requested_by,
        }
    }
}
