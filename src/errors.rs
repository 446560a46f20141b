/*!
 * Error types for the appfont installer.
 *
 * Library operations return `InstallError`; the binary wraps these in
 * `anyhow` with extra context at the edges.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or installing the icon map
#[derive(Error, Debug)]
pub enum InstallError {
    /// The running platform has no known font directory
    #[error("Unsupported OS '{0}'. This tool supports only macOS and Linux.")]
    UnsupportedPlatform(String),

    /// The target script lacks one or both delimiter markers
    #[error("Could not find {start_marker} or {end_marker} in {path:?}")]
    MarkerNotFound {
        /// Script that was searched
        path: PathBuf,
        /// Expected start marker
        start_marker: String,
        /// Expected end marker
        end_marker: String,
    },

    /// Underlying read/write/copy failure
    #[error("Filesystem error on {path:?}: {source}")]
    Filesystem {
        /// Path being accessed when the failure occurred
        path: PathBuf,
        /// The original I/O error
        #[source]
        source: std::io::Error,
    },

    /// The status-bar reload command failed to spawn or exited non-zero
    #[error("Status bar reload failed: {0}")]
    ReloadFailed(String),

    /// The glyph table is malformed
    #[error("Invalid glyph table: {0}")]
    InvalidTable(String),

    /// No home directory could be determined for the current user
    #[error("Could not determine the home directory of the current user")]
    HomeDirUnavailable,
}

impl InstallError {
    /// Wrap an I/O error with the path it occurred on
    pub fn filesystem<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    // @checks: Whether this is a marker lookup failure
    pub fn is_marker_not_found(&self) -> bool {
        matches!(self, Self::MarkerNotFound { .. })
    }
}

/// Marker lookup failure from the pure replacement function.
///
/// Carries no path; `Injector` attaches one when converting to `InstallError`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not find {start_marker} or {end_marker}")]
pub struct MarkerNotFound {
    /// Expected start marker
    pub start_marker: String,
    /// Expected end marker
    pub end_marker: String,
}

impl MarkerNotFound {
    /// Attach the script path that was searched
    pub fn at<P: Into<PathBuf>>(self, path: P) -> InstallError {
        InstallError::MarkerNotFound {
            path: path.into(),
            start_marker: self.start_marker,
            end_marker: self.end_marker,
        }
    }
}

/// Result alias for installer operations
pub type InstallResult<T> = std::result::Result<T, InstallError>;
