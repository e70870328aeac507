//! Error taxonomy for sysroot resolution and installation.
//!
//! Every fatal condition names the architecture and the step it failed in,
//! so the CLI can print a single line that is enough to act on.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::arch::CanonicalArch;
use crate::fetch::FetchError;

/// Where a raw architecture token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Host platform detection.
    Host,
    /// Build configuration (declared cross-compile target).
    Target,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Host => write!(f, "host arch"),
            TokenSource::Target => write!(f, "target_arch"),
        }
    }
}

/// Installer step in which a failure happened.
///
/// The stamp check has no variant: an unreadable stamp just means "not current".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStep {
    ReplaceDirectory,
    Download,
    Verify,
    Extract,
    WriteStamp,
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallStep::ReplaceDirectory => "replace-directory",
            InstallStep::Download => "download",
            InstallStep::Verify => "verify",
            InstallStep::Extract => "extract",
            InstallStep::WriteStamp => "write-stamp",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SysrootError {
    /// Bad or missing command-line arguments. No side effects happened.
    #[error("{0}")]
    Usage(String),

    /// A raw architecture token is not in the lookup table for its source.
    #[error("unrecognized {origin}: {token}")]
    Resolution { origin: TokenSource, token: String },

    /// The architecture is recognized but has no installable catalog entry.
    #[error("unsupported architecture: {0}")]
    UnsupportedArchitecture(CanonicalArch),

    /// Fetching the tarball failed. Not retried here.
    #[error("{arch}: download of {url} failed")]
    Transport {
        arch: CanonicalArch,
        url: String,
        #[source]
        source: FetchError,
    },

    /// The downloaded tarball does not hash to the catalog digest.
    #[error("{arch}: tarball sha1sum is wrong. Expected {expected}, actual: {actual}")]
    Integrity {
        arch: CanonicalArch,
        expected: String,
        actual: String,
    },

    /// Directory removal/creation, hashing I/O, extraction or stamp write failed.
    #[error("{arch}: {step} failed for {}", .path.display())]
    Filesystem {
        arch: CanonicalArch,
        step: InstallStep,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SysrootError {
    pub(crate) fn filesystem(
        arch: CanonicalArch,
        step: InstallStep,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        SysrootError::Filesystem {
            arch,
            step,
            path: path.into(),
            source,
        }
    }
}
