//! Per-architecture Debian sysroot installer.
//!
//! Resolves host/target architectures, downloads the pinned sysroot tarball,
//! verifies its SHA-1, extracts it and stamps the directory with the URL it
//! came from so repeat runs are no-ops.

pub mod config;
pub mod logging;

pub mod arch;
pub mod build_config;
pub mod catalog;
pub mod checksum;
pub mod error;
pub mod fetch;
pub mod installer;
pub mod plan;

pub use arch::CanonicalArch;
pub use error::SysrootError;
