//! Per-run install target: catalog entry plus the paths and URL derived from it.

use std::path::{Path, PathBuf};

use crate::arch::CanonicalArch;
use crate::catalog::CatalogEntry;

use super::stamp::STAMP_FILE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub arch: CanonicalArch,
    pub entry: CatalogEntry,
    pub url: String,
    pub sysroot_dir: PathBuf,
    /// Download location; inside the sysroot dir, removed after extraction.
    pub tarball_path: PathBuf,
    pub stamp_path: PathBuf,
}

impl InstallTarget {
    pub fn new(
        arch: CanonicalArch,
        entry: &CatalogEntry,
        url_prefix: &str,
        install_root: &Path,
    ) -> Self {
        let sysroot_dir = install_root.join(&*entry.sysroot_dir);
        Self {
            arch,
            url: entry.url(url_prefix),
            tarball_path: sysroot_dir.join(&*entry.tarball),
            stamp_path: sysroot_dir.join(STAMP_FILE),
            sysroot_dir,
            entry: entry.clone(),
        }
    }
}
