//! Per-architecture sysroot installer.
//!
//! One [`Installer::install`] call walks: check stamp → replace directory →
//! download → verify → extract → write stamp. The stamp is written only after
//! every earlier step succeeded, so any failure or interruption leaves a
//! directory the next run will reinstall.

mod extract;
mod stamp;
mod target;

pub use extract::extract_tarball;
pub use stamp::{is_current, read_stamp, write_stamp, STAMP_FILE};
pub use target::InstallTarget;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::arch::CanonicalArch;
use crate::catalog::Catalog;
use crate::checksum;
use crate::error::{InstallStep, SysrootError};
use crate::fetch::Fetcher;

/// Default artifact store.
pub const DEFAULT_URL_PREFIX: &str = "https://commondatastorage.googleapis.com";

/// Explicit settings for an installer; nothing is read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    pub url_prefix: String,
    /// Directory that holds the per-arch sysroot directories.
    pub install_root: PathBuf,
    /// Reinstall even if the stamp says the directory is current.
    pub force: bool,
}

impl InstallOptions {
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self {
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
            install_root: install_root.into(),
            force: false,
        }
    }
}

/// Result of a successful install call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Stamp matched; nothing was touched.
    AlreadyCurrent { arch: CanonicalArch, sysroot_dir: PathBuf },
    /// Fresh image downloaded, verified and extracted.
    Installed {
        arch: CanonicalArch,
        sysroot_dir: PathBuf,
        url: String,
    },
}

impl InstallOutcome {
    pub fn sysroot_dir(&self) -> &Path {
        match self {
            InstallOutcome::AlreadyCurrent { sysroot_dir, .. }
            | InstallOutcome::Installed { sysroot_dir, .. } => sysroot_dir,
        }
    }

    pub fn was_installed(&self) -> bool {
        matches!(self, InstallOutcome::Installed { .. })
    }
}

pub struct Installer<F: Fetcher> {
    fetcher: F,
    catalog: Catalog,
    options: InstallOptions,
}

impl<F: Fetcher> Installer<F> {
    pub fn new(fetcher: F, options: InstallOptions) -> Self {
        Self {
            fetcher,
            catalog: Catalog::default(),
            options,
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn options(&self) -> &InstallOptions {
        &self.options
    }

    /// Computes URL and paths for `arch` without touching disk.
    pub fn target(&self, arch: CanonicalArch) -> Result<InstallTarget, SysrootError> {
        let entry = self.catalog.lookup(arch)?;
        Ok(InstallTarget::new(
            arch,
            entry,
            &self.options.url_prefix,
            &self.options.install_root,
        ))
    }

    /// True if the sysroot for `arch` is installed from the current catalog URL.
    pub fn is_up_to_date(&self, arch: CanonicalArch) -> Result<bool, SysrootError> {
        let target = self.target(arch)?;
        Ok(stamp::is_current(&target.stamp_path, &target.url))
    }

    pub fn install(&self, arch: CanonicalArch) -> Result<InstallOutcome, SysrootError> {
        let target = self.target(arch)?;

        if !self.options.force && stamp::is_current(&target.stamp_path, &target.url) {
            tracing::info!(
                "Debian Wheezy {} root image already up-to-date: {}",
                arch,
                target.sysroot_dir.display()
            );
            return Ok(InstallOutcome::AlreadyCurrent {
                arch,
                sysroot_dir: target.sysroot_dir,
            });
        }

        tracing::info!(
            "Installing Debian Wheezy {} root image: {}",
            arch,
            target.sysroot_dir.display()
        );
        replace_dir(&target)?;

        if let Err(e) = self.download_and_verify(&target) {
            remove_tarball(&target);
            return Err(e);
        }

        tracing::debug!(dir = %target.sysroot_dir.display(), "extracting {}", target.entry.tarball);
        let extracted = extract::extract_tarball(&target.tarball_path, &target.sysroot_dir);
        remove_tarball(&target);
        extracted.map_err(|e| {
            SysrootError::filesystem(arch, InstallStep::Extract, &target.tarball_path, e)
        })?;

        stamp::write_stamp(&target.stamp_path, &target.url).map_err(|e| {
            SysrootError::filesystem(arch, InstallStep::WriteStamp, &target.stamp_path, e)
        })?;
        tracing::info!(url = %target.url, "installed {} sysroot", arch);

        Ok(InstallOutcome::Installed {
            arch,
            sysroot_dir: target.sysroot_dir,
            url: target.url,
        })
    }

    fn download_and_verify(&self, target: &InstallTarget) -> Result<(), SysrootError> {
        tracing::info!("Downloading {}", target.url);
        let bytes = self
            .fetcher
            .fetch(&target.url, &target.tarball_path)
            .map_err(|source| SysrootError::Transport {
                arch: target.arch,
                url: target.url.clone(),
                source,
            })?;
        tracing::debug!(bytes, "downloaded {}", target.tarball_path.display());

        let actual = checksum::sha1_path(&target.tarball_path).map_err(|e| {
            SysrootError::filesystem(target.arch, InstallStep::Verify, &target.tarball_path, e)
        })?;
        if !checksum::digests_match(&target.entry.sha1sum, &actual) {
            return Err(SysrootError::Integrity {
                arch: target.arch,
                expected: target.entry.sha1sum.to_string(),
                actual,
            });
        }
        Ok(())
    }
}

/// Wipes any previous sysroot for this arch and recreates it empty.
fn replace_dir(target: &InstallTarget) -> Result<(), SysrootError> {
    let dir = &target.sysroot_dir;
    let fs_err = |e| SysrootError::filesystem(target.arch, InstallStep::ReplaceDirectory, dir, e);
    match fs::symlink_metadata(dir) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(dir).map_err(fs_err)?,
        Ok(_) => fs::remove_file(dir).map_err(fs_err)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(fs_err(e)),
    }
    fs::create_dir_all(dir).map_err(fs_err)
}

fn remove_tarball(target: &InstallTarget) {
    match fs::remove_file(&target.tarball_path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            "could not remove {}: {}",
            target.tarball_path.display(),
            e
        ),
    }
}
