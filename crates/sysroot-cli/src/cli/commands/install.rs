//! `install-sysroot --arch <ARCH>`: install one sysroot.

use anyhow::Result;
use sysroot_core::fetch::Fetcher;
use sysroot_core::installer::Installer;
use sysroot_core::CanonicalArch;

use super::print_outcome;

/// Any failure is fatal for the process.
pub fn run_install<F: Fetcher>(installer: &Installer<F>, arch: CanonicalArch) -> Result<()> {
    let outcome = installer.install(arch)?;
    print_outcome(&outcome);
    Ok(())
}
