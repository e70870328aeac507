//! `install-sysroot --running-as-hook`: install the default plan.

use anyhow::{bail, Result};
use sysroot_core::fetch::Fetcher;
use sysroot_core::installer::Installer;
use sysroot_core::plan::{self, OnFailure};

use super::{print_failure, print_outcome};

/// Installs host, companion and declared-target sysroots.
///
/// A failed architecture does not stop the others; the run still fails
/// afterwards if any of them did.
pub fn run_hook<F: Fetcher>(
    installer: &Installer<F>,
    host_token: &str,
    target_token: Option<&str>,
) -> Result<()> {
    let report =
        plan::install_default_sysroots(installer, host_token, target_token, OnFailure::Continue)?;
    for (arch, result) in &report.results {
        match result {
            Ok(outcome) => print_outcome(outcome),
            Err(e) => print_failure(*arch, e),
        }
    }
    let failed = report.failures().count();
    if failed > 0 {
        bail!(
            "{} of {} sysroot installs failed",
            failed,
            report.results.len()
        );
    }
    Ok(())
}
