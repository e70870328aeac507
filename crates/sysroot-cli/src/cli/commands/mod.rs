//! CLI command handlers.

mod hook;
mod install;

pub use hook::run_hook;
pub use install::run_install;

use std::error::Error;

use sysroot_core::installer::InstallOutcome;
use sysroot_core::{CanonicalArch, SysrootError};

/// The one progress line printed per architecture, in either mode.
fn print_outcome(outcome: &InstallOutcome) {
    match outcome {
        InstallOutcome::AlreadyCurrent { arch, sysroot_dir } => println!(
            "Debian Wheezy {} root image already up-to-date: {}",
            arch,
            sysroot_dir.display()
        ),
        InstallOutcome::Installed {
            arch,
            sysroot_dir,
            url,
        } => println!(
            "Installed Debian Wheezy {} root image from {}: {}",
            arch,
            url,
            sysroot_dir.display()
        ),
    }
}

fn print_failure(arch: CanonicalArch, err: &SysrootError) {
    eprintln!("{} sysroot install failed: {}", arch, error_chain(err));
}

/// `err: cause: cause`, like anyhow's `{:#}`.
fn error_chain(err: &dyn Error) -> String {
    let mut msg = err.to_string();
    let mut cur = err.source();
    while let Some(cause) = cur {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        cur = cause.source();
    }
    msg
}
