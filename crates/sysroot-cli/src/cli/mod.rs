//! CLI for the sysroot installer.

mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use sysroot_core::arch::{self, CanonicalArch};
use sysroot_core::build_config::{self, GYP_DEFINES_VAR};
use sysroot_core::config::{self, SysrootConfig};
use sysroot_core::fetch::CurlFetcher;
use sysroot_core::installer::{InstallOptions, Installer};
use sysroot_core::SysrootError;

use commands::{run_hook, run_install};

/// Install Debian Wheezy sysroots for building binaries that run on older Linux.
#[derive(Debug, Parser)]
#[command(name = "install-sysroot")]
#[command(
    about = "Install Debian Wheezy sysroot images",
    long_about = "Install Debian Wheezy sysroots so that binaries built against them \
                  run on the oldest supported Linux distribution. Usually run from \
                  gclient hooks; a no-op on non-Linux hosts in that mode."
)]
pub struct Cli {
    /// Used when running from gclient hooks. Installs default sysroot images.
    #[arg(long)]
    pub running_as_hook: bool,

    /// Sysroot architecture: arm, i386, amd64, mips.
    #[arg(long, value_parser = parse_installable_arch)]
    pub arch: Option<CanonicalArch>,

    /// Directory that holds the sysroot directories (default: config, else the binary's directory).
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Artifact store base URL.
    #[arg(long, value_name = "URL")]
    pub url_prefix: Option<String>,

    /// Declared cross-compile target (x64, ia32, arm, arm64, mipsel); overrides config and GYP_DEFINES.
    #[arg(long, value_name = "TOKEN")]
    pub target_arch: Option<String>,

    /// Reinstall even if the stamp says the sysroot is up to date.
    #[arg(long)]
    pub force: bool,
}

/// What this invocation installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Default plan: host, i386 companion, declared target.
    Hook,
    Explicit(CanonicalArch),
}

fn parse_installable_arch(s: &str) -> Result<CanonicalArch, String> {
    match s.parse::<CanonicalArch>() {
        Ok(arch) if arch.is_installable() => Ok(arch),
        _ => Err(format!("choose from {}", arch::installable_names())),
    }
}

impl Cli {
    pub fn mode(&self) -> Result<Mode, SysrootError> {
        if self.running_as_hook {
            return Ok(Mode::Hook);
        }
        match self.arch {
            Some(arch) => Ok(Mode::Explicit(arch)),
            None => Err(SysrootError::Usage(
                "You must specify either --arch or --running-as-hook".to_string(),
            )),
        }
    }

    /// Installer settings: flags win over the config file.
    ///
    /// Without `--root` or `install_root` the sysroots live next to the
    /// installed binary (`anchor`), so every run finds the same stamps
    /// whatever the working directory.
    pub fn install_options(
        &self,
        cfg: &SysrootConfig,
        anchor: Option<&Path>,
    ) -> Result<InstallOptions, SysrootError> {
        let root = match (&self.root, &cfg.install_root, anchor) {
            (Some(p), _, _) if p.is_absolute() => p.clone(),
            (Some(p), _, _) => std::env::current_dir()
                .map_err(|e| SysrootError::Usage(format!("cannot resolve --root: {}", e)))?
                .join(p),
            (None, Some(p), _) if p.is_absolute() => p.clone(),
            (None, Some(p), Some(anchor)) => anchor.join(p),
            (None, None, Some(anchor)) => anchor.to_path_buf(),
            (None, _, None) => {
                return Err(SysrootError::Usage(
                    "cannot locate the install root; pass --root or set install_root in the config file"
                        .to_string(),
                ))
            }
        };
        let mut opts = InstallOptions::new(root);
        opts.url_prefix = self
            .url_prefix
            .clone()
            .unwrap_or_else(|| cfg.url_prefix.clone());
        opts.force = self.force;
        Ok(opts)
    }

    /// Declared target token from flag, config, or `GYP_DEFINES` (in that order).
    pub fn declared_target(&self, cfg: &SysrootConfig, gyp_defines: Option<&str>) -> Option<String> {
        build_config::declared_target_arch(
            self.target_arch.as_deref(),
            cfg.target_arch.as_deref(),
            gyp_defines,
        )
    }
}

/// Directory of the running binary; the default install root.
pub fn exe_anchor() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.mode()?;

    if mode == Mode::Hook && !cfg!(target_os = "linux") {
        tracing::info!("not a Linux host; skipping sysroot install");
        return Ok(());
    }

    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let options = cli.install_options(&cfg, exe_anchor().as_deref())?;
    let installer = Installer::new(CurlFetcher::new(cfg.fetch_options()), options);

    match mode {
        Mode::Hook => {
            let host = arch::detect_host_arch_token();
            let gyp_defines = std::env::var(GYP_DEFINES_VAR).ok();
            let target = cli.declared_target(&cfg, gyp_defines.as_deref());
            tracing::debug!(host = %host, target = ?target, "hook mode");
            run_hook(&installer, &host, target.as_deref())?;
        }
        Mode::Explicit(arch) => run_install(&installer, arch)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
