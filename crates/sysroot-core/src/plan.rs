//! Default install plan for unattended (hook) runs.
//!
//! Host sysroot first; the i386 sysroot on amd64 hosts (32-bit build-time
//! tools such as the V8 snapshot generator need it); then a declared
//! cross-compile target if it adds anything. `arm64` is excluded by policy.

use crate::arch::{resolve_host_arch, resolve_target_arch, CanonicalArch};
use crate::error::SysrootError;
use crate::fetch::Fetcher;
use crate::installer::{InstallOutcome, Installer};

/// Architectures to install, host first, no duplicates.
///
/// Both tokens are resolved before anything is returned, so a bad token
/// means no install is attempted at all.
pub fn select_default_archs(
    host_token: &str,
    target_token: Option<&str>,
) -> Result<Vec<CanonicalArch>, SysrootError> {
    let host = resolve_host_arch(host_token)?;
    let target = resolve_target_arch(target_token)?;

    let mut archs = vec![host];
    if host == CanonicalArch::Amd64 {
        archs.push(CanonicalArch::I386);
    }
    if let Some(t) = target {
        if t != host && t != CanonicalArch::I386 && t != CanonicalArch::Arm64 {
            archs.push(t);
        }
    }
    Ok(archs)
}

/// What to do after one architecture in the plan fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnFailure {
    #[default]
    Stop,
    Continue,
}

/// Per-architecture results of a plan run, in install order.
#[derive(Debug, Default)]
pub struct PlanReport {
    pub results: Vec<(CanonicalArch, Result<InstallOutcome, SysrootError>)>,
}

impl PlanReport {
    pub fn failures(&self) -> impl Iterator<Item = (CanonicalArch, &SysrootError)> {
        self.results
            .iter()
            .filter_map(|(arch, r)| r.as_ref().err().map(|e| (*arch, e)))
    }

    /// All outcomes, or the first error.
    pub fn into_result(self) -> Result<Vec<InstallOutcome>, SysrootError> {
        self.results.into_iter().map(|(_, r)| r).collect()
    }
}

/// Installs every architecture from [`select_default_archs`].
pub fn install_default_sysroots<F: Fetcher>(
    installer: &Installer<F>,
    host_token: &str,
    target_token: Option<&str>,
    on_failure: OnFailure,
) -> Result<PlanReport, SysrootError> {
    let archs = select_default_archs(host_token, target_token)?;
    tracing::debug!(?archs, "default sysroot plan");

    let mut report = PlanReport::default();
    for arch in archs {
        let result = installer.install(arch);
        let failed = result.is_err();
        if let Err(e) = &result {
            tracing::warn!("{} sysroot install failed: {}", arch, e);
        }
        report.results.push((arch, result));
        if failed && on_failure == OnFailure::Stop {
            break;
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::installer::InstallOptions;
    use std::cell::RefCell;
    use std::path::Path;

    use crate::arch::CanonicalArch::*;

    #[test]
    fn amd64_host_without_target_adds_i386() {
        assert_eq!(select_default_archs("x64", None).unwrap(), vec![Amd64, I386]);
    }

    #[test]
    fn amd64_host_with_arm64_target_excludes_arm64() {
        assert_eq!(
            select_default_archs("x64", Some("arm64")).unwrap(),
            vec![Amd64, I386]
        );
    }

    #[test]
    fn amd64_host_with_arm_or_mips_target_adds_it() {
        assert_eq!(
            select_default_archs("x64", Some("arm")).unwrap(),
            vec![Amd64, I386, Arm]
        );
        assert_eq!(
            select_default_archs("x64", Some("mipsel")).unwrap(),
            vec![Amd64, I386, Mips]
        );
    }

    #[test]
    fn target_equal_to_host_or_i386_is_not_repeated() {
        assert_eq!(select_default_archs("x64", Some("x64")).unwrap(), vec![Amd64, I386]);
        assert_eq!(select_default_archs("x64", Some("ia32")).unwrap(), vec![Amd64, I386]);
        assert_eq!(select_default_archs("ia32", Some("ia32")).unwrap(), vec![I386]);
        assert_eq!(select_default_archs("arm", Some("arm")).unwrap(), vec![Arm]);
    }

    #[test]
    fn non_amd64_hosts_get_no_i386_companion() {
        assert_eq!(select_default_archs("arm", None).unwrap(), vec![Arm]);
        assert_eq!(select_default_archs("mips", None).unwrap(), vec![Mips]);
        assert_eq!(select_default_archs("ia32", Some("arm")).unwrap(), vec![I386, Arm]);
    }

    #[test]
    fn bad_tokens_fail_resolution() {
        assert!(matches!(
            select_default_archs("sparc", None),
            Err(SysrootError::Resolution { .. })
        ));
        assert!(matches!(
            select_default_archs("x64", Some("ppc")),
            Err(SysrootError::Resolution { .. })
        ));
    }

    /// Fails every fetch and records the order of attempts.
    struct RecordingStore {
        urls: RefCell<Vec<String>>,
    }

    impl Fetcher for RecordingStore {
        fn fetch(&self, url: &str, _dest: &Path) -> Result<u64, FetchError> {
            self.urls.borrow_mut().push(url.to_string());
            Err(FetchError::Http(503))
        }
    }

    #[test]
    fn unrecognized_host_runs_no_installer() {
        let store = RecordingStore {
            urls: RefCell::new(Vec::new()),
        };
        let root = tempfile::tempdir().unwrap();
        let installer = Installer::new(&store, InstallOptions::new(root.path()));
        let err = install_default_sysroots(&installer, "sparc", None, OnFailure::Continue)
            .unwrap_err();
        assert!(matches!(err, SysrootError::Resolution { .. }));
        assert!(store.urls.borrow().is_empty());
        assert!(std::fs::read_dir(root.path()).unwrap().next().is_none());
    }

    #[test]
    fn stop_policy_halts_after_host_failure() {
        let store = RecordingStore {
            urls: RefCell::new(Vec::new()),
        };
        let root = tempfile::tempdir().unwrap();
        let installer = Installer::new(&store, InstallOptions::new(root.path()));
        let report =
            install_default_sysroots(&installer, "x64", None, OnFailure::Stop).unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].0, Amd64);
        assert_eq!(store.urls.borrow().len(), 1);
        assert!(report.into_result().is_err());
    }

    #[test]
    fn continue_policy_attempts_every_arch_host_first() {
        let store = RecordingStore {
            urls: RefCell::new(Vec::new()),
        };
        let root = tempfile::tempdir().unwrap();
        let installer = Installer::new(&store, InstallOptions::new(root.path()));
        let report =
            install_default_sysroots(&installer, "x64", Some("arm"), OnFailure::Continue)
                .unwrap();
        let order: Vec<_> = report.results.iter().map(|(a, _)| *a).collect();
        assert_eq!(order, vec![Amd64, I386, Arm]);
        assert_eq!(report.failures().count(), 3);
        let urls = store.urls.borrow();
        assert!(urls[0].ends_with("debian_wheezy_amd64_sysroot.tgz"));
        assert!(urls[1].ends_with("debian_wheezy_i386_sysroot.tgz"));
        assert!(urls[2].ends_with("debian_wheezy_arm_sysroot.tgz"));
    }
}
