//! Static catalog of installable sysroot images.
//!
//! One entry per installable [`CanonicalArch`]. Fields are `Cow<'static, str>`
//! so the built-in table is a `const` while callers can still swap in entries
//! (e.g. a mirror with its own revisions).

use std::borrow::Cow;

use crate::arch::CanonicalArch;
use crate::error::SysrootError;

/// Path under the URL prefix where sysroot revisions live.
pub const URL_PATH: &str = "chrome-linux-sysroot/toolchain";

const REVISION: &str = "81463d905d9f7aa0153bae9f703728632ce8b0f6";

/// Metadata for one installable sysroot tarball.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Path segment(s) between the URL prefix and the revision.
    pub path: Cow<'static, str>,
    /// Opaque revision token; part of the URL, so bumping it invalidates stamps.
    pub revision: Cow<'static, str>,
    pub tarball: Cow<'static, str>,
    /// Expected SHA-1 of the tarball, hex.
    pub sha1sum: Cow<'static, str>,
    /// Directory name under the install root.
    pub sysroot_dir: Cow<'static, str>,
}

impl CatalogEntry {
    const fn wheezy(tarball: &'static str, sha1sum: &'static str, sysroot_dir: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(URL_PATH),
            revision: Cow::Borrowed(REVISION),
            tarball: Cow::Borrowed(tarball),
            sha1sum: Cow::Borrowed(sha1sum),
            sysroot_dir: Cow::Borrowed(sysroot_dir),
        }
    }

    /// Remote URL: `<prefix>/<path>/<revision>/<tarball>`.
    pub fn url(&self, url_prefix: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            url_prefix.trim_end_matches('/'),
            self.path.trim_matches('/'),
            self.revision,
            self.tarball
        )
    }
}

/// Table of entries indexed by installable architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    amd64: CatalogEntry,
    i386: CatalogEntry,
    arm: CatalogEntry,
    mips: CatalogEntry,
}

/// Debian Wheezy images.
pub const WHEEZY: Catalog = Catalog {
    amd64: CatalogEntry::wheezy(
        "debian_wheezy_amd64_sysroot.tgz",
        "a5a2483123f6bd63f3f029996451426168606697",
        "debian_wheezy_amd64-sysroot",
    ),
    i386: CatalogEntry::wheezy(
        "debian_wheezy_i386_sysroot.tgz",
        "bc8d70311edcbdce8f70af779333dc35ca139777",
        "debian_wheezy_i386-sysroot",
    ),
    arm: CatalogEntry::wheezy(
        "debian_wheezy_arm_sysroot.tgz",
        "fd70dfa1bde44142b17e5b400be3b9ce6625bf2e",
        "debian_wheezy_arm-sysroot",
    ),
    mips: CatalogEntry::wheezy(
        "debian_wheezy_mips_sysroot.tgz",
        "ac60722b79bce906768911192329607393090c4a",
        "debian_wheezy_mips-sysroot",
    ),
};

impl Default for Catalog {
    fn default() -> Self {
        WHEEZY
    }
}

impl Catalog {
    /// Entry for `arch`; `Arm64` has none.
    pub fn lookup(&self, arch: CanonicalArch) -> Result<&CatalogEntry, SysrootError> {
        match arch {
            CanonicalArch::Amd64 => Ok(&self.amd64),
            CanonicalArch::I386 => Ok(&self.i386),
            CanonicalArch::Arm => Ok(&self.arm),
            CanonicalArch::Mips => Ok(&self.mips),
            CanonicalArch::Arm64 => Err(SysrootError::UnsupportedArchitecture(arch)),
        }
    }

    /// Replaces the entry for `arch`.
    pub fn with_entry(mut self, arch: CanonicalArch, entry: CatalogEntry) -> Result<Self, SysrootError> {
        let slot = match arch {
            CanonicalArch::Amd64 => &mut self.amd64,
            CanonicalArch::I386 => &mut self.i386,
            CanonicalArch::Arm => &mut self.arm,
            CanonicalArch::Mips => &mut self.mips,
            CanonicalArch::Arm64 => return Err(SysrootError::UnsupportedArchitecture(arch)),
        };
        *slot = entry;
        Ok(self)
    }
}

/// Looks `arch` up in the built-in catalog.
pub fn lookup(arch: CanonicalArch) -> Result<&'static CatalogEntry, SysrootError> {
    static BUILTIN: Catalog = WHEEZY;
    BUILTIN.lookup(arch)
}
