//! Architecture resolution.
//!
//! Raw tokens come from two collaborators: host platform detection and the
//! build configuration's declared `target_arch`. Both are mapped through
//! fixed tables onto [`CanonicalArch`]; an unknown token is an error, never a
//! silent default.

use std::fmt;
use std::str::FromStr;

use crate::error::{SysrootError, TokenSource};

/// Normalized architecture identifier used by the catalog and installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalArch {
    Amd64,
    I386,
    Arm,
    Mips,
    /// Recognized as a declared target but never installable.
    Arm64,
}

impl CanonicalArch {
    /// Architectures that have a sysroot image, in `--arch` listing order.
    pub const INSTALLABLE: [CanonicalArch; 4] = [
        CanonicalArch::Arm,
        CanonicalArch::I386,
        CanonicalArch::Amd64,
        CanonicalArch::Mips,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalArch::Amd64 => "amd64",
            CanonicalArch::I386 => "i386",
            CanonicalArch::Arm => "arm",
            CanonicalArch::Mips => "mips",
            CanonicalArch::Arm64 => "arm64",
        }
    }

    pub fn is_installable(self) -> bool {
        !matches!(self, CanonicalArch::Arm64)
    }
}

impl fmt::Display for CanonicalArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses canonical names (`amd64`, `i386`, `arm`, `mips`, `arm64`).
impl FromStr for CanonicalArch {
    type Err = SysrootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amd64" => Ok(CanonicalArch::Amd64),
            "i386" => Ok(CanonicalArch::I386),
            "arm" => Ok(CanonicalArch::Arm),
            "mips" => Ok(CanonicalArch::Mips),
            "arm64" => Ok(CanonicalArch::Arm64),
            other => Err(SysrootError::Usage(format!(
                "invalid architecture '{}' (choose from {})",
                other,
                installable_names()
            ))),
        }
    }
}

/// Comma-separated list of installable arch names, for help and usage text.
pub fn installable_names() -> String {
    CanonicalArch::INSTALLABLE
        .iter()
        .map(|a| a.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

const HOST_TOKENS: &[(&str, CanonicalArch)] = &[
    ("x64", CanonicalArch::Amd64),
    ("ia32", CanonicalArch::I386),
    ("arm", CanonicalArch::Arm),
    ("mips", CanonicalArch::Mips),
];

const TARGET_TOKENS: &[(&str, CanonicalArch)] = &[
    ("x64", CanonicalArch::Amd64),
    ("ia32", CanonicalArch::I386),
    ("arm", CanonicalArch::Arm),
    ("arm64", CanonicalArch::Arm64),
    ("mipsel", CanonicalArch::Mips),
];

fn lookup(table: &[(&str, CanonicalArch)], token: &str) -> Option<CanonicalArch> {
    table
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, arch)| *arch)
}

/// Maps a host token (`x64`, `ia32`, `arm`, `mips`) to its canonical arch.
pub fn resolve_host_arch(token: &str) -> Result<CanonicalArch, SysrootError> {
    lookup(HOST_TOKENS, token).ok_or_else(|| SysrootError::Resolution {
        origin: TokenSource::Host,
        token: token.to_string(),
    })
}

/// Maps an optional declared `target_arch` token.
///
/// `None` or an empty token means no cross-compile target was declared.
pub fn resolve_target_arch(token: Option<&str>) -> Result<Option<CanonicalArch>, SysrootError> {
    match token {
        None | Some("") => Ok(None),
        Some(t) => lookup(TARGET_TOKENS, t)
            .map(Some)
            .ok_or_else(|| SysrootError::Resolution {
                origin: TokenSource::Target,
                token: t.to_string(),
            }),
    }
}

/// Default host collaborator: the raw token for the machine this binary runs on.
pub fn detect_host_arch_token() -> String {
    host_token_for_machine(std::env::consts::ARCH).to_string()
}

/// Normalizes a `uname -m` style machine name into a host token.
/// Unknown machines pass through unchanged so resolution can report them.
pub fn host_token_for_machine(machine: &str) -> &str {
    match machine {
        "x86_64" | "amd64" => "x64",
        "x86" | "i86pc" => "ia32",
        m if is_ix86(m) => "ia32",
        m if m.starts_with("aarch64") => "arm64",
        m if m.starts_with("arm") => "arm",
        m if m.starts_with("mips") => "mips",
        other => other,
    }
}

fn is_ix86(machine: &str) -> bool {
    let b = machine.as_bytes();
    b.len() == 4 && b[0] == b'i' && b[1].is_ascii_digit() && &b[2..] == b"86"
}
