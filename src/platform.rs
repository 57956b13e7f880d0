//! Host platform identification.
//!
//! Maps the host {OS, architecture} pair onto the fixed table of runtime
//! identifiers used by platform-specific NuGet packages. Detection happens
//! once per process; unsupported combinations fail construction outright.

use std::env;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{Result, ShimError};

/// Runtime identifier for a supported {OS, architecture} pair.
///
/// The variants are the closed set of platforms the upstream tool packages
/// are published for. There is no representation for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformId {
    WinX64,
    WinX86,
    WinArm,
    WinArm64,
    LinuxX64,
    LinuxArm64,
    OsxX64,
    OsxArm64,
}

static CURRENT: OnceLock<Option<PlatformId>> = OnceLock::new();

impl PlatformId {
    /// Look up the platform for an {OS, architecture} pair.
    ///
    /// Tokens follow `std::env::consts::OS` and `std::env::consts::ARCH`.
    /// Returns `None` for any pair outside the supported table.
    pub fn from_os_arch(os: &str, arch: &str) -> Option<PlatformId> {
        match (os, arch) {
            ("windows", "x86_64") => Some(PlatformId::WinX64),
            ("windows", "x86") => Some(PlatformId::WinX86),
            ("windows", "arm") => Some(PlatformId::WinArm),
            ("windows", "aarch64") => Some(PlatformId::WinArm64),
            ("linux", "x86_64") => Some(PlatformId::LinuxX64),
            ("linux", "aarch64") => Some(PlatformId::LinuxArm64),
            ("macos", "x86_64") => Some(PlatformId::OsxX64),
            ("macos", "aarch64") => Some(PlatformId::OsxArm64),
            _ => None,
        }
    }

    /// Platform of the running process.
    ///
    /// Detected once and cached for the process lifetime. Fails with
    /// `UnsupportedPlatform` when the host pair has no mapping; callers must
    /// treat that as fatal.
    pub fn current() -> Result<PlatformId> {
        let detected = *CURRENT.get_or_init(|| Self::from_os_arch(env::consts::OS, env::consts::ARCH));
        detected.ok_or_else(|| {
            ShimError::UnsupportedPlatform(format!("{}-{}", env::consts::OS, env::consts::ARCH))
        })
    }

    /// The runtime identifier token, e.g. "linux-arm64".
    pub fn rid(&self) -> &'static str {
        match self {
            PlatformId::WinX64 => "win-x64",
            PlatformId::WinX86 => "win-x86",
            PlatformId::WinArm => "win-arm",
            PlatformId::WinArm64 => "win-arm64",
            PlatformId::LinuxX64 => "linux-x64",
            PlatformId::LinuxArm64 => "linux-arm64",
            PlatformId::OsxX64 => "osx-x64",
            PlatformId::OsxArm64 => "osx-arm64",
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rid())
    }
}
