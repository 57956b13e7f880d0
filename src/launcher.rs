//! The resolve -> locate -> delegate pipeline behind each wrapper binary.
//!
//! A single linear pass: detect the platform, resolve the versioned package
//! directory in the cache, find the binary, hand off. No retries and no
//! backtracking beyond the version fallback and the two-tier binary search.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use colored::*;
use log::info;

use crate::cache;
use crate::config::Config;
use crate::delegate;
use crate::error::{Result, ShimError};
use crate::locate;
use crate::platform::PlatformId;

/// A wrapped tool: its logical name plus the package version the wrapper pins.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    /// Logical tool name, also the binary filename searched for
    pub name: &'static str,
    /// Upstream package name as published, used in diagnostics
    pub package_name: &'static str,
    /// Pinned package version
    pub package_version: &'static str,
    /// One-line usage text for the zero-argument case
    pub usage: &'static str,
}

/// The IL assembler.
pub const ILASM: ToolSpec = ToolSpec {
    name: "ilasm",
    package_name: "Microsoft.NETCore.ILAsm",
    package_version: "10.0.0-rc.2.25502.107",
    usage: "Usage: ilasm <il-file> [ilasm switches]",
};

/// The IL disassembler.
pub const ILDASM: ToolSpec = ToolSpec {
    name: "ildasm",
    package_name: "Microsoft.NETCore.ILDAsm",
    package_version: "10.0.0-rc.2.25502.107",
    usage: "Usage: ildasm <assembly> [ildasm switches]",
};

/// Initialize env_logger to stderr. `RUST_LOG` wins over the config file's
/// log level; with neither set, logging stays off so the wrapper adds nothing
/// to the tool's own output.
pub fn init_logging(config: &Config) {
    let mut builder = env_logger::Builder::from_default_env();
    if env::var_os("RUST_LOG").is_none() {
        if let Some(level) = &config.log_level {
            builder.parse_filters(level);
        }
    }
    let _ = builder.try_init();
}

/// Launch a tool with the process environment: detected platform, configured
/// cache root, current working directory. Returns the child's exit code.
pub async fn launch(spec: &ToolSpec, config: &Config, args: &[OsString]) -> Result<i32> {
    let platform = PlatformId::current()?;
    let version = config.version_for(spec.name).unwrap_or(spec.package_version);
    let cache_root = configured_cache_root(config);
    let cwd = env::current_dir()?;
    run_with(spec, platform, &cache_root, version, args, &cwd).await
}

/// The pipeline itself, with every input explicit.
///
/// Emits the single version-fallback warning on stderr when the requested
/// version was substituted. Never writes to stdout.
pub async fn run_with(
    spec: &ToolSpec,
    platform: PlatformId,
    cache_root: &Path,
    version: &str,
    args: &[OsString],
    cwd: &Path,
) -> Result<i32> {
    let package_id = cache::package_id(spec.name, platform);
    let root = cache::resolve_search_root(cache_root, &package_id, version)?;
    if let Some(requested) = &root.fallback_from {
        eprintln!("Warning: Using version {} instead of {}", root.version, requested);
    }

    let location = locate::find_binary(&root.dir, platform, spec.name)?;
    info!(
        "resolved {} to {} (hosted: {})",
        spec.name,
        location.path().display(),
        location.is_hosted()
    );

    delegate::delegate(&location, args, cwd).await
}

/// Cache root precedence: `NUGET_PACKAGES`, then the config file, then
/// `<home>/.nuget/packages`.
fn configured_cache_root(config: &Config) -> PathBuf {
    match env::var_os(cache::CACHE_ENV_VAR) {
        Some(value) => PathBuf::from(value),
        None => config
            .cache_root
            .clone()
            .unwrap_or_else(cache::default_cache_root),
    }
}

/// Print a fatal resolution failure to stderr, with an install hint when the
/// package is missing entirely.
pub fn report_failure(spec: &ToolSpec, err: &ShimError) {
    eprintln!("{} {err}", "error:".red());
    if matches!(err, ShimError::PackageNotFound(_)) {
        if let Ok(platform) = PlatformId::current() {
            eprintln!(
                "Install it manually: dotnet add package runtime.{}.{} --version {}",
                platform.rid(),
                spec.package_name,
                spec.package_version
            );
        }
    }
}
