//! NuGet package cache resolution.
//!
//! Builds package identifiers for platform-specific tool distributions and
//! resolves the versioned directory to search for a binary. Resolution is a
//! read-only filesystem query: nothing here installs, downloads, or writes.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Result, ShimError};
use crate::platform::PlatformId;

/// Environment variable that overrides the cache location, matching NuGet's
/// own convention.
pub const CACHE_ENV_VAR: &str = "NUGET_PACKAGES";

/// Resolved package directory for one tool version.
///
/// Immutable once returned. `fallback_from` is set when the requested version
/// was absent and the newest installed version was substituted; callers use it
/// to emit exactly one warning on the diagnostic stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoot {
    /// Directory to search for the tool binary
    pub dir: PathBuf,
    /// Version actually selected
    pub version: String,
    /// Requested version, when it was not the one selected
    pub fallback_from: Option<String>,
}

/// Root of the local package cache: `$NUGET_PACKAGES` if set, otherwise
/// the default location.
pub fn cache_root() -> PathBuf {
    env::var_os(CACHE_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(default_cache_root)
}

/// NuGet's default cache location, `<home>/.nuget/packages`.
pub fn default_cache_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nuget")
        .join("packages")
}

/// Package identifier for a tool's platform-specific distribution,
/// e.g. `runtime.linux-x64.microsoft.netcore.ilasm`.
///
/// NuGet stores cache directories lowercased.
pub fn package_id(tool: &str, platform: PlatformId) -> String {
    format!("runtime.{}.microsoft.netcore.{}", platform.rid(), tool.to_lowercase())
}

/// Resolve the directory to search for a tool binary.
///
/// Prefers `cache_root/package_id/requested`. When that directory is missing,
/// falls back to the newest installed sibling version (descending
/// lexicographic order over directory names, the same ordering NuGet restore
/// leaves behind for these pinned packages). Fails with `PackageNotFound`
/// when no version is installed at all.
pub fn resolve_search_root(
    cache_root: &Path,
    package_id: &str,
    requested: &str,
) -> Result<SearchRoot> {
    let exact = cache_root.join(package_id).join(requested);
    if exact.is_dir() {
        debug!("found requested version {requested} at {}", exact.display());
        return Ok(SearchRoot {
            dir: exact,
            version: requested.to_string(),
            fallback_from: None,
        });
    }

    let package_dir = cache_root.join(package_id);
    if let Some(newest) = newest_version(&package_dir)? {
        warn!("requested version {requested} not installed, using {newest}");
        return Ok(SearchRoot {
            dir: package_dir.join(&newest),
            version: newest,
            fallback_from: Some(requested.to_string()),
        });
    }

    Err(ShimError::PackageNotFound(exact))
}

/// Newest installed version under a package directory, or `None` when the
/// directory is missing or empty.
fn newest_version(package_dir: &Path) -> Result<Option<String>> {
    if !package_dir.is_dir() {
        return Ok(None);
    }

    let mut versions: Vec<String> = fs::read_dir(package_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();

    versions.sort();
    Ok(versions.pop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PKG: &str = "runtime.linux-x64.microsoft.netcore.ilasm";

    fn cache_with_versions(versions: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for version in versions {
            fs::create_dir_all(temp.path().join(PKG).join(version)).unwrap();
        }
        temp
    }

    #[test]
    fn test_package_id_format() {
        assert_eq!(
            package_id("ilasm", PlatformId::LinuxX64),
            "runtime.linux-x64.microsoft.netcore.ilasm"
        );
        assert_eq!(
            package_id("ILDAsm", PlatformId::WinArm64),
            "runtime.win-arm64.microsoft.netcore.ildasm"
        );
    }

    #[test]
    fn test_exact_version_selected() {
        let cache = cache_with_versions(&["9.0.0", "10.0.0"]);
        let root = resolve_search_root(cache.path(), PKG, "10.0.0").unwrap();
        assert_eq!(root.dir, cache.path().join(PKG).join("10.0.0"));
        assert_eq!(root.version, "10.0.0");
        assert!(root.fallback_from.is_none());
    }

    #[test]
    fn test_fallback_to_only_installed_version() {
        let cache = cache_with_versions(&["9.0.0"]);
        let root = resolve_search_root(cache.path(), PKG, "10.0.0").unwrap();
        assert_eq!(root.dir, cache.path().join(PKG).join("9.0.0"));
        assert_eq!(root.version, "9.0.0");
        // Exactly one substitution recorded, so exactly one warning is emitted.
        assert_eq!(root.fallback_from.as_deref(), Some("10.0.0"));
    }

    #[test]
    fn test_fallback_picks_newest() {
        let cache = cache_with_versions(&["8.0.1", "9.0.0", "9.0.2"]);
        let root = resolve_search_root(cache.path(), PKG, "10.0.0").unwrap();
        assert_eq!(root.version, "9.0.2");
        assert_eq!(root.fallback_from.as_deref(), Some("10.0.0"));
    }

    #[test]
    fn test_no_versions_is_package_not_found() {
        let cache = TempDir::new().unwrap();
        let err = resolve_search_root(cache.path(), PKG, "10.0.0").unwrap_err();
        match err {
            ShimError::PackageNotFound(path) => {
                assert_eq!(path, cache.path().join(PKG).join("10.0.0"));
            }
            other => panic!("expected PackageNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_package_dir_is_package_not_found() {
        let cache = TempDir::new().unwrap();
        fs::create_dir_all(cache.path().join(PKG)).unwrap();
        let err = resolve_search_root(cache.path(), PKG, "10.0.0").unwrap_err();
        assert!(matches!(err, ShimError::PackageNotFound(_)));
    }

    #[test]
    fn test_stray_files_are_not_versions() {
        let cache = cache_with_versions(&["9.0.0"]);
        fs::write(cache.path().join(PKG).join("zz-not-a-dir"), b"").unwrap();
        let root = resolve_search_root(cache.path(), PKG, "10.0.0").unwrap();
        assert_eq!(root.version, "9.0.0");
    }

    #[test]
    fn test_resolution_writes_nothing() {
        let cache = TempDir::new().unwrap();
        let _ = resolve_search_root(cache.path(), PKG, "10.0.0");
        assert_eq!(fs::read_dir(cache.path()).unwrap().count(), 0);
    }
}
