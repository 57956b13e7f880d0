//! Two-tier binary search inside a resolved package directory.
//!
//! Checks the conventional `runtimes/<rid>/native/` subpath first, then falls
//! back to an exhaustive recursive search. The fallback is O(tree size) but
//! only runs when the conventional layout is absent, which tolerates packaging
//! drift across the platform-specific distributions.

use std::path::{Path, PathBuf};

use glob::Pattern;
use log::debug;

use crate::error::{Result, ShimError};
use crate::platform::PlatformId;

/// Where a tool binary was found and how it must be launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolLocation {
    /// Native executable, invoked directly
    Native(PathBuf),
    /// Managed module, launched through the dotnet host
    Hosted(PathBuf),
}

impl ToolLocation {
    /// Path to the binary itself, regardless of launch mode.
    pub fn path(&self) -> &Path {
        match self {
            ToolLocation::Native(path) | ToolLocation::Hosted(path) => path,
        }
    }

    /// Whether launching requires the secondary runtime host.
    pub fn is_hosted(&self) -> bool {
        matches!(self, ToolLocation::Hosted(_))
    }
}

/// Locate a tool binary under a resolved package directory.
///
/// Tier 1 checks `root/runtimes/<rid>/native/<tool>.exe` and the bare
/// `<tool>` at the same conventional subpath. Tier 2 searches the whole tree
/// for `<tool>.exe`, then `<tool>.dll`, then bare `<tool>`, taking the first
/// match per tier in sorted path order so results are stable. A `.dll` match
/// must be run through the dotnet host; anything else runs directly.
pub fn find_binary(root: &Path, platform: PlatformId, tool: &str) -> Result<ToolLocation> {
    let native_dir = root
        .join("runtimes")
        .join(platform.rid())
        .join("native");

    for name in [format!("{tool}.exe"), tool.to_string()] {
        let candidate = native_dir.join(&name);
        if candidate.is_file() {
            debug!("found {tool} at conventional path {}", candidate.display());
            return Ok(ToolLocation::Native(candidate));
        }
    }

    debug!("conventional path missed, searching {} recursively", root.display());
    for name in [format!("{tool}.exe"), format!("{tool}.dll"), tool.to_string()] {
        if let Some(found) = search_tree(root, &name)? {
            return Ok(classify(found));
        }
    }

    Err(ShimError::BinaryNotFound {
        tool: tool.to_string(),
        root: root.to_path_buf(),
    })
}

/// First file named `name` anywhere under `root`, in glob's sorted order.
fn search_tree(root: &Path, name: &str) -> Result<Option<PathBuf>> {
    let pattern = format!("{}/**/{}", Pattern::escape(&root.display().to_string()), name);
    let matches = glob::glob(&pattern)
        .map_err(|e| ShimError::Config(format!("bad search pattern '{pattern}': {e}")))?;

    Ok(matches
        .filter_map(|entry| entry.ok())
        .find(|path| path.is_file()))
}

fn classify(path: PathBuf) -> ToolLocation {
    let is_dll = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dll"));
    if is_dll {
        ToolLocation::Hosted(path)
    } else {
        ToolLocation::Native(path)
    }
}
