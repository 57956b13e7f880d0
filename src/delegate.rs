//! Transparent process delegation.
//!
//! Re-executes a located tool binary with the caller's arguments, relaying
//! both output streams byte-for-byte and returning the child's exit code.
//! Arguments are passed through as an opaque sequence; nothing is parsed,
//! quoted, or reordered. The call blocks until the child terminates - there
//! is no timeout and no cancellation.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use log::debug;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::Command;

use crate::error::{Result, ShimError};
use crate::locate::ToolLocation;

/// Secondary runtime host used to launch managed modules.
pub const HOST_PROGRAM: &str = "dotnet";

/// Program and argument list for a delegated launch.
///
/// Hosted modules run through `dotnet` with the module path as the first
/// argument; native binaries are the program themselves. The caller's
/// arguments follow verbatim in both cases.
fn spawn_spec(location: &ToolLocation, args: &[OsString]) -> (OsString, Vec<OsString>) {
    let (program, mut argv) = match location {
        ToolLocation::Hosted(path) => (
            OsString::from(HOST_PROGRAM),
            vec![path.clone().into_os_string()],
        ),
        ToolLocation::Native(path) => (path.clone().into_os_string(), Vec::new()),
    };
    argv.extend(args.iter().cloned());
    (program, argv)
}

/// Run the located binary and relay its output to the parent's stdout/stderr.
///
/// Returns the child's exit code. A child killed by a signal (no exit code)
/// maps to 1.
pub async fn delegate(location: &ToolLocation, args: &[OsString], cwd: &Path) -> Result<i32> {
    delegate_with(
        location,
        args,
        cwd,
        &mut tokio::io::stdout(),
        &mut tokio::io::stderr(),
    )
    .await
}

/// Like [`delegate`], but copies the child's streams into caller-supplied
/// sinks. Both copies run concurrently with each other and complete before
/// the exit code is read, so a child filling either pipe cannot deadlock the
/// parent and no trailing output is truncated.
pub async fn delegate_with<O, E>(
    location: &ToolLocation,
    args: &[OsString],
    cwd: &Path,
    stdout_sink: &mut O,
    stderr_sink: &mut E,
) -> Result<i32>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let (program, argv) = spawn_spec(location, args);
    debug!("delegating to {program:?} with {} args", argv.len());

    let mut child = Command::new(&program)
        .args(&argv)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ShimError::LaunchFailed {
            program: program.to_string_lossy().into_owned(),
            source,
        })?;

    // Stdio::piped guarantees both handles exist on a freshly spawned child.
    let mut child_out = child.stdout.take().ok_or_else(|| {
        ShimError::LaunchFailed {
            program: program.to_string_lossy().into_owned(),
            source: std::io::Error::other("child stdout not captured"),
        }
    })?;
    let mut child_err = child.stderr.take().ok_or_else(|| {
        ShimError::LaunchFailed {
            program: program.to_string_lossy().into_owned(),
            source: std::io::Error::other("child stderr not captured"),
        }
    })?;

    let (copied_out, copied_err) = tokio::try_join!(
        tokio::io::copy(&mut child_out, stdout_sink),
        tokio::io::copy(&mut child_err, stderr_sink),
    )?;
    stdout_sink.flush().await?;
    stderr_sink.flush().await?;

    let status = child.wait().await?;
    debug!("child exited with {status}, relayed {copied_out}b out / {copied_err}b err");
    Ok(status.code().unwrap_or(1))
}
