//! shimr - transparent launchers for platform-specific .NET tools
//!
//! Resolves the host platform, locates a tool's native binary inside the
//! local NuGet package cache, and re-executes it with the caller's arguments,
//! relaying output streams and exit code so the wrapper is indistinguishable
//! from the tool itself.

pub mod cache;
pub mod config;
pub mod delegate;
pub mod error;
pub mod launcher;
pub mod locate;
pub mod platform;

pub use error::{Result, ShimError};
