//! Workspace facade crate.
//!
//! Re-exports the OneDrive client core and the runtime configuration so host
//! applications can depend on `onedrive-workspace` alone. The `desktop-shims`
//! feature (on by default) lets [`CoreConfig`] fall back to the reqwest-backed
//! HTTP client when none is injected.

pub use core_runtime::logging;
pub use core_runtime::{CoreConfig, CoreConfigBuilder};
pub use provider_onedrive::*;
