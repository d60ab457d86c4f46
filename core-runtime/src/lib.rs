//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the drive client:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the provider crates depend
//! on. It establishes the logging conventions and the validated configuration
//! (transport, page size, timeouts) every connection is built from.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{Error, Result};
