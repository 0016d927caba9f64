//! # Lucky Barrel Host
//!
//! A small in-process game host: it loads plugins, emits world events when
//! players place objects, and runs deferred plugin work once per tick over an
//! in-memory world.
//!
//! ## Configuration
//!
//! The host reads `lucky_host.toml` (created with defaults when missing):
//!
//! ```toml
//! [server]
//! tick_interval_ms = 50
//!
//! [plugins]
//! config_directory = "config"
//!
//! [logging]
//! level = "info"
//! json_format = false
//! ```
//!
//! Plugins store their own files under `plugins.config_directory`.

mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod permissions;
pub mod signals;
pub mod world;

pub use app::{init, Application};
pub use cli::CliArgs;
pub use config::{HostConfig, LoggingSettings, PluginSettings, ServerSettings};
pub use error::HostError;
pub use host::{GameHost, HostContext};
pub use permissions::MemoryPermissions;
pub use world::{MemoryWorld, WorldEntity};
