//! # Lucky Event System
//!
//! The plugin-facing API of a Lucky Barrel host: a typed event bus, the
//! [`SimplePlugin`] lifecycle, and the narrow contracts plugins use to reach
//! the host ([`PermissionRegistry`], [`World`], [`TickScheduler`]).
//!
//! ## Event Keys
//!
//! - **Core Events** (`core:*`): world and lifecycle events emitted by the host,
//!   e.g. `core:entity_built`
//!
//! ## Quick Start Example
//!
//! ```rust,no_run
//! use lucky_event_system::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let events = create_lucky_event_system();
//!     let scheduler = TickScheduler::new();
//!
//!     let deferred = scheduler.clone();
//!     events.on_core("entity_built", move |event: EntityBuiltEvent| {
//!         // Never touch the world mid-dispatch.
//!         deferred.next_tick(move || println!("next tick: {}", event.entity_id));
//!         Ok(())
//!     }).await?;
//!
//!     loop {
//!         scheduler.run_pending();
//!         tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
//!     }
//! }
//! ```

pub mod context;
pub mod events;
pub mod permissions;
pub mod plugin;
pub mod scheduler;
pub mod shutdown;
pub mod system;
pub mod types;
pub mod utils;
pub mod world;

pub use context::{LogLevel, ServerContext};
pub use events::{
    EntityBuiltEvent, Event, EventError, EventHandler, PluginLoadedEvent, PluginUnloadedEvent,
    TypedEventHandler,
};
pub use permissions::PermissionRegistry;
pub use plugin::{PluginError, SimplePlugin};
pub use scheduler::TickScheduler;
pub use shutdown::ShutdownState;
pub use system::EventSystem;
pub use types::*;
pub use utils::{create_lucky_event_system, current_timestamp};
pub use world::{DestroyMode, World};

// External dependencies that plugins commonly need
pub use async_trait::async_trait;
pub use std::sync::Arc;
pub use serde::{Deserialize, Serialize};
