//! BioTerror Simulation - Session Wiring
//!
//! The engine-independent core of the shooter: one `Session` owns the
//! player, the live enemies, the wave director and the shop, and advances
//! them with `tick`. The host (renderer, physics, input) reads the world
//! back through `SimEvent`s and answers queries through `WorldView`.
//!
//! # Features
//!
//! - Single-threaded, tick-driven simulation with a logical clock
//! - Typed event channel towards the host
//! - TOML configuration with environment overrides
//! - Headless arena for scripted runs and tests
//!
//! # Example
//!
//! ```ignore
//! use bio_sim::prelude::*;
//!
//! let mut session = Session::new(SimConfig::default())?;
//! loop {
//!     let outcome = session.tick(dt, &world);
//!     for event in session.drain_events() {
//!         host.apply(event);
//!     }
//!     if outcome.is_finished() {
//!         break;
//!     }
//! }
//! ```

pub mod config;
pub mod events;
pub mod headless;
pub mod session;
pub mod world;

pub mod prelude {
    pub use crate::config::{ConfigError, SimConfig};
    pub use crate::events::{EventChannel, SimEvent};
    pub use crate::headless::{run_headless, Arena, RunSummary};
    pub use crate::session::{Outcome, RunStats, Session};
    pub use crate::world::WorldView;
}

pub use prelude::*;
