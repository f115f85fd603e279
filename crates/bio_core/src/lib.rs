//! # bio_core - Simulation Core Primitives
//!
//! Small building blocks shared by every simulation crate:
//! - **Ids**: opaque handles for actors and projectiles
//! - **Clock**: the single logical time source advanced by the scheduler
//! - **Timers**: repeating intervals, one-shot delays and cooldowns
//!
//! Everything advances by explicit `tick(dt)` calls from one logic thread;
//! nothing here sleeps or spawns.

pub mod id;
pub mod timer;

pub use id::*;
pub use timer::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::id::{ActorId, IdGenerator, ProjectileId};
    pub use crate::timer::{Cooldown, Delay, SimClock, Timer};
}
