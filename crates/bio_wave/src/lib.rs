//! BioTerror Waves - Spawning and Progression
//!
//! The `WaveDirector` walks through the configured waves: it spawns each
//! wave's cohort as a staggered sequence, counts live enemies down as they
//! die and decides what follows a cleared wave.
//!
//! # Features
//!
//! - Data-driven waves of `(archetype, count)` entries with spawn-point pools
//! - Spawn-point validation with a bounded retry budget
//! - Exactly-once wave completion, shop breaks every N waves
//! - Non-fatal handling of bad wave data (logged and skipped)
//!
//! # Example
//!
//! ```ignore
//! use bio_wave::prelude::*;
//!
//! let mut director = WaveDirector::new(waves, DirectorConfig::default());
//! director.start()?;
//! director.tick(dt, &mut spawner, &probe, &mut rng);
//! for event in director.drain_events() {
//!     // WaveStarted, WaveCleared, ShopOpened, ...
//! }
//! ```

pub mod director;
pub mod probe;
pub mod wave;

pub mod prelude {
    pub use crate::director::{
        DirectorConfig, DirectorEvent, DirectorState, Spawner, WaveDirector, WaveError,
    };
    pub use crate::probe::{pick_spawn_point, GroundProbe, OpenGround};
    pub use crate::wave::{SpawnEntry, WaveSpec};
}

pub use prelude::*;
