//! BioTerror Stats - Stat Blocks and Archetypes
//!
//! Numeric attributes for every actor in the simulation.
//!
//! # Features
//!
//! - `StatBlock` shared by player and enemies: health, armor, damage, range,
//!   cooldown, crit and penetration, currency drop
//! - `PlayerStats` with the player-only sheet (bullets, skill, regen),
//!   a stored baseline and `reset()`
//! - `StatId` typed dispatch for upgrades, resolved from names at load time
//! - Enemy archetype templates (Melee, Ranged, Tank)
//!
//! # Example
//!
//! ```ignore
//! use bio_stats::prelude::*;
//!
//! let mut player = PlayerStats::new(PlayerSheet::default());
//! let stat: StatId = "bulletDamage".parse()?;
//! player.apply_delta(stat, 10.0, true); // +10 %
//! player.reset(); // back to baseline, full health
//! ```

pub mod archetype;
pub mod player;
pub mod stat_block;
pub mod stat_id;

pub mod prelude {
    pub use crate::archetype::{Archetype, ArchetypeParseError, ArchetypeTable, ArchetypeTemplate};
    pub use crate::player::{PlayerSheet, PlayerStats};
    pub use crate::stat_block::StatBlock;
    pub use crate::stat_id::{StatId, StatKind, StatParseError, StatValue};
}

pub use prelude::*;
