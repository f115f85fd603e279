//! BioTerror AI - Enemy Behavior
//!
//! Each enemy carries an `EnemyBrain` that the session ticks once per
//! simulation step.
//!
//! # Features
//!
//! - Spawning / Idle / Walking / Attacking / Dead state machine
//! - Distance and cooldown driven transitions
//! - Per-archetype attack actions (direct strike or projectile)
//!
//! # Example
//!
//! ```ignore
//! use bio_ai::prelude::*;
//!
//! let mut brain = EnemyBrain::new();
//! let ctx = BrainContext::new(now, position).with_target(player_position);
//! let output = brain.tick(&ctx, &stats, dt);
//! if output.attack {
//!     let action = behavior_for(archetype).perform(&stats, position, player_position, &mut rng);
//! }
//! ```

pub mod attack;
pub mod brain;
pub mod state;

pub mod prelude {
    pub use crate::attack::{behavior_for, AttackAction, AttackBehavior, DirectStrike, RangedShot};
    pub use crate::brain::{BrainContext, BrainOutput, EnemyBrain, Movement, SPAWN_DURATION};
    pub use crate::state::AiState;
}

pub use prelude::*;
