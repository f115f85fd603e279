//! BioTerror Combat - Damage, Projectiles and Weapons
//!
//! This crate resolves every hit in the simulation.
//!
//! # Features
//!
//! - Armor mitigation with penetration and a one-damage floor
//! - Critical hits rolled by the attacker before resolution
//! - Projectile payloads with lifetimes, tracked until hit or expiry
//! - The player's timer-driven bullet fans and skill rings
//!
//! # Example
//!
//! ```ignore
//! use bio_combat::prelude::*;
//!
//! let mut defender = StatBlock::new(50).with_armor(5.0);
//! let hit = resolve_hit(20.0, 0.0, &mut defender);
//! assert_eq!(hit.final_damage, 15);
//! assert_eq!(defender.current_health(), 35);
//! ```

pub mod damage;
pub mod projectile;
pub mod resolver;
pub mod weapon;

pub mod prelude {
    pub use crate::damage::{outgoing_damage, roll_critical, DamageInfo};
    pub use crate::projectile::{
        Faction, LiveProjectile, ProjectileKind, ProjectilePayload, ProjectileSpawn,
        ProjectileTracker, ENEMY_SHOT_LIFETIME, ENEMY_SHOT_SPEED, PLAYER_PROJECTILE_LIFETIME,
    };
    pub use crate::resolver::{mitigated_damage, resolve, resolve_hit, HitResult};
    pub use crate::weapon::{
        bullet_fan, resolve_aim, skill_ring, AimMode, Volleys, WeaponRig, MUZZLE_OFFSET,
    };
}

pub use prelude::*;
