//! Projectile payloads and lifetime tracking.
//!
//! The host owns the moving, colliding projectile; the core only remembers
//! what each one carries and when it expires.

use crate::damage::DamageInfo;
use bio_core::{Delay, ProjectileId};
use bio_math::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Player bullet and skill shot lifetime
pub const PLAYER_PROJECTILE_LIFETIME: f32 = 3.0;
/// Enemy shot lifetime
pub const ENEMY_SHOT_LIFETIME: f32 = 5.0;
/// Fixed travel speed of enemy shots
pub const ENEMY_SHOT_SPEED: f32 = 8.0;

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Projectile type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Player auto-fire bullet, hits one enemy
    Bullet,
    /// Player skill shot, damages everything in its splash
    Skill,
    /// Ranged enemy shot aimed at the player
    EnemyShot,
}

impl ProjectileKind {
    /// Faction that fires this kind
    pub fn faction(self) -> Faction {
        match self {
            Self::Bullet | Self::Skill => Faction::Player,
            Self::EnemyShot => Faction::Enemy,
        }
    }

    /// Default lifetime
    pub fn lifetime(self) -> f32 {
        match self {
            Self::Bullet | Self::Skill => PLAYER_PROJECTILE_LIFETIME,
            Self::EnemyShot => ENEMY_SHOT_LIFETIME,
        }
    }
}

/// What a projectile does when it connects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectilePayload {
    /// Damage with its crit already rolled
    pub damage: DamageInfo,
    /// Splash radius (0 for single-target)
    pub splash_radius: f32,
}

impl ProjectilePayload {
    /// Single-target payload
    pub fn new(damage: DamageInfo) -> Self {
        Self {
            damage,
            splash_radius: 0.0,
        }
    }

    /// Set the splash radius
    pub fn with_splash(mut self, radius: f32) -> Self {
        self.splash_radius = radius.max(0.0);
        self
    }

    /// Whether every defender in a reported hit takes damage
    pub fn is_splash(&self) -> bool {
        self.splash_radius > 0.0
    }
}

/// Emission request handed to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpawn {
    pub kind: ProjectileKind,
    pub origin: Vec3,
    /// Unit direction on the ground plane
    pub direction: Vec3,
    pub speed: f32,
    pub lifetime: f32,
    pub payload: ProjectilePayload,
}

impl ProjectileSpawn {
    /// Create a spawn with the kind's default lifetime
    pub fn new(kind: ProjectileKind, origin: Vec3, direction: Vec3, speed: f32, payload: ProjectilePayload) -> Self {
        Self {
            kind,
            origin,
            direction: direction.normalize_or_zero(),
            speed: speed.max(0.0),
            lifetime: kind.lifetime(),
            payload,
        }
    }

    /// Faction that fired it
    pub fn faction(&self) -> Faction {
        self.kind.faction()
    }
}

/// A fired projectile waiting for a hit or expiry
#[derive(Debug, Clone)]
pub struct LiveProjectile {
    pub spawn: ProjectileSpawn,
    remaining: Delay,
}

impl LiveProjectile {
    /// Time left before it expires
    pub fn remaining(&self) -> f32 {
        self.remaining.remaining()
    }
}

/// Live projectiles by id
#[derive(Debug, Default)]
pub struct ProjectileTracker {
    live: HashMap<ProjectileId, LiveProjectile>,
}

impl ProjectileTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fired projectile
    pub fn fire(&mut self, id: ProjectileId, spawn: ProjectileSpawn) {
        let remaining = Delay::new(spawn.lifetime);
        self.live.insert(id, LiveProjectile { spawn, remaining });
    }

    /// Remove a projectile that hit something. Unknown or expired ids
    /// return `None`, so a late hit report is ignored.
    pub fn take(&mut self, id: ProjectileId) -> Option<ProjectileSpawn> {
        self.live.remove(&id).map(|p| p.spawn)
    }

    /// Look up a live projectile
    pub fn get(&self, id: ProjectileId) -> Option<&LiveProjectile> {
        self.live.get(&id)
    }

    /// Advance lifetimes; removes and returns the expired ids in id order
    pub fn tick(&mut self, dt: f32) -> Vec<ProjectileId> {
        let mut expired: Vec<ProjectileId> = self
            .live
            .iter_mut()
            .filter_map(|(id, p)| p.remaining.tick(dt).then_some(*id))
            .collect();
        expired.sort();
        for id in &expired {
            self.live.remove(id);
        }
        expired
    }

    /// Number of live projectiles
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether nothing is in flight
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.live.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(kind: ProjectileKind) -> ProjectileSpawn {
        ProjectileSpawn::new(
            kind,
            Vec3::ZERO,
            Vec3::new(3.0, 0.0, 4.0),
            10.0,
            ProjectilePayload::new(DamageInfo::new(10.0)),
        )
    }

    #[test]
    fn test_spawn_normalizes_direction() {
        let spawn = shot(ProjectileKind::Bullet);
        assert!((spawn.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(spawn.lifetime, 3.0);
        assert_eq!(shot(ProjectileKind::EnemyShot).lifetime, 5.0);
        assert_eq!(shot(ProjectileKind::EnemyShot).faction(), Faction::Enemy);
    }

    #[test]
    fn test_expiry() {
        let mut tracker = ProjectileTracker::new();
        tracker.fire(ProjectileId::from_raw(1), shot(ProjectileKind::Bullet));
        tracker.fire(ProjectileId::from_raw(2), shot(ProjectileKind::EnemyShot));

        assert!(tracker.tick(2.0).is_empty());
        assert_eq!(tracker.tick(1.0), vec![ProjectileId::from_raw(1)]);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.tick(2.0), vec![ProjectileId::from_raw(2)]);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_take_is_single_use() {
        let mut tracker = ProjectileTracker::new();
        let id = ProjectileId::from_raw(9);
        tracker.fire(id, shot(ProjectileKind::Skill));
        assert!(tracker.take(id).is_some());
        assert!(tracker.take(id).is_none());
    }

    #[test]
    fn test_splash_payload() {
        let payload = ProjectilePayload::new(DamageInfo::new(15.0)).with_splash(2.0);
        assert!(payload.is_splash());
        assert!(!ProjectilePayload::new(DamageInfo::new(1.0)).is_splash());
    }
}
