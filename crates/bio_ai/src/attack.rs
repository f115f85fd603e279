//! Archetype attack actions

use bio_combat::{
    outgoing_damage, DamageInfo, ProjectileKind, ProjectilePayload, ProjectileSpawn, ENEMY_SHOT_SPEED,
};
use bio_math::Vec3;
use bio_stats::{Archetype, StatBlock};
use rand::RngCore;

/// Distance from the shooter at which enemy shots appear
pub const ENEMY_MUZZLE_OFFSET: f32 = 1.0;

/// What an attack does
#[derive(Debug, Clone, PartialEq)]
pub enum AttackAction {
    /// Damage the target directly
    Strike(DamageInfo),
    /// Emit a projectile aimed at the target
    Shoot(ProjectileSpawn),
}

/// Archetype-specific attack
pub trait AttackBehavior: Send + Sync {
    /// Perform one attack from `origin` against a target at `target`
    fn perform(&self, attacker: &StatBlock, origin: Vec3, target: Vec3, rng: &mut dyn RngCore) -> AttackAction;
}

/// Close-range hit applied straight to the target
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectStrike;

impl AttackBehavior for DirectStrike {
    fn perform(&self, attacker: &StatBlock, _origin: Vec3, _target: Vec3, mut rng: &mut dyn RngCore) -> AttackAction {
        AttackAction::Strike(outgoing_damage(attacker, &mut rng))
    }
}

/// Single projectile at fixed speed
#[derive(Debug, Clone, Copy, Default)]
pub struct RangedShot;

impl AttackBehavior for RangedShot {
    fn perform(&self, attacker: &StatBlock, origin: Vec3, target: Vec3, mut rng: &mut dyn RngCore) -> AttackAction {
        let direction = (target - origin).normalize_or_zero();
        let direction = if direction.is_zero() { Vec3::Z } else { direction };
        AttackAction::Shoot(ProjectileSpawn::new(
            ProjectileKind::EnemyShot,
            origin + direction * ENEMY_MUZZLE_OFFSET,
            direction,
            ENEMY_SHOT_SPEED,
            ProjectilePayload::new(outgoing_damage(attacker, &mut rng)),
        ))
    }
}

static DIRECT_STRIKE: DirectStrike = DirectStrike;
static RANGED_SHOT: RangedShot = RangedShot;

/// Attack behavior for an archetype
pub fn behavior_for(archetype: Archetype) -> &'static dyn AttackBehavior {
    match archetype {
        Archetype::Melee | Archetype::Tank => &DIRECT_STRIKE,
        Archetype::Ranged => &RANGED_SHOT,
    }
}
