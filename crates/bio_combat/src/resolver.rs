//! Hit resolution against a defender's stat block

use crate::damage::DamageInfo;
use bio_stats::StatBlock;
use serde::{Deserialize, Serialize};

/// Outcome of one resolved hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitResult {
    /// Health removed (always at least 1 before clamping at zero health)
    pub final_damage: i32,
    /// Defender health after the hit
    pub remaining_health: i32,
    /// Whether the defender's health reached zero
    pub defender_died: bool,
}

/// Damage after armor.
///
/// `effective_armor = max(0, armor - penetration)` and the result is
/// `max(1, damage - floor(effective_armor))`. Damage is truncated to an
/// integer first; negative inputs are clamped to zero.
pub fn mitigated_damage(damage: f32, armor_penetration: f32, armor: f32) -> i32 {
    let damage = damage.max(0.0).trunc() as i32;
    let effective_armor = (armor.max(0.0) - armor_penetration.max(0.0)).max(0.0);
    (damage - effective_armor.floor() as i32).max(1)
}

/// Apply a hit to `defender`.
///
/// The resolver never removes the defender; it only reports death for the
/// owner to act on.
pub fn resolve_hit(attacker_damage: f32, armor_penetration: f32, defender: &mut StatBlock) -> HitResult {
    let final_damage = mitigated_damage(attacker_damage, armor_penetration, defender.armor);
    defender.take_damage(final_damage);
    let remaining_health = defender.current_health();
    log::debug!(
        "Hit for {} damage (armor {}, penetration {}). Health: {}/{}",
        final_damage,
        defender.armor,
        armor_penetration,
        remaining_health,
        defender.max_health
    );
    HitResult {
        final_damage,
        remaining_health,
        defender_died: defender.is_depleted(),
    }
}

/// Apply a `DamageInfo` (crit already rolled) to `defender`
pub fn resolve(damage: &DamageInfo, defender: &mut StatBlock) -> HitResult {
    resolve_hit(damage.final_amount(), damage.armor_penetration, defender)
}
