//! Player stat sheet with baseline and regeneration

use crate::stat_block::StatBlock;
use crate::stat_id::{StatId, StatValue};
use bio_core::Timer;
use serde::{Deserialize, Serialize};

/// Interval between health regeneration ticks
pub const REGEN_INTERVAL: f32 = 1.0;

/// Everything that describes the player's power level.
///
/// `block.move_speed` is the walk speed and `block.attack_damage` the
/// per-bullet damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSheet {
    /// Shared combat attributes
    pub block: StatBlock,
    /// Sprint speed
    pub sprint_speed: f32,
    /// Jump impulse
    pub jump_force: f32,
    /// Bullets per volley (and skill shots per ring)
    pub bullet_count: i32,
    /// Time between bullet volleys
    pub bullet_cooldown: f32,
    /// Time between skill rings
    pub skill_cooldown: f32,
    /// Auto-aim acquisition range
    pub shooting_range: f32,
    /// Bullet travel speed
    pub bullet_speed: f32,
    /// Skill shot travel speed
    pub skill_speed: f32,
    /// Percent of max health regenerated per regen tick
    pub health_regen_rate: f32,
}

impl Default for PlayerSheet {
    fn default() -> Self {
        Self {
            block: StatBlock::new(100)
                .with_move_speed(5.0)
                .with_attack(10.0, 0.0, 0.0)
                .with_crit(5.0, 1.5),
            sprint_speed: 10.0,
            jump_force: 5.0,
            bullet_count: 6,
            bullet_cooldown: 2.0,
            skill_cooldown: 5.0,
            shooting_range: 10.0,
            bullet_speed: 10.0,
            skill_speed: 15.0,
            health_regen_rate: 0.0,
        }
    }
}

impl PlayerSheet {
    /// Clamp every field into its valid range
    pub fn sanitize(&mut self) {
        self.block.sanitize();
        self.sprint_speed = self.sprint_speed.max(0.0);
        self.jump_force = self.jump_force.max(0.0);
        self.bullet_count = self.bullet_count.max(0);
        self.bullet_cooldown = self.bullet_cooldown.max(0.0);
        self.skill_cooldown = self.skill_cooldown.max(0.0);
        self.shooting_range = self.shooting_range.max(0.0);
        self.bullet_speed = self.bullet_speed.max(0.0);
        self.skill_speed = self.skill_speed.max(0.0);
        self.health_regen_rate = self.health_regen_rate.max(0.0);
    }
}

/// Live player stats plus the baseline they reset to
#[derive(Debug, Clone)]
pub struct PlayerStats {
    sheet: PlayerSheet,
    baseline: PlayerSheet,
    regen: Timer,
}

impl PlayerStats {
    /// Create from a sheet; the sheet becomes the baseline
    pub fn new(mut sheet: PlayerSheet) -> Self {
        sheet.sanitize();
        sheet.block.restore();
        log::debug!("Initial player stats stored");
        Self {
            baseline: sheet.clone(),
            sheet,
            regen: Timer::new(REGEN_INTERVAL),
        }
    }

    /// Current sheet
    pub fn sheet(&self) -> &PlayerSheet {
        &self.sheet
    }

    /// Baseline sheet
    pub fn baseline(&self) -> &PlayerSheet {
        &self.baseline
    }

    /// Combat attributes
    pub fn block(&self) -> &StatBlock {
        &self.sheet.block
    }

    /// Mutable combat attributes (health changes go through here)
    pub fn block_mut(&mut self) -> &mut StatBlock {
        &mut self.sheet.block
    }

    /// Restore the baseline and heal to full
    pub fn reset(&mut self) {
        self.sheet = self.baseline.clone();
        self.sheet.block.restore();
        self.regen.reset();
        log::info!("Player stats reset to initial values");
    }

    /// Read a stat
    pub fn get(&self, stat: StatId) -> StatValue {
        let s = &self.sheet;
        match stat {
            StatId::MaxHealth => StatValue::Int(s.block.max_health),
            StatId::Armor => StatValue::Float(s.block.armor),
            StatId::HealthRegenRate => StatValue::Float(s.health_regen_rate),
            StatId::WalkSpeed => StatValue::Float(s.block.move_speed),
            StatId::SprintSpeed => StatValue::Float(s.sprint_speed),
            StatId::JumpForce => StatValue::Float(s.jump_force),
            StatId::BulletDamage => StatValue::Float(s.block.attack_damage),
            StatId::BulletCount => StatValue::Int(s.bullet_count),
            StatId::BulletCooldown => StatValue::Float(s.bullet_cooldown),
            StatId::BulletSpeed => StatValue::Float(s.bullet_speed),
            StatId::SkillCooldown => StatValue::Float(s.skill_cooldown),
            StatId::SkillSpeed => StatValue::Float(s.skill_speed),
            StatId::ShootingRange => StatValue::Float(s.shooting_range),
            StatId::CritChance => StatValue::Float(s.block.crit_chance),
            StatId::CritDamageMultiplier => StatValue::Float(s.block.crit_damage_multiplier),
            StatId::ArmorPenetration => StatValue::Float(s.block.armor_penetration),
        }
    }

    /// Write a stat. The value is coerced to the stat's storage type and
    /// the sheet is re-sanitized. Raising max health keeps the health
    /// percentage.
    pub fn set(&mut self, stat: StatId, value: StatValue) {
        let float = value.as_f32();
        let int = match value {
            StatValue::Int(v) => v,
            StatValue::Float(v) => v as i32,
        };
        let s = &mut self.sheet;
        match stat {
            StatId::MaxHealth => s.block.set_max_health(int, true),
            StatId::Armor => s.block.armor = float,
            StatId::HealthRegenRate => s.health_regen_rate = float,
            StatId::WalkSpeed => s.block.move_speed = float,
            StatId::SprintSpeed => s.sprint_speed = float,
            StatId::JumpForce => s.jump_force = float,
            StatId::BulletDamage => s.block.attack_damage = float,
            StatId::BulletCount => s.bullet_count = int,
            StatId::BulletCooldown => s.bullet_cooldown = float,
            StatId::BulletSpeed => s.bullet_speed = float,
            StatId::SkillCooldown => s.skill_cooldown = float,
            StatId::SkillSpeed => s.skill_speed = float,
            StatId::ShootingRange => s.shooting_range = float,
            StatId::CritChance => s.block.crit_chance = float,
            StatId::CritDamageMultiplier => s.block.crit_damage_multiplier = float,
            StatId::ArmorPenetration => s.block.armor_penetration = float,
        }
        s.sanitize();
    }

    /// Apply one upgrade step to a stat and return the new value
    pub fn apply_delta(&mut self, stat: StatId, value: f32, is_percentage: bool) -> StatValue {
        let updated = self.get(stat).apply(value, is_percentage);
        self.set(stat, updated);
        let stored = self.get(stat);
        log::debug!("Stat '{}' updated to {}", stat, stored);
        stored
    }

    /// Advance regeneration. Every `REGEN_INTERVAL` heals
    /// `floor(rate/100 * max_health)` while below max. Returns health restored.
    pub fn tick_regen(&mut self, dt: f32) -> i32 {
        let ticks = self.regen.tick(dt);
        let mut healed = 0;
        for _ in 0..ticks {
            let block = &mut self.sheet.block;
            if self.sheet.health_regen_rate <= 0.0 || block.is_full() || block.is_depleted() {
                continue;
            }
            let amount = (self.sheet.health_regen_rate / 100.0 * block.max_health as f32).floor() as i32;
            if amount > 0 {
                healed += block.heal(amount);
            }
        }
        healed
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new(PlayerSheet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_balance_sheet() {
        let player = PlayerStats::default();
        assert_eq!(player.block().max_health, 100);
        assert_eq!(player.block().current_health(), 100);
        assert_eq!(player.sheet().bullet_count, 6);
        assert_eq!(player.get(StatId::BulletDamage), StatValue::Float(10.0));
    }

    #[test]
    fn test_reset_restores_baseline() {
        let mut player = PlayerStats::default();
        player.apply_delta(StatId::BulletCount, 2.0, false);
        player.apply_delta(StatId::Armor, 3.0, false);
        player.block_mut().take_damage(40);

        player.reset();
        assert_eq!(player.sheet(), player.baseline());
        assert_eq!(player.block().current_health(), 100);
    }

    #[test]
    fn test_max_health_upgrade_keeps_percent() {
        let mut player = PlayerStats::default();
        player.block_mut().take_damage(50);
        let value = player.apply_delta(StatId::MaxHealth, 20.0, true);
        assert_eq!(value, StatValue::Int(120));
        assert_eq!(player.block().current_health(), 60);
    }

    #[test]
    fn test_regen_heals_whole_ticks() {
        let mut player = PlayerStats::default();
        player.set(StatId::HealthRegenRate, StatValue::Float(2.5));
        player.block_mut().take_damage(10);

        // Half an interval: nothing yet
        assert_eq!(player.tick_regen(0.5), 0);
        // floor(2.5 % of 100) = 2 per tick, two ticks complete
        assert_eq!(player.tick_regen(1.5), 4);
        assert_eq!(player.block().current_health(), 94);
    }

    #[test]
    fn test_regen_stops_at_max() {
        let mut player = PlayerStats::default();
        player.set(StatId::HealthRegenRate, StatValue::Float(50.0));
        player.block_mut().take_damage(10);
        assert_eq!(player.tick_regen(3.0), 10);
        assert!(player.block().is_full());
    }

    #[test]
    fn test_negative_writes_are_clamped() {
        let mut player = PlayerStats::default();
        player.set(StatId::BulletCooldown, StatValue::Float(-1.0));
        player.set(StatId::BulletCount, StatValue::Int(-4));
        assert_eq!(player.sheet().bullet_cooldown, 0.0);
        assert_eq!(player.sheet().bullet_count, 0);
    }
}
