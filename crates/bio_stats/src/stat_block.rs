//! Per-actor stat block

use serde::{Deserialize, Serialize};

/// Numeric attributes of one actor.
///
/// Health is integral; everything else is a float. `current_health` is kept
/// private so `0 <= current_health <= max_health` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    /// Maximum health
    pub max_health: i32,
    /// Current health. Not persisted; loaded blocks must be `restore()`d.
    #[serde(skip)]
    current_health: i32,
    /// Flat armor subtracted from incoming damage
    pub armor: f32,
    /// Movement speed in units per time unit
    pub move_speed: f32,
    /// Damage dealt per hit
    pub attack_damage: f32,
    /// Distance at which attacks connect
    pub attack_range: f32,
    /// Minimum time between attacks
    pub attack_cooldown: f32,
    /// Critical hit chance in percent (0 - 100)
    pub crit_chance: f32,
    /// Damage multiplier on a critical hit
    pub crit_damage_multiplier: f32,
    /// Flat armor ignored on the defender
    pub armor_penetration: f32,
    /// Currency granted to the killer
    pub currency_drop_amount: u32,
}

impl StatBlock {
    /// Create a stat block at full health
    pub fn new(max_health: i32) -> Self {
        let max_health = max_health.max(0);
        Self {
            max_health,
            current_health: max_health,
            armor: 0.0,
            move_speed: 0.0,
            attack_damage: 0.0,
            attack_range: 0.0,
            attack_cooldown: 0.0,
            crit_chance: 0.0,
            crit_damage_multiplier: 1.0,
            armor_penetration: 0.0,
            currency_drop_amount: 0,
        }
    }

    /// Set armor
    pub fn with_armor(mut self, armor: f32) -> Self {
        self.armor = armor;
        self
    }

    /// Set movement speed
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Set attack damage, range and cooldown
    pub fn with_attack(mut self, damage: f32, range: f32, cooldown: f32) -> Self {
        self.attack_damage = damage;
        self.attack_range = range;
        self.attack_cooldown = cooldown;
        self
    }

    /// Set crit chance (percent) and multiplier
    pub fn with_crit(mut self, chance: f32, multiplier: f32) -> Self {
        self.crit_chance = chance;
        self.crit_damage_multiplier = multiplier;
        self
    }

    /// Set armor penetration
    pub fn with_armor_penetration(mut self, penetration: f32) -> Self {
        self.armor_penetration = penetration;
        self
    }

    /// Set currency reward
    pub fn with_currency_drop(mut self, amount: u32) -> Self {
        self.currency_drop_amount = amount;
        self
    }

    /// Sanitized copy at full health, used when an actor is created from a
    /// template.
    pub fn instantiate(&self) -> Self {
        let mut block = self.clone();
        block.sanitize();
        block.restore();
        block
    }

    /// Current health
    #[inline]
    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    /// Clamp every field into its valid range.
    ///
    /// Armor, speeds, ranges and cooldowns become non-negative, crit chance
    /// lands in `[0, 100]` and health in `[0, max_health]`.
    pub fn sanitize(&mut self) {
        self.max_health = self.max_health.max(0);
        self.current_health = self.current_health.clamp(0, self.max_health);
        self.armor = self.armor.max(0.0);
        self.move_speed = self.move_speed.max(0.0);
        self.attack_damage = self.attack_damage.max(0.0);
        self.attack_range = self.attack_range.max(0.0);
        self.attack_cooldown = self.attack_cooldown.max(0.0);
        self.crit_chance = self.crit_chance.clamp(0.0, 100.0);
        self.crit_damage_multiplier = self.crit_damage_multiplier.max(0.0);
        self.armor_penetration = self.armor_penetration.max(0.0);
    }

    /// Subtract health, clamped at zero. Negative amounts are ignored.
    /// Returns the health actually removed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.current_health;
        self.current_health = (self.current_health - amount.max(0)).max(0);
        before - self.current_health
    }

    /// Add health, clamped at max. Negative amounts are ignored.
    /// Returns the health actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_health;
        self.current_health = self
            .current_health
            .saturating_add(amount.max(0))
            .min(self.max_health);
        self.current_health - before
    }

    /// Set health directly (clamped to 0..max)
    pub fn set_health(&mut self, health: i32) {
        self.current_health = health.clamp(0, self.max_health);
    }

    /// Restore full health
    pub fn restore(&mut self) {
        self.current_health = self.max_health;
    }

    /// Change max health.
    ///
    /// With `keep_percent` the current health is rescaled to the same
    /// fraction of the new maximum (rounded); otherwise it is only clamped.
    pub fn set_max_health(&mut self, new_max: i32, keep_percent: bool) {
        let new_max = new_max.max(0);
        let percent = self.health_percent();
        self.max_health = new_max;
        self.current_health = if keep_percent {
            (new_max as f32 * percent).round() as i32
        } else {
            self.current_health
        }
        .clamp(0, new_max);
    }

    /// Health as a fraction (0.0 - 1.0)
    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.current_health as f32 / self.max_health as f32
    }

    /// Whether health has reached zero
    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current_health <= 0
    }

    /// Whether at full health
    #[inline]
    pub fn is_full(&self) -> bool {
        self.current_health >= self.max_health
    }
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut block = StatBlock::new(50);
        assert_eq!(block.take_damage(30), 30);
        assert_eq!(block.current_health(), 20);
        assert_eq!(block.take_damage(100), 20);
        assert_eq!(block.current_health(), 0);
        assert!(block.is_depleted());
    }

    #[test]
    fn test_negative_amounts_are_ignored() {
        let mut block = StatBlock::new(50);
        block.set_health(10);
        assert_eq!(block.take_damage(-5), 0);
        assert_eq!(block.heal(-5), 0);
        assert_eq!(block.current_health(), 10);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut block = StatBlock::new(100);
        block.set_health(50);
        assert_eq!(block.heal(30), 30);
        assert_eq!(block.heal(50), 20);
        assert!(block.is_full());
    }

    #[test]
    fn test_set_max_health_keeps_percent() {
        let mut block = StatBlock::new(100);
        block.set_health(50);
        block.set_max_health(150, true);
        assert_eq!(block.max_health, 150);
        assert_eq!(block.current_health(), 75);

        block.set_max_health(60, false);
        assert_eq!(block.current_health(), 60);
    }

    #[test]
    fn test_sanitize() {
        let mut block = StatBlock::new(10)
            .with_armor(-3.0)
            .with_attack(-1.0, -2.0, -0.5)
            .with_crit(250.0, 2.0);
        block.sanitize();
        assert_eq!(block.armor, 0.0);
        assert_eq!(block.attack_damage, 0.0);
        assert_eq!(block.attack_range, 0.0);
        assert_eq!(block.attack_cooldown, 0.0);
        assert_eq!(block.crit_chance, 100.0);
    }

    #[test]
    fn test_health_stays_in_bounds_over_sequence() {
        let mut block = StatBlock::new(40);
        for (i, amount) in [15, -4, 80, 7, 1000, 3].iter().enumerate() {
            if i % 2 == 0 {
                block.take_damage(*amount);
            } else {
                block.heal(*amount);
            }
            assert!(block.current_health() >= 0);
            assert!(block.current_health() <= block.max_health);
        }
    }
}
