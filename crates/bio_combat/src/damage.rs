//! Outgoing damage and critical hits

use bio_core::ActorId;
use bio_stats::StatBlock;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Information about a damage instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageInfo {
    /// Base damage amount
    pub amount: f32,
    /// Flat armor ignored on the defender
    pub armor_penetration: f32,
    /// Actor that caused the damage (if any)
    pub source: Option<ActorId>,
    /// Whether this is a critical hit
    pub is_critical: bool,
    /// Critical damage multiplier (if critical)
    pub critical_multiplier: f32,
}

impl DamageInfo {
    /// Create new damage info
    pub fn new(amount: f32) -> Self {
        Self {
            amount,
            armor_penetration: 0.0,
            source: None,
            is_critical: false,
            critical_multiplier: 1.0,
        }
    }

    /// Set the source actor
    pub fn with_source(mut self, actor: ActorId) -> Self {
        self.source = Some(actor);
        self
    }

    /// Set armor penetration
    pub fn with_penetration(mut self, penetration: f32) -> Self {
        self.armor_penetration = penetration;
        self
    }

    /// Mark as critical hit
    pub fn with_critical(mut self, multiplier: f32) -> Self {
        self.is_critical = true;
        self.critical_multiplier = multiplier;
        self
    }

    /// Scale the base amount (skill shots deal more than bullets)
    pub fn scaled(mut self, factor: f32) -> Self {
        self.amount *= factor;
        self
    }

    /// Get the final damage amount (including critical)
    pub fn final_amount(&self) -> f32 {
        if self.is_critical {
            self.amount * self.critical_multiplier
        } else {
            self.amount
        }
    }
}

impl Default for DamageInfo {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Roll a critical hit: a uniform draw in `[0, 100)` below `chance_percent`
pub fn roll_critical(chance_percent: f32, rng: &mut impl Rng) -> bool {
    if chance_percent <= 0.0 {
        return false;
    }
    rng.gen_range(0.0f32..100.0) < chance_percent
}

/// Damage an attacker sends out, with its crit already rolled
pub fn outgoing_damage(attacker: &StatBlock, rng: &mut impl Rng) -> DamageInfo {
    let damage = DamageInfo::new(attacker.attack_damage).with_penetration(attacker.armor_penetration);
    if roll_critical(attacker.crit_chance, rng) {
        log::debug!("Critical hit! x{}", attacker.crit_damage_multiplier);
        damage.with_critical(attacker.crit_damage_multiplier)
    } else {
        damage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_damage_info() {
        let damage = DamageInfo::new(50.0)
            .with_source(ActorId::from_raw(123))
            .with_critical(2.5);

        assert_eq!(damage.amount, 50.0);
        assert!(damage.is_critical);
        assert_eq!(damage.final_amount(), 125.0);
    }

    #[test]
    fn test_crit_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(!roll_critical(0.0, &mut rng));
            assert!(roll_critical(100.0, &mut rng));
        }
    }

    #[test]
    fn test_crit_rate_is_roughly_chance() {
        let mut rng = StdRng::seed_from_u64(42);
        let crits = (0..10_000).filter(|_| roll_critical(25.0, &mut rng)).count();
        assert!((2_000..3_000).contains(&crits), "crits = {}", crits);
    }

    #[test]
    fn test_outgoing_damage_applies_multiplier() {
        let mut rng = StdRng::seed_from_u64(1);
        let attacker = StatBlock::new(100)
            .with_attack(10.0, 0.0, 0.0)
            .with_crit(100.0, 1.5)
            .with_armor_penetration(3.0);
        let damage = outgoing_damage(&attacker, &mut rng);
        assert!(damage.is_critical);
        assert_eq!(damage.final_amount(), 15.0);
        assert_eq!(damage.armor_penetration, 3.0);
    }
}
