//! Typed stat identifiers for upgrades

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unknown stat name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stat: {0}")]
pub struct StatParseError(pub String);

/// Storage type of a stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatKind {
    Int,
    Float,
}

/// A stat value read from or written to a sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatValue {
    Int(i32),
    Float(f32),
}

impl StatValue {
    /// Value as a float
    pub fn as_f32(self) -> f32 {
        match self {
            Self::Int(v) => v as f32,
            Self::Float(v) => v,
        }
    }

    /// Apply an upgrade step.
    ///
    /// Floats: `v * (1 + value/100)` or `v + value`.
    /// Ints: `v + floor(v * value/100)` or `v + trunc(value)`.
    pub fn apply(self, value: f32, is_percentage: bool) -> Self {
        match self {
            Self::Float(v) => Self::Float(if is_percentage {
                v * (1.0 + value / 100.0)
            } else {
                v + value
            }),
            Self::Int(v) => Self::Int(if is_percentage {
                v.saturating_add((v as f32 * (value / 100.0)).floor() as i32)
            } else {
                v.saturating_add(value as i32)
            }),
        }
    }
}

impl std::fmt::Display for StatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Every stat an upgrade may target.
///
/// Resolved from a name when upgrade data is validated, so an unknown name
/// is rejected at load time rather than ignored at purchase time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatId {
    MaxHealth,
    Armor,
    HealthRegenRate,
    WalkSpeed,
    SprintSpeed,
    JumpForce,
    BulletDamage,
    BulletCount,
    BulletCooldown,
    BulletSpeed,
    SkillCooldown,
    SkillSpeed,
    ShootingRange,
    CritChance,
    CritDamageMultiplier,
    ArmorPenetration,
}

impl StatId {
    /// All stat ids
    pub const ALL: [StatId; 16] = [
        Self::MaxHealth,
        Self::Armor,
        Self::HealthRegenRate,
        Self::WalkSpeed,
        Self::SprintSpeed,
        Self::JumpForce,
        Self::BulletDamage,
        Self::BulletCount,
        Self::BulletCooldown,
        Self::BulletSpeed,
        Self::SkillCooldown,
        Self::SkillSpeed,
        Self::ShootingRange,
        Self::CritChance,
        Self::CritDamageMultiplier,
        Self::ArmorPenetration,
    ];

    /// Canonical name as used in upgrade data
    pub fn name(self) -> &'static str {
        match self {
            Self::MaxHealth => "maxHealth",
            Self::Armor => "armor",
            Self::HealthRegenRate => "healthRegenRate",
            Self::WalkSpeed => "walkSpeed",
            Self::SprintSpeed => "sprintSpeed",
            Self::JumpForce => "jumpForce",
            Self::BulletDamage => "bulletDamage",
            Self::BulletCount => "bulletCount",
            Self::BulletCooldown => "bulletCooldown",
            Self::BulletSpeed => "bulletSpeed",
            Self::SkillCooldown => "skillCooldown",
            Self::SkillSpeed => "skillSpeed",
            Self::ShootingRange => "shootingRange",
            Self::CritChance => "critChance",
            Self::CritDamageMultiplier => "critDamageMultiplier",
            Self::ArmorPenetration => "armorPenetration",
        }
    }

    /// Storage type
    pub fn kind(self) -> StatKind {
        match self {
            Self::MaxHealth | Self::BulletCount => StatKind::Int,
            _ => StatKind::Float,
        }
    }
}

impl std::fmt::Display for StatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for StatId {
    type Err = StatParseError;

    /// Accepts the camelCase data name or its snake_case spelling
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name().to_lowercase() == normalized)
            .ok_or_else(|| StatParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("bulletDamage".parse::<StatId>(), Ok(StatId::BulletDamage));
        assert_eq!("bullet_damage".parse::<StatId>(), Ok(StatId::BulletDamage));
        assert_eq!(" maxHealth ".parse::<StatId>(), Ok(StatId::MaxHealth));
        assert_eq!(
            "laserCount".parse::<StatId>(),
            Err(StatParseError("laserCount".into()))
        );
    }

    #[test]
    fn test_names_round_trip() {
        for id in StatId::ALL {
            assert_eq!(id.name().parse::<StatId>(), Ok(id));
        }
    }

    #[test]
    fn test_apply_float() {
        assert_eq!(StatValue::Float(10.0).apply(5.0, false), StatValue::Float(15.0));
        assert_eq!(StatValue::Float(2.0).apply(50.0, true), StatValue::Float(3.0));
    }

    #[test]
    fn test_apply_int() {
        assert_eq!(StatValue::Int(6).apply(1.0, false), StatValue::Int(7));
        // 100 * 15 % = 15
        assert_eq!(StatValue::Int(100).apply(15.0, true), StatValue::Int(115));
        // 6 * 10 % = 0.6 -> floor 0
        assert_eq!(StatValue::Int(6).apply(10.0, true), StatValue::Int(6));
    }
}
