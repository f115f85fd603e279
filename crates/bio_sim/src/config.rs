//! Simulation configuration
//!
//! Loaded from a TOML file, then overridden by environment variables:
//! - `BIO_SEED`: RNG seed (reproducible runs)
//! - `BIO_WAVES_PER_SHOP`: shop interval

use bio_math::Vec3;
use bio_shop::{validate_pool, ShopConfig, UpgradeData, UpgradeDefinition, UpgradeError, UpgradeKind};
use bio_stats::{ArchetypeTable, PlayerSheet};
use bio_wave::{DirectorConfig, WaveSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Upgrade(#[from] UpgradeError),
}

/// Everything a session is built from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Time a dead enemy stays before it is despawned
    pub despawn_delay: f32,
    pub player: PlayerSheet,
    pub archetypes: ArchetypeTable,
    pub director: DirectorConfig,
    pub shop: ShopConfig,
    pub waves: Vec<WaveSpec>,
    pub upgrades: Vec<UpgradeData>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            despawn_delay: 1.5,
            player: PlayerSheet::default(),
            archetypes: ArchetypeTable::standard(),
            director: DirectorConfig::default(),
            shop: ShopConfig::default(),
            waves: default_waves(),
            upgrades: default_upgrades(),
        }
    }
}

impl SimConfig {
    /// Load from a TOML file and apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        log::info!("Loaded sim config from {}", path.display());
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse TOML. Missing sections fall back to the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Override from `BIO_*` environment variables
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override from any key lookup. Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(seed) = lookup("BIO_SEED") {
            match seed.trim().parse() {
                Ok(seed) => {
                    self.seed = Some(seed);
                    log::info!("Seed from env: {}", seed);
                }
                Err(_) => log::warn!("Ignoring invalid BIO_SEED: {}", seed),
            }
        }
        if let Some(interval) = lookup("BIO_WAVES_PER_SHOP") {
            match interval.trim().parse() {
                Ok(interval) => {
                    self.director.waves_per_shop = interval;
                    log::info!("Waves per shop from env: {}", interval);
                }
                Err(_) => log::warn!("Ignoring invalid BIO_WAVES_PER_SHOP: {}", interval),
            }
        }
    }

    /// Validate the upgrade pool
    pub fn upgrade_pool(&self) -> Result<Vec<UpgradeDefinition>, UpgradeError> {
        validate_pool(self.upgrades.iter().cloned())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        log::info!("Sim Configuration:");
        log::info!("  Seed: {:?}", self.seed);
        log::info!("  Waves: {} (shop every {})", self.waves.len(), self.director.waves_per_shop);
        log::info!("  Archetypes: {}, upgrades: {}", self.archetypes.len(), self.upgrades.len());
    }
}

fn spawn_ring(radius: f32, points: usize) -> Vec<Vec3> {
    (0..points)
        .map(|i| Vec3::from_heading(i as f32 * 360.0 / points as f32) * radius)
        .collect()
}

fn default_waves() -> Vec<WaveSpec> {
    let cohorts: [&[(&str, u32)]; 6] = [
        &[("melee", 3)],
        &[("melee", 3), ("ranged", 2)],
        &[("melee", 4), ("ranged", 2), ("tank", 1)],
        &[("melee", 5), ("ranged", 3), ("tank", 1)],
        &[("melee", 5), ("ranged", 4), ("tank", 2)],
        &[("melee", 6), ("ranged", 4), ("tank", 3)],
    ];
    cohorts
        .iter()
        .map(|cohort| {
            let wave = cohort
                .iter()
                .fold(WaveSpec::new(), |wave, (archetype, count)| wave.with_entry(*archetype, *count));
            WaveSpec {
                spawn_points: spawn_ring(14.0, 8),
                ..wave
            }
        })
        .collect()
}

fn stat_upgrade(id: &str, name: &str, description: &str, stat: &str, value: f32, percent: bool, max_level: u32) -> UpgradeData {
    UpgradeData {
        id: id.to_string(),
        display_name: name.to_string(),
        description: description.to_string(),
        kind: UpgradeKind::StatBoost,
        stat: Some(stat.to_string()),
        value_per_level: value,
        is_percentage: percent,
        max_level,
        ..UpgradeData::default()
    }
}

fn default_upgrades() -> Vec<UpgradeData> {
    vec![
        stat_upgrade("bullet_damage", "Hollow Points", "Bullet damage +{0}", "bulletDamage", 5.0, false, 5),
        stat_upgrade("bullet_count", "Extra Barrel", "+{0} bullets per volley", "bulletCount", 1.0, false, 3),
        stat_upgrade("fire_rate", "Hair Trigger", "Bullet cooldown {0}%", "bulletCooldown", -10.0, true, 5),
        stat_upgrade("max_health", "Vitality", "Max health +{0}%", "maxHealth", 20.0, true, 5),
        stat_upgrade("armor", "Plating", "Armor +{0}", "armor", 2.0, false, 5),
        stat_upgrade("regen", "Regeneration", "Regenerate {0}% health per second", "healthRegenRate", 1.0, false, 5),
        stat_upgrade("walk_speed", "Sprinter", "Walk speed +{0}%", "walkSpeed", 10.0, true, 5),
        stat_upgrade("crit_chance", "Precision", "Crit chance +{0}%", "critChance", 5.0, false, 5),
        stat_upgrade("crit_damage", "Deadly Aim", "Crit damage +{0}x", "critDamageMultiplier", 0.25, false, 5),
        stat_upgrade("penetration", "Armor Piercing", "Armor penetration +{0}", "armorPenetration", 2.0, false, 5),
        stat_upgrade("range", "Scope", "Shooting range +{0}", "shootingRange", 2.0, false, 5),
        stat_upgrade("skill_cooldown", "Overcharge", "Skill cooldown {0}%", "skillCooldown", -10.0, true, 5),
    ]
}
