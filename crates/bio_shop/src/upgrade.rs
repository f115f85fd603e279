//! Upgrade definitions

use bio_stats::{StatId, StatParseError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Upgrade data rejected at load time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpgradeError {
    #[error("upgrade has an empty id")]
    EmptyId,
    #[error("duplicate upgrade id: {0}")]
    DuplicateId(String),
    #[error("upgrade {0}: max_level must be at least 1")]
    ZeroMaxLevel(String),
    #[error("upgrade {id}: {source}")]
    UnknownStat {
        id: String,
        #[source]
        source: StatParseError,
    },
    #[error("upgrade {0}: stat boost without a target stat")]
    MissingStat(String),
}

/// What buying an upgrade does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// Adds to a player stat
    #[default]
    StatBoost,
    /// Unlocks a weapon (levelled only)
    NewWeapon,
    /// Improves a weapon (levelled only)
    WeaponUpgrade,
}

/// Upgrade as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeData {
    pub id: String,
    pub display_name: String,
    /// `{0}` is replaced with the total value at the shown level
    pub description: String,
    pub kind: UpgradeKind,
    /// Target stat name (camelCase or snake_case)
    pub stat: Option<String>,
    pub value_per_level: f32,
    pub is_percentage: bool,
    pub max_level: u32,
    pub base_cost: u32,
    pub cost_increase_per_level: u32,
}

impl Default for UpgradeData {
    fn default() -> Self {
        Self {
            id: String::new(),
            display_name: "New Upgrade".to_string(),
            description: "Upgrade Description {0}".to_string(),
            kind: UpgradeKind::StatBoost,
            stat: None,
            value_per_level: 1.0,
            is_percentage: false,
            max_level: 5,
            base_cost: 50,
            cost_increase_per_level: 25,
        }
    }
}

/// Validated upgrade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeDefinition {
    id: String,
    display_name: String,
    description: String,
    kind: UpgradeKind,
    target: Option<StatId>,
    value_per_level: f32,
    is_percentage: bool,
    max_level: u32,
    base_cost: u32,
    cost_increase_per_level: u32,
}

impl UpgradeDefinition {
    /// Stat upgrade with default pricing (50 + 25 per level, max level 5)
    pub fn stat_boost(id: impl Into<String>, stat: StatId, value_per_level: f32, is_percentage: bool) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            description: format!("{} +{{0}}", stat),
            id,
            kind: UpgradeKind::StatBoost,
            target: Some(stat),
            value_per_level,
            is_percentage,
            max_level: 5,
            base_cost: 50,
            cost_increase_per_level: 25,
        }
    }

    /// Weapon upgrade with no stat effect
    pub fn weapon(id: impl Into<String>, kind: UpgradeKind) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            description: String::new(),
            id,
            kind,
            target: None,
            value_per_level: 0.0,
            is_percentage: false,
            max_level: 1,
            base_cost: 50,
            cost_increase_per_level: 25,
        }
    }

    /// Set pricing
    pub fn with_cost(mut self, base_cost: u32, increase_per_level: u32) -> Self {
        self.base_cost = base_cost;
        self.cost_increase_per_level = increase_per_level;
        self
    }

    /// Set max level (at least 1)
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level.max(1);
        self
    }

    /// Set display name and description
    pub fn with_text(mut self, display_name: impl Into<String>, description: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self.description = description.into();
        self
    }

    /// Validate configuration data
    pub fn from_data(data: UpgradeData) -> Result<Self, UpgradeError> {
        let id = data.id.trim().to_string();
        if id.is_empty() {
            return Err(UpgradeError::EmptyId);
        }
        if data.max_level == 0 {
            return Err(UpgradeError::ZeroMaxLevel(id));
        }
        let target = match &data.stat {
            Some(name) if !name.trim().is_empty() => Some(
                name.parse::<StatId>()
                    .map_err(|source| UpgradeError::UnknownStat { id: id.clone(), source })?,
            ),
            _ => None,
        };
        if data.kind == UpgradeKind::StatBoost && target.is_none() {
            return Err(UpgradeError::MissingStat(id));
        }
        Ok(Self {
            id,
            display_name: data.display_name,
            description: data.description,
            kind: data.kind,
            target,
            value_per_level: data.value_per_level,
            is_percentage: data.is_percentage,
            max_level: data.max_level,
            base_cost: data.base_cost,
            cost_increase_per_level: data.cost_increase_per_level,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn kind(&self) -> UpgradeKind {
        self.kind
    }

    /// Target stat of a stat boost
    pub fn target(&self) -> Option<StatId> {
        self.target
    }

    pub fn value_per_level(&self) -> f32 {
        self.value_per_level
    }

    pub fn is_percentage(&self) -> bool {
        self.is_percentage
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Price of the next level when `current_level` levels are owned
    pub fn cost(&self, current_level: u32) -> u32 {
        self.base_cost
            .saturating_add(current_level.saturating_mul(self.cost_increase_per_level))
    }

    /// Description with the cumulative value at `level`
    pub fn describe(&self, level: u32) -> String {
        self.description
            .replace("{0}", &(self.value_per_level * level as f32).to_string())
    }
}

/// Validate a whole pool. Ids must be unique.
pub fn validate_pool(data: impl IntoIterator<Item = UpgradeData>) -> Result<Vec<UpgradeDefinition>, UpgradeError> {
    let mut seen = HashSet::new();
    let mut pool = Vec::new();
    for entry in data {
        let def = UpgradeDefinition::from_data(entry)?;
        if !seen.insert(def.id.clone()) {
            return Err(UpgradeError::DuplicateId(def.id));
        }
        pool.push(def);
    }
    Ok(pool)
}
