//! Enemy archetype templates

use crate::stat_block::StatBlock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Enemy behavior family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    /// Close range, hits the player directly
    Melee,
    /// Keeps distance and fires projectiles
    Ranged,
    /// Slow, armored, hits hard at close range
    Tank,
}

impl Archetype {
    /// All archetypes
    pub const ALL: [Archetype; 3] = [Self::Melee, Self::Ranged, Self::Tank];

    /// Baseline stat block
    pub fn base_stats(self) -> StatBlock {
        match self {
            Self::Melee => StatBlock::new(50)
                .with_armor(5.0)
                .with_move_speed(3.5)
                .with_attack(15.0, 2.0, 1.5)
                .with_currency_drop(5),
            Self::Ranged => StatBlock::new(30)
                .with_armor(2.0)
                .with_move_speed(5.0)
                .with_attack(8.0, 10.0, 2.0)
                .with_currency_drop(4),
            Self::Tank => StatBlock::new(100)
                .with_armor(15.0)
                .with_move_speed(2.0)
                .with_attack(20.0, 2.0, 2.0)
                .with_currency_drop(8),
        }
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::Melee => "melee",
            Self::Ranged => "ranged",
            Self::Tank => "tank",
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Archetype name that matches no behavior family
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown archetype: {0}")]
pub struct ArchetypeParseError(pub String);

impl std::str::FromStr for Archetype {
    type Err = ArchetypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "melee" | "meleeenemy" => Ok(Self::Melee),
            "ranged" | "rangedenemy" => Ok(Self::Ranged),
            "tank" | "tankenemy" => Ok(Self::Tank),
            _ => Err(ArchetypeParseError(s.to_string())),
        }
    }
}

/// A named enemy template: behavior family plus stat block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeTemplate {
    /// Behavior family
    pub archetype: Archetype,
    /// Stats each spawned enemy starts with
    pub stats: StatBlock,
}

impl ArchetypeTemplate {
    /// Template using the archetype's baseline stats
    pub fn new(archetype: Archetype) -> Self {
        Self {
            archetype,
            stats: archetype.base_stats(),
        }
    }

    /// Override the stats
    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.stats = stats;
        self
    }

    /// Fresh stat block for a newly spawned enemy
    pub fn spawn_stats(&self) -> StatBlock {
        self.stats.instantiate()
    }
}

/// Lookup of templates by name, the archetype references used in wave data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchetypeTable {
    templates: HashMap<String, ArchetypeTemplate>,
}

impl ArchetypeTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with one template per archetype under its lowercase name
    pub fn standard() -> Self {
        let mut table = Self::new();
        for archetype in Archetype::ALL {
            table.insert(archetype.name(), ArchetypeTemplate::new(archetype));
        }
        table
    }

    /// Register a template, replacing any previous one with that name
    pub fn insert(&mut self, name: impl Into<String>, template: ArchetypeTemplate) {
        self.templates.insert(name.into(), template);
    }

    /// Resolve a template reference
    pub fn get(&self, name: &str) -> Option<&ArchetypeTemplate> {
        self.templates.get(name)
    }

    /// Whether a reference resolves
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
