//! Wave data

use bio_math::Vec3;
use serde::{Deserialize, Serialize};

/// `count` enemies of one archetype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnEntry {
    /// Archetype template name
    pub archetype: String,
    pub count: u32,
}

/// One wave: ordered spawn entries plus the points they may appear at
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSpec {
    pub entries: Vec<SpawnEntry>,
    pub spawn_points: Vec<Vec3>,
}

impl WaveSpec {
    /// Empty wave
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn with_entry(mut self, archetype: impl Into<String>, count: u32) -> Self {
        self.entries.push(SpawnEntry {
            archetype: archetype.into(),
            count,
        });
        self
    }

    /// Add a spawn point
    pub fn with_spawn_point(mut self, point: Vec3) -> Self {
        self.spawn_points.push(point);
        self
    }

    /// Sum of all entry counts
    pub fn total_enemies(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Whether the wave spawns nothing
    pub fn is_empty(&self) -> bool {
        self.total_enemies() == 0
    }
}
