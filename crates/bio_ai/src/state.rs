//! Enemy behavior states

use serde::{Deserialize, Serialize};

/// Behavior state of one enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiState {
    /// Just created; held until the spawn delay elapses
    #[default]
    Spawning,
    Idle,
    /// Moving towards the target
    Walking,
    Attacking,
    /// Terminal
    Dead,
}

impl AiState {
    /// Whether no further transitions happen
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Dead)
    }

    /// Animation parameter the host should raise for this state
    pub fn animation_name(self) -> &'static str {
        match self {
            Self::Spawning => "IsSpawn",
            Self::Idle => "IsIdle",
            Self::Walking => "IsWalking",
            Self::Attacking => "IsAttack",
            Self::Dead => "IsDead",
        }
    }
}

impl std::fmt::Display for AiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
