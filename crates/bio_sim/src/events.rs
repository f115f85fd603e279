//! Events from the simulation to the host

use bio_ai::AiState;
use bio_combat::ProjectileSpawn;
use bio_core::{ActorId, ProjectileId};
use bio_math::Vec3;
use bio_stats::Archetype;
use serde::Serialize;
use std::collections::VecDeque;

/// Everything the host needs to mirror the simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimEvent {
    /// Instantiate an enemy
    EnemySpawned {
        id: ActorId,
        archetype: Archetype,
        template: String,
        position: Vec3,
    },
    /// Path the enemy towards `destination`
    MoveOrder { id: ActorId, destination: Vec3, speed: f32 },
    /// Stop the enemy's navigation agent
    Halt { id: ActorId },
    /// Enemy behavior state changed (drive the animator)
    AnimationState { id: ActorId, state: AiState },
    /// Instantiate a projectile and report its hits back
    ProjectileFired {
        id: ProjectileId,
        source: ActorId,
        spawn: ProjectileSpawn,
    },
    /// Projectile lifetime ran out
    ProjectileExpired { id: ProjectileId },
    /// Enemy died: disable movement and collision
    ActorDied { id: ActorId, reward: u32 },
    /// Death grace period over: remove the enemy
    ActorDespawned { id: ActorId },
    PlayerDamaged {
        amount: i32,
        health: i32,
        source: Option<ActorId>,
    },
    PlayerHealed { amount: i32, health: i32 },
    CurrencyChanged { balance: u32 },
    WaveStarted { index: usize },
    WaveCleared { index: usize },
    ShopOpened { after_wave: usize },
    ShopClosed,
    /// Final wave cleared (win)
    AllWavesComplete,
    /// Player health reached zero (lose)
    PlayerDefeated,
}

/// FIFO event queue drained by the host once per tick
#[derive(Debug)]
pub struct EventChannel<E> {
    queue: VecDeque<E>,
}

impl<E> EventChannel<E> {
    /// Create a new channel
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Send an event
    pub fn send(&mut self, event: E) {
        self.queue.push_back(event);
    }

    /// Receive an event
    pub fn receive(&mut self) -> Option<E> {
        self.queue.pop_front()
    }

    /// Drain all events
    pub fn drain(&mut self) -> Vec<E> {
        self.queue.drain(..).collect()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Get pending count
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}
