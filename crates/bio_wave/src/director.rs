//! Wave progression state machine

use crate::probe::{pick_spawn_point, GroundProbe};
use crate::wave::WaveSpec;
use bio_core::ActorId;
use bio_math::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Wave control errors. None of these halt the director.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaveError {
    #[error("no waves configured")]
    NoWaves,
    #[error("wave {index} out of range ({total} waves configured)")]
    OutOfRange { index: usize, total: usize },
    #[error("wave {index} already started")]
    AlreadyStarted { index: usize },
    #[error("cannot begin a wave while {0:?}")]
    Busy(DirectorState),
}

/// Tunables for spawning and progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    /// Delay after each successful spawn
    pub spawn_delay: f32,
    /// A shop opens after every `waves_per_shop` cleared waves (0 disables)
    pub waves_per_shop: u32,
    /// Spawn-point draws before a spawn is skipped
    pub spawn_attempts: u32,
    /// Ground search radius around a spawn point
    pub sample_radius: f32,
    /// Height added to the sampled ground point
    pub height_offset: f32,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            spawn_delay: 0.5,
            waves_per_shop: 3,
            spawn_attempts: 10,
            sample_radius: 2.0,
            height_offset: 1.0,
        }
    }
}

/// Director phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectorState {
    /// No wave running
    Idle,
    /// Spawn sequence in progress
    Spawning,
    /// Everything spawned, waiting for the last death
    WaitingForClear,
    /// Shop open between waves
    ShopOpen,
    /// Last wave cleared (terminal)
    AllWavesComplete,
}

/// Progression signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectorEvent {
    WaveStarted { index: usize },
    WaveCleared { index: usize },
    ShopOpened { after_wave: usize },
    ShopClosed,
    AllWavesComplete,
}

/// Creates actors for the director
pub trait Spawner {
    /// Whether an archetype reference resolves to a template
    fn resolves(&self, archetype: &str) -> bool;

    /// Create an enemy of `archetype` at `position`
    fn spawn(&mut self, archetype: &str, position: Vec3) -> ActorId;
}

#[derive(Debug, Clone)]
struct SpawnSequence {
    entry: usize,
    spawned_in_entry: u32,
    wait: f32,
}

/// Drives waves from first to last.
///
/// `enemies_alive` starts at the wave's planned total and is decremented
/// for every skipped spawn and every confirmed death, never below zero.
/// A wave completes exactly once: when the count is zero and the spawn
/// sequence has finished.
#[derive(Debug)]
pub struct WaveDirector {
    waves: Vec<WaveSpec>,
    config: DirectorConfig,
    state: DirectorState,
    current_wave: Option<usize>,
    enemies_alive: u32,
    live: HashSet<ActorId>,
    sequence: Option<SpawnSequence>,
    events: Vec<DirectorEvent>,
}

impl WaveDirector {
    /// Create an idle director
    pub fn new(waves: Vec<WaveSpec>, config: DirectorConfig) -> Self {
        Self {
            waves,
            config,
            state: DirectorState::Idle,
            current_wave: None,
            enemies_alive: 0,
            live: HashSet::new(),
            sequence: None,
            events: Vec::new(),
        }
    }

    /// Current phase
    pub fn state(&self) -> DirectorState {
        self.state
    }

    /// Index of the wave in progress (or last started)
    pub fn current_wave(&self) -> Option<usize> {
        self.current_wave
    }

    /// Live-enemy counter
    pub fn enemies_alive(&self) -> u32 {
        self.enemies_alive
    }

    /// Number of configured waves
    pub fn total_waves(&self) -> usize {
        self.waves.len()
    }

    /// Configuration
    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    /// Whether the spawn sequence is still running
    pub fn is_spawning(&self) -> bool {
        self.sequence.is_some()
    }

    /// Whether `id` is a live enemy of the current wave
    pub fn is_live(&self, id: ActorId) -> bool {
        self.live.contains(&id)
    }

    /// Take the pending progression events
    pub fn drain_events(&mut self) -> Vec<DirectorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin the first wave
    pub fn start(&mut self) -> Result<(), WaveError> {
        if self.waves.is_empty() {
            log::error!("No waves configured!");
            return Err(WaveError::NoWaves);
        }
        self.begin_wave(0)
    }

    /// Begin wave `index`. Waves only move forward and each runs once.
    pub fn begin_wave(&mut self, index: usize) -> Result<(), WaveError> {
        if index >= self.waves.len() {
            log::warn!("Wave {} does not exist ({} configured)", index + 1, self.waves.len());
            return Err(WaveError::OutOfRange {
                index,
                total: self.waves.len(),
            });
        }
        if matches!(
            self.state,
            DirectorState::Spawning | DirectorState::WaitingForClear | DirectorState::AllWavesComplete
        ) {
            return Err(WaveError::Busy(self.state));
        }
        if self.current_wave.is_some_and(|current| index <= current) {
            return Err(WaveError::AlreadyStarted { index });
        }

        let wave = &self.waves[index];
        if wave.entries.is_empty() {
            log::warn!("Wave {} has no enemy spawns configured!", index + 1);
        }
        log::info!("Spawning Wave {}...", index + 1);

        self.current_wave = Some(index);
        self.enemies_alive = wave.total_enemies();
        self.live.clear();
        self.state = DirectorState::Spawning;
        self.sequence = Some(SpawnSequence {
            entry: 0,
            spawned_in_entry: 0,
            wait: 0.0,
        });
        self.events.push(DirectorEvent::WaveStarted { index });
        Ok(())
    }

    /// Advance the spawn sequence by `dt`. Several spawns may happen in one
    /// call when `dt` spans more than one spawn delay.
    pub fn tick<S, P, R>(&mut self, dt: f32, spawner: &mut S, probe: &P, rng: &mut R)
    where
        S: Spawner + ?Sized,
        P: GroundProbe + ?Sized,
        R: Rng,
    {
        let Some(index) = self.current_wave else {
            return;
        };
        let Some(mut seq) = self.sequence.take() else {
            return;
        };
        let wave = &self.waves[index];
        let mut budget = dt.max(0.0);

        loop {
            if seq.wait > budget {
                seq.wait -= budget;
                self.sequence = Some(seq);
                return;
            }
            budget -= seq.wait;
            seq.wait = 0.0;

            let Some(entry) = wave.entries.get(seq.entry) else {
                break;
            };
            if seq.spawned_in_entry >= entry.count {
                seq.entry += 1;
                seq.spawned_in_entry = 0;
                continue;
            }
            if seq.spawned_in_entry == 0 && !spawner.resolves(&entry.archetype) {
                log::warn!("Unknown archetype '{}' in wave {}, skipping {} spawns", entry.archetype, index + 1, entry.count);
                self.enemies_alive = self.enemies_alive.saturating_sub(entry.count);
                seq.entry += 1;
                continue;
            }

            seq.spawned_in_entry += 1;
            let point = pick_spawn_point(
                &wave.spawn_points,
                probe,
                self.config.spawn_attempts,
                self.config.sample_radius,
                self.config.height_offset,
                rng,
            );
            match point {
                Some(position) => {
                    let id = spawner.spawn(&entry.archetype, position);
                    self.live.insert(id);
                    seq.wait = self.config.spawn_delay;
                }
                None => {
                    log::warn!("Failed to spawn {}: no valid spawn point", entry.archetype);
                    self.enemies_alive = self.enemies_alive.saturating_sub(1);
                }
            }
        }

        log::info!("Wave {} spawned with {} enemies.", index + 1, self.enemies_alive);
        self.state = DirectorState::WaitingForClear;
        self.check_completion();
    }

    /// Record a confirmed death. Returns false for actors that are not live
    /// enemies of this wave, so repeated reports are ignored.
    pub fn on_enemy_death(&mut self, id: ActorId) -> bool {
        if !self.live.remove(&id) {
            return false;
        }
        self.enemies_alive = self.enemies_alive.saturating_sub(1);
        log::info!("Enemy died. Enemies remaining: {}", self.enemies_alive);
        self.check_completion();
        true
    }

    /// Leave the shop and start the next wave. Ignored unless the shop is
    /// open.
    pub fn on_shop_closed(&mut self) -> bool {
        if self.state != DirectorState::ShopOpen {
            log::warn!("Shop closed while {:?}, ignoring", self.state);
            return false;
        }
        log::info!("Starting next wave after shop closed.");
        self.events.push(DirectorEvent::ShopClosed);
        self.advance();
        true
    }

    /// Abort the spawn sequence and drop every live enemy. Returns the ids
    /// removed so the owner can despawn them.
    pub fn clear_wave(&mut self) -> Vec<ActorId> {
        if !matches!(self.state, DirectorState::Spawning | DirectorState::WaitingForClear) {
            return Vec::new();
        }
        log::info!("[DEV] Clear current wave!");
        self.sequence = None;
        let mut removed: Vec<ActorId> = self.live.drain().collect();
        removed.sort();
        self.enemies_alive = 0;
        self.state = DirectorState::WaitingForClear;
        self.check_completion();
        removed
    }

    fn check_completion(&mut self) {
        if self.state != DirectorState::WaitingForClear || self.enemies_alive > 0 {
            return;
        }
        let Some(index) = self.current_wave else {
            return;
        };
        log::info!("Wave {} completed.", index + 1);
        self.events.push(DirectorEvent::WaveCleared { index });

        if index + 1 >= self.waves.len() {
            log::info!("Final wave completed!");
            self.state = DirectorState::AllWavesComplete;
            self.events.push(DirectorEvent::AllWavesComplete);
        } else if self.config.waves_per_shop > 0 && (index + 1) % self.config.waves_per_shop as usize == 0 {
            log::info!("Opening in-game shop...");
            self.state = DirectorState::ShopOpen;
            self.events.push(DirectorEvent::ShopOpened { after_wave: index });
        } else {
            self.advance();
        }
    }

    fn advance(&mut self) {
        self.state = DirectorState::Idle;
        let next = self.current_wave.map_or(0, |i| i + 1);
        if let Err(e) = self.begin_wave(next) {
            log::error!("Could not start wave {}: {}", next + 1, e);
        }
    }
}
