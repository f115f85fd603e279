//! Per-enemy state machine

use crate::state::AiState;
use bio_core::{Cooldown, Delay};
use bio_math::Vec3;
use bio_stats::StatBlock;

/// Time the spawn animation state is held
pub const SPAWN_DURATION: f32 = 1.0;

/// What the brain can see this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrainContext {
    /// Simulation time
    pub now: f32,
    /// Own position
    pub position: Vec3,
    /// Target position, if there is one
    pub target: Option<Vec3>,
    /// Whether the enemy stands on navigable ground
    pub navigable: bool,
}

impl BrainContext {
    /// Context without a target
    pub fn new(now: f32, position: Vec3) -> Self {
        Self {
            now,
            position,
            target: None,
            navigable: true,
        }
    }

    /// Set the target position
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = Some(target);
        self
    }

    /// Set navigability
    pub fn with_navigable(mut self, navigable: bool) -> Self {
        self.navigable = navigable;
        self
    }
}

/// Movement order for the host's navigation agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    /// Leave the agent as it is
    Unchanged,
    /// Stop moving
    Halt,
    /// Path towards `destination` at `speed`
    MoveTo { destination: Vec3, speed: f32 },
}

/// Result of one brain tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrainOutput {
    /// State after the tick
    pub state: AiState,
    /// Whether the state differs from before the tick
    pub state_changed: bool,
    /// Order for the navigation agent
    pub movement: Movement,
    /// Whether the archetype's attack action should run now
    pub attack: bool,
}

/// Behavior state machine for one enemy.
///
/// Starts in `Spawning`, reports `Idle` after `SPAWN_DURATION`, and
/// re-evaluates its target every tick until `kill` makes it `Dead`.
#[derive(Debug, Clone)]
pub struct EnemyBrain {
    state: AiState,
    previous: Option<AiState>,
    spawn: Delay,
    attack_cooldown: Cooldown,
}

impl EnemyBrain {
    /// Create a brain in `Spawning`
    pub fn new() -> Self {
        Self {
            state: AiState::Spawning,
            previous: None,
            spawn: Delay::new(SPAWN_DURATION),
            attack_cooldown: Cooldown::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> AiState {
        self.state
    }

    /// Previous state
    pub fn previous(&self) -> Option<AiState> {
        self.previous
    }

    /// Whether the brain is dead
    pub fn is_dead(&self) -> bool {
        self.state == AiState::Dead
    }

    /// Time of the last attack
    pub fn last_attack(&self) -> Option<f32> {
        self.attack_cooldown.last_use()
    }

    fn transition(&mut self, to: AiState) -> bool {
        if self.state == to {
            return false;
        }
        log::debug!("Enemy state: {} -> {}", self.state, to);
        self.previous = Some(self.state);
        self.state = to;
        true
    }

    /// Enter `Dead`. Returns false if already dead.
    pub fn kill(&mut self) -> bool {
        self.transition(AiState::Dead)
    }

    /// Advance one step.
    ///
    /// Targeting, movement and attacks run every tick until `Dead`.
    /// `Spawning` only holds the reported state until `SPAWN_DURATION` has
    /// passed, then the brain reports `Idle`.
    pub fn tick(&mut self, ctx: &BrainContext, stats: &StatBlock, dt: f32) -> BrainOutput {
        let before = self.state;
        if self.state == AiState::Dead {
            return BrainOutput {
                state: self.state,
                state_changed: false,
                movement: Movement::Unchanged,
                attack: false,
            };
        }

        let (decided, movement, attack) = self.decide(ctx, stats);
        if self.state == AiState::Spawning {
            if self.spawn.tick(dt) {
                self.transition(AiState::Idle);
            }
        } else {
            self.transition(decided);
        }

        BrainOutput {
            state: self.state,
            state_changed: self.state != before,
            movement,
            attack,
        }
    }

    fn decide(&mut self, ctx: &BrainContext, stats: &StatBlock) -> (AiState, Movement, bool) {
        let Some(target) = ctx.target.filter(|_| ctx.navigable) else {
            return (AiState::Idle, Movement::Unchanged, false);
        };
        if ctx.position.distance(target) > stats.attack_range {
            let movement = Movement::MoveTo {
                destination: target,
                speed: stats.move_speed,
            };
            return (AiState::Walking, movement, false);
        }
        if self.attack_cooldown.is_ready(ctx.now, stats.attack_cooldown) {
            self.attack_cooldown.trigger(ctx.now);
            (AiState::Attacking, Movement::Halt, true)
        } else {
            (AiState::Idle, Movement::Halt, false)
        }
    }
}

impl Default for EnemyBrain {
    fn default() -> Self {
        Self::new()
    }
}
