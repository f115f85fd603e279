//! Headless arena
//!
//! A minimal stand-in for the game engine: enemies walk straight towards
//! their move orders, projectiles fly in straight lines and overlap tests
//! replace physics. Used by the `bioterror-sim` binary and by tests.

use crate::config::{ConfigError, SimConfig};
use crate::events::SimEvent;
use crate::session::{Outcome, RunStats, Session};
use crate::world::WorldView;
use bio_combat::Faction;
use bio_core::{ActorId, ProjectileId};
use bio_math::Vec3;
use serde::Serialize;
use std::collections::BTreeMap;

/// Planar distance at which a projectile touches its target
pub const HIT_RADIUS: f32 = 0.75;

/// Step used when `run_headless` is given a non-positive one
pub const DEFAULT_STEP: f32 = 1.0 / 30.0;

#[derive(Debug, Clone)]
struct ArenaActor {
    position: Vec3,
    destination: Option<Vec3>,
    speed: f32,
    alive: bool,
}

#[derive(Debug, Clone)]
struct Shot {
    position: Vec3,
    velocity: Vec3,
    faction: Faction,
    splash_radius: f32,
}

/// World mirror built purely from `SimEvent`s
#[derive(Debug, Default)]
pub struct Arena {
    player: Vec3,
    aim: Option<Vec3>,
    actors: BTreeMap<ActorId, ArenaActor>,
    shots: BTreeMap<ProjectileId, Shot>,
}

impl Arena {
    /// Empty arena with the player at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the player
    pub fn with_player(mut self, position: Vec3) -> Self {
        self.player = position;
        self
    }

    /// Aim vector reported for directional aiming
    pub fn with_aim(mut self, aim: Vec3) -> Self {
        self.aim = Some(aim);
        self
    }

    /// Number of actors present (alive or awaiting despawn)
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Number of projectiles in flight
    pub fn shot_count(&self) -> usize {
        self.shots.len()
    }

    /// Mirror a batch of events
    pub fn apply(&mut self, events: &[SimEvent]) {
        for event in events {
            match event {
                SimEvent::EnemySpawned { id, position, .. } => {
                    self.actors.insert(
                        *id,
                        ArenaActor {
                            position: *position,
                            destination: None,
                            speed: 0.0,
                            alive: true,
                        },
                    );
                }
                SimEvent::MoveOrder { id, destination, speed } => {
                    if let Some(actor) = self.actors.get_mut(id) {
                        actor.destination = Some(*destination);
                        actor.speed = *speed;
                    }
                }
                SimEvent::Halt { id } => {
                    if let Some(actor) = self.actors.get_mut(id) {
                        actor.destination = None;
                    }
                }
                SimEvent::ActorDied { id, .. } => {
                    if let Some(actor) = self.actors.get_mut(id) {
                        actor.alive = false;
                        actor.destination = None;
                    }
                }
                SimEvent::ActorDespawned { id } => {
                    self.actors.remove(id);
                }
                SimEvent::ProjectileFired { id, spawn, .. } => {
                    self.shots.insert(
                        *id,
                        Shot {
                            position: spawn.origin,
                            velocity: spawn.direction * spawn.speed,
                            faction: spawn.faction(),
                            splash_radius: spawn.payload.splash_radius,
                        },
                    );
                }
                SimEvent::ProjectileExpired { id } => {
                    self.shots.remove(id);
                }
                _ => {}
            }
        }
    }

    /// Advance movement by `dt` and return the projectile hits to report,
    /// each with the actors it touched.
    pub fn step(&mut self, dt: f32, player_id: ActorId) -> Vec<(ProjectileId, Vec<ActorId>)> {
        for actor in self.actors.values_mut().filter(|a| a.alive) {
            let Some(destination) = actor.destination else {
                continue;
            };
            let offset = destination - actor.position;
            let distance = offset.length();
            let travel = actor.speed * dt;
            actor.position = if travel >= distance {
                destination
            } else {
                actor.position + offset.normalize_or_zero() * travel
            };
        }

        let mut hits = Vec::new();
        for (id, shot) in self.shots.iter_mut() {
            shot.position = shot.position + shot.velocity * dt;
            let defenders = match shot.faction {
                Faction::Player => {
                    let touched = self
                        .actors
                        .iter()
                        .filter(|(_, a)| a.alive)
                        .map(|(actor, a)| (*actor, planar_distance(a.position, shot.position)))
                        .filter(|(_, d)| *d <= HIT_RADIUS)
                        .min_by(|a, b| a.1.total_cmp(&b.1));
                    match touched {
                        Some(_) if shot.splash_radius > 0.0 => within(&self.actors, shot.position, shot.splash_radius),
                        Some((closest, _)) => vec![closest],
                        None => Vec::new(),
                    }
                }
                Faction::Enemy if planar_distance(self.player, shot.position) <= HIT_RADIUS => vec![player_id],
                Faction::Enemy => Vec::new(),
            };
            if !defenders.is_empty() {
                hits.push((*id, defenders));
            }
        }
        for (id, _) in &hits {
            self.shots.remove(id);
        }
        hits
    }
}

/// Live actors within `radius` of `center`, in id order
fn within(actors: &BTreeMap<ActorId, ArenaActor>, center: Vec3, radius: f32) -> Vec<ActorId> {
    actors
        .iter()
        .filter(|(_, a)| a.alive && planar_distance(a.position, center) <= radius)
        .map(|(id, _)| *id)
        .collect()
}

fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    (a - b).flatten().length()
}

impl WorldView for Arena {
    fn player_position(&self) -> Option<Vec3> {
        Some(self.player)
    }

    fn actor_position(&self, id: ActorId) -> Option<Vec3> {
        self.actors.get(&id).filter(|a| a.alive).map(|a| a.position)
    }

    fn aim_direction(&self) -> Option<Vec3> {
        self.aim
    }
}

/// Result of a headless run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub outcome: Outcome,
    /// Simulated time
    pub elapsed: f32,
    pub total_waves: usize,
    pub balance: u32,
    pub player_health: i32,
    /// Upgrade levels bought
    pub upgrades: BTreeMap<String, u32>,
    pub stats: RunStats,
}

/// Run a whole session against an `Arena` until it is won, lost or
/// `max_time` of simulated time has passed. Whenever the shop opens the
/// cheapest affordable offers are bought before it is closed again.
pub fn run_headless(config: SimConfig, max_time: f32, dt: f32) -> Result<RunSummary, ConfigError> {
    let dt = if dt > 0.0 { dt } else { DEFAULT_STEP };
    let mut session = Session::new(config)?;
    let mut arena = Arena::new();
    let player_id = session.player_id();
    arena.apply(&session.drain_events());

    while !session.outcome().is_finished() && session.now() < max_time {
        if session.outcome() == Outcome::ShopOpen {
            shop_autopilot(&mut session);
            arena.apply(&session.drain_events());
            continue;
        }

        session.tick(dt, &arena);
        arena.apply(&session.drain_events());
        for (id, defenders) in arena.step(dt, player_id) {
            session.projectile_hit(id, &defenders);
        }
        arena.apply(&session.drain_events());
    }

    let outcome = session.outcome();
    log::info!("Run finished: {:?} after {:.1}s", outcome, session.now());
    Ok(RunSummary {
        outcome,
        elapsed: session.now(),
        total_waves: session.director().total_waves(),
        balance: session.wallet().balance(),
        player_health: session.player().block().current_health(),
        upgrades: session.ledger().iter().map(|(id, level)| (id.to_string(), level)).collect(),
        stats: session.run_stats().clone(),
    })
}

fn shop_autopilot(session: &mut Session) {
    loop {
        let view = session.shop_view();
        let cheapest = view
            .offers
            .iter()
            .filter(|offer| offer.available)
            .min_by_key(|offer| offer.cost)
            .map(|offer| offer.slot);
        let Some(slot) = cheapest else {
            break;
        };
        match session.purchase(slot) {
            Ok(receipt) => log::info!("Bought {} level {} for {}", receipt.id, receipt.level, receipt.cost),
            Err(e) => {
                log::warn!("Purchase failed: {}", e);
                break;
            }
        }
    }
    if let Err(e) = session.close_shop() {
        log::warn!("Could not close shop: {}", e);
    }
}
