//! Simulation session

use crate::config::{ConfigError, SimConfig};
use crate::events::{EventChannel, SimEvent};
use crate::world::{WorldProbe, WorldView};
use bio_ai::{behavior_for, AttackAction, BrainContext, EnemyBrain, Movement};
use bio_combat::{
    bullet_fan, resolve, resolve_aim, resolve_hit, skill_ring, AimMode, DamageInfo, Faction, HitResult,
    ProjectileSpawn, ProjectileTracker, WeaponRig,
};
use bio_core::{ActorId, Delay, IdGenerator, ProjectileId, SimClock};
use bio_math::Vec3;
use bio_shop::{Receipt, ShopError, ShopView, UpgradeLedger, UpgradeShop, Wallet};
use bio_stats::{Archetype, ArchetypeTable, PlayerStats, StatBlock};
use bio_wave::{DirectorEvent, DirectorState, Spawner, WaveDirector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Where the run stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Running,
    /// Paused for the shop
    ShopOpen,
    /// Every wave cleared
    Won,
    /// Player died
    Lost,
}

impl Outcome {
    /// Whether the run is over
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Run counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub waves_cleared: usize,
    pub enemies_killed: u32,
    pub projectiles_fired: u32,
    pub damage_dealt: i64,
    pub damage_taken: i64,
    pub currency_earned: u64,
    pub upgrades_bought: u32,
    pub rerolls: u32,
}

/// A live enemy
#[derive(Debug)]
struct Enemy {
    template: String,
    archetype: Archetype,
    stats: StatBlock,
    brain: EnemyBrain,
    halted: bool,
}

/// Director-facing spawner over the session's enemy table
struct EnemySpawner<'a> {
    archetypes: &'a ArchetypeTable,
    enemies: &'a mut BTreeMap<ActorId, Enemy>,
    ids: &'a IdGenerator,
    events: &'a mut EventChannel<SimEvent>,
}

impl Spawner for EnemySpawner<'_> {
    fn resolves(&self, archetype: &str) -> bool {
        self.archetypes.contains(archetype)
    }

    fn spawn(&mut self, template_name: &str, position: Vec3) -> ActorId {
        let id = self.ids.next_actor();
        let (archetype, stats) = match self.archetypes.get(template_name) {
            Some(template) => (template.archetype, template.spawn_stats()),
            // resolves() is checked first; fall back to the parsed family
            None => {
                let archetype = template_name.parse().unwrap_or(Archetype::Melee);
                (archetype, archetype.base_stats())
            }
        };
        log::debug!("Spawned {} {} at {:?}", template_name, id, position);
        self.events.send(SimEvent::EnemySpawned {
            id,
            archetype,
            template: template_name.to_string(),
            position,
        });
        self.events.send(SimEvent::AnimationState {
            id,
            state: bio_ai::AiState::Spawning,
        });
        self.enemies.insert(
            id,
            Enemy {
                template: template_name.to_string(),
                archetype,
                stats,
                brain: EnemyBrain::new(),
                halted: false,
            },
        );
        id
    }
}

/// One run of the game.
///
/// Everything happens on the caller's thread: `tick` advances time, the
/// command methods apply host input between ticks.
pub struct Session {
    player_id: ActorId,
    player: PlayerStats,
    rig: WeaponRig,
    enemies: BTreeMap<ActorId, Enemy>,
    corpses: Vec<(ActorId, Delay)>,
    archetypes: ArchetypeTable,
    director: WaveDirector,
    shop: UpgradeShop,
    ledger: UpgradeLedger,
    wallet: Wallet,
    projectiles: ProjectileTracker,
    despawn_delay: f32,
    rng: StdRng,
    clock: SimClock,
    ids: IdGenerator,
    events: EventChannel<SimEvent>,
    finished: Option<Outcome>,
    stats: RunStats,
}

impl Session {
    /// Start a new run: empty wallet and ledger, baseline player, first
    /// wave begun.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let pool = config.upgrade_pool()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ids = IdGenerator::new();
        let player_id = ids.next_actor();
        let player = PlayerStats::new(config.player);
        let rig = WeaponRig::new(player.sheet());

        let mut session = Self {
            player_id,
            player,
            rig,
            enemies: BTreeMap::new(),
            corpses: Vec::new(),
            archetypes: config.archetypes,
            director: WaveDirector::new(config.waves, config.director),
            shop: UpgradeShop::new(pool, config.shop),
            ledger: UpgradeLedger::new(),
            wallet: Wallet::new(0),
            projectiles: ProjectileTracker::new(),
            despawn_delay: config.despawn_delay.max(0.0),
            rng,
            clock: SimClock::new(),
            ids,
            events: EventChannel::new(),
            finished: None,
            stats: RunStats::default(),
        };
        log::info!("New run started");
        if let Err(e) = session.director.start() {
            log::error!("Run cannot start: {}", e);
        }
        session.pump_director();
        Ok(session)
    }

    /// Id the host uses to report hits on the player
    pub fn player_id(&self) -> ActorId {
        self.player_id
    }

    pub fn player(&self) -> &PlayerStats {
        &self.player
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn ledger(&self) -> &UpgradeLedger {
        &self.ledger
    }

    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    pub fn run_stats(&self) -> &RunStats {
        &self.stats
    }

    /// Simulation time
    pub fn now(&self) -> f32 {
        self.clock.now()
    }

    pub fn aim_mode(&self) -> AimMode {
        self.rig.aim_mode()
    }

    /// Live enemy ids in spawn order
    pub fn live_enemies(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.enemies.keys().copied()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// Stats of a live enemy
    pub fn enemy_stats(&self, id: ActorId) -> Option<&StatBlock> {
        self.enemies.get(&id).map(|e| &e.stats)
    }

    /// Behavior state of a live enemy
    pub fn enemy_state(&self, id: ActorId) -> Option<bio_ai::AiState> {
        self.enemies.get(&id).map(|e| e.brain.state())
    }

    /// Template name of a live enemy
    pub fn enemy_template(&self, id: ActorId) -> Option<&str> {
        self.enemies.get(&id).map(|e| e.template.as_str())
    }

    /// Current outcome
    pub fn outcome(&self) -> Outcome {
        match self.finished {
            Some(outcome) => outcome,
            None if self.shop.is_open() => Outcome::ShopOpen,
            None => Outcome::Running,
        }
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain()
    }

    /// Advance the simulation by `dt`. Nothing moves while the shop is open
    /// or after the run has finished.
    pub fn tick<W: WorldView + ?Sized>(&mut self, dt: f32, world: &W) -> Outcome {
        if self.finished.is_some() || self.shop.is_open() {
            return self.outcome();
        }
        let dt = dt.max(0.0);
        let now = self.clock.advance(dt);

        // Age shots already in flight before anything new is fired
        for id in self.projectiles.tick(dt) {
            self.events.send(SimEvent::ProjectileExpired { id });
        }
        self.tick_spawning(dt, world);
        self.tick_regen(dt);
        self.tick_enemies(now, dt, world);
        if self.finished.is_none() {
            self.tick_weapons(dt, world);
        }
        self.tick_corpses(dt);

        self.outcome()
    }

    fn tick_spawning<W: WorldView + ?Sized>(&mut self, dt: f32, world: &W) {
        let mut spawner = EnemySpawner {
            archetypes: &self.archetypes,
            enemies: &mut self.enemies,
            ids: &self.ids,
            events: &mut self.events,
        };
        self.director.tick(dt, &mut spawner, &WorldProbe(world), &mut self.rng);
        self.pump_director();
    }

    fn tick_regen(&mut self, dt: f32) {
        let healed = self.player.tick_regen(dt);
        if healed > 0 {
            self.events.send(SimEvent::PlayerHealed {
                amount: healed,
                health: self.player.block().current_health(),
            });
        }
    }

    fn tick_enemies<W: WorldView + ?Sized>(&mut self, now: f32, dt: f32, world: &W) {
        let target = if self.player.block().is_depleted() {
            None
        } else {
            world.player_position()
        };
        let ids: Vec<ActorId> = self.enemies.keys().copied().collect();

        for id in ids {
            if self.finished.is_some() {
                return;
            }
            let Some(enemy) = self.enemies.get_mut(&id) else {
                continue;
            };
            let position = world.actor_position(id);
            let mut ctx = BrainContext::new(now, position.unwrap_or(Vec3::ZERO))
                .with_navigable(position.is_some() && world.is_navigable(id));
            if let Some(target) = target {
                ctx = ctx.with_target(target);
            }

            let output = enemy.brain.tick(&ctx, &enemy.stats, dt);
            if output.state_changed {
                self.events.send(SimEvent::AnimationState { id, state: output.state });
            }
            match output.movement {
                Movement::Unchanged => {}
                Movement::Halt => {
                    if !enemy.halted {
                        enemy.halted = true;
                        self.events.send(SimEvent::Halt { id });
                    }
                }
                Movement::MoveTo { destination, speed } => {
                    enemy.halted = false;
                    self.events.send(SimEvent::MoveOrder { id, destination, speed });
                }
            }

            if output.attack {
                let Some(target) = ctx.target else {
                    continue;
                };
                let action = behavior_for(enemy.archetype).perform(&enemy.stats, ctx.position, target, &mut self.rng);
                match action {
                    AttackAction::Strike(damage) => {
                        self.damage_player(&damage.with_source(id));
                    }
                    AttackAction::Shoot(mut spawn) => {
                        spawn.payload.damage.source = Some(id);
                        self.fire(id, spawn);
                    }
                }
            }
        }
    }

    fn tick_weapons<W: WorldView + ?Sized>(&mut self, dt: f32, world: &W) {
        let volleys = self.rig.tick(self.player.sheet(), dt);
        if volleys.is_empty() {
            return;
        }
        let Some(origin) = world.player_position() else {
            log::debug!("Player position unknown, holding fire");
            return;
        };

        for _ in 0..volleys.bullets {
            let targets: Vec<Vec3> = self.enemies.keys().filter_map(|id| world.actor_position(*id)).collect();
            let aim = resolve_aim(
                self.rig.aim_mode(),
                origin,
                targets,
                self.player.sheet().shooting_range,
                world.aim_direction(),
                &mut self.rng,
            );
            for spawn in bullet_fan(origin, aim, self.player.sheet(), &mut self.rng) {
                self.fire(self.player_id, spawn);
            }
        }
        for _ in 0..volleys.skills {
            for spawn in skill_ring(origin, self.player.sheet(), &mut self.rng) {
                self.fire(self.player_id, spawn);
            }
        }
    }

    fn tick_corpses(&mut self, dt: f32) {
        let mut despawned = Vec::new();
        self.corpses.retain_mut(|(id, delay)| {
            if delay.tick(dt) {
                despawned.push(*id);
                false
            } else {
                true
            }
        });
        for id in despawned {
            self.events.send(SimEvent::ActorDespawned { id });
        }
    }

    fn fire(&mut self, source: ActorId, mut spawn: ProjectileSpawn) {
        let id = self.ids.next_projectile();
        if spawn.faction() == Faction::Player {
            spawn.payload.damage.source = Some(source);
        }
        self.projectiles.fire(id, spawn.clone());
        self.stats.projectiles_fired += 1;
        self.events.send(SimEvent::ProjectileFired { id, source, spawn });
    }

    /// Apply a hit to the player. Armor applies, penetration does not.
    fn damage_player(&mut self, damage: &DamageInfo) -> Option<HitResult> {
        if self.finished.is_some() || self.player.block().is_depleted() {
            return None;
        }
        let hit = resolve_hit(damage.final_amount(), 0.0, self.player.block_mut());
        self.stats.damage_taken += hit.final_damage as i64;
        log::debug!("Player took {} damage. Health: {}", hit.final_damage, hit.remaining_health);
        self.events.send(SimEvent::PlayerDamaged {
            amount: hit.final_damage,
            health: hit.remaining_health,
            source: damage.source,
        });
        if hit.defender_died {
            log::info!("Player died");
            self.events.send(SimEvent::PlayerDefeated);
            self.finished = Some(Outcome::Lost);
        }
        Some(hit)
    }

    /// Remove a dead enemy. `rewarded` grants its currency drop.
    fn kill_enemy(&mut self, id: ActorId, rewarded: bool) {
        let Some(mut enemy) = self.enemies.remove(&id) else {
            return;
        };
        enemy.brain.kill();
        let reward = if rewarded { enemy.stats.currency_drop_amount } else { 0 };
        self.events.send(SimEvent::AnimationState {
            id,
            state: bio_ai::AiState::Dead,
        });
        self.events.send(SimEvent::ActorDied { id, reward });
        if reward > 0 {
            let balance = self.wallet.add(reward);
            self.stats.currency_earned += reward as u64;
            self.events.send(SimEvent::CurrencyChanged { balance });
        }
        if rewarded {
            self.stats.enemies_killed += 1;
        }
        self.corpses.push((id, Delay::new(self.despawn_delay)));
        self.director.on_enemy_death(id);
        self.pump_director();
    }

    fn pump_director(&mut self) {
        for event in self.director.drain_events() {
            match event {
                DirectorEvent::WaveStarted { index } => self.events.send(SimEvent::WaveStarted { index }),
                DirectorEvent::WaveCleared { index } => {
                    self.stats.waves_cleared += 1;
                    self.events.send(SimEvent::WaveCleared { index });
                }
                DirectorEvent::ShopOpened { after_wave } => {
                    self.shop.open(&self.ledger, &mut self.rng);
                    self.events.send(SimEvent::ShopOpened { after_wave });
                }
                DirectorEvent::ShopClosed => self.events.send(SimEvent::ShopClosed),
                DirectorEvent::AllWavesComplete => {
                    log::info!("All waves complete. Victory!");
                    if self.finished.is_none() {
                        self.finished = Some(Outcome::Won);
                    }
                    self.events.send(SimEvent::AllWavesComplete);
                }
            }
        }
    }

    /// Host report: projectile `id` connected with `defenders`.
    ///
    /// Player shots damage the first defender, or every distinct defender
    /// for splash shots. Enemy shots only affect the player. Unknown, expired or
    /// already-resolved projectiles are ignored.
    pub fn projectile_hit(&mut self, id: ProjectileId, defenders: &[ActorId]) -> Vec<HitResult> {
        if self.finished.is_some() || self.shop.is_open() {
            return Vec::new();
        }
        let Some(spawn) = self.projectiles.take(id) else {
            log::debug!("Ignoring hit from unknown {}", id);
            return Vec::new();
        };
        let damage = spawn.payload.damage;
        let mut results = Vec::new();

        match spawn.kind.faction() {
            Faction::Player => {
                let targets: Vec<ActorId> = if spawn.payload.splash_radius > 0.0 {
                    let mut seen = HashSet::new();
                    defenders.iter().copied().filter(|id| seen.insert(*id)).collect()
                } else {
                    defenders.iter().copied().take(1).collect()
                };
                for target in targets {
                    let Some(enemy) = self.enemies.get_mut(&target) else {
                        continue;
                    };
                    let hit = resolve(&damage, &mut enemy.stats);
                    self.stats.damage_dealt += hit.final_damage as i64;
                    log::debug!(
                        "{} took {} damage. Health: {}/{}",
                        target,
                        hit.final_damage,
                        hit.remaining_health,
                        enemy.stats.max_health
                    );
                    if hit.defender_died {
                        self.kill_enemy(target, true);
                    }
                    results.push(hit);
                }
            }
            Faction::Enemy => {
                if defenders.contains(&self.player_id) {
                    results.extend(self.damage_player(&damage));
                }
            }
        }
        results
    }

    /// Buy the offer at `slot`
    pub fn purchase(&mut self, slot: usize) -> Result<Receipt, ShopError> {
        let receipt = self
            .shop
            .purchase(slot, &mut self.ledger, &mut self.wallet, &mut self.player)?;
        self.stats.upgrades_bought += 1;
        self.events.send(SimEvent::CurrencyChanged {
            balance: receipt.balance,
        });
        Ok(receipt)
    }

    /// Pay for fresh offers
    pub fn reroll(&mut self) -> Result<u32, ShopError> {
        let paid = self.shop.reroll(&self.ledger, &mut self.wallet, &mut self.rng)?;
        self.stats.rerolls += 1;
        self.events.send(SimEvent::CurrencyChanged {
            balance: self.wallet.balance(),
        });
        Ok(paid)
    }

    /// Close the shop and start the next wave
    pub fn close_shop(&mut self) -> Result<(), ShopError> {
        self.shop.close()?;
        if !self.director.on_shop_closed() {
            log::warn!("Shop closed outside a shop break");
        }
        self.pump_director();
        Ok(())
    }

    /// Shop data for the UI
    pub fn shop_view(&self) -> ShopView {
        self.shop.view(&self.ledger, &self.wallet)
    }

    /// Switch between closest-enemy and directional aim
    pub fn toggle_aim_mode(&mut self) -> AimMode {
        self.rig.toggle_aim_mode()
    }

    /// Debug: kill every live enemy without rewards and complete the wave
    pub fn clear_wave(&mut self) {
        if !matches!(
            self.director.state(),
            DirectorState::Spawning | DirectorState::WaitingForClear
        ) {
            return;
        }
        let removed = self.director.clear_wave();
        for id in removed {
            self.kill_enemy(id, false);
        }
        self.pump_director();
    }

    /// Debug: add currency
    pub fn grant_currency(&mut self, amount: u32) -> u32 {
        log::info!("[DEV] Add {} currency!", amount);
        let balance = self.wallet.add(amount);
        self.events.send(SimEvent::CurrencyChanged { balance });
        balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bio_combat::ProjectileKind;
    use bio_wave::WaveSpec;
    use std::collections::HashMap;

    /// Player at the origin, every enemy parked at a fixed spot
    struct Fixed {
        player: Vec3,
        enemies: HashMap<ActorId, Vec3>,
        default_enemy: Vec3,
    }

    impl Fixed {
        fn far() -> Self {
            Self {
                player: Vec3::ZERO,
                enemies: HashMap::new(),
                default_enemy: Vec3::new(50.0, 0.0, 0.0),
            }
        }
    }

    impl WorldView for Fixed {
        fn player_position(&self) -> Option<Vec3> {
            Some(self.player)
        }

        fn actor_position(&self, id: ActorId) -> Option<Vec3> {
            Some(self.enemies.get(&id).copied().unwrap_or(self.default_enemy))
        }
    }

    fn config(waves: Vec<WaveSpec>) -> SimConfig {
        let mut config = SimConfig {
            seed: Some(1),
            waves,
            ..SimConfig::default()
        };
        // Keep the player from firing unless a test wants it
        config.player.bullet_cooldown = 1000.0;
        config.player.skill_cooldown = 1000.0;
        config
    }

    fn one_wave(entries: &[(&str, u32)]) -> WaveSpec {
        entries.iter().fold(
            WaveSpec::new().with_spawn_point(Vec3::new(50.0, 0.0, 0.0)),
            |w, (a, n)| w.with_entry(*a, *n),
        )
    }

    #[test]
    fn test_new_session_starts_first_wave() {
        let mut session = Session::new(config(vec![one_wave(&[("melee", 2)])])).unwrap();
        assert_eq!(session.wallet().balance(), 0);
        assert!(session.ledger().is_empty());
        assert_eq!(session.drain_events(), vec![SimEvent::WaveStarted { index: 0 }]);

        session.tick(0.0, &Fixed::far());
        assert_eq!(session.enemy_count(), 1);
        assert!(matches!(session.drain_events()[0], SimEvent::EnemySpawned { .. }));
    }

    #[test]
    fn test_melee_enemy_attacks_player() {
        let mut session = Session::new(config(vec![one_wave(&[("melee", 1)])])).unwrap();
        let mut world = Fixed::far();
        session.tick(0.0, &world);
        let id = session.live_enemies().next().unwrap();
        world.enemies.insert(id, Vec3::new(1.0, 0.0, 0.0));

        // Fights from the first tick; the animation still reads Spawning
        session.tick(0.5, &world);
        assert_eq!(session.enemy_state(id), Some(bio_ai::AiState::Spawning));
        assert_eq!(session.player().block().current_health(), 85);
        let events = session.drain_events();
        assert!(events.contains(&SimEvent::Halt { id }));
        assert!(events.contains(&SimEvent::PlayerDamaged {
            amount: 15,
            health: 85,
            source: Some(id)
        }));

        // Spawn delay over, cooldown still running
        session.tick(1.0, &world);
        assert_eq!(session.enemy_state(id), Some(bio_ai::AiState::Idle));
        assert_eq!(session.player().block().current_health(), 85);

        session.tick(0.5, &world);
        assert_eq!(session.enemy_state(id), Some(bio_ai::AiState::Attacking));
        assert_eq!(session.player().block().current_health(), 70);
    }

    #[test]
    fn test_player_death_is_terminal() {
        let mut cfg = config(vec![one_wave(&[("tank", 1)])]);
        cfg.player.block.max_health = 15;
        let mut session = Session::new(cfg).unwrap();
        let mut world = Fixed::far();
        session.tick(0.0, &world);
        let id = session.live_enemies().next().unwrap();
        world.enemies.insert(id, Vec3::new(1.0, 0.0, 0.0));

        assert_eq!(session.tick(0.1, &world), Outcome::Lost);
        assert!(session.drain_events().contains(&SimEvent::PlayerDefeated));
        assert_eq!(session.tick(1.0, &world), Outcome::Lost);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_bullet_kill_rewards_currency() {
        let mut cfg = config(vec![one_wave(&[("ranged", 1)]), one_wave(&[("ranged", 1)])]);
        cfg.player.bullet_cooldown = 1.0;
        cfg.player.bullet_count = 1;
        cfg.player.block.attack_damage = 100.0;
        let mut session = Session::new(cfg).unwrap();
        let mut world = Fixed::far();
        session.tick(0.0, &world);
        let enemy = session.live_enemies().next().unwrap();
        world.enemies.insert(enemy, Vec3::new(0.0, 0.0, 5.0));
        session.drain_events();

        session.tick(1.0, &world);
        let shot = session
            .drain_events()
            .into_iter()
            .find_map(|e| match e {
                SimEvent::ProjectileFired { id, spawn, .. } if spawn.kind == ProjectileKind::Bullet => Some(id),
                _ => None,
            })
            .unwrap();

        let hits = session.projectile_hit(shot, &[enemy]);
        assert!(hits[0].defender_died);
        assert_eq!(session.wallet().balance(), 4);
        assert!(session.enemy_stats(enemy).is_none());
        assert!(session.projectile_hit(shot, &[enemy]).is_empty());

        let events = session.drain_events();
        assert!(events.contains(&SimEvent::ActorDied { id: enemy, reward: 4 }));
        assert!(events.contains(&SimEvent::WaveCleared { index: 0 }));

        // Corpse lingers for the despawn delay
        session.tick(1.5, &world);
        assert!(session.drain_events().contains(&SimEvent::ActorDespawned { id: enemy }));
    }

    #[test]
    fn test_shop_pauses_and_resumes() {
        let mut cfg = config(vec![one_wave(&[("melee", 1)]), one_wave(&[("melee", 1)])]);
        cfg.director.waves_per_shop = 1;
        let mut session = Session::new(cfg).unwrap();
        let world = Fixed::far();
        session.tick(0.0, &world);

        session.clear_wave();
        assert_eq!(session.outcome(), Outcome::ShopOpen);
        assert_eq!(session.wallet().balance(), 0);
        let now = session.now();
        assert_eq!(session.tick(5.0, &world), Outcome::ShopOpen);
        assert_eq!(session.now(), now);

        session.grant_currency(100);
        let view = session.shop_view();
        assert!(view.open);
        assert_eq!(view.offers.len(), 3);
        session.purchase(0).unwrap();
        assert_eq!(session.wallet().balance(), 50);
        assert_eq!(session.purchase(0), Err(ShopError::AlreadyPurchased(0)));

        session.close_shop().unwrap();
        assert_eq!(session.close_shop(), Err(ShopError::NotOpen));
        assert_eq!(session.outcome(), Outcome::Running);
        assert_eq!(session.director().current_wave(), Some(1));
    }

    #[test]
    fn test_toggle_aim_mode() {
        let mut session = Session::new(config(vec![one_wave(&[("melee", 1)])])).unwrap();
        assert_eq!(session.aim_mode(), AimMode::ClosestEnemy);
        assert_eq!(session.toggle_aim_mode(), AimMode::Directional);
    }
}
