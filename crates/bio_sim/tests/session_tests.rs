//! Integration tests for bio_sim
//!
//! Drives full sessions through a scripted world: combat math, wave
//! progression, the shop economy and run outcomes.

use bio_ai::AiState;
use bio_combat::ProjectileKind;
use bio_core::{ActorId, ProjectileId};
use bio_math::Vec3;
use bio_shop::{ShopError, UpgradeData};
use bio_sim::*;
use bio_wave::WaveSpec;
use std::collections::HashMap;

/// Player at the origin; enemies sit where the test puts them, or far away
#[derive(Default)]
struct ScriptedWorld {
    positions: HashMap<ActorId, Vec3>,
}

impl ScriptedWorld {
    fn place(&mut self, id: ActorId, position: Vec3) {
        self.positions.insert(id, position);
    }
}

impl WorldView for ScriptedWorld {
    fn player_position(&self) -> Option<Vec3> {
        Some(Vec3::ZERO)
    }

    fn actor_position(&self, id: ActorId) -> Option<Vec3> {
        Some(self.positions.get(&id).copied().unwrap_or(Vec3::new(50.0, 0.0, 0.0)))
    }
}

fn wave(entries: &[(&str, u32)]) -> WaveSpec {
    entries.iter().fold(
        WaveSpec::new().with_spawn_point(Vec3::new(50.0, 0.0, 0.0)),
        |w, (archetype, count)| w.with_entry(*archetype, *count),
    )
}

/// Seeded config whose player only fires when a test enables it
fn quiet_config(waves: Vec<WaveSpec>) -> SimConfig {
    let mut config = SimConfig {
        seed: Some(99),
        waves,
        ..SimConfig::default()
    };
    config.player.bullet_cooldown = 1000.0;
    config.player.skill_cooldown = 1000.0;
    config
}

fn fired_bullets(events: &[SimEvent]) -> Vec<ProjectileId> {
    events
        .iter()
        .filter_map(|e| match e {
            SimEvent::ProjectileFired { id, spawn, .. } if spawn.kind == ProjectileKind::Bullet => Some(*id),
            _ => None,
        })
        .collect()
}

/// A 20 damage bullet against melee armor 5 deals 15
#[test]
fn test_armor_mitigates_player_bullet() {
    let mut config = quiet_config(vec![wave(&[("melee", 1)])]);
    config.player.bullet_cooldown = 1.0;
    config.player.bullet_count = 1;
    config.player.block.attack_damage = 20.0;
    config.player.block.crit_chance = 0.0;

    let mut session = Session::new(config).unwrap();
    let world = ScriptedWorld::default();
    session.tick(0.0, &world);
    let enemy = session.live_enemies().next().unwrap();

    session.tick(1.0, &world);
    let bullets = fired_bullets(&session.drain_events());
    assert_eq!(bullets.len(), 1);

    let hits = session.projectile_hit(bullets[0], &[enemy]);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].final_damage, 15);
    assert_eq!(hits[0].remaining_health, 35);
    assert!(!hits[0].defender_died);
    assert_eq!(session.enemy_stats(enemy).map(|s| s.current_health()), Some(35));
    assert_eq!(session.run_stats().damage_dealt, 15);
}

/// 3 melee + 2 ranged: five confirmed deaths clear the wave, once
#[test]
fn test_wave_clears_after_every_death() {
    let mut config = quiet_config(vec![wave(&[("melee", 3), ("ranged", 2)]), wave(&[("tank", 1)])]);
    config.player.bullet_cooldown = 1.0;
    config.player.bullet_count = 1;
    config.player.block.attack_damage = 500.0;

    let mut session = Session::new(config).unwrap();
    let world = ScriptedWorld::default();
    assert_eq!(session.director().enemies_alive(), 5);

    session.tick(3.0, &world);
    assert_eq!(session.enemy_count(), 5);
    assert!(!session.director().is_spawning());
    assert_eq!(session.director().enemies_alive(), 5);

    let enemies: Vec<ActorId> = session.live_enemies().collect();
    let mut bullets = fired_bullets(&session.drain_events());
    assert_eq!(bullets.len(), 3);

    for (bullet, enemy) in bullets.drain(..).zip(&enemies[..3]) {
        assert!(session.projectile_hit(bullet, &[*enemy])[0].defender_died);
    }
    assert_eq!(session.director().enemies_alive(), 2);

    session.tick(2.0, &world);
    let bullets = fired_bullets(&session.drain_events());
    assert_eq!(bullets.len(), 2);
    session.projectile_hit(bullets[0], &[enemies[3]]);
    assert_eq!(session.director().current_wave(), Some(0));

    session.projectile_hit(bullets[1], &[enemies[4]]);
    let events = session.drain_events();
    let cleared = events
        .iter()
        .filter(|e| matches!(e, SimEvent::WaveCleared { index: 0 }))
        .count();
    assert_eq!(cleared, 1);
    assert!(events.contains(&SimEvent::WaveStarted { index: 1 }));
    assert_eq!(session.director().current_wave(), Some(1));

    // A second report for a dead enemy changes nothing
    assert!(session.projectile_hit(bullets[1], &[enemies[4]]).is_empty());
    assert_eq!(session.run_stats().enemies_killed, 5);
    assert_eq!(session.wallet().balance(), 3 * 5 + 2 * 4);
}

/// Level 2 costs 100; 80 is not enough and nothing changes
#[test]
fn test_shop_costs_and_reroll_pricing() {
    let mut config = quiet_config(vec![wave(&[("melee", 1)]), wave(&[("melee", 1)])]);
    config.director.waves_per_shop = 1;
    config.shop.number_of_choices = 1;
    config.upgrades = vec![UpgradeData {
        id: "damage".into(),
        display_name: "Damage".into(),
        stat: Some("bulletDamage".into()),
        value_per_level: 5.0,
        base_cost: 50,
        cost_increase_per_level: 25,
        ..UpgradeData::default()
    }];

    let mut session = Session::new(config).unwrap();
    let world = ScriptedWorld::default();
    session.tick(0.0, &world);
    session.clear_wave();
    assert_eq!(session.outcome(), Outcome::ShopOpen);

    session.grant_currency(50);
    assert_eq!(session.purchase(0).map(|r| r.level), Ok(1));
    assert_eq!(session.purchase(0), Err(ShopError::AlreadyPurchased(0)));

    session.grant_currency(10);
    assert_eq!(session.shop_view().reroll_cost, 10);
    assert_eq!(session.reroll(), Ok(10));
    assert_eq!(session.shop_view().reroll_cost, 20);

    session.grant_currency(75);
    assert_eq!(session.purchase(0).map(|r| r.cost), Ok(75));
    assert_eq!(session.ledger().level("damage"), 2);

    session.grant_currency(20);
    assert_eq!(session.reroll(), Ok(20));
    assert_eq!(session.shop_view().offers[0].cost, 100);

    session.grant_currency(80);
    assert_eq!(
        session.purchase(0),
        Err(ShopError::InsufficientFunds { cost: 100, balance: 80 })
    );
    assert_eq!(session.ledger().level("damage"), 2);
    assert_eq!(session.wallet().balance(), 80);
    assert_eq!(session.player().sheet().block.attack_damage, 20.0);

    session.close_shop().unwrap();
    assert_eq!(session.close_shop(), Err(ShopError::NotOpen));
    assert_eq!(session.outcome(), Outcome::Running);
}

/// Ranged enemies shoot; the host reports the hit on the player
#[test]
fn test_ranged_shot_damages_player() {
    let mut session = Session::new(quiet_config(vec![wave(&[("ranged", 1)])])).unwrap();
    let mut world = ScriptedWorld::default();
    session.tick(0.0, &world);
    let enemy = session.live_enemies().next().unwrap();
    world.place(enemy, Vec3::new(0.0, 0.0, 6.0));

    // Still in the spawn animation, already in range
    session.tick(0.25, &world);
    assert_eq!(session.enemy_state(enemy), Some(AiState::Spawning));

    let shot = session
        .drain_events()
        .into_iter()
        .find_map(|e| match e {
            SimEvent::ProjectileFired { id, source, spawn } if spawn.kind == ProjectileKind::EnemyShot => {
                assert_eq!(source, enemy);
                assert_eq!(spawn.direction, Vec3::new(0.0, 0.0, -1.0));
                Some(id)
            }
            _ => None,
        })
        .unwrap();

    let player = session.player_id();
    let hits = session.projectile_hit(shot, &[player]);
    assert_eq!(hits[0].final_damage, 8);
    assert_eq!(session.player().block().current_health(), 92);
    assert!(session.drain_events().contains(&SimEvent::PlayerDamaged {
        amount: 8,
        health: 92,
        source: Some(enemy),
    }));
}

/// A melee strike, then regeneration ticks while the cooldown runs
#[test]
fn test_melee_strike_and_regen() {
    let mut config = quiet_config(vec![wave(&[("melee", 1)])]);
    config.player.health_regen_rate = 5.0;
    let mut session = Session::new(config).unwrap();
    let mut world = ScriptedWorld::default();
    session.tick(0.0, &world);
    let enemy = session.live_enemies().next().unwrap();
    world.place(enemy, Vec3::new(1.0, 0.0, 0.0));

    session.tick(0.25, &world);
    assert_eq!(session.player().block().current_health(), 85);
    assert!(session.drain_events().contains(&SimEvent::PlayerDamaged {
        amount: 15,
        health: 85,
        source: Some(enemy),
    }));

    session.tick(1.0, &world);
    assert_eq!(session.player().block().current_health(), 90);
    assert!(session
        .drain_events()
        .contains(&SimEvent::PlayerHealed { amount: 5, health: 90 }));
}

fn fired_skills(events: &[SimEvent]) -> Vec<ProjectileId> {
    events
        .iter()
        .filter_map(|e| match e {
            SimEvent::ProjectileFired { id, spawn, .. } if spawn.kind == ProjectileKind::Skill => Some(*id),
            _ => None,
        })
        .collect()
}

/// Skill shots fire one splash projectile per tick of the skill cooldown
fn skill_config(waves: Vec<WaveSpec>) -> SimConfig {
    let mut config = quiet_config(waves);
    config.player.skill_cooldown = 1.0;
    config.player.bullet_count = 1;
    config.player.block.crit_chance = 0.0;
    config
}

/// A defender listed several times in one splash report is hit once
#[test]
fn test_splash_hits_each_defender_once() {
    let mut session = Session::new(skill_config(vec![wave(&[("tank", 1)])])).unwrap();
    let world = ScriptedWorld::default();
    session.tick(0.0, &world);
    let tank = session.live_enemies().next().unwrap();
    let before = session.enemy_stats(tank).map(|s| s.current_health()).unwrap();

    session.tick(1.0, &world);
    let skills = fired_skills(&session.drain_events());
    assert_eq!(skills.len(), 1);

    let hits = session.projectile_hit(skills[0], &[tank, tank, tank]);
    assert_eq!(hits.len(), 1);
    assert_eq!(
        session.enemy_stats(tank).map(|s| s.current_health()),
        Some(before - hits[0].final_damage)
    );
    assert_eq!(session.run_stats().damage_dealt, hits[0].final_damage as i64);
}

/// One splash can kill several enemies; the wave clears once, on the last
#[test]
fn test_splash_kills_count_towards_wave() {
    let mut config = skill_config(vec![wave(&[("melee", 5)]), wave(&[("melee", 1)])]);
    config.player.block.attack_damage = 500.0;
    let mut session = Session::new(config).unwrap();
    let world = ScriptedWorld::default();
    session.tick(0.0, &world);
    session.tick(3.0, &world);
    assert!(!session.director().is_spawning());
    assert_eq!(session.director().enemies_alive(), 5);

    let enemies: Vec<ActorId> = session.live_enemies().collect();
    assert_eq!(enemies.len(), 5);
    let skills = fired_skills(&session.drain_events());
    assert_eq!(skills.len(), 3);

    let hits = session.projectile_hit(skills[0], &enemies[..3]);
    assert_eq!(hits.len(), 3);
    assert!(hits.iter().all(|h| h.defender_died));
    assert_eq!(session.director().enemies_alive(), 2);
    assert!(!session
        .drain_events()
        .iter()
        .any(|e| matches!(e, SimEvent::WaveCleared { .. })));

    // Already-dead enemies in the report are skipped
    let hits = session.projectile_hit(skills[1], &[enemies[3], enemies[0], enemies[4]]);
    assert_eq!(hits.len(), 2);
    let events = session.drain_events();
    let cleared = events
        .iter()
        .filter(|e| matches!(e, SimEvent::WaveCleared { index: 0 }))
        .count();
    assert_eq!(cleared, 1);
    assert!(events.contains(&SimEvent::WaveStarted { index: 1 }));
    assert_eq!(session.director().current_wave(), Some(1));
    assert_eq!(session.run_stats().enemies_killed, 5);
}

/// Clearing the final wave wins the run
#[test]
fn test_last_wave_wins() {
    let mut session = Session::new(quiet_config(vec![wave(&[("tank", 2)])])).unwrap();
    let world = ScriptedWorld::default();
    session.tick(0.0, &world);
    assert_eq!(session.enemy_count(), 1);

    session.clear_wave();
    assert_eq!(session.enemy_count(), 0);
    assert_eq!(session.outcome(), Outcome::Won);
    assert!(session.outcome().is_finished());

    let events = session.drain_events();
    assert!(events.contains(&SimEvent::AllWavesComplete));
    assert_eq!(session.wallet().balance(), 0);

    // The aborted spawn sequence never resumes
    assert_eq!(session.tick(5.0, &world), Outcome::Won);
    assert_eq!(session.enemy_count(), 0);
}

/// Unknown archetypes are skipped without stalling the wave
#[test]
fn test_unknown_archetype_is_skipped() {
    let mut session = Session::new(quiet_config(vec![wave(&[("artillery", 2)]), wave(&[("melee", 1)])])).unwrap();
    let world = ScriptedWorld::default();
    session.tick(0.0, &world);

    let events = session.drain_events();
    assert!(events.contains(&SimEvent::WaveCleared { index: 0 }));
    assert!(events.contains(&SimEvent::WaveStarted { index: 1 }));
}

/// Invalid upgrade data is rejected when the session is built
#[test]
fn test_invalid_upgrade_rejected() {
    let mut config = quiet_config(vec![wave(&[("melee", 1)])]);
    config.upgrades.push(UpgradeData {
        id: "lasers".into(),
        stat: Some("laserCount".into()),
        ..UpgradeData::default()
    });
    assert!(matches!(Session::new(config), Err(ConfigError::Upgrade(_))));
}

/// Same seed, same script, same events
#[test]
fn test_seeded_runs_are_deterministic() {
    let run = || {
        let config = SimConfig {
            seed: Some(2024),
            ..SimConfig::default()
        };
        let mut session = Session::new(config).unwrap();
        let world = ScriptedWorld::default();
        let mut events = Vec::new();
        for _ in 0..120 {
            session.tick(0.1, &world);
            events.extend(session.drain_events());
        }
        events
    };
    let first = run();
    assert!(!first.is_empty());
    assert_eq!(first, run());
}
