//! Player auto-fire: bullet fans, skill rings and aiming

use crate::damage::outgoing_damage;
use crate::projectile::{ProjectileKind, ProjectilePayload, ProjectileSpawn};
use bio_core::Timer;
use bio_math::Vec3;
use bio_stats::PlayerSheet;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Angle between neighbouring bullets in a fan
pub const FAN_STEP_DEGREES: f32 = 15.0;
/// Distance from the player at which shots appear
pub const MUZZLE_OFFSET: f32 = 1.5;
/// Skill shot damage relative to bullet damage
pub const SKILL_DAMAGE_MULTIPLIER: f32 = 1.5;
/// Skill shot splash radius
pub const SKILL_SPLASH_RADIUS: f32 = 2.0;

/// How the player picks a shooting direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AimMode {
    /// Closest live enemy within shooting range
    #[default]
    ClosestEnemy,
    /// Direction supplied by the host (mouse, stick)
    Directional,
}

impl AimMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Self::ClosestEnemy => Self::Directional,
            Self::Directional => Self::ClosestEnemy,
        }
    }
}

/// Volleys due this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Volleys {
    pub bullets: u32,
    pub skills: u32,
}

impl Volleys {
    /// Whether nothing fires
    pub fn is_empty(&self) -> bool {
        self.bullets == 0 && self.skills == 0
    }
}

/// The player's two fire timers plus aim mode
#[derive(Debug, Clone)]
pub struct WeaponRig {
    bullet_timer: Timer,
    skill_timer: Timer,
    aim_mode: AimMode,
}

impl WeaponRig {
    /// Create a rig with intervals taken from `sheet`
    pub fn new(sheet: &PlayerSheet) -> Self {
        Self {
            bullet_timer: Timer::new(sheet.bullet_cooldown),
            skill_timer: Timer::new(sheet.skill_cooldown),
            aim_mode: AimMode::default(),
        }
    }

    /// Current aim mode
    pub fn aim_mode(&self) -> AimMode {
        self.aim_mode
    }

    /// Set aim mode
    pub fn set_aim_mode(&mut self, mode: AimMode) {
        self.aim_mode = mode;
    }

    /// Switch aim mode, returning the new one
    pub fn toggle_aim_mode(&mut self) -> AimMode {
        self.aim_mode = self.aim_mode.toggled();
        log::info!("Aim mode: {:?}", self.aim_mode);
        self.aim_mode
    }

    /// Advance both timers. Intervals follow the sheet, so a cooldown
    /// upgrade takes effect on the next tick.
    pub fn tick(&mut self, sheet: &PlayerSheet, dt: f32) -> Volleys {
        self.bullet_timer.set_interval(sheet.bullet_cooldown);
        self.skill_timer.set_interval(sheet.skill_cooldown);
        Volleys {
            bullets: self.bullet_timer.tick(dt),
            skills: self.skill_timer.tick(dt),
        }
    }

    /// Restart both timers
    pub fn reset(&mut self) {
        self.bullet_timer.reset();
        self.skill_timer.reset();
    }
}

/// Pick the planar shooting direction.
///
/// `ClosestEnemy` aims at the nearest target strictly inside `range`, or a
/// random ground direction when none is. `Directional` uses `host_aim`.
pub fn resolve_aim(
    mode: AimMode,
    origin: Vec3,
    targets: impl IntoIterator<Item = Vec3>,
    range: f32,
    host_aim: Option<Vec3>,
    rng: &mut impl Rng,
) -> Vec3 {
    match mode {
        AimMode::ClosestEnemy => {
            let closest = targets
                .into_iter()
                .map(|p| (origin.distance(p), p))
                .filter(|(d, _)| *d < range)
                .min_by(|a, b| a.0.total_cmp(&b.0));
            let dir = match closest {
                Some((_, p)) => (p - origin).flatten().normalize_or_zero(),
                None => Vec3::from_heading(rng.gen_range(0.0f32..360.0)),
            };
            if dir.is_zero() {
                Vec3::Z
            } else {
                dir
            }
        }
        AimMode::Directional => {
            let dir = host_aim.unwrap_or(Vec3::Z).flatten().normalize_or_zero();
            if dir.is_zero() {
                Vec3::Z
            } else {
                dir
            }
        }
    }
}

/// One bullet volley: `bullet_count` bullets spaced `FAN_STEP_DEGREES`
/// apart, centred on `aim`. Each bullet rolls its own crit.
pub fn bullet_fan(origin: Vec3, aim: Vec3, sheet: &PlayerSheet, rng: &mut impl Rng) -> Vec<ProjectileSpawn> {
    let count = sheet.bullet_count.max(0);
    let start = -((count - 1) as f32 / 2.0) * FAN_STEP_DEGREES;
    (0..count)
        .map(|i| {
            let dir = aim.rotate_y(start + i as f32 * FAN_STEP_DEGREES);
            ProjectileSpawn::new(
                ProjectileKind::Bullet,
                origin + dir * MUZZLE_OFFSET,
                dir,
                sheet.bullet_speed,
                ProjectilePayload::new(outgoing_damage(&sheet.block, rng)),
            )
        })
        .collect()
}

/// One skill ring: `bullet_count` splash shots evenly spaced over a full
/// circle starting at +X.
pub fn skill_ring(origin: Vec3, sheet: &PlayerSheet, rng: &mut impl Rng) -> Vec<ProjectileSpawn> {
    let count = sheet.bullet_count.max(0);
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f32;
    (0..count)
        .map(|i| {
            let dir = Vec3::from_heading(i as f32 * step);
            let damage = outgoing_damage(&sheet.block, rng).scaled(SKILL_DAMAGE_MULTIPLIER);
            ProjectileSpawn::new(
                ProjectileKind::Skill,
                origin + dir * MUZZLE_OFFSET,
                dir,
                sheet.skill_speed,
                ProjectilePayload::new(damage).with_splash(SKILL_SPLASH_RADIUS),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn test_rig_fires_on_cooldowns() {
        let sheet = PlayerSheet::default();
        let mut rig = WeaponRig::new(&sheet);

        assert!(rig.tick(&sheet, 1.5).is_empty());
        let volleys = rig.tick(&sheet, 0.5);
        assert_eq!(volleys.bullets, 1);
        assert_eq!(volleys.skills, 0);

        let volleys = rig.tick(&sheet, 3.0);
        assert_eq!(volleys.bullets, 1);
        assert_eq!(volleys.skills, 1);
    }

    #[test]
    fn test_cooldown_upgrade_applies_next_tick() {
        let mut sheet = PlayerSheet::default();
        let mut rig = WeaponRig::new(&sheet);
        sheet.bullet_cooldown = 0.5;
        assert_eq!(rig.tick(&sheet, 1.0).bullets, 2);
    }

    #[test]
    fn test_aim_mode_toggle() {
        let mut rig = WeaponRig::new(&PlayerSheet::default());
        assert_eq!(rig.aim_mode(), AimMode::ClosestEnemy);
        assert_eq!(rig.toggle_aim_mode(), AimMode::Directional);
        assert_eq!(rig.toggle_aim_mode(), AimMode::ClosestEnemy);
    }

    #[test]
    fn test_aim_closest_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let targets = [Vec3::new(8.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 4.0), Vec3::new(-30.0, 0.0, 0.0)];
        let dir = resolve_aim(AimMode::ClosestEnemy, Vec3::ZERO, targets, 10.0, None, &mut rng);
        assert!(close(dir, Vec3::Z));
    }

    #[test]
    fn test_aim_falls_back_to_random_planar() {
        let mut rng = StdRng::seed_from_u64(3);
        let dir = resolve_aim(
            AimMode::ClosestEnemy,
            Vec3::ZERO,
            [Vec3::new(10.0, 0.0, 0.0)],
            10.0,
            None,
            &mut rng,
        );
        assert_eq!(dir.y, 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_aim_directional() {
        let mut rng = StdRng::seed_from_u64(3);
        let dir = resolve_aim(
            AimMode::Directional,
            Vec3::ZERO,
            std::iter::empty(),
            10.0,
            Some(Vec3::new(-2.0, 5.0, 0.0)),
            &mut rng,
        );
        assert!(close(dir, -Vec3::X));
        let dir = resolve_aim(AimMode::Directional, Vec3::ZERO, std::iter::empty(), 10.0, None, &mut rng);
        assert!(close(dir, Vec3::Z));
    }

    #[test]
    fn test_bullet_fan_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sheet = PlayerSheet::default();
        sheet.bullet_count = 3;
        let fan = bullet_fan(Vec3::ZERO, Vec3::Z, &sheet, &mut rng);
        assert_eq!(fan.len(), 3);
        assert!(close(fan[1].direction, Vec3::Z));
        assert!(close(fan[0].direction, Vec3::Z.rotate_y(-15.0)));
        assert!(close(fan[2].direction, Vec3::Z.rotate_y(15.0)));
        assert!(close(fan[1].origin, Vec3::Z * 1.5));
        assert!(fan.iter().all(|b| b.kind == ProjectileKind::Bullet && b.speed == 10.0));
    }

    #[test]
    fn test_skill_ring() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sheet = PlayerSheet::default();
        sheet.block.crit_chance = 0.0;
        sheet.bullet_count = 4;
        let ring = skill_ring(Vec3::ZERO, &sheet, &mut rng);
        assert_eq!(ring.len(), 4);
        assert!(close(ring[0].direction, Vec3::X));
        assert!(close(ring[1].direction, Vec3::Z));
        assert!(ring.iter().all(|s| s.payload.damage.final_amount() == 15.0));
        assert!(ring.iter().all(|s| s.payload.splash_radius == 2.0));

        sheet.bullet_count = 0;
        assert!(skill_ring(Vec3::ZERO, &sheet, &mut rng).is_empty());
        assert!(bullet_fan(Vec3::ZERO, Vec3::Z, &sheet, &mut rng).is_empty());
    }
}
