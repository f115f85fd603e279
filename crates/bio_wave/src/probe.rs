//! Spawn-point validation

use bio_math::Vec3;
use rand::Rng;

/// Host query: nearest navigable ground point within `radius` of `point`
pub trait GroundProbe {
    fn sample_ground(&self, point: Vec3, radius: f32) -> Option<Vec3>;
}

/// Ground that is navigable everywhere
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGround;

impl GroundProbe for OpenGround {
    fn sample_ground(&self, point: Vec3, _radius: f32) -> Option<Vec3> {
        Some(point)
    }
}

/// Pick a random point from `points` that resolves to ground, lifted by
/// `height_offset`. Gives up after `attempts` draws.
pub fn pick_spawn_point<P, R>(
    points: &[Vec3],
    probe: &P,
    attempts: u32,
    radius: f32,
    height_offset: f32,
    rng: &mut R,
) -> Option<Vec3>
where
    P: GroundProbe + ?Sized,
    R: Rng,
{
    if points.is_empty() {
        log::error!("No spawn points configured in wave!");
        return None;
    }
    for _ in 0..attempts {
        let candidate = points[rng.gen_range(0..points.len())];
        if let Some(ground) = probe.sample_ground(candidate, radius) {
            return Some(ground + Vec3::Y * height_offset);
        }
    }
    log::warn!("No valid spawn point found after {} attempts", attempts);
    None
}
