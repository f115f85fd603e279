//! Host queries

use bio_core::ActorId;
use bio_math::Vec3;
use bio_wave::GroundProbe;

/// Read-only view of the host's world, queried during `Session::tick`
pub trait WorldView {
    /// Player position, `None` when the player is missing
    fn player_position(&self) -> Option<Vec3>;

    /// Position of an enemy
    fn actor_position(&self, id: ActorId) -> Option<Vec3>;

    /// Whether the enemy can currently path (standing on the nav mesh)
    fn is_navigable(&self, _id: ActorId) -> bool {
        true
    }

    /// Nearest navigable point within `radius` of `point`
    fn sample_ground(&self, point: Vec3, _radius: f32) -> Option<Vec3> {
        Some(point)
    }

    /// Aim vector for directional aiming
    fn aim_direction(&self) -> Option<Vec3> {
        None
    }
}

/// Adapts a `WorldView` to the director's ground probe
pub(crate) struct WorldProbe<'a, W: ?Sized>(pub &'a W);

impl<W: WorldView + ?Sized> GroundProbe for WorldProbe<'_, W> {
    fn sample_ground(&self, point: Vec3, radius: f32) -> Option<Vec3> {
        self.0.sample_ground(point, radius)
    }
}
