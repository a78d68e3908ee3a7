use nalgebra::{Point3, Vector3};

use super::Extents;

/// Camera placement that keeps a whole scene in view, derived from its
/// [`Extents`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneFraming {
    /// The center of the scene, which the camera looks at.
    pub target: Point3<f32>,
    /// The camera position: `target` moved back along +z by `radius`.
    pub eye: Point3<f32>,
    /// Translation that moves the scene's center to the origin.
    pub offset: Vector3<f32>,
    /// Distance from the camera to the target, slightly larger than the
    /// scene's diagonal.
    pub radius: f32,
    /// The near plane of the camera frustum. Must be greater than `0.0` and
    /// less than [`far`](Self::far) for a useful projection.
    pub near: f32,
    /// The far plane of the camera frustum.
    pub far: f32,
}

impl SceneFraming {
    /// Ratio between the camera distance and the scene's diagonal.
    pub const RADIUS_SCALE: f32 = 1.2;
    /// The near plane sits at `radius / NEAR_DIVISOR`.
    pub const NEAR_DIVISOR: f32 = 100.0;
    /// The far plane sits at `radius * FAR_SCALE`.
    pub const FAR_SCALE: f32 = 3.0;

    /// Frames the given extents. Returns `None` for an empty box.
    ///
    /// A box of a single point has a radius of zero, and so do its near and
    /// far planes.
    pub fn from_extents(extents: &Extents) -> Option<Self> {
        if extents.is_empty() {
            return None;
        }

        let target = extents.center();
        let radius = extents.range().norm() * Self::RADIUS_SCALE;

        Some(Self {
            target,
            eye: target + Vector3::z() * radius,
            offset: -target.coords,
            radius,
            near: radius / Self::NEAR_DIVISOR,
            far: radius * Self::FAR_SCALE,
        })
    }
}
