use nalgebra::{Point3, Vector3};

use crate::geometries::GeometryGroup;

/// Errors from measuring the extents of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtentsError {
    /// None of the geometry groups has a single position.
    #[error("no geometry contains position data")]
    NoPositions,
}

/// Axis-aligned bounding box of a scene.
///
/// [`Extents::empty`] is the identity of [`Extents::union`]: its minimum is
/// positive infinity and its maximum negative infinity on every axis, so it
/// is the only kind of box for which `min > max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    /// Smallest coordinate on each axis.
    pub min: Point3<f32>,
    /// Largest coordinate on each axis.
    pub max: Point3<f32>,
}

impl Default for Extents {
    fn default() -> Self {
        Self::empty()
    }
}

impl Extents {
    /// The box containing nothing.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Whether the box contains no point at all.
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    /// Grows the box to contain `p`.
    #[inline]
    pub fn include(&mut self, p: &Point3<f32>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// The smallest box containing both `self` and `other`.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Scans a flat position array (3 floats per vertex). A trailing partial
    /// tuple is ignored.
    pub fn from_positions(positions: &[f32]) -> Self {
        positions.chunks_exact(3).fold(Self::empty(), |mut extents, p| {
            extents.include(&Point3::new(p[0], p[1], p[2]));
            extents
        })
    }

    /// Size of the box along each axis.
    pub fn range(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f32> {
        self.min + self.range() * 0.5
    }
}

/// Bounding box of every position of `geometries`.
///
/// Each group is reduced on its own, then the per-group boxes are folded
/// together. Returns [`Extents::empty`] if no group has positions; use
/// [`try_extents`] to get an error instead.
pub fn extents(geometries: &[GeometryGroup]) -> Extents {
    geometries
        .iter()
        .map(|geometry| Extents::from_positions(geometry.positions()))
        .fold(Extents::empty(), |scene, group| scene.union(&group))
}

/// Like [`extents`], but fails with [`ExtentsError::NoPositions`] instead of
/// returning an empty box.
pub fn try_extents(geometries: &[GeometryGroup]) -> Result<Extents, ExtentsError> {
    let extents = extents(geometries);

    if extents.is_empty() {
        Err(ExtentsError::NoPositions)
    } else {
        Ok(extents)
    }
}
