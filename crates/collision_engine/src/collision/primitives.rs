//! Primitive collision shapes and intersection tests
//!
//! Provides the three world-space shapes the engine tests against each other
//! (spheres, axis-aligned boxes, oriented boxes) together with every pairwise
//! overlap test. All tests are total boolean functions: no error paths, no
//! panics, and inclusive comparisons so that exactly-touching shapes count
//! as colliding.

use crate::foundation::math::{Mat4, Point3, Quat, Vec3};

/// Axes with a squared length below this are skipped during SAT testing
/// (near-parallel edge cross products) or substituted during axis derivation.
const AXIS_EPSILON: f32 = 1e-6;

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl Sphere {
    /// Creates a new sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    ///
    /// Compares squared distances, so no square root is taken. Touching
    /// surfaces (distance exactly equal to the radius sum) count as a hit.
    pub fn intersects(&self, other: &Sphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }
}

/// An axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given half-extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB intersects another AABB
    ///
    /// Inclusive on the boundary: two boxes sharing a face collide.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Check if this AABB intersects a sphere
    ///
    /// Clamps the sphere center into the box and compares the squared
    /// distance to the clamped point against the squared radius.
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        let closest = Vec3::new(
            sphere.center.x.clamp(self.min.x, self.max.x),
            sphere.center.y.clamp(self.min.y, self.max.y),
            sphere.center.z.clamp(self.min.z, self.max.z),
        );
        let distance_squared = (sphere.center - closest).magnitude_squared();
        distance_squared <= sphere.radius * sphere.radius
    }
}

/// An oriented bounding box in world space
///
/// Defined by three unit orientation axes and per-axis half-extents. The
/// rotated center offset is kept alongside the final center so the box can be
/// reconstructed relative to its owner's pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    /// World-space center of the box
    pub center: Vec3,
    /// The configured center offset after rotation by the owner's world rotation
    pub rotated_center_offset: Vec3,
    /// Unit orientation axes (local x, y, z in world space)
    pub axes: [Vec3; 3],
    /// Half-extents along each orientation axis
    pub half_size: Vec3,
}

impl Obb {
    /// Creates a new OBB
    pub fn new(center: Vec3, rotated_center_offset: Vec3, axes: [Vec3; 3], half_size: Vec3) -> Self {
        Self {
            center,
            rotated_center_offset,
            axes,
            half_size,
        }
    }

    /// Derive orientation axes from a world rotation
    ///
    /// The axes are the canonical basis rotated by `rotation`, run through
    /// [`sanitized_axes`] so that a degenerate axis from upstream data falls
    /// back to its canonical counterpart.
    pub fn axes_from_rotation(rotation: &Quat) -> [Vec3; 3] {
        sanitized_axes([
            rotation * Vec3::x(),
            rotation * Vec3::y(),
            rotation * Vec3::z(),
        ])
    }

    /// Projected half-width of this box onto an arbitrary axis
    pub fn projected_radius(&self, axis: &Vec3) -> f32 {
        axis.dot(&self.axes[0]).abs() * self.half_size.x
            + axis.dot(&self.axes[1]).abs() * self.half_size.y
            + axis.dot(&self.axes[2]).abs() * self.half_size.z
    }

    /// The box expressed in its own local frame
    ///
    /// Axes map to the canonical basis, so the local box is an AABB centered
    /// at the origin with the same half-extents.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_center_extents(Vec3::zeros(), self.half_size)
    }

    /// World matrix of the box: columns are the orientation axes, translation
    /// is the box center.
    pub fn world_matrix(&self) -> Mat4 {
        let mut matrix = Mat4::identity();
        matrix.fixed_view_mut::<3, 1>(0, 0).copy_from(&self.axes[0]);
        matrix.fixed_view_mut::<3, 1>(0, 1).copy_from(&self.axes[1]);
        matrix.fixed_view_mut::<3, 1>(0, 2).copy_from(&self.axes[2]);
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.center);
        matrix
    }

    /// Check if this OBB intersects another OBB
    ///
    /// Separating Axis Theorem over 15 candidate axes: the 3 face axes of
    /// each box plus the 9 pairwise edge cross products. Cross products of
    /// near-parallel edges are skipped rather than treated as separating or
    /// overlapping.
    pub fn intersects(&self, other: &Obb) -> bool {
        let delta = other.center - self.center;

        for axis in &self.axes {
            if separated_on_axis(axis, &delta, self, other) {
                return false;
            }
        }
        for axis in &other.axes {
            if separated_on_axis(axis, &delta, self, other) {
                return false;
            }
        }
        for a in &self.axes {
            for b in &other.axes {
                let axis = a.cross(b);
                if axis.magnitude_squared() < AXIS_EPSILON {
                    continue;
                }
                if separated_on_axis(&axis, &delta, self, other) {
                    return false;
                }
            }
        }

        true
    }

    /// Check if this OBB intersects an AABB
    ///
    /// Same 15-axis SAT as the OBB-OBB test, with the AABB contributing the
    /// canonical basis axes and its own half-extents.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let extents = aabb.extents();
        let delta = aabb.center() - self.center;
        let basis = [Vec3::x(), Vec3::y(), Vec3::z()];

        for axis in &basis {
            if separated_on_axis_mixed(axis, &delta, self, &extents) {
                return false;
            }
        }
        for axis in &self.axes {
            if separated_on_axis_mixed(axis, &delta, self, &extents) {
                return false;
            }
        }
        for a in &self.axes {
            for b in &basis {
                let axis = a.cross(b);
                if axis.magnitude_squared() < AXIS_EPSILON {
                    continue;
                }
                if separated_on_axis_mixed(&axis, &delta, self, &extents) {
                    return false;
                }
            }
        }

        true
    }

    /// Check if this OBB intersects a sphere
    ///
    /// Transforms the sphere center into the box's local frame (inverse of
    /// the world matrix), then reuses the AABB-sphere test against the local
    /// box. A non-invertible world matrix means the orientation axes have
    /// collapsed; no local frame exists, so nothing can be tested.
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        let Some(inverse) = self.world_matrix().try_inverse() else {
            return false;
        };
        let local_center = inverse.transform_point(&Point3::from(sphere.center));
        self.local_aabb()
            .intersects_sphere(&Sphere::new(local_center.coords, sphere.radius))
    }
}

/// Normalize a candidate orientation basis
///
/// A near-zero axis (collapsed by bad upstream data) is substituted with the
/// corresponding canonical basis axis rather than normalized; everything else
/// is normalized to unit length. The substitution is the documented fallback
/// for degenerate orientations, not a silent repair of the input.
pub fn sanitized_axes(axes: [Vec3; 3]) -> [Vec3; 3] {
    let basis = [Vec3::x(), Vec3::y(), Vec3::z()];
    let mut out = axes;
    for (axis, fallback) in out.iter_mut().zip(basis) {
        if axis.magnitude_squared() < AXIS_EPSILON {
            *axis = fallback;
        } else {
            *axis = axis.normalize();
        }
    }
    out
}

/// Project an AABB's half-extents onto an arbitrary axis
fn aabb_projected_radius(extents: &Vec3, axis: &Vec3) -> f32 {
    axis.x.abs() * extents.x + axis.y.abs() * extents.y + axis.z.abs() * extents.z
}

/// SAT axis test for two OBBs; `true` means the axis separates them.
///
/// The axis need not be normalized: both projections and the center distance
/// scale by the same factor. Inclusive comparison, so touching projections do
/// not separate.
fn separated_on_axis(axis: &Vec3, delta: &Vec3, a: &Obb, b: &Obb) -> bool {
    let distance = delta.dot(axis).abs();
    distance > a.projected_radius(axis) + b.projected_radius(axis)
}

/// SAT axis test for an OBB against AABB half-extents
fn separated_on_axis_mixed(axis: &Vec3, delta: &Vec3, obb: &Obb, extents: &Vec3) -> bool {
    let distance = delta.dot(axis).abs();
    distance > obb.projected_radius(axis) + aabb_projected_radius(extents, axis)
}
