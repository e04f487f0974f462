//! Collider configuration and per-frame world shapes
//!
//! A [`Collider`] owns the shape configuration for one entity (radius,
//! extents, center offsets) and the world-space shapes derived from it. The
//! owning entity never holds shape math itself: it pushes its world transform
//! in through [`Collider::update_world_shapes`] each frame and reads the
//! collision flags back out.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::{Quat, Vec3, Vec4};

use super::primitives::{Aabb, Obb, Sphere};

bitflags::bitflags! {
    /// Which shape representations a collider carries
    ///
    /// A collider may carry any combination; the world picks the test to run
    /// per pair from the kinds both sides have in common.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShapeKinds: u8 {
        /// Bounding sphere representation
        const SPHERE = 1 << 0;
        /// Axis-aligned box representation
        const AABB = 1 << 1;
        /// Oriented box representation
        const OBB = 1 << 2;
    }
}

/// Static offset configuration for a collider's shapes
///
/// This is the part of a collider that is persisted: it is loaded and saved
/// through the [`Config`] hook keyed by the collider's unique name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderConfig {
    /// Sphere radius
    pub radius: f32,
    /// Sphere center offset from the owner's position (rotated by the owner)
    pub sphere_offset: Vec3,
    /// AABB half-extents
    pub aabb_extents: Vec3,
    /// AABB center offset from the owner's position (not rotated; the box
    /// stays axis-aligned)
    pub aabb_offset: Vec3,
    /// OBB half-extents along its orientation axes
    pub obb_size: Vec3,
    /// OBB center offset from the owner's position (rotated by the owner)
    pub obb_center: Vec3,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            sphere_offset: Vec3::zeros(),
            aabb_extents: Vec3::new(1.0, 1.0, 1.0),
            aabb_offset: Vec3::zeros(),
            obb_size: Vec3::new(1.0, 1.0, 1.0),
            obb_center: Vec3::zeros(),
        }
    }
}

impl Config for ColliderConfig {}

/// Debug color for a collider that did not collide last frame
pub const COLOR_IDLE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
/// Debug color for a collider that collided last frame
pub const COLOR_HIT: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

/// One entity's collision participant
///
/// World shapes are only valid after [`Collider::update_world_shapes`] ran
/// for the current frame; a disabled collider is not refreshed and keeps
/// whatever shapes it had when it was disabled.
#[derive(Debug, Clone)]
pub struct Collider {
    name: String,
    kinds: ShapeKinds,
    enabled: bool,
    visible: bool,

    is_colliding: bool,
    was_colliding: bool,
    colliding_this_frame: bool,
    debug_color: Vec4,

    config: ColliderConfig,

    sphere: Sphere,
    aabb: Aabb,
    obb: Obb,
}

impl Collider {
    /// Create a collider with the given name and active shape kinds
    ///
    /// World shapes start centered at the origin until the first refresh.
    pub fn new(name: impl Into<String>, kinds: ShapeKinds) -> Self {
        let config = ColliderConfig::default();
        Self {
            name: name.into(),
            kinds,
            enabled: true,
            visible: true,
            is_colliding: false,
            was_colliding: false,
            colliding_this_frame: false,
            debug_color: COLOR_IDLE,
            sphere: Sphere::new(Vec3::zeros(), config.radius),
            aabb: Aabb::from_center_extents(Vec3::zeros(), config.aabb_extents),
            obb: Obb::new(
                Vec3::zeros(),
                Vec3::zeros(),
                [Vec3::x(), Vec3::y(), Vec3::z()],
                config.obb_size,
            ),
            config,
        }
    }

    /// Create a collider from a persisted offset configuration
    pub fn with_config(name: impl Into<String>, kinds: ShapeKinds, config: ColliderConfig) -> Self {
        let mut collider = Self::new(name, kinds);
        collider.config = config;
        collider
    }

    /// The collider's registered name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Which shape representations are active
    pub fn kinds(&self) -> ShapeKinds {
        self.kinds
    }

    /// Mark which shape representations are active
    pub fn set_shape_kinds(&mut self, kinds: ShapeKinds) {
        self.kinds = kinds;
    }

    /// Toggle test participation without destroying the collider
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether this collider participates in tests
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle debug visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether this collider should be debug drawn
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set the sphere radius
    pub fn set_radius(&mut self, radius: f32) {
        self.config.radius = radius;
    }

    /// Set the sphere center offset
    pub fn set_sphere_offset(&mut self, offset: Vec3) {
        self.config.sphere_offset = offset;
    }

    /// Set the AABB half-extents
    pub fn set_aabb_extents(&mut self, extents: Vec3) {
        self.config.aabb_extents = extents;
    }

    /// Set the AABB center offset
    pub fn set_aabb_offset(&mut self, offset: Vec3) {
        self.config.aabb_offset = offset;
    }

    /// Set the OBB half-extents
    pub fn set_obb_size(&mut self, size: Vec3) {
        self.config.obb_size = size;
    }

    /// Set the OBB center offset
    pub fn set_obb_center(&mut self, center: Vec3) {
        self.config.obb_center = center;
    }

    /// The persisted offset configuration
    pub fn config(&self) -> &ColliderConfig {
        &self.config
    }

    /// Replace the offset configuration (e.g. after loading it by name)
    pub fn set_config(&mut self, config: ColliderConfig) {
        self.config = config;
    }

    /// Whether any pair test hit this collider this frame
    pub fn is_colliding(&self) -> bool {
        self.is_colliding
    }

    /// Whether any pair test hit this collider last frame
    pub fn was_colliding(&self) -> bool {
        self.was_colliding
    }

    /// Current debug color (derived from last frame's collision flag)
    pub fn debug_color(&self) -> Vec4 {
        self.debug_color
    }

    /// Current world-space sphere
    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    /// Current world-space AABB
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Current world-space OBB
    pub fn obb(&self) -> &Obb {
        &self.obb
    }

    /// Recompute this frame's world shapes from the owner's transform
    ///
    /// The sphere and OBB center offsets rotate with the owner; the AABB
    /// offset does not, since the box must stay axis-aligned. OBB axes are
    /// the canonical basis rotated by the owner's world rotation.
    pub fn update_world_shapes(&mut self, position: Vec3, rotation: Quat) {
        self.sphere = Sphere::new(
            position + rotation * self.config.sphere_offset,
            self.config.radius,
        );
        self.aabb = Aabb::from_center_extents(
            position + self.config.aabb_offset,
            self.config.aabb_extents,
        );
        let rotated_offset = rotation * self.config.obb_center;
        self.obb = Obb::new(
            position + rotated_offset,
            rotated_offset,
            Obb::axes_from_rotation(&rotation),
            self.config.obb_size,
        );
    }

    /// Roll per-frame flags at the start of an update
    ///
    /// Debug color is taken from the flag before it is cleared, so it shows
    /// the last-known collision state for the whole frame.
    pub(crate) fn begin_frame(&mut self) {
        self.debug_color = if self.colliding_this_frame {
            COLOR_HIT
        } else {
            COLOR_IDLE
        };
        self.was_colliding = self.colliding_this_frame;
        self.colliding_this_frame = false;
        self.is_colliding = false;
    }

    pub(crate) fn mark_colliding(&mut self) {
        self.is_colliding = true;
        self.colliding_this_frame = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn world_shapes_follow_transform_and_offsets() {
        let mut collider = Collider::new("probe", ShapeKinds::all());
        collider.set_radius(0.5);
        collider.set_sphere_offset(Vec3::new(0.0, 1.0, 0.0));
        collider.set_aabb_extents(Vec3::new(1.0, 2.0, 3.0));
        collider.set_obb_size(Vec3::new(0.5, 0.5, 0.5));
        collider.set_obb_center(Vec3::new(1.0, 0.0, 0.0));

        // Quarter turn about z: +x maps to +y
        let rotation = Quat::from_euler_angles(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        let position = Vec3::new(10.0, 0.0, 0.0);
        collider.update_world_shapes(position, rotation);

        // Sphere offset rotates with the owner: (0,1,0) -> (-1,0,0)
        assert_relative_eq!(collider.sphere().center.x, 9.0, epsilon = 1e-5);
        assert_relative_eq!(collider.sphere().center.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(collider.sphere().radius, 0.5);

        // AABB offset does not rotate
        assert_relative_eq!(collider.aabb().center().x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(collider.aabb().extents().y, 2.0, epsilon = 1e-5);

        // OBB center offset rotates: (1,0,0) -> (0,1,0)
        assert_relative_eq!(collider.obb().center.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(collider.obb().center.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(collider.obb().rotated_center_offset.y, 1.0, epsilon = 1e-5);

        // First orientation axis is the rotated +x
        assert_relative_eq!(collider.obb().axes[0].y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn begin_frame_rolls_flags_and_debug_color() {
        let mut collider = Collider::new("probe", ShapeKinds::SPHERE);
        collider.mark_colliding();
        assert!(collider.is_colliding());

        collider.begin_frame();
        assert!(!collider.is_colliding());
        assert!(collider.was_colliding());
        assert_eq!(collider.debug_color(), COLOR_HIT);

        collider.begin_frame();
        assert!(!collider.was_colliding());
        assert_eq!(collider.debug_color(), COLOR_IDLE);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = ColliderConfig::default();
        config.radius = 2.5;
        config.obb_center = Vec3::new(0.0, 0.5, 0.0);

        let path = std::env::temp_dir().join("collision_engine_collider_config_test.toml");
        let path = path.to_string_lossy().into_owned();
        config.save_to_file(&path).expect("save config");
        let loaded = ColliderConfig::load_from_file(&path).expect("load config");
        assert_eq!(config, loaded);
        let _ = std::fs::remove_file(&path);
    }
}
