//! # Collision Engine
//!
//! A generic 3D narrow-phase collision detection engine with persistent
//! pairwise overlap tracking.
//!
//! ## Features
//!
//! - **Shape primitives**: spheres, axis-aligned boxes, and oriented boxes
//!   (SAT over 15 candidate axes)
//! - **Colliders**: per-entity shape configuration with world shapes derived
//!   from the owner's transform each frame
//! - **Collision world**: an explicitly owned registry keyed by generational
//!   handles, running the all-pairs narrow phase and firing Enter/Stay/Out
//!   events through a host capability trait
//!
//! ## Quick Start
//!
//! ```rust
//! use collision_engine::prelude::*;
//! use collision_engine::foundation::math::{Quat, Vec3};
//!
//! struct Host;
//!
//! impl ColliderHost for Host {
//!     fn center_position(&self, _key: ColliderKey) -> Vec3 {
//!         Vec3::zeros()
//!     }
//!     fn center_rotation(&self, _key: ColliderKey) -> Quat {
//!         Quat::identity()
//!     }
//!     // Enter/Stay/Out hooks default to no-ops; override what you need.
//! }
//!
//! let mut world = CollisionWorld::new();
//! let key = world.add_collider(Collider::new("player", ShapeKinds::SPHERE));
//! let mut host = Host;
//! world.update(&mut host);
//! assert!(!world.get(key).unwrap().is_colliding());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod collision;
pub mod config;
pub mod foundation;

/// Commonly used types, re-exported for convenience
pub mod prelude {
    pub use crate::collision::{
        Aabb, Collider, ColliderConfig, ColliderHost, ColliderKey, CollisionWorld, DebugDraw, Obb,
        ShapeKinds, Sphere,
    };
    pub use crate::config::{Config, ConfigError};
}
