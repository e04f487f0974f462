//! Narrow-phase collision detection
//!
//! The engine is built from three layers, leaf to root:
//!
//! - [`primitives`] - Sphere / AABB / OBB value types and every pairwise
//!   overlap test (oriented boxes via the Separating Axis Theorem)
//! - [`collider`] - per-entity shape configuration and derived world shapes
//! - [`world`] - the owned registry that refreshes shapes each frame, runs
//!   the all-pairs narrow phase, and dispatches Enter/Stay/Out events
//!
//! # Frame protocol
//!
//! Everything is single-threaded and synchronous. Once per simulation frame
//! the owner calls [`CollisionWorld::update`] with its [`ColliderHost`], then
//! optionally [`CollisionWorld::draw`] with a [`DebugDraw`] delegate.

pub mod collider;
pub mod primitives;
pub mod world;

// Re-export commonly used types
pub use collider::{Collider, ColliderConfig, ShapeKinds};
pub use primitives::{Aabb, Obb, Sphere};
pub use world::{ColliderHost, ColliderKey, CollisionWorld, DebugDraw, PairKey};
