//! Collision world: collider registry, pair state, and event dispatch
//!
//! The world owns every registered [`Collider`] in a slot map and is passed
//! by reference into the per-frame driver; there is no process-wide state.
//! Generational keys stand in for the colliders everywhere else: pair state
//! is keyed by sorted key pairs, and the host resolves keys back to its own
//! entities when transforms are queried or events are delivered.

use std::collections::HashMap;

use log::{debug, trace};
use slotmap::SlotMap;

use crate::foundation::math::{Mat4, Quat, Vec3};

use super::collider::{Collider, ShapeKinds};

slotmap::new_key_type! {
    /// Stable generational handle to a registered collider
    pub struct ColliderKey;
}

/// Unordered pair of collider keys, stored sorted for stable hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey {
    a: ColliderKey,
    b: ColliderKey,
}

impl PairKey {
    /// Create a pair key (always stores the smaller key first for consistency)
    pub fn new(a: ColliderKey, b: ColliderKey) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    /// Whether either side of the pair is the given key
    pub fn involves(&self, key: ColliderKey) -> bool {
        self.a == key || self.b == key
    }
}

/// Capability interface the owning side implements for its colliders
///
/// Transforms are pulled per key during the refresh phase; the three event
/// hooks are delivered during pair checking, once per side of each pair, and
/// default to no-ops.
pub trait ColliderHost {
    /// World-space center position of the entity owning `key`
    fn center_position(&self, key: ColliderKey) -> Vec3;

    /// World-space rotation of the entity owning `key`
    fn center_rotation(&self, key: ColliderKey) -> Quat;

    /// A pair containing `key` started overlapping this frame
    fn on_collision_enter(&mut self, _key: ColliderKey, _other: ColliderKey) {}

    /// A pair containing `key` is overlapping this frame
    fn on_collision(&mut self, _key: ColliderKey, _other: ColliderKey) {}

    /// A pair containing `key` stopped overlapping this frame
    fn on_collision_out(&mut self, _key: ColliderKey, _other: ColliderKey) {}
}

/// Debug-draw delegate; rendering itself lives outside this crate
pub trait DebugDraw {
    /// Draw one collider's shapes with the given view-projection matrix
    fn draw_collider(&mut self, collider: &Collider, view_projection: &Mat4);
}

/// Registry and dispatcher for all active colliders
///
/// Per frame the owner calls [`CollisionWorld::update`], which refreshes the
/// world shapes of every enabled collider and then runs the all-pairs
/// narrow phase, firing Enter/Stay/Out events through the host.
#[derive(Default)]
pub struct CollisionWorld {
    colliders: SlotMap<ColliderKey, Collider>,
    names: HashMap<String, ColliderKey>,
    pair_states: HashMap<PairKey, bool>,
}

impl CollisionWorld {
    /// Create an empty collision world
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collider under a unique name
    ///
    /// If the requested name is taken, the smallest free positive integer
    /// suffix is appended (`body`, `body1`, `body2`, ...).
    pub fn add_collider(&mut self, mut collider: Collider) -> ColliderKey {
        let requested = collider.name().to_string();
        let mut name = requested.clone();
        let mut suffix = 0u32;
        while self.names.contains_key(&name) {
            suffix += 1;
            name = format!("{requested}{suffix}");
        }
        collider.set_name(name.clone());

        let key = self.colliders.insert(collider);
        self.names.insert(name.clone(), key);
        debug!("registered collider '{name}' ({key:?})");
        key
    }

    /// Remove a collider by key
    ///
    /// Frees the collider's name and invalidates every pair-state entry
    /// involving the key, so a recycled slot can never inherit stale state.
    pub fn remove_collider(&mut self, key: ColliderKey) -> Option<Collider> {
        let collider = self.colliders.remove(key)?;
        self.names.remove(collider.name());
        self.pair_states.retain(|pair, _| !pair.involves(key));
        debug!("removed collider '{}' ({key:?})", collider.name());
        Some(collider)
    }

    /// Clear the collider registry (e.g. on scene teardown)
    ///
    /// Pair states are intentionally left in place: generational keys are
    /// never handed out again, so the stale entries are unreachable by any
    /// future collider.
    pub fn reset(&mut self) {
        debug!("collision world reset ({} colliders dropped)", self.colliders.len());
        self.colliders.clear();
        self.names.clear();
    }

    /// Per-frame driver: refresh world shapes, then test all pairs
    pub fn update(&mut self, host: &mut impl ColliderHost) {
        let keys: Vec<ColliderKey> = self.colliders.keys().collect();

        // Phase 1: refresh enabled colliders from the host's transforms.
        // Disabled colliders keep stale shapes and stale flags.
        for &key in &keys {
            let Some(collider) = self.colliders.get_mut(key) else {
                continue;
            };
            if !collider.is_enabled() {
                continue;
            }
            collider.begin_frame();
            collider.update_world_shapes(host.center_position(key), host.center_rotation(key));
        }

        // Phase 2: all-pairs narrow phase over enabled colliders.
        self.check_all_collisions(&keys, host);
    }

    /// O(n²) scan over enabled colliders, skipping pairs with a disabled side
    fn check_all_collisions(&mut self, keys: &[ColliderKey], host: &mut impl ColliderHost) {
        for (i, &key_a) in keys.iter().enumerate() {
            for &key_b in &keys[i + 1..] {
                self.check_pair(key_a, key_b, host);
            }
        }
    }

    /// Test one pair and drive its state machine
    fn check_pair(&mut self, key_a: ColliderKey, key_b: ColliderKey, host: &mut impl ColliderHost) {
        let (Some(a), Some(b)) = (self.colliders.get(key_a), self.colliders.get(key_b)) else {
            return;
        };
        if !a.is_enabled() || !b.is_enabled() {
            return;
        }

        // A pair with no common enabled shape kind is never tested: no state
        // entry is created and no events can fire for it.
        let Some(hit) = select_and_test(a, b) else {
            return;
        };

        if hit {
            if let Some(a) = self.colliders.get_mut(key_a) {
                a.mark_colliding();
            }
            if let Some(b) = self.colliders.get_mut(key_b) {
                b.mark_colliding();
            }
        }

        let state = self.pair_states.entry(PairKey::new(key_a, key_b)).or_insert(false);
        let was = *state;
        *state = hit;

        match (was, hit) {
            (false, true) => {
                trace!("collision enter: {key_a:?} <-> {key_b:?}");
                host.on_collision_enter(key_a, key_b);
                host.on_collision_enter(key_b, key_a);
                host.on_collision(key_a, key_b);
                host.on_collision(key_b, key_a);
            }
            (true, true) => {
                host.on_collision(key_a, key_b);
                host.on_collision(key_b, key_a);
            }
            (true, false) => {
                trace!("collision out: {key_a:?} <-> {key_b:?}");
                host.on_collision_out(key_a, key_b);
                host.on_collision_out(key_b, key_a);
            }
            (false, false) => {}
        }
    }

    /// Delegate debug rendering for every visible collider
    pub fn draw(&self, view_projection: &Mat4, painter: &mut impl DebugDraw) {
        for collider in self.colliders.values() {
            if collider.is_visible() {
                painter.draw_collider(collider, view_projection);
            }
        }
    }

    /// Get a collider by key
    pub fn get(&self, key: ColliderKey) -> Option<&Collider> {
        self.colliders.get(key)
    }

    /// Get a mutable collider by key
    pub fn get_mut(&mut self, key: ColliderKey) -> Option<&mut Collider> {
        self.colliders.get_mut(key)
    }

    /// Look up a collider key by registered name
    pub fn key_of(&self, name: &str) -> Option<ColliderKey> {
        self.names.get(name).copied()
    }

    /// Number of registered colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Last recorded pair state for two keys (false if the pair was never tested)
    pub fn was_pair_colliding(&self, a: ColliderKey, b: ColliderKey) -> bool {
        self.pair_states
            .get(&PairKey::new(a, b))
            .copied()
            .unwrap_or(false)
    }
}

/// Pick the narrow-phase test for a pair by fixed kind precedence
///
/// Precedence: Sphere-Sphere, AABB-AABB, OBB-OBB, AABB-Sphere, OBB-Sphere,
/// AABB-OBB; mixed-kind tests match in either orientation. Returns `None`
/// when the two colliders share no testable combination.
fn select_and_test(a: &Collider, b: &Collider) -> Option<bool> {
    let (ka, kb) = (a.kinds(), b.kinds());

    if ka.contains(ShapeKinds::SPHERE) && kb.contains(ShapeKinds::SPHERE) {
        return Some(a.sphere().intersects(b.sphere()));
    }
    if ka.contains(ShapeKinds::AABB) && kb.contains(ShapeKinds::AABB) {
        return Some(a.aabb().intersects(b.aabb()));
    }
    if ka.contains(ShapeKinds::OBB) && kb.contains(ShapeKinds::OBB) {
        return Some(a.obb().intersects(b.obb()));
    }
    if ka.contains(ShapeKinds::AABB) && kb.contains(ShapeKinds::SPHERE) {
        return Some(a.aabb().intersects_sphere(b.sphere()));
    }
    if ka.contains(ShapeKinds::SPHERE) && kb.contains(ShapeKinds::AABB) {
        return Some(b.aabb().intersects_sphere(a.sphere()));
    }
    if ka.contains(ShapeKinds::OBB) && kb.contains(ShapeKinds::SPHERE) {
        return Some(a.obb().intersects_sphere(b.sphere()));
    }
    if ka.contains(ShapeKinds::SPHERE) && kb.contains(ShapeKinds::OBB) {
        return Some(b.obb().intersects_sphere(a.sphere()));
    }
    if ka.contains(ShapeKinds::AABB) && kb.contains(ShapeKinds::OBB) {
        return Some(b.obb().intersects_aabb(a.aabb()));
    }
    if ka.contains(ShapeKinds::OBB) && kb.contains(ShapeKinds::AABB) {
        return Some(a.obb().intersects_aabb(b.aabb()));
    }

    None
}
