//! Frame-by-frame collision scenarios driven through the public API

use std::collections::HashMap;

use collision_engine::foundation::math::{Mat4, Quat, Vec3};
use collision_engine::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Enter,
    Stay,
    Out,
}

/// Scripted host: per-key transforms plus an event log
#[derive(Default)]
struct ScriptedHost {
    positions: HashMap<ColliderKey, Vec3>,
    rotations: HashMap<ColliderKey, Quat>,
    events: Vec<(Event, ColliderKey, ColliderKey)>,
}

impl ScriptedHost {
    fn count(&self, kind: Event) -> usize {
        self.events.iter().filter(|(e, _, _)| *e == kind).count()
    }
}

impl ColliderHost for ScriptedHost {
    fn center_position(&self, key: ColliderKey) -> Vec3 {
        self.positions.get(&key).copied().unwrap_or_else(Vec3::zeros)
    }

    fn center_rotation(&self, key: ColliderKey) -> Quat {
        self.rotations.get(&key).copied().unwrap_or_else(Quat::identity)
    }

    fn on_collision_enter(&mut self, key: ColliderKey, other: ColliderKey) {
        self.events.push((Event::Enter, key, other));
    }

    fn on_collision(&mut self, key: ColliderKey, other: ColliderKey) {
        self.events.push((Event::Stay, key, other));
    }

    fn on_collision_out(&mut self, key: ColliderKey, other: ColliderKey) {
        self.events.push((Event::Out, key, other));
    }
}

fn sphere(name: &str, radius: f32) -> Collider {
    let mut collider = Collider::new(name, ShapeKinds::SPHERE);
    collider.set_radius(radius);
    collider
}

#[test]
fn sphere_fly_through_fires_enter_stay_out_exactly() {
    let mut world = CollisionWorld::new();
    let a = world.add_collider(sphere("anchor", 1.0));
    let b = world.add_collider(sphere("mover", 1.0));

    let mut host = ScriptedHost::default();
    host.positions.insert(a, Vec3::zeros());

    // B travels from x = 5 to x = -2.5 at 0.5 per frame, passing through A.
    // Overlap holds while |x| <= 2 (distance == radius sum is inclusive),
    // which covers the nine frames x = 2.0, 1.5, ..., -2.0.
    for step in 0..=15 {
        let x = 5.0 - 0.5 * step as f32;
        host.positions.insert(b, Vec3::new(x, 0.0, 0.0));
        world.update(&mut host);

        let expect_overlap = (-2.0..=2.0).contains(&x);
        assert_eq!(
            world.get(a).unwrap().is_colliding(),
            expect_overlap,
            "unexpected collision flag at x = {x}"
        );
    }

    // One contiguous overlap interval: Enter and Out once per side, Stay on
    // every overlapping frame per side.
    assert_eq!(host.count(Event::Enter), 2);
    assert_eq!(host.count(Event::Stay), 18);
    assert_eq!(host.count(Event::Out), 2);
    assert!(!world.was_pair_colliding(a, b));
}

#[test]
fn rotating_obb_sweeps_past_a_static_box() {
    let mut world = CollisionWorld::new();

    let mut paddle = Collider::new("paddle", ShapeKinds::OBB);
    paddle.set_obb_size(Vec3::new(2.0, 0.2, 0.2));
    let paddle_key = world.add_collider(paddle);

    let mut post = Collider::new("post", ShapeKinds::OBB);
    post.set_obb_size(Vec3::new(0.2, 2.0, 0.2));
    let post_key = world.add_collider(post);

    let mut host = ScriptedHost::default();
    host.positions.insert(paddle_key, Vec3::zeros());
    // The post stands just beyond the paddle's long half-extent along x.
    host.positions.insert(post_key, Vec3::new(2.5, 0.0, 0.0));

    // Pointing along x the paddle misses the post...
    world.update(&mut host);
    assert_eq!(host.count(Event::Enter), 0);

    // ...a long paddle reaches it...
    world.get_mut(paddle_key).unwrap().set_obb_size(Vec3::new(2.4, 0.2, 0.2));
    world.update(&mut host);
    assert_eq!(host.count(Event::Enter), 2);

    // ...and rotating it a quarter turn about z swings it clear again.
    host.rotations.insert(
        paddle_key,
        Quat::from_euler_angles(0.0, 0.0, std::f32::consts::FRAC_PI_2),
    );
    world.update(&mut host);
    assert_eq!(host.count(Event::Out), 2);
}

#[test]
fn draw_delegates_only_visible_colliders() {
    struct CountingPainter {
        drawn: Vec<String>,
    }

    impl DebugDraw for CountingPainter {
        fn draw_collider(&mut self, collider: &Collider, _view_projection: &Mat4) {
            self.drawn.push(collider.name().to_string());
        }
    }

    let mut world = CollisionWorld::new();
    let shown = world.add_collider(sphere("shown", 1.0));
    let hidden = world.add_collider(sphere("hidden", 1.0));
    world.get_mut(hidden).unwrap().set_visible(false);
    let _ = shown;

    let mut painter = CountingPainter { drawn: Vec::new() };
    world.draw(&Mat4::identity(), &mut painter);
    assert_eq!(painter.drawn, vec!["shown".to_string()]);
}

#[test]
fn persisted_config_applies_to_registered_collider() {
    let mut config = ColliderConfig::default();
    config.radius = 0.25;
    config.obb_size = Vec3::new(3.0, 1.0, 1.0);

    let path = std::env::temp_dir().join("collision_engine_scenario_config.ron");
    let path = path.to_string_lossy().into_owned();
    config.save_to_file(&path).expect("save config");
    let loaded = ColliderConfig::load_from_file(&path).expect("load config");
    let _ = std::fs::remove_file(&path);

    let mut world = CollisionWorld::new();
    let key = world.add_collider(Collider::with_config(
        "loaded",
        ShapeKinds::SPHERE | ShapeKinds::OBB,
        loaded,
    ));

    let mut host = ScriptedHost::default();
    world.update(&mut host);

    let collider = world.get(key).unwrap();
    assert_eq!(collider.sphere().radius, 0.25);
    assert_eq!(collider.obb().half_size.x, 3.0);
}
