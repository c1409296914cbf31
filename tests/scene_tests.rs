//! Scene model tests
//!
//! Tests for:
//! - Home / Floor construction and floor levels
//! - JSON defaults for omitted fields
//! - Light intensity repair
//! - Hex color parsing
//! - Wall and window measurements
//! - Footprint bounds

use glam::Vec3;
use serde_json::json;
use storey::scene::home::{insert_clamped, remove_by_id};
use storey::scene::*;
use uuid::Uuid;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn square(half: f32) -> Vec<Point3> {
    vec![
        Point3::new(-half, 0.0, -half),
        Point3::new(half, 0.0, -half),
        Point3::new(half, 0.0, half),
        Point3::new(-half, 0.0, half),
    ]
}

// ============================================================================
// Home & Floors
// ============================================================================

#[test]
fn default_home_values() {
    let home = Home::default();
    assert_eq!(home.name, "My Home");
    assert_eq!(home.background_color, "#222222");
    assert!(home.floors.is_empty());
}

#[test]
fn push_floor_uses_next_level() {
    let mut home = Home::default();
    assert_eq!(home.push_floor().level, 0);
    assert_eq!(home.push_floor().level, 1);

    // gaps are kept, the next floor goes above the highest
    home.floors[1].level = 4;
    assert_eq!(home.push_floor().level, 5);
    assert_eq!(home.max_level(), 5);
}

#[test]
fn floor_base_height_follows_level() {
    let floor = Floor::new(3);
    assert_eq!(floor.name, "Floor 3");
    assert!(approx_eq(floor.base_height(), 7.5));
    assert!(floor.is_empty());
    assert!(!floor.has_slab());
}

#[test]
fn floor_lookup_by_id_and_level() {
    let mut home = Home::with_ground_floor("Lookup");
    let upper_id = home.push_floor().id;
    assert_eq!(home.floor_by_id(upper_id).map(|f| f.level), Some(1));
    assert_eq!(home.floor_by_level(0).map(|f| f.id), Some(home.floors[0].id));
    assert!(home.floor_by_level(7).is_none());
    assert!(home.floor_by_id(Uuid::new_v4()).is_none());
}

#[test]
fn remove_and_reinsert_keeps_position() {
    let mut walls: Vec<Wall> = (0..3)
        .map(|i| Wall::new(Point3::new(i as f32, 0.0, 0.0), Point3::new(i as f32, 0.0, 1.0)))
        .collect();
    let ids: Vec<Uuid> = walls.iter().map(|w| w.id).collect();

    let (index, wall) = remove_by_id(&mut walls, ids[1]).unwrap();
    assert_eq!(index, 1);
    assert_eq!(walls.len(), 2);
    assert!(remove_by_id(&mut walls, ids[1]).is_none());

    insert_clamped(&mut walls, index, wall);
    assert_eq!(walls.iter().map(|w| w.id).collect::<Vec<_>>(), ids);

    // index past the end appends
    let extra = Wall::new(Point3::default(), Point3::new(1.0, 0.0, 0.0));
    let extra_id = extra.id;
    insert_clamped(&mut walls, 99, extra);
    assert_eq!(walls.last().map(|w| w.id), Some(extra_id));
}

// ============================================================================
// Serialization Defaults
// ============================================================================

#[test]
fn minimal_document_fills_defaults() {
    let doc = json!({
        "floors": [{
            "level": 1,
            "walls": [{ "p1": {"x": 0, "y": 0, "z": 0}, "p2": {"x": 2, "y": 0, "z": 0} }],
            "lights": [{ "position": {"x": 0, "y": 2, "z": 0} }]
        }]
    });
    let home: Home = serde_json::from_value(doc).unwrap();

    assert_eq!(home.name, "My Home");
    let floor = &home.floors[0];
    assert_eq!(floor.level, 1);
    assert!(floor.cubes.is_empty());
    assert!(floor.shape.is_empty());

    let wall = &floor.walls[0];
    assert!(approx_eq(wall.height, 2.5));
    assert!(approx_eq(wall.thickness, 0.2));
    assert!(wall.windows.is_empty());

    let light = &floor.lights[0];
    assert_eq!(light.name, "Light");
    assert!(!light.state.on);
    assert_eq!(light.state.color, "#ffffff");
    assert!(approx_eq(light.state.stored_intensity(), 1.0));
}

#[test]
fn cube_defaults() {
    let cube: Cube = serde_json::from_value(json!({
        "position": {"x": 1, "y": 0.5, "z": 1}
    }))
    .unwrap();
    assert_eq!(cube.name, "Cube");
    assert_eq!(cube.color, "#ababab");
    assert_eq!(cube.size, Point3::new(1.0, 1.0, 1.0));
    assert_eq!(cube.rotation, 0.0);
}

#[test]
fn window_defaults() {
    let window: Window = serde_json::from_value(json!({
        "p1": {"x": 0, "y": 0, "z": 0},
        "p2": {"x": 1.5, "y": 0, "z": 0}
    }))
    .unwrap();
    assert!(approx_eq(window.height, 1.5));
    assert!(approx_eq(window.bottom_height, 0.8));
    assert!(approx_eq(window.width(), 1.5));
}

#[test]
fn saved_home_reloads_equal() {
    let mut home = Home::with_ground_floor("Round");
    let floor = &mut home.floors[0];
    floor.shape = square(3.0);
    floor.walls.push(Wall::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)));
    floor.lights.push(Light::new("Lamp", Point3::new(1.0, 2.0, 1.0)));
    floor.cubes.push(Cube::new(Point3::new(0.0, 0.5, 0.0), "#808080"));

    let text = serde_json::to_string(&home).unwrap();
    assert!(!text.contains("floor_plan_image"));
    let back: Home = serde_json::from_str(&text).unwrap();
    assert_eq!(back, home);
}

// ============================================================================
// Light Intensity
// ============================================================================

#[test]
fn invalid_intensity_is_replaced_and_kept() {
    let mut state = LightState::new(true, "#ffffff", f32::NAN);
    assert!(approx_eq(state.intensity(), 1.0));
    assert!(approx_eq(state.stored_intensity(), 1.0));

    state.set_intensity(-3.0);
    assert!(approx_eq(state.sanitized_intensity(), 1.0));
    // sanitized read does not write back
    assert!(approx_eq(state.stored_intensity(), -3.0));
    assert!(state.normalize_intensity());
    assert!(!state.normalize_intensity());

    state.set_intensity(f32::INFINITY);
    assert!(approx_eq(state.intensity(), 1.0));
}

#[test]
fn valid_intensity_is_untouched() {
    let mut state = LightState::new(true, "#ffffff", 0.0);
    assert!(!state.normalize_intensity());
    assert_eq!(state.intensity(), 0.0);
    assert!(!state.is_emitting());

    state.set_intensity(2.5);
    assert!(state.is_emitting());
    state.on = false;
    assert!(!state.is_emitting());
}

#[test]
fn garbage_intensity_in_json_is_repaired_on_load() {
    let mut home: Home = serde_json::from_value(json!({
        "floors": [{
            "lights": [
                { "position": {"x": 0, "y": 2, "z": 0}, "state": { "on": true, "intensity": null } },
                { "position": {"x": 1, "y": 2, "z": 0}, "state": { "on": true, "intensity": "bright" } },
                { "position": {"x": 2, "y": 2, "z": 0}, "state": { "on": true, "intensity": "0.5" } },
                { "position": {"x": 3, "y": 2, "z": 0}, "state": { "on": true, "intensity": 2 } }
            ]
        }]
    }))
    .unwrap();

    assert_eq!(home.normalize_lights(), 2);
    let values: Vec<f32> = home.floors[0]
        .lights
        .iter()
        .map(|l| l.state.stored_intensity())
        .collect();
    assert_eq!(values, vec![1.0, 1.0, 0.5, 2.0]);
    assert_eq!(home.normalize_lights(), 0);
}

#[test]
fn update_light_by_id_reports_changes() {
    let mut home = Home::with_ground_floor("Lights");
    let light = Light::new("Lamp", Point3::new(0.0, 2.0, 0.0));
    let id = light.id;
    home.floors[0].lights.push(light);

    let off = LightState::new(false, "#ffcc00", 0.5);
    assert!(home.update_light_by_id(id, &off));
    assert!(!home.update_light_by_id(id, &off));
    assert_eq!(home.light(id).map(|l| l.state.color.as_str()), Some("#ffcc00"));

    // incoming garbage is repaired before it is stored
    let broken = LightState::new(true, "#ffffff", f32::NAN);
    assert!(home.update_light_by_id(id, &broken));
    assert!(approx_eq(home.light(id).unwrap().state.stored_intensity(), 1.0));

    assert!(!home.update_light_by_id(Uuid::new_v4(), &off));
}

// ============================================================================
// Colors
// ============================================================================

#[test]
fn parse_hex_variants() {
    let red = parse_hex_color("#ff0000").unwrap();
    assert_eq!(red, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(parse_hex_color("0x00ff00").unwrap(), Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(parse_hex_color("  0000FF ").unwrap(), Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn parse_hex_rejects_malformed() {
    for bad in ["", "#fff", "#ggggggg", "#gggggg", "red", "#ff00ff00"] {
        assert!(parse_hex_color(bad).is_err(), "{bad} should be rejected");
    }
}

#[test]
fn color_fallback_and_formatting() {
    assert_eq!(color_or("nope", Vec3::ONE), Vec3::ONE);
    assert_eq!(to_hex(Vec3::new(1.0, 0.0, 0.0)), "#ff0000");
    assert_eq!(to_hex(parse_hex_color("#e2e8f0").unwrap()), "#e2e8f0");
}

// ============================================================================
// Walls & Bounds
// ============================================================================

#[test]
fn wall_length_and_angle() {
    let wall = Wall::new(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 0.0, 4.0));
    assert!(approx_eq(wall.length(), 5.0));
    assert!(approx_eq(wall.angle(), -(4.0f32).atan2(3.0)));
    assert_eq!(wall.midpoint(), Vec3::new(1.5, 0.0, 2.0));

    let zero = Wall::new(Point3::new(1.0, 0.0, 1.0), Point3::new(1.0, 0.0, 1.0));
    assert_eq!(zero.length(), 0.0);
}

#[test]
fn footprint_bounds_cover_slab_floors_only() {
    let mut home = Home::with_ground_floor("Bounds");
    assert!(home.footprint_bounds().is_none());

    home.floors[0].shape = square(2.0);
    let upper = home.push_floor();
    upper.shape = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 10.0)];

    let bounds = home.footprint_bounds().unwrap();
    assert_eq!(bounds.min, glam::Vec2::new(-2.0, -2.0));
    assert_eq!(bounds.max, glam::Vec2::new(2.0, 2.0));
    assert_eq!(bounds.center(), glam::Vec2::ZERO);
    assert!(approx_eq(bounds.diagonal(), 32.0f32.sqrt()));
}
