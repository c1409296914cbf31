//! Showcase driver tests
//!
//! Tests for:
//! - URL query configuration
//! - House framing and portrait correction
//! - Automatic floor cycling (ping-pong) and fixed floors
//! - Orbit with and without revolving, cylindrical placement
//! - Live updates with version de-duplication
//! - Model refresh on every feed poll

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec3;
use storey::renderer::SceneRenderer;
use storey::scene::*;
use storey::showcase::*;
use url::Url;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-3;

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

/// `floors` levels, each with a 10 x 10 slab and one light.
fn stacked_home(floors: u32) -> Home {
    let mut home = Home::default();
    for _ in 0..floors {
        let floor = home.push_floor();
        let base = floor.base_height();
        floor.shape = square(5.0);
        floor
            .lights
            .push(Light::new("Lamp", Point3::new(0.0, base + 2.0, 0.0)));
    }
    home
}

fn driver(settings: ShowcaseSettings, config: ShowcaseConfig) -> ShowcaseDriver {
    ShowcaseDriver::new(settings, config, SceneRenderer::default())
}

fn fast_cycle() -> ShowcaseSettings {
    ShowcaseSettings {
        floor_cycle_secs: 1.0,
        ..Default::default()
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn empty_query_uses_defaults() {
    let config = ShowcaseConfig::from_query("");
    assert!(config.revolve);
    assert_eq!(config.floor, FloorSelection::Auto);
    assert_eq!(config, ShowcaseConfig::default());
}

#[test]
fn revolve_only_turns_off_for_false() {
    assert!(!ShowcaseConfig::from_query("revolve=false").revolve);
    assert!(!ShowcaseConfig::from_query("?revolve=FALSE").revolve);
    assert!(ShowcaseConfig::from_query("revolve=no").revolve);
    assert!(ShowcaseConfig::from_query("revolve=").revolve);
}

#[test]
fn floor_parameter_values() {
    let floor = |q: &str| ShowcaseConfig::from_query(q).floor;
    assert_eq!(floor("floor=auto"), FloorSelection::Auto);
    assert_eq!(floor("floor=Auto"), FloorSelection::Auto);
    assert_eq!(floor("floor=2"), FloorSelection::Level(2));
    assert_eq!(floor("floor=3rd"), FloorSelection::Level(3));
    assert_eq!(floor("floor=-1"), FloorSelection::Level(0));
    assert_eq!(floor("floor=top"), FloorSelection::Level(0));
}

#[test]
fn config_from_page_url() {
    let url = Url::parse("https://example.com/showcase?floor=1&revolve=false").unwrap();
    let config = ShowcaseConfig::from_url(&url);
    assert!(!config.revolve);
    assert_eq!(config.floor, FloorSelection::Level(1));

    let bare = Url::parse("https://example.com/showcase").unwrap();
    assert_eq!(ShowcaseConfig::from_url(&bare), ShowcaseConfig::default());
}

#[test]
fn settings_from_json() {
    let settings: ShowcaseSettings =
        serde_json::from_str(r#"{ "poll_interval": 250, "orbit_speed": 0.01 }"#).unwrap();
    assert_eq!(settings.poll_interval, Duration::from_millis(250));
    assert_eq!(settings.orbit_speed, 0.01);
    assert_eq!(settings.floor_cycle_secs, 5.0);
}

// ============================================================================
// Framing
// ============================================================================

#[test]
fn frame_centers_on_footprint_and_floors() {
    let mut home = stacked_home(3);
    for floor in &mut home.floors {
        for p in &mut floor.shape {
            p.x += 10.0;
        }
    }
    let frame = HouseFrame::from_home(&home);
    assert_eq!(frame.max_level, 2);
    assert!(approx_eq(frame.center.x, 10.0));
    assert!(approx_eq(frame.center.y, 2.5));
    assert!(approx_eq(frame.center.z, 0.0));
    // 10 x 10 footprint, 5 high
    assert!(approx_eq(frame.diagonal, 15.0));
    assert!(approx_eq(frame.eye_height(), 9.0));
}

#[test]
fn small_house_uses_minimum_radius() {
    let frame = HouseFrame::from_home(&stacked_home(1));
    assert!(approx_eq(frame.orbit_radius(16.0 / 9.0), MIN_ORBIT_RADIUS));
    // portrait: 30 * (1 / 0.5) * 0.8
    assert!(approx_eq(frame.orbit_radius(0.5), 48.0));
}

#[test]
fn large_house_scales_radius() {
    let mut home = Home::with_ground_floor("Big");
    home.floors[0].shape = square(20.0);
    let frame = HouseFrame::from_home(&home);
    let expected = 40.0f32.hypot(40.0) * 1.2;
    assert!(approx_eq(frame.orbit_radius(1.0), expected));
}

#[test]
fn load_places_camera_on_orbit() {
    let mut driver = driver(ShowcaseSettings::default(), ShowcaseConfig::default());
    driver.load(stacked_home(3), 16.0 / 9.0);
    let view = driver.tick(0.0);

    let frame = *driver.frame().unwrap();
    assert_eq!(view.target, frame.center);
    let offset = view.eye - frame.center;
    assert!(approx_eq(offset.y, frame.eye_height()));
    assert!(approx_eq(offset.x.hypot(offset.z), MIN_ORBIT_RADIUS));
    assert!(!driver.renderer().gizmos_visible());
}

// ============================================================================
// Floor Cycling
// ============================================================================

#[test]
fn auto_mode_starts_on_ground_floor() {
    let mut driver = driver(ShowcaseSettings::default(), ShowcaseConfig::default());
    driver.load(stacked_home(3), 1.0);
    assert_eq!(driver.floor_limit(), 0);
    assert_eq!(driver.renderer().highest_visible_floor(), Some(0));
}

#[test]
fn floors_cycle_up_and_back_down() {
    let mut driver = driver(fast_cycle(), ShowcaseConfig::default());
    driver.load(stacked_home(3), 1.0);

    let limits: Vec<u32> = (0..8).map(|_| driver.tick(1.5).floor_limit).collect();
    assert_eq!(limits, vec![1, 2, 1, 0, 1, 2, 1, 0]);
}

#[test]
fn cycle_waits_for_interval() {
    let mut driver = driver(ShowcaseSettings::default(), ShowcaseConfig::default());
    driver.load(stacked_home(2), 1.0);
    for _ in 0..4 {
        assert_eq!(driver.tick(1.0).floor_limit, 0);
    }
    // 5 seconds reached but not exceeded
    assert_eq!(driver.tick(1.0).floor_limit, 0);
    assert_eq!(driver.tick(0.5).floor_limit, 1);
}

#[test]
fn single_floor_stays_on_ground() {
    let mut driver = driver(fast_cycle(), ShowcaseConfig::default());
    driver.load(stacked_home(1), 1.0);
    for _ in 0..5 {
        assert_eq!(driver.tick(1.5).floor_limit, 0);
    }
}

#[test]
fn revealed_floor_grows_over_frames() {
    let mut driver = driver(fast_cycle(), ShowcaseConfig::default());
    driver.load(stacked_home(2), 1.0);

    assert!(driver.tick(1.5).animating);
    let mut frames = 0;
    while driver.tick(1.0 / 60.0).animating {
        frames += 1;
        assert!(frames < 500);
    }
    assert_eq!(driver.renderer().highest_visible_floor(), Some(1));
}

#[test]
fn fixed_floor_does_not_cycle() {
    let config = ShowcaseConfig {
        floor: FloorSelection::Level(1),
        ..Default::default()
    };
    let mut driver = driver(fast_cycle(), config);
    driver.load(stacked_home(3), 1.0);
    for _ in 0..5 {
        assert_eq!(driver.tick(1.5).floor_limit, 1);
    }
}

#[test]
fn fixed_floor_above_top_falls_back_to_ground() {
    let config = ShowcaseConfig::from_query("floor=7");
    let mut driver = driver(ShowcaseSettings::default(), config);
    driver.load(stacked_home(3), 1.0);
    assert_eq!(driver.floor_limit(), 0);
}

#[test]
fn config_change_applies_fixed_floor_at_once() {
    let mut driver = driver(ShowcaseSettings::default(), ShowcaseConfig::default());
    driver.load(stacked_home(3), 1.0);
    driver.set_config(ShowcaseConfig::from_query("floor=2&revolve=false"));
    assert_eq!(driver.floor_limit(), 2);
    assert!(!driver.config().revolve);
}

// ============================================================================
// Orbit
// ============================================================================

#[test]
fn revolving_moves_the_eye() {
    let mut driver = driver(ShowcaseSettings::default(), ShowcaseConfig::default());
    driver.load(stacked_home(1), 1.0);
    let first = driver.tick(1.0 / 60.0).eye;
    let second = driver.tick(1.0 / 60.0).eye;
    assert_ne!(first, second);

    // constant distance from the center axis
    let center = driver.frame().unwrap().center;
    let r1 = (first - center).with_y(0.0).length();
    let r2 = (second - center).with_y(0.0).length();
    assert!(approx_eq(r1, r2));
}

#[test]
fn still_camera_when_not_revolving() {
    let config = ShowcaseConfig::from_query("revolve=false");
    let mut driver = driver(ShowcaseSettings::default(), config);
    driver.load(stacked_home(1), 1.0);
    let first = driver.tick(1.0 / 60.0).eye;
    for _ in 0..30 {
        assert_eq!(driver.tick(1.0 / 60.0).eye, first);
    }
}

#[test]
fn orbit_cylindrical_placement() {
    let mut orbit = storey::OrbitControls::new(Vec3::new(1.0, 0.0, 1.0), 10.0);
    orbit.set_cylindrical(3.0, 4.0);
    assert!(approx_eq(orbit.radius, 5.0));

    let mut camera = Camera::default();
    orbit.update(&mut camera, 1.0 / 60.0);
    let offset = camera.position - orbit.center;
    assert!(approx_eq(offset.y, 4.0));
    assert!(approx_eq(Vec3::new(offset.x, 0.0, offset.z).length(), 3.0));

    // a radius below the minimum is clamped
    orbit.set_cylindrical(0.1, 0.1);
    assert_eq!(orbit.radius, orbit.min_distance);
}

// ============================================================================
// Live Updates
// ============================================================================

#[test]
fn stale_light_updates_are_dropped() {
    let home = stacked_home(1);
    let light_id = home.floors[0].lights[0].id;
    let mut driver = driver(ShowcaseSettings::default(), ShowcaseConfig::default());
    driver.load(home, 1.0);

    let off = |version| LiveUpdate::Light {
        version,
        light_id,
        state: LightState::new(false, "#ffffff", 1.0),
    };
    assert!(driver.apply_update(off(3)));
    assert!(!driver.apply_update(off(3)));
    assert!(!driver.apply_update(LiveUpdate::Light {
        version: 2,
        light_id,
        state: LightState::new(true, "#ffffff", 1.0),
    }));
    assert!(!driver.home().unwrap().light(light_id).unwrap().state.on);

    assert!(driver.apply_update(LiveUpdate::Light {
        version: 4,
        light_id,
        state: LightState::new(true, "#00ff00", 1.0),
    }));
    let key = driver.renderer().emitter_for(light_id).unwrap();
    let emitter = driver.renderer().get(key).unwrap().emitter.clone().unwrap();
    assert_eq!(emitter.color, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn versions_are_tracked_per_key() {
    let mut home = stacked_home(1);
    home.floors[0]
        .lights
        .push(Light::new("Second", Point3::new(1.0, 2.0, 1.0)));
    let a = home.floors[0].lights[0].id;
    let b = home.floors[0].lights[1].id;
    let mut driver = driver(ShowcaseSettings::default(), ShowcaseConfig::default());
    driver.load(home, 1.0);

    let off = LightState::new(false, "#ffffff", 1.0);
    assert!(driver.apply_update(LiveUpdate::Light {
        version: 5,
        light_id: a,
        state: off.clone(),
    }));
    assert!(driver.apply_update(LiveUpdate::Light {
        version: 1,
        light_id: b,
        state: off,
    }));
    assert!(driver.apply_update(LiveUpdate::Background {
        version: 1,
        color: "#101010".to_string(),
    }));
}

#[test]
fn background_updates_are_idempotent() {
    let mut driver = driver(ShowcaseSettings::default(), ShowcaseConfig::default());
    driver.load(stacked_home(1), 1.0);
    assert_eq!(driver.renderer().background(), "#222222");

    assert!(driver.apply_update(LiveUpdate::Background {
        version: 1,
        color: "#ff0000".to_string(),
    }));
    assert_eq!(driver.home().unwrap().background_color, "#ff0000");
    assert!(!driver.apply_update(LiveUpdate::Background {
        version: 2,
        color: "#ff0000".to_string(),
    }));
    assert_eq!(driver.renderer().clear_color(), Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn feed_is_polled_on_interval() {
    let home = stacked_home(1);
    let light_id = home.floors[0].lights[0].id;
    let (feed, tx) = ChannelFeed::new(Some(home));
    let mut driver = driver(ShowcaseSettings::default(), ShowcaseConfig::default()).with_feed(feed);
    assert!(driver.home().is_some());

    tx.send(LiveUpdate::Light {
        version: 1,
        light_id,
        state: LightState::new(false, "#ffffff", 1.0),
    })
    .unwrap();

    driver.tick(0.5);
    assert!(driver.home().unwrap().light(light_id).unwrap().state.on);
    driver.tick(0.6);
    assert!(!driver.home().unwrap().light(light_id).unwrap().state.on);
}

#[test]
fn refresh_mirrors_lights_and_background() {
    let home = stacked_home(1);
    let light_id = home.floors[0].lights[0].id;
    let mut driver = driver(ShowcaseSettings::default(), ShowcaseConfig::default());
    driver.load(home.clone(), 1.0);

    let mut fetched = home;
    fetched.background_color = "#000000".to_string();
    fetched.floors[0].lights[0].state = LightState::new(false, "#ffffff", 1.0);
    driver.refresh_from_model(fetched);

    assert_eq!(driver.renderer().background(), "#000000");
    let key = driver.renderer().emitter_for(light_id).unwrap();
    assert!(!driver.renderer().is_visible(key));
}

/// Feed whose model is edited in place by the test, with no deltas.
struct SharedModel(Rc<RefCell<Home>>);

impl LiveFeed for SharedModel {
    fn current_home(&self) -> Option<Home> {
        Some(self.0.borrow().clone())
    }

    fn poll_updates(&mut self) -> Vec<LiveUpdate> {
        Vec::new()
    }
}

#[test]
fn model_changes_are_picked_up_on_poll() {
    let model = Rc::new(RefCell::new(stacked_home(1)));
    let light_id = model.borrow().floors[0].lights[0].id;
    let mut driver = driver(ShowcaseSettings::default(), ShowcaseConfig::default())
        .with_feed(SharedModel(model.clone()));
    let key = driver.renderer().emitter_for(light_id).unwrap();
    let intensity = |driver: &ShowcaseDriver| {
        driver.renderer().get(key).unwrap().emitter.as_ref().unwrap().intensity
    };
    assert!(intensity(&driver) > 0.0);

    {
        let mut home = model.borrow_mut();
        home.background_color = "#123456".to_string();
        home.floors[0].lights[0].state = LightState::new(false, "#ffffff", 1.0);
    }

    // nothing changes before the poll interval
    driver.tick(0.5);
    assert_eq!(driver.renderer().background(), "#222222");

    driver.tick(0.6);
    assert_eq!(driver.renderer().background(), "#123456");
    assert_eq!(driver.home().unwrap().background_color, "#123456");
    assert!(!driver.home().unwrap().light(light_id).unwrap().state.on);
    assert_eq!(intensity(&driver), 0.0);
}

#[test]
fn channel_feed_model_follows_pushed_updates() {
    let home = stacked_home(1);
    let light_id = home.floors[0].lights[0].id;
    let (mut feed, tx) = ChannelFeed::new(None);
    assert!(feed.current_home().is_none());
    feed.set_home(home);

    tx.send(LiveUpdate::Background {
        version: 2,
        color: "#0000ff".to_string(),
    })
    .unwrap();
    tx.send(LiveUpdate::Background {
        version: 1,
        color: "#ff0000".to_string(),
    })
    .unwrap();
    tx.send(LiveUpdate::Light {
        version: 1,
        light_id,
        state: LightState::new(false, "#ffffff", 1.0),
    })
    .unwrap();

    assert_eq!(feed.poll_updates().len(), 3);
    let model = feed.current_home().unwrap();
    assert_eq!(model.background_color, "#0000ff");
    assert!(!model.light(light_id).unwrap().state.on);
}

#[test]
fn pushed_updates_survive_the_model_refresh() {
    let home = stacked_home(1);
    let light_id = home.floors[0].lights[0].id;
    let (mut feed, tx) = ChannelFeed::new(None);
    feed.set_home(home);
    let mut driver = driver(ShowcaseSettings::default(), ShowcaseConfig::default()).with_feed(feed);
    assert!(driver.home().is_some());

    tx.send(LiveUpdate::Light {
        version: 1,
        light_id,
        state: LightState::new(true, "#ff0000", 2.0),
    })
    .unwrap();
    tx.send(LiveUpdate::Background {
        version: 1,
        color: "#abcdef".to_string(),
    })
    .unwrap();

    for _ in 0..3 {
        driver.tick(1.1);
        let state = &driver.home().unwrap().light(light_id).unwrap().state;
        assert_eq!(state.color, "#ff0000");
        assert_eq!(state.stored_intensity(), 2.0);
        assert_eq!(driver.renderer().background(), "#abcdef");
    }
}

#[test]
fn version_table_keeps_newest() {
    let mut table = VersionTable::default();
    let background = |version| LiveUpdate::Background {
        version,
        color: "#000000".to_string(),
    };
    assert!(table.accept(&background(4)));
    assert!(!table.accept(&background(4)));
    assert!(!table.accept(&background(1)));
    assert_eq!(table.last_seen(UpdateKey::Background), Some(4));
    assert_eq!(table.last_seen(UpdateKey::Light(uuid::Uuid::nil())), None);
}
