//! Headless showcase tour.
//!
//! ```text
//! showcase [SAVE_DIR] [SAVE_NAME] [QUERY]
//! showcase ./saves default "revolve=true&floor=auto"
//! ```
//!
//! Loads a save (or builds a two-storey sample when it is missing), runs the
//! showcase for a while at 60 Hz and logs what a frontend would draw.

use std::sync::Arc;

use storey::prelude::*;
use storey::showcase::FrameView;

const FRAME_DT: f32 = 1.0 / 60.0;
const TOUR_SECONDS: u32 = 12;

fn main() -> storey::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let save_dir = args.next().unwrap_or_else(|| "saves".to_string());
    let save_name = args.next().unwrap_or_else(|| "default".to_string());
    let query = args.next().unwrap_or_default();

    let config = StoreyConfig::load(std::path::Path::new(&save_dir).join("storey.json"))?;
    let store: Arc<dyn HomeStore> = Arc::new(JsonFileStore::open(&save_dir)?);

    let home = match store.load_home(&save_name) {
        Ok(home) => home,
        Err(err) => {
            log::warn!("{err}; using the sample home");
            let home = sample_home();
            store.save_home(&save_name, &home)?;
            home
        }
    };
    let porch_light = home.floors.first().and_then(|f| f.lights.first()).map(|l| l.id);

    let (feed, updates) = ChannelFeed::new(Some(home));
    let mut driver = ShowcaseDriver::new(
        config.showcase,
        ShowcaseConfig::from_query(&query),
        SceneRenderer::new(config.renderer),
    )
    .with_feed(feed);

    let frames = TOUR_SECONDS * 60;
    for frame in 0..frames {
        if frame == frames / 2
            && let Some(light_id) = porch_light
        {
            let _ = updates.send(LiveUpdate::Light {
                version: 1,
                light_id,
                state: LightState::new(false, "#ffffff", 1.0),
            });
            let _ = updates.send(LiveUpdate::Background {
                version: 1,
                color: "#101820".to_string(),
            });
        }

        let view = driver.tick(FRAME_DT);
        if frame % 60 == 0 {
            report(frame / 60, &view, driver.renderer());
        }
    }
    Ok(())
}

fn report(second: u32, view: &FrameView, renderer: &SceneRenderer) {
    let visible = renderer
        .drawables()
        .filter(|(key, _)| renderer.is_visible(*key))
        .count();
    log::info!(
        "t={second:>2}s eye=({:.1}, {:.1}, {:.1}) floors<={} visible={visible} shadows={} bg={}{}",
        view.eye.x,
        view.eye.y,
        view.eye.z,
        view.floor_limit,
        renderer.shadow_casters().len(),
        renderer.background(),
        if view.animating { " (easing)" } else { "" },
    );
}

fn sample_home() -> Home {
    let mut home = Home::with_ground_floor("Sample House");
    let corners = [
        Point3::new(-4.0, 0.0, -3.0),
        Point3::new(4.0, 0.0, -3.0),
        Point3::new(4.0, 0.0, 3.0),
        Point3::new(-4.0, 0.0, 3.0),
    ];

    for level in 0..2 {
        let floor = if level == 0 {
            &mut home.floors[0]
        } else {
            home.push_floor()
        };
        let base = floor.base_height();
        floor.shape = corners.to_vec();
        for i in 0..corners.len() {
            let (a, b) = (corners[i], corners[(i + 1) % corners.len()]);
            floor.walls.push(Wall::new(a, b));
        }
        let mut light = Light::new("Ceiling", Point3::new(0.0, base + 2.0, 0.0));
        light.name = format!("Ceiling {level}");
        floor.lights.push(light);
        floor
            .cubes
            .push(Cube::new(Point3::new(1.5, base + 0.5, 1.0), "#c0a080"));
    }
    home
}
