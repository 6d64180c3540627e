//=========================================================================
// Hello Scene
//
// Opens a window with a title scene. Space toggles a pause overlay,
// Escape quits with exit code 0.
//
// Run with:
//   RUST_LOG=info cargo run --example hello_scene
//
//=========================================================================

use e2d::prelude::*;
use kurbo::{Point, Rect, Vec2};

//=== Drifter =============================================================

/// Sprite wrapper that slides sideways and wraps around.
struct Drifter {
    sprite: Sprite,
    speed: f64,
}

impl Object for Drifter {
    fn identifier(&self) -> &str {
        self.sprite.identifier()
    }

    fn fixed_update(&mut self, _context: &mut Context<'_>) {}

    fn variable_update(&mut self, _context: &mut Context<'_>, delta_time: f64) {
        let transform = self.sprite.transform_mut();
        transform.move_by(Vec2::new(self.speed * delta_time, 0.0));
        if transform.position().x > 800.0 {
            transform.set_position(Point::new(-32.0, transform.position().y));
        }
    }

    fn on_event(&mut self, context: &mut Context<'_>, event: &Event) {
        if let Event::KeyPressed(key) = event {
            match key.key {
                KeyCode::Escape => context.quit(0),
                KeyCode::Space => context.push_scene(pause_scene()),
                _ => {}
            }
        }
    }

    fn as_renderable(&self) -> Option<&dyn Renderable> {
        Some(&self.sprite)
    }

    fn as_renderable_mut(&mut self) -> Option<&mut dyn Renderable> {
        Some(&mut self.sprite)
    }
}

//=== Title Scene =========================================================

struct Title;

impl SceneHooks for Title {
    fn on_load(&mut self, scene: &mut SceneContext<'_>) {
        let mut sprite = Sprite::with_identifier("Ship", TextureId(0), Rect::new(0.0, 0.0, 32.0, 32.0));
        sprite.transform_mut().set_position(Point::new(0.0, 280.0));

        if let Err(e) = scene.create_object(Drifter { sprite, speed: 120.0 }) {
            log::error!("{}", e);
        }

        let mut banner = Text::with_identifier("Banner", FontId(0), "Hello, E2D");
        banner.set_render_priority(1);
        if let Err(e) = scene.create_object(banner) {
            log::error!("{}", e);
        }
    }
}

//=== Pause Overlay =======================================================

struct Resume;

impl Object for Resume {
    fn identifier(&self) -> &str {
        "Resume"
    }

    fn fixed_update(&mut self, _context: &mut Context<'_>) {}

    fn variable_update(&mut self, _context: &mut Context<'_>, _delta_time: f64) {}

    fn on_event(&mut self, context: &mut Context<'_>, event: &Event) {
        if let Event::KeyPressed(KeyEvent { key: KeyCode::Space, .. }) = event {
            context.pop_scene();
        }
    }
}

struct PauseOverlay;

impl SceneHooks for PauseOverlay {
    fn on_load(&mut self, scene: &mut SceneContext<'_>) {
        let mut label = Text::with_identifier("Paused", FontId(0), "Paused");
        label.set_color(Color::rgb(255, 200, 0));
        label.transform_mut().set_position(Point::new(360.0, 40.0));

        let created = scene
            .create_object(label)
            .map(|_| ())
            .and_then(|()| scene.create_object(Resume).map(|_| ()));
        if let Err(e) = created {
            log::error!("{}", e);
        }
    }

    fn is_overlay(&self) -> bool {
        true
    }
}

fn pause_scene() -> Scene {
    Scene::with_identifier("Pause").with_hooks(PauseOverlay)
}

//=== Entry Point =========================================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = EngineBuilder::new()
        .with_title("Hello Scene")
        .with_window_size(800, 600)
        .with_background_color(Color::rgb(16, 16, 32))
        .build()
        .init(|scenes| {
            scenes.push_scene(Scene::with_identifier("Title").with_hooks(Title));
        })
        .run();

    std::process::exit(exit_code);
}
