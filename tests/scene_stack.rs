//=========================================================================
// Scene Stack Integration Tests
//=========================================================================
//
// Drives `SceneManager` through the public API only and checks the
// ordering of lifecycle hooks across push, pop, replace and clear.
//
//=========================================================================

use std::sync::{Arc, Mutex};

use e2d::prelude::*;
use kurbo::Rect;

//=== Fixtures ============================================================

type Journal = Arc<Mutex<Vec<String>>>;

fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

struct Tracked {
    journal: Journal,
    overlay: bool,
}

impl Tracked {
    fn record(&self, hook: &str, scene: &SceneContext<'_>) {
        self.journal
            .lock()
            .unwrap()
            .push(format!("{}:{}", hook, scene.identifier()));
    }
}

impl SceneHooks for Tracked {
    fn on_load(&mut self, scene: &mut SceneContext<'_>) {
        self.record("load", scene);
    }

    fn on_unload(&mut self, scene: &mut SceneContext<'_>) {
        self.record("unload", scene);
    }

    fn on_pause(&mut self, scene: &mut SceneContext<'_>) {
        self.record("pause", scene);
    }

    fn on_resume(&mut self, scene: &mut SceneContext<'_>) {
        self.record("resume", scene);
    }

    fn is_overlay(&self) -> bool {
        self.overlay
    }
}

fn tracked(identifier: &str, journal: &Journal) -> Scene {
    Scene::with_identifier(identifier).with_hooks(Tracked {
        journal: Arc::clone(journal),
        overlay: false,
    })
}

fn overlay(identifier: &str, journal: &Journal) -> Scene {
    Scene::with_identifier(identifier).with_hooks(Tracked {
        journal: Arc::clone(journal),
        overlay: true,
    })
}

//=== Lifecycle ===========================================================

#[test]
fn push_then_pop_runs_hooks_in_order() {
    let journal = Journal::default();
    let mut scenes = SceneManager::new();

    scenes.push_scene(tracked("Menu", &journal));
    scenes.push_scene(tracked("Game", &journal));
    scenes.pop_scene().unwrap();

    assert_eq!(
        entries(&journal),
        vec![
            "load:Menu",
            "pause:Menu",
            "load:Game",
            "pause:Game",
            "unload:Game",
            "resume:Menu",
        ]
    );
    assert_eq!(scenes.active_scene().unwrap().identifier(), "Menu");
    assert!(!scenes.active_scene().unwrap().is_paused());
}

#[test]
fn replace_does_not_resume_the_scene_below() {
    let journal = Journal::default();
    let mut scenes = SceneManager::new();

    scenes.push_scene(tracked("Menu", &journal));
    scenes.push_scene(tracked("Level1", &journal));
    journal.lock().unwrap().clear();

    scenes.replace_scene(tracked("Level2", &journal));

    assert_eq!(
        entries(&journal),
        vec!["pause:Level1", "unload:Level1", "load:Level2"]
    );
    assert_eq!(scenes.identifiers(), vec!["Menu", "Level2"]);
    assert!(scenes.scene("Menu").unwrap().is_paused());
}

#[test]
fn popped_scenes_live_until_clean() {
    let journal = Journal::default();
    let mut scenes = SceneManager::new();

    scenes.push_scene(tracked("A", &journal));
    scenes.push_scene(tracked("B", &journal));
    scenes.clear_scenes();

    assert!(scenes.is_empty());
    assert_eq!(scenes.pending_cleanup(), 2);
    assert_eq!(scenes.clean(), 2);
    assert_eq!(scenes.pending_cleanup(), 0);
}

#[test]
fn dropping_an_emptied_manager_fires_no_hooks() {
    let journal = Journal::default();
    let mut scenes = SceneManager::new();

    scenes.push_scene(tracked("A", &journal));
    scenes.push_scene(tracked("B", &journal));
    let below = scenes.scene("A").unwrap();
    assert!(below.is_loaded(), "Covered scene stays loaded");
    assert!(below.is_paused());

    scenes.pop_scene().unwrap();
    assert_eq!(scenes.pending_cleanup(), 1);
    scenes.pop_scene().unwrap();
    assert_eq!(scenes.pending_cleanup(), 2);

    let before_drop = entries(&journal);
    drop(scenes);

    assert_eq!(entries(&journal), before_drop);
    assert_eq!(
        before_drop,
        vec![
            "load:A",
            "pause:A",
            "load:B",
            "pause:B",
            "unload:B",
            "resume:A",
            "pause:A",
            "unload:A",
        ]
    );
}

#[test]
fn empty_stack_reports_errors() {
    let mut scenes = SceneManager::new();

    assert!(matches!(
        scenes.active_scene(),
        Err(EngineError::EmptySceneStack { .. })
    ));
    assert!(matches!(
        scenes.pop_scene(),
        Err(EngineError::EmptySceneStack { .. })
    ));
}

#[test]
fn queued_transitions_apply_in_order() {
    let journal = Journal::default();
    let mut scenes = SceneManager::new();
    scenes.push_scene(tracked("Root", &journal));

    scenes.apply_transitions(vec![
        SceneTransition::Push(tracked("A", &journal)),
        SceneTransition::Replace(tracked("B", &journal)),
        SceneTransition::Pop,
        SceneTransition::Pop,
        SceneTransition::Pop,
    ]);

    assert!(scenes.is_empty());
    assert_eq!(scenes.clean(), 3);
}

//=== Overlays ============================================================

#[test]
fn overlays_reveal_the_scene_below() {
    let journal = Journal::default();
    let mut scenes = SceneManager::new();

    scenes.push_scene(tracked("Hidden", &journal));
    scenes.push_scene(tracked("Game", &journal));
    scenes.push_scene(overlay("Hud", &journal));
    scenes.push_scene(overlay("Pause", &journal));

    let visible: Vec<&str> = scenes.visible_scenes().iter().map(Scene::identifier).collect();
    assert_eq!(visible, vec!["Game", "Hud", "Pause"]);
}

#[test]
fn overlay_layers_draw_above_lower_scenes_regardless_of_priority() {
    let backend = RecordingBackend::new();
    let mut renderer = Renderer::new(Box::new(backend.clone()));
    let mut scenes = SceneManager::new();
    let tile = Rect::new(0.0, 0.0, 8.0, 8.0);

    let game = scenes.push_scene(Scene::with_identifier("Game"));
    let mut ground = Sprite::with_identifier("Ground", TextureId(1), tile);
    ground.set_render_priority(100);
    game.create_object(ground).unwrap();

    let journal = Journal::default();
    let hud = scenes.push_scene(overlay("Hud", &journal));
    let mut icon = Sprite::with_identifier("Icon", TextureId(2), tile);
    icon.set_render_priority(-100);
    hud.create_object(icon).unwrap();

    scenes.render(&mut renderer, Color::BLACK);

    let textures: Vec<TextureId> = backend
        .commands()
        .into_iter()
        .filter_map(|command| match command {
            DrawCommand::Sprite { texture, .. } => Some(texture),
            _ => None,
        })
        .collect();
    assert_eq!(textures, vec![TextureId(1), TextureId(2)]);
}

//=== Objects =============================================================

#[test]
fn objects_follow_their_scene_lifecycle() {
    struct Counter {
        loads: u32,
        unloads: u32,
    }

    impl Object for Counter {
        fn identifier(&self) -> &str {
            "Counter"
        }

        fn fixed_update(&mut self, _context: &mut Context<'_>) {}

        fn variable_update(&mut self, _context: &mut Context<'_>, _delta_time: f64) {}

        fn on_load(&mut self) {
            self.loads += 1;
        }

        fn on_unload(&mut self) {
            self.unloads += 1;
        }
    }

    let mut scene = Scene::with_identifier("Level");
    scene.create_object(Counter { loads: 0, unloads: 0 }).unwrap();

    let mut scenes = SceneManager::new();
    scenes.push_scene(scene);

    let counter = scenes.active_scene().unwrap().object::<Counter>("Counter").unwrap();
    assert_eq!((counter.loads, counter.unloads), (1, 0));

    assert!(matches!(
        scenes.active_scene_mut().unwrap().create_object(Counter { loads: 0, unloads: 0 }),
        Err(EngineError::DuplicateObject { .. })
    ));
    assert!(matches!(
        scenes.active_scene().unwrap().object::<Sprite>("Counter"),
        Err(EngineError::ObjectTypeMismatch { .. })
    ));
}
