//! smolsoft3d viewer
//!
//! Renders the scene on the CPU every frame and shows the result scaled up
//! in a window. WASD moves and Space/Shift rise and sink. The mouse looks
//! around once the window is clicked; Escape releases it. F12 saves
//! `screenshot.png`.

use std::path::{Path, PathBuf};

use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;

use smolsoft3d::app::{App, FrameInput};
use smolsoft3d::config::{Config, CONFIG_FILE};
use smolsoft3d::scene::{load_scene, Scene};
use smolsoft3d::VERSION;

const SCREENSHOT_FILE: &str = "screenshot.png";

/// Config file from the first argument, else the default name
fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

fn window_conf() -> Conf {
    let (config, _) = Config::load_or_default(config_path());
    Conf {
        window_title: format!("smolsoft3d v{}", VERSION),
        window_width: (config.width as u32 * config.window_scale) as i32,
        window_height: (config.height as u32 * config.window_scale) as i32,
        window_resizable: true,
        ..Default::default()
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load the configured scene, falling back to the built-in one
fn load_scene_or_demo(path: &Path) -> Scene {
    match load_scene(path) {
        Ok(scene) => {
            tracing::info!("loaded scene {}", path.display());
            scene
        }
        Err(e) => {
            tracing::warn!("using built-in scene, {} not loaded: {}", path.display(), e);
            Scene::demo()
        }
    }
}

fn axis(positive: KeyCode, negative: KeyCode) -> f32 {
    let mut value = 0.0;
    if is_key_down(positive) {
        value += 1.0;
    }
    if is_key_down(negative) {
        value -= 1.0;
    }
    value
}

/// Mouse motion in window pixels since last frame.
///
/// Fed by raw motion while the cursor is grabbed.
fn mouse_motion() -> ::glam::Vec2 {
    // local coordinates span -1..1 and the delta is last minus current
    let delta = mouse_delta_position();
    ::glam::Vec2::new(
        -delta.x * screen_width() * 0.5,
        -delta.y * screen_height() * 0.5,
    )
}

#[macroquad::main(window_conf)]
async fn main() {
    let path = config_path();
    let (config, config_err) = Config::load_or_default(&path);
    init_logging(&config.log_filter);
    if let Some(e) = config_err {
        tracing::warn!("using default config, {} not loaded: {}", path.display(), e);
    }

    let scene = load_scene_or_demo(&config.scene);
    let base = config.scene.parent().map(Path::to_path_buf).unwrap_or_default();
    let mut app = App::new(config, &scene, &base);

    tracing::info!(
        "smolsoft3d v{} {}x{}, {} objects",
        VERSION,
        app.target.width,
        app.target.height,
        app.drawables.len()
    );

    loop {
        let capture = is_mouse_button_pressed(MouseButton::Left) && !app.mouse_captured;
        let release = is_key_pressed(KeyCode::Escape) && app.mouse_captured;

        if capture {
            set_cursor_grab(true);
            show_mouse(false);
        }
        if release {
            set_cursor_grab(false);
            show_mouse(true);
        }

        let input = FrameInput {
            advance: axis(KeyCode::W, KeyCode::S),
            strafe: axis(KeyCode::D, KeyCode::A),
            ascend: axis(KeyCode::Space, KeyCode::LeftShift),
            mouse_delta: mouse_motion(),
            capture,
            release,
        };

        app.update(&input, get_frame_time());
        app.render();

        if is_key_pressed(KeyCode::F12) {
            if let Err(e) = app.screenshot(SCREENSHOT_FILE) {
                tracing::warn!("screenshot failed: {}", e);
            }
        }

        // Present the target, scaled to the window with no filtering
        let texture = Texture2D::from_rgba8(
            app.target.width as u16,
            app.target.height as u16,
            &app.target.pixels,
        );
        texture.set_filter(FilterMode::Nearest);

        clear_background(BLACK);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        next_frame().await;
    }
}
