//! smolsoft demo: fly around a small scene drawn by the software rasterizer
//!
//! Usage: `smolsoft [scene.ron]`
//!
//! Click to grab the mouse and look around, Escape to let go.
//! WASD moves, Space and Left Shift rise and sink.

use std::sync::OnceLock;

use macroquad::prelude::*;
use smolsoft::assets::{load_model, load_scene, SceneConfig};
use smolsoft::rasterizer::{Framebuffer, Mat4, Model, Renderer, Surface, Target, Texture};
use smolsoft::VERSION;

const DEFAULT_SCENE: &str = "assets/scene.ron";

static SCENE: OnceLock<SceneConfig> = OnceLock::new();

/// Scene named on the command line, else the default scene file, else the
/// built-in scene
fn scene() -> &'static SceneConfig {
    SCENE.get_or_init(|| {
        let explicit = std::env::args().nth(1);
        let path = explicit.clone().unwrap_or_else(|| DEFAULT_SCENE.to_string());

        match load_scene(&path) {
            Ok(scene) => {
                log::info!("Loaded scene {} with {} objects", path, scene.objects.len());
                scene
            }
            Err(e) if explicit.is_some() => {
                log::error!("Failed to load scene {}: {}, using built-in scene", path, e);
                SceneConfig::default()
            }
            Err(e) => {
                log::warn!("No scene at {} ({}), using built-in scene", path, e);
                SceneConfig::default()
            }
        }
    })
}

fn window_conf() -> Conf {
    // Runs before main, so logging starts here
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene = scene();
    Conf {
        window_title: format!("{} v{}", scene.title, VERSION),
        window_width: (scene.frame_width as u32 * scene.window_scale) as i32,
        window_height: (scene.frame_height as u32 * scene.window_scale) as i32,
        window_resizable: true,
        ..Default::default()
    }
}

/// A loaded scene object, ready to draw
struct Drawable {
    model: Model,
    texture: Option<Texture>,
    transform: Mat4,
}

fn load_drawables(scene: &SceneConfig) -> Vec<Drawable> {
    let mut drawables = Vec::with_capacity(scene.objects.len());

    for object in &scene.objects {
        let model = match load_model(&object.model) {
            Ok(model) => model,
            Err(e) => {
                log::error!("Failed to load model {}: {}, skipping", object.model, e);
                continue;
            }
        };
        log::debug!("Loaded model {} ({} triangles)", object.model, model.len());

        drawables.push(Drawable {
            model,
            texture: object.texture.as_ref().map(|source| source.load()),
            transform: object.transform(),
        });
    }

    drawables
}

#[macroquad::main(window_conf)]
async fn main() {
    let scene = scene();
    let screen = scene.screen();
    let drawables = load_drawables(scene);

    let mut target = Target::new(Framebuffer::new(scene.frame_width, scene.frame_height));
    let mut camera = scene.camera;

    let mut mouse_grabbed = false;
    let mut last_mouse = mouse_position();

    log::info!("=== smolsoft v{} ===", VERSION);

    loop {
        // Mouse look
        if is_mouse_button_pressed(MouseButton::Left) && !mouse_grabbed {
            mouse_grabbed = true;
            set_cursor_grab(true);
            show_mouse(false);
        }
        if is_key_pressed(KeyCode::Escape) && mouse_grabbed {
            mouse_grabbed = false;
            set_cursor_grab(false);
            show_mouse(true);
        }

        let mouse = mouse_position();
        if mouse_grabbed {
            let sensitivity = scene.controls.mouse_sensitivity;
            camera.turn(-sensitivity * (mouse.0 - last_mouse.0), -sensitivity * (mouse.1 - last_mouse.1));
        }
        last_mouse = mouse;

        // Movement
        let axis = |positive: KeyCode, negative: KeyCode| {
            (is_key_down(positive) as i32 - is_key_down(negative) as i32) as f32
        };
        let step = get_frame_time() * scene.controls.move_speed;
        camera.advance(
            step * axis(KeyCode::W, KeyCode::S),
            step * axis(KeyCode::D, KeyCode::A),
            step * axis(KeyCode::Space, KeyCode::LeftShift),
        );

        // Draw the scene into the framebuffer
        target.clear_surface(scene.clear_color);
        target.clear_depth();

        let mut renderer = Renderer::new();
        for drawable in &drawables {
            renderer.set_sampler(drawable.texture.as_ref().map(|t| t as &dyn Surface));
            renderer.blit_model(&mut target, &camera, &screen, &drawable.model, &drawable.transform);
        }
        log::trace!("frame: {:?}", renderer.stats());

        // Present, scaled to fit the window with the frame's aspect ratio
        clear_background(BLACK);

        let fb = target.surface();
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, fb.as_bytes());
        texture.set_filter(FilterMode::Nearest);

        let scale = (screen_width() / fb.width as f32).min(screen_height() / fb.height as f32);
        let (w, h) = (fb.width as f32 * scale, fb.height as f32 * scale);
        draw_texture_ex(
            &texture,
            (screen_width() - w) / 2.0,
            (screen_height() - h) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(w, h)),
                ..Default::default()
            },
        );

        if !mouse_grabbed {
            draw_text("click to look around, WASD to move", 8.0, 20.0, 20.0, GRAY);
        }

        next_frame().await;
    }
}
