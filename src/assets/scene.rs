//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files. Every
//! field has a default, so a scene file only needs to list what it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::rasterizer::{Camera, Color, Mat4, Screen, Texture, Vec3, HEIGHT, WIDTH};

/// Error type for scene loading
#[derive(Debug)]
pub enum SceneError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::ParseError(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::SerializeError(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IoError(e) => write!(f, "IO error: {}", e),
            SceneError::ParseError(e) => write!(f, "Parse error: {}", e),
            SceneError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {}

/// Where an object's texture comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TextureSource {
    /// Image file (png, jpeg or bmp), relative to the working directory
    File(String),
    /// Generated two-color checkerboard
    Checkerboard { size: usize, color1: Color, color2: Color },
}

impl TextureSource {
    /// Build the texture. A file that fails to load falls back to a
    /// magenta/black checkerboard so the object stays visible.
    pub fn load(&self) -> Texture {
        match self {
            TextureSource::File(path) => match Texture::from_file(path) {
                Ok(texture) => {
                    log::debug!("loaded texture {} ({}x{})", path, texture.width, texture.height);
                    texture
                }
                Err(e) => {
                    log::warn!("{}, using checkerboard", e);
                    Texture::checkerboard(32, 32, Color::new(255, 0, 255), Color::BLACK)
                }
            },
            TextureSource::Checkerboard { size, color1, color2 } => {
                Texture::checkerboard(*size, *size, *color1, *color2)
            }
        }
    }
}

/// One model placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneObject {
    /// Path to a model text file
    pub model: String,
    /// Texture bound while drawing; `None` draws vertex colors only
    pub texture: Option<TextureSource>,
    pub translation: Vec3,
    /// Rotation about Y in degrees
    pub rotation_y: f32,
    pub scale: f32,
}

impl SceneObject {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..Self::default()
        }
    }

    /// Model-to-world transform: scale, then rotate, then translate
    pub fn transform(&self) -> Mat4 {
        Mat4::translation(self.translation)
            * Mat4::rotation_y(self.rotation_y)
            * Mat4::scale(Vec3::new(self.scale, self.scale, self.scale))
    }
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            model: String::new(),
            texture: None,
            translation: Vec3::ZERO,
            rotation_y: 0.0,
            scale: 1.0,
        }
    }
}

/// Fly-camera controller tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// World units per second
    pub move_speed: f32,
    /// Degrees per pixel of mouse motion
    pub mouse_sensitivity: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            move_speed: 2.2,
            mouse_sensitivity: 0.2,
        }
    }
}

/// Everything the demo needs to set up a window and draw a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub title: String,
    /// Window size is the frame size times this
    pub window_scale: u32,
    pub frame_width: usize,
    pub frame_height: usize,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub clear_color: Color,
    pub camera: Camera,
    pub controls: Controls,
    pub objects: Vec<SceneObject>,
}

impl SceneConfig {
    pub fn screen(&self) -> Screen {
        Screen::new(self.frame_width as f32, self.frame_height as f32, self.fov)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let floor = SceneObject {
            texture: Some(TextureSource::Checkerboard {
                size: 64,
                color1: Color::new(200, 200, 200),
                color2: Color::new(90, 90, 110),
            }),
            ..SceneObject::new("assets/floor.txt")
        };
        let crate_box = SceneObject {
            texture: Some(TextureSource::File("assets/crate.png".to_string())),
            translation: Vec3::new(1.5, 0.0, 1.0),
            rotation_y: 20.0,
            ..SceneObject::new("assets/crate.txt")
        };
        let spike = SceneObject {
            translation: Vec3::new(-2.0, 0.0, 2.0),
            ..SceneObject::new("assets/spike.txt")
        };

        Self {
            title: "smolsoft".to_string(),
            window_scale: 3,
            frame_width: WIDTH,
            frame_height: HEIGHT,
            fov: 60.0,
            clear_color: Color::BLACK,
            camera: Camera::new(Vec3::new(3.5, 1.5, -2.0), 45.0, -20.0),
            controls: Controls::default(),
            objects: vec![floor, crate_box, SceneObject::new("assets/triangle.txt"), spike],
        }
    }
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneConfig, SceneError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &SceneConfig, path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(scene, config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Load a scene from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<SceneConfig, SceneError> {
    let scene: SceneConfig = ron::from_str(s)?;
    Ok(scene)
}
