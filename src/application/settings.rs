//! Functions for loading sandbox settings.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use cgmath::Vector2;
use serde_json;

use crate::errors::*;
use crate::video::renderer::DEFAULT_CLEAR_COLOR;

/// The shader resource that is drawn by the `basic` scene unless configured otherwise.
pub const DEFAULT_SHADER: &str = "res/shaders/Basic.shader";

/// A structure containing configuration data for the sandbox, which is used to specify
/// hardware setup stuff to create the window and what gets drawn into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowParams,
    pub render: RenderParams,
    pub scene: SceneKind,
    /// The tagged shader resource used by the `basic` scene.
    pub shader: PathBuf,
    /// Runs without a window for the given number of frames.
    pub headless_frames: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            window: WindowParams::default(),
            render: RenderParams::default(),
            scene: SceneKind::Basic,
            shader: PathBuf::from(DEFAULT_SHADER),
            headless_frames: None,
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file. Missing fields keep their defaults.
    pub fn load<T: AsRef<Path>>(path: T) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|_| format!("Failed to open settings {:?}.", path))?;

        let settings = serde_json::from_reader(BufReader::new(file))
            .with_context(|_| format!("Failed to parse settings {:?}.", path))?;

        Ok(settings)
    }

    /// Parses settings from a JSON string.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowParams {
    /// Sets the title of window.
    pub title: String,
    /// Sets the size in *points* of the client area of the window.
    pub size: Vector2<u32>,
    /// Specifies whether should we have vsync.
    pub vsync: bool,
    /// The `(major, minor)` version of the requested core profile context.
    pub gl_version: (u8, u8),
}

impl Default for WindowParams {
    fn default() -> Self {
        WindowParams {
            title: "LearnOpenGL".to_owned(),
            size: Vector2::new(800, 600),
            vsync: true,
            gl_version: (3, 3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// The color the framebuffer is cleared with every frame.
    pub clear_color: [f32; 4],
}

impl Default for RenderParams {
    fn default() -> Self {
        RenderParams {
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }
}

/// The scenes the sandbox knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// A quad made of two indexed triangles, colored by an animated uniform.
    Basic,
    /// Two triangles drawn from inline shaders, the second one as wireframe.
    TwoTriangles,
}

impl SceneKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "basic" => Some(SceneKind::Basic),
            "two_triangles" => Some(SceneKind::TwoTriangles),
            _ => None,
        }
    }
}
