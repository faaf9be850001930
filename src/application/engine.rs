use cgmath::Vector2;

use crate::errors::*;
use crate::scene::pipeline::Pipeline;
use crate::scene::presets;
use crate::video::prelude::*;

use super::events::{Event, Key};
use super::settings::{RenderParams, SceneKind, Settings};
use super::window::Window;

/// `Engine` is the root object of the sandbox. It owns the window, the graphics context and
/// the pipelines, and runs the blocking frame loop over them.
pub struct Engine {
    // Fields drop in declaration order. GPU objects must be released while the window still
    // owns a current context.
    pipelines: Vec<Pipeline>,
    renderer: Renderer,
    ctx: Context,
    window: Window,
    frames: u64,
}

impl Engine {
    /// Creates the window and the graphics context described by `settings`. A headless
    /// window and device are used when `settings.headless_frames` is set.
    pub fn setup(settings: &Settings) -> Result<(Window, Context)> {
        if let Some(frames) = settings.headless_frames {
            info!("Running headless for {} frame(s).", frames);
            let window = Window::headless(&settings.window, frames);
            let (ctx, _) = Context::headless();
            return Ok((window, ctx));
        }

        Self::setup_gl(settings)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn setup_gl(settings: &Settings) -> Result<(Window, Context)> {
        use crate::video::backends::gl::GLVisitor;

        let window = Window::new(&settings.window)?;
        // The window made its context current on this thread and loaded the functions.
        let visitor = unsafe { GLVisitor::new()? };
        Ok((window, Context::new(Box::new(visitor))))
    }

    #[cfg(target_arch = "wasm32")]
    fn setup_gl(_: &Settings) -> Result<(Window, Context)> {
        bail!("OpenGL windows are not supported on this platform.");
    }

    pub fn new(window: Window, ctx: Context, params: &RenderParams) -> Self {
        Engine {
            pipelines: Vec::new(),
            renderer: Renderer::new(params.clear_color),
            ctx,
            window,
            frames: 0,
        }
    }

    /// Builds the pipelines of a preset scene and appends them.
    pub fn load_scene(&mut self, settings: &Settings) -> Result<()> {
        let pipelines = match settings.scene {
            SceneKind::Basic => presets::basic(&mut self.ctx, &settings.shader)?,
            SceneKind::TwoTriangles => presets::two_triangles(&mut self.ctx)?,
        };

        info!(
            "Loaded scene {:?} with {} pipeline(s).",
            settings.scene,
            pipelines.len()
        );

        self.pipelines.extend(pipelines);
        Ok(())
    }

    pub fn add_pipeline(&mut self, pipeline: Pipeline) {
        self.pipelines.push(pipeline);
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[inline]
    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    #[inline]
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Gives mutable access to the graphics context, e.g. to create pipelines.
    #[inline]
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    #[inline]
    pub fn pipelines(&self) -> &[Pipeline] {
        &self.pipelines
    }

    /// The number of frames presented so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs the main loop of `Engine`, this will block the working thread until the window
    /// is asked to close. Returns the number of frames presented.
    pub fn run(&mut self) -> Result<u64> {
        let dimensions = self.window.dimensions();
        self.renderer
            .set_viewport(&mut self.ctx, Vector2::new(0, 0), dimensions)?;

        while !self.window.should_close() {
            self.advance()?;
        }

        info!("Window closed after {} frame(s).", self.frames);
        Ok(self.frames)
    }

    /// Runs a single iteration of the frame loop.
    pub fn advance(&mut self) -> Result<()> {
        if self.window.is_key_down(Key::Escape) {
            self.window.set_should_close(true);
        }

        self.renderer.clear(&mut self.ctx)?;
        for v in &mut self.pipelines {
            v.draw(&mut self.ctx, &self.renderer)?;
        }

        self.window.swap_buffers()?;
        self.frames += 1;

        for v in self.window.poll_events() {
            if let Event::Resized(width, height) = *v {
                debug!("Window resized to {}x{}.", width, height);
                self.renderer.set_viewport(
                    &mut self.ctx,
                    Vector2::new(0, 0),
                    Vector2::new(width, height),
                )?;
            }
        }

        Ok(())
    }
}
