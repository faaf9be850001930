use cgmath::Vector2;
use gl;
use glutin;
use glutin::GlContext;

use super::super::errors::*;
use super::super::events::{Event, Key};
use super::super::settings::WindowParams;
use super::Visitor;

pub struct GlutinVisitor {
    window: glutin::GlWindow,
    events_loop: glutin::EventsLoop,
}

impl GlutinVisitor {
    pub fn new(params: &WindowParams) -> Result<Self> {
        let builder = glutin::WindowBuilder::new()
            .with_title(params.title.clone())
            .with_dimensions(glutin::dpi::LogicalSize::new(
                f64::from(params.size.x),
                f64::from(params.size.y),
            ));

        let (major, minor) = params.gl_version;
        let context = glutin::ContextBuilder::new()
            .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (major, minor)))
            .with_gl_profile(glutin::GlProfile::Core)
            .with_vsync(params.vsync);

        let events_loop = glutin::EventsLoop::new();
        let window = glutin::GlWindow::new(builder, context, &events_loop)?;

        unsafe {
            window.make_current()?;
            gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);
        }

        if !gl::Viewport::is_loaded() || !gl::CreateProgram::is_loaded() {
            return Err(Error::Loader("glViewport/glCreateProgram".into()));
        }

        info!(
            "Created window {:?} with a {}.{} core context.",
            params.title, major, minor
        );

        Ok(GlutinVisitor {
            window,
            events_loop,
        })
    }
}

impl Visitor for GlutinVisitor {
    fn poll_events(&mut self, events: &mut Vec<Event>) {
        let hidpi = self.window.get_hidpi_factor();
        self.events_loop.poll_events(|v| {
            if let Some(e) = from_event(v, hidpi) {
                events.push(e);
            }
        });
    }

    #[inline]
    fn swap_buffers(&mut self) -> Result<()> {
        self.window.swap_buffers()?;
        Ok(())
    }

    fn dimensions(&self) -> Vector2<u32> {
        match self.window.get_inner_size() {
            Some(size) => {
                let size = size.to_physical(self.window.get_hidpi_factor());
                Vector2::new(size.width as u32, size.height as u32)
            }
            None => Vector2::new(0, 0),
        }
    }
}

fn from_event(source: glutin::Event, hidpi: f64) -> Option<Event> {
    match source {
        glutin::Event::WindowEvent { event, .. } => from_window_event(&event, hidpi),
        _ => None,
    }
}

fn from_window_event(source: &glutin::WindowEvent, hidpi: f64) -> Option<Event> {
    match *source {
        glutin::WindowEvent::CloseRequested => Some(Event::Closed),

        glutin::WindowEvent::Resized(size) => {
            let size = size.to_physical(hidpi);
            Some(Event::Resized(size.width as u32, size.height as u32))
        }

        glutin::WindowEvent::KeyboardInput {
            input:
                glutin::KeyboardInput {
                    state,
                    virtual_keycode: Some(code),
                    ..
                },
            ..
        } => {
            let key = from_virtual_key_code(code)?;
            match state {
                glutin::ElementState::Pressed => Some(Event::KeyboardPressed { key }),
                glutin::ElementState::Released => Some(Event::KeyboardReleased { key }),
            }
        }

        _ => None,
    }
}

fn from_virtual_key_code(key: glutin::VirtualKeyCode) -> Option<Key> {
    match key {
        glutin::VirtualKeyCode::Escape => Some(Key::Escape),
        glutin::VirtualKeyCode::Space => Some(Key::Space),
        glutin::VirtualKeyCode::Return => Some(Key::Return),
        glutin::VirtualKeyCode::Tab => Some(Key::Tab),
        glutin::VirtualKeyCode::Left => Some(Key::Left),
        glutin::VirtualKeyCode::Up => Some(Key::Up),
        glutin::VirtualKeyCode::Right => Some(Key::Right),
        glutin::VirtualKeyCode::Down => Some(Key::Down),
        glutin::VirtualKeyCode::W => Some(Key::W),
        glutin::VirtualKeyCode::A => Some(Key::A),
        glutin::VirtualKeyCode::S => Some(Key::S),
        glutin::VirtualKeyCode::D => Some(Key::D),
        _ => None,
    }
}
