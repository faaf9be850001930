extern crate glsandbox;

use std::cell::Cell;
use std::rc::Rc;

use glsandbox::application::errors::Result;
use glsandbox::application::window::headless::HeadlessVisitor;
use glsandbox::application::window::Visitor;
use glsandbox::prelude::*;
use glsandbox::scene::presets;

fn basic_engine(window: Window) -> (Engine, Rc<HeadlessStats>) {
    let (ctx, stats) = Context::headless();
    let mut engine = Engine::new(window, ctx, &RenderParams::default());
    engine.load_scene(&Settings::default()).unwrap();
    (engine, stats)
}

#[test]
fn runs_until_closed() {
    let window = Window::headless(&WindowParams::default(), 5);
    let (mut engine, stats) = basic_engine(window);

    assert_eq!(engine.run().unwrap(), 5);
    assert_eq!(stats.clears.get(), 5);
    assert_eq!(stats.draw_elements_calls.get(), 5);
    assert_eq!(stats.vertices_drawn.get(), 30);
    assert_eq!(stats.viewports.get(), 1);

    // The program stays bound across frames.
    assert_eq!(stats.use_program_calls.get(), 3);
}

#[test]
fn animates_red_channel() {
    let window = Window::headless(&WindowParams::default(), 4);
    let (mut engine, stats) = basic_engine(window);
    engine.run().unwrap();

    let uniforms = stats.uniforms.borrow();
    // The initial upload, then one per frame.
    assert_eq!(uniforms.len(), 5);
    assert_eq!(uniforms[0].1, presets::BASIC_COLOR);

    let reds: Vec<_> = uniforms[1..].iter().map(|v| (v.1)[0]).collect();
    assert_eq!(reds[0], 0.0);
    for pair in reds.windows(2) {
        assert!((pair[1] - pair[0] - 0.05).abs() < 1e-6);
    }

    for &(location, value) in &uniforms[1..] {
        assert_eq!(location, 0);
        assert_eq!(&value[1..], &[0.3, 0.8, 1.0]);
    }
}

#[test]
fn escape_closes() {
    let mut visitor = HeadlessVisitor::new(Vector2::new(800, 600), 100);
    visitor.schedule(0, Event::KeyboardPressed { key: Key::Escape });

    let (mut engine, _) = basic_engine(Window::from_visitor(Box::new(visitor)));

    // The frame in which escape is noticed is still drawn.
    assert_eq!(engine.run().unwrap(), 2);
    assert!(engine.window().should_close());
}

#[test]
fn resize_updates_viewport() {
    let mut visitor = HeadlessVisitor::new(Vector2::new(800, 600), 3);
    visitor.schedule(1, Event::Resized(1024, 768));

    let (mut engine, stats) = basic_engine(Window::from_visitor(Box::new(visitor)));
    engine.run().unwrap();

    assert_eq!(stats.viewports.get(), 2);
    assert_eq!(engine.window().dimensions(), Vector2::new(1024, 768));
}

#[test]
fn two_triangles_scene() {
    let (ctx, stats) = Context::headless();
    let window = Window::headless(&WindowParams::default(), 3);
    let mut engine = Engine::new(window, ctx, &RenderParams::default());

    let mut settings = Settings::default();
    settings.scene = SceneKind::TwoTriangles;
    engine.load_scene(&settings).unwrap();
    assert_eq!(engine.pipelines().len(), 2);

    assert_eq!(engine.run().unwrap(), 3);
    assert_eq!(stats.draw_arrays_calls.get(), 6);
    assert_eq!(stats.vertices_drawn.get(), 18);
    assert_eq!(stats.polygon_mode.get(), PolygonMode::Fill);

    drop(engine);
    assert_eq!(stats.live_objects(), 0);
}

#[test]
fn setup_headless() {
    let mut settings = Settings::default();
    settings.headless_frames = Some(2);

    let (window, ctx) = Engine::setup(&settings).unwrap();
    let mut engine = Engine::new(window, ctx, &settings.render);
    engine.load_scene(&settings).unwrap();
    assert_eq!(engine.run().unwrap(), 2);
}

/// A window that records how many driver objects are still alive when it, and with it the
/// context, goes away.
struct ContextWindow {
    stats: Rc<HeadlessStats>,
    seen: Rc<Cell<Option<usize>>>,
    frames: u32,
    presented: u32,
}

impl Visitor for ContextWindow {
    fn poll_events(&mut self, events: &mut Vec<Event>) {
        if self.presented >= self.frames {
            events.push(Event::Closed);
        }
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }

    fn dimensions(&self) -> Vector2<u32> {
        Vector2::new(800, 600)
    }
}

impl Drop for ContextWindow {
    fn drop(&mut self) {
        self.seen.set(Some(self.stats.live_objects()));
    }
}

#[test]
fn objects_released_before_window() {
    let (ctx, stats) = Context::headless();
    let seen = Rc::new(Cell::new(None));
    let window = Window::from_visitor(Box::new(ContextWindow {
        stats: stats.clone(),
        seen: seen.clone(),
        frames: 2,
        presented: 0,
    }));

    let mut engine = Engine::new(window, ctx, &RenderParams::default());
    let mut settings = Settings::default();
    settings.scene = SceneKind::TwoTriangles;
    engine.load_scene(&settings).unwrap();
    assert!(stats.live_objects() > 0);

    assert_eq!(engine.run().unwrap(), 2);
    drop(engine);
    assert_eq!(seen.get(), Some(0));
}
