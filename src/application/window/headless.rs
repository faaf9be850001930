use cgmath::Vector2;

use super::super::errors::*;
use super::super::events::Event;
use super::Visitor;

/// A window without surface. It delivers scripted events and requests to close once a fixed
/// number of frames have been presented.
pub struct HeadlessVisitor {
    dimensions: Vector2<u32>,
    frames: u32,
    presented: u32,
    scheduled: Vec<(u32, Event)>,
}

impl HeadlessVisitor {
    pub fn new(dimensions: Vector2<u32>, frames: u32) -> Self {
        HeadlessVisitor {
            dimensions,
            frames,
            presented: 0,
            scheduled: Vec::new(),
        }
    }

    /// Delivers `event` with the first poll after `frame` frames have been presented.
    pub fn schedule(&mut self, frame: u32, event: Event) {
        self.scheduled.push((frame, event));
    }

    /// The number of frames presented so far.
    #[inline]
    pub fn presented(&self) -> u32 {
        self.presented
    }
}

impl Visitor for HeadlessVisitor {
    fn poll_events(&mut self, events: &mut Vec<Event>) {
        let presented = self.presented;
        let mut i = 0;
        while i < self.scheduled.len() {
            if self.scheduled[i].0 <= presented {
                let (_, event) = self.scheduled.remove(i);
                if let Event::Resized(width, height) = event {
                    self.dimensions = Vector2::new(width, height);
                }

                events.push(event);
            } else {
                i += 1;
            }
        }

        if presented >= self.frames {
            events.push(Event::Closed);
        }
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }

    #[inline]
    fn dimensions(&self) -> Vector2<u32> {
        self.dimensions
    }
}
