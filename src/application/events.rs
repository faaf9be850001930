/// The events the frame loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The window has been asked to close.
    Closed,
    /// The framebuffer of the window has a new size in pixels.
    Resized(u32, u32),
    /// Pressed event on keyboard has been received.
    KeyboardPressed { key: Key },
    /// Released event from keyboard has been received.
    KeyboardReleased { key: Key },
}

/// Symbolic name for a keyboard key.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub enum Key {
    /// The Escape key, next to F1.
    Escape,
    Space,
    Return,
    Tab,
    Left,
    Up,
    Right,
    Down,
    W,
    A,
    S,
    D,
}
