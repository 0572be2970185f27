//! Frontends for creating simple applications with `rastrum`.
//!
//! # Crate features
//!
//! * `minifb`:
//!   A windowed frontend using the [minifb](https://crates.io/crates/minifb)
//!   crate.

use std::time::Duration;

use re::render::{stats::Stats, target::Framebuffer};

#[cfg(feature = "minifb")]
pub mod minifb;

/// Per-frame state. The window run method passes an instance of `Frame`
/// to the callback function on every iteration of the main loop.
pub struct Frame<'a, Win> {
    /// Elapsed time since the start of the first frame.
    pub t: Duration,
    /// Elapsed time since the start of the previous frame.
    pub dt: Duration,
    /// Framebuffer in which to draw. Cleared before every frame.
    pub buf: &'a mut Framebuffer,
    /// Reference to the window object.
    pub win: &'a mut Win,
    /// Statistics accumulated over all frames so far.
    pub stats: &'a mut Stats,
}

/// Keys reported by [`Input`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Up,
    Down,
    Left,
    Right,
    Space,
    Shift,
    Escape,
}

/// A snapshot of the user input at the start of a frame.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Input {
    /// The keys currently held down.
    pub keys: Vec<Key>,
}

impl Input {
    /// Returns whether `key` is currently held down.
    pub fn is_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}

impl<Win> Frame<'_, Win> {
    /// Returns the elapsed time since the previous frame in seconds.
    pub fn dt_secs(&self) -> f32 {
        self.dt.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_down() {
        let input = Input { keys: vec![Key::W, Key::Shift] };
        assert!(input.is_down(Key::W));
        assert!(input.is_down(Key::Shift));
        assert!(!input.is_down(Key::S));
        assert!(!Input::default().is_down(Key::Escape));
    }

    #[test]
    fn frame_dt_secs() {
        let mut fb = Framebuffer::new(1, 1);
        let mut stats = Stats::new();
        let frame = Frame {
            t: Duration::from_secs(3),
            dt: Duration::from_millis(250),
            buf: &mut fb,
            win: &mut (),
            stats: &mut stats,
        };
        assert_eq!(frame.dt_secs(), 0.25);
    }
}
