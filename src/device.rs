//! Pointer automation: issuing clicks and raising the fail-safe.

use std::thread;
use std::time::{Duration, Instant};

use enigo::{Button, Direction, Enigo, Mouse, Settings};
use thiserror::Error;
use tracing::debug;

/// Side, in pixels, of the reserved square in each screen corner. A cursor
/// inside one of these squares stops the run instead of clicking.
pub const FAILSAFE_MARGIN: i32 = 10;

#[derive(Debug, Error)]
pub enum PointerError {
    #[error("fail-safe triggered: cursor at ({x}, {y}) is inside a screen corner")]
    FailSafe { x: i32, y: i32 },
    #[error("pointer backend error: {0}")]
    Backend(String),
}

/// Input-device automation: clicks at the current cursor position, raises the
/// fail-safe boundary signal, and supplies the sleep/monotonic-time
/// primitives the click loop paces itself with.
pub trait Pointer {
    /// Issues one left click at the current cursor position, or raises
    /// [`PointerError::FailSafe`] without clicking when the cursor sits in a
    /// reserved corner.
    fn click(&mut self) -> Result<(), PointerError>;

    fn now(&mut self) -> Instant;

    fn sleep(&mut self, duration: Duration);
}

/// Production pointer backed by the OS input stack.
pub struct SystemPointer {
    enigo: Enigo,
}

impl SystemPointer {
    pub fn open() -> Result<Self, PointerError> {
        let enigo = Enigo::new(&Settings::default()).map_err(backend)?;
        Ok(Self { enigo })
    }
}

impl Pointer for SystemPointer {
    fn click(&mut self) -> Result<(), PointerError> {
        // The corner check runs before the click is injected; a cursor parked
        // in a corner never produces one more click, and a backend that
        // cannot report the cursor position fails the click instead of
        // skipping the check.
        let (x, y) = self.enigo.location().map_err(backend)?;
        let (width, height) = self.enigo.main_display().map_err(backend)?;
        if in_failsafe_corner(x, y, width, height) {
            debug!(x, y, "cursor inside a fail-safe corner");
            return Err(PointerError::FailSafe { x, y });
        }

        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(backend)
    }

    fn now(&mut self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

fn backend(err: impl std::fmt::Display) -> PointerError {
    PointerError::Backend(err.to_string())
}

/// True when `(x, y)` lies within [`FAILSAFE_MARGIN`] pixels of a corner of a
/// `width` x `height` display.
pub fn in_failsafe_corner(x: i32, y: i32, width: i32, height: i32) -> bool {
    let near_x_edge = x < FAILSAFE_MARGIN || x >= width - FAILSAFE_MARGIN;
    let near_y_edge = y < FAILSAFE_MARGIN || y >= height - FAILSAFE_MARGIN;
    near_x_edge && near_y_edge
}
