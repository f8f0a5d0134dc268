//! Input abstraction layer.
//!
//! Pointer events arrive in client (on-screen) coordinates. Desks live in
//! canvas-local space, so every event is translated by the canvas
//! container's on-screen top-left before any geometry is done.

use seat_core::Position;

/// A normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown { x: f32, y: f32 },

    /// Pointer moved while tracking.
    PointerMove { x: f32, y: f32 },

    /// Pointer released; commits the gesture in progress.
    PointerUp { x: f32, y: f32 },

    /// Pointer capture lost before a release arrived.
    PointerCancel,
}

impl InputEvent {
    pub fn from_pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    /// Extract position if this event carries one.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some(Position::new(*x, *y))
            }
            Self::PointerCancel => None,
        }
    }

    /// Re-express this event in canvas-local coordinates.
    pub fn to_canvas(self, origin: CanvasOrigin) -> Self {
        match self {
            Self::PointerDown { x, y } => Self::PointerDown {
                x: x - origin.left,
                y: y - origin.top,
            },
            Self::PointerMove { x, y } => Self::PointerMove {
                x: x - origin.left,
                y: y - origin.top,
            },
            Self::PointerUp { x, y } => Self::PointerUp {
                x: x - origin.left,
                y: y - origin.top,
            },
            Self::PointerCancel => Self::PointerCancel,
        }
    }
}

/// On-screen top-left of the canvas container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasOrigin {
    pub left: f32,
    pub top: f32,
}

impl CanvasOrigin {
    pub const fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}
