//! Gesture tools for canvas interactions.
//!
//! Each tool is a small begin/update/commit state machine that translates
//! canvas-local input events into `DeskMutation`s for the `EntityStore`.
//! A tool ignores a second pointer-down while its gesture is in progress.
//!
//! | Gesture | Starts on | Commits on pointer-up | On pointer-cancel |
//! |---------|-----------|-----------------------|-------------------|
//! | Marquee | empty background | selection := desks overlapping the box | commit at last known point |
//! | Drag | a desk | move payload by the snapped delta | commit with zero delta |

use crate::input::InputEvent;
use seat_core::geometry::{BoundingBox, desks_in_rect, snap_to_grid};
use seat_core::{Desk, DeskId, DeskMutation, Position};

/// Which gesture a tool drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Marquee,
    Drag,
}

/// Read-only view of the store a tool needs to interpret an event.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    pub desks: &'a [Desk],
    pub selection: &'a [DeskId],
    /// Desk under the pointer, if any.
    pub hit: Option<DeskId>,
}

/// Trait for tools that handle input and produce mutations.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// True between the gesture's begin and its commit.
    fn in_progress(&self) -> bool;

    /// Handle a canvas-local event, returning zero or more mutations.
    fn handle(&mut self, event: &InputEvent, ctx: &ToolContext<'_>) -> Vec<DeskMutation>;
}

// ─── Marquee Tool ────────────────────────────────────────────────────────

/// Rubber-band selection over the background.
#[derive(Debug, Default)]
pub struct MarqueeTool {
    /// Set while selecting.
    start: Option<Position>,
    current: Position,
}

impl MarqueeTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live marquee rectangle, normalized so left/top are the minimums.
    pub fn rect(&self) -> Option<BoundingBox> {
        self.start
            .map(|start| BoundingBox::from_corners(start, self.current))
    }

    fn commit(&mut self, desks: &[Desk]) -> Vec<DeskMutation> {
        let Some(rect) = self.rect() else {
            return vec![];
        };
        self.start = None;
        // An empty hit list still replaces the selection.
        vec![DeskMutation::SetSelection(desks_in_rect(desks, &rect))]
    }
}

impl Tool for MarqueeTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Marquee
    }

    fn in_progress(&self) -> bool {
        self.start.is_some()
    }

    fn handle(&mut self, event: &InputEvent, ctx: &ToolContext<'_>) -> Vec<DeskMutation> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                if self.in_progress() || ctx.hit.is_some() {
                    return vec![];
                }
                let p = Position::new(x, y);
                self.start = Some(p);
                self.current = p;
                vec![DeskMutation::ClearSelection]
            }
            InputEvent::PointerMove { x, y } => {
                if self.in_progress() {
                    self.current = Position::new(x, y);
                }
                vec![]
            }
            InputEvent::PointerUp { x, y } => {
                if !self.in_progress() {
                    return vec![];
                }
                self.current = Position::new(x, y);
                self.commit(ctx.desks)
            }
            InputEvent::PointerCancel => self.commit(ctx.desks),
        }
    }
}

// ─── Drag Tool ───────────────────────────────────────────────────────────

/// Moves one desk, or the whole selection when the grabbed desk is selected.
#[derive(Debug, Default)]
pub struct DragTool {
    /// Desks carried by the current drag. Empty when idle.
    payload: Vec<DeskId>,
    start: Position,
    last: Position,
}

impl DragTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Desks being dragged.
    pub fn payload(&self) -> &[DeskId] {
        &self.payload
    }

    /// Snapped offset the payload would move by if dropped now.
    pub fn preview_delta(&self) -> Option<Position> {
        self.in_progress()
            .then(|| snap_to_grid(self.last.x - self.start.x, self.last.y - self.start.y))
    }

    fn finish(&mut self, drop: Position) -> Vec<DeskMutation> {
        let ids = std::mem::take(&mut self.payload);
        // Snap the delta, not the absolute positions, so the payload keeps
        // its relative arrangement.
        let delta = snap_to_grid(drop.x - self.start.x, drop.y - self.start.y);
        if ids.is_empty() || (delta.x == 0.0 && delta.y == 0.0) {
            return vec![];
        }
        vec![DeskMutation::MoveDesks {
            ids,
            dx: delta.x,
            dy: delta.y,
        }]
    }
}

impl Tool for DragTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Drag
    }

    fn in_progress(&self) -> bool {
        !self.payload.is_empty()
    }

    fn handle(&mut self, event: &InputEvent, ctx: &ToolContext<'_>) -> Vec<DeskMutation> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let Some(grabbed) = ctx.hit else {
                    return vec![];
                };
                if self.in_progress() {
                    return vec![];
                }
                self.payload = if ctx.selection.contains(&grabbed) {
                    ctx.selection.to_vec()
                } else {
                    vec![grabbed]
                };
                self.start = Position::new(x, y);
                self.last = self.start;
                vec![]
            }
            InputEvent::PointerMove { x, y } => {
                if self.in_progress() {
                    self.last = Position::new(x, y);
                }
                vec![]
            }
            InputEvent::PointerUp { x, y } => {
                if !self.in_progress() {
                    return vec![];
                }
                self.finish(Position::new(x, y))
            }
            InputEvent::PointerCancel => {
                let start = self.start;
                self.finish(start)
            }
        }
    }
}
