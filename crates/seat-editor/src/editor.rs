//! Editor controller.
//!
//! Owns the `EntityStore` and the two gesture tools, routes pointer events
//! between them, and exposes the toolbar commands that act on the current
//! selection. Hosts (the wasm bridge, tests) talk only to [`Editor`].

use crate::input::{CanvasOrigin, InputEvent};
use crate::tools::{DragTool, MarqueeTool, Tool, ToolContext, ToolKind};
use seat_core::geometry::{BoundingBox, hit_test};
use seat_core::{DeskId, DeskKind, EntityStore, GroupId, Result, SeatError};

#[derive(Debug, Default)]
pub struct Editor {
    store: EntityStore,
    marquee: MarqueeTool,
    drag: DragTool,
    origin: CanvasOrigin,
    /// Set when a marquee commits so the trailing background click does not
    /// wipe the selection it just produced. Cleared by `tick`.
    suppress_background_click: bool,
}

impl Editor {
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            marquee: MarqueeTool::new(),
            drag: DragTool::new(),
            origin: CanvasOrigin::default(),
            suppress_background_click: false,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// Update the canvas container's on-screen top-left (after scroll/resize).
    pub fn set_canvas_origin(&mut self, left: f32, top: f32) {
        self.origin = CanvasOrigin::new(left, top);
    }

    pub fn canvas_origin(&self) -> CanvasOrigin {
        self.origin
    }

    /// Live marquee rectangle in canvas space, for the overlay.
    pub fn marquee_rect(&self) -> Option<BoundingBox> {
        self.marquee.rect()
    }

    /// Desks carried by the drag in progress.
    pub fn drag_payload(&self) -> &[DeskId] {
        self.drag.payload()
    }

    /// The gesture currently in progress, if any.
    pub fn active_gesture(&self) -> Option<ToolKind> {
        if self.marquee.in_progress() {
            Some(ToolKind::Marquee)
        } else if self.drag.in_progress() {
            Some(ToolKind::Drag)
        } else {
            None
        }
    }

    pub fn is_background_click_suppressed(&self) -> bool {
        self.suppress_background_click
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Pointer pressed at client coordinates. A press on a desk starts a
    /// drag, a press on the background starts a marquee. Ignored while
    /// either gesture is in progress. Returns true if the store changed or
    /// a marquee overlay appeared.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<bool> {
        if self.active_gesture().is_some() {
            log::debug!("pointer down ignored: gesture already in progress");
            return Ok(false);
        }
        let event = InputEvent::from_pointer_down(x, y).to_canvas(self.origin);
        let hit = event
            .position()
            .and_then(|p| hit_test(self.store.desks(), self.store.selection(), p));
        let kind = if hit.is_some() {
            ToolKind::Drag
        } else {
            ToolKind::Marquee
        };
        let changed = self.route(kind, &event, hit)?;
        Ok(changed || self.marquee.in_progress())
    }

    /// Pointer moved. Returns true while a gesture is tracking it.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<bool> {
        let Some(kind) = self.active_gesture() else {
            return Ok(false);
        };
        let event = InputEvent::from_pointer_move(x, y).to_canvas(self.origin);
        self.route(kind, &event, None)?;
        Ok(true)
    }

    /// Pointer released: commits the gesture in progress.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> Result<bool> {
        let event = InputEvent::from_pointer_up(x, y).to_canvas(self.origin);
        self.commit(&event)
    }

    /// Pointer capture lost. A marquee commits at its last point, a drag
    /// commits with zero delta.
    pub fn pointer_cancel(&mut self) -> Result<bool> {
        self.commit(&InputEvent::PointerCancel)
    }

    fn commit(&mut self, event: &InputEvent) -> Result<bool> {
        let Some(kind) = self.active_gesture() else {
            return Ok(false);
        };
        if kind == ToolKind::Marquee {
            self.suppress_background_click = true;
        }
        self.route(kind, event, None)?;
        Ok(true)
    }

    fn route(&mut self, kind: ToolKind, event: &InputEvent, hit: Option<DeskId>) -> Result<bool> {
        let ctx = ToolContext {
            desks: self.store.desks(),
            selection: self.store.selection(),
            hit,
        };
        let mutations = match kind {
            ToolKind::Marquee => self.marquee.handle(event, &ctx),
            ToolKind::Drag => self.drag.handle(event, &ctx),
        };
        self.store.apply_mutations(mutations)
    }

    // ─── Clicks ──────────────────────────────────────────────────────────

    /// Ordinary click on the empty canvas. Clears the selection unless a
    /// marquee just committed. Returns true if the selection was cleared.
    pub fn background_click(&mut self) -> bool {
        if self.suppress_background_click {
            self.suppress_background_click = false;
            return false;
        }
        self.store.clear_selection();
        true
    }

    /// End of an event-loop turn: drop any pending click suppression.
    pub fn tick(&mut self) {
        self.suppress_background_click = false;
    }

    /// Single click on a desk toggles its selection.
    pub fn click_desk(&mut self, id: DeskId) -> Result<()> {
        if !self.store.contains_desk(id) {
            return Err(SeatError::DeskNotFound(id));
        }
        self.store.toggle_desk_selection(id);
        Ok(())
    }

    /// Double click on a desk rotates it a quarter turn.
    pub fn double_click_desk(&mut self, id: DeskId) -> Result<()> {
        if !self.store.contains_desk(id) {
            return Err(SeatError::DeskNotFound(id));
        }
        self.store.rotate_desk(id);
        Ok(())
    }

    // ─── Toolbar commands ────────────────────────────────────────────────

    pub fn add_desk(&mut self, kind: DeskKind) -> DeskId {
        self.store.add_desk(kind)
    }

    /// Onboarding: seed the canvas with `count` student desks.
    pub fn add_desks(&mut self, count: usize) -> Vec<DeskId> {
        self.store.add_desks(count, DeskKind::Student)
    }

    /// Remove every selected desk. Returns how many were removed.
    pub fn remove_selected(&mut self) -> Result<usize> {
        let selected = self.selected_or_err()?;
        let removed = selected
            .iter()
            .filter(|id| self.store.remove_desk(**id))
            .count();
        self.store.clear_selection();
        log::info!("removed {removed} selected desk(s)");
        Ok(removed)
    }

    /// Rotate every selected desk a quarter turn.
    pub fn rotate_selected(&mut self) -> Result<usize> {
        let selected = self.selected_or_err()?;
        for id in &selected {
            self.store.rotate_desk(*id);
        }
        self.store.clear_selection();
        Ok(selected.len())
    }

    /// Group the selection under `label`. Needs at least two desks.
    pub fn group_selected(&mut self, label: &str) -> Result<GroupId> {
        let selected = self.selected_or_err()?;
        if selected.len() < 2 {
            return Err(SeatError::invalid("select at least two desks to group"));
        }
        let label = label.trim();
        let group = self.store.group_desks(label, &selected)?;
        self.store.clear_selection();
        Ok(group)
    }

    pub fn save_layout(&mut self, name: &str) -> Result<()> {
        self.store.save_layout(name.trim())
    }

    pub fn load_layout(&mut self, name: &str) -> Result<()> {
        self.store.load_layout(name.trim())
    }

    /// Seat a roster at random. Blank entries are dropped first.
    pub fn assign_students(&mut self, names: &[String]) -> usize {
        let names: Vec<String> = names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        self.store.assign_students(&names)
    }

    fn selected_or_err(&self) -> Result<Vec<DeskId>> {
        let selected = self.store.selection().to_vec();
        if selected.is_empty() {
            return Err(SeatError::invalid("no desks selected"));
        }
        Ok(selected)
    }
}
