//! Grid snapping, desk footprints, and box hit testing.
//!
//! Footprints are always derived from rotation, never stored, so the box the
//! view draws and the box the marquee tests cannot drift apart.

use crate::id::DeskId;
use crate::model::{Desk, Position, Rotation};

/// Snapping increment for positions and move deltas, in canvas units.
pub const GRID_UNIT: f32 = 25.0;

/// Unrotated desk width.
pub const DESK_WIDTH: f32 = 100.0;

/// Unrotated desk height.
pub const DESK_HEIGHT: f32 = 50.0;

/// Round `v` to the nearest multiple of `unit`, halves toward +∞.
pub fn snap_to_unit(v: f32, unit: f32) -> f32 {
    (v / unit + 0.5).floor() * unit
}

/// Round both coordinates to the nearest grid multiple.
pub fn snap_to_grid(x: f32, y: f32) -> Position {
    Position::new(snap_to_unit(x, GRID_UNIT), snap_to_unit(y, GRID_UNIT))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f32,
    pub height: f32,
}

pub fn footprint_for(rotation: Rotation) -> Footprint {
    if rotation.is_quarter_turned() {
        Footprint {
            width: DESK_HEIGHT,
            height: DESK_WIDTH,
        }
    } else {
        Footprint {
            width: DESK_WIDTH,
            height: DESK_HEIGHT,
        }
    }
}

/// Effective width/height of a desk at its current rotation.
pub fn footprint(desk: &Desk) -> Footprint {
    footprint_for(desk.rotation)
}

/// Axis-aligned box in canvas-local units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    /// Normalize two arbitrary corners (e.g. marquee start and current point).
    pub fn from_corners(a: Position, b: Position) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Edges are inclusive.
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

pub fn bounding_box(desk: &Desk) -> BoundingBox {
    let fp = footprint(desk);
    BoundingBox {
        left: desk.position.x,
        top: desk.position.y,
        right: desk.position.x + fp.width,
        bottom: desk.position.y + fp.height,
    }
}

/// AABB overlap. Touching edges count as overlap; only strict separation
/// on some axis rules it out.
pub fn intersects(a: &BoundingBox, b: &BoundingBox) -> bool {
    !(a.right < b.left || a.left > b.right || a.bottom < b.top || a.top > b.bottom)
}

/// Topmost desk under `point`. Selected desks paint above unselected
/// ones, and within each layer later desks paint over earlier ones.
/// `None` means background.
pub fn hit_test(desks: &[Desk], selection: &[DeskId], point: Position) -> Option<DeskId> {
    let under = |d: &&Desk| bounding_box(d).contains(point);
    desks
        .iter()
        .rev()
        .filter(|d| selection.contains(&d.id))
        .find(under)
        .or_else(|| desks.iter().rev().find(under))
        .map(|d| d.id)
}

/// Every desk whose box overlaps `rect`, in collection order.
/// Used for marquee selection.
pub fn desks_in_rect(desks: &[Desk], rect: &BoundingBox) -> Vec<DeskId> {
    desks
        .iter()
        .filter(|d| intersects(&bounding_box(d), rect))
        .map(|d| d.id)
        .collect()
}
