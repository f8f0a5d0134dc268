//! Core data model for classroom seating layouts.
//!
//! A layout is a flat, ordered collection of fixed-size rectangular desks on
//! a continuous plane. Collection order is meaningful: it drives automatic
//! placement, marquee result order, roster pairing, and which desk is on top
//! for hit testing. Groups are labels over desks, not containers.

use crate::id::{DeskId, GroupId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

// ─── Position ────────────────────────────────────────────────────────────

/// A point in canvas-local units. For desks this is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

// ─── Desk kind & rotation ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeskKind {
    Teacher,
    #[default]
    Student,
}

impl DeskKind {
    /// Parse the lowercase name used on the wire and by the view layer.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "teacher" => Some(Self::Teacher),
            "student" => Some(Self::Student),
            _ => None,
        }
    }
}

/// Quarter-turn rotation. Serialized as degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Advance by 90° modulo 360.
    pub const fn next(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// True at 90° and 270°, where width and height swap.
    pub const fn is_quarter_turned(self) -> bool {
        self.degrees() % 180 != 0
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(deg: u16) -> Result<Self, Self::Error> {
        match deg % 360 {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(format!("rotation must be a multiple of 90, got {other}")),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(r: Rotation) -> Self {
        r.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

// ─── Desk ────────────────────────────────────────────────────────────────

/// A placed seat. The persisted record is
/// `{id, kind, position:{x,y}, rotation, groupId, assignedStudent}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Desk {
    pub id: DeskId,
    /// Older saves call this field `type`.
    #[serde(alias = "type")]
    pub kind: DeskKind,
    pub position: Position,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_student: Option<String>,
}

impl Desk {
    pub fn new(id: DeskId, kind: DeskKind, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            rotation: Rotation::Deg0,
            group_id: None,
            assigned_student: None,
        }
    }

    pub fn is_student(&self) -> bool {
        self.kind == DeskKind::Student
    }

    /// Text the view shows on the desk.
    pub fn display_label(&self) -> String {
        match (self.kind, &self.assigned_student) {
            (DeskKind::Teacher, _) => "Teacher".to_string(),
            (DeskKind::Student, Some(name)) => name.clone(),
            (DeskKind::Student, None) => format!("Student {}", self.id),
        }
    }
}

// ─── Group ───────────────────────────────────────────────────────────────

/// Member list of a group. Most classroom clusters are small.
pub type GroupMembers = SmallVec<[DeskId; 8]>;

/// A labelled cluster of desks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub label: String,
    pub desk_ids: GroupMembers,
    /// Top-left of the members' positions when the group was formed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Group {
    pub fn contains(&self, id: DeskId) -> bool {
        self.desk_ids.contains(&id)
    }
}

// ─── Layouts ─────────────────────────────────────────────────────────────

/// Named snapshots of the full desk collection, keyed by layout name.
pub type LayoutTable = BTreeMap<String, Vec<Desk>>;
