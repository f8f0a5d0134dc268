//! The entity store: single source of truth for desks, groups, layouts,
//! the selection, and the seed-name cursor.
//!
//! Every mutation goes through a command method on [`EntityStore`]. Each one
//! validates its inputs first and only then touches state, so a returned
//! error means nothing changed and observers never see a half-applied batch.
//!
//! Group membership is kept in lockstep with each desk's `group_id`: a group's
//! `desk_ids` are exactly the live desks stamped with that group, in
//! collection order.

use crate::config::SeatConfig;
use crate::error::{Result, SeatError};
use crate::geometry::{DESK_HEIGHT, DESK_WIDTH, GRID_UNIT};
use crate::id::{DeskId, GroupId};
use crate::model::*;
use crate::persist::{LayoutStorage, MemoryStorage, PersistenceGateway};
use crate::roster::{RosterAssigner, apply_assignment};
use std::collections::HashSet;

/// A store mutation produced by a pointer gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DeskMutation {
    ClearSelection,
    /// Replace the selection wholesale. An empty list clears it.
    SetSelection(Vec<DeskId>),
    /// Translate every listed desk by the same vector.
    MoveDesks { ids: Vec<DeskId>, dx: f32, dy: f32 },
}

pub struct EntityStore {
    config: SeatConfig,
    desks: Vec<Desk>,
    groups: Vec<Group>,
    layouts: LayoutTable,
    current_layout: String,
    selection: Vec<DeskId>,
    /// Index of the next unused seed name.
    seed_cursor: usize,
    gateway: PersistenceGateway,
    roster: RosterAssigner,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("desks", &self.desks.len())
            .field("groups", &self.groups.len())
            .field("layouts", &self.layouts.len())
            .field("current_layout", &self.current_layout)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl EntityStore {
    /// Empty store with default config and throwaway in-memory storage.
    pub fn new() -> Self {
        Self::open(SeatConfig::default(), MemoryStorage::new())
    }

    /// Create a store and read the persisted layout table once.
    pub fn open(config: SeatConfig, storage: impl LayoutStorage + 'static) -> Self {
        let gateway = PersistenceGateway::new(storage);
        let layouts = gateway.load();
        log::info!("opened seating store with {} saved layout(s)", layouts.len());
        Self {
            current_layout: config.default_layout.clone(),
            config,
            desks: Vec::new(),
            groups: Vec::new(),
            layouts,
            selection: Vec::new(),
            seed_cursor: 0,
            gateway,
            roster: RosterAssigner::new(),
        }
    }

    /// Replace the roster assigner (e.g. with a deterministic shuffle).
    pub fn with_roster(mut self, roster: RosterAssigner) -> Self {
        self.roster = roster;
        self
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SeatConfig {
        &self.config
    }

    pub fn desks(&self) -> &[Desk] {
        &self.desks
    }

    pub fn desk(&self, id: DeskId) -> Option<&Desk> {
        self.desks.iter().find(|d| d.id == id)
    }

    pub fn contains_desk(&self, id: DeskId) -> bool {
        self.desk(id).is_some()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn layouts(&self) -> &LayoutTable {
        &self.layouts
    }

    /// Saved layout names, sorted.
    pub fn layout_names(&self) -> Vec<&str> {
        self.layouts.keys().map(String::as_str).collect()
    }

    pub fn current_layout(&self) -> &str {
        &self.current_layout
    }

    /// Selected desk ids in selection order.
    pub fn selection(&self) -> &[DeskId] {
        &self.selection
    }

    pub fn is_selected(&self, id: DeskId) -> bool {
        self.selection.contains(&id)
    }

    pub fn seed_cursor(&self) -> usize {
        self.seed_cursor
    }

    // ─── Desk commands ───────────────────────────────────────────────────

    /// Grid slot for the `index`-th desk: row-major, `desks_per_row` wide,
    /// one desk footprint plus one grid unit apart.
    pub fn slot_position(&self, index: usize) -> Position {
        let per_row = self.config.desks_per_row.max(1);
        let row = (index / per_row) as f32;
        let col = (index % per_row) as f32;
        Position::new(col * (DESK_WIDTH + GRID_UNIT), row * (DESK_HEIGHT + GRID_UNIT))
    }

    /// Append a desk at the next grid slot. Student desks take the next seed
    /// name while any remain.
    pub fn add_desk(&mut self, kind: DeskKind) -> DeskId {
        let position = self.slot_position(self.desks.len());
        let mut desk = Desk::new(DeskId::fresh(), kind, position);

        if kind == DeskKind::Student
            && let Some(name) = self.config.seed_names.get(self.seed_cursor)
        {
            desk.assigned_student = Some(name.clone());
            self.seed_cursor += 1;
        }

        let id = desk.id;
        log::debug!("add desk {id} ({kind:?}) at ({}, {})", position.x, position.y);
        self.desks.push(desk);
        id
    }

    /// Append `count` desks of one kind, as the onboarding dialog does.
    pub fn add_desks(&mut self, count: usize, kind: DeskKind) -> Vec<DeskId> {
        (0..count).map(|_| self.add_desk(kind)).collect()
    }

    /// Remove a desk, its group membership, and its selection entry.
    /// Returns `false` (not an error) when the desk is already gone.
    pub fn remove_desk(&mut self, id: DeskId) -> bool {
        let Some(idx) = self.desks.iter().position(|d| d.id == id) else {
            return false;
        };
        self.desks.remove(idx);
        for group in &mut self.groups {
            group.desk_ids.retain(|member| *member != id);
        }
        self.selection.retain(|s| *s != id);
        log::debug!("remove desk {id}");
        true
    }

    /// Replace the stored desk with the same id by full value.
    pub fn update_desk(&mut self, desk: Desk) -> Result<()> {
        self.update_desks(vec![desk])
    }

    /// Replace several desks at once. Fails without changing anything if any
    /// id is unknown.
    pub fn update_desks(&mut self, updates: Vec<Desk>) -> Result<()> {
        let mut slots = Vec::with_capacity(updates.len());
        for desk in &updates {
            let idx = self
                .desks
                .iter()
                .position(|d| d.id == desk.id)
                .ok_or(SeatError::DeskNotFound(desk.id))?;
            slots.push(idx);
        }

        let mut regrouped = false;
        for (idx, desk) in slots.into_iter().zip(updates) {
            regrouped |= self.desks[idx].group_id != desk.group_id;
            self.desks[idx] = desk;
        }
        if regrouped {
            self.reconcile_groups();
        }
        Ok(())
    }

    /// Translate every listed desk by `(dx, dy)`. All-or-nothing.
    pub fn move_desks(&mut self, ids: &[DeskId], dx: f32, dy: f32) -> Result<()> {
        let moved = ids
            .iter()
            .map(|id| {
                let desk = self.desk(*id).ok_or(SeatError::DeskNotFound(*id))?;
                let mut desk = desk.clone();
                desk.position = desk.position.offset(dx, dy);
                Ok(desk)
            })
            .collect::<Result<Vec<_>>>()?;
        log::debug!("move {} desk(s) by ({dx}, {dy})", moved.len());
        self.update_desks(moved)
    }

    /// Advance rotation by 90°. Unknown ids are ignored.
    pub fn rotate_desk(&mut self, id: DeskId) {
        if let Some(desk) = self.desks.iter_mut().find(|d| d.id == id) {
            desk.rotation = desk.rotation.next();
            log::debug!("rotate desk {id} to {}", desk.rotation);
        }
    }

    // ─── Groups ──────────────────────────────────────────────────────────

    /// Create a group over `desk_ids` and stamp it on each member. Desks
    /// that already belonged to a group leave it.
    pub fn group_desks(&mut self, label: &str, desk_ids: &[DeskId]) -> Result<GroupId> {
        if desk_ids.is_empty() {
            return Err(SeatError::invalid("cannot group an empty set of desks"));
        }
        if label.trim().is_empty() {
            return Err(SeatError::invalid("group label must not be empty"));
        }
        if let Some(missing) = desk_ids.iter().find(|id| !self.contains_desk(**id)) {
            return Err(SeatError::DeskNotFound(*missing));
        }

        let members: HashSet<DeskId> = desk_ids.iter().copied().collect();
        let group_id = GroupId::fresh();
        let mut anchor: Option<Position> = None;
        for desk in self.desks.iter_mut().filter(|d| members.contains(&d.id)) {
            desk.group_id = Some(group_id);
            let p = desk.position;
            anchor = Some(match anchor {
                Some(a) => Position::new(a.x.min(p.x), a.y.min(p.y)),
                None => p,
            });
        }

        self.groups.push(Group {
            id: group_id,
            label: label.to_string(),
            desk_ids: GroupMembers::new(),
            position: anchor,
        });
        self.reconcile_groups();
        log::debug!("group {group_id} \"{label}\" with {} desk(s)", members.len());
        Ok(group_id)
    }

    /// Rebuild every group's member list from the desks' `group_id` stamps.
    fn reconcile_groups(&mut self) {
        for group in &mut self.groups {
            let gid = Some(group.id);
            group.desk_ids = self
                .desks
                .iter()
                .filter(|d| d.group_id == gid)
                .map(|d| d.id)
                .collect();
        }
    }

    // ─── Layouts ─────────────────────────────────────────────────────────

    /// Snapshot the desks under `name` (overwriting) and persist the table.
    ///
    /// If the durable write fails the error is returned, but the in-memory
    /// table keeps the new snapshot.
    pub fn save_layout(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(SeatError::invalid("layout name must not be empty"));
        }
        self.layouts.insert(name.to_string(), self.desks.clone());
        log::info!("save layout \"{name}\" ({} desks)", self.desks.len());
        self.gateway.save(&self.layouts).inspect_err(|e| {
            log::warn!("layout \"{name}\" kept in memory only: {e}");
        })
    }

    /// Replace the live desks with a saved snapshot and clear the selection.
    /// Groups are not part of a snapshot.
    pub fn load_layout(&mut self, name: &str) -> Result<()> {
        let snapshot = self
            .layouts
            .get(name)
            .ok_or_else(|| SeatError::LayoutNotFound(name.to_string()))?;
        self.desks = snapshot.clone();
        self.selection.clear();
        self.current_layout = name.to_string();
        self.reconcile_groups();
        log::info!("load layout \"{name}\" ({} desks)", self.desks.len());
        Ok(())
    }

    // ─── Roster ──────────────────────────────────────────────────────────

    /// Randomly seat `names` at student desks, overwriting every prior
    /// assignment. Returns how many desks received a name.
    pub fn assign_students(&mut self, names: &[String]) -> usize {
        let mapping = self.roster.assign(&self.desks, names);
        apply_assignment(&mut self.desks, &mapping);
        log::info!(
            "assigned {} of {} name(s) to student desks",
            mapping.len(),
            names.len()
        );
        mapping.len()
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn select_desk(&mut self, id: DeskId) {
        if self.contains_desk(id) && !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    pub fn deselect_desk(&mut self, id: DeskId) {
        self.selection.retain(|s| *s != id);
    }

    pub fn toggle_desk_selection(&mut self, id: DeskId) {
        if self.is_selected(id) {
            self.deselect_desk(id);
        } else {
            self.select_desk(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Replace the selection. Unknown and repeated ids are dropped.
    pub fn set_selected_desks(&mut self, ids: &[DeskId]) {
        let mut next = Vec::with_capacity(ids.len());
        for id in ids {
            if self.contains_desk(*id) && !next.contains(id) {
                next.push(*id);
            }
        }
        log::debug!("selection -> {next:?}");
        self.selection = next;
    }

    // ─── Gesture mutations ───────────────────────────────────────────────

    pub fn apply_mutation(&mut self, mutation: DeskMutation) -> Result<()> {
        match mutation {
            DeskMutation::ClearSelection => {
                self.clear_selection();
                Ok(())
            }
            DeskMutation::SetSelection(ids) => {
                self.set_selected_desks(&ids);
                Ok(())
            }
            DeskMutation::MoveDesks { ids, dx, dy } => self.move_desks(&ids, dx, dy),
        }
    }

    /// Apply a batch in order, stopping at the first failure.
    pub fn apply_mutations(&mut self, mutations: Vec<DeskMutation>) -> Result<bool> {
        let changed = !mutations.is_empty();
        for mutation in mutations {
            self.apply_mutation(mutation)?;
        }
        Ok(changed)
    }
}
