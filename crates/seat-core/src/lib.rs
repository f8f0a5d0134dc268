pub mod config;
pub mod error;
pub mod geometry;
pub mod id;
pub mod model;
pub mod persist;
pub mod roster;
pub mod store;

pub use config::SeatConfig;
pub use error::{Result, SeatError};
pub use geometry::{BoundingBox, Footprint, GRID_UNIT, snap_to_grid};
pub use id::{DeskId, GroupId};
pub use model::*;
pub use persist::{FileStorage, LayoutStorage, MemoryStorage, PersistenceGateway};
pub use roster::{RandomShuffle, RngShuffle, RosterAssigner, Shuffle};
pub use store::{DeskMutation, EntityStore};
