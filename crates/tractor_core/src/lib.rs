//! Deterministic tile-action engine for the tractor.
//!
//! No IO. The host world is reached only through the traits in [`host`].
//! All randomness via the passed-in Rng.

pub mod buff;
pub mod classify;
pub mod cooldown;
pub mod garage;
pub mod grid;
pub mod harvest;
pub mod host;
mod id;
pub mod planting;
pub mod sandbox;
pub mod session;
pub mod tools;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use classify::classify;
pub use garage::{garage_blueprint, restore_custom_data, stash_custom_data};
pub use grid::{tile_grid, TileGrid};
pub use host::{BlueprintSink, FarmHost, HostError, Menu, MenuState, TerrainQuery};
pub use id::{generate_operator_id, generate_uuid};
pub use session::{update, AutomationSession, PassReport, TickReport};
pub use types::*;

#[cfg(test)]
mod tests;
