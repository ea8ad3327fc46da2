//! Host adapter traits.
//!
//! The host game owns the world, the player and the buildings. The engine only
//! reads and mutates them through these traits and never keeps host state
//! beyond the tile it is currently processing.

use crate::{
    Blueprint, Building, BuildingId, Farmer, ItemDrop, ItemId, Operator, PixelPoint,
    PlacedObject, TerrainFeature, TerrainOccupant, TileCoord,
};

/// Failure reported by a host primitive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The action did not apply to this tile. The pass moves on.
    #[error("tile {tile} rejected the action: {reason}")]
    TileRejected { tile: TileCoord, reason: String },

    /// The host is in a state where continuing would corrupt it.
    #[error("host failure: {0}")]
    Fatal(String),
}

impl HostError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, HostError::Fatal(_))
    }
}

/// Which kind of menu the host currently has open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    /// A menu through which buildings can be placed.
    Construction,
    Other,
}

/// Read-only lookup into the current location.
pub trait TerrainQuery {
    fn terrain_feature(&self, tile: TileCoord) -> Option<TerrainFeature>;

    fn object_at(&self, tile: TileCoord) -> Option<PlacedObject>;

    /// Terrain feature if any, else the placed object, else nothing.
    fn occupant(&self, tile: TileCoord) -> TerrainOccupant {
        if let Some(feature) = self.terrain_feature(tile) {
            TerrainOccupant::Feature(feature)
        } else if let Some(object) = self.object_at(tile) {
            TerrainOccupant::Object(object)
        } else {
            TerrainOccupant::None
        }
    }
}

/// Mutation primitives the engine calls into.
pub trait FarmHost: TerrainQuery {
    // -- player --------------------------------------------------------------

    fn player(&self) -> &Farmer;

    fn player_mut(&mut self) -> &mut Farmer;

    fn active_menu(&self) -> MenuState;

    // -- tiles ---------------------------------------------------------------

    /// Swing the player's held tool at a pixel position in the current location.
    fn use_tool_at(&mut self, point: PixelPoint, operator: &Operator) -> Result<(), HostError>;

    /// Plant a seed in tilled soil. Returns false when the soil rejects it.
    fn plant(&mut self, tile: TileCoord, seed: ItemId) -> bool;

    fn fertilize(&mut self, tile: TileCoord, fertilizer: ItemId);

    /// Harvest the crop at `tile`. Returns true when the crop produced output.
    fn harvest_crop(&mut self, tile: TileCoord) -> bool;

    fn set_crop_harvest_method(&mut self, tile: TileCoord, method: crate::HarvestMethod);

    fn destroy_crop(&mut self, tile: TileCoord);

    fn shake_tree(&mut self, tile: TileCoord);

    fn remove_terrain_feature(&mut self, tile: TileCoord);

    fn remove_object(&mut self, tile: TileCoord);

    fn spawn_drop(&mut self, tile: TileCoord, drop: ItemDrop);

    /// Add hay to the farm silos, returning how much was stored.
    fn add_hay(&mut self, amount: u32) -> u32;

    // -- buildings -----------------------------------------------------------

    fn buildings(&self) -> Vec<Building>;

    /// Add a building. The host assigns the id; `building.id` is ignored.
    fn add_building(&mut self, building: Building) -> BuildingId;

    fn remove_building(&mut self, id: BuildingId);

    fn set_construction_days(&mut self, id: BuildingId, days: u32);

    // -- operator and builder NPC --------------------------------------------

    fn place_operator(&mut self, operator: &Operator);

    fn remove_operators(&mut self);

    /// Show the builder NPC working on a garage site.
    fn start_builder_work(&mut self, at: TileCoord);

    /// Return the builder NPC to their normal schedule.
    fn reset_builder(&mut self);
}

/// Capability exposed by menus that can offer extra buildings.
pub trait BlueprintSink {
    fn add_blueprint(&mut self, blueprint: Blueprint);
}

/// Any menu the host opens.
pub trait Menu {
    fn blueprint_sink(&mut self) -> Option<&mut dyn BlueprintSink> {
        None
    }
}
