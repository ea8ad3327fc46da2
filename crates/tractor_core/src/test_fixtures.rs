//! Shared test fixtures for `tractor_core` and downstream crates.
//!
//! `base_farmer()` stands on tile (10, 10) of the farm with nothing in hand.
//! `riding_session()` gives a session whose tractor is already being ridden,
//! so the next admitted tick runs a pass.

use crate::sandbox::SandboxFarm;
use crate::session::AutomationSession;
use crate::{
    Crop, Farmer, ForageCrop, HarvestMethod, Implement, ItemCategory, ItemStack, Operator,
    OperatorId, PlacedObject, Quality, Soil, TerrainFeature, TileCoord, Tool, ToolKind,
    TractorConfig, FARM_LOCATION,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

pub const PLAYER_TILE: TileCoord = TileCoord::new(10, 10);

pub const PARSNIP_SEEDS: u32 = 472;
pub const BASIC_FERTILIZER: u32 = 368;

pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

pub fn base_farmer() -> Farmer {
    Farmer {
        name: "Test".to_string(),
        location: FARM_LOCATION.to_string(),
        tile: PLAYER_TILE,
        stamina: 270.0,
        tool_power: 0,
        professions: SmallVec::new(),
        held: Implement::Empty,
        buffs: Vec::new(),
    }
}

pub fn base_config() -> TractorConfig {
    TractorConfig::default()
}

pub fn tool(kind: ToolKind, name: &str) -> Implement {
    Implement::Tool(Tool::new(kind, name))
}

pub fn scythe() -> Implement {
    tool(ToolKind::MeleeWeapon, "Scythe")
}

pub fn seeds(stack: u32) -> Implement {
    Implement::Item(ItemStack {
        item_id: PARSNIP_SEEDS,
        category: ItemCategory::Seed,
        stack,
    })
}

pub fn fertilizer(stack: u32) -> Implement {
    Implement::Item(ItemStack {
        item_id: BASIC_FERTILIZER,
        category: ItemCategory::Fertilizer,
        stack,
    })
}

pub fn tilled() -> TerrainFeature {
    TerrainFeature::Soil(Soil::default())
}

pub fn ripe_crop(harvest_item: u32, regrows: bool) -> Crop {
    Crop {
        harvest_item,
        forage: None,
        regrows,
        fully_grown: true,
        dead: false,
        harvest_method: HarvestMethod::Hand,
    }
}

pub fn soil_with(crop: Crop) -> TerrainFeature {
    TerrainFeature::Soil(Soil {
        crop: Some(crop),
        fertilizer: None,
        watered: false,
    })
}

pub fn spring_onion() -> TerrainFeature {
    soil_with(Crop {
        forage: Some(ForageCrop::SpringOnion),
        ..ripe_crop(crate::ITEM_ONION, false)
    })
}

pub fn forage_object(name: &str, item_id: u32) -> PlacedObject {
    PlacedObject {
        name: name.to_string(),
        item_id,
        stack: 1,
        quality: Quality::Normal,
        spawned: true,
        forage: true,
    }
}

pub fn placed_object(name: &str, item_id: u32) -> PlacedObject {
    PlacedObject {
        name: name.to_string(),
        item_id,
        stack: 1,
        quality: Quality::Normal,
        spawned: false,
        forage: false,
    }
}

pub fn farm_holding(held: Implement) -> SandboxFarm {
    let mut player = base_farmer();
    player.held = held;
    SandboxFarm::new(player)
}

pub fn riding_operator() -> Operator {
    Operator {
        id: OperatorId(uuid::Uuid::nil()),
        location: FARM_LOCATION.to_string(),
        tile: PLAYER_TILE,
        position: PLAYER_TILE.to_pixel(),
        riding: true,
    }
}

pub fn riding_session(config: TractorConfig) -> AutomationSession {
    let mut session = AutomationSession::new(config);
    session.operator = Some(riding_operator());
    session
}
