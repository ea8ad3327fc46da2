//! Type definitions for `tractor_core`.
//!
//! Value types shared by the engine, the host adapter traits and the
//! persisted save record.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Well-known host constants
// ---------------------------------------------------------------------------

pub type ItemId = u32;

/// Host tile size in pixels.
pub const TILE_SIZE: i32 = 64;

/// Building type tag used for tractor garages.
pub const GARAGE_BUILDING_TYPE: &str = "TractorGarage";

/// Location name where garages may be built and tractors spawn.
pub const FARM_LOCATION: &str = "Farm";

pub const ITEM_ONION: ItemId = 399;
pub const ITEM_SUNFLOWER: ItemId = 421;
pub const ITEM_SUNFLOWER_SEEDS: ItemId = 431;
pub const ITEM_MIXED_SEEDS: ItemId = 770;
pub const ITEM_FIBER: ItemId = 771;
pub const ITEM_IRON_BAR: ItemId = 335;
pub const ITEM_IRIDIUM_BAR: ItemId = 337;
pub const ITEM_BATTERY_PACK: ItemId = 787;

/// Highest tool upgrade level (iridium).
pub const MAX_UPGRADE_LEVEL: u8 = 4;

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    #[serde(rename = "X")]
    pub x: i32,
    #[serde(rename = "Y")]
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance to `other`.
    pub fn distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Pixel position of this tile's top-left corner.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_pixel(self) -> PixelPoint {
        PixelPoint {
            x: (self.x * TILE_SIZE) as f32,
            y: (self.y * TILE_SIZE) as f32,
        }
    }

    /// Pixel position of this tile's centre, where tools are swung.
    pub fn center_pixel(self) -> PixelPoint {
        let corner = self.to_pixel();
        #[allow(clippy::cast_precision_loss)]
        let half = TILE_SIZE as f32 / 2.0;
        PixelPoint {
            x: corner.x + half,
            y: corner.y + half,
        }
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };
}

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperatorId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildingId(pub u64);

/// Identity of a host save slot: `{FarmerName}_{SaveSeed}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaveId(pub String);

impl SaveId {
    pub fn from_farmer(farmer_name: &str, save_seed: u64) -> Self {
        Self(format!("{farmer_name}_{save_seed}"))
    }
}

impl std::fmt::Display for SaveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Held implements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    WateringCan,
    Hoe,
    Pickaxe,
    Axe,
    MeleeWeapon,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub kind: ToolKind,
    /// Internal tool name, matched against the configured allow-list.
    pub name: String,
    pub upgrade_level: u8,
    /// Only watering cans carry water.
    pub water_left: Option<u32>,
    pub water_max: u32,
}

impl Tool {
    pub fn new(kind: ToolKind, name: &str) -> Self {
        let (water_left, water_max) = if kind == ToolKind::WateringCan {
            (Some(40), 40)
        } else {
            (None, 0)
        };
        Self {
            kind,
            name: name.to_string(),
            upgrade_level: 0,
            water_left,
            water_max,
        }
    }

    pub fn is_scythe(&self) -> bool {
        self.kind == ToolKind::MeleeWeapon && self.name.to_lowercase().contains("scythe")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Seed,
    Fertilizer,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_id: ItemId,
    pub category: ItemCategory,
    pub stack: u32,
}

/// Whatever the player currently has selected in the toolbar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Implement {
    Tool(Tool),
    Item(ItemStack),
    #[default]
    Empty,
}

/// The single action family applied to every tile in a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionFamily {
    Watering,
    Tilling,
    Clearing,
    PlantingOrFertilizing,
    Harvesting,
    /// Allow-listed tool with no built-in family; swung directly at each tile.
    Custom,
    None,
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarvestMethod {
    Hand,
    Sickle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForageCrop {
    SpringOnion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    /// Item produced on harvest; identifies the species.
    pub harvest_item: ItemId,
    pub forage: Option<ForageCrop>,
    /// False when the crop has no regrowth timer and dies after harvest.
    pub regrows: bool,
    pub fully_grown: bool,
    pub dead: bool,
    pub harvest_method: HarvestMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Soil {
    pub crop: Option<Crop>,
    pub fertilizer: Option<ItemId>,
    pub watered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainFeature {
    Soil(Soil),
    Tree,
    Grass,
    Flooring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quality {
    Normal,
    Silver,
    Gold,
    Iridium,
}

impl Quality {
    pub const BEST: Self = Quality::Iridium;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub name: String,
    pub item_id: ItemId,
    pub stack: u32,
    pub quality: Quality,
    /// Spawned by the world (forage, debris) rather than placed by the player.
    pub spawned: bool,
    pub forage: bool,
}

/// What occupies a tile, terrain feature first.
#[derive(Debug, Clone, PartialEq)]
pub enum TerrainOccupant {
    None,
    Feature(TerrainFeature),
    Object(PlacedObject),
}

/// A single item dropped into the world as debris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDrop {
    pub item_id: ItemId,
    pub quality: Quality,
}

impl ItemDrop {
    pub const fn normal(item_id: ItemId) -> Self {
        Self {
            item_id,
            quality: Quality::Normal,
        }
    }
}

// ---------------------------------------------------------------------------
// Player, buffs, operator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profession {
    Gatherer,
    Botanist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buff {
    pub id: u32,
    pub source: String,
    pub display_name: String,
    pub speed: i32,
    pub remaining_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    pub name: String,
    pub location: String,
    pub tile: TileCoord,
    pub stamina: f32,
    pub tool_power: u32,
    pub professions: SmallVec<[Profession; 4]>,
    pub held: Implement,
    pub buffs: Vec<Buff>,
}

impl Farmer {
    pub fn has_profession(&self, profession: Profession) -> bool {
        self.professions.contains(&profession)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub id: OperatorId,
    pub location: String,
    pub tile: TileCoord,
    pub position: PixelPoint,
    pub riding: bool,
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub building_type: String,
    pub tile: TileCoord,
    pub tiles_wide: i32,
    pub tiles_high: i32,
    pub days_of_construction_left: u32,
    /// Set for garages created by this system; unset for garages freshly
    /// placed through a construction menu.
    pub managed: bool,
}

impl Building {
    pub fn is_garage(&self) -> bool {
        self.building_type == GARAGE_BUILDING_TYPE
    }

    pub fn is_under_construction(&self) -> bool {
        self.days_of_construction_left > 0
    }

    pub fn center_tile(&self) -> TileCoord {
        self.tile.offset(self.tiles_wide / 2, self.tiles_high / 2)
    }
}

/// A purchasable building entry offered by construction menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub blueprint_type: String,
    pub money_required: u32,
    pub items_required: Vec<(ItemId, u32)>,
    pub tiles_wide: i32,
    pub tiles_high: i32,
    pub buildable_locations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Player-facing settings, stored as `config.json` with PascalCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct TractorConfig {
    /// Number of tiles in each direction around the player to affect.
    pub distance: u32,
    /// Speed modifier applied while riding.
    pub tractor_speed: i32,
    pub build_price: u32,
    pub build_uses_resources: bool,
    pub watering_can_waters: bool,
    pub hoe_tills_dirt: bool,
    pub pickaxe_clears_dirt: bool,
    pub pickaxe_breaks_rocks: bool,
    pub pickaxe_breaks_flooring: bool,
    pub scythe_harvests: bool,
    /// Key which summons the tractor to the player.
    pub tractor_key: String,
    /// Tool names which are always used, regardless of the flags above.
    pub custom_tools: Vec<String>,
}

impl Default for TractorConfig {
    fn default() -> Self {
        Self {
            distance: 1,
            tractor_speed: -2,
            build_price: 150_000,
            build_uses_resources: true,
            watering_can_waters: true,
            hoe_tills_dirt: true,
            pickaxe_clears_dirt: true,
            pickaxe_breaks_rocks: true,
            pickaxe_breaks_flooring: false,
            scythe_harvests: true,
            tractor_key: "T".to_string(),
            custom_tools: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Persisted auxiliary record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSaveBuilding {
    #[serde(rename = "Tile")]
    pub tile: TileCoord,
    #[serde(rename = "BuildingType")]
    pub building_type: String,
    /// Signed on disk so hand-edited negative values clamp instead of failing.
    /// Missing means complete.
    #[serde(rename = "DaysOfConstructionLeft", default)]
    pub days_of_construction_left: i32,
}

/// Garages stashed outside the host save, one document per save slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedAutomationState {
    #[serde(rename = "Buildings", default)]
    pub buildings: Vec<CustomSaveBuilding>,
}
