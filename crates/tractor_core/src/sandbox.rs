//! In-memory farm implementing the host traits.
//!
//! Used by the CLI runner and by tests. It models just enough of a farm to
//! exercise the engine: tiles, crops that grow overnight, tools with simple
//! effects, buildings, dropped items and hay silos.

use ahash::{AHashMap, AHashSet};
use tracing::trace;

use crate::host::{BlueprintSink, FarmHost, HostError, Menu, MenuState, TerrainQuery};
use crate::{
    Blueprint, Building, BuildingId, Crop, Farmer, HarvestMethod, Implement, ItemDrop, ItemId,
    Operator, PixelPoint, PlacedObject, Soil, TerrainFeature, TileCoord, ToolKind, TILE_SIZE,
};

pub const ITEM_STONE: ItemId = 390;
pub const ITEM_WOOD: ItemId = 388;
pub const ITEM_APPLE: ItemId = 613;

/// Stamina a tool swing costs in the sandbox.
pub const STAMINA_PER_SWING: f32 = 2.0;

/// Seed id -> (harvest item id, regrows).
const SEED_CATALOG: &[(ItemId, ItemId, bool)] = &[
    (472, 24, false),  // parsnip
    (431, 421, false), // sunflower
    (745, 400, true),  // strawberry
];

fn crop_for_seed(seed: ItemId) -> Crop {
    let (harvest_item, regrows) = SEED_CATALOG
        .iter()
        .find(|(s, _, _)| *s == seed)
        .map_or((seed, false), |(_, harvest, regrows)| (*harvest, *regrows));
    Crop {
        harvest_item,
        forage: None,
        regrows,
        fully_grown: false,
        dead: false,
        harvest_method: HarvestMethod::Hand,
    }
}

#[derive(Debug, Clone)]
pub struct SandboxFarm {
    pub player: Farmer,
    pub features: AHashMap<TileCoord, TerrainFeature>,
    pub objects: AHashMap<TileCoord, PlacedObject>,
    pub buildings: Vec<Building>,
    pub drops: Vec<(TileCoord, ItemDrop)>,
    pub hay: u32,
    pub hay_capacity: u32,
    pub menu: MenuState,
    pub operators: Vec<Operator>,
    pub builder_site: Option<TileCoord>,
    /// Pixel positions the held tool was swung at, in order.
    pub tool_swings: Vec<PixelPoint>,
    /// Tiles whose tool use fails with the given error.
    pub failing_tiles: AHashMap<TileCoord, HostError>,
    /// Seeds the soil currently refuses (out of season).
    pub out_of_season: AHashSet<ItemId>,
    next_building_id: u64,
}

impl SandboxFarm {
    pub fn new(player: Farmer) -> Self {
        Self {
            player,
            features: AHashMap::new(),
            objects: AHashMap::new(),
            buildings: Vec::new(),
            drops: Vec::new(),
            hay: 0,
            hay_capacity: 240,
            menu: MenuState::Closed,
            operators: Vec::new(),
            builder_site: None,
            tool_swings: Vec::new(),
            failing_tiles: AHashMap::new(),
            out_of_season: AHashSet::new(),
            next_building_id: 1,
        }
    }

    pub fn with_feature(mut self, tile: TileCoord, feature: TerrainFeature) -> Self {
        self.features.insert(tile, feature);
        self
    }

    pub fn with_object(mut self, tile: TileCoord, object: PlacedObject) -> Self {
        self.objects.insert(tile, object);
        self
    }

    pub fn soil(&self, tile: TileCoord) -> Option<&Soil> {
        match self.features.get(&tile) {
            Some(TerrainFeature::Soil(soil)) => Some(soil),
            _ => None,
        }
    }

    fn soil_mut(&mut self, tile: TileCoord) -> Option<&mut Soil> {
        match self.features.get_mut(&tile) {
            Some(TerrainFeature::Soil(soil)) => Some(soil),
            _ => None,
        }
    }

    /// Drops of one item id spawned so far.
    pub fn drop_count(&self, item_id: ItemId) -> usize {
        self.drops.iter().filter(|(_, d)| d.item_id == item_id).count()
    }

    /// Place a garage the way a construction menu does: unmanaged and
    /// with no construction time yet.
    pub fn place_garage_from_menu(&mut self, tile: TileCoord) -> BuildingId {
        self.add_building(Building {
            id: BuildingId(0),
            building_type: crate::GARAGE_BUILDING_TYPE.to_string(),
            tile,
            tiles_wide: crate::garage::GARAGE_TILES_WIDE,
            tiles_high: crate::garage::GARAGE_TILES_HIGH,
            days_of_construction_left: 0,
            managed: false,
        })
    }

    /// Overnight update: watered crops finish growing and soil dries out.
    pub fn advance_day(&mut self) {
        for feature in self.features.values_mut() {
            if let TerrainFeature::Soil(soil) = feature {
                if let Some(crop) = soil.crop.as_mut() {
                    if soil.watered {
                        crop.fully_grown = true;
                    }
                }
                soil.watered = false;
            }
        }
        self.drops.clear();
        self.tool_swings.clear();
    }

    fn swing(&mut self, tile: TileCoord) -> Result<(), HostError> {
        let Implement::Tool(tool) = &mut self.player.held else {
            return Err(HostError::TileRejected {
                tile,
                reason: "no tool held".to_string(),
            });
        };
        let kind = tool.kind;
        if kind == ToolKind::WateringCan {
            let water = tool.water_left.unwrap_or(0);
            if water == 0 {
                return Err(HostError::TileRejected {
                    tile,
                    reason: "watering can is empty".to_string(),
                });
            }
            tool.water_left = Some(water - 1);
        }
        self.player.stamina -= STAMINA_PER_SWING;

        match kind {
            ToolKind::WateringCan => {
                if let Some(soil) = self.soil_mut(tile) {
                    soil.watered = true;
                }
            }
            ToolKind::Hoe => {
                if !self.features.contains_key(&tile) && !self.objects.contains_key(&tile) {
                    self.features.insert(tile, TerrainFeature::Soil(Soil::default()));
                }
            }
            ToolKind::Pickaxe => self.pickaxe(tile),
            ToolKind::Axe => {
                let is_twig = self.objects.get(&tile).is_some_and(|o| o.name == "Twig");
                if is_twig {
                    self.objects.remove(&tile);
                    self.drops.push((tile, ItemDrop::normal(ITEM_WOOD)));
                }
            }
            ToolKind::MeleeWeapon | ToolKind::Other => {}
        }
        Ok(())
    }

    fn pickaxe(&mut self, tile: TileCoord) {
        if self.objects.get(&tile).is_some_and(|o| o.name == "Stone") {
            self.objects.remove(&tile);
            self.drops.push((tile, ItemDrop::normal(ITEM_STONE)));
            return;
        }
        let clearable = match self.features.get(&tile) {
            Some(TerrainFeature::Soil(soil)) => soil.crop.as_ref().is_none_or(|c| c.dead),
            Some(TerrainFeature::Flooring) => true,
            _ => false,
        };
        if clearable {
            self.features.remove(&tile);
        }
    }
}

fn pixel_to_tile(point: PixelPoint) -> TileCoord {
    #[allow(clippy::cast_possible_truncation)]
    let to_tile = |v: f32| (v / TILE_SIZE as f32).floor() as i32;
    TileCoord::new(to_tile(point.x), to_tile(point.y))
}

impl TerrainQuery for SandboxFarm {
    fn terrain_feature(&self, tile: TileCoord) -> Option<TerrainFeature> {
        self.features.get(&tile).cloned()
    }

    fn object_at(&self, tile: TileCoord) -> Option<PlacedObject> {
        self.objects.get(&tile).cloned()
    }
}

impl FarmHost for SandboxFarm {
    fn player(&self) -> &Farmer {
        &self.player
    }

    fn player_mut(&mut self) -> &mut Farmer {
        &mut self.player
    }

    fn active_menu(&self) -> MenuState {
        self.menu
    }

    fn use_tool_at(&mut self, point: PixelPoint, operator: &Operator) -> Result<(), HostError> {
        let tile = pixel_to_tile(point);
        self.tool_swings.push(point);
        if let Some(err) = self.failing_tiles.get(&tile) {
            return Err(err.clone());
        }
        // A mount left in place would be hit by its own swing.
        if operator.position != PixelPoint::ORIGIN && pixel_to_tile(operator.position) == tile {
            return Err(HostError::TileRejected {
                tile,
                reason: "blocked by the tractor".to_string(),
            });
        }
        trace!(%tile, "tool swing");
        self.swing(tile)
    }

    fn plant(&mut self, tile: TileCoord, seed: ItemId) -> bool {
        if self.out_of_season.contains(&seed) {
            return false;
        }
        match self.soil_mut(tile) {
            Some(soil) if soil.crop.is_none() => {
                soil.crop = Some(crop_for_seed(seed));
                true
            }
            _ => false,
        }
    }

    fn fertilize(&mut self, tile: TileCoord, fertilizer: ItemId) {
        if let Some(soil) = self.soil_mut(tile) {
            soil.fertilizer = Some(fertilizer);
        }
    }

    fn harvest_crop(&mut self, tile: TileCoord) -> bool {
        let Some(crop) = self.soil_mut(tile).and_then(|soil| soil.crop.as_mut()) else {
            return false;
        };
        if !crop.fully_grown || crop.dead || crop.harvest_method != HarvestMethod::Sickle {
            return false;
        }
        let produce = ItemDrop::normal(crop.harvest_item);
        if crop.regrows {
            crop.fully_grown = false;
        }
        self.drops.push((tile, produce));
        true
    }

    fn set_crop_harvest_method(&mut self, tile: TileCoord, method: HarvestMethod) {
        if let Some(crop) = self.soil_mut(tile).and_then(|soil| soil.crop.as_mut()) {
            crop.harvest_method = method;
        }
    }

    fn destroy_crop(&mut self, tile: TileCoord) {
        if let Some(soil) = self.soil_mut(tile) {
            soil.crop = None;
        }
    }

    fn shake_tree(&mut self, tile: TileCoord) {
        self.drops.push((tile, ItemDrop::normal(ITEM_APPLE)));
    }

    fn remove_terrain_feature(&mut self, tile: TileCoord) {
        self.features.remove(&tile);
    }

    fn remove_object(&mut self, tile: TileCoord) {
        self.objects.remove(&tile);
    }

    fn spawn_drop(&mut self, tile: TileCoord, drop: ItemDrop) {
        self.drops.push((tile, drop));
    }

    fn add_hay(&mut self, amount: u32) -> u32 {
        let stored = amount.min(self.hay_capacity.saturating_sub(self.hay));
        self.hay += stored;
        stored
    }

    fn buildings(&self) -> Vec<Building> {
        self.buildings.clone()
    }

    fn add_building(&mut self, mut building: Building) -> BuildingId {
        let id = BuildingId(self.next_building_id);
        self.next_building_id += 1;
        building.id = id;
        self.buildings.push(building);
        id
    }

    fn remove_building(&mut self, id: BuildingId) {
        self.buildings.retain(|b| b.id != id);
    }

    fn set_construction_days(&mut self, id: BuildingId, days: u32) {
        if let Some(building) = self.buildings.iter_mut().find(|b| b.id == id) {
            building.days_of_construction_left = days;
        }
    }

    fn place_operator(&mut self, operator: &Operator) {
        self.operators.retain(|op| op.id != operator.id);
        self.operators.push(operator.clone());
    }

    fn remove_operators(&mut self) {
        self.operators.clear();
    }

    fn start_builder_work(&mut self, at: TileCoord) {
        self.builder_site = Some(at);
    }

    fn reset_builder(&mut self) {
        self.builder_site = None;
    }
}

/// Construction menu exposing the blueprint capability.
#[derive(Debug, Clone, Default)]
pub struct SandboxConstructionMenu {
    pub blueprints: Vec<Blueprint>,
}

impl BlueprintSink for SandboxConstructionMenu {
    fn add_blueprint(&mut self, blueprint: Blueprint) {
        self.blueprints.push(blueprint);
    }
}

impl Menu for SandboxConstructionMenu {
    fn blueprint_sink(&mut self) -> Option<&mut dyn BlueprintSink> {
        Some(self)
    }
}

/// Any other menu, such as the inventory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SandboxPlainMenu;

impl Menu for SandboxPlainMenu {}
