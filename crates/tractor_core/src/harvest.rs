//! Scythe harvesting: crops, forage, fruit trees, grass and weeds.
//!
//! All randomness comes from the passed-in `Rng`, one independent set of
//! draws per tile.

use rand::Rng;
use tracing::debug;

use crate::host::FarmHost;
use crate::{
    Crop, ForageCrop, HarvestMethod, ItemDrop, PlacedObject, Profession, Quality, TerrainFeature,
    TerrainOccupant, TileCoord, ITEM_FIBER, ITEM_MIXED_SEEDS, ITEM_ONION, ITEM_SUNFLOWER,
    ITEM_SUNFLOWER_SEEDS,
};

/// Hay credited to the farm for each grass tile cut.
pub const HAY_PER_GRASS: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestOutcome {
    pub crops: u32,
    pub forage: u32,
    pub trees_shaken: u32,
    pub grass_cut: u32,
    pub weeds_cleared: u32,
    pub drops: u32,
}

/// Forage bonuses from the player's professions.
#[derive(Debug, Clone, Copy)]
struct ForageTraits {
    botanist: bool,
    gatherer: bool,
}

/// Harvest every tile in the grid. No-op unless `enabled`.
pub fn harvest_tiles<H: FarmHost>(
    host: &mut H,
    enabled: bool,
    tiles: impl IntoIterator<Item = TileCoord>,
    rng: &mut impl Rng,
) -> HarvestOutcome {
    let mut outcome = HarvestOutcome::default();
    if !enabled {
        return outcome;
    }

    for tile in tiles {
        // Professions are re-read per tile; the host may change them between calls.
        let traits = ForageTraits {
            botanist: host.player().has_profession(Profession::Botanist),
            gatherer: host.player().has_profession(Profession::Gatherer),
        };
        match host.occupant(tile) {
            TerrainOccupant::Feature(TerrainFeature::Soil(soil)) => {
                if let Some(crop) = soil.crop {
                    harvest_crop(host, tile, &crop, traits, rng, &mut outcome);
                }
            }
            TerrainOccupant::Feature(TerrainFeature::Tree) => {
                host.shake_tree(tile);
                outcome.trees_shaken += 1;
            }
            TerrainOccupant::Feature(TerrainFeature::Grass) => {
                host.remove_terrain_feature(tile);
                host.add_hay(HAY_PER_GRASS);
                outcome.grass_cut += 1;
            }
            TerrainOccupant::Object(object) if object.spawned => {
                collect_spawned_object(host, tile, object, traits, rng, &mut outcome);
            }
            TerrainOccupant::Object(object) if is_weed(&object) => {
                clear_weed(host, tile, rng, &mut outcome);
            }
            TerrainOccupant::Feature(TerrainFeature::Flooring)
            | TerrainOccupant::Object(_)
            | TerrainOccupant::None => {}
        }
    }
    outcome
}

fn harvest_crop<H: FarmHost>(
    host: &mut H,
    tile: TileCoord,
    crop: &Crop,
    traits: ForageTraits,
    rng: &mut impl Rng,
    outcome: &mut HarvestOutcome,
) {
    let original_method = crop.harvest_method;
    host.set_crop_harvest_method(tile, HarvestMethod::Sickle);

    if crop.forage == Some(ForageCrop::SpringOnion) {
        let mut onion = ForageYield {
            drop: ItemDrop::normal(ITEM_ONION),
            stack: 1,
        };
        onion.apply_traits(traits, rng.gen_range(0..10) < 2);
        outcome.drops += onion.spawn(host, tile);
        outcome.forage += 1;
        host.destroy_crop(tile);
        return;
    }

    if host.harvest_crop(tile) {
        outcome.crops += 1;
        if crop.harvest_item == ITEM_SUNFLOWER {
            let seeds: u32 = rng.gen_range(1..4);
            for _ in 0..seeds {
                host.spawn_drop(tile, ItemDrop::normal(ITEM_SUNFLOWER_SEEDS));
            }
            outcome.drops += seeds;
        }
        if !crop.regrows {
            host.destroy_crop(tile);
        }
    } else {
        debug!(%tile, "crop not ready");
    }

    let crop_survived = matches!(
        host.terrain_feature(tile),
        Some(TerrainFeature::Soil(soil)) if soil.crop.is_some()
    );
    if crop_survived {
        host.set_crop_harvest_method(tile, original_method);
    }
}

fn collect_spawned_object<H: FarmHost>(
    host: &mut H,
    tile: TileCoord,
    object: PlacedObject,
    traits: ForageTraits,
    rng: &mut impl Rng,
    outcome: &mut HarvestOutcome,
) {
    let mut output = ForageYield {
        drop: ItemDrop {
            item_id: object.item_id,
            quality: object.quality,
        },
        stack: object.stack,
    };
    if object.forage {
        output.apply_traits(traits, rng.gen_range(0..100) < 20);
        outcome.forage += 1;
    }
    outcome.drops += output.spawn(host, tile);
    host.remove_object(tile);
}

fn clear_weed<H: FarmHost>(
    host: &mut H,
    tile: TileCoord,
    rng: &mut impl Rng,
    outcome: &mut HarvestOutcome,
) {
    host.spawn_drop(tile, ItemDrop::normal(ITEM_FIBER));
    outcome.drops += 1;
    if rng.gen_range(0..10) < 1 {
        host.spawn_drop(tile, ItemDrop::normal(ITEM_MIXED_SEEDS));
        outcome.drops += 1;
    }
    host.remove_object(tile);
    outcome.weeds_cleared += 1;
}

fn is_weed(object: &PlacedObject) -> bool {
    object.name.to_lowercase().contains("weed")
}

/// Forage output before it is dropped into the world.
struct ForageYield {
    drop: ItemDrop,
    stack: u32,
}

impl ForageYield {
    /// Botanists always get best quality; gatherers double the stack when
    /// their roll succeeds. `gatherer_roll` is drawn for every forage item.
    fn apply_traits(&mut self, traits: ForageTraits, gatherer_roll: bool) {
        if traits.botanist {
            self.drop.quality = Quality::BEST;
        }
        if traits.gatherer && gatherer_roll {
            self.stack *= 2;
        }
    }

    fn spawn<H: FarmHost>(&self, host: &mut H, tile: TileCoord) -> u32 {
        for _ in 0..self.stack {
            host.spawn_drop(tile, self.drop);
        }
        self.stack
    }
}
