use tracing::debug;

use crate::host::FarmHost;
use crate::{Implement, ItemCategory, TerrainFeature, TileCoord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlantingOutcome {
    /// Tiles the held item was applied to.
    pub applied: u32,
    /// True when the held stack ran out and was removed from the player.
    pub exhausted: bool,
}

/// Plant or fertilize tilled soil with the held seed or fertilizer stack.
///
/// Each success consumes one item. When the stack empties the item is removed
/// from the player and the pass stops.
///
/// Panics if the held item is neither seed nor fertilizer; the classifier
/// never dispatches anything else here.
pub fn apply_item<H: FarmHost>(
    host: &mut H,
    tiles: impl IntoIterator<Item = TileCoord>,
) -> PlantingOutcome {
    let mut outcome = PlantingOutcome::default();
    let Implement::Item(item) = &host.player().held else {
        return outcome;
    };
    let item_id = item.item_id;
    let plant = match &item.category {
        ItemCategory::Seed => true,
        ItemCategory::Fertilizer => false,
        ItemCategory::Other(name) => panic!("unsupported item category '{name}'"),
    };

    for tile in tiles {
        let Some(TerrainFeature::Soil(soil)) = host.terrain_feature(tile) else {
            continue;
        };

        let applied = if plant {
            soil.crop.is_none() && host.plant(tile, item_id)
        } else if soil.fertilizer.is_none() {
            host.fertilize(tile, item_id);
            true
        } else {
            false
        };
        if !applied {
            continue;
        }
        outcome.applied += 1;

        if consume_one(host) {
            debug!(%tile, item_id, "held stack used up");
            outcome.exhausted = true;
            break;
        }
    }
    outcome
}

/// Take one item from the held stack. Returns true if the stack is now gone.
fn consume_one<H: FarmHost>(host: &mut H) -> bool {
    let player = host.player_mut();
    let Implement::Item(item) = &mut player.held else {
        return true;
    };
    item.stack = item.stack.saturating_sub(1);
    if item.stack == 0 {
        player.held = Implement::Empty;
        true
    } else {
        false
    }
}
