//! Direct tool use across the tile grid.
//!
//! While the tractor swings a tool, the tool is treated as fully upgraded and
//! fully charged, and the player's stamina is untouched. [`ToolOverride`]
//! holds those overrides and undoes them when dropped, so every exit path
//! (including a host panic unwinding through the pass) restores the originals.

use tracing::debug;

use crate::host::{FarmHost, HostError};
use crate::{
    Implement, Operator, PixelPoint, TerrainFeature, TileCoord, ToolKind, TractorConfig,
    MAX_UPGRADE_LEVEL,
};

/// Name of the placed object that hoes and pickaxes may act on.
const STONE: &str = "Stone";

#[derive(Debug, Clone, Copy)]
struct SavedToolState {
    water_left: Option<u32>,
    upgrade_level: u8,
    stamina: f32,
    operator_position: PixelPoint,
}

/// Scoped override of tool power, water, stamina and mount position.
pub struct ToolOverride<'a, H: FarmHost> {
    host: &'a mut H,
    operator: &'a mut Operator,
    saved: SavedToolState,
}

impl<'a, H: FarmHost> ToolOverride<'a, H> {
    pub fn engage(host: &'a mut H, operator: &'a mut Operator) -> Self {
        let player = host.player_mut();
        let mut saved = SavedToolState {
            water_left: None,
            upgrade_level: 0,
            stamina: player.stamina,
            operator_position: operator.position,
        };
        if let Implement::Tool(tool) = &mut player.held {
            saved.water_left = tool.water_left;
            saved.upgrade_level = tool.upgrade_level;
            if tool.water_left.is_some() {
                tool.water_left = Some(tool.water_max);
            }
            tool.upgrade_level = MAX_UPGRADE_LEVEL;
        }
        player.tool_power = 0;

        // The mount sits at the origin so it can't block its own tool swings.
        operator.position = PixelPoint::ORIGIN;

        Self {
            host,
            operator,
            saved,
        }
    }

    pub fn host(&self) -> &H {
        self.host
    }

    /// Swing the held tool at the centre of `tile`.
    pub fn use_at(&mut self, tile: TileCoord) -> Result<(), HostError> {
        self.host.use_tool_at(tile.center_pixel(), self.operator)
    }
}

impl<H: FarmHost> Drop for ToolOverride<'_, H> {
    fn drop(&mut self) {
        let player = self.host.player_mut();
        player.stamina = self.saved.stamina;
        if let Implement::Tool(tool) = &mut player.held {
            tool.water_left = self.saved.water_left;
            tool.upgrade_level = self.saved.upgrade_level;
        }
        self.operator.position = self.saved.operator_position;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolPassOutcome {
    pub used: u32,
    pub skipped: u32,
    pub rejected: u32,
}

/// Use the held tool on every tile the tool is allowed to touch.
///
/// Tiles the host rejects are skipped. A fatal host error stops the pass and
/// is returned once the overrides have been undone.
pub fn apply_tool<H: FarmHost>(
    host: &mut H,
    operator: &mut Operator,
    config: &TractorConfig,
    tiles: impl IntoIterator<Item = TileCoord>,
) -> Result<ToolPassOutcome, HostError> {
    let Implement::Tool(tool) = &host.player().held else {
        return Ok(ToolPassOutcome::default());
    };
    let kind = tool.kind;

    let mut outcome = ToolPassOutcome::default();
    let mut guard = ToolOverride::engage(host, operator);
    for tile in tiles {
        if !tool_may_touch(guard.host(), kind, tile, config) {
            outcome.skipped += 1;
            continue;
        }
        match guard.use_at(tile) {
            Ok(()) => outcome.used += 1,
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                debug!(%tile, error = %err, "tool use skipped");
                outcome.rejected += 1;
            }
        }
    }
    Ok(outcome)
}

/// Per-tile protection rules: never smash placed objects with a hoe or
/// pickaxe, never clear live crops, and respect the pickaxe flags.
fn tool_may_touch<H: FarmHost>(
    host: &H,
    kind: ToolKind,
    tile: TileCoord,
    config: &TractorConfig,
) -> bool {
    let object = host.object_at(tile);
    let is_stone = object.as_ref().is_some_and(|o| o.name == STONE);

    if matches!(kind, ToolKind::Hoe | ToolKind::Pickaxe) && object.is_some() && !is_stone {
        return false;
    }
    if kind != ToolKind::Pickaxe {
        return true;
    }

    match host.terrain_feature(tile) {
        Some(TerrainFeature::Soil(soil)) => {
            let live_crop = soil.crop.as_ref().is_some_and(|crop| !crop.dead);
            if live_crop || !config.pickaxe_clears_dirt {
                return false;
            }
        }
        Some(TerrainFeature::Flooring) if !config.pickaxe_breaks_flooring => return false,
        _ => {}
    }
    !(is_stone && !config.pickaxe_breaks_rocks)
}
