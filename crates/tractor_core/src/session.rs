use rand::Rng;

use crate::buff::maintain_speed_buff;
use crate::classify::classify;
use crate::cooldown::CooldownGate;
use crate::garage::process_new_construction;
use crate::grid::tile_grid;
use crate::harvest::{harvest_tiles, HarvestOutcome};
use crate::host::{FarmHost, HostError, MenuState};
use crate::planting::{apply_item, PlantingOutcome};
use crate::tools::{apply_tool, ToolPassOutcome};
use crate::{ActionFamily, BuildingId, Operator, TractorConfig};

/// Per-save automation state.
///
/// Lifecycle: created once when the mod loads, reset at each day start
/// (before garages are restored), and torn down before each save.
#[derive(Debug, Clone)]
pub struct AutomationSession {
    pub config: TractorConfig,
    pub operator: Option<Operator>,
    pub cooldown: CooldownGate,
    /// Whether the builder NPC was sent to work on a garage today.
    pub builder_busy: bool,
    /// Garages placed through a construction menu today.
    pub garages_started_today: Vec<BuildingId>,
}

impl AutomationSession {
    pub fn new(config: TractorConfig) -> Self {
        Self {
            config,
            operator: None,
            cooldown: CooldownGate::default(),
            builder_busy: false,
            garages_started_today: Vec::new(),
        }
    }

    pub fn reset_for_new_day(&mut self) {
        self.operator = None;
        self.garages_started_today.clear();
        self.cooldown.reset();
    }

    pub fn is_riding(&self) -> bool {
        self.operator.as_ref().is_some_and(|op| op.riding)
    }

    pub fn set_riding(&mut self, riding: bool) {
        if let Some(operator) = self.operator.as_mut() {
            operator.riding = riding;
        }
    }

    /// Move the tractor to the player. No-op without a tractor.
    pub fn summon<H: FarmHost>(&mut self, host: &mut H) -> bool {
        let Some(operator) = self.operator.as_mut() else {
            return false;
        };
        let player = host.player();
        operator.location.clone_from(&player.location);
        operator.tile = player.tile;
        operator.position = player.tile.to_pixel();
        host.place_operator(operator);
        true
    }
}

/// Result of one action pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassReport {
    Tool {
        family: ActionFamily,
        outcome: ToolPassOutcome,
    },
    Planting(PlantingOutcome),
    Harvest(HarvestOutcome),
    /// A pass ran but the held implement does nothing.
    Idle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub buff_added: bool,
    pub pass: Option<PassReport>,
}

/// Advance the automation by one host tick.
///
/// Order of operations:
/// 1. Fix up newly placed garages while a construction menu is open.
/// 2. Skip unless the tractor is ridden and no menu is open.
/// 3. Keep the speed buff alive.
/// 4. Let the cooldown gate admit at most one action pass.
/// 5. Classify the held implement and apply it across the tile grid.
pub fn update<H: FarmHost>(
    session: &mut AutomationSession,
    host: &mut H,
    rng: &mut impl Rng,
) -> Result<TickReport, HostError> {
    let mut report = TickReport::default();

    let menu = host.active_menu();
    if menu == MenuState::Construction {
        process_new_construction(session, host, rng);
    }

    let Some(operator) = session.operator.as_mut() else {
        return Ok(report);
    };
    if !operator.riding || menu != MenuState::Closed {
        return Ok(report);
    }

    report.buff_added = maintain_speed_buff(host.player_mut(), session.config.tractor_speed);

    if !session.cooldown.admit() {
        return Ok(report);
    }

    let config = &session.config;
    let tiles = tile_grid(host.player().tile, config.distance);
    let family = classify(&host.player().held, config);
    let pass = match family {
        ActionFamily::Watering
        | ActionFamily::Tilling
        | ActionFamily::Clearing
        | ActionFamily::Custom => PassReport::Tool {
            family,
            outcome: apply_tool(host, operator, config, tiles)?,
        },
        ActionFamily::PlantingOrFertilizing => PassReport::Planting(apply_item(host, tiles)),
        ActionFamily::Harvesting => {
            PassReport::Harvest(harvest_tiles(host, config.scythe_harvests, tiles, rng))
        }
        ActionFamily::None => PassReport::Idle,
    };
    report.pass = Some(pass);
    Ok(report)
}
