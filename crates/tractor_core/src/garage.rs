//! Tractor garage lifecycle: construction, save stashing, day-start restore
//! and operator spawning.
//!
//! Garages never live in the host save. Before the host saves they are
//! snapshotted into a [`PersistedAutomationState`] and removed from the
//! world; after the next day starts they are rebuilt from that record with
//! one construction day elapsed.

use rand::Rng;
use tracing::{debug, info};

use crate::host::FarmHost;
use crate::id::generate_operator_id;
use crate::session::AutomationSession;
use crate::{
    Blueprint, Building, BuildingId, CustomSaveBuilding, Operator, PersistedAutomationState,
    TileCoord, TractorConfig, FARM_LOCATION, GARAGE_BUILDING_TYPE, ITEM_BATTERY_PACK,
    ITEM_IRIDIUM_BAR, ITEM_IRON_BAR,
};

/// Days the builder needs to finish a garage.
pub const GARAGE_CONSTRUCTION_DAYS: u32 = 3;

pub const GARAGE_TILES_WIDE: i32 = 4;
pub const GARAGE_TILES_HIGH: i32 = 2;

/// Horizontal pixel nudge so the tractor sits centred in the garage doorway.
const OPERATOR_SPAWN_NUDGE_PX: f32 = 20.0;

/// The purchasable garage entry injected into construction menus.
pub fn garage_blueprint(config: &TractorConfig) -> Blueprint {
    let items_required = if config.build_uses_resources {
        vec![
            (ITEM_IRON_BAR, 20),
            (ITEM_IRIDIUM_BAR, 5),
            (ITEM_BATTERY_PACK, 5),
        ]
    } else {
        Vec::new()
    };
    Blueprint {
        name: GARAGE_BUILDING_TYPE.to_string(),
        display_name: "Tractor Garage".to_string(),
        description: "A structure to store a tractor. The tractor can till, water, \
                      plant, fertilize and harvest several tiles at once."
            .to_string(),
        blueprint_type: "Buildings".to_string(),
        money_required: config.build_price,
        items_required,
        tiles_wide: GARAGE_TILES_WIDE,
        tiles_high: GARAGE_TILES_HIGH,
        buildable_locations: vec![FARM_LOCATION.to_string()],
    }
}

fn managed_garage(tile: TileCoord, days_of_construction_left: u32) -> Building {
    Building {
        id: BuildingId(0),
        building_type: GARAGE_BUILDING_TYPE.to_string(),
        tile,
        tiles_wide: GARAGE_TILES_WIDE,
        tiles_high: GARAGE_TILES_HIGH,
        days_of_construction_left,
        managed: true,
    }
}

/// Spawn the session's tractor in front of the garage at `garage_tile`,
/// replacing any tractor already in the world.
pub fn spawn_operator<H: FarmHost>(
    session: &mut AutomationSession,
    host: &mut H,
    garage_tile: TileCoord,
    rng: &mut impl Rng,
) {
    let tile = garage_tile.offset(1, 1);
    let mut position = tile.to_pixel();
    position.x += OPERATOR_SPAWN_NUDGE_PX;
    let operator = Operator {
        id: generate_operator_id(rng),
        location: FARM_LOCATION.to_string(),
        tile,
        position,
        riding: false,
    };
    host.remove_operators();
    host.place_operator(&operator);
    info!(%tile, "tractor spawned");
    session.operator = Some(operator);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub garages: u32,
    pub under_construction: u32,
    pub operator_spawned: bool,
}

/// Rebuild garages and the tractor from the stashed record.
///
/// Each garage loses one construction day. The first garage still under
/// construction gets the builder NPC; the first complete garage in record
/// order gets the tractor.
pub fn restore_custom_data<H: FarmHost>(
    session: &mut AutomationSession,
    host: &mut H,
    data: Option<&PersistedAutomationState>,
    rng: &mut impl Rng,
) -> RestoreReport {
    let mut report = RestoreReport::default();
    let Some(data) = data else {
        return report;
    };

    for record in &data.buildings {
        let days = u32::try_from(record.days_of_construction_left.saturating_sub(1)).unwrap_or(0);
        let garage = managed_garage(record.tile, days);
        let center = garage.center_tile();
        host.add_building(garage);
        report.garages += 1;

        if days > 0 {
            report.under_construction += 1;
            if !session.builder_busy {
                session.builder_busy = true;
                host.start_builder_work(center);
            }
        } else if session.operator.is_none() {
            spawn_operator(session, host, record.tile, rng);
            report.operator_spawned = true;
        }
    }

    info!(
        garages = report.garages,
        under_construction = report.under_construction,
        "restored tractor garages"
    );
    report
}

/// Snapshot every garage, then remove garages and the tractor from the world.
pub fn stash_custom_data<H: FarmHost>(
    session: &mut AutomationSession,
    host: &mut H,
) -> PersistedAutomationState {
    let garages: Vec<Building> = host.buildings().into_iter().filter(Building::is_garage).collect();

    let data = PersistedAutomationState {
        buildings: garages
            .iter()
            .map(|garage| CustomSaveBuilding {
                tile: garage.tile,
                building_type: GARAGE_BUILDING_TYPE.to_string(),
                days_of_construction_left: i32::try_from(garage.days_of_construction_left)
                    .unwrap_or(i32::MAX),
            })
            .collect(),
    };

    for garage in &garages {
        host.remove_building(garage.id);
    }
    host.remove_operators();
    session.operator = None;

    if session.builder_busy {
        session.builder_busy = false;
        host.reset_builder();
    }

    info!(garages = data.buildings.len(), "stashed tractor garages");
    data
}

/// Fix up garages placed through a construction menu today.
///
/// Newly placed garages get the garage construction time. A garage that is
/// already complete (built instantly by another mod) is replaced with a
/// managed garage and gets a tractor if none exists yet.
pub fn process_new_construction<H: FarmHost>(
    session: &mut AutomationSession,
    host: &mut H,
    rng: &mut impl Rng,
) {
    let placed: Vec<Building> = host
        .buildings()
        .into_iter()
        .filter(|b| b.is_garage() && !b.managed)
        .collect();

    for garage in placed {
        let days_left = if session.garages_started_today.contains(&garage.id) {
            garage.days_of_construction_left
        } else {
            host.set_construction_days(garage.id, GARAGE_CONSTRUCTION_DAYS);
            session.garages_started_today.push(garage.id);
            debug!(tile = %garage.tile, "garage construction started");
            GARAGE_CONSTRUCTION_DAYS
        };
        if days_left > 0 {
            continue;
        }

        session.garages_started_today.retain(|id| *id != garage.id);
        host.remove_building(garage.id);
        host.add_building(managed_garage(garage.tile, 0));
        if session.operator.is_none() {
            spawn_operator(session, host, garage.tile, rng);
        }
    }
}
