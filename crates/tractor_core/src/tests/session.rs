use super::*;
use crate::buff::BUFF_UNIQUE_ID;
use crate::sandbox::ITEM_WOOD;
use crate::test_fixtures::{placed_object, seeds, scythe, tilled, tool};
use crate::tools::ToolPassOutcome;

fn tilled_farm(held: Implement) -> SandboxFarm {
    let mut farm = farm_holding(held);
    for tile in player_grid() {
        farm.features.insert(tile, tilled());
    }
    farm
}

#[test]
fn test_exactly_one_pass_per_cooldown_window() {
    let mut session = riding_session(base_config());
    let mut farm = farm_holding(tool(ToolKind::Hoe, "Hoe"));
    let mut rng = make_rng();

    let passes = (0..cooldown::TICKS_PER_ACTION * 3)
        .filter(|_| update(&mut session, &mut farm, &mut rng).unwrap().pass.is_some())
        .count();

    assert_eq!(passes, 3);
}

#[test]
fn test_no_pass_without_operator() {
    let mut session = AutomationSession::new(base_config());
    let mut farm = farm_holding(tool(ToolKind::Hoe, "Hoe"));
    let mut rng = make_rng();

    for _ in 0..cooldown::TICKS_PER_ACTION * 2 {
        let report = update(&mut session, &mut farm, &mut rng).unwrap();
        assert_eq!(report, TickReport::default());
    }
    assert!(farm.features.is_empty());
    assert!(farm.player.buffs.is_empty());
}

#[test]
fn test_no_pass_when_dismounted() {
    let mut session = riding_session(base_config());
    session.set_riding(false);
    let mut farm = farm_holding(tool(ToolKind::Hoe, "Hoe"));
    let mut rng = make_rng();

    for _ in 0..cooldown::TICKS_PER_ACTION * 2 {
        assert!(update(&mut session, &mut farm, &mut rng).unwrap().pass.is_none());
    }
    assert!(farm.features.is_empty());
}

#[test]
fn test_no_pass_while_menu_open() {
    let mut session = riding_session(base_config());
    let mut farm = farm_holding(tool(ToolKind::Hoe, "Hoe"));
    farm.menu = MenuState::Other;
    let mut rng = make_rng();

    for _ in 0..cooldown::TICKS_PER_ACTION * 2 {
        let report = update(&mut session, &mut farm, &mut rng).unwrap();
        assert!(report.pass.is_none());
        assert!(!report.buff_added);
    }
    assert!(farm.player.buffs.is_empty());
}

#[test]
fn test_speed_buff_added_once_while_riding() {
    let mut config = base_config();
    config.tractor_speed = -3;
    let mut session = riding_session(config);
    let mut farm = farm_holding(Implement::Empty);
    let mut rng = make_rng();

    let first = update(&mut session, &mut farm, &mut rng).unwrap();
    let second = update(&mut session, &mut farm, &mut rng).unwrap();

    assert!(first.buff_added);
    assert!(!second.buff_added);
    let buffs: Vec<_> = farm
        .player
        .buffs
        .iter()
        .filter(|b| b.id == BUFF_UNIQUE_ID)
        .collect();
    assert_eq!(buffs.len(), 1);
    assert_eq!(buffs[0].speed, -3);
}

#[test]
fn test_hoe_pass_tills_grid() {
    let mut session = riding_session(base_config());
    let mut farm = farm_holding(tool(ToolKind::Hoe, "Hoe"));

    let pass = run_one_pass(&mut session, &mut farm);

    assert!(matches!(
        pass,
        PassReport::Tool {
            family: ActionFamily::Tilling,
            ..
        }
    ));
    for tile in player_grid() {
        assert!(farm.soil(tile).is_some(), "{tile} should be tilled");
    }
}

#[test]
fn test_wider_radius_covers_more_tiles() {
    let mut config = base_config();
    config.distance = 2;
    let mut session = riding_session(config);
    let mut farm = farm_holding(tool(ToolKind::Hoe, "Hoe"));

    run_one_pass(&mut session, &mut farm);

    assert_eq!(farm.features.len(), 25);
}

#[test]
fn test_seed_pass_dispatches_to_planting() {
    let mut session = riding_session(base_config());
    let mut farm = tilled_farm(seeds(4));

    let pass = run_one_pass(&mut session, &mut farm);

    assert_eq!(
        pass,
        PassReport::Planting(crate::planting::PlantingOutcome {
            applied: 4,
            exhausted: true
        })
    );
}

#[test]
fn test_scythe_pass_dispatches_to_harvest() {
    let mut session = riding_session(base_config());
    let mut farm = farm_holding(scythe()).with_feature(PLAYER_TILE, TerrainFeature::Grass);

    let pass = run_one_pass(&mut session, &mut farm);

    let PassReport::Harvest(outcome) = pass else {
        panic!("expected a harvest pass, got {pass:?}");
    };
    assert_eq!(outcome.grass_cut, 1);
}

#[test]
fn test_disabled_scythe_is_idle() {
    let mut config = base_config();
    config.scythe_harvests = false;
    let mut session = riding_session(config);
    let mut farm = farm_holding(scythe()).with_feature(PLAYER_TILE, TerrainFeature::Grass);

    let pass = run_one_pass(&mut session, &mut farm);

    assert_eq!(pass, PassReport::Idle);
    assert!(farm.features.contains_key(&PLAYER_TILE));
}

#[test]
fn test_allow_listed_axe_runs_through_the_guard() {
    let mut config = base_config();
    config.custom_tools = vec!["Axe".to_string()];
    let mut session = riding_session(config);
    let mut farm = farm_holding(tool(ToolKind::Axe, "Axe"))
        .with_object(PLAYER_TILE, placed_object("Twig", 294));

    let pass = run_one_pass(&mut session, &mut farm);

    assert_eq!(
        pass,
        PassReport::Tool {
            family: ActionFamily::Custom,
            outcome: ToolPassOutcome {
                used: 9,
                skipped: 0,
                rejected: 0
            }
        }
    );
    assert!(!farm.objects.contains_key(&PLAYER_TILE));
    assert_eq!(farm.drop_count(ITEM_WOOD), 1);
}

#[test]
fn test_axe_not_allow_listed_is_idle() {
    let mut session = riding_session(base_config());
    let mut farm = farm_holding(tool(ToolKind::Axe, "Axe"))
        .with_object(PLAYER_TILE, placed_object("Twig", 294));

    assert_eq!(run_one_pass(&mut session, &mut farm), PassReport::Idle);
    assert!(farm.objects.contains_key(&PLAYER_TILE));
}

#[test]
fn test_allow_listed_pickaxe_dispatches_with_every_flag_off() {
    let mut config = base_config();
    config.pickaxe_clears_dirt = false;
    config.pickaxe_breaks_rocks = false;
    config.pickaxe_breaks_flooring = false;
    config.custom_tools = vec!["Pickaxe".to_string()];
    let mut session = riding_session(config);
    let mut farm = farm_holding(tool(ToolKind::Pickaxe, "Pickaxe"))
        .with_object(PLAYER_TILE, placed_object("Stone", 390));

    let pass = run_one_pass(&mut session, &mut farm);

    // Dispatch bypasses the flags; the per-tile rules still spare the stone.
    assert_eq!(
        pass,
        PassReport::Tool {
            family: ActionFamily::Clearing,
            outcome: ToolPassOutcome {
                used: 8,
                skipped: 1,
                rejected: 0
            }
        }
    );
    assert!(farm.objects.contains_key(&PLAYER_TILE));
}

#[test]
fn test_pickaxe_with_every_flag_off_is_idle() {
    let mut config = base_config();
    config.pickaxe_clears_dirt = false;
    config.pickaxe_breaks_rocks = false;
    config.pickaxe_breaks_flooring = false;
    let mut session = riding_session(config);
    let mut farm = farm_holding(tool(ToolKind::Pickaxe, "Pickaxe"));

    assert_eq!(run_one_pass(&mut session, &mut farm), PassReport::Idle);
    assert!(farm.tool_swings.is_empty());
}

#[test]
fn test_empty_hands_pass_is_idle() {
    let mut session = riding_session(base_config());
    let mut farm = farm_holding(Implement::Empty);
    assert_eq!(run_one_pass(&mut session, &mut farm), PassReport::Idle);
}

#[test]
fn test_grid_follows_player_not_operator() {
    let mut session = riding_session(base_config());
    let mut farm = farm_holding(tool(ToolKind::Hoe, "Hoe"));
    farm.player.tile = TileCoord::new(30, 5);

    run_one_pass(&mut session, &mut farm);

    assert!(farm.soil(TileCoord::new(31, 6)).is_some());
    assert!(farm.soil(PLAYER_TILE).is_none());
}

#[test]
fn test_fatal_host_error_propagates() {
    let mut session = riding_session(base_config());
    let mut farm = farm_holding(tool(ToolKind::Hoe, "Hoe"));
    farm.failing_tiles
        .insert(PLAYER_TILE, HostError::Fatal("location unloaded".to_string()));
    let mut rng = make_rng();

    let results: Vec<_> = (0..cooldown::TICKS_PER_ACTION)
        .map(|_| update(&mut session, &mut farm, &mut rng))
        .collect();

    assert!(results[..results.len() - 1].iter().all(Result::is_ok));
    assert!(results.last().unwrap().as_ref().unwrap_err().is_fatal());
}

#[test]
fn test_summon_moves_operator_to_player() {
    let mut session = riding_session(base_config());
    session.set_riding(false);
    let mut farm = farm_holding(Implement::Empty);
    farm.player.tile = TileCoord::new(3, 4);

    assert!(session.summon(&mut farm));

    let operator = session.operator.as_ref().unwrap();
    assert_eq!(operator.tile, TileCoord::new(3, 4));
    assert_eq!(operator.position, TileCoord::new(3, 4).to_pixel());
    assert_eq!(farm.operators.len(), 1);
}

#[test]
fn test_summon_without_operator_is_no_op() {
    let mut session = AutomationSession::new(base_config());
    let mut farm = farm_holding(Implement::Empty);
    assert!(!session.summon(&mut farm));
    assert!(farm.operators.is_empty());
}

#[test]
fn test_new_day_clears_operator_and_cooldown() {
    let mut session = riding_session(base_config());
    let mut farm = farm_holding(tool(ToolKind::Hoe, "Hoe"));
    let mut rng = make_rng();
    for _ in 0..5 {
        update(&mut session, &mut farm, &mut rng).unwrap();
    }

    session.reset_for_new_day();
    assert!(session.operator.is_none());

    session.operator = Some(crate::test_fixtures::riding_operator());
    let passes = (0..cooldown::TICKS_PER_ACTION)
        .filter(|_| update(&mut session, &mut farm, &mut rng).unwrap().pass.is_some())
        .count();
    assert_eq!(passes, 1);
}
