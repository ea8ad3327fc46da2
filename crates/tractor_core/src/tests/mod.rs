use super::*;
use crate::sandbox::SandboxFarm;
use crate::test_fixtures::{
    base_config, farm_holding, make_rng, riding_session, PLAYER_TILE,
};

mod session;

// --- Shared test helpers ------------------------------------------------

/// The 3x3 grid around the player at the default radius.
fn player_grid() -> TileGrid {
    tile_grid(PLAYER_TILE, 1)
}

/// Drive `update` for one full cooldown window, returning the pass that ran.
fn run_one_pass(session: &mut AutomationSession, farm: &mut SandboxFarm) -> PassReport {
    let mut rng = make_rng();
    let mut pass = None;
    for _ in 0..cooldown::TICKS_PER_ACTION {
        let report = update(session, farm, &mut rng).expect("update should succeed");
        if report.pass.is_some() {
            pass = report.pass;
        }
    }
    pass.expect("one pass should run per cooldown window")
}

#[test]
fn test_default_session_has_no_operator() {
    let session = AutomationSession::new(base_config());
    assert!(session.operator.is_none());
    assert!(!session.is_riding());
}

#[test]
fn test_riding_session_fixture_is_riding() {
    let session = riding_session(base_config());
    assert!(session.is_riding());
    let farm = farm_holding(Implement::Empty);
    assert_eq!(farm.player.tile, PLAYER_TILE);
}
