//! Tractor speed buff, kept alive only while the player is riding.

use crate::{Buff, Farmer};

/// Unique buff id, so the buff can be found again and refreshed.
pub const BUFF_UNIQUE_ID: u32 = 58_012_397;

pub const BUFF_SOURCE: &str = "Tractor Power";

/// Remaining duration set on every eligible tick. Short enough that the buff
/// disappears almost immediately after the player dismounts.
pub const BUFF_REFRESH_MS: u32 = 100;

/// Add the speed buff if missing, otherwise refresh its duration.
///
/// Returns true if the buff was newly added.
pub fn maintain_speed_buff(player: &mut Farmer, speed: i32) -> bool {
    if let Some(buff) = player.buffs.iter_mut().find(|b| b.id == BUFF_UNIQUE_ID) {
        buff.remaining_ms = BUFF_REFRESH_MS;
        return false;
    }
    player.buffs.push(Buff {
        id: BUFF_UNIQUE_ID,
        source: BUFF_SOURCE.to_string(),
        display_name: "Tractor".to_string(),
        speed,
        remaining_ms: BUFF_REFRESH_MS,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::base_farmer;

    #[test]
    fn adds_buff_once() {
        let mut player = base_farmer();
        assert!(maintain_speed_buff(&mut player, -2));
        assert!(!maintain_speed_buff(&mut player, -2));
        let count = player.buffs.iter().filter(|b| b.id == BUFF_UNIQUE_ID).count();
        assert_eq!(count, 1);
        assert_eq!(player.buffs[0].speed, -2);
    }

    #[test]
    fn refresh_restores_duration() {
        let mut player = base_farmer();
        maintain_speed_buff(&mut player, 3);
        player.buffs[0].remaining_ms = 7;
        maintain_speed_buff(&mut player, 3);
        assert_eq!(player.buffs[0].remaining_ms, BUFF_REFRESH_MS);
    }

    #[test]
    fn leaves_other_buffs_alone() {
        let mut player = base_farmer();
        player.buffs.push(Buff {
            id: 1,
            source: "Food".to_string(),
            display_name: "Coffee".to_string(),
            speed: 1,
            remaining_ms: 60_000,
        });
        maintain_speed_buff(&mut player, -2);
        assert_eq!(player.buffs.len(), 2);
        assert_eq!(player.buffs[0].remaining_ms, 60_000);
    }
}
