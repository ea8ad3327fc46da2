use serde::{Deserialize, Serialize};

/// Number of host ticks between tractor actions, roughly five times per second.
pub const TICKS_PER_ACTION: u32 = 12;

/// Admits one action pass every `ticks_per_action` eligible host ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownGate {
    ticks_per_action: u32,
    skipped_ticks: u32,
}

impl Default for CooldownGate {
    fn default() -> Self {
        Self::new(TICKS_PER_ACTION)
    }
}

impl CooldownGate {
    pub fn new(ticks_per_action: u32) -> Self {
        Self {
            ticks_per_action: ticks_per_action.max(1),
            skipped_ticks: 0,
        }
    }

    /// Count one eligible tick. Returns true when a pass should run now.
    pub fn admit(&mut self) -> bool {
        self.skipped_ticks += 1;
        if self.skipped_ticks % self.ticks_per_action != 0 {
            return false;
        }
        self.skipped_ticks = 0;
        true
    }

    pub fn reset(&mut self) {
        self.skipped_ticks = 0;
    }
}
