//! Filesystem side of the tractor: config, per-save garage records, and the
//! lifecycle hooks a host calls into.

pub mod config;
pub mod store;

use anyhow::{Context, Result};
use rand::Rng;
use std::path::Path;
use tracing::{debug, info};
use tractor_core::garage::RestoreReport;
use tractor_core::{
    garage_blueprint, restore_custom_data, stash_custom_data, update, AutomationSession,
    FarmHost, Menu, SaveId, TickReport, TractorConfig,
};

pub use config::{load_config, validate_config};
pub use store::SaveStore;

pub const CONFIG_FILE: &str = "config.json";

/// Callbacks the host fires over a play session.
pub trait LifecycleHooks {
    /// A new in-game day has begun and the world is loaded.
    fn on_day_started<H: FarmHost>(&mut self, host: &mut H) -> Result<RestoreReport>;

    /// The host is about to write its save.
    fn on_before_save<H: FarmHost>(&mut self, host: &mut H) -> Result<()>;

    fn on_key_pressed<H: FarmHost>(&mut self, host: &mut H, key: &str);

    /// Roughly sixty times per second.
    fn on_update_tick<H: FarmHost>(&mut self, host: &mut H) -> Result<TickReport>;

    fn on_menu_changed(&mut self, menu: &mut dyn Menu);
}

/// One loaded tractor mod bound to a save slot.
pub struct TractorMod<R: Rng> {
    pub session: AutomationSession,
    store: SaveStore,
    save_id: SaveId,
    rng: R,
}

impl<R: Rng> TractorMod<R> {
    pub fn new(config: TractorConfig, store: SaveStore, save_id: SaveId, rng: R) -> Self {
        Self {
            session: AutomationSession::new(config),
            store,
            save_id,
            rng,
        }
    }

    /// Load from a mod directory: migrate legacy saves, then read `config.json`.
    pub fn load(mod_dir: &Path, save_id: SaveId, rng: R) -> Result<Self> {
        let store = SaveStore::new(mod_dir);
        store.migrate_legacy_save_data();
        let config = load_config(&mod_dir.join(CONFIG_FILE))
            .with_context(|| format!("loading config from {}", mod_dir.display()))?;
        info!(save = %save_id, distance = config.distance, "tractor mod loaded");
        Ok(Self::new(config, store, save_id, rng))
    }

    pub fn config(&self) -> &TractorConfig {
        &self.session.config
    }

    pub fn save_id(&self) -> &SaveId {
        &self.save_id
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }
}

impl<R: Rng> LifecycleHooks for TractorMod<R> {
    fn on_day_started<H: FarmHost>(&mut self, host: &mut H) -> Result<RestoreReport> {
        self.session.reset_for_new_day();
        let data = self
            .store
            .read_save(&self.save_id)
            .with_context(|| format!("restoring garages for {}", self.save_id))?;
        Ok(restore_custom_data(
            &mut self.session,
            host,
            data.as_ref(),
            &mut self.rng,
        ))
    }

    fn on_before_save<H: FarmHost>(&mut self, host: &mut H) -> Result<()> {
        let data = stash_custom_data(&mut self.session, host);
        self.store
            .write_save(&self.save_id, &data)
            .with_context(|| format!("stashing garages for {}", self.save_id))
    }

    fn on_key_pressed<H: FarmHost>(&mut self, host: &mut H, key: &str) {
        if key != self.session.config.tractor_key {
            return;
        }
        if self.session.summon(host) {
            debug!(tile = %host.player().tile, "tractor summoned");
        }
    }

    fn on_update_tick<H: FarmHost>(&mut self, host: &mut H) -> Result<TickReport> {
        update(&mut self.session, host, &mut self.rng).context("tractor tick failed")
    }

    fn on_menu_changed(&mut self, menu: &mut dyn Menu) {
        if let Some(sink) = menu.blueprint_sink() {
            sink.add_blueprint(garage_blueprint(&self.session.config));
            debug!("garage blueprint added to construction menu");
        }
    }
}
