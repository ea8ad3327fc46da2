//! Per-save garage records kept next to the mod, outside the host save.
//!
//! Layout under the mod directory:
//! - `data/{save_id}.json`: one [`PersistedAutomationState`] per save slot
//! - `TractorModSave.json`: legacy single-file format, migrated once on load

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tractor_core::{
    CustomSaveBuilding, PersistedAutomationState, SaveId, TileCoord, GARAGE_BUILDING_TYPE,
};

pub const LEGACY_SAVE_FILE: &str = "TractorModSave.json";

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LegacySaveFile {
    #[serde(default)]
    saves: Option<Vec<LegacySaveEntry>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LegacySaveEntry {
    farmer_name: String,
    save_seed: u64,
    #[serde(default)]
    tractor_house: Vec<TileCoord>,
}

#[derive(Debug, Clone)]
pub struct SaveStore {
    root: PathBuf,
}

impl SaveStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self, save_id: &SaveId) -> PathBuf {
        self.root.join("data").join(format!("{save_id}.json"))
    }

    /// Read the record for a save. A save that never had a garage has no file.
    pub fn read_save(&self, save_id: &SaveId) -> Result<Option<PersistedAutomationState>> {
        let path = self.data_path(save_id);
        if !path.exists() {
            return Ok(None);
        }
        let data = serde_json::from_str(
            &std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?,
        )
        .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(data))
    }

    /// Overwrite the record for a save.
    pub fn write_save(&self, save_id: &SaveId, data: &PersistedAutomationState) -> Result<()> {
        let path = self.data_path(save_id);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(data).context("serializing save data")?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))
    }

    /// Split a legacy `TractorModSave.json` into per-save records, then delete it.
    ///
    /// Returns the save ids written. Failures are logged and leave the legacy
    /// file where it is, so startup can continue and retry next launch.
    pub fn migrate_legacy_save_data(&self) -> Vec<SaveId> {
        let path = self.root.join(LEGACY_SAVE_FILE);
        if !path.exists() {
            return Vec::new();
        }
        info!(path = %path.display(), "found legacy save file, migrating");
        match self.migrate_legacy_file(&path) {
            Ok(written) => {
                info!(saves = written.len(), "legacy save data migrated");
                written
            }
            Err(err) => {
                warn!("legacy save migration failed: {err:#}");
                Vec::new()
            }
        }
    }

    fn migrate_legacy_file(&self, path: &Path) -> Result<Vec<SaveId>> {
        let legacy: LegacySaveFile = serde_json::from_str(
            &std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
        )
        .with_context(|| format!("parsing {}", path.display()))?;

        // Later entries for the same save replace earlier ones.
        let mut saves: BTreeMap<String, (SaveId, PersistedAutomationState)> = BTreeMap::new();
        for entry in legacy.saves.unwrap_or_default() {
            let save_id = SaveId::from_farmer(&entry.farmer_name, entry.save_seed);
            let buildings = entry
                .tractor_house
                .into_iter()
                .map(|tile| CustomSaveBuilding {
                    tile,
                    building_type: GARAGE_BUILDING_TYPE.to_string(),
                    days_of_construction_left: 0,
                })
                .collect();
            saves.insert(
                save_id.0.clone(),
                (save_id, PersistedAutomationState { buildings }),
            );
        }

        let mut written = Vec::new();
        for (save_id, data) in saves.into_values() {
            if data.buildings.is_empty() {
                continue;
            }
            self.write_save(&save_id, &data)?;
            written.push(save_id);
        }

        std::fs::remove_file(path).with_context(|| format!("deleting {}", path.display()))?;
        Ok(written)
    }
}
