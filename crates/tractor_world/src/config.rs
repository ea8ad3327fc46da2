use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use tractor_core::TractorConfig;

/// Largest radius the tractor accepts.
pub const MAX_DISTANCE: u32 = 16;

/// Validates config values, panicking on settings that can never work.
pub fn validate_config(config: &TractorConfig) {
    assert!(
        config.distance <= MAX_DISTANCE,
        "Distance {} is larger than the maximum of {MAX_DISTANCE}",
        config.distance,
    );
    assert!(
        !config.tractor_key.trim().is_empty(),
        "TractorKey must name a key",
    );
    for name in &config.custom_tools {
        assert!(
            !name.trim().is_empty(),
            "CustomTools contains an empty tool name"
        );
    }
}

/// Read `config.json`, writing the defaults first if the file is missing.
pub fn load_config(path: &Path) -> Result<TractorConfig> {
    if !path.exists() {
        let config = TractorConfig::default();
        write_config(path, &config)?;
        info!(path = %path.display(), "wrote default config");
        return Ok(config);
    }
    let config: TractorConfig = serde_json::from_str(
        &std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
    )
    .with_context(|| format!("parsing {}", path.display()))?;
    validate_config(&config);
    Ok(config)
}

pub fn write_config(path: &Path, config: &TractorConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(config).context("serializing config")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
