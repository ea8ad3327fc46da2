use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tractor_core::cooldown::TICKS_PER_ACTION;
use tractor_core::sandbox::{SandboxConstructionMenu, SandboxFarm, SandboxPlainMenu};
use tractor_core::{
    Farmer, Implement, ItemCategory, ItemStack, MenuState, PassReport, PlacedObject, Quality,
    SaveId, TerrainFeature, TileCoord, Tool, ToolKind, FARM_LOCATION,
};
use tractor_world::{validate_config, LifecycleHooks, TractorMod, CONFIG_FILE};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "tractor_cli", about = "Tractor farm automation sandbox")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a garage on a sandbox farm and work a field for several days.
    Run {
        #[arg(long, default_value_t = 6)]
        days: u32,
        /// Random seed. Picked at random when omitted.
        #[arg(long)]
        seed: Option<u64>,
        /// Config file. Defaults to `config.json` inside the data directory.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory holding `data/` save records and the legacy save file.
        #[arg(long, default_value = "./tractor-data")]
        data_dir: PathBuf,
        /// Override the configured tile radius.
        #[arg(long)]
        radius: Option<u32>,
    },
    /// Print the effective config as JSON.
    ShowConfig {
        #[arg(long, default_value = "./tractor-data")]
        data_dir: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Sandbox farm
// ---------------------------------------------------------------------------

const FIELD_ORIGIN: TileCoord = TileCoord::new(40, 20);
const GARAGE_TILE: TileCoord = TileCoord::new(30, 12);
const PARSNIP_SEEDS: u32 = 472;

fn farmer() -> Farmer {
    Farmer {
        name: "Sandbox".to_string(),
        location: FARM_LOCATION.to_string(),
        tile: FIELD_ORIGIN,
        stamina: 270.0,
        tool_power: 0,
        professions: SmallVec::new(),
        held: Implement::Empty,
        buffs: Vec::new(),
    }
}

/// A patch of grass, a few stones and some weeds around the field.
fn demo_farm() -> SandboxFarm {
    let mut farm = SandboxFarm::new(farmer());
    let object = |name: &str, item_id| PlacedObject {
        name: name.to_string(),
        item_id,
        stack: 1,
        quality: Quality::Normal,
        spawned: false,
        forage: false,
    };
    for dx in -4..=4 {
        farm.features.insert(FIELD_ORIGIN.offset(dx, -5), TerrainFeature::Grass);
    }
    farm.objects.insert(FIELD_ORIGIN.offset(1, 1), object("Stone", 390));
    farm.objects.insert(FIELD_ORIGIN.offset(-1, 0), object("Weeds", 674));
    farm.features.insert(FIELD_ORIGIN.offset(0, 3), TerrainFeature::Tree);
    farm
}

/// Implements worked through on each day with a tractor, in order.
fn daily_loadout() -> Vec<Implement> {
    vec![
        Implement::Tool(Tool::new(ToolKind::Pickaxe, "Pickaxe")),
        Implement::Tool(Tool::new(ToolKind::Hoe, "Hoe")),
        Implement::Item(ItemStack {
            item_id: PARSNIP_SEEDS,
            category: ItemCategory::Seed,
            stack: 30,
        }),
        Implement::Tool(Tool::new(ToolKind::WateringCan, "Watering Can")),
        Implement::Tool(Tool::new(ToolKind::MeleeWeapon, "Scythe")),
    ]
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

fn load_tractor(
    data_dir: &Path,
    config_path: Option<&Path>,
    radius: Option<u32>,
    rng: ChaCha8Rng,
) -> Result<TractorMod<ChaCha8Rng>> {
    let save_id = SaveId::from_farmer(&farmer().name, 0);
    let mut tractor = TractorMod::load(data_dir, save_id, rng)?;
    if let Some(path) = config_path {
        tractor.session.config = tractor_world::load_config(path)?;
    }
    if let Some(radius) = radius {
        tractor.session.config.distance = radius;
    }
    validate_config(&tractor.session.config);
    Ok(tractor)
}

/// Open the carpenter, buy a garage and place it.
fn order_garage(tractor: &mut TractorMod<ChaCha8Rng>, farm: &mut SandboxFarm) -> Result<()> {
    let mut carpenter = SandboxConstructionMenu::default();
    tractor.on_menu_changed(&mut carpenter);
    tractor.on_menu_changed(&mut SandboxPlainMenu);
    if let Some(blueprint) = carpenter.blueprints.first() {
        println!(
            "Ordered {} for {}g and {} ingredient kinds",
            blueprint.display_name,
            blueprint.money_required,
            blueprint.items_required.len()
        );
    }
    farm.menu = MenuState::Construction;
    farm.place_garage_from_menu(GARAGE_TILE);
    tractor.on_update_tick(farm)?;
    farm.menu = MenuState::Closed;
    Ok(())
}

/// Ride out and use every implement in the loadout once over the field.
fn work_field(
    tractor: &mut TractorMod<ChaCha8Rng>,
    farm: &mut SandboxFarm,
) -> Result<Vec<PassReport>> {
    let key = tractor.config().tractor_key.clone();
    tractor.on_key_pressed(farm, &key);
    tractor.session.set_riding(true);

    let mut passes = Vec::new();
    for implement in daily_loadout() {
        farm.player.held = implement;
        for _ in 0..TICKS_PER_ACTION {
            if let Some(pass) = tractor.on_update_tick(farm)?.pass {
                passes.push(pass);
            }
        }
    }
    farm.player.held = Implement::Empty;
    tractor.session.set_riding(false);
    Ok(passes)
}

fn describe(pass: &PassReport) -> String {
    match pass {
        PassReport::Tool { family, outcome } => format!(
            "{family:?}: used={} skipped={} rejected={}",
            outcome.used, outcome.skipped, outcome.rejected
        ),
        PassReport::Planting(outcome) => format!("Planting: applied={}", outcome.applied),
        PassReport::Harvest(outcome) => format!(
            "Harvest: crops={} grass={} weeds={} trees={} drops={}",
            outcome.crops,
            outcome.grass_cut,
            outcome.weeds_cleared,
            outcome.trees_shaken,
            outcome.drops
        ),
        PassReport::Idle => "Idle".to_string(),
    }
}

fn run(
    days: u32,
    seed: Option<u64>,
    config_path: Option<&Path>,
    data_dir: &Path,
    radius: Option<u32>,
) -> Result<()> {
    let resolved_seed = seed.unwrap_or_else(rand::random);
    let rng = ChaCha8Rng::seed_from_u64(resolved_seed);
    let mut tractor = load_tractor(data_dir, config_path, radius, rng)?;
    let mut farm = demo_farm();

    println!(
        "Starting sandbox: days={days} seed={resolved_seed} radius={} save={}",
        tractor.config().distance,
        tractor.save_id(),
    );
    println!("{}", "-".repeat(80));

    for day in 1..=days {
        let restore = tractor.on_day_started(&mut farm)?;
        if day == 1 && restore.garages == 0 {
            order_garage(&mut tractor, &mut farm)?;
        }

        let passes = if tractor.session.operator.is_some() {
            work_field(&mut tractor, &mut farm)?
        } else {
            Vec::new()
        };

        println!(
            "[day={day:02}]  garages={}  building={}  tractor={}  passes={}  drops={}  hay={}",
            farm.buildings.len(),
            restore.under_construction,
            if tractor.session.operator.is_some() { "yes" } else { "no" },
            passes.len(),
            farm.drops.len(),
            farm.hay,
        );
        for pass in &passes {
            println!("           {}", describe(pass));
        }

        tractor.on_before_save(&mut farm)?;
        farm.advance_day();
    }

    println!("{}", "-".repeat(80));
    info!(path = %tractor.store().data_path(tractor.save_id()).display(), "garage record written");
    println!("Done after {days} days.");
    Ok(())
}

fn show_config(data_dir: &Path) -> Result<()> {
    let config = tractor_world::load_config(&data_dir.join(CONFIG_FILE))?;
    let json = serde_json::to_string_pretty(&config).context("serializing config")?;
    println!("{json}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            days,
            seed,
            config,
            data_dir,
            radius,
        } => run(days, seed, config.as_deref(), &data_dir, radius)?,
        Commands::ShowConfig { data_dir } => show_config(&data_dir)?,
    }
    Ok(())
}
