mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::WrapErr;
use log::info;
use mapinfo_data::{Lump, Registry, StringMap, load_order};
use mapinfo_types::{GameMission, calc_map_name};
use serde::Serialize;

use crate::settings::Settings;

/// Load MAPINFO level descriptor lumps and print the resulting levels and
/// clusters.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Settings file (TOML). Defaults to `mapinfo.toml` when present.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Game whose built-in lump is parsed first.
    #[arg(long)]
    mission: Option<GameMission>,
    /// File holding the built-in lump for the selected mission.
    #[arg(long, value_name = "FILE")]
    base: Option<PathBuf>,
    /// Print the registries as JSON.
    #[arg(long)]
    json: bool,
    /// Add-on lumps. The file stem is the lump name, so only files named
    /// `ZMAPINFO.*` or `MAPINFO.*` are parsed.
    #[arg(value_name = "LUMP")]
    files: Vec<PathBuf>,
}

#[derive(Serialize)]
struct Output<'a> {
    levels: &'a [mapinfo_types::LevelInfo],
    clusters: &'a [mapinfo_types::ClusterInfo],
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).wrap_err("loading settings")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&settings.log_level))
        .init();

    let mission = cli.mission.unwrap_or(settings.mission);
    let base = match &cli.base {
        Some(path) => read_lump(path, mission.base_lump_name())?,
        None => Lump::new(mission.base_lump_name(), ""),
    };
    let lumps = cli
        .files
        .iter()
        .map(|path| read_lump(path, &lump_name(path)))
        .collect::<color_eyre::Result<Vec<_>>>()?;

    let strings: StringMap = settings.strings.into_iter().collect();
    let mut registry = Registry::new();
    registry.parse_all(&load_order(base, lumps), &strings)?;
    info!(
        "{} level(s), {} cluster(s)",
        registry.levels().len(),
        registry.clusters().len()
    );

    if cli.json {
        let output = Output {
            levels: registry.levels(),
            clusters: registry.clusters(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_registry(&registry, mission);
    }
    Ok(())
}

fn read_lump(path: &Path, name: &str) -> color_eyre::Result<Lump> {
    let data = fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    Ok(Lump::new(name, data))
}

fn lump_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_ascii_uppercase())
        .unwrap_or_default()
}

fn print_registry(registry: &Registry, mission: GameMission) {
    let start = calc_map_name(mission.uses_mapxx(), 1, 1);
    match registry.find_level_info(start.as_str()) {
        Ok(level) => println!("start: {start} \"{}\"", level.display_name()),
        Err(_) => println!("start: {start} (not defined)"),
    }

    for level in registry.levels() {
        println!(
            "{:<8} {:<32} level {:>2}  cluster {:>2}  next {:<8} par {}",
            level.map_name,
            level.display_name(),
            level.level_num,
            level.cluster,
            level.next_map,
            level.par_time,
        );
    }
    for cluster in registry.clusters() {
        println!(
            "cluster {:>2}{}",
            cluster.cluster,
            if cluster.is_hub() { " (hub)" } else { "" }
        );
    }
}
