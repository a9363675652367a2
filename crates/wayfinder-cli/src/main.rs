//! Wayfinder CLI - load a floor plan and print turn-by-turn directions
//!
//! Stands in for the voice front-end and motor controller of a deployed
//! robot: destination rooms come from the command line and instructions
//! are printed rather than driven.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use wayfinder_core::{MapModel, NavSession, RouteError};

#[derive(Parser, Debug)]
#[command(name = "wayfinder")]
#[command(about = "Indoor navigation: shortest-path directions over a floor plan")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "wayfinder.toml")]
    config: PathBuf,

    /// Path to the floor-plan XML file (overrides the config file)
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Room to start from (overrides the plan's StartLocation node)
    #[arg(short, long)]
    start_room: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Destination rooms, visited in order
    #[arg(required = true)]
    rooms: Vec<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = config::load_config(&args.config)?;
    let map_path = args.map.unwrap_or_else(|| PathBuf::from(&config.map.path));

    let map = MapModel::from_file(&map_path)
        .with_context(|| format!("failed to load floor plan {}", map_path.display()))?;
    info!(
        path = %map_path.display(),
        vertices = map.vertex_count(),
        edges = map.edge_count(),
        "Floor plan loaded"
    );

    let mut session = match args.start_room.or(config.navigation.start_room) {
        Some(room) => NavSession::start_at_room(&map, room)?,
        None => NavSession::new(&map)?,
    };

    for room in args.rooms {
        println!("Directions to room {}:", room);
        match session.directions(&map, room) {
            Ok(instructions) if instructions.is_empty() => {
                println!("  Already there.");
            }
            Ok(instructions) => {
                for (i, instruction) in instructions.iter().enumerate() {
                    println!("  {}. {}", i + 1, instruction);
                }
            }
            Err(err @ (RouteError::RoomNotFound(_) | RouteError::NoRoute { .. })) => {
                warn!(%err, "Destination not reachable");
                println!("  Destination not found: {}", err);
            }
            Err(err) => return Err(err.into()),
        }
        println!();
    }

    Ok(())
}
