use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use riverworld_common::{GeoPoint, RenderPoint};
use riverworld_geo::{PathBounds, PathNormalizer, render_path};
use riverworld_stream::{PathCursor, StreamConfig, StreamingCache, flow_field};
use riverworld_terrain::{MemoryColliders, MemoryGeometry};
use riverworld_tiling::TileIndex;

#[derive(Parser)]
#[command(name = "riverworld-cli", about = "CLI tool for riverworld operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Parse river geodata and print path and surroundings statistics
    Import {
        /// River file: pre-extracted path JSON, or GeoJSON with --feature-id
        #[arg(short, long)]
        river: PathBuf,
        /// GeoJSON feature id to filter the river geometry by
        #[arg(short, long)]
        feature_id: Option<String>,
        /// Surroundings records file
        #[arg(short, long)]
        surroundings: Option<PathBuf>,
        /// Geographic scale divisor
        #[arg(long, default_value = "10")]
        scale: f64,
    },
    /// Build the tile index and drive an agent down the river
    Simulate {
        /// River file: pre-extracted path JSON, or GeoJSON with --feature-id
        #[arg(short, long)]
        river: PathBuf,
        /// GeoJSON feature id to filter the river geometry by
        #[arg(short, long)]
        feature_id: Option<String>,
        /// Surroundings records file
        #[arg(short, long)]
        surroundings: Option<PathBuf>,
        /// Geographic scale divisor
        #[arg(long, default_value = "10")]
        scale: f64,
        /// Tile side length in world units
        #[arg(long, default_value = "100")]
        tile_size: f64,
        /// Catchment radius around each path point
        #[arg(long, default_value = "150")]
        catchment: f64,
        /// Number of simulation ticks
        #[arg(short, long, default_value = "2000")]
        ticks: u64,
        /// River flow speed in units per tick
        #[arg(long, default_value = "1")]
        flow_speed: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("riverworld-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("geo: {}", riverworld_geo::crate_info());
            println!("tiling: {}", riverworld_tiling::crate_info());
            println!("terrain: {}", riverworld_terrain::crate_info());
            println!("stream: {}", riverworld_stream::crate_info());
        }
        Commands::Import {
            river,
            feature_id,
            surroundings,
            scale,
        } => {
            let samples = load_river(&river, feature_id.as_deref())?;
            let (path, normalizer) = normalized(&samples, scale)?;

            println!("River: {} samples, {} render points", samples.len(), path.len());
            if let Some(bounds) = PathBounds::of(&path) {
                println!(
                    "Bounds: {:.1} x {:.1} units, center ({:.1}, {:.1})",
                    bounds.width(),
                    bounds.height(),
                    bounds.center().x,
                    bounds.center().z
                );
            }

            if let Some(surroundings) = surroundings {
                let features = riverworld_geo::import::import_environment(&surroundings, &normalizer)?;
                let villages = features
                    .iter()
                    .filter(|f| f.kind == riverworld_geo::FeatureKind::Village)
                    .count();
                let allotments = features
                    .iter()
                    .filter(|f| f.kind == riverworld_geo::FeatureKind::Allotments)
                    .count();
                let forests = features
                    .iter()
                    .filter(|f| f.kind == riverworld_geo::FeatureKind::Forest)
                    .count();
                println!(
                    "Surroundings: {} features ({villages} villages, {allotments} allotments, {forests} forests)",
                    features.len()
                );
            }
        }
        Commands::Simulate {
            river,
            feature_id,
            surroundings,
            scale,
            tile_size,
            catchment,
            ticks,
            flow_speed,
        } => {
            let samples = load_river(&river, feature_id.as_deref())?;
            let (path, normalizer) = normalized(&samples, scale)?;
            let features = match surroundings {
                Some(file) => riverworld_geo::import::import_environment(&file, &normalizer)?,
                None => Vec::new(),
            };

            let index = TileIndex::build(tile_size, path, catchment);
            println!(
                "Index: {} tiles over {} path points",
                index.tile_count(),
                index.path().len()
            );

            let flow = flow_field(index.path(), flow_speed);
            let mut cursor = PathCursor::new();
            let mut agent = index.path()[0];

            let mut cache = StreamingCache::new(
                &index,
                features,
                StreamConfig::default(),
                MemoryGeometry::new(),
                MemoryColliders::new(),
            );

            let mut total_materialized = 0usize;
            let mut total_evicted = 0usize;
            let mut peak_resident = 0usize;

            for tick in 0..ticks {
                let segment = cursor.advance(agent, index.path());
                let v = flow[segment];
                agent = RenderPoint::new(agent.x + v.x, agent.z + v.y);

                let update = cache.advance(agent);
                total_materialized += update.materialized.len();
                total_evicted += update.evicted.len();
                peak_resident = peak_resident.max(cache.resident_count());

                if !update.materialized.is_empty() || !update.evicted.is_empty() {
                    println!(
                        "tick {tick}: agent ({:.1}, {:.1}), +{} -{} tiles, {} resident",
                        agent.x,
                        agent.z,
                        update.materialized.len(),
                        update.evicted.len(),
                        cache.resident_count()
                    );
                }
            }

            println!(
                "Simulated {ticks} ticks: {total_materialized} materialized, {total_evicted} evicted, peak {peak_resident} resident"
            );
            println!(
                "Geometry: {} created, {} disposed, {} live",
                cache.geometry().created(),
                cache.geometry().disposed(),
                cache.geometry().live_count()
            );
            println!(
                "Colliders: {} added, {} removed, {} live",
                cache.colliders().added(),
                cache.colliders().removed(),
                cache.colliders().live_count()
            );
        }
    }

    Ok(())
}

fn load_river(river: &std::path::Path, feature_id: Option<&str>) -> anyhow::Result<Vec<GeoPoint>> {
    let samples = match feature_id {
        Some(id) => riverworld_geo::import::import_river_geojson(river, id)?,
        None => riverworld_geo::import::import_extracted_path(river)?,
    };
    Ok(samples)
}

fn normalized(
    samples: &[GeoPoint],
    scale: f64,
) -> anyhow::Result<(Vec<RenderPoint>, PathNormalizer)> {
    render_path(samples, scale).ok_or_else(|| anyhow::anyhow!("river path is empty"))
}
