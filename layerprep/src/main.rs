use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

use args::{Args, LayerArgs, Pipeline};
use common::config::{Config, SegmentConfig};

mod args;

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::INFO
    };
    let filter = filter::Targets::new()
        .with_default(LevelFilter::WARN)
        .with_target("layerprep", level)
        .with_target("common", level)
        .with_target("mesh_format", level)
        .with_target("slicer", level)
        .with_target("tiler", level);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    run(&args)
}

/// Runs the pipelines `args` selects. A missing config file is reported and
/// treated as nothing to do.
fn run(args: &Args) -> Result<()> {
    let Some(config) = Config::load(&args.config)? else {
        println!("{} not found", args.config.display());
        return Ok(());
    };

    // Resolve every key the selected pipelines need before touching the disk.
    let (segment, volume) = match &args.pipeline {
        Pipeline::Segment { layer } => (Some(segment_config(&config, layer)?), None),
        Pipeline::Volume => (None, Some(config.volume()?)),
        Pipeline::All { layer } => (
            Some(segment_config(&config, layer)?),
            Some(config.volume()?),
        ),
    };

    let now = Instant::now();

    if let Some(segment) = segment {
        let (output, publish) = args.segment_output();
        let manifest = slicer::segment::run(&segment, &output, &publish)?;
        info!(
            "Wrote {} segments for layer {}",
            manifest.segment.len(),
            segment.layer
        );
    }

    if let Some(volume) = volume {
        let (output, publish) = args.volume_output();
        let manifest = tiler::volume::run(&volume, &output, &publish)?;
        info!(
            "Wrote {} previews and tiled {} layers",
            manifest.volume.len(),
            volume.sublayers.len()
        );
    }

    info!("Done. Elapsed: {:.1}s", now.elapsed().as_secs_f32());
    Ok(())
}

fn segment_config(config: &Config, layer: &LayerArgs) -> Result<SegmentConfig> {
    let mut segment = config.segment()?;
    layer.apply(&mut segment);
    Ok(segment)
}
