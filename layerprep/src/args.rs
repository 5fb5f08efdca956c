use std::path::PathBuf;

use clap::{Parser, Subcommand};

use common::config::SegmentConfig;

#[derive(Debug, Parser)]
/// Prepares mesh segments and volume layers for the web viewer.
pub struct Args {
    #[arg(long, default_value = "config.json")]
    /// Path to the config file with the input locations and volume size.
    pub config: PathBuf,

    #[arg(long, default_value = "output")]
    /// Directory the pipelines write to. Each pipeline clears its own
    /// subfolder (`segment/` or `volume/`) before running.
    pub output: PathBuf,

    #[arg(long, default_value = "client/public")]
    /// Directory the viewer is served from. Pipeline output is mirrored into
    /// the matching subfolder, replacing what was there.
    pub publish: PathBuf,

    #[arg(short, long)]
    /// Log everything, not just progress.
    pub verbose: bool,

    #[command(subcommand)]
    pub pipeline: Pipeline,
}

#[derive(Debug, Subcommand)]
pub enum Pipeline {
    /// Write the segment manifest and clip segment point clouds to a layer.
    Segment {
        #[command(flatten)]
        layer: LayerArgs,
    },
    /// Copy layer previews and cut full resolution layers into tiles.
    Volume,
    /// Run the segment pipeline, then the volume pipeline.
    All {
        #[command(flatten)]
        layer: LayerArgs,
    },
}

#[derive(clap::Args, Debug)]
pub struct LayerArgs {
    #[arg(long)]
    /// Layer to clip point clouds around. Overrides `LAYER` from the config.
    pub layer: Option<u32>,

    #[arg(long)]
    /// Half height of the clip window in layers. Overrides `GAP` from the
    /// config.
    pub gap: Option<u32>,
}

impl Args {
    pub fn segment_output(&self) -> (PathBuf, PathBuf) {
        (self.output.join("segment"), self.publish.join("segment"))
    }

    pub fn volume_output(&self) -> (PathBuf, PathBuf) {
        (self.output.join("volume"), self.publish.join("volume"))
    }
}

impl LayerArgs {
    pub fn apply(&self, config: &mut SegmentConfig) {
        if let Some(layer) = self.layer {
            config.layer = layer;
        }

        if let Some(gap) = self.gap {
            config.gap = gap;
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["layerprep", "volume"]);
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert_eq!(args.segment_output().0, PathBuf::from("output/segment"));
        assert_eq!(args.volume_output().1, PathBuf::from("client/public/volume"));
        assert!(matches!(args.pipeline, Pipeline::Volume));
    }

    #[test]
    fn layer_overrides() {
        let args = Args::parse_from(["layerprep", "segment", "--layer", "50", "--gap", "2"]);
        let Pipeline::Segment { layer } = args.pipeline else {
            panic!("expected segment pipeline");
        };

        let mut config = SegmentConfig {
            obj_input: PathBuf::from("in"),
            segments: Vec::new(),
            layer: 0,
            gap: 5,
        };
        layer.apply(&mut config);
        assert_eq!((config.layer, config.gap), (50, 2));
    }
}
