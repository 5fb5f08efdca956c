use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use tracing::info;

pub const DEFAULT_SEGMENTS: [&str; 2] = ["20230505164332", "20230627122904"];
pub const DEFAULT_LAYER: u32 = 0;
pub const DEFAULT_GAP: u32 = 5;
pub const DEFAULT_SPLIT: u32 = 10;
pub const DEFAULT_INTERVAL: u32 = 50;

/// The contents of `config.json`. Every key is optional at this level, each
/// pipeline pulls out the keys it needs with [`Config::segment`] or
/// [`Config::volume`] and fails there if one is missing.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    pub obj_input: Option<PathBuf>,
    pub tif_input: Option<PathBuf>,
    pub tif_small_input: Option<PathBuf>,
    pub max_layer: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,

    // Segment settings
    pub segment_list: Option<Vec<String>>,
    pub layer: Option<u32>,
    pub gap: Option<u32>,

    // Volume settings
    pub split: Option<u32>,
    pub interval: Option<u32>,
    pub layer_list: Option<Vec<u32>>,
    pub sublayer_list: Option<Vec<u32>>,
}

/// Everything the segment pipeline reads.
#[derive(Clone, Debug)]
pub struct SegmentConfig {
    pub obj_input: PathBuf,
    pub segments: Vec<String>,
    /// Target layer the point clouds are clipped around.
    pub layer: u32,
    /// Half width of the Z window around `layer`.
    pub gap: u32,
}

/// Everything the volume pipeline reads.
#[derive(Clone, Debug)]
pub struct VolumeConfig {
    pub tif_input: PathBuf,
    pub tif_small_input: PathBuf,
    pub width: u32,
    pub height: u32,
    pub split: u32,
    /// Layers that get a downsampled preview.
    pub layers: Vec<u32>,
    /// Layers that get cut into tiles.
    pub sublayers: Vec<u32>,
}

impl Config {
    /// Loads the config file at `path`. Returns `None` if there is no file
    /// there so the caller can bail out before touching anything.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read `{}`", path.display()))?;
        let config = Self::from_json(&raw)
            .with_context(|| format!("Failed to parse `{}`", path.display()))?;
        info!("Loaded config from `{}`", path.display());
        Ok(Some(config))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn segment(&self) -> Result<SegmentConfig> {
        let segments = match &self.segment_list {
            Some(list) => list.clone(),
            None => DEFAULT_SEGMENTS.iter().map(|x| x.to_string()).collect(),
        };

        Ok(SegmentConfig {
            obj_input: required(&self.obj_input, "OBJ_INPUT")?,
            segments,
            layer: self.layer.unwrap_or(DEFAULT_LAYER),
            gap: self.gap.unwrap_or(DEFAULT_GAP),
        })
    }

    pub fn volume(&self) -> Result<VolumeConfig> {
        let tif_input = required(&self.tif_input, "TIF_INPUT")?;
        let tif_small_input = required(&self.tif_small_input, "TIF_SMALL_INPUT")?;
        let max_layer = required(&self.max_layer, "MAX_LAYER")?;
        let width = required(&self.width, "WIDTH")?;
        let height = required(&self.height, "HEIGHT")?;

        let split = self.split.unwrap_or(DEFAULT_SPLIT);
        ensure!(split > 0, "SPLIT must be at least 1");
        let interval = self.interval.unwrap_or(DEFAULT_INTERVAL);
        ensure!(interval > 0, "INTERVAL must be at least 1");

        let layers = match &self.layer_list {
            Some(list) => list.clone(),
            None => layer_range(max_layer, interval),
        };
        let sublayers = match &self.sublayer_list {
            Some(list) => list.clone(),
            None => layer_range(max_layer, interval),
        };

        Ok(VolumeConfig {
            tif_input,
            tif_small_input,
            width,
            height,
            split,
            layers,
            sublayers,
        })
    }
}

/// Every `interval`th layer from zero up to and including `max_layer`.
pub fn layer_range(max_layer: u32, interval: u32) -> Vec<u32> {
    (0..=max_layer / interval).map(|i| i * interval).collect()
}

fn required<T: Clone>(value: &Option<T>, key: &str) -> Result<T> {
    value
        .clone()
        .with_context(|| format!("Missing configuration key `{key}`"))
}
