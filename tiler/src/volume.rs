use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use common::{
    clip::Clip,
    config::VolumeConfig,
    manifest::write_manifest,
    output::{layer_folder, mirror_dir, reset_dir, touch_gitkeep},
};

use crate::grid::Grid;

/// The `meta.json` at the root of the volume output, one preview per layer.
#[derive(Serialize, Debug, Default)]
pub struct VolumeManifest {
    pub volume: Vec<VolumeInfo>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VolumeInfo {
    pub id: String,
    pub clip: Clip,
}

/// The `meta.json` inside each tiled layer's folder.
#[derive(Serialize, Debug)]
pub struct LayerManifest {
    pub split: u32,
    pub layer: String,
    pub volume: Vec<CellInfo>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CellInfo {
    pub idx: u32,
    pub idy: u32,
    pub name: String,
    pub clip: Clip,
}

/// `{root}/{layer:05}.tif`
pub fn image_path(root: &Path, layer: u32) -> PathBuf {
    root.join(format!("{}.tif", layer_folder(layer)))
}

/// Rebuilds the volume output under `output`, then replaces `publish` with a
/// copy of it. A missing or unreadable layer image aborts the run.
pub fn run(config: &VolumeConfig, output: &Path, publish: &Path) -> Result<VolumeManifest> {
    reset_dir(output)?;

    let manifest = write_previews(config, output)?;

    let total = config.sublayers.len();
    for (i, &layer) in config.sublayers.iter().enumerate() {
        info!("processing {} ... {}/{}", layer_folder(layer), i + 1, total);
        tile_layer(config, layer, output)?;
    }

    touch_gitkeep(output)?;
    mirror_dir(output, publish)?;

    Ok(manifest)
}

/// Copies the downsampled image of every preview layer into `output` as is
/// and writes the top level manifest describing them.
pub fn write_previews(config: &VolumeConfig, output: &Path) -> Result<VolumeManifest> {
    let mut manifest = VolumeManifest::default();

    for &layer in &config.layers {
        let source = image_path(&config.tif_small_input, layer);
        fs::copy(&source, image_path(output, layer))
            .with_context(|| format!("Failed to copy preview `{}`", source.display()))?;

        manifest.volume.push(VolumeInfo {
            id: layer_folder(layer),
            clip: Clip::layer(0, 0, layer, config.width, config.height),
        });
    }

    write_manifest(output, &manifest)?;
    Ok(manifest)
}

/// Cuts the full resolution image of `layer` into a grid of tiles, saved in
/// the layer's own folder along with a manifest listing every cell.
pub fn tile_layer(config: &VolumeConfig, layer: u32, output: &Path) -> Result<LayerManifest> {
    let dir = output.join(layer_folder(layer));
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create `{}`", dir.display()))?;

    let source = image_path(&config.tif_input, layer);
    let image = image::open(&source)
        .with_context(|| format!("Failed to open `{}`", source.display()))?;
    let grid = Grid::new(image.width(), image.height(), config.split)
        .with_context(|| format!("Can't tile `{}`", source.display()))?;
    debug!(
        "Tiling {}x{} layer {} into {} cells",
        image.width(),
        image.height(),
        layer_folder(layer),
        config.split * config.split
    );

    let mut manifest = LayerManifest {
        split: grid.split(),
        layer: layer_folder(layer),
        volume: Vec::new(),
    };

    for cell in grid.cells() {
        let name = cell.file_name(layer);
        let path = dir.join(&name);
        image
            .crop_imm(cell.x, cell.y, cell.width, cell.height)
            .save(&path)
            .with_context(|| format!("Failed to save `{}`", path.display()))?;

        manifest.volume.push(CellInfo {
            idx: cell.col,
            idy: cell.row,
            name,
            clip: Clip::layer(cell.x, cell.y, layer, cell.width, cell.height),
        });
    }

    write_manifest(&dir, &manifest)?;
    Ok(manifest)
}
