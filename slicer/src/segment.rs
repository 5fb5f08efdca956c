use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use common::{
    clip::Clip,
    config::SegmentConfig,
    manifest::write_manifest,
    output::{layer_folder, mirror_dir, reset_dir, touch_gitkeep},
};
use mesh_format::obj;

use crate::{bounds::BoundedMesh, layer::clip_to_layer};

/// The `meta.json` written at the root of the segment output.
#[derive(Serialize, Debug, Default)]
pub struct SegmentManifest {
    pub segment: Vec<SegmentInfo>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SegmentInfo {
    pub id: String,
    pub clip: Clip,
}

/// `{root}/{id}/{id}.obj`, the full segment mesh.
pub fn mesh_path(root: &Path, id: &str) -> PathBuf {
    root.join(id).join(format!("{id}.obj"))
}

/// `{root}/{id}/{id}_points.obj`, the point cloud of the segment.
pub fn points_path(root: &Path, id: &str) -> PathBuf {
    root.join(id).join(format!("{id}_points.obj"))
}

/// Rebuilds the segment output under `output`, then replaces `publish` with a
/// copy of it.
///
/// Every configured segment gets a record in the manifest. Segments whose Z
/// range comes within `gap` of the target layer additionally have their point
/// cloud clipped to that window and written to the layer's folder. Any
/// unreadable segment aborts the whole run.
pub fn run(config: &SegmentConfig, output: &Path, publish: &Path) -> Result<SegmentManifest> {
    let folder = layer_folder(config.layer);
    let layer_dir = output.join(&folder);

    reset_dir(output)?;
    fs::create_dir_all(&layer_dir)
        .with_context(|| format!("Failed to create `{}`", layer_dir.display()))?;

    let mut manifest = SegmentManifest::default();
    for id in &config.segments {
        let mesh = obj::load(&mesh_path(&config.obj_input, id))?;
        let segment = BoundedMesh::new(mesh)
            .with_context(|| format!("Segment `{id}` has no vertices"))?;

        let clip = segment.bounds.clip();
        info!("Segment `{id}`: {clip:?}");
        manifest.segment.push(SegmentInfo {
            id: id.to_owned(),
            clip,
        });

        if !segment.bounds.near_layer(config.layer, config.gap) {
            debug!("Segment `{id}` is not near layer {folder}, skipping points");
            continue;
        }

        let points = obj::load(&points_path(&config.obj_input, id))?;
        let clipped = clip_to_layer(&points, config.layer as f64, config.gap as f64);
        debug!(
            "Clipped `{id}` points to layer {folder}: {} of {} kept",
            clipped.vertex_count(),
            points.vertex_count()
        );

        let path = layer_dir.join(format!("{id}_{folder}_points.obj"));
        obj::save(&path, &clipped)?;
    }

    write_manifest(output, &manifest)?;
    touch_gitkeep(output)?;
    mirror_dir(output, publish)?;

    Ok(manifest)
}
