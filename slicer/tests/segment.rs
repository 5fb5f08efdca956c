use std::{fs, path::Path};

use common::config::SegmentConfig;
use mesh_format::obj;
use serde_json::Value;
use slicer::segment::{self, SegmentInfo};

/// Writes a segment whose vertices sit at the corners of the given Z range,
/// along with a points file spread evenly through it.
fn write_segment(root: &Path, id: &str, z: (f64, f64)) {
    let dir = root.join(id);
    fs::create_dir_all(&dir).unwrap();

    let mesh = format!(
        "v 10 20 {0}\nv 30 40 {1}\nv 10 40 {0}\nv 30 20 {1}\nvn 0 0 1\nf 1//1 2//1 3//1\n",
        z.0, z.1
    );
    fs::write(dir.join(format!("{id}.obj")), mesh).unwrap();

    let mut points = String::new();
    let mut height = z.0;
    while height <= z.1 {
        points.push_str(&format!("v 15 25 {height}\n"));
        height += 1.0;
    }
    fs::write(dir.join(format!("{id}_points.obj")), points).unwrap();
}

fn config(root: &Path, segments: &[&str]) -> SegmentConfig {
    SegmentConfig {
        obj_input: root.to_path_buf(),
        segments: segments.iter().map(|x| x.to_string()).collect(),
        layer: 0,
        gap: 5,
    }
}

#[test]
fn only_nearby_segments_get_points() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let (output, publish) = (dir.path().join("output"), dir.path().join("public"));

    write_segment(&input, "low", (0.0, 10.0));
    write_segment(&input, "high", (20.0, 30.0));

    let manifest = segment::run(&config(&input, &["low", "high"]), &output, &publish).unwrap();
    let ids = manifest.segment.iter().map(|x| x.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, ["low", "high"]);
    assert_eq!(manifest.segment[1].clip.z, 20);
    assert_eq!(manifest.segment[1].clip.d, 10);

    let layer = output.join("00000");
    assert!(layer.join("low_00000_points.obj").exists());
    assert!(!layer.join("high_00000_points.obj").exists());

    // Points from z = 0 through z = 5 survive the clip.
    let points = obj::load(&layer.join("low_00000_points.obj")).unwrap();
    let zs = points.vertices.iter().map(|v| v.z).collect::<Vec<_>>();
    assert_eq!(zs, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    assert!(points.faces.is_empty());

    assert!(output.join(".gitkeep").exists());
    assert!(publish.join("meta.json").exists());
    assert!(publish.join("00000/low_00000_points.obj").exists());
}

#[test]
fn manifest_shape() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let (output, publish) = (dir.path().join("output"), dir.path().join("public"));

    let ids = ["a", "b", "c"];
    for (i, id) in ids.iter().enumerate() {
        write_segment(&input, id, (i as f64 * 100.0, i as f64 * 100.0 + 8.0));
    }
    segment::run(&config(&input, &ids), &output, &publish).unwrap();

    let raw = fs::read_to_string(output.join("meta.json")).unwrap();
    let meta: Value = serde_json::from_str(&raw).unwrap();
    let records = meta["segment"].as_array().unwrap();
    assert_eq!(records.len(), ids.len());

    for (record, id) in records.iter().zip(ids) {
        assert_eq!(record["id"], id);
        for key in ["x", "y", "z", "w", "h", "d"] {
            assert!(record["clip"][key].is_u64(), "clip.{key} of {id}");
        }
    }

    // The first record for a box from (10, 20, 0) to (30, 40, 8).
    let first: Value = serde_json::to_value(SegmentInfo {
        id: "a".into(),
        clip: common::clip::Clip {
            x: 10,
            y: 20,
            z: 0,
            w: 20,
            h: 20,
            d: 8,
        },
    })
    .unwrap();
    assert_eq!(records[0], first);
}

#[test]
fn rerun_discards_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let (output, publish) = (dir.path().join("output"), dir.path().join("public"));

    write_segment(&input, "low", (0.0, 10.0));
    fs::create_dir_all(output.join("00050")).unwrap();
    fs::write(output.join("00050/stale.obj"), "v 0 0 0").unwrap();
    fs::create_dir_all(&publish).unwrap();
    fs::write(publish.join("stale.json"), "{}").unwrap();

    segment::run(&config(&input, &["low"]), &output, &publish).unwrap();
    assert!(!output.join("00050").exists());
    assert!(!publish.join("stale.json").exists());
}

#[test]
fn missing_segment_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let (output, publish) = (dir.path().join("output"), dir.path().join("public"));

    write_segment(&input, "low", (0.0, 10.0));
    let result = segment::run(&config(&input, &["low", "missing"]), &output, &publish);

    assert!(result.is_err());
    assert!(!output.join("meta.json").exists());
    assert!(!publish.exists());
}

#[test]
fn empty_segment_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    fs::create_dir_all(input.join("empty")).unwrap();
    fs::write(input.join("empty/empty.obj"), "# nothing\n").unwrap();

    let output = dir.path().join("output");
    let err = segment::run(&config(&input, &["empty"]), &output, &dir.path().join("public"))
        .unwrap_err();
    assert!(err.to_string().contains("no vertices"));
}
