//! Bounding boxes and layer clipping for mesh segments, along with the
//! pipeline that turns a list of segments into the viewer's segment manifest.

use nalgebra::Vector3;

pub mod bounds;
pub mod layer;
pub mod segment;

pub type Pos = Vector3<f64>;
