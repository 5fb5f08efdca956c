use serde::{Deserialize, Serialize};

/// An integer axis aligned box, given as an origin and its extents, that the
/// viewer uses to place a segment or volume tile.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Clip {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub w: u32,
    pub h: u32,
    pub d: u32,
}

impl Clip {
    /// A single layer thick clip covering `width` by `height` pixels.
    pub fn layer(x: u32, y: u32, layer: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            z: layer,
            w: width,
            h: height,
            d: 1,
        }
    }

    /// Converts a float min / max pair into a clip. Components below zero are
    /// floored at zero on both corners before the values are truncated.
    pub fn from_bounds(min: [f64; 3], max: [f64; 3]) -> Self {
        let min = min.map(|x| x.max(0.0));
        let max = max.map(|x| x.max(0.0));

        Self {
            x: min[0] as u32,
            y: min[1] as u32,
            z: min[2] as u32,
            w: (max[0] - min[0]) as u32,
            h: (max[1] - min[1]) as u32,
            d: (max[2] - min[2]) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Clip;

    #[test]
    fn negative_origin_is_floored() {
        let clip = Clip::from_bounds([-3.5, 2.9, -0.1], [10.2, 7.5, 4.0]);
        assert_eq!(
            clip,
            Clip {
                x: 0,
                y: 2,
                z: 0,
                w: 10,
                h: 4,
                d: 4
            }
        );
    }

    #[test]
    fn fully_negative_axis_collapses() {
        let clip = Clip::from_bounds([-8.0, 0.0, 0.0], [-2.0, 1.0, 1.0]);
        assert_eq!((clip.x, clip.w), (0, 0));
    }

    #[test]
    fn serializes_flat() {
        let json = serde_json::to_string(&Clip::layer(0, 0, 50, 810, 789)).unwrap();
        assert_eq!(json, r#"{"x":0,"y":0,"z":50,"w":810,"h":789,"d":1}"#);
    }
}
