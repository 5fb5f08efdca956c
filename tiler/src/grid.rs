use anyhow::{ensure, Result};

/// A `split` by `split` grid over an image. Every cell is `width / split` by
/// `height / split` pixels, except the last column and row which extend to
/// the edge of the image and so take up any remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    split: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub col: u32,
    pub row: u32,

    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Grid {
    pub fn new(width: u32, height: u32, split: u32) -> Result<Self> {
        ensure!(split > 0, "Grid split must be at least 1");
        ensure!(
            width >= split && height >= split,
            "A {width}x{height} image is too small to split into {split}x{split} cells"
        );

        Ok(Self {
            width,
            height,
            split,
        })
    }

    pub fn split(&self) -> u32 {
        self.split
    }

    pub fn cell(&self, col: u32, row: u32) -> Cell {
        let (x, width) = span(col, self.width, self.split);
        let (y, height) = span(row, self.height, self.split);

        Cell {
            col,
            row,
            x,
            y,
            width,
            height,
        }
    }

    /// Every cell, a column at a time from the left, top to bottom within
    /// each column.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.split).flat_map(move |col| (0..self.split).map(move |row| self.cell(col, row)))
    }
}

impl Cell {
    /// `cell_yxz_{row}_{col}_{layer}.tif`
    pub fn file_name(&self, layer: u32) -> String {
        format!("cell_yxz_{:03}_{:03}_{layer:05}.tif", self.row, self.col)
    }
}

/// Start and length of the `index`th of `split` spans over `size` pixels.
fn span(index: u32, size: u32, split: u32) -> (u32, u32) {
    let step = size / split;
    let start = step * index;
    let end = if index + 1 == split {
        size
    } else {
        start + step
    };

    (start, end - start)
}
