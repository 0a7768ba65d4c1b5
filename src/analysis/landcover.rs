use serde::Serialize;

use crate::error::{AnalysisError, AnalysisResult};

/// Classified landcover raster held as row-major `i16` class codes.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LandcoverGrid {
    width: usize,
    height: usize,
    cells: Vec<i16>,
}

/// How much of a change map actually changed class.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ChangeSummary {
    pub changed: usize,
    pub unchanged: usize,
    pub share_changed: f64,
}

impl LandcoverGrid {
    /// `cells.len()` must equal `width * height`.
    pub fn new(width: usize, height: usize, cells: Vec<i16>) -> Option<Self> {
        (cells.len() == width * height).then_some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[i16] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i16> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells.get(row * self.width + col).copied()
    }

    /// Nearest-neighbour downsample to `height / factor` x `width / factor`.
    /// Output cell (r, c) takes the source cell (r * factor, c * factor).
    pub fn downsample_nearest(&self, factor: usize) -> Self {
        let factor = factor.max(1);
        let out_height = self.height / factor;
        let out_width = self.width / factor;

        let mut cells = Vec::with_capacity(out_width * out_height);
        for row in 0..out_height {
            let src_row = row * factor;
            for col in 0..out_width {
                cells.push(self.cells[src_row * self.width + col * factor]);
            }
        }

        Self {
            width: out_width,
            height: out_height,
            cells,
        }
    }

    /// Pixel-wise `after - before`. Both grids must share a shape.
    pub fn change_map(before: &Self, after: &Self) -> AnalysisResult<Self> {
        if before.width != after.width || before.height != after.height {
            return Err(AnalysisError::GridShapeMismatch {
                before_width: before.width,
                before_height: before.height,
                after_width: after.width,
                after_height: after.height,
            });
        }

        let cells = before
            .cells
            .iter()
            .zip(&after.cells)
            .map(|(&b, &a)| a.wrapping_sub(b))
            .collect();

        Ok(Self {
            width: before.width,
            height: before.height,
            cells,
        })
    }

    /// Summary of a grid produced by [`LandcoverGrid::change_map`].
    pub fn change_summary(&self) -> ChangeSummary {
        let changed = self.cells.iter().filter(|&&delta| delta != 0).count();
        let total = self.cells.len();
        ChangeSummary {
            changed,
            unchanged: total - changed,
            share_changed: if total == 0 {
                0.0
            } else {
                changed as f64 / total as f64
            },
        }
    }
}
