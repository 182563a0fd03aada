//! Greedy rectangle covering of boolean grids, and its inverse.

use log::trace;

use crate::core::{BoolGrid, GridCoord, Rect};

/// Cover the `true` cells of `grid` with axis-aligned rectangles (pixels).
///
/// Takes the first remaining cell in row-major order, grows the largest
/// rectangle anchored there (every width up to the row run, each extended
/// down as far as the full width stays set), clears it and repeats. Each
/// round clears at least one cell, so the loop terminates.
pub fn grid_to_rectangles(grid: &BoolGrid, cell_size: u32) -> Vec<Rect> {
    let (w, h) = (grid.width(), grid.height());
    let mut on: Vec<bool> = (0..w * h).map(|i| grid.at(i % w, i / w)).collect();
    let mut rects = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = on[cursor..].iter().position(|&c| c) {
        let idx = cursor + offset;
        let (x, y) = (idx % w, idx / w);

        let mut max_w = 0;
        while x + max_w < w && on[y * w + x + max_w] {
            max_w += 1;
        }

        let (mut best_w, mut best_h) = (1, 1);
        for cand_w in 1..=max_w {
            let mut cand_h = 1;
            while y + cand_h < h && (x..x + cand_w).all(|cx| on[(y + cand_h) * w + cx]) {
                cand_h += 1;
            }
            if cand_w * cand_h > best_w * best_h {
                best_w = cand_w;
                best_h = cand_h;
            }
        }

        for ry in y..y + best_h {
            for rx in x..x + best_w {
                on[ry * w + rx] = false;
            }
        }
        rects.push(Rect::from_cells(x, y, best_w, best_h, cell_size));
        cursor = idx;
    }

    trace!(
        "[RectPack] {} cells -> {} rectangles",
        grid.count(),
        rects.len()
    );
    rects
}

/// Mark every cell overlapped by any rectangle.
pub fn rectangles_to_grid(rects: &[Rect], width: usize, height: usize, cell_size: u32) -> BoolGrid {
    let mut grid = BoolGrid::new(width, height, false);
    for rect in rects {
        let Some((min, max)) = rect.cell_span(cell_size) else {
            continue;
        };
        for y in min.y.max(0)..=max.y.min(height as i32 - 1) {
            for x in min.x.max(0)..=max.x.min(width as i32 - 1) {
                grid.set(GridCoord::new(x, y), true);
            }
        }
    }
    grid
}
