//! Dense boolean grid used for walkable bitmaps and obstacle masks.

use serde::{Deserialize, Serialize};

use super::point::GridCoord;

/// Row-major boolean grid.
///
/// Out-of-bounds reads return `false`, so neighbor scans at the border
/// never need their own bounds checks.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoolGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl BoolGrid {
    /// Create a grid with every cell set to `value`
    pub fn new(width: usize, height: usize, value: bool) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    /// Build from rows of booleans. Rows shorter than the first are padded with `false`.
    pub fn from_rows(rows: &[Vec<bool>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut grid = Self::new(width, height, false);
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().take(width).enumerate() {
                grid.cells[y * width + x] = v;
            }
        }
        grid
    }

    /// Parse an ASCII picture: `.` is `true` (on), anything else `false`.
    ///
    /// Handy for tests and debugging; blank lines are skipped.
    pub fn from_ascii(picture: &str) -> Self {
        let rows: Vec<Vec<bool>> = picture
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().map(|c| c == '.').collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Is the coordinate inside the grid?
    #[inline]
    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Cell value, `false` outside the grid
    #[inline]
    pub fn get(&self, coord: GridCoord) -> bool {
        if !self.in_bounds(coord) {
            return false;
        }
        self.cells[coord.y as usize * self.width + coord.x as usize]
    }

    /// Cell value by unsigned indices, `false` outside the grid
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Set a cell; out-of-bounds writes are ignored
    #[inline]
    pub fn set(&mut self, coord: GridCoord, value: bool) {
        if self.in_bounds(coord) {
            self.cells[coord.y as usize * self.width + coord.x as usize] = value;
        }
    }

    /// Number of `true` cells
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Copy with every cell flipped
    pub fn inverted(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|c| !c).collect(),
        }
    }

    /// ASCII rendering (`.` on, `#` off) for debugging
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.at(x, y) { '.' } else { '#' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_roundtrip() {
        let grid = BoolGrid::from_ascii(
            "
            ..#
            #..
            ",
        );
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.at(0, 0));
        assert!(!grid.at(2, 0));
        assert_eq!(grid.to_ascii(), "..#\n#..\n");
    }

    #[test]
    fn test_out_of_bounds_is_false() {
        let grid = BoolGrid::new(2, 2, true);
        assert!(!grid.get(GridCoord::new(-1, 0)));
        assert!(!grid.get(GridCoord::new(2, 1)));
        assert!(grid.get(GridCoord::new(1, 1)));
    }

    #[test]
    fn test_count_and_invert() {
        let mut grid = BoolGrid::new(3, 3, false);
        grid.set(GridCoord::new(1, 1), true);
        grid.set(GridCoord::new(5, 5), true);
        assert_eq!(grid.count(), 1);
        assert_eq!(grid.inverted().count(), 8);
    }
}
