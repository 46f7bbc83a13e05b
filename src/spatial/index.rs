//! Linear indexing over a bounded grid

use crate::core::types::TilePos;

/// Bidirectional mapping between (row, col) and a linear buffer index
///
/// Sizes and addresses the visited/flood buffers used by the spatial
/// searches. `index` assumes the coordinate is in range; callers
/// wall-check (which covers bounds) before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridIndex {
    rows: i16,
    cols: i16,
}

impl GridIndex {
    pub fn new(rows: i16, cols: i16) -> Self {
        Self { rows, cols }
    }

    pub fn rows(&self) -> i16 {
        self.rows
    }

    pub fn cols(&self) -> i16 {
        self.cols
    }

    /// Number of tiles, for sizing per-tile buffers
    pub fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    /// Row-major linear index; caller guarantees `contains(pos)`
    #[inline]
    pub fn index(&self, pos: TilePos) -> usize {
        pos.row as usize * self.cols as usize + pos.col as usize
    }

    /// Inverse of `index`
    #[inline]
    pub fn coord(&self, index: usize) -> TilePos {
        TilePos::new(
            (index / self.cols as usize) as i16,
            (index % self.cols as usize) as i16,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        let index = GridIndex::new(7, 5);
        for row in 0..7 {
            for col in 0..5 {
                let pos = TilePos::new(row, col);
                assert_eq!(index.coord(index.index(pos)), pos);
            }
        }
    }

    #[test]
    fn test_contains_rejects_out_of_range() {
        let index = GridIndex::new(3, 4);
        assert!(index.contains(TilePos::new(0, 0)));
        assert!(index.contains(TilePos::new(2, 3)));
        assert!(!index.contains(TilePos::new(-1, 0)));
        assert!(!index.contains(TilePos::new(3, 0)));
        assert!(!index.contains(TilePos::new(0, 4)));
    }

    #[test]
    fn test_len_covers_all_tiles() {
        let index = GridIndex::new(3, 4);
        assert_eq!(index.len(), 12);
        assert!(!index.is_empty());
        assert!(GridIndex::new(0, 4).is_empty());
    }
}
