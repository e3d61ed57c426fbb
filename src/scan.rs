//! Scan a region of a cell source into a bitmap and a coordinate dump.

use crate::grid::{Cell, CellSource, Region};

/// The result of scanning a [`Region`] over a [`CellSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionScan {
  /// One `'1'` or `'0'` per cell, in the region's row-major order.
  /// Length is always `region.area()`.
  pub bits: String,
  /// Coordinates of the live cells, in scan order.
  pub live_cells: Vec<Cell>,
}

impl RegionScan {
  /// Render the live cells as a cell-list dump: one `col,row` line per
  /// cell, terminated by a bare `r` line. This is the string Golly's paste
  /// mode accepts on the clipboard.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use life2asm::scan::RegionScan;
  ///
  /// let scan = RegionScan {
  ///   bits: "0100".to_string(),
  ///   live_cells: vec![(1, 0)],
  /// };
  /// assert_eq!(scan.coordinate_dump(), "1,0\nr\n");
  /// ```
  pub fn coordinate_dump(&self) -> String {
    let mut dump = String::new();
    for (col, row) in &self.live_cells {
      dump.push_str(&format!("{},{}\n", col, row));
    }
    dump.push_str("r\n");
    dump
  }
}

/// Query every cell of `region` against `source`, row by row.
pub fn scan_region<S: CellSource + ?Sized>(source: &S, region: Region) -> RegionScan {
  let mut bits = String::with_capacity(region.area());
  let mut live_cells = Vec::new();

  for (col, row) in region.cells() {
    if source.is_alive(col, row) {
      bits.push('1');
      live_cells.push((col, row));
    } else {
      bits.push('0');
    }
  }

  RegionScan { bits, live_cells }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grid::SparseGrid;

  #[test]
  fn all_dead_region_scans_to_zeros() {
    let grid = SparseGrid::new();
    let scan = scan_region(&grid, Region::new(0, 0, 110, 56));

    assert_eq!(scan.bits.len(), 110 * 56);
    assert!(scan.bits.bytes().all(|b| b == b'0'));
    assert!(scan.live_cells.is_empty());
    assert_eq!(scan.coordinate_dump(), "r\n");
  }

  #[test]
  fn single_live_cell_dumps_its_coordinates() {
    let grid: SparseGrid = [(7, 3)].into_iter().collect();
    let scan = scan_region(&grid, Region::new(0, 0, 10, 5));

    assert_eq!(scan.live_cells, vec![(7, 3)]);
    assert_eq!(scan.coordinate_dump(), "7,3\nr\n");
    assert_eq!(scan.bits.match_indices('1').count(), 1);
    // Row-major: row 3 of width 10, column 7.
    assert_eq!(scan.bits.find('1'), Some(3 * 10 + 7));
  }

  #[test]
  fn region_origin_offsets_the_scan() {
    let grid: SparseGrid = [(100, 200)].into_iter().collect();
    let scan = scan_region(&grid, Region::new(99, 199, 4, 4));

    assert_eq!(scan.live_cells, vec![(100, 200)]);
    assert_eq!(scan.bits.find('1'), Some(4 + 1));
  }
}
