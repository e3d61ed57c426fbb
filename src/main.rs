use std::io::Read;

use life2asm::dump::{default_region, dump_grid, DEFAULT_BIN_PATH, DEFAULT_LISTING_PATH};
use life2asm::error::Result;
use life2asm::grid::SparseGrid;

/// Reads a cell list on stdin (one `col,row` pair per line, e.g. a Golly
/// clipboard paste), dumps the canonical region, and prints the coordinate
/// dump back to stdout.
fn main() -> Result<()> {
  let mut cell_list = String::new();
  std::io::stdin().read_to_string(&mut cell_list)?;
  let grid = SparseGrid::from_cell_list(&cell_list)?;

  let report = dump_grid(&grid, default_region(), DEFAULT_BIN_PATH, DEFAULT_LISTING_PATH)?;
  print!("{}", report.coordinate_dump);
  eprintln!(
    "{} live cells -> {} bytes at {} -> {} listing lines at {}",
    report.live_cells,
    report.bytes_written,
    DEFAULT_BIN_PATH,
    report.listing_lines,
    DEFAULT_LISTING_PATH
  );
  Ok(())
}
