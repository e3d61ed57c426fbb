//! Dump a rectangular region of a Game of Life grid to raw bytes and
//! disassemble the result with a standalone `objdump` binary.
//!
//! A scan walks the region row by row, packing cell liveness into bytes
//! (eight cells per byte, first cell in the high bit) and collecting live
//! coordinates. A positional patch overwrites filler positions with `0xf4`,
//! the bytes go to disk, and objdump's listing comes back as an iterator of
//! parsed events with the `hlt` filler lines stripped.
//!
//! ## Example
//!
//! ```rust,no_run
//! use life2asm::dump::{default_region, dump_grid};
//! use life2asm::grid::SparseGrid;
//!
//! fn main() -> life2asm::error::Result<()> {
//!   let grid = SparseGrid::from_cell_list("5,1\n6,2\n4,3\n5,3\n6,3\nr\n")?;
//!   let report = dump_grid(&grid, default_region(), "/tmp/life.bin", "/tmp/life.txt")?;
//!   print!("{}", report.coordinate_dump); // <- ready to paste back into Golly
//!   Ok(())
//! }
//! ```
//!
//! The objdump surface can also be driven directly:
//!
//! ```rust,no_run
//! use life2asm::{command::ObjdumpCommand, event::ListingEvent};
//!
//! fn main() -> anyhow::Result<()> {
//!   ObjdumpCommand::new() // <- Builder API like `std::process::Command`
//!     .raw_i386()         // <- `-M intel -b binary -m i386 -D`
//!     .input("/tmp/life.bin")
//!     .spawn()?           // <- Uses an ordinary `std::process::Child`
//!     .iter()?            // <- Iterator over the parsed listing
//!     .for_each(|event: ListingEvent| {
//!       if let ListingEvent::Instruction(inst) = event {
//!         println!("{:4x}: {} {}", inst.address, inst.mnemonic, inst.operands);
//!       }
//!     });
//!   Ok(())
//! }
//! ```


pub mod child;
pub mod command;
pub mod dump;
pub mod error;
pub mod event;
pub mod grid;
pub mod iter;
pub mod listing_parser;
pub mod pack;
pub mod paths;
pub mod scan;
pub mod version;
