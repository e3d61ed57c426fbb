//! The end-to-end dump: scan a grid region, pack and patch the bytes,
//! write the binary, and disassemble it into a filtered listing.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::command::ObjdumpCommand;
use crate::error::{Error, Result};
use crate::event::ListingEvent;
use crate::grid::{CellSource, Region};
use crate::pack::{pack_bits, patch_bytes};
use crate::scan::scan_region;

/// Width in cells of the canonical dump region.
pub const DUMP_WIDTH: u32 = 110;

/// Height in cells of the canonical dump region, seven bands of eight rows.
pub const DUMP_HEIGHT: u32 = 7 * 8;

/// Listing lines containing this string are dropped, like
/// `objdump ... | grep -v hlt`. The patched filler bytes all decode to
/// `hlt`, so this strips them back out of the listing.
pub const FILTERED_MNEMONIC: &str = "hlt";

/// Where the binary goes unless the caller says otherwise.
pub const DEFAULT_BIN_PATH: &str = "/tmp/life.bin";

/// Where the filtered listing goes unless the caller says otherwise.
pub const DEFAULT_LISTING_PATH: &str = "/tmp/life.txt";

/// The canonical region: origin (0,0), [`DUMP_WIDTH`] × [`DUMP_HEIGHT`].
pub fn default_region() -> Region {
  Region::new(0, 0, DUMP_WIDTH, DUMP_HEIGHT)
}

/// What a completed dump produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpReport {
  /// The live-cell coordinate dump, `col,row` lines plus the trailing `r`
  /// line. The original script published this string to the host
  /// clipboard; it is returned here for the caller to publish.
  pub coordinate_dump: String,
  /// Number of live cells seen in the region.
  pub live_cells: usize,
  /// Number of bytes written to the binary file.
  pub bytes_written: usize,
  /// Number of lines written to the listing file, after filtering.
  pub listing_lines: usize,
}

/// Run the whole pipeline over `source`: scan `region`, pack the bitmap,
/// apply the patch, write the raw bytes to `bin_path`, then disassemble
/// with `objdump -M intel -b binary -m i386 -D` and write every listing
/// line not containing [`FILTERED_MNEMONIC`] to `listing_path`.
///
/// Fail-fast throughout: an unwritable path, a missing objdump, or a
/// nonzero objdump exit status is an error, and no cleanup of partial
/// outputs is attempted.
pub fn dump_grid<S, P, Q>(
  source: &S,
  region: Region,
  bin_path: P,
  listing_path: Q,
) -> Result<DumpReport>
where
  S: CellSource + ?Sized,
  P: AsRef<Path>,
  Q: AsRef<Path>,
{
  let scan = scan_region(source, region);
  let mut bytes = pack_bits(&scan.bits)?;
  patch_bytes(&mut bytes);
  fs::write(&bin_path, &bytes)?;

  let mut child = ObjdumpCommand::new()
    .raw_i386()
    .input(bin_path.as_ref())
    .spawn()?;

  let mut writer = BufWriter::new(File::create(&listing_path)?);
  let mut tool_errors = Vec::new();
  let listing_lines = copy_filtered(child.iter()?, &mut writer, &mut tool_errors)?;
  writer.flush()?;

  let exit_status = child.wait()?;
  if !exit_status.success() {
    let detail = match tool_errors.is_empty() {
      true => String::new(),
      false => format!(": {}", tool_errors.join("; ")),
    };
    return Err(Error::msg(format!(
      "objdump exited with {}{}",
      exit_status, detail
    )));
  }

  Ok(DumpReport {
    coordinate_dump: scan.coordinate_dump(),
    live_cells: scan.live_cells.len(),
    bytes_written: bytes.len(),
    listing_lines,
  })
}

/// Copy every listing line except those containing [`FILTERED_MNEMONIC`]
/// into `writer`, returning the number of lines written. Stderr lines are
/// collected into `tool_errors` rather than the listing.
fn copy_filtered<I, W>(events: I, writer: &mut W, tool_errors: &mut Vec<String>) -> Result<usize>
where
  I: Iterator<Item = ListingEvent>,
  W: Write,
{
  let mut lines = 0;
  for event in events {
    match event {
      ListingEvent::Error(e) => tool_errors.push(e),
      ListingEvent::ListingEOF => {}
      event => {
        if let Some(line) = event.raw_line() {
          if !line.contains(FILTERED_MNEMONIC) {
            writeln!(writer, "{}", line)?;
            lines += 1;
          }
        }
      }
    }
  }
  Ok(lines)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::listing_parser::ListingParser;
  use std::io::Cursor;

  const LISTING: &str = "\n/tmp/life.bin:     file format binary\n\n\nDisassembly of section .data:\n\n00000000 <.data>:\n   0:\t31 c0                \txor    eax,eax\n   2:\tf4                   \thlt    \n   3:\t90                   \tnop\n";

  fn events(listing: &str) -> Vec<ListingEvent> {
    let mut parser = ListingParser::new(Cursor::new(listing.to_string()));
    let mut events = Vec::new();
    loop {
      match parser.parse_next_event().unwrap() {
        ListingEvent::ListingEOF => break,
        event => events.push(event),
      }
    }
    events
  }

  #[test]
  fn filtered_copy_drops_hlt_lines_only() {
    let mut out = Vec::new();
    let mut tool_errors = Vec::new();
    let lines = copy_filtered(events(LISTING).into_iter(), &mut out, &mut tool_errors).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("hlt"));
    assert!(text.contains("xor    eax,eax"));
    assert!(text.contains("file format binary"));
    // One hlt line dropped out of ten stdout lines.
    assert_eq!(lines, 9);
    assert!(tool_errors.is_empty());
  }

  #[test]
  fn stderr_events_go_to_tool_errors_not_the_listing() {
    let mut all = events(LISTING);
    all.push(ListingEvent::Error("objdump: bad input".to_string()));

    let mut out = Vec::new();
    let mut tool_errors = Vec::new();
    copy_filtered(all.into_iter(), &mut out, &mut tool_errors).unwrap();

    assert_eq!(tool_errors, vec!["objdump: bad input".to_string()]);
    assert!(!String::from_utf8(out).unwrap().contains("bad input"));
  }

  #[test]
  fn default_region_covers_the_full_grid_dump() {
    let region = default_region();
    assert_eq!((region.x, region.y), (0, 0));
    assert_eq!(region.area(), 110 * 56);
    // 770 packed bytes.
    assert_eq!(region.area() / 8, 770);
  }
}
