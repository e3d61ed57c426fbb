//! Internal methods for parsing objdump's listing output.

use std::io::{BufRead, BufReader, Read};

use crate::event::{Instruction, ListingEvent, ListingFormat, ListingLabel, ListingSection};

pub struct ListingParser<R: Read> {
  reader: BufReader<R>,
}

impl<R: Read> ListingParser<R> {
  /// Consume one line from the inner reader and classify it, returning the
  /// corresponding `ListingEvent`.
  ///
  /// objdump's stdout is strictly line-oriented: a file-format header, then
  /// per-section headers and symbol labels interleaved with instruction
  /// lines, separated by blank lines. Anything unrecognized comes back as
  /// [`ListingEvent::Log`] so the full listing can still be reconstructed
  /// from the event stream.
  pub fn parse_next_event(&mut self) -> anyhow::Result<ListingEvent> {
    let mut buf = String::new();
    let bytes_read = self.reader.read_line(&mut buf)?;
    if bytes_read == 0 {
      return Ok(ListingEvent::ListingEOF);
    }
    let line = buf.trim_end_matches(['\r', '\n']);

    if let Some(format) = try_parse_format(line) {
      Ok(ListingEvent::ParsedFormat(format))
    } else if let Some(section) = try_parse_section(line) {
      Ok(ListingEvent::ParsedSection(section))
    } else if let Some(label) = try_parse_label(line) {
      Ok(ListingEvent::ParsedLabel(label))
    } else if let Some(instruction) = try_parse_instruction(line) {
      Ok(ListingEvent::Instruction(instruction))
    } else {
      Ok(ListingEvent::Log(line.to_string()))
    }
  }

  pub fn new(inner: R) -> Self {
    Self {
      reader: BufReader::new(inner),
    }
  }
}

/// Parses the `file format` header line at the top of a listing.
///
/// ```rust
/// use life2asm::listing_parser::try_parse_format;
///
/// let line = "/tmp/life.bin:     file format binary";
/// let format = try_parse_format(line).unwrap();
/// assert_eq!(format.file, "/tmp/life.bin");
/// assert_eq!(format.format, "binary");
/// ```
pub fn try_parse_format(line: &str) -> Option<ListingFormat> {
  let (file, format) = line.split_once("file format")?;
  let file = file.trim().strip_suffix(':')?.to_string();
  let format = format.trim();
  if file.is_empty() || format.is_empty() || format.contains(' ') {
    return None;
  }
  Some(ListingFormat {
    file,
    format: format.to_string(),
    raw_line: line.to_string(),
  })
}

/// Parses a section header line.
///
/// ```rust
/// use life2asm::listing_parser::try_parse_section;
///
/// let line = "Disassembly of section .data:";
/// let section = try_parse_section(line).unwrap();
/// assert_eq!(section.name, ".data");
/// ```
pub fn try_parse_section(line: &str) -> Option<ListingSection> {
  let name = line
    .trim()
    .strip_prefix("Disassembly of section ")?
    .strip_suffix(':')?;
  Some(ListingSection {
    name: name.to_string(),
    raw_line: line.to_string(),
  })
}

/// Parses a symbol label line.
///
/// ```rust
/// use life2asm::listing_parser::try_parse_label;
///
/// let line = "00000000 <.data>:";
/// let label = try_parse_label(line).unwrap();
/// assert_eq!(label.address, 0);
/// assert_eq!(label.label, ".data");
/// ```
pub fn try_parse_label(line: &str) -> Option<ListingLabel> {
  let (address, label) = line.trim().split_once(' ')?;
  let address = u64::from_str_radix(address, 16).ok()?;
  let label = label.trim().strip_prefix('<')?.strip_suffix(">:")?;
  Some(ListingLabel {
    address,
    label: label.to_string(),
    raw_line: line.to_string(),
  })
}

/// Parses one disassembled instruction line.
///
/// The columns are tab-separated: the offset, the raw instruction bytes
/// (absent under `--no-show-raw-insn`), and the decoded text.
///
/// ```rust
/// use life2asm::listing_parser::try_parse_instruction;
///
/// let line = "   0:\t31 c0                \txor    eax,eax";
/// let inst = try_parse_instruction(line).unwrap();
/// assert_eq!(inst.address, 0);
/// assert_eq!(inst.bytes, vec![0x31, 0xc0]);
/// assert_eq!(inst.mnemonic, "xor");
/// assert_eq!(inst.operands, "eax,eax");
/// ```
///
/// ### No operands
///
/// ```rust
/// use life2asm::listing_parser::try_parse_instruction;
///
/// let line = "  6d:\tf4                   \thlt    ";
/// let inst = try_parse_instruction(line).unwrap();
/// assert_eq!(inst.address, 0x6d);
/// assert_eq!(inst.bytes, vec![0xf4]);
/// assert!(inst.is_mnemonic("hlt"));
/// assert_eq!(inst.operands, "");
/// ```
///
/// ### Undecodable bytes
///
/// ```rust
/// use life2asm::listing_parser::try_parse_instruction;
///
/// let line = "  11:\tff                   \t(bad)  ";
/// let inst = try_parse_instruction(line).unwrap();
/// assert_eq!(inst.mnemonic, "(bad)");
/// ```
pub fn try_parse_instruction(line: &str) -> Option<Instruction> {
  let (address, rest) = line.trim_start().split_once(':')?;
  let address = u64::from_str_radix(address.trim(), 16).ok()?;

  let mut bytes = Vec::new();
  let mut text: Option<&str> = None;
  for column in rest.split('\t') {
    let column = column.trim();
    if column.is_empty() {
      continue;
    }
    if text.is_none() && is_hex_octets(column) {
      bytes.extend(
        column
          .split_whitespace()
          .filter_map(|octet| u8::from_str_radix(octet, 16).ok()),
      );
    } else {
      text = Some(column);
      break;
    }
  }

  // A byte column with no decoded text is a continuation line, not an
  // instruction.
  let text = text?;
  let (mnemonic, operands) = match text.split_once(char::is_whitespace) {
    Some((mnemonic, operands)) => (mnemonic, operands.trim()),
    None => (text, ""),
  };

  Some(Instruction {
    address,
    bytes,
    mnemonic: mnemonic.to_string(),
    operands: operands.to_string(),
    raw_line: line.to_string(),
  })
}

fn is_hex_octets(column: &str) -> bool {
  !column.is_empty()
    && column
      .split_whitespace()
      .all(|octet| octet.len() == 2 && octet.bytes().all(|b| b.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;

  /// Captured from `objdump -M intel -b binary -m i386 -D` over a small
  /// patched dump.
  const LISTING: &str = "\n/tmp/life.bin:     file format binary\n\n\nDisassembly of section .data:\n\n00000000 <.data>:\n   0:\t31 c0                \txor    eax,eax\n   2:\tf4                   \thlt    \n   3:\t90                   \tnop\n   4:\tf4                   \thlt    \n   5:\tcd 80                \tint    0x80\n";

  #[test]
  fn parses_a_whole_listing() {
    let mut parser = ListingParser::new(Cursor::new(LISTING));

    let mut instructions = Vec::new();
    let mut formats = 0;
    let mut sections = 0;
    let mut labels = 0;
    loop {
      match parser.parse_next_event().unwrap() {
        ListingEvent::ListingEOF => break,
        ListingEvent::ParsedFormat(f) => {
          assert_eq!(f.format, "binary");
          formats += 1;
        }
        ListingEvent::ParsedSection(s) => {
          assert_eq!(s.name, ".data");
          sections += 1;
        }
        ListingEvent::ParsedLabel(l) => {
          assert_eq!(l.label, ".data");
          labels += 1;
        }
        ListingEvent::Instruction(inst) => instructions.push(inst),
        ListingEvent::Log(line) => assert!(line.is_empty(), "unexpected log line: {:?}", line),
        ListingEvent::Error(e) => panic!("unexpected error event: {}", e),
      }
    }

    assert_eq!((formats, sections, labels), (1, 1, 1));
    assert_eq!(instructions.len(), 5);
    assert_eq!(instructions[0].mnemonic, "xor");
    assert_eq!(instructions[4].address, 5);
    assert_eq!(instructions[4].bytes, vec![0xcd, 0x80]);
  }

  #[test]
  fn hlt_lines_are_identifiable() {
    let mut parser = ListingParser::new(Cursor::new(LISTING));

    let mut halts = 0;
    loop {
      match parser.parse_next_event().unwrap() {
        ListingEvent::ListingEOF => break,
        ListingEvent::Instruction(inst) if inst.is_mnemonic("hlt") => halts += 1,
        _ => {}
      }
    }
    assert_eq!(halts, 2);
  }

  #[test]
  fn event_raw_lines_reconstruct_the_listing() {
    let mut parser = ListingParser::new(Cursor::new(LISTING));

    let mut reconstructed = String::new();
    loop {
      let event = parser.parse_next_event().unwrap();
      match event.raw_line() {
        Some(line) => {
          reconstructed.push_str(line);
          reconstructed.push('\n');
        }
        None => break,
      }
    }
    assert_eq!(reconstructed, LISTING);
  }

  #[test]
  fn crlf_line_endings_are_accepted() {
    let line = "   2:\tf4                   \thlt    \r\n";
    let mut parser = ListingParser::new(Cursor::new(line));
    match parser.parse_next_event().unwrap() {
      ListingEvent::Instruction(inst) => assert!(inst.is_mnemonic("hlt")),
      other => panic!("expected an instruction, got {:?}", other),
    }
  }
}
