/// Any event parsed from the output of a spawned objdump process.
#[derive(Debug, Clone)]
pub enum ListingEvent {
  /// The `<file>: file format <format>` header at the top of a listing.
  ParsedFormat(ListingFormat),
  /// A `Disassembly of section <name>:` header.
  ParsedSection(ListingSection),
  /// A `<address> <label>:` symbol line, e.g. `00000000 <.data>:`.
  ParsedLabel(ListingLabel),
  /// One decoded instruction line.
  Instruction(Instruction),
  /// Any stdout line that isn't one of the recognized shapes, including
  /// the blank lines objdump uses as separators.
  Log(String),
  /// End of the stdout channel.
  ListingEOF,
  /// An error that didn't originate from the listing itself, e.g. a line
  /// objdump printed on stderr.
  Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingFormat {
  /// The input path as objdump echoed it back.
  pub file: String,
  /// BFD format name, e.g. `binary` or `elf64-x86-64`.
  pub format: String,
  /// The stdout line this was parsed from.
  pub raw_line: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingSection {
  /// Section name, e.g. `.data`.
  pub name: String,
  /// The stdout line this was parsed from.
  pub raw_line: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingLabel {
  pub address: u64,
  /// Label text without the angle brackets, e.g. `.data`.
  pub label: String,
  /// The stdout line this was parsed from.
  pub raw_line: String,
}

/// A single line of disassembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
  /// Offset of the instruction within its section.
  pub address: u64,
  /// The encoded instruction bytes, empty when objdump was run with
  /// `--no-show-raw-insn`.
  pub bytes: Vec<u8>,
  /// Mnemonic as printed, e.g. `xor`, `hlt`, or `(bad)` for bytes that
  /// don't decode.
  pub mnemonic: String,
  /// Operand text after the mnemonic; empty for no-operand instructions.
  pub operands: String,
  /// The stdout line this was parsed from.
  pub raw_line: String,
}

impl Instruction {
  /// Whether this instruction's mnemonic is exactly `mnemonic`.
  pub fn is_mnemonic(&self, mnemonic: &str) -> bool {
    self.mnemonic == mnemonic
  }
}

impl ListingEvent {
  /// The stdout line an event was parsed from, if it came from stdout.
  /// Joining these with newlines reconstructs the original listing.
  pub fn raw_line(&self) -> Option<&str> {
    match self {
      ListingEvent::ParsedFormat(f) => Some(&f.raw_line),
      ListingEvent::ParsedSection(s) => Some(&s.raw_line),
      ListingEvent::ParsedLabel(l) => Some(&l.raw_line),
      ListingEvent::Instruction(i) => Some(&i.raw_line),
      ListingEvent::Log(line) => Some(line),
      ListingEvent::ListingEOF | ListingEvent::Error(_) => None,
    }
  }
}
