use std::{
  ffi::OsStr,
  fmt, io,
  process::{Command, CommandArgs, Stdio},
};

use crate::child::ObjdumpChild;
use crate::paths::objdump_path;

/// A wrapper around [`std::process::Command`] with convenient preset
/// argument sets and customization for `objdump` specifically.
///
/// The `rustdoc` on each method includes relevant information from the
/// binutils documentation: <https://sourceware.org/binutils/docs/binutils/objdump.html>.
/// Refer there for the exhaustive list of possible arguments.
pub struct ObjdumpCommand {
  inner: Command,
}

impl ObjdumpCommand {
  /// Alias for `-M intel`.
  ///
  /// Print x86 instructions in Intel syntax instead of the AT&T default.
  pub fn intel_syntax(&mut self) -> &mut Self {
    self.args(["-M", "intel"]);
    self
  }

  /// Alias for `-M` argument, passing options through to the disassembler
  /// backend for the selected architecture.
  pub fn disassembler_options<S: AsRef<str>>(&mut self, options: S) -> &mut Self {
    self.arg("-M");
    self.arg(options.as_ref());
    self
  }

  /// Alias for `-b` argument, the BFD object-format name of the input.
  ///
  /// Use `binary` for a flat file with no object headers at all, which is
  /// what this crate writes.
  pub fn target<S: AsRef<str>>(&mut self, bfdname: S) -> &mut Self {
    self.arg("-b");
    self.arg(bfdname.as_ref());
    self
  }

  /// Alias for `-m` argument, the architecture to disassemble for.
  ///
  /// Required when the input is a raw `binary` target, since there are no
  /// headers to deduce the architecture from.
  pub fn architecture<S: AsRef<str>>(&mut self, machine: S) -> &mut Self {
    self.arg("-m");
    self.arg(machine.as_ref());
    self
  }

  /// Alias for `-d` argument: disassemble the sections expected to contain
  /// instructions.
  pub fn disassemble(&mut self) -> &mut Self {
    self.arg("-d");
    self
  }

  /// Alias for `-D` argument: disassemble the contents of every section,
  /// not just the ones expected to contain instructions. A raw `binary`
  /// input is all data, so this is the flag that makes objdump decode it.
  pub fn disassemble_all(&mut self) -> &mut Self {
    self.arg("-D");
    self
  }

  /// Alias for `--no-show-raw-insn`: omit the hex byte column when
  /// disassembling.
  pub fn no_show_raw_insn(&mut self) -> &mut Self {
    self.arg("--no-show-raw-insn");
    self
  }

  /// Alias for `--start-address` argument. Data lower than this address is
  /// ignored when dumping or disassembling.
  pub fn start_address(&mut self, address: u64) -> &mut Self {
    self.arg(format!("--start-address=0x{:x}", address));
    self
  }

  /// Alias for `--stop-address` argument. Data at or above this address is
  /// ignored when dumping or disassembling.
  pub fn stop_address(&mut self, address: u64) -> &mut Self {
    self.arg(format!("--stop-address=0x{:x}", address));
    self
  }

  /// The input file path. objdump takes it as a positional argument.
  pub fn input<S: AsRef<OsStr>>(&mut self, path: S) -> &mut Self {
    self.arg(path.as_ref());
    self
  }

  //// Preset argument sets for common use cases.

  /// Disassemble a headerless 32-bit x86 image in Intel syntax.
  /// Equivalent to `objdump -M intel -b binary -m i386 -D`.
  pub fn raw_i386(&mut self) -> &mut Self {
    self.args(["-M", "intel", "-b", "binary", "-m", "i386", "-D"]);
    self
  }

  //// `std::process::Command` passthrough methods

  /// Adds an argument to pass to the program.
  ///
  /// Identical to `arg` in [`std::process::Command`].
  pub fn arg<S: AsRef<OsStr>>(&mut self, arg: S) -> &mut Self {
    self.inner.arg(arg.as_ref());
    self
  }

  /// Adds multiple arguments to pass to the program.
  ///
  /// Identical to `args` in [`std::process::Command`].
  pub fn args<I, S>(&mut self, args: I) -> &mut Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    for arg in args {
      self.arg(arg.as_ref());
    }
    self
  }

  /// Returns an iterator of the arguments that will be passed to the program.
  ///
  /// Identical to `get_args` in [`std::process::Command`].
  pub fn get_args(&self) -> CommandArgs<'_> {
    self.inner.get_args()
  }

  /// Spawn the objdump command as a child process, wrapping it in an
  /// `ObjdumpChild` interface.
  ///
  /// Identical to `spawn` in [`std::process::Command`].
  pub fn spawn(&mut self) -> io::Result<ObjdumpChild> {
    self.inner.spawn().map(ObjdumpChild::from_inner)
  }

  /// Print a command that can be copy-pasted to run in the terminal.
  /// Requires `&mut self` so that it chains seamlessly with other methods
  /// in the interface.
  pub fn print_command(&mut self) -> &mut Self {
    println!("Command: {:?}", self.inner);
    self
  }

  //// Constructors
  pub fn new() -> Self {
    Self::new_with_exe(objdump_path())
  }

  pub fn new_with_exe<S: AsRef<OsStr>>(exe: S) -> Self {
    let mut inner = Command::new(&exe);
    inner.stdin(Stdio::null());
    inner.stdout(Stdio::piped());
    inner.stderr(Stdio::piped());
    Self { inner }
  }

  //// Escape hatches
  /// Escape hatch to access the inner `Command`.
  pub fn as_inner(&mut self) -> &Command {
    &self.inner
  }

  /// Escape hatch to mutably access the inner `Command`.
  pub fn as_inner_mut(&mut self) -> &mut Command {
    &mut self.inner
  }
}

impl Default for ObjdumpCommand {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for ObjdumpCommand {
  /// Format the program and arguments of a Command for display. Any
  /// non-utf8 data is lossily converted using the utf8 replacement
  /// character.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.inner.fmt(f)
  }
}

impl From<Command> for ObjdumpCommand {
  /// Convert a `Command` into an `ObjdumpCommand`, making no guarantees
  /// about the validity of its configured arguments and stdio.
  fn from(inner: Command) -> Self {
    Self { inner }
  }
}

impl From<ObjdumpCommand> for Command {
  fn from(cmd: ObjdumpCommand) -> Self {
    cmd.inner
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn raw_i386_matches_the_flat_binary_invocation() {
    let mut cmd = ObjdumpCommand::new();
    cmd.raw_i386().input("life.bin");
    let args: Vec<String> = cmd
      .get_args()
      .map(|a| a.to_string_lossy().to_string())
      .collect();
    assert_eq!(
      args,
      ["-M", "intel", "-b", "binary", "-m", "i386", "-D", "life.bin"]
    );
  }

  #[test]
  fn aliases_append_in_call_order() {
    let mut cmd = ObjdumpCommand::new();
    cmd
      .intel_syntax()
      .target("binary")
      .architecture("i386")
      .disassemble_all();
    let args: Vec<String> = cmd
      .get_args()
      .map(|a| a.to_string_lossy().to_string())
      .collect();
    assert_eq!(args, ["-M", "intel", "-b", "binary", "-m", "i386", "-D"]);
  }
}
