use std::io;
use std::process::{Child, ChildStderr, ChildStdout, ExitStatus};

use crate::iter::ListingIterator;

/// A wrapper around [`std::process::Child`] containing a spawned objdump
/// command. Provides an iterator over the parsed listing, plus the usual
/// process-control passthroughs.
pub struct ObjdumpChild {
  inner: Child,
}

impl ObjdumpChild {
  /// Creates an iterator over the events of the objdump process, parsed
  /// from its stdout and stderr channels.
  pub fn iter(&mut self) -> anyhow::Result<ListingIterator> {
    ListingIterator::new(self)
  }

  /// Escape hatch to manually read the stdout channel, which carries the
  /// listing itself. Note that this stream is owned by the iterator after
  /// calling `iter()`.
  pub fn take_stdout(&mut self) -> Option<ChildStdout> {
    self.inner.stdout.take()
  }

  /// Escape hatch to manually read the stderr channel, where objdump
  /// reports problems with its invocation or input.
  pub fn take_stderr(&mut self) -> Option<ChildStderr> {
    self.inner.stderr.take()
  }

  /// Waits for the process to exit, returning its exit status.
  ///
  /// Identical to `wait` in [`std::process::Child`].
  pub fn wait(&mut self) -> io::Result<ExitStatus> {
    self.inner.wait()
  }

  /// Forcibly terminate the process.
  ///
  /// Identical to `kill` in [`std::process::Child`].
  pub fn kill(&mut self) -> io::Result<()> {
    self.inner.kill()
  }

  /// Escape hatch to access the inner `Child`.
  pub fn as_inner(&self) -> &Child {
    &self.inner
  }

  /// Escape hatch to mutably access the inner `Child`.
  pub fn as_inner_mut(&mut self) -> &mut Child {
    &mut self.inner
  }

  pub(crate) fn from_inner(inner: Child) -> Self {
    Self { inner }
  }
}
