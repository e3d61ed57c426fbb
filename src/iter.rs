use std::{
  io::{BufRead, BufReader},
  process::{ChildStderr, ChildStdout},
  sync::mpsc::{sync_channel, Receiver, SyncSender},
  thread::JoinHandle,
};

use anyhow::Context;

use crate::{
  child::ObjdumpChild,
  event::{Instruction, ListingEvent},
  listing_parser::ListingParser,
};

/// An iterator over events from an objdump process: the parsed listing from
/// stdout, interleaved with any error lines from stderr.
pub struct ListingIterator {
  rx: Receiver<ListingEvent>,
}

impl ListingIterator {
  pub fn new(child: &mut ObjdumpChild) -> anyhow::Result<Self> {
    let stdout = child.take_stdout().context(
      "No stdout channel\n - Did you call `take_stdout` elsewhere?\n - Did you forget to call `.stdout(Stdio::piped)` on the `ChildProcess`?",
    )?;
    let (tx, rx) = sync_channel::<ListingEvent>(0);
    spawn_stdout_thread(stdout, tx.clone());
    if let Some(stderr) = child.take_stderr() {
      spawn_stderr_thread(stderr, tx);
    }

    Ok(Self { rx })
  }

  //// Iterator filters

  /// Filter out all events except decoded instructions
  /// (`ListingEvent::Instruction`).
  pub fn filter_instructions(self) -> impl Iterator<Item = Instruction> {
    self.filter_map(|event| match event {
      ListingEvent::Instruction(inst) => Some(inst),
      _ => None,
    })
  }

  /// Returns an iterator over error messages (`ListingEvent::Error`).
  pub fn filter_errors(self) -> impl Iterator<Item = String> {
    self.filter_map(|event| match event {
      ListingEvent::Error(e) => Some(e),
      _ => None,
    })
  }

  /// Iterator over every stdout line of the listing as a raw string.
  /// Conceptually equivalent to `BufReader::new(objdump_stdout).lines()`.
  pub fn into_listing_lines(self) -> impl Iterator<Item = String> {
    self.filter_map(|event| match event {
      ListingEvent::ParsedFormat(f) => Some(f.raw_line),
      ListingEvent::ParsedSection(s) => Some(s.raw_line),
      ListingEvent::ParsedLabel(l) => Some(l.raw_line),
      ListingEvent::Instruction(i) => Some(i.raw_line),
      ListingEvent::Log(line) => Some(line),
      ListingEvent::ListingEOF => None,
      ListingEvent::Error(_) => None,
    })
  }
}

impl Iterator for ListingIterator {
  type Item = ListingEvent;

  fn next(&mut self) -> Option<Self::Item> {
    self.rx.recv().ok()
  }
}

/// Spawn a thread which reads and parses listing lines from objdump's
/// stdout channel. The cadence is controlled by the synchronous `tx`
/// channel, which blocks until a receiver is ready for the next event.
pub fn spawn_stdout_thread(stdout: ChildStdout, tx: SyncSender<ListingEvent>) -> JoinHandle<()> {
  std::thread::spawn(move || {
    let mut parser = ListingParser::new(stdout);
    loop {
      match parser.parse_next_event() {
        Ok(ListingEvent::ListingEOF) => {
          tx.send(ListingEvent::ListingEOF).ok();
          break;
        }
        Ok(event) => {
          tx.send(event).ok();
        }
        Err(e) => {
          tx.send(ListingEvent::Error(e.to_string())).ok();
          break;
        }
      }
    }
  })
}

/// Spawn a thread which forwards objdump's stderr lines as
/// `ListingEvent::Error` events.
pub fn spawn_stderr_thread(stderr: ChildStderr, tx: SyncSender<ListingEvent>) -> JoinHandle<()> {
  std::thread::spawn(move || {
    let reader = BufReader::new(stderr);
    for line in reader.lines() {
      match line {
        Ok(line) if line.trim().is_empty() => {}
        Ok(line) => {
          tx.send(ListingEvent::Error(line)).ok();
        }
        Err(_) => break,
      }
    }
  })
}
