use crate::{
  error::{Error, Result},
  paths::objdump_path,
};
use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

/// Alias for `objdump --version`, parsing the version number and returning it.
pub fn objdump_version() -> Result<String> {
  objdump_version_with_path(objdump_path())
}

/// Lower level variant of `objdump_version` that exposes a customized path
/// to the objdump binary.
pub fn objdump_version_with_path<S: AsRef<OsStr>>(path: S) -> Result<String> {
  let mut cmd = Command::new(&path)
    .arg("--version")
    .stdout(Stdio::piped())
    .stderr(Stdio::null())
    .spawn()?;
  let stdout = cmd.stdout.take().ok_or("No standard output channel")?;

  let mut version: Option<String> = None;
  for line in BufReader::new(stdout).lines() {
    if let Some(v) = try_parse_version(&line?) {
      version = Some(v);
      break;
    }
  }
  let exit_status = cmd.wait()?;
  if !exit_status.success() {
    return Err(Error::msg("objdump --version exited with non-zero status"));
  }
  version.ok_or_else(|| Error::msg("Failed to parse objdump version"))
}

/// Verify whether objdump is installed on the system. This will return true
/// if there is an objdump binary in the PATH, or in the same directory as
/// the Rust executable.
pub fn objdump_is_installed() -> bool {
  Command::new(objdump_path())
    .arg("--version")
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .status()
    .map(|s| s.success())
    .unwrap_or(false)
}

/// Parses the version number out of the banner line of
/// `objdump --version`.
///
/// ```rust
/// use life2asm::version::try_parse_version;
///
/// let line = "GNU objdump (GNU Binutils for Ubuntu) 2.38";
/// assert_eq!(try_parse_version(line).unwrap(), "2.38");
///
/// let line = "GNU objdump (GNU Binutils) 2.43.1";
/// assert_eq!(try_parse_version(line).unwrap(), "2.43.1");
///
/// assert_eq!(try_parse_version("Copyright (C) 2022 Free Software Foundation, Inc."), None);
/// ```
pub fn try_parse_version(line: &str) -> Option<String> {
  line
    .strip_prefix("GNU objdump ")?
    .split_whitespace()
    .last()
    .map(|s| s.to_string())
}
