use crate::error::Result;
use std::{
  env::current_exe,
  path::{Path, PathBuf},
};

/// Returns the default path of the objdump executable, to be used as the
/// argument to `Command::new`. It first looks for an objdump binary
/// adjacent to the Rust executable, and otherwise invokes `objdump`
/// expecting it to be in the system path. A missing tool only surfaces as
/// an error when the command is actually spawned.
pub fn objdump_path() -> PathBuf {
  let default = Path::new("objdump").to_path_buf();
  match sidecar_path() {
    Ok(sidecar_path) => match sidecar_path.exists() {
      true => sidecar_path,
      false => default,
    },
    Err(_) => default,
  }
}

/// The (expected) path to an objdump binary adjacent to the Rust binary.
///
/// The extension differs between platforms, with Windows using `.exe`,
/// while Mac and Linux have no extension.
pub fn sidecar_path() -> Result<PathBuf> {
  let mut path = current_exe()?
    .parent()
    .ok_or("Can't get parent of current_exe")?
    .join("objdump");
  if cfg!(windows) {
    path.set_extension("exe");
  }
  Ok(path)
}
