//! Stimulus renderers. Output names come from `core::naming` only.

pub mod dots;
pub mod manifest;
pub mod preview;
pub mod whites;

use std::fs;
use std::path::Path;

use crate::error::{Result, StimError};

/// Create `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| StimError::io(dir, e))
}
