pub mod diff;
pub mod show;

use deepcheck_core::errors::{CheckError, CheckErrorKind};
use std::path::Path;

/// Read a whole file, naming it in the error
pub fn read_input(op: &str, path: &Path) -> Result<Vec<u8>, CheckError> {
    std::fs::read(path).map_err(|e| {
        CheckError::new(CheckErrorKind::InvalidInput)
            .with_op(op)
            .with_message(format!("cannot read {}: {}", path.display(), e))
    })
}
