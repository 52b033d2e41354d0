use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use super::decoder::{decode, DecodedLog};
use super::error::LoadError;

pub const EVTC_EXTENSION: &str = "evtc";

/// Memory-map an uncompressed `.evtc` file and decode it.
///
/// The mapping is dropped before returning; the decoded log owns its data.
pub fn read_log_file(path: &Path) -> Result<DecodedLog, LoadError> {
    let is_evtc = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EVTC_EXTENSION));
    if !is_evtc {
        return Err(LoadError::UnsupportedExtension(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|err| LoadError::io(path, err))?;
    let len = file
        .metadata()
        .map_err(|err| LoadError::io(path, err))?
        .len();
    if len == 0 {
        return Err(LoadError::EmptyFile(path.to_path_buf()));
    }

    // SAFETY: the mapping is read-only and lives only for the decode call.
    // Logs are handed over once the writer has finished with them.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|err| LoadError::io(path, err))?;
    debug!(path = %path.display(), bytes = mmap.len(), "Mapped log file");

    decode(&mmap).map_err(|err| LoadError::decode(path, err))
}
