//! Store file persistence
//!
//! Each store is one pretty-printed JSON file under the data directory.
//! Writes land in a sibling `.tmp` file that is synced and then renamed over
//! the store, so a crash leaves either the old or the new contents.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::{JournalError, JournalResult};

/// Load a store, yielding its default value when the file is absent or empty
///
/// `store` names the store in errors, e.g. "Obligation" or "finance".
pub fn read_json<T, P>(path: P, store: &str) -> JournalResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(store, path = %path.display(), "store file missing, using default");
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(store, path = %path.display(), error = %e, "store file is not valid");
        JournalError::Json(format!("{} store at {}: {}", store, path.display(), e))
    })
}

/// Replace a store file with `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> JournalResult<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let payload = serde_json::to_vec_pretty(data)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    let written = File::create(&staging).and_then(|mut file| {
        file.write_all(&payload)?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|_| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(JournalError::Storage(format!(
            "Could not write {}: {}",
            path.display(),
            e
        )));
    }

    debug!(path = %path.display(), bytes = payload.len(), "store written");
    Ok(())
}

/// `obligations.json` is staged as `obligations.json.tmp`
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
