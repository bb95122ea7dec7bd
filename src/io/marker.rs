use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::io::store_io::{StorageError, atomic_write};

pub const MARKER_FILE: &str = "settings.conf";
const LAST_UPDATE_KEY: &str = "last_update";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read the date of the last daily rollover.
///
/// A missing file, a missing key or an unparseable date all read as `None`,
/// which makes the next startup roll over.
pub fn read_last_update(data_dir: &Path) -> Option<NaiveDate> {
    let content = fs::read_to_string(data_dir.join(MARKER_FILE)).ok()?;
    content.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        if key.trim() != LAST_UPDATE_KEY {
            return None;
        }
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
    })
}

/// Record `date` as the last rollover
pub fn write_last_update(data_dir: &Path, date: NaiveDate) -> Result<(), StorageError> {
    let path = data_dir.join(MARKER_FILE);
    let content = format!("{}={}\n", LAST_UPDATE_KEY, date.format(DATE_FORMAT));
    atomic_write(&path, content.as_bytes())
        .map_err(|e| StorageError::WriteError { path, source: e })
}
