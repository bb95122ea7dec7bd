use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::io::store_io::{StorageError, atomic_write};
use crate::ops::pomodoro::CycleMode;

pub const STATE_FILE: &str = ".state.json";

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Highlighted row of the module panel
    #[serde(default)]
    pub panel_cursor: usize,
    #[serde(default)]
    pub pomodoro: Option<PomodoroState>,
}

/// Pomodoro settings edited from inside the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroState {
    pub work_secs: u32,
    pub rest_secs: u32,
    #[serde(default)]
    pub cycle: CycleMode,
}

/// Read .state.json from the data directory
pub fn read_ui_state(data_dir: &Path) -> Option<UiState> {
    let path = data_dir.join(STATE_FILE);
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the data directory
pub fn write_ui_state(data_dir: &Path, state: &UiState) -> Result<(), StorageError> {
    let path = data_dir.join(STATE_FILE);
    let content = serde_json::to_string_pretty(state)?;
    atomic_write(&path, content.as_bytes())
        .map_err(|e| StorageError::WriteError { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = UiState {
            panel_cursor: 2,
            pomodoro: Some(PomodoroState {
                work_secs: 50 * 60,
                rest_secs: 10 * 60,
                cycle: CycleMode::Progressive,
            }),
        };
        write_ui_state(dir.path(), &state).unwrap();
        assert_eq!(read_ui_state(dir.path()), Some(state));
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STATE_FILE), "not json {{{").unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn serde_defaults_on_minimal_object() {
        let state: UiState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, UiState::default());
        let pomodoro: PomodoroState =
            serde_json::from_str(r#"{"work_secs":60,"rest_secs":30}"#).unwrap();
        assert_eq!(pomodoro.cycle, CycleMode::Standard);
    }
}
