use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub pomodoro: PomodoroConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Capacity bounds for both list modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default = "default_max_heads")]
    pub max_heads: usize,
    #[serde(default = "default_max_items_per_head")]
    pub max_items_per_head: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_heads: default_max_heads(),
            max_items_per_head: default_max_items_per_head(),
        }
    }
}

fn default_max_heads() -> usize {
    8
}

fn default_max_items_per_head() -> usize {
    12
}

/// Pomodoro durations, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroConfig {
    #[serde(default = "default_work_secs")]
    pub work_secs: u32,
    #[serde(default = "default_rest_secs")]
    pub rest_secs: u32,
    #[serde(default = "default_progressive_step_secs")]
    pub progressive_step_secs: u32,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        PomodoroConfig {
            work_secs: default_work_secs(),
            rest_secs: default_rest_secs(),
            progressive_step_secs: default_progressive_step_secs(),
        }
    }
}

fn default_work_secs() -> u32 {
    25 * 60
}

fn default_rest_secs() -> u32 {
    5 * 60
}

fn default_progressive_step_secs() -> u32 {
    15 * 60
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.limits.max_heads, 8);
        assert_eq!(config.limits.max_items_per_head, 12);
        assert_eq!(config.pomodoro.work_secs, 1500);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn partial_sections_fill_in() {
        let config: AppConfig = toml::from_str(
            r##"[limits]
max_heads = 4

[pomodoro]
rest_secs = 600

[ui.colors]
highlight = "#112233"
"##,
        )
        .unwrap();
        assert_eq!(config.limits.max_heads, 4);
        assert_eq!(config.limits.max_items_per_head, 12);
        assert_eq!(config.pomodoro.rest_secs, 600);
        assert_eq!(config.pomodoro.work_secs, 1500);
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#112233");
    }
}
