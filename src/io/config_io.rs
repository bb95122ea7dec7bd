use std::fs;
use std::path::Path;

use crate::io::store_io::StorageError;
use crate::model::config::AppConfig;

pub const CONFIG_FILE: &str = "config.toml";

/// Read config.toml from the data directory. A missing file is the default config.
pub fn read_config(data_dir: &Path) -> Result<AppConfig, StorageError> {
    let config_path = data_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(AppConfig::default());
    }
    let config_text = fs::read_to_string(&config_path).map_err(|e| StorageError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: AppConfig = toml::from_str(&config_text)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_config(tmp.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[limits]\nmax_items_per_head = 20\n\n[log]\nlevel = \"debug\"\n",
        )
        .unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.limits.max_items_per_head, 20);
        assert_eq!(config.limits.max_heads, 8);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[limits\nmax_heads = ").unwrap();
        let err = read_config(tmp.path()).unwrap_err();
        assert!(matches!(err, StorageError::ConfigParseError(_)));
        assert!(err.to_string().starts_with("could not parse config.toml"));
    }
}
