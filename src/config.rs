use crate::error::{AppError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "ALERTA_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/database.properties";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub db_url: String,
    pub db_username: String,
    pub db_password: String,
    pub db_driver: String,
    pub db_max_connections: u32,
    pub log_level: String,
}

impl AppConfig {
    /// Loads the properties file named by `ALERTA_CONFIG`, falling back to
    /// `config/database.properties`.
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                AppError::config(format!("configuration file '{}' not found", path.display()))
            }
            _ => AppError::config(format!(
                "cannot read configuration file '{}': {}",
                path.display(),
                e
            )),
        })?;
        check_lines(path, &contents)?;

        let mut props = HashMap::new();
        for entry in dotenvy::from_read_iter(contents.as_bytes()) {
            let (key, value) = entry.map_err(|e| {
                AppError::config(format!(
                    "malformed entry in '{}', expected key=value: {}",
                    path.display(),
                    e
                ))
            })?;
            props.insert(key, value);
        }

        Self::from_properties(&props)
    }

    fn from_properties(props: &HashMap<String, String>) -> Result<Self> {
        let required = |key: &str| {
            props
                .get(key)
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .ok_or_else(|| AppError::config(format!("missing property '{}'", key)))
        };

        let db_url = required("db.url")?;
        let db_driver = required("db.driver")?;
        let db_username = props.get("db.username").cloned().unwrap_or_default();
        let db_password = props.get("db.password").cloned().unwrap_or_default();
        let db_max_connections = match props.get("db.max_connections") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::config(format!("db.max_connections '{}' is not a number", raw))
            })?,
            None => 5,
        };
        let log_level = props
            .get("log.level")
            .cloned()
            .unwrap_or_else(|| "info".to_string());

        Ok(Self {
            db_url,
            db_username,
            db_password,
            db_driver,
            db_max_connections,
            log_level,
        })
    }
}

/// Rejects lines dotenvy would misread: anything without `=`, and unquoted
/// or double-quoted values containing `$`, which dotenvy expands as variables.
fn check_lines(path: &Path, contents: &str) -> Result<()> {
    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(AppError::config(format!(
                "{}:{}: expected key=value, found '{}'",
                path.display(),
                index + 1,
                line
            )));
        };

        let value = value.trim();
        if value.contains('$') && !value.starts_with('\'') {
            return Err(AppError::config(format!(
                "{}:{}: value of '{}' contains '$'; quote this value with single quotes",
                path.display(),
                index + 1,
                key.trim()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    fn write_props(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_all_keys() {
        let file = write_props(
            "# alerta segura\n\
             db.url=sqlite://alertas.db\n\
             db.username=admin\n\
             db.password=clave\n\
             db.driver=sqlite\n\
             db.max_connections=3\n\
             log.level=debug\n",
        );

        let config = AppConfig::from_path(file.path()).unwrap();
        assert_eq!(config.db_url, "sqlite://alertas.db");
        assert_eq!(config.db_username, "admin");
        assert_eq!(config.db_password, "clave");
        assert_eq!(config.db_driver, "sqlite");
        assert_eq!(config.db_max_connections, 3);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_optional_keys_default() {
        let file = write_props("db.url=sqlite::memory:\ndb.driver=sqlite\n");

        let config = AppConfig::from_path(file.path()).unwrap();
        assert_eq!(config.db_username, "");
        assert_eq!(config.db_password, "");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::from_path(&dir.path().join("nope.properties")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_missing_url_is_config_error() {
        let file = write_props("db.driver=sqlite\n");
        let err = AppConfig::from_path(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("db.url"));
    }

    #[test]
    fn test_unquoted_dollar_is_rejected() {
        let file = write_props("db.url=sqlite::memory:\ndb.driver=sqlite\ndb.password=pa$HOME12\n");
        let err = AppConfig::from_path(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("db.password"));
        assert!(err.to_string().contains("quote"));

        let file = write_props("db.url=sqlite::memory:\ndb.driver=sqlite\ndb.password=\"pa$HOME12\"\n");
        assert!(AppConfig::from_path(file.path()).is_err());
    }

    #[test]
    fn test_single_quoted_dollar_is_kept_verbatim() {
        let file = write_props("db.url=sqlite::memory:\ndb.driver=sqlite\ndb.password='pa$HOME12'\n");
        let config = AppConfig::from_path(file.path()).unwrap();
        assert_eq!(config.db_password, "pa$HOME12");
    }

    #[test]
    fn test_colon_and_space_separators_name_expected_form() {
        for line in ["db.url : sqlite::memory:", "db.url sqlite::memory:"] {
            let file = write_props(&format!("{}\ndb.driver=sqlite\n", line));
            let err = AppConfig::from_path(file.path()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config);
            assert!(err.to_string().contains("key=value"), "{}", err);
        }
    }

    #[test]
    fn test_load_honours_config_path_variable() {
        let file = write_props("db.url=sqlite://desde-env.db\ndb.driver=sqlite\n");
        env::set_var(CONFIG_PATH_ENV, file.path());
        let loaded = AppConfig::load();
        env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(loaded.unwrap().db_url, "sqlite://desde-env.db");
    }

    #[test]
    fn test_bad_max_connections() {
        let file = write_props("db.url=sqlite::memory:\ndb.driver=sqlite\ndb.max_connections=many\n");
        let err = AppConfig::from_path(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
