use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "signup";
const CONFIG_FILENAME: &str = "config.toml";

pub const MAX_INITIAL_ORDER_ROWS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub form: FormConfig,
    pub submit: SubmitConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub initial_order_rows: usize,
    pub mask_password: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
    pub output: SubmitOutput,
}

/// Where the TUI reports submitted forms once the terminal is restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitOutput {
    Json,
    Log,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            form: FormConfig {
                initial_order_rows: 0,
                mask_password: true,
            },
            submit: SubmitConfig {
                output: SubmitOutput::Json,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid initial_order_rows value: {0} (max {max})", max = MAX_INITIAL_ORDER_ROWS)]
    InvalidInitialOrderRows(usize),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    form: Option<FormFile>,
    submit: Option<SubmitFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FormFile {
    initial_order_rows: Option<usize>,
    mask_password: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SubmitFile {
    output: Option<SubmitOutput>,
}

/// Loads the config file. An explicit path must exist; the default location
/// falls back to built-in defaults when absent.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(form) = parsed.form {
        if let Some(rows) = form.initial_order_rows {
            if rows > MAX_INITIAL_ORDER_ROWS {
                return Err(ConfigError::InvalidInitialOrderRows(rows));
            }
            config.form.initial_order_rows = rows;
        }
        if let Some(mask) = form.mask_password {
            config.form.mask_password = mask;
        }
    }

    if let Some(submit) = parsed.submit {
        if let Some(output) = submit.output {
            config.submit.output = output;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{
        load, load_at_path, merge_config, AppConfig, ConfigError, ConfigFile, FormFile,
        SubmitFile, SubmitOutput,
    };
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            form: Some(FormFile {
                initial_order_rows: Some(2),
                mask_password: Some(false),
            }),
            submit: Some(SubmitFile {
                output: Some(SubmitOutput::Log),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.form.initial_order_rows, 2);
        assert!(!merged.form.mask_password);
        assert_eq!(merged.submit.output, SubmitOutput::Log);
    }

    #[test]
    fn merge_config_rejects_too_many_rows() {
        let parsed = ConfigFile {
            form: Some(FormFile {
                initial_order_rows: Some(21),
                mask_password: None,
            }),
            submit: None,
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInitialOrderRows(21)));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[form]\ninitial_order_rows = 1\n[submit]\noutput = \"log\"\n",
        )
        .expect("write config");

        let config = load(Some(path)).expect("load");
        assert_eq!(config.form.initial_order_rows, 1);
        assert!(config.form.mask_password);
        assert_eq!(config.submit.output, SubmitOutput::Log);
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[form]\nrows = 1\n").expect("write config");
        let err = load(Some(path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "").expect("write config");
        assert_eq!(load(Some(path)).expect("load"), AppConfig::default());
    }
}
