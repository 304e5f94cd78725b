use std::{collections::HashMap, fmt, sync::OnceLock};

use log::Level;

use crate::codec::Separators;

pub const CHARACTERS_FIELD: &str = "Personnages";

/// Class names of the host document and of the controls this crate renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    pub field_container: String,
    pub editor_wrapper: String,
    pub title: String,
    pub character: String,
    pub field_value: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        ClassNames {
            field_container: "fp-field-edit".to_string(),
            editor_wrapper: "fp-char-edit-fields".to_string(),
            title: "charsheet-title".to_string(),
            character: "fp-character".to_string(),
            field_value: "fp-field-value".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub first_name_placeholder: String,
    pub age_placeholder: String,
    pub add_button: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            first_name_placeholder: "nom du personnage".to_string(),
            age_placeholder: "âge".to_string(),
            add_button: "+".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub separators: Separators,
    /// Labels (`dt` text) of the form fields that get a character editor.
    pub fields: Vec<String>,
    pub classes: ClassNames,
    pub labels: Labels,
    pub log_level: Level,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            separators: Separators::default(),
            fields: vec![CHARACTERS_FIELD.to_string()],
            classes: ClassNames::default(),
            labels: Labels::default(),
            log_level: Level::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    AlreadyFrozen,
    UnknownParam(String),
    InvalidValue { param: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::AlreadyFrozen => {
                f.write_str("configuration is already in use and can no longer change")
            }
            ConfigError::UnknownParam(param) => write!(f, "unknown parameter {}", param),
            ConfigError::InvalidValue { param, message } => {
                write!(f, "invalid value for {}: {}", param, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl EditorConfig {
    /// Builds a configuration from the defaults overridden by `params`, as
    /// handed over from JavaScript.
    pub fn from_params(params: &HashMap<String, String>) -> Result<EditorConfig, ConfigError> {
        let mut config = EditorConfig::default();
        for (key, value) in params {
            match key.as_str() {
                "recordSeparator" => config.separators.record = value.clone(),
                "fieldSeparator" => config.separators.field = value.clone(),
                "keyValueSeparator" => config.separators.key_value = value.clone(),
                "fields" => {
                    config.fields = value
                        .split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "logLevel" => {
                    config.log_level =
                        value
                            .parse::<Level>()
                            .map_err(|_| ConfigError::InvalidValue {
                                param: key.clone(),
                                message: format!("{:?} is not a log level", value),
                            })?;
                }
                _ => return Err(ConfigError::UnknownParam(key.clone())),
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.separators
            .validate()
            .map_err(|message| ConfigError::InvalidValue {
                param: "separators".to_string(),
                message,
            })?;
        if self.fields.is_empty() {
            return Err(ConfigError::InvalidValue {
                param: "fields".to_string(),
                message: "at least one field label is required".to_string(),
            });
        }
        Ok(())
    }

    pub fn handles_field(&self, label: &str) -> bool {
        self.fields.iter().any(|field| field == label)
    }
}

static EDITOR_CONFIG: OnceLock<EditorConfig> = OnceLock::new();

/// Installs `config` for the rest of the page's life. Only possible before the
/// first call to [`editor_config`].
pub fn set_editor_config(config: EditorConfig) -> Result<(), ConfigError> {
    config.validate()?;
    EDITOR_CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyFrozen)
}

pub fn editor_config() -> &'static EditorConfig {
    EDITOR_CONFIG.get_or_init(EditorConfig::default)
}
