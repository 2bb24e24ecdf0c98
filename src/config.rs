use crate::error::{Result, TocError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the home directory
pub const CONFIG_FILE_NAME: &str = ".mdtoc";

pub const DEFAULT_INCLUDE: &str = "**/*.md";
pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_TITLE: &str = "Table of Contents";
pub const DEFAULT_INSERT_MARKER: &str = "<!-- TOC -->";

/// Fully resolved configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Gitignore-style patterns for files to leave out
    pub ignore: Vec<String>,

    /// Glob patterns for files to include, matched relative to the root
    pub include: Vec<String>,

    /// Maximum number of path segments below the root
    pub max_depth: usize,

    /// Drop every `readme.md` (any case)
    pub exclude_readme: bool,

    /// Title rendered as a level-1 heading, if any
    pub title: Option<String>,

    /// Marker surrounding the TOC block in the output file, if any
    pub insert_marker: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
            include: vec![DEFAULT_INCLUDE.to_string()],
            max_depth: DEFAULT_MAX_DEPTH,
            exclude_readme: false,
            title: Some(DEFAULT_TITLE.to_string()),
            insert_marker: Some(DEFAULT_INSERT_MARKER.to_string()),
        }
    }
}

fn default_ignore() -> Vec<String> {
    vec![
        "node_modules/**".to_string(),
        ".git/**".to_string(),
        "dist/**".to_string(),
        "build/**".to_string(),
        "coverage/**".to_string(),
        "*.test.md".to_string(),
        "*.spec.md".to_string(),
    ]
}

/// On-disk configuration; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_readme: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_marker: Option<String>,
}

impl From<&Config> for ConfigFile {
    fn from(config: &Config) -> Self {
        Self {
            ignore: Some(config.ignore.clone()),
            include: Some(config.include.clone()),
            max_depth: Some(config.max_depth),
            exclude_readme: Some(config.exclude_readme),
            title: Some(config.title.clone().unwrap_or_default()),
            insert_marker: Some(config.insert_marker.clone().unwrap_or_default()),
        }
    }
}

/// Values passed explicitly on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub ignore: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub exclude_readme: Option<bool>,
    pub title: Option<String>,
    pub insert_marker: Option<String>,
}

impl Config {
    /// Merge built-in defaults, an optional config file and CLI overrides
    ///
    /// Later layers replace earlier ones field by field. Empty include lists,
    /// a zero depth and empty strings normalize to their "unset" meaning.
    pub fn resolve(file: Option<&ConfigFile>, overrides: &ConfigOverrides) -> Self {
        let defaults = Config::default();
        let file = file.cloned().unwrap_or_default();

        let ignore = overrides
            .ignore
            .clone()
            .or(file.ignore)
            .unwrap_or(defaults.ignore);

        let include = file
            .include
            .filter(|patterns| !patterns.is_empty())
            .unwrap_or(defaults.include);

        let max_depth = overrides
            .max_depth
            .or(file.max_depth)
            .filter(|depth| *depth > 0)
            .unwrap_or(defaults.max_depth);

        let exclude_readme = overrides
            .exclude_readme
            .or(file.exclude_readme)
            .unwrap_or(defaults.exclude_readme);

        let title = overrides
            .title
            .clone()
            .or(file.title)
            .or(defaults.title)
            .filter(|title| !title.is_empty());

        let insert_marker = overrides
            .insert_marker
            .clone()
            .or(file.insert_marker)
            .or(defaults.insert_marker)
            .filter(|marker| !marker.is_empty());

        Self {
            ignore,
            include,
            max_depth,
            exclude_readme,
            title,
            insert_marker,
        }
    }

    /// Write this configuration to `path`, format chosen by extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = ConfigFile::from(self);
        let contents = match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => serde_yaml::to_string(&file)
                .map_err(|e| TocError::ConfigSerialize(e.to_string()))?,
            ConfigFormat::Toml => toml::to_string_pretty(&file)
                .map_err(|e| TocError::ConfigSerialize(e.to_string()))?,
            ConfigFormat::Json | ConfigFormat::Unknown => serde_json::to_string_pretty(&file)
                .map_err(|e| TocError::ConfigSerialize(e.to_string()))?,
        };

        fs::write(path, contents).map_err(|source| TocError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Yaml,
    Toml,
    Unknown,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::Json,
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Unknown,
        }
    }
}

/// Load the config file, if one can be found
///
/// Search order:
/// 1. Custom path if provided via --config (must exist)
/// 2. .mdtoc in current directory
/// 3. ~/.mdtoc in home directory
/// 4. None, built-in defaults apply
pub fn load_config(custom_path: Option<&Path>) -> Result<Option<ConfigFile>> {
    if let Some(path) = custom_path {
        if !path.exists() {
            return Err(TocError::ConfigNotFound(path.to_path_buf()));
        }
        return load_config_from_file(path).map(Some);
    }

    let current_config = PathBuf::from(CONFIG_FILE_NAME);
    if current_config.is_file() {
        return load_config_from_file(&current_config).map(Some);
    }

    if let Some(home_config) = get_home_config_path() {
        if home_config.is_file() {
            return load_config_from_file(&home_config).map(Some);
        }
    }

    log::debug!("No config file found, using defaults");
    Ok(None)
}

/// Load config from a specific file
pub fn load_config_from_file(path: &Path) -> Result<ConfigFile> {
    let contents = fs::read_to_string(path).map_err(|source| TocError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Loading config from {}", path.display());
    parse_config(&contents, ConfigFormat::from_path(path)).map_err(|message| {
        TocError::ConfigParse {
            path: path.to_path_buf(),
            message,
        }
    })
}

fn parse_config(contents: &str, format: ConfigFormat) -> std::result::Result<ConfigFile, String> {
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    match format {
        ConfigFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        ConfigFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
        ConfigFormat::Unknown => serde_json::from_str::<ConfigFile>(contents)
            .or_else(|_| serde_yaml::from_str(contents))
            .map_err(|e| e.to_string()),
    }
}

/// Get path to home directory config file
fn get_home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}
