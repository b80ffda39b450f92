//! User settings from `config.toml`.
//!
//! The file lives in the platform config dir (`~/.config/sheetchart/config.toml`
//! on Linux) unless `--config` points elsewhere. Problems never abort startup:
//! they are returned as warnings and the defaults are used.

use crate::error::ConfigError;
use directories::ProjectDirs;
use serde::Deserialize;
use sheetchart_core::{ChartConfig, ChartType};
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

pub const DEFAULT_CHART_WIDTH: u16 = 100;
pub const DEFAULT_CHART_HEIGHT: u16 = 30;
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    chart: Option<ChartSection>,
    preview: Option<PreviewSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartSection {
    document_location: Option<String>,
    document_name: Option<String>,
    document_title: Option<String>,
    user: Option<String>,
    display_name: Option<String>,
    default_type: Option<String>,
    width: Option<u16>,
    height: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PreviewSection {
    rows: Option<usize>,
}

/// Effective settings after merging the config file over the defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub chart: ChartConfig,
    pub chart_type: ChartType,
    pub chart_width: u16,
    pub chart_height: u16,
    pub preview_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            chart: ChartConfig::default(),
            chart_type: ChartType::default(),
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// Load settings from `config_file`, or from the user config path when `None`.
///
/// A missing user config is silent; a missing explicit `--config` file is a warning.
pub fn load_settings(config_file: Option<&Path>) -> (Settings, Vec<String>) {
    let mut warnings = Vec::new();
    let path = config_file.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = path else {
        return (Settings::default(), warnings);
    };
    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Settings::default(), warnings);
    }

    match read_config_file(&path) {
        Ok(file) => {
            let settings = apply_config(file, &mut warnings);
            (settings, warnings)
        }
        Err(err) => {
            warnings.push(err.to_string());
            (Settings::default(), warnings)
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    let meta = std::fs::metadata(path).map_err(io_err)?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(ConfigError::TooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            max: MAX_CONFIG_FILE_BYTES,
        });
    }
    let content = std::fs::read_to_string(path).map_err(io_err)?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_config(file: ConfigFile, warnings: &mut Vec<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(chart) = file.chart {
        if let Some(v) = chart.document_location {
            settings.chart.document_location = v;
        }
        if let Some(v) = chart.document_name {
            settings.chart.document_name = v;
        }
        if let Some(v) = chart.document_title {
            settings.chart.document_title = v;
        }
        if let Some(v) = chart.user {
            settings.chart.user.username = v;
        }
        settings.chart.user.display_name = chart.display_name;

        if let Some(tag) = chart.default_type {
            match ChartType::from_tag(&tag) {
                Some(kind) => settings.chart_type = kind,
                None => warnings.push(format!(
                    "Unknown chart type '{}', using '{}'",
                    tag, settings.chart_type
                )),
            }
        }
        if let Some(w) = chart.width {
            settings.chart_width = w;
        }
        if let Some(h) = chart.height {
            settings.chart_height = h;
        }
    }

    if let Some(rows) = file.preview.and_then(|p| p.rows) {
        settings.preview_rows = rows;
    }

    settings
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "sheetchart")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
