//! Cube configuration: size and color scheme.
//!
//! The embedded default document is always loaded first; a user file, if any,
//! is layered on top of it, so a user file only needs the keys it changes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::{Color, ColorScheme, FaceName};

const CONFIG_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_CONFIG_STR: &str = include_str!("default.yaml");

lazy_static! {
    pub(crate) static ref DEFAULT_CONFIG: CubeConfig = serde_norway::from_str(DEFAULT_CONFIG_STR)
        .map_err(eyre::Report::from)
        .and_then(CubeConfig::from_raw)
        .expect("error loading default cube config");
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    size: u16,
    scheme: RawScheme,
}

#[derive(Debug, Deserialize)]
struct RawScheme {
    name: String,
    faces: BTreeMap<FaceName, Color>,
}

/// Size and color scheme used to construct a [`crate::Cube`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeConfig {
    /// Number of layers along each axis.
    pub size: u16,
    /// Colors of the solved cube.
    pub scheme: ColorScheme,
}
impl Default for CubeConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}
impl CubeConfig {
    /// Loads the default configuration, with the YAML file at `path` layered
    /// on top if one is given.
    pub fn load(path: Option<&Path>) -> eyre::Result<Self> {
        let mut builder = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_CONFIG_STR,
            CONFIG_FILE_FORMAT,
        ));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).format(CONFIG_FILE_FORMAT));
        }
        Self::from_raw(builder.build()?.try_deserialize()?)
    }

    /// Loads the default configuration with a YAML document layered on top.
    pub fn from_yaml_str(yaml: &str) -> eyre::Result<Self> {
        let raw = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG_STR, CONFIG_FILE_FORMAT))
            .add_source(config::File::from_str(yaml, CONFIG_FILE_FORMAT))
            .build()?
            .try_deserialize()?;
        Self::from_raw(raw)
    }

    /// Loads configuration like [`CubeConfig::load()`], falling back to the
    /// default configuration if loading fails.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Error loading cube configuration: {e}");
            Self::default()
        })
    }

    fn from_raw(raw: RawConfig) -> eyre::Result<Self> {
        crate::cube::check_size(raw.size)?;
        let scheme = ColorScheme::from_map(raw.scheme.name, &raw.scheme.faces)?;
        Ok(Self {
            size: raw.size,
            scheme,
        })
    }
}
