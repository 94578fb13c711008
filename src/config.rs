//! Visualizer settings, read from an optional TOML file.
//!
//! Every section and field has a default, so a file only needs the values it
//! overrides.

use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConfigError, Result};
use crate::focus::FocusRelease;
use crate::resolve::{ArrowSet, ArrowStyle};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub palette: PaletteConfig,
    pub emphasis: EmphasisConfig,
    pub sliders: SliderConfig,
    pub focus: FocusConfig,
    pub view: ViewConfig,
}

/// Base arrow colours as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub vector_a: String,
    pub vector_b: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmphasisConfig {
    pub brighten: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Sliders span `-range..=range`.
    pub range: f32,
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    pub release_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub grid_size: i32,
    pub perspective: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            vector_a: "#ff4444".to_owned(),
            vector_b: "#4444ff".to_owned(),
            result: "#44ff44".to_owned(),
        }
    }
}

impl Default for EmphasisConfig {
    fn default() -> Self {
        Self { brighten: 1.3, scale: 1.5 }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self { range: 10.0, step: 0.1 }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self { release_delay_ms: 300 }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { grid_size: 10, perspective: true }
    }
}


fn parse_color(field: &'static str, value: &str) -> Result<Color32> {
    Color32::from_hex(value).map_err(|_| ConfigError::InvalidColor {
        field,
        value: value.to_owned(),
    })
}

fn require(field: &'static str, ok: bool, reason: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, reason: reason.to_owned() })
    }
}


impl Config {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content, path)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.arrow_style()?;
        require("sliders.range", self.sliders.range > 0.0, "must be positive")?;
        require("sliders.step", self.sliders.step > 0.0, "must be positive")?;
        require("emphasis.brighten", self.emphasis.brighten >= 1.0, "must be at least 1")?;
        require("emphasis.scale", self.emphasis.scale >= 1.0, "must be at least 1")?;
        require("view.grid_size", self.view.grid_size >= 1, "must be at least 1")?;
        Ok(())
    }

    pub fn arrow_style(&self) -> Result<ArrowStyle> {
        Ok(ArrowStyle {
            colors: ArrowSet {
                a: parse_color("palette.vector_a", &self.palette.vector_a)?,
                b: parse_color("palette.vector_b", &self.palette.vector_b)?,
                result: parse_color("palette.result", &self.palette.result)?,
            },
            brighten: self.emphasis.brighten,
            emphasized_scale: self.emphasis.scale,
        })
    }

    pub fn focus_release(&self) -> FocusRelease {
        FocusRelease::new(self.focus.release_delay_ms as f64 / 1000.0)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_style_matches_builtin() {
        let style = Config::default().arrow_style().unwrap();
        assert_eq!(style, ArrowStyle::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            "[sliders]\nrange = 5.0\n\n[focus]\nrelease_delay_ms = 500\n",
            Path::new("partial.toml"),
        )
        .unwrap();
        assert_eq!(config.sliders.range, 5.0);
        assert_eq!(config.sliders.step, 0.1);
        assert_eq!(config.focus_release().delay(), 0.5);
        assert_eq!(config.palette, PaletteConfig::default());
    }

    #[test]
    fn rejects_bad_colour() {
        let err = Config::from_toml_str("[palette]\nresult = \"green\"\n", Path::new("c.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { field: "palette.result", .. }));
    }

    #[test]
    fn rejects_dimming_brighten_factor() {
        let err = Config::from_toml_str("[emphasis]\nbrighten = 0.5\n", Path::new("c.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "emphasis.brighten", .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Config::from_toml_str("[sliders\nrange = 1", Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn round_trips_through_file() {
        let mut config = Config::default();
        config.view.grid_size = 6;
        config.palette.vector_b = "#2040ff".to_owned();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_toml_string().unwrap().as_bytes()).unwrap();

        let loaded = Config::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.arrow_style().unwrap().colors.b, Color32::from_rgb(0x20, 0x40, 0xff));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
