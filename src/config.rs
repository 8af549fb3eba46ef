//! Glyphs and timings read from the JSON config file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub player: String,
    pub ghost: String,
    /// Glyph for a ghost while the power pill is active.
    #[serde(alias = "ghost_right")]
    pub ghost_blue: String,
    pub wall: String,
    pub dot: String,
    pub pill: String,
    pub death: String,
    pub space: String,
    /// Emoji glyphs are two columns wide, so every cell is drawn doubled.
    #[serde(default)]
    pub use_emoji: bool,
    pub pill_duration_secs: u64,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!(
            "loaded config {} (emoji: {}, pill: {}s)",
            path.display(),
            config.use_emoji,
            config.pill_duration_secs
        );
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        if config.pill_duration_secs == 0 {
            return Err(ConfigError::ZeroPillDuration);
        }
        Ok(config)
    }

    pub fn pill_duration(&self) -> Duration {
        Duration::from_secs(self.pill_duration_secs)
    }

    /// Columns a single maze cell occupies on screen.
    pub fn cell_width(&self) -> usize {
        if self.use_emoji {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
pub(crate) fn ascii() -> Config {
    Config {
        player: "P".into(),
        ghost: "G".into(),
        ghost_blue: "B".into(),
        wall: "#".into(),
        dot: ".".into(),
        pill: "X".into(),
        death: "*".into(),
        space: " ".into(),
        use_emoji: false,
        pill_duration_secs: 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn reads_legacy_ghost_key() {
        let config = Config::from_json(
            r##"{
                "player": "P", "ghost": "G", "ghost_right": "B", "wall": "#",
                "dot": ".", "pill": "X", "death": "*", "space": " ",
                "use_emoji": false, "pill_duration_secs": 10
            }"##,
        )
        .unwrap();
        assert_eq!(config.ghost_blue, "B");
        assert_eq!(config.pill_duration(), Duration::from_secs(10));
        assert_eq!(config.cell_width(), 1);
    }

    #[test]
    fn rejects_zero_duration() {
        let mut value = serde_json::to_value(ascii()).unwrap();
        value["pill_duration_secs"] = 0.into();
        let err = Config::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPillDuration));
    }

    #[test]
    fn rejects_missing_fields() {
        let err = Config::from_json(r#"{"player": "P"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn shipped_configs_parse() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let emoji = Config::load(&root.join("config.json")).unwrap();
        assert!(emoji.use_emoji);
        assert_eq!(emoji.cell_width(), 2);
        let plain = Config::load(&root.join("config_noemoji.json")).unwrap();
        assert!(!plain.use_emoji);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
