//! Settings read from an optional TOML file and `MAPINFO_*` environment
//! variables.

use std::collections::HashMap;
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use mapinfo_types::GameMission;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "mapinfo.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Selects the built-in lump parsed before any add-on lumps.
    pub mission: GameMission,
    /// `env_logger` filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// String table consulted by `lookup` and `$key` values.
    pub strings: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mission: GameMission::Doom2,
            log_level: "warn".into(),
            strings: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        Config::builder()
            .add_source(File::from(file).required(path.is_some()))
            .add_source(Environment::with_prefix("MAPINFO"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use mapinfo_data::{StringMap, StringTable};

    use super::*;

    #[test]
    fn default_file_is_optional() {
        let settings = Settings::load(None).expect("load");
        assert!(!settings.log_level.is_empty());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let settings = Settings::load(Some(Path::new("does/not/exist.toml")));
        assert!(settings.is_err());
    }

    #[test]
    fn reads_toml() {
        let dir = std::env::temp_dir().join(format!("mapinfo-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("mapinfo.toml");
        std::fs::write(
            &path,
            "mission = \"plutonia\"\nlog_level = \"debug\"\n\n[strings]\nHUSTR_1 = \"level 1: congo\"\n",
        )
        .expect("write");

        let settings = Settings::load(Some(&path)).expect("load");
        assert_eq!(settings.mission, GameMission::PackPlut);
        assert_eq!(settings.log_level, "debug");
        // Key case is not significant to string lookups.
        let strings: StringMap = settings.strings.into_iter().collect();
        assert_eq!(strings.lookup("hustr_1"), Some("level 1: congo"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
