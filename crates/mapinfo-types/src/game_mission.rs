use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The IWAD family being played, which selects the built-in descriptor lump
/// parsed before any PWAD content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameMission {
    Doom,
    Doom2,
    #[serde(rename = "tnt")]
    #[strum(serialize = "tnt")]
    PackTnt,
    #[serde(rename = "plutonia")]
    #[strum(serialize = "plutonia")]
    PackPlut,
    Chex,
}

impl GameMission {
    pub const fn base_lump_name(self) -> &'static str {
        match self {
            Self::Doom => "_D1NFO",
            Self::Doom2 => "_D2NFO",
            Self::PackTnt => "_TNTNFO",
            Self::PackPlut => "_PLUTNFO",
            Self::Chex => "_CHEXNFO",
        }
    }

    /// Whether maps are numbered `MAPnn` rather than `ExMy`.
    pub const fn uses_mapxx(self) -> bool {
        !matches!(self, Self::Doom | Self::Chex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn base_lumps_are_distinct() {
        let names: Vec<_> = GameMission::iter().map(|m| m.base_lump_name()).collect();
        for (i, a) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(a), "duplicate base lump {a}");
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!(GameMission::from_str("Doom2").ok(), Some(GameMission::Doom2));
        assert_eq!(GameMission::from_str("tnt").ok(), Some(GameMission::PackTnt));
        assert_eq!(
            GameMission::from_str("plutonia").ok(),
            Some(GameMission::PackPlut)
        );
        assert!(GameMission::from_str("heretic").is_err());
    }

    #[test]
    fn display_matches_parse() {
        for m in GameMission::iter() {
            assert_eq!(GameMission::from_str(&m.to_string()).ok(), Some(m));
        }
    }
}
