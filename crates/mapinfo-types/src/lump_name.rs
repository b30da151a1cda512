use std::fmt;

use serde::Serialize;

/// Maximum number of characters in a WAD lump name.
pub const LUMP_NAME_LEN: usize = 8;

/// An uppercase lump or map name, silently truncated to [`LUMP_NAME_LEN`]
/// characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LumpName(String);

impl LumpName {
    pub fn new(name: &str) -> Self {
        Self(
            name.chars()
                .take(LUMP_NAME_LEN)
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        )
    }

    /// Build a map name from a descriptor token: a purely numeric token
    /// becomes `MAPnn`, anything else is stored as written.
    pub fn from_map_token(token: &str) -> Self {
        if is_numeric(token) {
            Self::numbered(token.parse::<i64>().unwrap_or(i64::MAX))
        } else {
            Self::new(token)
        }
    }

    /// `MAPnn` for the given map number, zero padded to two digits.
    pub fn numbered(num: i64) -> Self {
        Self::new(&format!("MAP{num:02}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive comparison over the first eight characters.
    pub fn matches(&self, name: &str) -> bool {
        name.chars()
            .take(LUMP_NAME_LEN)
            .map(|c| c.to_ascii_uppercase())
            .eq(self.0.chars())
    }

    /// The level ordinal encoded by a `MAPnn` name, if it lies in `1..=99`.
    ///
    /// Only names of at most five characters qualify, so `MAP01A` or
    /// `MAP100` yield `None`.
    pub fn map_number(&self) -> Option<i32> {
        if self.0.len() > 5 || !self.0.starts_with("MAP") {
            return None;
        }
        let digits: String = self.0[3..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        let num = digits.parse::<i32>().ok()?;
        (1..=99).contains(&num).then_some(num)
    }
}

impl fmt::Display for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LumpName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// True for a non-empty run of ASCII digits.
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Name of the map lump for an episode/level pair: `MAPnn` for games that
/// number maps continuously, `ExMy` otherwise.
pub fn calc_map_name(mapxx: bool, episode: u8, level: u8) -> LumpName {
    if mapxx {
        LumpName::numbered(level.into())
    } else {
        LumpName::new(&format!("E{episode}M{level}"))
    }
}
