use serde::Serialize;

use crate::{Argb, DeferredAction, LevelFlags, LumpName};

/// Archived state of a level that was left while its hub stays active.
///
/// The bytes are opaque here; producing and replaying them belongs to the
/// game-state layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot(pub Vec<u8>);

/// Everything a descriptor lump can say about one map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelInfo {
    pub map_name: LumpName,
    pub level_name: Option<String>,
    pub level_num: i32,
    pub next_map: LumpName,
    pub secret_map: LumpName,
    pub cluster: i32,
    pub sky1: LumpName,
    pub sky2: LumpName,
    pub fade_color: Argb,
    pub outside_fog_color: Argb,
    pub title_patch: LumpName,
    pub par_time: i32,
    pub music: LumpName,
    pub gravity: f32,
    pub air_control: f32,
    pub fade_table: LumpName,
    pub flags: LevelFlags,
    #[serde(skip)]
    pub snapshot: Option<Snapshot>,
    #[serde(skip)]
    pub deferred: Vec<DeferredAction>,
}

impl Default for LevelInfo {
    fn default() -> Self {
        Self {
            map_name: LumpName::default(),
            level_name: None,
            level_num: 0,
            next_map: LumpName::default(),
            secret_map: LumpName::default(),
            cluster: 0,
            sky1: LumpName::default(),
            sky2: LumpName::default(),
            fade_color: Argb::default(),
            outside_fog_color: Argb::NO_FOG,
            title_patch: LumpName::default(),
            par_time: 0,
            music: LumpName::default(),
            gravity: 0.0,
            air_control: 0.0,
            fade_table: LumpName::new("COLORMAP"),
            flags: LevelFlags::empty(),
            snapshot: None,
            deferred: Vec::new(),
        }
    }
}

impl LevelInfo {
    /// Overwrite every descriptor field with the template's, keeping the
    /// snapshot and deferred actions already attached to this level.
    pub fn reset_from(&mut self, template: &LevelInfo) {
        let snapshot = self.snapshot.take();
        let deferred = std::mem::take(&mut self.deferred);
        *self = template.clone();
        self.snapshot = snapshot;
        self.deferred = deferred;
    }

    pub fn display_name(&self) -> &str {
        self.level_name.as_deref().unwrap_or("Unnamed")
    }
}
