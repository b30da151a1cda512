use serde::Serialize;

use crate::{ClusterFlags, LumpName};

/// A group of maps sharing intermission text and, for hubs, saved state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterInfo {
    pub cluster: i32,
    pub enter_text: Option<String>,
    pub exit_text: Option<String>,
    pub message_music: LumpName,
    pub finale_flat: LumpName,
    pub flags: ClusterFlags,
}

impl ClusterInfo {
    pub fn new(cluster: i32) -> Self {
        Self {
            cluster,
            ..Self::default()
        }
    }

    pub fn is_hub(&self) -> bool {
        self.flags.contains(ClusterFlags::HUB)
    }
}
