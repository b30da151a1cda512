pub mod argb;
pub mod cluster_info;
pub mod deferred;
pub mod game_mission;
pub mod level_flags;
pub mod level_info;
pub mod lump_name;

pub use argb::Argb;
pub use cluster_info::ClusterInfo;
pub use deferred::{DeferredAction, DeferredKind};
pub use game_mission::GameMission;
pub use level_flags::{ClusterFlags, LevelFlags};
pub use level_info::{LevelInfo, Snapshot};
pub use lump_name::{LUMP_NAME_LEN, LumpName, calc_map_name, is_numeric};
