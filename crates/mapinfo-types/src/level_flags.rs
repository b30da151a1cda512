use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Per-level behavior flags (`LEVEL_*` constants).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
    pub struct LevelFlags: u32 {
        const NOINTERMISSION     = 0x0000_0001;
        const DOUBLESKY          = 0x0000_0004;
        const NOSOUNDCLIPPING    = 0x0000_0008;
        const MAP07SPECIAL       = 0x0000_0010;
        const BRUISERSPECIAL     = 0x0000_0020;
        const CYBORGSPECIAL      = 0x0000_0040;
        const SPIDERSPECIAL      = 0x0000_0080;
        const SPECLOWERFLOOR     = 0x0000_0100;
        const SPECOPENDOOR       = 0x0000_0200;
        const SPECACTIONSMASK    = 0x0000_0300;
        const MONSTERSTELEFRAG   = 0x0000_0400;
        const EVENLIGHTING       = 0x0000_0800;
        const SNDSEQTOTALCTRL    = 0x0000_1000;
        const FORCENOSKYSTRETCH  = 0x0000_2000;
        const JUMP_NO            = 0x0000_4000;
        const JUMP_YES           = 0x0000_8000;
        const FREELOOK_NO        = 0x0001_0000;
        const FREELOOK_YES       = 0x0002_0000;
        const STARTLIGHTNING     = 0x0100_0000;
        const FILTERSTARTS       = 0x0200_0000;
        const LOBBYSPECIAL       = 0x0400_0000;
        const DEFINEDINMAPINFO   = 0x2000_0000;
        const CHANGEMAPCHEAT     = 0x4000_0000;
        const VISITED            = 0x8000_0000;
    }
}

impl LevelFlags {
    /// Flags implied by a map header that names its map by number only.
    /// Such content predates the per-map keywords and expects these on.
    pub const NUMBERED_MAP_DEFAULTS: Self = Self::NOINTERMISSION
        .union(Self::EVENLIGHTING)
        .union(Self::SNDSEQTOTALCTRL);
}

bitflags! {
    /// Cluster flags (`CLUSTER_*` constants).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
    pub struct ClusterFlags: u32 {
        const HUB = 0x0000_0001;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_action_mask_covers_both_actions() {
        assert_eq!(
            LevelFlags::SPECACTIONSMASK,
            LevelFlags::SPECLOWERFLOOR | LevelFlags::SPECOPENDOOR
        );
    }

    #[test]
    fn values() {
        assert_eq!(LevelFlags::NOINTERMISSION.bits(), 0x0000_0001);
        assert_eq!(LevelFlags::JUMP_YES.bits(), 0x0000_8000);
        assert_eq!(LevelFlags::LOBBYSPECIAL.bits(), 0x0400_0000);
        assert_eq!(LevelFlags::VISITED.bits(), 0x8000_0000);
        assert_eq!(ClusterFlags::HUB.bits(), 1);
    }

    #[test]
    fn numbered_map_defaults() {
        assert_eq!(LevelFlags::NUMBERED_MAP_DEFAULTS.bits(), 0x0000_1801);
    }
}
