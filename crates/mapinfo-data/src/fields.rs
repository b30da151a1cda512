//! Keyword tables for the three kinds of MAPINFO block.
//!
//! Each entry binds a keyword to a [`FieldKind`] describing how many tokens
//! follow it and which record field receives the value. Field access goes
//! through a [`Lens`] chosen when the table is built, so one parse loop can
//! fill levels, clusters and episodes alike.
//!
//! Table order matters: lookups return the first matching keyword, so the
//! second `par` entry in [`LEVEL_FIELDS`] is never reached.

use mapinfo_types::{Argb, ClusterFlags, ClusterInfo, LevelFlags, LevelInfo, LumpName};

/// Borrow one field of a record.
pub type Lens<R, T> = fn(&mut R) -> &mut T;

pub enum FieldKind<R> {
    /// Recognized keyword with no value and no effect.
    Ignore,
    /// Known keyword whose single value is read and discarded.
    EatNext,
    Int(Lens<R, i32>),
    Float(Lens<R, f32>),
    Color(Lens<R, Argb>),
    /// Map name; a bare number becomes `MAPnn`.
    MapName(Lens<R, LumpName>),
    LumpName(Lens<R, LumpName>),
    /// Lump name, or `$KEY` resolved through the string table.
    LumpNameOrLookup(Lens<R, LumpName>),
    /// Like [`FieldKind::LumpNameOrLookup`], but looked-up names gain the
    /// `D_` music prefix.
    MusicLumpName(Lens<R, LumpName>),
    /// Sky texture. The trailing scroll speed is parsed and discarded.
    Sky(Lens<R, LumpName>),
    SetFlag(u32),
    /// `flags = (flags & keep) | set`
    SetFlagsMasked {
        set: u32,
        keep: u32,
    },
    /// Cluster number; in numbered-map mode it also marks that cluster a hub.
    Cluster(Lens<R, i32>),
    String(Lens<R, Option<String>>),
    /// String truncated to at most the given number of characters.
    FixedString(Lens<R, String>, usize),
    /// String, or `lookup <key>` resolved through the string table.
    StringOrLookup(Lens<R, Option<String>>),
}

impl<R> FieldKind<R> {
    /// Whether the modern dialect requires `=` before this field's value.
    pub fn takes_value(&self) -> bool {
        !matches!(
            self,
            FieldKind::Ignore | FieldKind::SetFlag(_) | FieldKind::SetFlagsMasked { .. }
        )
    }
}

pub struct FieldHandler<R> {
    pub keyword: &'static str,
    pub kind: FieldKind<R>,
}

/// Index of the first entry whose keyword matches `word`, ignoring case.
pub fn find_field<R>(table: &[FieldHandler<R>], word: &str) -> Option<usize> {
    table
        .iter()
        .position(|h| h.keyword.eq_ignore_ascii_case(word))
}

const fn set(flag: LevelFlags) -> FieldKind<LevelInfo> {
    FieldKind::SetFlag(flag.bits())
}

const fn masked(set: LevelFlags, clear: LevelFlags) -> FieldKind<LevelInfo> {
    FieldKind::SetFlagsMasked {
        set: set.bits(),
        keep: !clear.bits(),
    }
}

const fn level(keyword: &'static str, kind: FieldKind<LevelInfo>) -> FieldHandler<LevelInfo> {
    FieldHandler { keyword, kind }
}

const fn cluster(keyword: &'static str, kind: FieldKind<ClusterInfo>) -> FieldHandler<ClusterInfo> {
    FieldHandler { keyword, kind }
}

const fn episode(keyword: &'static str, kind: FieldKind<()>) -> FieldHandler<()> {
    FieldHandler { keyword, kind }
}

pub static LEVEL_FIELDS: [FieldHandler<LevelInfo>; 47] = [
    level("levelnum", FieldKind::Int(|l| &mut l.level_num)),
    level("next", FieldKind::MapName(|l| &mut l.next_map)),
    level("secretnext", FieldKind::MapName(|l| &mut l.secret_map)),
    level("cluster", FieldKind::Cluster(|l| &mut l.cluster)),
    level("sky1", FieldKind::Sky(|l| &mut l.sky1)),
    level("sky2", FieldKind::Sky(|l| &mut l.sky2)),
    level("fade", FieldKind::Color(|l| &mut l.fade_color)),
    level("outsidefog", FieldKind::Color(|l| &mut l.outside_fog_color)),
    level("titlepatch", FieldKind::LumpName(|l| &mut l.title_patch)),
    level("par", FieldKind::Int(|l| &mut l.par_time)),
    level("music", FieldKind::MusicLumpName(|l| &mut l.music)),
    level("nointermission", set(LevelFlags::NOINTERMISSION)),
    level("doublesky", set(LevelFlags::DOUBLESKY)),
    level("nosoundclipping", set(LevelFlags::NOSOUNDCLIPPING)),
    level("allowmonstertelefrags", set(LevelFlags::MONSTERSTELEFRAG)),
    level("map07special", set(LevelFlags::MAP07SPECIAL)),
    level("baronspecial", set(LevelFlags::BRUISERSPECIAL)),
    level("cyberdemonspecial", set(LevelFlags::CYBORGSPECIAL)),
    level("spidermastermindspecial", set(LevelFlags::SPIDERSPECIAL)),
    level(
        "specialaction_exitlevel",
        masked(LevelFlags::empty(), LevelFlags::SPECACTIONSMASK),
    ),
    level(
        "specialaction_opendoor",
        masked(LevelFlags::SPECOPENDOOR, LevelFlags::SPECACTIONSMASK),
    ),
    level(
        "specialaction_lowerfloor",
        masked(LevelFlags::SPECLOWERFLOOR, LevelFlags::SPECACTIONSMASK),
    ),
    level("lightning", FieldKind::Ignore),
    level("fadetable", FieldKind::LumpName(|l| &mut l.fade_table)),
    level("evenlighting", set(LevelFlags::EVENLIGHTING)),
    level("noautosequences", set(LevelFlags::SNDSEQTOTALCTRL)),
    level("forcenoskystretch", set(LevelFlags::FORCENOSKYSTRETCH)),
    level(
        "allowfreelook",
        masked(LevelFlags::FREELOOK_YES, LevelFlags::FREELOOK_NO),
    ),
    level(
        "nofreelook",
        masked(LevelFlags::FREELOOK_NO, LevelFlags::FREELOOK_YES),
    ),
    level("allowjump", masked(LevelFlags::JUMP_YES, LevelFlags::JUMP_NO)),
    level("nojump", masked(LevelFlags::JUMP_NO, LevelFlags::JUMP_YES)),
    level("cdtrack", FieldKind::EatNext),
    level("cd_start_track", FieldKind::EatNext),
    level("cd_end1_track", FieldKind::EatNext),
    level("cd_end2_track", FieldKind::EatNext),
    level("cd_end3_track", FieldKind::EatNext),
    level("cd_intermission_track", FieldKind::EatNext),
    level("cd_title_track", FieldKind::EatNext),
    level("warptrans", FieldKind::EatNext),
    level("gravity", FieldKind::Float(|l| &mut l.gravity)),
    level("aircontrol", FieldKind::Float(|l| &mut l.air_control)),
    level("islobby", set(LevelFlags::LOBBYSPECIAL)),
    level("lobby", set(LevelFlags::LOBBYSPECIAL)),
    level("nocrouch", FieldKind::Ignore),
    level("intermusic", FieldKind::EatNext),
    level("par", FieldKind::EatNext),
    level("sucktime", FieldKind::EatNext),
];

pub static CLUSTER_FIELDS: [FieldHandler<ClusterInfo>; 5] = [
    cluster("entertext", FieldKind::StringOrLookup(|c| &mut c.enter_text)),
    cluster("exittext", FieldKind::StringOrLookup(|c| &mut c.exit_text)),
    cluster("music", FieldKind::MusicLumpName(|c| &mut c.message_music)),
    cluster("flat", FieldKind::LumpNameOrLookup(|c| &mut c.finale_flat)),
    cluster("hub", FieldKind::SetFlag(ClusterFlags::HUB.bits())),
];

/// Episode blocks are parsed for syntax only; nothing is stored.
pub static EPISODE_FIELDS: [FieldHandler<()>; 7] = [
    episode("name", FieldKind::EatNext),
    episode("lookup", FieldKind::EatNext),
    episode("picname", FieldKind::EatNext),
    episode("key", FieldKind::EatNext),
    episode("remove", FieldKind::Ignore),
    episode("noskillmenu", FieldKind::Ignore),
    episode("optional", FieldKind::Ignore),
];
