//! MAPINFO block parser.
//!
//! A lump is a sequence of top-level blocks (`map`, `defaultmap`, `cluster`,
//! ...). Each block body is either legacy syntax, a brace-less run of
//! keywords that ends at the next top-level keyword, or modern syntax,
//! `{ key = value, ... }`. The dialect is decided per block by whether a `{`
//! shows up before the first keyword.

use std::str::FromStr;

use log::{debug, trace, warn};
use mapinfo_types::{ClusterFlags, ClusterInfo, LevelFlags, LevelInfo, LumpName, is_numeric};
use strum::EnumString;

use crate::color::parse_color;
use crate::fields::{
    CLUSTER_FIELDS, EPISODE_FIELDS, FieldHandler, FieldKind, LEVEL_FIELDS, Lens, find_field,
};
use crate::lexer::{LexError, Token};
use crate::registry::{Registry, cluster_index_or_insert, level_index_or_insert};
use crate::scanner::Scanner;
use crate::strings::StringTable;

#[derive(Debug, thiserror::Error)]
pub enum MapInfoError {
    #[error("{lump}: {source}")]
    Lex { lump: String, source: LexError },
    #[error("{lump}:{line}: {msg}")]
    Script {
        lump: String,
        line: usize,
        msg: String,
    },
    #[error("could not find level info for map {0}")]
    UnknownLevel(String),
    #[error("could not find level info for level number {0}")]
    UnknownLevelNum(i32),
    #[error("could not find cluster info for cluster {0}")]
    UnknownCluster(i32),
    #[error("Unknown map '{0}' in savegame")]
    UnknownSavedMap(String),
}

/// Keywords that open a block at the top level of a lump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TopLevel {
    Map,
    DefaultMap,
    Cluster,
    ClusterDef,
    Episode,
    ClearEpisodes,
    GameInfo,
    Intermission,
}

impl TopLevel {
    pub fn from_token(tok: &Token) -> Option<Self> {
        if !tok.is_value() {
            return None;
        }
        Self::from_str(tok.text()).ok()
    }
}

/// The record a block writes into. Flags accumulate while the block is
/// parsed and are committed here once it closes.
pub enum Destination<'r> {
    Level(&'r mut LevelInfo),
    Cluster(&'r mut ClusterInfo),
    /// Episode blocks are parsed but not stored.
    Episode,
}

impl Destination<'_> {
    fn commit_flags(self, flags: u32) {
        match self {
            Destination::Level(level) => level.flags = LevelFlags::from_bits_retain(flags),
            Destination::Cluster(cluster) => {
                cluster.flags = ClusterFlags::from_bits_retain(flags)
            }
            Destination::Episode => {}
        }
    }
}

/// Parses the body of one block against a keyword table.
pub(crate) struct BlockParser<'a> {
    scanner: &'a mut Scanner,
    strings: &'a dyn StringTable,
    /// Set once a map has been named by number; `cluster` fields then also
    /// mark the referenced cluster as a hub.
    numbered_maps: bool,
    /// Brace depth. Zero means legacy syntax.
    depth: i32,
    hubs: Vec<i32>,
}

impl<'a> BlockParser<'a> {
    pub(crate) fn new(
        scanner: &'a mut Scanner,
        strings: &'a dyn StringTable,
        numbered_maps: bool,
    ) -> Self {
        Self {
            scanner,
            strings,
            numbered_maps,
            depth: 0,
            hubs: Vec::new(),
        }
    }

    /// Parse one block into `dest`, or discard it when there is none.
    ///
    /// Returns the cluster ids that must be marked as hubs.
    pub(crate) fn parse_block(
        mut self,
        dest: Option<Destination<'_>>,
        flags: u32,
    ) -> Result<Vec<i32>, MapInfoError> {
        match dest {
            None => {
                self.parse_fields::<()>(&[], None, flags)?;
            }
            Some(mut dest) => {
                let flags = match &mut dest {
                    Destination::Level(level) => {
                        self.parse_fields(&LEVEL_FIELDS, Some(&mut **level), flags)?
                    }
                    Destination::Cluster(cluster) => {
                        self.parse_fields(&CLUSTER_FIELDS, Some(&mut **cluster), flags)?
                    }
                    Destination::Episode => {
                        self.parse_fields(&EPISODE_FIELDS, Some(&mut ()), flags)?
                    }
                };
                dest.commit_flags(flags);
            }
        }
        Ok(self.hubs)
    }

    /// Run the field loop until the block ends. Returns the accumulated flags.
    fn parse_fields<R>(
        &mut self,
        table: &[FieldHandler<R>],
        mut record: Option<&mut R>,
        mut flags: u32,
    ) -> Result<u32, MapInfoError> {
        while let Some(tok) = self.scanner.get_token() {
            match tok {
                Token::LBrace => {
                    self.depth += 1;
                    continue;
                }
                Token::RBrace => {
                    self.depth -= 1;
                    if self.depth <= 0 {
                        break;
                    }
                    continue;
                }
                _ => {}
            }

            let entry = if tok.is_value() {
                find_field(table, tok.text())
            } else {
                None
            };

            // A legacy block has no closing brace; it ends where the next
            // top-level block begins. Keywords that are also fields of the
            // active table (`cluster` inside a map) do not end it.
            if self.depth <= 0 && entry.is_none() && TopLevel::from_token(&tok).is_some() {
                self.scanner.unget();
                break;
            }

            let Some(entry) = entry else {
                if self.depth <= 0 {
                    return Err(self
                        .scanner
                        .error(format!("Unknown MAPINFO token \"{}\"", tok.text())));
                }
                warn!(
                    "{}: skipping unknown MAPINFO field \"{}\"",
                    self.scanner.lump(),
                    tok.text()
                );
                skip_unknown_type(self.scanner);
                continue;
            };

            self.apply(&table[entry].kind, record.as_deref_mut(), &mut flags)?;
        }
        Ok(flags)
    }

    fn apply<R>(
        &mut self,
        kind: &FieldKind<R>,
        record: Option<&mut R>,
        flags: &mut u32,
    ) -> Result<(), MapInfoError> {
        if kind.takes_value() {
            self.expect_assign()?;
        }
        match *kind {
            FieldKind::Ignore => {}
            FieldKind::EatNext => {
                self.scanner.must_get_string()?;
            }
            FieldKind::Int(lens) => {
                let value = self.scanner.must_get_number()?;
                store(record, lens, value);
            }
            FieldKind::Float(lens) => {
                let value = self.scanner.must_get_float()?;
                store(record, lens, value);
            }
            FieldKind::Color(lens) => {
                let text = self.scanner.must_get_string()?;
                let color = parse_color(&text).map_err(|e| self.scanner.error(e.to_string()))?;
                store(record, lens, color);
            }
            FieldKind::MapName(lens) => {
                let text = self.scanner.must_get_string()?;
                store(record, lens, LumpName::from_map_token(&text));
            }
            FieldKind::LumpName(lens) => {
                let text = self.scanner.must_get_string()?;
                store(record, lens, LumpName::new(&text));
            }
            FieldKind::LumpNameOrLookup(lens) => {
                let text = self.scanner.must_get_string()?;
                let name = self.lump_name_or_lookup(&text, "")?;
                store(record, lens, name);
            }
            FieldKind::MusicLumpName(lens) => {
                let text = self.scanner.must_get_string()?;
                let name = self.lump_name_or_lookup(&text, "D_")?;
                store(record, lens, name);
            }
            FieldKind::Sky(lens) => {
                let texture = self.scanner.must_get_string()?;
                store(record, lens, LumpName::new(&texture));
                if self.depth > 0 {
                    skip_unknown_params(self.scanner);
                } else {
                    // Scroll speed; sky scrolling is not applied.
                    self.scanner.must_get_float()?;
                }
            }
            FieldKind::SetFlag(bits) => *flags |= bits,
            FieldKind::SetFlagsMasked { set, keep } => *flags = (*flags & keep) | set,
            FieldKind::Cluster(lens) => {
                let id = self.scanner.must_get_number()?;
                store(record, lens, id);
                if self.numbered_maps {
                    self.hubs.push(id);
                }
            }
            FieldKind::String(lens) => {
                let text = self.scanner.must_get_string()?;
                store(record, lens, Some(text));
            }
            FieldKind::FixedString(lens, max) => {
                let text = self.scanner.must_get_string()?;
                store(record, lens, text.chars().take(max).collect());
            }
            FieldKind::StringOrLookup(lens) => {
                let mut text = self.scanner.must_get_string()?;
                if self.scanner.compare("lookup") {
                    if self.depth > 0 {
                        self.scanner.must_get_string_name(",")?;
                    }
                    let key = self.scanner.must_get_string()?;
                    text = lookup(self.scanner, self.strings, &key)?;
                }
                store(record, lens, Some(text));
            }
        }
        Ok(())
    }

    fn expect_assign(&mut self) -> Result<(), MapInfoError> {
        if self.depth > 0 {
            self.scanner.must_get_string_name("=")?;
        }
        Ok(())
    }

    /// A `$KEY` value is resolved through the string table and prefixed;
    /// anything else is taken literally.
    fn lump_name_or_lookup(&self, text: &str, prefix: &str) -> Result<LumpName, MapInfoError> {
        match text.strip_prefix('$') {
            Some(key) => {
                let value = lookup(self.scanner, self.strings, key)?;
                Ok(LumpName::new(&format!("{prefix}{value}")))
            }
            None => Ok(LumpName::new(text)),
        }
    }
}

fn store<R, T>(record: Option<&mut R>, lens: Lens<R, T>, value: T) {
    if let Some(record) = record {
        *lens(record) = value;
    }
}

fn lookup(scanner: &Scanner, strings: &dyn StringTable, key: &str) -> Result<String, MapInfoError> {
    strings
        .lookup(key)
        .map(str::to_string)
        .ok_or_else(|| scanner.error(format!("Unknown lookup string \"{key}\"")))
}

/// Skip an unknown keyword's value list. The keyword itself has already
/// been read. A keyword not followed by `=` is a bare marker.
pub(crate) fn skip_unknown_type(scanner: &mut Scanner) {
    match scanner.get_token() {
        Some(Token::Equals) => {
            scanner.get_token();
            skip_unknown_params(scanner);
        }
        Some(_) => scanner.unget(),
        None => {}
    }
}

/// Skip `, value` pairs following a value that has already been read.
pub(crate) fn skip_unknown_params(scanner: &mut Scanner) {
    while let Some(tok) = scanner.get_token() {
        if tok != Token::Comma {
            scanner.unget();
            return;
        }
        scanner.get_token();
    }
}

/// Drives the top-level blocks of one lump into a registry.
pub(crate) struct LumpParser<'a> {
    scanner: Scanner,
    registry: &'a mut Registry,
    strings: &'a dyn StringTable,
    /// Template copied into each `map` block; replaced by `defaultmap`.
    default_level: LevelInfo,
}

impl<'a> LumpParser<'a> {
    pub(crate) fn new(
        scanner: Scanner,
        registry: &'a mut Registry,
        strings: &'a dyn StringTable,
    ) -> Self {
        Self {
            scanner,
            registry,
            strings,
            default_level: LevelInfo::default(),
        }
    }

    pub(crate) fn run(mut self) -> Result<(), MapInfoError> {
        while let Some(tok) = self.scanner.get_token() {
            let Some(block) = TopLevel::from_token(&tok) else {
                return Err(self
                    .scanner
                    .error(format!("Unknown MAPINFO top-level token {tok}")));
            };
            match block {
                TopLevel::DefaultMap => self.parse_default_map()?,
                TopLevel::Map => self.parse_map()?,
                TopLevel::Cluster | TopLevel::ClusterDef => self.parse_cluster()?,
                TopLevel::Episode => self.parse_episode()?,
                TopLevel::ClearEpisodes => {}
                TopLevel::GameInfo => self.skip_block(block)?,
                TopLevel::Intermission => {
                    self.scanner.must_get_string()?;
                    self.skip_block(block)?;
                }
            }
        }
        Ok(())
    }

    fn parse_default_map(&mut self) -> Result<(), MapInfoError> {
        self.default_level = LevelInfo::default();
        let numbered = self.registry.numbered_maps;
        let hubs = BlockParser::new(&mut self.scanner, self.strings, numbered)
            .parse_block(Some(Destination::Level(&mut self.default_level)), 0)?;
        debug!("{}: defaultmap", self.scanner.lump());
        self.registry.mark_hubs(&hubs);
        Ok(())
    }

    fn parse_map(&mut self) -> Result<(), MapInfoError> {
        let mut flags = self.default_level.flags.bits();
        let name = self.scanner.must_get_string()?;
        if is_numeric(&name) {
            if !self.registry.numbered_maps {
                trace!(
                    "{}: map {name} named by number, enabling numbered-map compatibility",
                    self.scanner.lump()
                );
            }
            self.registry.numbered_maps = true;
            flags |= LevelFlags::NUMBERED_MAP_DEFAULTS.bits();
        }
        let numbered = self.registry.numbered_maps;
        let map_name = LumpName::from_map_token(&name);

        let index = level_index_or_insert(&mut self.registry.levels, &map_name);
        let level = &mut self.registry.levels[index];
        level.reset_from(&self.default_level);
        level.map_name = map_name;

        let mut title = self.scanner.must_get_string()?;
        if self.scanner.compare("lookup") {
            let key = self.scanner.must_get_string()?;
            title = lookup(&self.scanner, self.strings, &key)?;
        }
        level.level_name = Some(title);

        if let Some(num) = level.map_name.map_number() {
            level.level_num = num;
        }

        debug!(
            "{}: map {} \"{}\"",
            self.scanner.lump(),
            level.map_name,
            level.display_name()
        );
        let hubs = BlockParser::new(&mut self.scanner, self.strings, numbered)
            .parse_block(Some(Destination::Level(level)), flags)?;
        self.registry.mark_hubs(&hubs);
        Ok(())
    }

    fn parse_cluster(&mut self) -> Result<(), MapInfoError> {
        let id = self.scanner.must_get_number()?;
        let numbered = self.registry.numbered_maps;
        let index = cluster_index_or_insert(&mut self.registry.clusters, id);
        let cluster = &mut self.registry.clusters[index];
        cluster.cluster = id;

        debug!("{}: cluster {id}", self.scanner.lump());
        let hubs = BlockParser::new(&mut self.scanner, self.strings, numbered)
            .parse_block(Some(Destination::Cluster(cluster)), 0)?;
        self.registry.mark_hubs(&hubs);
        Ok(())
    }

    fn parse_episode(&mut self) -> Result<(), MapInfoError> {
        let map = self.scanner.must_get_string()?;
        let mut teaser = None;
        if self.scanner.get_token().is_some() {
            if self.scanner.compare("teaser") {
                teaser = Some(self.scanner.must_get_string()?);
            } else {
                self.scanner.unget();
            }
        }

        debug!(
            "{}: episode {map}{}",
            self.scanner.lump(),
            teaser.map(|t| format!(" (teaser {t})")).unwrap_or_default()
        );
        let numbered = self.registry.numbered_maps;
        BlockParser::new(&mut self.scanner, self.strings, numbered)
            .parse_block(Some(Destination::Episode), 0)?;
        Ok(())
    }

    /// Parse a block that has no table and no destination.
    fn skip_block(&mut self, block: TopLevel) -> Result<(), MapInfoError> {
        debug!("{}: skipping {block} block", self.scanner.lump());
        let numbered = self.registry.numbered_maps;
        BlockParser::new(&mut self.scanner, self.strings, numbered).parse_block(None, 0)?;
        Ok(())
    }
}
