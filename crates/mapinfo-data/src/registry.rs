//! Level and cluster registries.
//!
//! A [`Registry`] owns every level and cluster introduced by the parsed
//! lumps. Later lumps layer onto the same records: a block naming an
//! existing map or cluster reuses its slot.

use log::{debug, info};
use mapinfo_types::{ClusterFlags, ClusterInfo, DeferredAction, LevelInfo, LumpName, Snapshot};

use crate::parser::{LumpParser, MapInfoError};
use crate::scanner::Scanner;
use crate::sources::Lump;
use crate::strings::StringTable;

#[derive(Debug, Default)]
pub struct Registry {
    pub(crate) levels: Vec<LevelInfo>,
    pub(crate) clusters: Vec<ClusterInfo>,
    /// A map was named by number somewhere in the loaded lumps.
    pub(crate) numbered_maps: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the registry, then parse each lump in order.
    ///
    /// The first error aborts the load; records parsed before it are kept.
    pub fn parse_all(&mut self, lumps: &[Lump], strings: &dyn StringTable) -> Result<(), MapInfoError> {
        self.clear();
        for lump in lumps {
            self.parse_lump(&lump.data, &lump.name, strings)?;
        }
        Ok(())
    }

    /// Parse one lump on top of whatever is already registered.
    pub fn parse_lump(
        &mut self,
        data: &str,
        name: &str,
        strings: &dyn StringTable,
    ) -> Result<(), MapInfoError> {
        info!("parsing {name}");
        let scanner = Scanner::new(data, name)?;
        LumpParser::new(scanner, self, strings).run()?;
        debug!(
            "{name}: {} level(s), {} cluster(s) registered",
            self.levels.len(),
            self.clusters.len()
        );
        Ok(())
    }

    /// Drop every level and cluster, along with their snapshots and
    /// deferred actions.
    pub fn clear(&mut self) {
        self.levels.clear();
        self.clusters.clear();
        self.numbered_maps = false;
    }

    pub fn levels(&self) -> &[LevelInfo] {
        &self.levels
    }

    pub fn clusters(&self) -> &[ClusterInfo] {
        &self.clusters
    }

    /// Whether any loaded lump named a map by number.
    pub fn numbered_maps(&self) -> bool {
        self.numbered_maps
    }

    pub fn find_level_index(&self, name: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.map_name.matches(name))
    }

    pub fn find_cluster_index(&self, id: i32) -> Option<usize> {
        self.clusters.iter().position(|c| c.cluster == id)
    }

    pub fn find_level_info(&self, name: &str) -> Result<&LevelInfo, MapInfoError> {
        self.find_level_index(name)
            .map(|i| &self.levels[i])
            .ok_or_else(|| MapInfoError::UnknownLevel(name.to_string()))
    }

    pub fn find_level_by_num(&self, num: i32) -> Result<&LevelInfo, MapInfoError> {
        self.levels
            .iter()
            .find(|l| l.level_num == num)
            .ok_or(MapInfoError::UnknownLevelNum(num))
    }

    pub fn find_cluster_info(&self, id: i32) -> Result<&ClusterInfo, MapInfoError> {
        self.find_cluster_index(id)
            .map(|i| &self.clusters[i])
            .ok_or(MapInfoError::UnknownCluster(id))
    }

    fn level_mut(&mut self, name: &str) -> Option<&mut LevelInfo> {
        let index = self.find_level_index(name)?;
        Some(&mut self.levels[index])
    }

    /// Mark clusters as hubs, creating any that are not registered yet.
    pub(crate) fn mark_hubs(&mut self, ids: &[i32]) {
        for &id in ids {
            let index = cluster_index_or_insert(&mut self.clusters, id);
            self.clusters[index].flags |= ClusterFlags::HUB;
        }
    }

    /// Store the archived state of a level that is being left.
    pub fn attach_snapshot(&mut self, name: &str, snapshot: Snapshot) -> Result<(), MapInfoError> {
        let level = self
            .level_mut(name)
            .ok_or_else(|| MapInfoError::UnknownLevel(name.to_string()))?;
        level.snapshot = Some(snapshot);
        Ok(())
    }

    /// Detach and return a level's snapshot, if it has one.
    pub fn take_snapshot(&mut self, name: &str) -> Result<Option<Snapshot>, MapInfoError> {
        let level = self
            .level_mut(name)
            .ok_or_else(|| MapInfoError::UnknownLevel(name.to_string()))?;
        Ok(level.snapshot.take())
    }

    pub fn clear_snapshots(&mut self) {
        for level in &mut self.levels {
            level.snapshot = None;
        }
    }

    /// Replace all snapshots with those read back from a saved game.
    pub fn restore_snapshots<I>(&mut self, entries: I) -> Result<(), MapInfoError>
    where
        I: IntoIterator<Item = (String, Snapshot)>,
    {
        self.clear_snapshots();
        for (name, snapshot) in entries {
            let level = self
                .level_mut(&name)
                .ok_or_else(|| MapInfoError::UnknownSavedMap(name.clone()))?;
            level.snapshot = Some(snapshot);
        }
        Ok(())
    }

    /// Queue a script action to run when the named level is next entered.
    pub fn defer_action(&mut self, name: &str, action: DeferredAction) -> Result<(), MapInfoError> {
        let level = self
            .level_mut(name)
            .ok_or_else(|| MapInfoError::UnknownLevel(name.to_string()))?;
        level.deferred.push(action);
        Ok(())
    }

    /// Remove and return the actions queued for a level.
    pub fn take_defereds(&mut self, name: &str) -> Result<Vec<DeferredAction>, MapInfoError> {
        let level = self
            .level_mut(name)
            .ok_or_else(|| MapInfoError::UnknownLevel(name.to_string()))?;
        Ok(std::mem::take(&mut level.deferred))
    }

    pub fn remove_defereds(&mut self) {
        for level in &mut self.levels {
            level.deferred.clear();
        }
    }

    /// Replace all deferred actions with those read back from a saved game.
    pub fn restore_defereds<I>(&mut self, entries: I) -> Result<(), MapInfoError>
    where
        I: IntoIterator<Item = (String, Vec<DeferredAction>)>,
    {
        self.remove_defereds();
        for (name, actions) in entries {
            let level = self
                .level_mut(&name)
                .ok_or_else(|| MapInfoError::UnknownSavedMap(name.clone()))?;
            level.deferred = actions;
        }
        Ok(())
    }
}

/// Index of the level named `name`, appending a defaulted record if absent.
pub(crate) fn level_index_or_insert(levels: &mut Vec<LevelInfo>, name: &LumpName) -> usize {
    if let Some(index) = levels.iter().position(|l| l.map_name.matches(name.as_str())) {
        return index;
    }
    levels.push(LevelInfo {
        map_name: name.clone(),
        ..LevelInfo::default()
    });
    levels.len() - 1
}

/// Index of cluster `id`, appending an empty record if absent.
pub(crate) fn cluster_index_or_insert(clusters: &mut Vec<ClusterInfo>, id: i32) -> usize {
    if let Some(index) = clusters.iter().position(|c| c.cluster == id) {
        return index;
    }
    clusters.push(ClusterInfo::new(id));
    clusters.len() - 1
}
