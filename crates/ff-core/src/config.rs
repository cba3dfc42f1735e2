use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::file::{DestinationRef, FileKind, Source, SourceKind};

/// Per-source configuration: enablement, last/default destination and
/// the auto-move policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub enabled: bool,
    pub last_destination: Option<DestinationRef>,
    pub auto_move: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            last_destination: None,
            auto_move: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SourceEntry {
    source: Source,
    #[serde(flatten)]
    config: SourceConfig,
}

/// Snapshot of the navigator configuration: one entry per valid
/// (FileKind, SourceKind) pair.
///
/// Enablement invariants (an enabled kind keeps at least one enabled
/// source, the global set never empties) are enforced upstream by the
/// configuration UI; the core merely tolerates an empty enabled set by
/// producing no candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    sources: Vec<SourceEntry>,
}

impl Default for NavigatorConfig {
    /// Every valid pair enabled, no destinations, auto-move off.
    fn default() -> Self {
        let sources = FileKind::ALL
            .iter()
            .flat_map(|kind| {
                kind.source_kinds().iter().map(|source_kind| SourceEntry {
                    source: Source::new(*kind, *source_kind),
                    config: SourceConfig::default(),
                })
            })
            .collect();
        Self { sources }
    }
}

impl NavigatorConfig {
    /// Configuration with every source disabled; enable selectively in
    /// tests and at first run.
    pub fn all_disabled() -> Self {
        let mut config = Self::default();
        for entry in &mut config.sources {
            entry.config.enabled = false;
        }
        config
    }

    pub fn source_config(&self, source: &Source) -> Option<&SourceConfig> {
        self.sources
            .iter()
            .find(|entry| entry.source == *source)
            .map(|entry| &entry.config)
    }

    fn source_config_mut(&mut self, source: &Source) -> Option<&mut SourceConfig> {
        self.sources
            .iter_mut()
            .find(|entry| entry.source == *source)
            .map(|entry| &mut entry.config)
    }

    pub fn is_source_enabled(&self, source: &Source) -> bool {
        self.source_config(source).is_some_and(|c| c.enabled)
    }

    /// A kind is enabled while at least one of its sources is.
    pub fn is_kind_enabled(&self, kind: FileKind) -> bool {
        self.sources
            .iter()
            .any(|entry| entry.source.kind == kind && entry.config.enabled)
    }

    pub fn enabled_media_kinds(&self) -> Vec<FileKind> {
        FileKind::MEDIA
            .into_iter()
            .filter(|kind| self.is_kind_enabled(*kind))
            .collect()
    }

    pub fn enabled_non_media_kinds(&self) -> Vec<FileKind> {
        FileKind::NON_MEDIA
            .into_iter()
            .filter(|kind| self.is_kind_enabled(*kind))
            .collect()
    }

    pub fn enabled_source_kinds(&self, kind: FileKind) -> HashSet<SourceKind> {
        self.sources
            .iter()
            .filter(|entry| entry.source.kind == kind && entry.config.enabled)
            .map(|entry| entry.source.source_kind)
            .collect()
    }

    pub fn last_destination(&self, source: &Source) -> Option<&DestinationRef> {
        self.source_config(source)
            .and_then(|c| c.last_destination.as_ref())
    }

    /// Auto-move destination, present only when the policy is enabled
    /// and a destination has been recorded.
    pub fn auto_move_destination(&self, source: &Source) -> Option<&DestinationRef> {
        self.source_config(source)
            .filter(|c| c.auto_move)
            .and_then(|c| c.last_destination.as_ref())
    }

    pub fn set_enabled(&mut self, source: &Source, enabled: bool) {
        if let Some(config) = self.source_config_mut(source) {
            config.enabled = enabled;
        }
    }

    pub fn set_last_destination(&mut self, source: &Source, destination: DestinationRef) {
        if let Some(config) = self.source_config_mut(source) {
            config.last_destination = Some(destination);
        }
    }

    pub fn set_auto_move(&mut self, source: &Source, auto_move: bool) {
        if let Some(config) = self.source_config_mut(source) {
            config.auto_move = auto_move;
        }
    }
}
