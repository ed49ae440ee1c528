//! Registered factories and the skin name index.
//!
//! Records are kept in registration order. The name index (skin name to
//! owning factory id) is rebuilt lazily: every mutation only marks it
//! invalid, and the next query recomputes it. Manual factories are indexed
//! before plugin factories; within each group the first factory to
//! advertise a name owns it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::{Rc, Weak};

use crate::factory::SkinFactory;
use crate::loader::FactoryLoader;

/// A factory registered by the application.
#[derive(Clone)]
pub enum ManualFactory {
    /// Owned elsewhere. Once the owner drops it, it stops contributing.
    Borrowed(Weak<dyn SkinFactory>),
    /// Owned by the registry.
    Adopted(Rc<dyn SkinFactory>),
}

impl ManualFactory {
    pub fn borrowed(factory: &Rc<dyn SkinFactory>) -> Self {
        ManualFactory::Borrowed(Rc::downgrade(factory))
    }

    pub fn adopted(factory: Rc<dyn SkinFactory>) -> Self {
        ManualFactory::Adopted(factory)
    }

    /// The factory, unless a borrowed one has been dropped.
    pub fn get(&self) -> Option<Rc<dyn SkinFactory>> {
        match self {
            ManualFactory::Borrowed(weak) => weak.upgrade(),
            ManualFactory::Adopted(rc) => Some(Rc::clone(rc)),
        }
    }

    fn is_same(&self, other: &ManualFactory) -> bool {
        match (self, other) {
            (ManualFactory::Borrowed(a), ManualFactory::Borrowed(b)) => Weak::ptr_eq(a, b),
            (ManualFactory::Adopted(a), ManualFactory::Adopted(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn kind(&self) -> FactoryKind {
        match self {
            ManualFactory::Borrowed(_) => FactoryKind::Borrowed,
            ManualFactory::Adopted(_) => FactoryKind::Adopted,
        }
    }
}

/// Resolution state of a plugin record.
enum PluginState {
    /// Probed, factory not produced yet.
    Unbound,
    Bound(Rc<dyn SkinFactory>),
    /// The resolver failed; not retried until the record is replaced.
    Failed,
}

enum FactoryRecord {
    Manual(ManualFactory),
    Plugin {
        loader: FactoryLoader,
        state: PluginState,
    },
}

struct FactoryEntry {
    id: String,
    record: FactoryRecord,
}

impl FactoryEntry {
    fn is_plugin(&self) -> bool {
        matches!(self.record, FactoryRecord::Plugin { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryKind {
    Borrowed,
    Adopted,
    Plugin,
}

impl FactoryKind {
    pub fn label(self) -> &'static str {
        match self {
            FactoryKind::Borrowed => "borrowed",
            FactoryKind::Adopted => "adopted",
            FactoryKind::Plugin => "plugin",
        }
    }
}

/// Snapshot of one registered factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryInfo {
    pub id: String,
    pub kind: FactoryKind,
    /// Plugin file, for plugin records.
    pub path: Option<PathBuf>,
    /// A live factory object exists: always for adopted records, while the
    /// owner keeps it alive for borrowed ones, after resolution for plugins.
    pub instantiated: bool,
    pub skin_names: Vec<String>,
}

/// Factory records plus the lazily rebuilt skin name index.
#[derive(Default)]
pub struct FactoryMap {
    entries: Vec<FactoryEntry>,
    skin_map: HashMap<String, String>,
    skin_names: Vec<String>,
    valid: bool,
}

impl FactoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an application factory under `id` (already lowercase).
    ///
    /// Re-registering the same instance is a no-op. A different factory
    /// replaces the record in place.
    pub fn register_manual(&mut self, id: &str, factory: ManualFactory) {
        match self.position(id) {
            Some(i) => {
                if let FactoryRecord::Manual(existing) = &self.entries[i].record
                    && existing.is_same(&factory)
                {
                    return;
                }
                self.entries[i].record = FactoryRecord::Manual(factory);
            },
            None => self.entries.push(FactoryEntry {
                id: id.to_string(),
                record: FactoryRecord::Manual(factory),
            }),
        }
        log::debug!("registered factory '{id}'");
        self.invalidate();
    }

    /// Register a probed plugin under its own factory id.
    pub fn register_loader(&mut self, loader: FactoryLoader) {
        let id = loader.factory_id().to_string();
        let position = self.position(&id);
        if let Some(i) = position
            && let FactoryRecord::Plugin { loader: existing, .. } = &self.entries[i].record
            && existing.is_same_plugin(&loader)
        {
            return;
        }

        let record = FactoryRecord::Plugin {
            loader,
            state: PluginState::Unbound,
        };
        match position {
            Some(i) => self.entries[i].record = record,
            None => self.entries.push(FactoryEntry { id, record }),
        }
        self.invalidate();
    }

    /// Remove the record for `id`. Returns whether one existed.
    pub fn unregister(&mut self, id: &str) -> bool {
        let Some(i) = self.position(id) else {
            return false;
        };
        self.entries.remove(i);
        if self.valid && self.skin_map.values().any(|owner| owner == id) {
            self.invalidate();
        }
        log::debug!("unregistered factory '{id}'");
        true
    }

    /// Drop every plugin record, keeping application factories.
    /// Returns how many were removed.
    pub fn remove_plugins(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_plugin());
        let removed = before - self.entries.len();
        if removed > 0 {
            self.invalidate();
        }
        removed
    }

    /// Drop every record.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.invalidate();
    }

    pub fn has_factory(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the name index is up to date.
    pub fn is_valid(&self) -> bool {
        self.valid && !self.lost_owner()
    }

    /// All skin names, in precedence order.
    pub fn skin_names(&mut self) -> &[String] {
        self.ensure_valid();
        &self.skin_names
    }

    /// Id of the factory that owns `skin_name`.
    pub fn owner_of(&mut self, skin_name: &str) -> Option<&str> {
        self.ensure_valid();
        self.skin_map.get(skin_name).map(String::as_str)
    }

    /// The factory owning `skin_name`, producing plugin factories on first
    /// use.
    pub fn resolve_factory(&mut self, skin_name: &str) -> Option<Rc<dyn SkinFactory>> {
        self.ensure_valid();
        let owner = self.skin_map.get(skin_name)?;
        let entry = self.entries.iter_mut().find(|e| &e.id == owner)?;

        match &mut entry.record {
            FactoryRecord::Manual(manual) => manual.get(),
            FactoryRecord::Plugin { loader, state } => {
                if let PluginState::Unbound = state {
                    *state = match loader.load() {
                        Ok(factory) => {
                            log::info!(
                                "loaded skin factory '{}' from {}",
                                entry.id,
                                loader.path().display()
                            );
                            PluginState::Bound(factory)
                        },
                        Err(e) => {
                            log::warn!("cannot load skin factory '{}': {e}", entry.id);
                            PluginState::Failed
                        },
                    };
                }
                match state {
                    PluginState::Bound(factory) => Some(Rc::clone(factory)),
                    PluginState::Unbound | PluginState::Failed => None,
                }
            },
        }
    }

    /// Snapshot of every record in registration order.
    pub fn factories(&self) -> Vec<FactoryInfo> {
        self.entries
            .iter()
            .map(|entry| match &entry.record {
                FactoryRecord::Manual(manual) => {
                    let live = manual.get();
                    FactoryInfo {
                        id: entry.id.clone(),
                        kind: manual.kind(),
                        path: None,
                        instantiated: live.is_some(),
                        skin_names: live.map(|f| f.skin_names()).unwrap_or_default(),
                    }
                },
                FactoryRecord::Plugin { loader, state } => FactoryInfo {
                    id: entry.id.clone(),
                    kind: FactoryKind::Plugin,
                    path: Some(loader.path().to_path_buf()),
                    instantiated: matches!(state, PluginState::Bound(_)),
                    skin_names: loader.skin_names().to_vec(),
                },
            })
            .collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn invalidate(&mut self) {
        self.valid = false;
    }

    fn ensure_valid(&mut self) {
        if !self.valid || self.lost_owner() {
            self.rebuild();
        }
    }

    /// A borrowed factory that owns indexed names was dropped after the
    /// last rebuild.
    fn lost_owner(&self) -> bool {
        self.entries.iter().any(|entry| {
            matches!(
                &entry.record,
                FactoryRecord::Manual(ManualFactory::Borrowed(weak)) if weak.strong_count() == 0
            ) && self.skin_map.values().any(|owner| *owner == entry.id)
        })
    }

    fn rebuild(&mut self) {
        self.skin_map.clear();
        self.skin_names.clear();

        let manual_entries = self.entries.iter().filter(|e| !e.is_plugin());
        let plugin_entries = self.entries.iter().filter(|e| e.is_plugin());

        for entry in manual_entries.chain(plugin_entries) {
            let names = match &entry.record {
                FactoryRecord::Manual(manual) => match manual.get() {
                    Some(factory) => factory.skin_names(),
                    None => {
                        log::trace!("factory '{}' has been dropped", entry.id);
                        continue;
                    },
                },
                FactoryRecord::Plugin { loader, .. } => loader.skin_names().to_vec(),
            };
            for name in names {
                if self.skin_map.contains_key(&name) {
                    log::trace!("skin '{name}' already owned, ignoring '{}'", entry.id);
                    continue;
                }
                self.skin_map.insert(name.clone(), entry.id.clone());
                self.skin_names.push(name);
            }
        }

        self.valid = true;
    }
}
