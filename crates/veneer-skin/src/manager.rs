//! The skin manager: search paths, registered factories, skin creation.
//!
//! Plugins under the search paths are scanned lazily, the first time a
//! skin is asked for. Changing the search paths forgets every factory;
//! changing anything else that affects probing drops only the plugin
//! records. Either way the next query scans again.
//!
//! The manager is single-threaded. [`with_skin_manager`] gives each thread
//! its own instance, seeded from the environment on first use.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use veneer_types::ColorSchemeSource;

use crate::config::{self, ManagerConfig, SKINS_SUBDIR};
use crate::factory::{Skin, SkinFactory};
use crate::factory_map::{FactoryInfo, FactoryMap, ManualFactory};
use crate::resolver::{PluginResolver, ThemePackResolver};
use crate::scanner::{PluginScanner, ScanPolicy, ScanReport};

thread_local! {
    static SKIN_MANAGER: RefCell<SkinManager> = RefCell::new(SkinManager::from_env());
}

/// Run `f` with this thread's skin manager.
///
/// # Panics
///
/// Panics if called again from inside `f`.
pub fn with_skin_manager<R>(f: impl FnOnce(&mut SkinManager) -> R) -> R {
    SKIN_MANAGER.with_borrow_mut(f)
}

pub struct SkinManager {
    plugin_paths: Vec<PathBuf>,
    factory_map: FactoryMap,
    plugins_registered: bool,
    scheme_source: Box<dyn ColorSchemeSource>,
    policy: ScanPolicy,
    resolver: Rc<dyn PluginResolver>,
    stats: ScanReport,
}

impl SkinManager {
    /// A manager with no search paths, resolving plugins as theme packs.
    pub fn new() -> Self {
        Self {
            plugin_paths: Vec::new(),
            factory_map: FactoryMap::new(),
            plugins_registered: false,
            scheme_source: Box::new(veneer_types::ColorScheme::Unknown),
            policy: ScanPolicy::default(),
            resolver: Rc::new(ThemePackResolver),
            stats: ScanReport::default(),
        }
    }

    pub fn with_config(config: &ManagerConfig) -> Self {
        let mut manager = Self::new();
        manager.scheme_source = Box::new(config.color_scheme);
        manager.policy = ScanPolicy::new(&config.denied_factories);
        manager.set_plugin_paths(&config.plugin_paths);
        manager
    }

    /// A manager configured from `VENEER_SKIN_PATH`, `VENEER_PLUGIN_PATH`
    /// and `VENEER_COLOR_SCHEME`.
    pub fn from_env() -> Self {
        Self::with_config(&ManagerConfig::from_env())
    }

    // -- search paths --

    /// Canonical search paths, in search order.
    pub fn plugin_paths(&self) -> &[PathBuf] {
        &self.plugin_paths
    }

    /// Append a search path. Paths that do not resolve, or that are already
    /// present, are ignored. If plugins have already been scanned, the new
    /// path is scanned right away.
    pub fn add_plugin_path(&mut self, path: impl AsRef<Path>) {
        let Some(path) = config::canonical_path(path.as_ref()) else {
            log::debug!("ignoring plugin path {}", path.as_ref().display());
            return;
        };
        if self.plugin_paths.contains(&path) {
            return;
        }
        self.plugin_paths.push(path.clone());
        if self.plugins_registered {
            self.register_plugins(&path);
        }
    }

    /// Remove a search path. Returns whether it was present.
    ///
    /// Once plugins have been scanned, removing a path forgets every
    /// factory, including the ones registered by the application.
    pub fn remove_plugin_path(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let target = config::canonical_path(path).unwrap_or_else(|| path.to_path_buf());
        let Some(i) = self.plugin_paths.iter().position(|p| *p == target) else {
            return false;
        };
        self.plugin_paths.remove(i);
        if self.plugins_registered {
            self.reset_factories();
        }
        true
    }

    /// Replace the search paths and forget every registered factory.
    /// Nothing happens when the canonical list is unchanged.
    pub fn set_plugin_paths<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let paths = config::canonical_paths(paths);
        if paths != self.plugin_paths {
            self.plugin_paths = paths;
            self.reset_factories();
        }
    }

    // -- probing inputs --

    /// Change where the active color scheme comes from. Plugin skin order
    /// depends on it, so plugins are scanned again on the next query.
    pub fn set_color_scheme_source(&mut self, source: Box<dyn ColorSchemeSource>) {
        self.scheme_source = source;
        self.invalidate_plugins();
    }

    /// Change how plugins are turned into factories. Already resolved
    /// plugins are dropped.
    pub fn set_resolver(&mut self, resolver: Rc<dyn PluginResolver>) {
        self.resolver = resolver;
        self.invalidate_plugins();
    }

    pub fn set_scan_policy(&mut self, policy: ScanPolicy) {
        self.policy = policy;
        self.invalidate_plugins();
    }

    // -- factories --

    /// Register a factory owned by the caller. The manager only keeps a weak
    /// reference; once the caller drops the factory its skins disappear.
    /// An empty id is ignored.
    pub fn register_factory(&mut self, factory_id: &str, factory: &Rc<dyn SkinFactory>) {
        if let Some(id) = normalize_id(factory_id) {
            self.factory_map
                .register_manual(&id, ManualFactory::borrowed(factory));
        }
    }

    /// Register a factory and hand its ownership to the manager.
    pub fn adopt_factory(&mut self, factory_id: &str, factory: Rc<dyn SkinFactory>) {
        if let Some(id) = normalize_id(factory_id) {
            self.factory_map
                .register_manual(&id, ManualFactory::adopted(factory));
        }
    }

    /// Remove a factory, application-registered or plugin. Returns whether
    /// one was removed.
    pub fn unregister_factory(&mut self, factory_id: &str) -> bool {
        let Some(id) = normalize_id(factory_id) else {
            return false;
        };
        self.ensure_plugins();
        self.factory_map.unregister(&id)
    }

    /// Remove every factory. Plugins are not scanned again until the
    /// search paths change.
    pub fn unregister_factories(&mut self) {
        self.factory_map.reset();
    }

    pub fn factories(&mut self) -> Vec<FactoryInfo> {
        self.ensure_plugins();
        self.factory_map.factories()
    }

    // -- skins --

    /// Every known skin name, in precedence order.
    pub fn skin_names(&mut self) -> Vec<String> {
        self.ensure_plugins();
        self.factory_map.skin_names().to_vec()
    }

    /// Create the skin called `skin_name`. When no factory can create it,
    /// the known skins are tried in precedence order and the first one
    /// that can be created is returned.
    pub fn create_skin(&mut self, skin_name: &str) -> Option<Box<dyn Skin>> {
        self.ensure_plugins();

        if let Some(skin) = self.try_create(skin_name) {
            return Some(skin);
        }
        let candidates = self.factory_map.skin_names().to_vec();
        for name in candidates.iter().filter(|name| name.as_str() != skin_name) {
            if let Some(skin) = self.try_create(name) {
                log::debug!("no skin '{skin_name}', falling back to '{name}'");
                return Some(skin);
            }
        }
        None
    }

    /// Cumulative counters of every scan since the manager was created.
    pub fn scan_stats(&self) -> ScanReport {
        self.stats
    }

    /// Scan all search paths unless that already happened.
    pub fn ensure_plugins(&mut self) {
        if self.plugins_registered {
            return;
        }
        let paths = self.plugin_paths.clone();
        for path in &paths {
            self.register_plugins(path);
        }
        self.plugins_registered = true;
        log::info!(
            "skin plugins scanned: {} path(s), {} factories",
            paths.len(),
            self.factory_map.len()
        );
    }

    fn try_create(&mut self, skin_name: &str) -> Option<Box<dyn Skin>> {
        self.factory_map.resolve_factory(skin_name)?.create_skin(skin_name)
    }

    fn register_plugins(&mut self, path: &Path) {
        let dir = path.join(SKINS_SUBDIR);
        let scheme = self.scheme_source.color_scheme();
        let scanner = PluginScanner::new(scheme, &self.policy, &self.resolver);
        let report = scanner.scan(&dir, &mut self.factory_map);
        self.stats += report;
    }

    fn reset_factories(&mut self) {
        self.factory_map.reset();
        self.plugins_registered = false;
    }

    fn invalidate_plugins(&mut self) {
        self.factory_map.remove_plugins();
        self.plugins_registered = false;
    }
}

impl Default for SkinManager {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_id(factory_id: &str) -> Option<String> {
    let id = factory_id.trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_lowercase())
    }
}
