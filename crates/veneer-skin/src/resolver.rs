//! Turning a probed plugin into a live factory.
//!
//! Probing only reads metadata. When a plugin's factory is first needed the
//! registry hands the plugin path and factory id to a [`PluginResolver`].
//! How the factory is actually produced (a compiled-in constructor, a theme
//! pack on disk, a dynamic library) is up to the resolver.

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use veneer_types::{Result, VeneerError};

use crate::factory::SkinFactory;
use crate::theme::ThemeFactory;

/// Produces the factory behind a probed plugin.
pub trait PluginResolver: Debug {
    fn resolve(&self, path: &Path, factory_id: &str) -> Result<Rc<dyn SkinFactory>>;
}

/// Constructor for a compiled-in factory.
pub type FactoryConstructor = fn() -> Rc<dyn SkinFactory>;

/// Factories linked into the binary, keyed by factory id.
///
/// The plugin file only carries the metadata; the id selects the
/// constructor.
#[derive(Debug, Default)]
pub struct StaticPlugins {
    constructors: HashMap<String, FactoryConstructor>,
}

impl StaticPlugins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constructor. Ids are case-insensitive.
    pub fn register(&mut self, factory_id: &str, constructor: FactoryConstructor) -> &mut Self {
        self.constructors
            .insert(factory_id.to_lowercase(), constructor);
        self
    }

    pub fn contains(&self, factory_id: &str) -> bool {
        self.constructors.contains_key(&factory_id.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl PluginResolver for StaticPlugins {
    fn resolve(&self, _path: &Path, factory_id: &str) -> Result<Rc<dyn SkinFactory>> {
        self.constructors
            .get(&factory_id.to_lowercase())
            .map(|construct| construct())
            .ok_or_else(|| {
                VeneerError::Plugin(format!("no compiled-in factory for '{factory_id}'"))
            })
    }
}

/// Loads the theme pack stored next to the plugin descriptor: same file
/// stem, `.toml` extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThemePackResolver;

impl ThemePackResolver {
    /// Where the theme pack for the descriptor at `path` lives.
    pub fn pack_path(path: &Path) -> PathBuf {
        path.with_extension("toml")
    }
}

impl PluginResolver for ThemePackResolver {
    fn resolve(&self, path: &Path, factory_id: &str) -> Result<Rc<dyn SkinFactory>> {
        let pack = Self::pack_path(path);
        if pack == path {
            return Err(VeneerError::Plugin(format!(
                "{}: descriptor cannot be its own theme pack",
                path.display()
            )));
        }
        let factory = ThemeFactory::from_file(&pack)?;
        if !factory.factory_id().is_empty() && factory.factory_id() != factory_id {
            log::debug!(
                "{}: pack declares id '{}', plugin registered as '{factory_id}'",
                pack.display(),
                factory.factory_id()
            );
        }
        Ok(Rc::new(factory))
    }
}

/// Tries each resolver in turn; the first success wins.
#[derive(Debug, Default)]
pub struct ResolverChain {
    resolvers: Vec<Rc<dyn PluginResolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resolver: Rc<dyn PluginResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    pub fn push(&mut self, resolver: Rc<dyn PluginResolver>) {
        self.resolvers.push(resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl PluginResolver for ResolverChain {
    fn resolve(&self, path: &Path, factory_id: &str) -> Result<Rc<dyn SkinFactory>> {
        let mut errors = Vec::new();
        for resolver in &self.resolvers {
            match resolver.resolve(path, factory_id) {
                Ok(factory) => return Ok(factory),
                Err(e) => errors.push(e.to_string()),
            }
        }
        if errors.is_empty() {
            errors.push("no resolvers configured".to_string());
        }
        Err(VeneerError::Plugin(format!(
            "{factory_id}: {}",
            errors.join("; ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockFactory, write_file};

    fn aurora() -> Rc<dyn SkinFactory> {
        MockFactory::shared("aurora", &["Aurora"])
    }

    #[test]
    fn static_plugins_lookup_is_case_insensitive() {
        let mut plugins = StaticPlugins::new();
        plugins.register("Aurora", aurora);
        assert!(plugins.contains("AURORA"));
        assert_eq!(plugins.len(), 1);

        let factory = plugins.resolve(Path::new("ignored"), "aurora").unwrap();
        assert_eq!(factory.skin_names(), vec!["Aurora".to_string()]);
    }

    #[test]
    fn static_plugins_unknown_id_fails() {
        let plugins = StaticPlugins::new();
        let err = plugins.resolve(Path::new("x"), "ghost").err().unwrap();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn theme_pack_resolver_reads_sibling_pack() {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = dir.path().join("nord.json");
        write_file(
            dir.path(),
            "nord.toml",
            "[pack]\nfactory_id = \"nord\"\n\n[[skin]]\nname = \"Nord\"\nscheme = \"dark\"\n",
        );

        let factory = ThemePackResolver.resolve(&descriptor, "nord").unwrap();
        assert_eq!(factory.skin_names(), vec!["Nord".to_string()]);
    }

    #[test]
    fn theme_pack_resolver_missing_pack_fails() {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = dir.path().join("nord.json");
        assert!(ThemePackResolver.resolve(&descriptor, "nord").is_err());
    }

    #[test]
    fn theme_pack_resolver_refuses_toml_descriptor() {
        let err = ThemePackResolver
            .resolve(Path::new("pack.toml"), "pack")
            .err()
            .unwrap();
        assert!(err.to_string().contains("own theme pack"));
    }

    #[test]
    fn chain_first_success_wins() {
        let mut plugins = StaticPlugins::new();
        plugins.register("aurora", aurora);
        let chain = ResolverChain::new()
            .with(Rc::new(ThemePackResolver))
            .with(Rc::new(plugins));
        assert_eq!(chain.len(), 2);

        let dir = tempfile::tempdir().unwrap();
        let factory = chain
            .resolve(&dir.path().join("aurora.json"), "aurora")
            .unwrap();
        assert_eq!(factory.skin_names(), vec!["Aurora".to_string()]);
    }

    #[test]
    fn chain_collects_errors() {
        let chain = ResolverChain::new()
            .with(Rc::new(StaticPlugins::new()))
            .with(Rc::new(StaticPlugins::new()));
        let msg = chain
            .resolve(Path::new("x.json"), "ghost")
            .err()
            .unwrap()
            .to_string();
        assert_eq!(msg.matches("no compiled-in factory").count(), 2);
    }

    #[test]
    fn empty_chain_fails() {
        let msg = ResolverChain::new()
            .resolve(Path::new("x.json"), "ghost")
            .err()
            .unwrap()
            .to_string();
        assert!(msg.contains("no resolvers configured"));
    }
}
