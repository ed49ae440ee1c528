//! Skin factory registry for Veneer.
//!
//! Skins are produced by factories. Factories come from two places: the
//! application registers them directly, or they are discovered as plugins
//! under the configured search paths. Discovery only reads each plugin's
//! metadata; the plugin itself is resolved the first time one of its skins
//! is requested.
//!
//! [`SkinManager`] ties the pieces together and [`with_skin_manager`] gives
//! access to the per-thread instance.

pub mod builtin;
pub mod config;
pub mod factory;
pub mod factory_map;
pub mod loader;
pub mod manager;
pub mod resolver;
pub mod scanner;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::ManagerConfig;
pub use factory::{Skin, SkinFactory};
pub use factory_map::{FactoryInfo, FactoryKind, FactoryMap, ManualFactory};
pub use loader::{FactoryLoader, PluginMetadata, SKIN_FACTORY_IID};
pub use manager::{SkinManager, with_skin_manager};
pub use resolver::{PluginResolver, ResolverChain, StaticPlugins, ThemePackResolver};
pub use scanner::{PluginScanner, ScanPolicy, ScanReport};
pub use theme::{ThemeFactory, ThemePack, ThemeSkin};
