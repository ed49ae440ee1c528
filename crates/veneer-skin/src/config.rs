//! Skin manager configuration.
//!
//! Read from the environment or from a TOML file; never written back.

use std::collections::HashSet;
use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use veneer_types::{ColorScheme, Result, VeneerError};

/// Application-specific plugin search path list.
pub const SKIN_PATH_ENV: &str = "VENEER_SKIN_PATH";
/// Generic plugin search path list, searched after [`SKIN_PATH_ENV`].
pub const PLUGIN_PATH_ENV: &str = "VENEER_PLUGIN_PATH";
/// `light` or `dark`; used to order each plugin's skins.
pub const COLOR_SCHEME_ENV: &str = "VENEER_COLOR_SCHEME";

/// Subdirectory of each search path that holds skin plugins.
pub const SKINS_SUBDIR: &str = "skins";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Plugin search paths, before canonicalization.
    pub plugin_paths: Vec<PathBuf>,
    /// Scheme that skins are ordered for while probing.
    pub color_scheme: ColorScheme,
    /// Factory ids that scans must not register.
    pub denied_factories: Vec<String>,
}

impl ManagerConfig {
    pub fn from_env() -> Self {
        let mut plugin_paths = path_list_from_env(SKIN_PATH_ENV);
        plugin_paths.extend(path_list_from_env(PLUGIN_PATH_ENV));
        let color_scheme = env::var(COLOR_SCHEME_ENV)
            .map(|hint| ColorScheme::from_hint(&hint))
            .unwrap_or_default();
        Self {
            plugin_paths,
            color_scheme,
            denied_factories: Vec::new(),
        }
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| VeneerError::Config(format!("manager config: {e}")))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .map_err(|e| VeneerError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&source)
            .map_err(|e| VeneerError::Config(format!("{}: {e}", path.display())))
    }
}

/// Split the path list in environment variable `name`.
pub fn path_list_from_env(name: &str) -> Vec<PathBuf> {
    env::var_os(name)
        .map(|value| split_path_list(&value))
        .unwrap_or_default()
}

/// Split a platform path list (`:` or `;` separated), dropping empty
/// segments.
pub fn split_path_list(value: &OsStr) -> Vec<PathBuf> {
    env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

/// Canonical form of `path`, or `None` if it does not resolve.
pub fn canonical_path(path: &Path) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        return None;
    }
    fs::canonicalize(path).ok()
}

/// Canonicalize every path, dropping failures and later duplicates.
pub fn canonical_paths<I, P>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter_map(|p| canonical_path(p.as_ref()))
        .filter(|p| seen.insert(p.clone()))
        .collect()
}
