//! Plugin metadata and the deferred factory loader.
//!
//! A plugin advertises itself with a small JSON document:
//!
//! ```json
//! {
//!   "IID": "org.veneer.SkinFactory/1.0",
//!   "MetaData": {
//!     "FactoryId": "nord",
//!     "Skins": [ { "Name": "Nord Light", "Scheme": "Light" } ]
//!   }
//! }
//! ```
//!
//! Descriptor files contain nothing but that document. Binary plugins embed
//! it after [`METADATA_MARKER`], terminated by a NUL byte or the end of the
//! file. Probing reads only this metadata; the factory itself is produced
//! later by a [`PluginResolver`].

use std::collections::VecDeque;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;
use veneer_types::{ColorScheme, Result};

use crate::factory::SkinFactory;
use crate::resolver::PluginResolver;

/// Interface id every skin factory plugin must declare.
pub const SKIN_FACTORY_IID: &str = "org.veneer.SkinFactory/1.0";

/// Marker preceding the metadata document inside a binary plugin.
pub const METADATA_MARKER: &[u8] = b"VENEER_PLUGIN_METADATA";

static PLACEHOLDER_IDS: AtomicUsize = AtomicUsize::new(0);

/// The metadata document of one plugin.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginMetadata {
    #[serde(rename = "IID")]
    pub interface_id: String,
    #[serde(rename = "MetaData", default)]
    pub data: FactoryMetadata,
}

/// The factory-specific part of [`PluginMetadata`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FactoryMetadata {
    #[serde(rename = "FactoryId", default)]
    pub factory_id: String,
    #[serde(rename = "Skins", default)]
    pub skins: Vec<SkinEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkinEntry {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Scheme", default)]
    pub scheme: String,
}

impl PluginMetadata {
    /// Extract and parse the metadata from the raw bytes of a plugin file.
    ///
    /// `Ok(None)` means the file carries no metadata at all, which is the
    /// normal case for unrelated files in a plugin directory.
    pub fn parse(bytes: &[u8]) -> Result<Option<Self>> {
        match metadata_slice(bytes) {
            Some(doc) => Ok(Some(serde_json::from_slice(doc)?)),
            None => Ok(None),
        }
    }

    pub fn read(path: &Path) -> Result<Option<Self>> {
        let bytes = fs::read(path)?;
        Self::parse(&bytes)
    }

    pub fn is_skin_factory(&self) -> bool {
        self.interface_id == SKIN_FACTORY_IID
    }
}

/// Locate the JSON document: the whole file when it starts with `{`,
/// otherwise whatever follows the marker up to the next NUL.
fn metadata_slice(bytes: &[u8]) -> Option<&[u8]> {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace())?;
    if bytes[start] == b'{' {
        return Some(&bytes[start..]);
    }

    let marker = bytes
        .windows(METADATA_MARKER.len())
        .position(|w| w == METADATA_MARKER)?;
    let doc = &bytes[marker + METADATA_MARKER.len()..];
    let end = doc.iter().position(|b| *b == 0).unwrap_or(doc.len());
    Some(&doc[..end])
}

/// Id handed to plugins that do not declare one.
fn placeholder_id() -> String {
    let n = PLACEHOLDER_IDS.fetch_add(1, Ordering::Relaxed);
    format!("skin_factory_{n}")
}

/// A probed plugin: its id and advertised skin names, plus what is needed
/// to produce the factory when it is first used.
#[derive(Clone)]
pub struct FactoryLoader {
    path: PathBuf,
    factory_id: String,
    skin_names: Vec<String>,
    resolver: Rc<dyn PluginResolver>,
}

impl FactoryLoader {
    /// Probe the plugin at `path`.
    ///
    /// Returns `Ok(None)` for files that are not skin factory plugins or
    /// that advertise no skins. I/O and JSON errors are returned so the
    /// caller can log them.
    pub fn probe(
        path: &Path,
        active_scheme: ColorScheme,
        resolver: &Rc<dyn PluginResolver>,
    ) -> Result<Option<Self>> {
        let Some(metadata) = PluginMetadata::read(path)? else {
            log::trace!("{}: no plugin metadata", path.display());
            return Ok(None);
        };
        Ok(Self::from_metadata(path, &metadata, active_scheme, resolver))
    }

    /// Build a loader from already parsed metadata.
    ///
    /// Skins whose scheme matches `active_scheme` are moved to the front
    /// one at a time, so they end up in reverse declared order ahead of the
    /// others.
    pub fn from_metadata(
        path: &Path,
        metadata: &PluginMetadata,
        active_scheme: ColorScheme,
        resolver: &Rc<dyn PluginResolver>,
    ) -> Option<Self> {
        if !metadata.is_skin_factory() {
            log::trace!(
                "{}: interface '{}' is not a skin factory",
                path.display(),
                metadata.interface_id
            );
            return None;
        }

        let mut skin_names = VecDeque::new();
        for skin in metadata.data.skins.iter().filter(|skin| !skin.name.is_empty()) {
            if ColorScheme::from_hint(&skin.scheme) == active_scheme {
                skin_names.push_front(skin.name.clone());
            } else {
                skin_names.push_back(skin.name.clone());
            }
        }
        let skin_names = Vec::from(skin_names);

        if skin_names.is_empty() {
            log::debug!("{}: plugin advertises no skins", path.display());
            return None;
        }

        let factory_id = match metadata.data.factory_id.trim() {
            "" => placeholder_id(),
            id => id.to_lowercase(),
        };

        Some(Self {
            path: path.to_path_buf(),
            factory_id,
            skin_names,
            resolver: Rc::clone(resolver),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lowercase factory id.
    pub fn factory_id(&self) -> &str {
        &self.factory_id
    }

    /// Advertised skin names, active-scheme skins first.
    pub fn skin_names(&self) -> &[String] {
        &self.skin_names
    }

    /// Produce the factory. Called once per record, on first use.
    pub fn load(&self) -> Result<Rc<dyn SkinFactory>> {
        self.resolver.resolve(&self.path, &self.factory_id)
    }

    /// Same plugin file and id.
    pub fn is_same_plugin(&self, other: &FactoryLoader) -> bool {
        self.factory_id == other.factory_id && self.path == other.path
    }
}

impl fmt::Debug for FactoryLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryLoader")
            .field("path", &self.path)
            .field("factory_id", &self.factory_id)
            .field("skin_names", &self.skin_names)
            .finish_non_exhaustive()
    }
}
