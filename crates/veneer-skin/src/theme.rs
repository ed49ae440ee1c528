//! TOML theme packs.
//!
//! A theme pack is one TOML file holding any number of skins:
//!
//! ```toml
//! [pack]
//! factory_id = "nord"
//!
//! [[skin]]
//! name = "Nord Light"
//! scheme = "light"
//!
//! [skin.palette]
//! background = "#ECEFF4"
//!
//! [skin.boxes.button]
//! gradient = { kind = "vertical", stops = [{ offset = 0.0, color = "#88C0D0" }] }
//! ```
//!
//! A [`ThemeFactory`] serves the skins of one pack.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use veneer_types::{BoxStyle, Color, ColorScheme, Result, VeneerError};

use crate::factory::{Skin, SkinFactory};

/// Raw contents of a theme pack file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemePack {
    #[serde(default)]
    pub pack: PackHeader,
    #[serde(default, rename = "skin")]
    pub skins: Vec<ThemeDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackHeader {
    #[serde(default)]
    pub factory_id: String,
    #[serde(default)]
    pub description: String,
}

/// One skin of a pack.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeDefinition {
    pub name: String,
    #[serde(default)]
    pub scheme: ColorScheme,
    #[serde(default)]
    pub palette: BTreeMap<String, Color>,
    #[serde(default)]
    pub boxes: BTreeMap<String, BoxStyle>,
}

impl ThemePack {
    /// Parse a pack. `origin` names the source in error messages.
    pub fn from_toml(source: &str, origin: &str) -> Result<Self> {
        let pack: ThemePack =
            toml::from_str(source).map_err(|e| VeneerError::Skin(format!("{origin}: {e}")))?;
        if let Some(i) = pack.skins.iter().position(|s| s.name.trim().is_empty()) {
            return Err(VeneerError::Skin(format!(
                "{origin}: skin #{} has an empty name",
                i + 1
            )));
        }
        Ok(pack)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .map_err(|e| VeneerError::Skin(format!("{}: {e}", path.display())))?;
        Self::from_toml(&source, &path.display().to_string())
    }
}

/// A skin defined by a theme pack.
#[derive(Debug, Clone)]
pub struct ThemeSkin {
    definition: ThemeDefinition,
}

impl ThemeSkin {
    pub fn new(definition: ThemeDefinition) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &ThemeDefinition {
        &self.definition
    }
}

impl Skin for ThemeSkin {
    fn name(&self) -> &str {
        &self.definition.name
    }

    fn color_scheme(&self) -> ColorScheme {
        self.definition.scheme
    }

    fn color(&self, role: &str) -> Option<Color> {
        self.definition.palette.get(role).copied()
    }

    fn palette(&self) -> Vec<(String, Color)> {
        self.definition
            .palette
            .iter()
            .map(|(role, color)| (role.clone(), *color))
            .collect()
    }

    fn box_style(&self, element: &str) -> Option<&BoxStyle> {
        self.definition.boxes.get(element)
    }

    fn styled_elements(&self) -> Vec<String> {
        self.definition.boxes.keys().cloned().collect()
    }
}

/// Serves the skins of one theme pack. When a pack repeats a skin name the
/// first definition wins.
#[derive(Debug, Clone)]
pub struct ThemeFactory {
    header: PackHeader,
    themes: Vec<ThemeDefinition>,
}

impl ThemeFactory {
    pub fn new(pack: ThemePack) -> Self {
        let mut themes: Vec<ThemeDefinition> = Vec::with_capacity(pack.skins.len());
        for skin in pack.skins {
            if themes.iter().any(|t| t.name == skin.name) {
                log::debug!("theme pack repeats skin '{}', keeping the first", skin.name);
                continue;
            }
            themes.push(skin);
        }
        Self {
            header: pack.pack,
            themes,
        }
    }

    pub fn from_toml(source: &str, origin: &str) -> Result<Self> {
        ThemePack::from_toml(source, origin).map(Self::new)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        ThemePack::from_file(path).map(Self::new)
    }

    /// Lowercase id declared by the pack, empty when it declares none.
    pub fn factory_id(&self) -> String {
        self.header.factory_id.trim().to_lowercase()
    }

    pub fn description(&self) -> &str {
        &self.header.description
    }

    pub fn themes(&self) -> &[ThemeDefinition] {
        &self.themes
    }
}

impl SkinFactory for ThemeFactory {
    fn skin_names(&self) -> Vec<String> {
        self.themes.iter().map(|t| t.name.clone()).collect()
    }

    fn create_skin(&self, name: &str) -> Option<Box<dyn Skin>> {
        self.themes
            .iter()
            .find(|t| t.name == name)
            .map(|t| Box::new(ThemeSkin::new(t.clone())) as Box<dyn Skin>)
    }
}
