//! Shared test helpers for veneer-skin tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::factory::{Skin, SkinFactory};
use crate::loader::SKIN_FACTORY_IID;

/// Plugin descriptor JSON for `factory_id` advertising `(name, scheme)` skins.
pub fn descriptor(factory_id: &str, skins: &[(&str, &str)]) -> String {
    let skins: Vec<serde_json::Value> = skins
        .iter()
        .map(|(name, scheme)| serde_json::json!({ "Name": name, "Scheme": scheme }))
        .collect();
    serde_json::json!({
        "IID": SKIN_FACTORY_IID,
        "MetaData": { "FactoryId": factory_id, "Skins": skins },
    })
    .to_string()
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// A minimal skin that remembers which factory made it.
#[derive(Debug)]
#[allow(dead_code)]
pub struct MockSkin {
    pub name: String,
    pub factory: String,
}

impl Skin for MockSkin {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A factory with a fixed name list.
pub struct MockFactory {
    pub tag: String,
    pub names: Vec<String>,
}

impl MockFactory {
    pub fn new(tag: &str, names: &[&str]) -> Self {
        Self {
            tag: tag.to_string(),
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn shared(tag: &str, names: &[&str]) -> Rc<dyn SkinFactory> {
        Rc::new(Self::new(tag, names))
    }
}

impl SkinFactory for MockFactory {
    fn skin_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn create_skin(&self, name: &str) -> Option<Box<dyn Skin>> {
        if !self.names.iter().any(|n| n == name) {
            return None;
        }
        Some(Box::new(MockSkin {
            name: name.to_string(),
            factory: self.tag.clone(),
        }))
    }
}
