//! Plugin directory scanning.
//!
//! A scan probes every regular file of one directory, in file name order,
//! and registers the accepted plugins with a [`FactoryMap`]. Nothing found
//! in a directory can fail the scan: unreadable files, foreign files,
//! denied ids, and duplicates are counted and logged, then skipped.

use std::fs;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use veneer_types::ColorScheme;

use crate::factory_map::FactoryMap;
use crate::loader::FactoryLoader;
use crate::resolver::PluginResolver;

/// Which plugins a scan may register.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPolicy {
    denied: Vec<String>,
}

impl ScanPolicy {
    /// A policy rejecting the given factory ids (case-insensitive).
    pub fn new<I, S>(denied: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            denied: denied
                .into_iter()
                .map(|id| id.as_ref().trim().to_lowercase())
                .filter(|id| !id.is_empty())
                .collect(),
        }
    }

    pub fn is_denied(&self, factory_id: &str) -> bool {
        self.denied.iter().any(|d| d == factory_id)
    }

    pub fn denied(&self) -> &[String] {
        &self.denied
    }
}

/// Counters from one or more scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Directories that existed and were listed.
    pub directories: usize,
    /// Files whose metadata was read.
    pub probed: usize,
    pub registered: usize,
    /// Files that are not usable skin plugins, or whose id is denied.
    pub rejected: usize,
    /// Plugins whose id was already registered.
    pub skipped: usize,
}

impl AddAssign for ScanReport {
    fn add_assign(&mut self, other: Self) {
        self.directories += other.directories;
        self.probed += other.probed;
        self.registered += other.registered;
        self.rejected += other.rejected;
        self.skipped += other.skipped;
    }
}

/// Probes plugin directories into a [`FactoryMap`].
pub struct PluginScanner<'a> {
    scheme: ColorScheme,
    policy: &'a ScanPolicy,
    resolver: &'a Rc<dyn PluginResolver>,
}

impl<'a> PluginScanner<'a> {
    /// `scheme` decides which skins each plugin lists first; `resolver`
    /// is handed to every accepted loader.
    pub fn new(
        scheme: ColorScheme,
        policy: &'a ScanPolicy,
        resolver: &'a Rc<dyn PluginResolver>,
    ) -> Self {
        Self {
            scheme,
            policy,
            resolver,
        }
    }

    /// Scan `dir` and register what it holds.
    pub fn scan(&self, dir: &Path, map: &mut FactoryMap) -> ScanReport {
        let mut report = ScanReport::default();
        let Some(candidates) = candidates(dir) else {
            return report;
        };
        report.directories = 1;

        for path in candidates {
            report.probed += 1;
            let loader = match FactoryLoader::probe(&path, self.scheme, self.resolver) {
                Ok(Some(loader)) => loader,
                Ok(None) => {
                    report.rejected += 1;
                    continue;
                },
                Err(e) => {
                    log::debug!("{}: {e}", path.display());
                    report.rejected += 1;
                    continue;
                },
            };

            if self.policy.is_denied(loader.factory_id()) {
                log::debug!(
                    "{}: factory '{}' is denied",
                    path.display(),
                    loader.factory_id()
                );
                report.rejected += 1;
                continue;
            }
            if map.has_factory(loader.factory_id()) {
                log::debug!(
                    "{}: factory '{}' already registered",
                    path.display(),
                    loader.factory_id()
                );
                report.skipped += 1;
                continue;
            }

            log::debug!(
                "found skin factory '{}' in {} ({} skins)",
                loader.factory_id(),
                path.display(),
                loader.skin_names().len()
            );
            map.register_loader(loader);
            report.registered += 1;
        }

        report
    }
}

/// Regular files directly inside `dir`, sorted by name. `None` when the
/// directory cannot be listed.
fn candidates(dir: &Path) -> Option<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("skipping plugin directory {}: {e}", dir.display());
            return None;
        },
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Some(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticPlugins;
    use crate::test_utils::{descriptor, write_file};

    fn resolver() -> Rc<dyn PluginResolver> {
        Rc::new(StaticPlugins::new())
    }

    #[test]
    fn missing_directory_is_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let policy = ScanPolicy::default();
        let resolver = resolver();
        let mut map = FactoryMap::new();
        let report = PluginScanner::new(ColorScheme::Unknown, &policy, &resolver)
            .scan(&dir.path().join("absent"), &mut map);
        assert_eq!(report, ScanReport::default());
        assert!(map.is_empty());
    }

    #[test]
    fn scan_registers_plugins_and_rejects_others() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.json", &descriptor("alpha", &[("Alpha", "")]));
        write_file(dir.path(), "b.json", &descriptor("beta", &[("Beta", "")]));
        write_file(dir.path(), "notes.txt", "not a plugin");
        write_file(dir.path(), "broken.json", "{ nope");
        fs::create_dir(dir.path().join("subdir")).unwrap();
        write_file(
            &dir.path().join("subdir"),
            "c.json",
            &descriptor("gamma", &[("Gamma", "")]),
        );

        let policy = ScanPolicy::default();
        let resolver = resolver();
        let mut map = FactoryMap::new();
        let report =
            PluginScanner::new(ColorScheme::Unknown, &policy, &resolver).scan(dir.path(), &mut map);

        assert_eq!(report.directories, 1);
        assert_eq!(report.probed, 4);
        assert_eq!(report.registered, 2);
        assert_eq!(report.rejected, 2);
        assert_eq!(map.skin_names(), ["Alpha", "Beta"]);
        assert!(!map.has_factory("gamma"));
    }

    #[test]
    fn first_file_wins_shared_skin_name() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "20-late.json", &descriptor("late", &[("Y", "")]));
        write_file(dir.path(), "10-early.json", &descriptor("early", &[("Y", "")]));

        let policy = ScanPolicy::default();
        let resolver = resolver();
        let mut map = FactoryMap::new();
        PluginScanner::new(ColorScheme::Unknown, &policy, &resolver).scan(dir.path(), &mut map);

        assert_eq!(map.skin_names(), ["Y"]);
        assert_eq!(map.owner_of("Y"), Some("early"));
    }

    #[test]
    fn duplicate_ids_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.json", &descriptor("Same", &[("One", "")]));
        write_file(dir.path(), "b.json", &descriptor("same", &[("Two", "")]));

        let policy = ScanPolicy::default();
        let resolver = resolver();
        let mut map = FactoryMap::new();
        let report =
            PluginScanner::new(ColorScheme::Unknown, &policy, &resolver).scan(dir.path(), &mut map);

        assert_eq!(report.registered, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(map.skin_names(), ["One"]);
    }

    #[test]
    fn denied_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.json", &descriptor("Blocked", &[("B", "")]));
        write_file(dir.path(), "b.json", &descriptor("open", &[("O", "")]));

        let policy = ScanPolicy::new(["BLOCKED", ""]);
        assert_eq!(policy.denied(), ["blocked"]);
        let resolver = resolver();
        let mut map = FactoryMap::new();
        let report =
            PluginScanner::new(ColorScheme::Unknown, &policy, &resolver).scan(dir.path(), &mut map);

        assert_eq!(report.rejected, 1);
        assert_eq!(map.skin_names(), ["O"]);
    }

    #[test]
    fn scheme_orders_names_within_factory() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "pair.json",
            &descriptor("pair", &[("Day", "Light"), ("Night", "Dark")]),
        );

        let policy = ScanPolicy::default();
        let resolver = resolver();
        let mut map = FactoryMap::new();
        PluginScanner::new(ColorScheme::Dark, &policy, &resolver).scan(dir.path(), &mut map);
        assert_eq!(map.skin_names(), ["Night", "Day"]);
    }

    #[test]
    fn reports_accumulate() {
        let mut total = ScanReport {
            directories: 1,
            probed: 3,
            registered: 2,
            rejected: 1,
            skipped: 0,
        };
        total += ScanReport {
            directories: 1,
            probed: 1,
            registered: 0,
            rejected: 0,
            skipped: 1,
        };
        assert_eq!(total.directories, 2);
        assert_eq!(total.probed, 4);
        assert_eq!(total.skipped, 1);
    }
}
