//! `veneer-skins`: inspect the skins visible to a Veneer application.
//!
//! Search paths come from `VENEER_SKIN_PATH` and `VENEER_PLUGIN_PATH`
//! (or a TOML file given with `--config`). The built-in skins are always
//! registered.

mod commands;

use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};

use commands::Command;
use veneer_skin::builtin::{self, DEFAULT_FACTORY_ID};
use veneer_skin::{ManagerConfig, SkinManager};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config = match take_config_flag(&mut args)? {
        Some(path) => ManagerConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ManagerConfig::from_env(),
    };
    let command = Command::parse(&args)?;

    let mut manager = SkinManager::with_config(&config);
    let factory = builtin::default_factory().context("loading built-in skins")?;
    manager.adopt_factory(DEFAULT_FACTORY_ID, Rc::new(factory));
    log::debug!(
        "{} plugin path(s): {:?}",
        manager.plugin_paths().len(),
        manager.plugin_paths()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&command, &mut manager, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Strip `--config <file>` from `args`.
fn take_config_flag(args: &mut Vec<String>) -> Result<Option<PathBuf>> {
    let Some(i) = args.iter().position(|a| a == "--config") else {
        return Ok(None);
    };
    if i + 1 >= args.len() {
        anyhow::bail!("--config needs a file argument");
    }
    let path = PathBuf::from(args.remove(i + 1));
    args.remove(i);
    Ok(Some(path))
}
