//! `oppmap init`: write a commented default configuration file.

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::config::default_config_toml;

pub fn init_config(force: bool) -> Result<()> {
    let path = Path::new("oppmap.toml");
    if path.exists() && !force {
        bail!("oppmap.toml already exists (use --force to overwrite)");
    }
    fs::write(path, default_config_toml())?;
    println!("Wrote {}", path.display());
    Ok(())
}
