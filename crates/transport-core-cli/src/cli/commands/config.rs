//! `tc config` – show where configuration lives and what is in effect.

use anyhow::Result;
use std::path::Path;
use transport_core::config::{self, TcConfig};

pub fn run_config(cfg: &TcConfig, explicit: Option<&Path>) -> Result<()> {
    match explicit {
        Some(p) => println!("# config: {}", p.display()),
        None => println!("# config: {}", config::config_path()?.display()),
    }
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
