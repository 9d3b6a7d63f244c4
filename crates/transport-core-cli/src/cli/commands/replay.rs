//! `tc replay` – run decision vector files against the configured policy.

use anyhow::{bail, Result};
use std::path::PathBuf;
use transport_core::config::TcConfig;
use transport_core::vectors::{self, VectorFile};
use transport_core::Policy;

pub fn run_replay(cfg: &TcConfig, paths: &[PathBuf]) -> Result<()> {
    let policy = Policy::from_config(&cfg.engine());
    let mut failed = 0usize;
    for path in paths {
        let file = VectorFile::load(path)?;
        let report = vectors::run(&policy, &file);
        println!(
            "{}: {}/{} passed",
            path.display(),
            report.passed(),
            report.total
        );
        for m in &report.mismatches {
            println!("  FAIL {}: {}", m.name, m.message);
        }
        failed += report.mismatches.len();
    }
    if failed > 0 {
        bail!("{failed} vector case(s) failed");
    }
    Ok(())
}
