use anyhow::{Result, bail};
use pw_config::PlotConfig;
use std::path::Path;

/// Write a default configuration file; refuses to clobber an existing one.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }
    PlotConfig::default().save(path)?;
    println!("Wrote {}", path.display());
    println!("Edit the device paths, then check the result with `plotwave plan`.");
    Ok(())
}
