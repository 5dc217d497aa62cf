use anyhow::Result;
use pw_config::PlotConfig;
use pw_scheduler::WaveScheduler;
use std::path::PathBuf;

/// Print the decision trace for a configuration without committing any
/// resources. The executable is used as-written and not resolved, so a
/// plan works on machines where the plotter is not installed.
pub fn plan(config: PlotConfig) -> Result<()> {
    let executable = PathBuf::from(&config.executable);
    let scheduler = WaveScheduler::new(config, executable)?;
    println!("{}", scheduler.describe());
    println!();
    println!("Check the commands above, then start for real with `plotwave run`.");
    Ok(())
}
