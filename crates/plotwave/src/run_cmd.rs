use anyhow::Result;
use pw_config::PlotConfig;
use pw_core::PlotError;
use pw_process::{ProcessLauncher, locate_executable};
use pw_scheduler::WaveScheduler;
use tracing::info;

use crate::telemetry;

/// Execute one full scheduling round.
///
/// `--dry-run` prints the trace instead; nothing is spawned and no time
/// passes, so the executable does not need to be installed.
pub async fn run(mut config: PlotConfig, dry_run: bool) -> Result<()> {
    if dry_run {
        config.dry_run = true;
        return crate::plan_cmd::plan(config);
    }

    // Fail start-up before any directory is created if the collaborator
    // that actually runs jobs is unavailable.
    let executable = locate_executable(&config.executable)?;
    info!(executable = %executable.display(), "using plot executable");

    telemetry::report_best_effort(&config);

    let scheduler = WaveScheduler::new(config, executable)?;
    let pool_size = scheduler.config().fast_concurrency as usize
        + scheduler.config().capacity_pool.len();
    let launcher = ProcessLauncher::new(pool_size);

    tokio::select! {
        result = drive(&scheduler, &launcher) => {
            let total = result?;
            println!("Round complete: {total} plot jobs dispatched and finished.");
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            // No checkpoint to write; a restart begins a fresh round.
            Err(PlotError::Interrupted.into())
        }
    }
}

async fn drive(scheduler: &WaveScheduler, launcher: &ProcessLauncher) -> Result<u32> {
    let total = scheduler.run(launcher).await?;
    info!(total, "all launches dispatched, waiting for outstanding jobs");
    launcher.drain().await?;
    Ok(total)
}
