//! Environment diagnostics for plotwave.

use anyhow::Result;
use pw_config::{PlotConfig, validate_config};
use pw_process::locate_executable;
use std::path::Path;

/// Run full environment diagnostics against a loaded configuration.
pub fn run_doctor(config: &PlotConfig) -> Result<()> {
    println!("=== Plot Executable ===");
    match locate_executable(&config.executable) {
        Ok(path) => println!("  {} -> {}", config.executable, path.display()),
        Err(e) => println!("  MISSING: {e}"),
    }
    println!();

    println!("=== Configuration ===");
    match validate_config(config) {
        Ok(()) => println!("  valid"),
        Err(e) => println!("  INVALID: {e}"),
    }
    println!(
        "  k={} plots_per_job={} buffer={} MiB threads={}",
        config.plot_k, config.plots_per_job, config.buffer_mib, config.threads
    );
    println!(
        "  cadence: {} min stagger, {} min round ({} min left after one wave)",
        config.launch_interval_min,
        config.round_min,
        config.round_remainder().as_secs() / 60
    );
    println!(
        "  fast concurrency {} over {} fast path(s), {} capacity disk(s), ring {}",
        config.fast_concurrency,
        config.fast_pool.len(),
        config.capacity_pool.len(),
        if config.capacity_ring { "on" } else { "off" }
    );
    println!();

    println!("=== Device Directories ===");
    for path in config.fast_pool.iter().chain(config.capacity_pool.iter()) {
        print_device_status(path);
    }

    Ok(())
}

fn print_device_status(device: &Path) {
    let status = |p: &Path| if p.is_dir() { "ok" } else { "absent" };
    println!(
        "  {}: t {} / f {}",
        device.display(),
        status(&device.join("t")),
        status(&device.join("f"))
    );
}
