use pw_core::PlotError;

use crate::config::PlotConfig;

/// Validate a plot configuration before any directory is touched.
/// Returns the first violation found, with a message naming the field.
pub fn validate_config(config: &PlotConfig) -> Result<(), PlotError> {
    validate_job_params(config)?;
    validate_pools(config)?;
    validate_cadence(config)?;
    Ok(())
}

fn validate_job_params(config: &PlotConfig) -> Result<(), PlotError> {
    if config.plot_k == 0 {
        return Err(PlotError::invalid("plot_k must be > 0"));
    }
    if config.plots_per_job == 0 {
        return Err(PlotError::invalid("plots_per_job must be > 0"));
    }
    if config.buffer_mib == 0 {
        return Err(PlotError::invalid("buffer_mib must be > 0"));
    }
    if config.threads == 0 {
        return Err(PlotError::invalid("threads must be > 0"));
    }
    Ok(())
}

fn validate_pools(config: &PlotConfig) -> Result<(), PlotError> {
    if config.fast_pool.is_empty() {
        return Err(PlotError::invalid("fast_pool must list at least one path"));
    }
    if config.fast_concurrency == 0 {
        return Err(PlotError::invalid("fast_concurrency must be > 0"));
    }
    if config.capacity_pool.is_empty() {
        return Err(PlotError::invalid(
            "capacity_pool must list at least one path",
        ));
    }
    // A one-disk ring would pair each capacity device with itself.
    if config.capacity_ring && config.capacity_pool.len() < 2 {
        return Err(PlotError::invalid(
            "capacity_ring requires at least 2 capacity_pool paths \
             (a single disk cannot plot into itself)",
        ));
    }
    Ok(())
}

fn validate_cadence(config: &PlotConfig) -> Result<(), PlotError> {
    if config.launch_interval_min == 0 {
        return Err(PlotError::invalid("launch_interval_min must be > 0"));
    }
    let wave_min = config.capacity_pool.len() as u64 * config.launch_interval_min;
    if config.round_min < wave_min {
        return Err(PlotError::invalid(format!(
            "round_min ({}) is shorter than one full wave of staggered launches \
             ({} disks * {} min = {} min)",
            config.round_min,
            config.capacity_pool.len(),
            config.launch_interval_min,
            wave_min
        )));
    }
    Ok(())
}
