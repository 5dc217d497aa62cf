use anyhow::Result;
use pw_config::{PlotConfig, validate_config};
use pw_core::PlotError;
use pw_process::JobLauncher;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::plan::{PauseKind, WavePlan};
use crate::slots::{DeviceSlot, prepare_slot};

/// The wave scheduler: owns the validated configuration and the prepared
/// device slots, and hands out plans over them.
///
/// All state is fixed at construction; `generate`, `describe`, and `run`
/// can be called any number of times and always see the same sequence.
#[derive(Debug)]
pub struct WaveScheduler {
    config: PlotConfig,
    executable: PathBuf,
    fast: Vec<DeviceSlot>,
    capacity: Vec<DeviceSlot>,
}

impl WaveScheduler {
    /// Validate the configuration, then prepare every slot directory.
    /// Validation runs first so a bad config never touches the filesystem.
    pub fn new(config: PlotConfig, executable: PathBuf) -> Result<Self, PlotError> {
        validate_config(&config)?;

        let fast = config
            .fast_pool
            .iter()
            .map(|p| prepare_slot(p))
            .collect::<Result<Vec<_>, _>>()?;
        let capacity = config
            .capacity_pool
            .iter()
            .map(|p| prepare_slot(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            executable,
            fast,
            capacity,
        })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// The decision sequence for one round. Lazy and pure; consuming it has
    /// no side effects.
    pub fn generate(&self) -> WavePlan<'_> {
        WavePlan::new(&self.config, &self.fast[0], &self.capacity, &self.executable)
    }

    /// Render the full sequence as a human-readable trace without sleeping
    /// or launching anything. Same steps as `run`, side effects excepted.
    pub fn describe(&self) -> String {
        let mut out = Vec::new();
        let mut total = 0u32;
        for step in self.generate() {
            out.push(format!("step {}", step.index));
            for launch in &step.launches {
                total += 1;
                out.push(format!("  would launch: {}", launch.job));
            }
            if let Some(pause) = step.pause {
                let min = pause.duration.as_secs() / 60;
                match pause.kind {
                    PauseKind::Stagger => out.push(format!("  pause {min} min")),
                    PauseKind::RoundBoundary => {
                        out.push(format!("  wave complete, pause {min} min"))
                    }
                }
            }
        }
        out.push(format!("done, total plots: {total}"));
        out.join("\n")
    }

    /// Drive the sequence for real: hand each launch to the worker pool and
    /// sleep out each pause. Returns the number of launches dispatched.
    ///
    /// With `dry_run` set, pauses are skipped entirely; launches still go
    /// to whatever launcher the caller supplied.
    pub async fn run(&self, launcher: &dyn JobLauncher) -> Result<u32> {
        let mut total = 0u32;
        for step in self.generate() {
            debug!(step = step.index, launches = step.launches.len(), "scheduling step");
            for launch in &step.launches {
                total += 1;
                launcher.launch(launch.job.clone()).await?;
            }
            if let Some(pause) = step.pause {
                if self.config.dry_run {
                    continue;
                }
                let min = pause.duration.as_secs() / 60;
                match pause.kind {
                    PauseKind::Stagger => info!("pausing {min} min before next launch"),
                    PauseKind::RoundBoundary => info!("wave complete, pausing {min} min"),
                }
                tokio::time::sleep(pause.duration).await;
            }
        }
        info!(total, "round complete");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pw_process::JobSpec;
    use std::path::Path;
    use std::sync::Mutex;

    /// Records every dispatched job; never spawns anything.
    #[derive(Default)]
    struct RecordingLauncher {
        jobs: Mutex<Vec<JobSpec>>,
    }

    #[async_trait]
    impl JobLauncher for RecordingLauncher {
        async fn launch(&self, job: JobSpec) -> Result<()> {
            self.jobs.lock().unwrap().push(job);
            Ok(())
        }
    }

    fn scheduler_with(
        root: &Path,
        fast_concurrency: u32,
        capacity_disks: usize,
        ring: bool,
    ) -> WaveScheduler {
        let mut config = PlotConfig::default();
        config.fast_pool = vec![root.join("ssd")];
        config.capacity_pool = (0..capacity_disks).map(|i| root.join(format!("d{i}"))).collect();
        config.fast_concurrency = fast_concurrency;
        config.capacity_ring = ring;
        config.dry_run = true;
        WaveScheduler::new(config, PathBuf::from("chia")).unwrap()
    }

    #[test]
    fn test_construction_prepares_slot_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let _scheduler = scheduler_with(dir.path(), 2, 2, true);
        assert!(dir.path().join("ssd/t").is_dir());
        assert!(dir.path().join("ssd/f").is_dir());
        assert!(dir.path().join("d1/t").is_dir());
        assert!(dir.path().join("d1/f").is_dir());
    }

    #[test]
    fn test_invalid_config_rejected_before_any_dir_creation() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PlotConfig::default();
        config.fast_pool = vec![dir.path().join("ssd")];
        config.capacity_pool = vec![];
        config.capacity_ring = true;
        let err = WaveScheduler::new(config, PathBuf::from("chia")).unwrap_err();
        assert!(matches!(err, PlotError::InvalidConfiguration(_)));
        // Validation failed before the fast-pool slot was prepared.
        assert!(!dir.path().join("ssd").exists());
    }

    #[test]
    fn test_describe_ring_off_counts_and_sources() {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = scheduler_with(dir.path(), 5, 2, false);
        let trace = scheduler.describe();

        assert_eq!(trace.matches("would launch:").count(), 5);
        let fast_temp = dir.path().join("ssd/t").display().to_string();
        for line in trace.lines().filter(|l| l.contains("would launch:")) {
            assert!(line.contains(&fast_temp));
        }
        assert!(trace.ends_with("done, total plots: 5"));
    }

    #[test]
    fn test_describe_matches_generate_total() {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = scheduler_with(dir.path(), 6, 3, true);
        let generated: usize = scheduler.generate().map(|s| s.launches.len()).sum();
        let trace = scheduler.describe();
        assert!(trace.contains(&format!("total plots: {generated}")));
    }

    #[test]
    fn test_describe_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = scheduler_with(dir.path(), 6, 3, true);
        assert_eq!(scheduler.describe(), scheduler.describe());
    }

    #[test]
    fn test_describe_never_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PlotConfig::default();
        config.fast_pool = vec![dir.path().join("ssd")];
        config.capacity_pool = vec![dir.path().join("d0"), dir.path().join("d1")];
        config.dry_run = false; // describe must not sleep even for a real run config
        let scheduler = WaveScheduler::new(config, PathBuf::from("chia")).unwrap();

        let started = std::time::Instant::now();
        let _trace = scheduler.describe();
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_run_dispatches_in_step_order() {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = scheduler_with(dir.path(), 2, 2, true);
        let launcher = RecordingLauncher::default();

        let total = scheduler.run(&launcher).await.unwrap();
        assert_eq!(total, 4);

        let jobs = launcher.jobs.lock().unwrap();
        assert_eq!(jobs.len(), 4);
        // Step 0 dispatches the capacity-ring job before the fast-pool job.
        let d0_temp = dir.path().join("d0/t").display().to_string();
        let ssd_temp = dir.path().join("ssd/t").display().to_string();
        assert!(jobs[0].render().contains(&d0_temp));
        assert!(jobs[1].render().contains(&ssd_temp));
    }

    #[tokio::test]
    async fn test_run_total_matches_describe_summary() {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = scheduler_with(dir.path(), 6, 2, true);
        let launcher = RecordingLauncher::default();
        let total = scheduler.run(&launcher).await.unwrap();
        assert!(scheduler
            .describe()
            .contains(&format!("total plots: {total}")));
    }

    #[tokio::test]
    async fn test_run_twice_is_idempotent_over_state() {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = scheduler_with(dir.path(), 3, 2, false);
        let first = RecordingLauncher::default();
        let second = RecordingLauncher::default();
        scheduler.run(&first).await.unwrap();
        scheduler.run(&second).await.unwrap();
        assert_eq!(*first.jobs.lock().unwrap(), *second.jobs.lock().unwrap());
    }
}
