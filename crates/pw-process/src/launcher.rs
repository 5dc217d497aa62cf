use anyhow::{Context, Result};
use async_trait::async_trait;
use pw_core::PlotError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::job::JobSpec;

/// Locate the plot executable.
///
/// An argument containing a path separator is taken as an explicit path and
/// only checked for existence; a bare name is resolved through PATH.
pub fn locate_executable(name: &str) -> Result<PathBuf, PlotError> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        if candidate.exists() {
            return Ok(candidate.to_path_buf());
        }
        return Err(PlotError::ExecutableNotFound(name.to_string()));
    }
    which::which(name).map_err(|_| PlotError::ExecutableNotFound(name.to_string()))
}

/// The scheduler's view of job execution: a non-blocking handoff.
///
/// `launch` must return once the job is submitted; completion, success, and
/// failure stay inside the launcher. Per-job failures are reported, never
/// retried, and never surfaced back into the scheduling sequence.
#[async_trait]
pub trait JobLauncher: Send + Sync {
    async fn launch(&self, job: JobSpec) -> Result<()>;
}

/// Production launcher: spawns the external plotter on a worker pool of
/// fixed size, at most `pool_size` submissions outstanding at once.
pub struct ProcessLauncher {
    permits: Arc<Semaphore>,
    pool_size: usize,
}

impl ProcessLauncher {
    pub fn new(pool_size: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(pool_size)),
            pool_size,
        }
    }

    /// Wait until every outstanding job has finished.
    ///
    /// Call after the scheduling sequence completes; otherwise dropping the
    /// launcher would orphan the permits while children keep running.
    pub async fn drain(&self) -> Result<()> {
        let _all = self
            .permits
            .acquire_many(self.pool_size as u32)
            .await
            .context("Worker pool closed while draining")?;
        Ok(())
    }
}

#[async_trait]
impl JobLauncher for ProcessLauncher {
    async fn launch(&self, job: JobSpec) -> Result<()> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .context("Worker pool closed")?;

        info!(job = %job, "launching plot job");
        tokio::spawn(async move {
            let _permit = permit;
            match job.command().status().await {
                Ok(status) if status.success() => {
                    info!(job = %job, "plot job finished");
                }
                Ok(status) => {
                    let err = PlotError::LaunchFailure {
                        job: job.render(),
                        exit_code: status.code().unwrap_or(1),
                    };
                    warn!("{err}");
                }
                Err(e) => {
                    warn!(job = %job, error = %e, "failed to spawn plot job");
                }
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_executable_missing_name() {
        let err = locate_executable("definitely-not-a-real-plotter-binary").unwrap_err();
        assert!(matches!(err, PlotError::ExecutableNotFound(_)));
    }

    #[test]
    fn test_locate_executable_explicit_path_missing() {
        let err = locate_executable("/no/such/dir/chia").unwrap_err();
        assert!(matches!(err, PlotError::ExecutableNotFound(_)));
    }

    #[test]
    fn test_locate_executable_explicit_path_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chia");
        std::fs::write(&path, b"").unwrap();
        let found = locate_executable(path.to_str().unwrap()).unwrap();
        assert_eq!(found, path);
    }

    #[tokio::test]
    async fn test_launch_returns_before_job_completes() {
        let launcher = ProcessLauncher::new(1);
        // `sleep 5` would block for seconds if launch waited on completion.
        let job = JobSpec {
            program: PathBuf::from("sleep"),
            args: vec!["5".into()],
        };
        let started = std::time::Instant::now();
        launcher.launch(job).await.unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_drain_waits_for_outstanding_jobs() {
        let launcher = ProcessLauncher::new(2);
        let job = JobSpec {
            program: PathBuf::from("true"),
            args: vec![],
        };
        launcher.launch(job.clone()).await.unwrap();
        launcher.launch(job).await.unwrap();
        launcher.drain().await.unwrap();
        // All permits back: another drain returns immediately.
        launcher.drain().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_job_does_not_error_launch() {
        let launcher = ProcessLauncher::new(1);
        let job = JobSpec {
            program: PathBuf::from("false"),
            args: vec![],
        };
        launcher.launch(job).await.unwrap();
        launcher.drain().await.unwrap();
    }
}
