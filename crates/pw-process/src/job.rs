use pw_config::PlotConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// A fully formed external plot command: executable plus argument vector.
///
/// Argument order mirrors the plotter CLI:
/// `plots create -k K -n N -b B -r R [-f FARMER] [-p POOL] -t TEMP -d FINAL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl JobSpec {
    /// Build a tokio command ready to spawn.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Single-line rendering used in traces and failure reports.
    pub fn render(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl std::fmt::Display for JobSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Construct the plot command for one (scratch, destination) pair.
pub fn build_job_spec(
    config: &PlotConfig,
    executable: &Path,
    temp_dir: &Path,
    final_dir: &Path,
) -> JobSpec {
    let mut args = vec![
        "plots".to_string(),
        "create".to_string(),
        "-k".to_string(),
        config.plot_k.to_string(),
        "-n".to_string(),
        config.plots_per_job.to_string(),
        "-b".to_string(),
        config.buffer_mib.to_string(),
        "-r".to_string(),
        config.threads.to_string(),
    ];
    if let Some(key) = &config.farmer_public_key {
        args.push("-f".to_string());
        args.push(key.clone());
    }
    if let Some(key) = &config.pool_public_key {
        args.push("-p".to_string());
        args.push(key.clone());
    }
    args.push("-t".to_string());
    args.push(temp_dir.display().to_string());
    args.push("-d".to_string());
    args.push(final_dir.display().to_string());

    JobSpec {
        program: executable.to_path_buf(),
        args,
    }
}
