use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "plotwave.toml";

/// One plot run's worth of settings. Built once, never mutated afterwards;
/// the scheduler borrows it for its whole lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotConfig {
    /// Plot size parameter (the `-k` argument).
    #[serde(default = "default_plot_k")]
    pub plot_k: u32,

    /// Plots each launched job produces (the `-n` argument).
    #[serde(default = "default_plots_per_job")]
    pub plots_per_job: u32,

    /// Memory buffer per job in MiB (the `-b` argument).
    #[serde(default = "default_buffer_mib")]
    pub buffer_mib: u32,

    /// Threads per job (the `-r` argument).
    #[serde(default = "default_threads")]
    pub threads: u32,

    /// Farmer public key; omitted from the command line when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farmer_public_key: Option<String>,

    /// Pool public key; omitted from the command line when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_public_key: Option<String>,

    /// Fast-pool (SSD) device paths. Element 0 is the scratch source for
    /// every fast-pool launch; additional entries only get their
    /// directories prepared.
    #[serde(default = "default_fast_pool")]
    pub fast_pool: Vec<PathBuf>,

    /// How many concurrent jobs the fast pool should carry per round.
    #[serde(default = "default_fast_concurrency")]
    pub fast_concurrency: u32,

    /// Capacity-pool (bulk storage) device paths, in ring order.
    #[serde(default = "default_capacity_pool")]
    pub capacity_pool: Vec<PathBuf>,

    /// Minimum minutes between consecutive launches within a wave.
    #[serde(default = "default_launch_interval_min")]
    pub launch_interval_min: u64,

    /// Minutes budgeted for one full round.
    #[serde(default = "default_round_min")]
    pub round_min: u64,

    /// Ring alternation: each capacity device also plots into the next one.
    #[serde(default = "default_capacity_ring")]
    pub capacity_ring: bool,

    /// Print decisions without spawning jobs or sleeping.
    #[serde(default)]
    pub dry_run: bool,

    /// Name or path of the plot executable.
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Best-effort telemetry endpoint; a single fire-and-forget GET per run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
}

fn default_plot_k() -> u32 {
    32
}

fn default_plots_per_job() -> u32 {
    20
}

fn default_buffer_mib() -> u32 {
    3390
}

fn default_threads() -> u32 {
    4
}

fn default_fast_pool() -> Vec<PathBuf> {
    vec![PathBuf::from("/mnt/ssd0")]
}

fn default_fast_concurrency() -> u32 {
    6
}

fn default_capacity_pool() -> Vec<PathBuf> {
    vec![PathBuf::from("/mnt/hdd0"), PathBuf::from("/mnt/hdd1")]
}

fn default_launch_interval_min() -> u64 {
    30
}

fn default_round_min() -> u64 {
    120
}

fn default_capacity_ring() -> bool {
    true
}

fn default_executable() -> String {
    "chia".to_string()
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            plot_k: default_plot_k(),
            plots_per_job: default_plots_per_job(),
            buffer_mib: default_buffer_mib(),
            threads: default_threads(),
            farmer_public_key: None,
            pool_public_key: None,
            fast_pool: default_fast_pool(),
            fast_concurrency: default_fast_concurrency(),
            capacity_pool: default_capacity_pool(),
            launch_interval_min: default_launch_interval_min(),
            round_min: default_round_min(),
            capacity_ring: default_capacity_ring(),
            dry_run: false,
            executable: default_executable(),
            report_url: None,
        }
    }
}

impl PlotConfig {
    /// Load from an explicit TOML file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load `plotwave.toml` from `dir` if present, defaults otherwise.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the configuration as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn launch_interval(&self) -> Duration {
        Duration::from_secs(self.launch_interval_min * 60)
    }

    pub fn round_duration(&self) -> Duration {
        Duration::from_secs(self.round_min * 60)
    }

    /// Remaining round budget after one full wave of staggered launches.
    /// Validation guarantees this does not underflow.
    pub fn round_remainder(&self) -> Duration {
        let wave_min = self.capacity_pool.len() as u64 * self.launch_interval_min;
        Duration::from_secs(self.round_min.saturating_sub(wave_min) * 60)
    }
}
