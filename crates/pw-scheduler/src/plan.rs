use pw_config::PlotConfig;
use pw_core::types::ScratchSource;
use pw_process::{JobSpec, build_job_spec};
use std::path::Path;
use std::time::Duration;

use crate::slots::DeviceSlot;

/// One resolved launch: where scratch lives, where the plot lands, and the
/// exact command the launcher will run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub source: ScratchSource,
    pub job: JobSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseKind {
    /// Stagger between consecutive launches within a wave.
    Stagger,
    /// A wave just covered every capacity disk; wait out the round budget.
    RoundBoundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pause {
    pub kind: PauseKind,
    pub duration: Duration,
}

/// One step of the sequence: up to two launches (capacity-ring first, then
/// fast-pool), followed by a pause. The terminal step carries no pause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingStep {
    pub index: u32,
    pub launches: Vec<Launch>,
    pub pause: Option<Pause>,
}

impl SchedulingStep {
    pub fn is_terminal(&self) -> bool {
        self.pause.is_none()
    }
}

/// Lazy, finite, restartable sequence of scheduling steps for one round.
///
/// Pure computation over counters and the device-pool lists; never touches
/// the filesystem or the clock. Two passes over the same inputs yield
/// identical sequences.
pub struct WavePlan<'a> {
    config: &'a PlotConfig,
    fast: &'a DeviceSlot,
    capacity: &'a [DeviceSlot],
    executable: &'a Path,
    next: u32,
    done: bool,
}

impl<'a> WavePlan<'a> {
    /// Callers guarantee `capacity` is non-empty (and has at least two
    /// entries when the ring is enabled); config validation enforces this
    /// before a plan can exist.
    pub fn new(
        config: &'a PlotConfig,
        fast: &'a DeviceSlot,
        capacity: &'a [DeviceSlot],
        executable: &'a Path,
    ) -> Self {
        Self {
            config,
            fast,
            capacity,
            executable,
            next: 0,
            done: false,
        }
    }

    /// Steps this plan will yield: `max(fast_concurrency, capacity_count)`
    /// with the ring enabled, `fast_concurrency` otherwise.
    pub fn max_steps(&self) -> u32 {
        let n = self.capacity.len() as u32;
        if self.config.capacity_ring {
            self.config.fast_concurrency.max(n)
        } else {
            self.config.fast_concurrency
        }
    }

    fn step_at(&self, i: u32) -> SchedulingStep {
        let n = self.capacity.len() as u32;
        let idx = (i % n) as usize;
        let mut launches = Vec::with_capacity(2);

        // Ring: each capacity disk plots into the previous one, so over a
        // full wave every disk is both scratch and destination exactly once.
        if self.config.capacity_ring && i < n {
            let dest = (idx + self.capacity.len() - 1) % self.capacity.len();
            launches.push(Launch {
                source: ScratchSource::Capacity,
                job: build_job_spec(
                    self.config,
                    self.executable,
                    &self.capacity[idx].temp_dir,
                    &self.capacity[dest].final_dir,
                ),
            });
        }

        if i < self.config.fast_concurrency {
            launches.push(Launch {
                source: ScratchSource::Fast,
                job: build_job_spec(
                    self.config,
                    self.executable,
                    &self.fast.temp_dir,
                    &self.capacity[idx].final_dir,
                ),
            });
        }

        // The `i + 1` comparison is deliberate: the check looks at the step
        // about to start, so every launch-bearing index gets attempted
        // before the sequence ends.
        let pause = if i + 1 >= self.max_steps() {
            None
        } else if i % n != n - 1 {
            Some(Pause {
                kind: PauseKind::Stagger,
                duration: self.config.launch_interval(),
            })
        } else {
            // Whatever is left of the round budget once one full wave of
            // staggered launches has elapsed.
            let wave_min = self.capacity.len() as u64 * self.config.launch_interval_min;
            Some(Pause {
                kind: PauseKind::RoundBoundary,
                duration: Duration::from_secs(self.config.round_min.saturating_sub(wave_min) * 60),
            })
        };

        SchedulingStep {
            index: i,
            launches,
            pause,
        }
    }
}

impl Iterator for WavePlan<'_> {
    type Item = SchedulingStep;

    fn next(&mut self) -> Option<SchedulingStep> {
        if self.done {
            return None;
        }
        let step = self.step_at(self.next);
        self.next += 1;
        if step.is_terminal() {
            self.done = true;
        }
        Some(step)
    }
}
