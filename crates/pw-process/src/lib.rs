//! Job launching: plot command construction, executable lookup, and the
//! bounded worker pool that executes jobs off the scheduling driver.

pub mod job;
pub mod launcher;

pub use job::{JobSpec, build_job_spec};
pub use launcher::{JobLauncher, ProcessLauncher, locate_executable};
