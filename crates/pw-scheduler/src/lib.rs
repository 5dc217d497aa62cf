//! Wave scheduling: one deterministic decision generator consumed by two
//! executors (the async dispatching driver and the pure dry-run recorder).

pub mod plan;
pub mod scheduler;
pub mod slots;

pub use plan::{Launch, Pause, PauseKind, SchedulingStep, WavePlan};
pub use scheduler::WaveScheduler;
pub use slots::{DeviceSlot, prepare_slot};
