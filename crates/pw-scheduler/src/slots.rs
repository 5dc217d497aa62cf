use pw_core::PlotError;
use std::path::{Path, PathBuf};

/// Scratch/output directory pair for one physical device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSlot {
    /// `<device>/t` — scratch space for in-progress plots.
    pub temp_dir: PathBuf,
    /// `<device>/f` — where finished plots land.
    pub final_dir: PathBuf,
}

/// Resolve the `t`/`f` pair under a device path, creating both directories
/// if absent. Idempotent; a restart over existing directories is a no-op.
pub fn prepare_slot(device: &Path) -> Result<DeviceSlot, PlotError> {
    let temp_dir = device.join("t");
    let final_dir = device.join("f");
    for dir in [&temp_dir, &final_dir] {
        std::fs::create_dir_all(dir).map_err(|source| PlotError::EnvironmentUnavailable {
            path: dir.clone(),
            source,
        })?;
    }
    Ok(DeviceSlot {
        temp_dir,
        final_dir,
    })
}
