use serde::{Deserialize, Serialize};

/// Which pool a launch draws its scratch space from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScratchSource {
    /// Fast-pool scratch (the SSD), used by every wave.
    Fast,
    /// Capacity-pool scratch, used only when ring alternation is enabled.
    Capacity,
}

impl std::fmt::Display for ScratchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Capacity => write!(f, "capacity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_source_display() {
        assert_eq!(ScratchSource::Fast.to_string(), "fast");
        assert_eq!(ScratchSource::Capacity.to_string(), "capacity");
    }

    #[test]
    fn test_scratch_source_serializes_kebab_case() {
        let json = serde_json::to_string(&ScratchSource::Fast).unwrap();
        assert_eq!(json, "\"fast\"");
    }
}
