//! Statistics Model

use serde::{Deserialize, Serialize};

/// Aggregate ticket counts, recomputed server-side and fetched fresh on
/// every admin dashboard load. Absent keys default to zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub critical: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_snapshot_defaults_missing_counts() {
        let stats: Statistics =
            serde_json::from_str(r#"{"total": 5, "inProgress": 2}"#).unwrap();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.critical, 0);
    }
}
