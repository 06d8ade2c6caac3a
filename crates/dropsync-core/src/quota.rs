//! Aggregate storage quota gate.
//!
//! The gate is consulted once per admission batch, before any file in the
//! batch is admitted: either the whole batch fits under the cap or the whole
//! batch is rejected. There is no partial admission.

use serde::Serialize;

use crate::units::human_size;

/// Gate that decides whether an incoming batch fits under the aggregate cap.
#[derive(Debug, Clone, Copy)]
pub struct StorageQuota {
    max_total_bytes: u64,
}

impl StorageQuota {
    pub fn new(max_total_bytes: u64) -> Self {
        Self { max_total_bytes }
    }

    /// Returns true if the existing total plus the incoming batch total stays
    /// within the cap.
    pub fn admits(&self, existing_total: u64, incoming_total: u64) -> bool {
        match existing_total.checked_add(incoming_total) {
            Some(total) => total <= self.max_total_bytes,
            None => false,
        }
    }

    pub fn limit_bytes(&self) -> u64 {
        self.max_total_bytes
    }

    /// Current usage against the cap, for presentation.
    pub fn usage(&self, existing_total: u64) -> StorageUsage {
        StorageUsage {
            used_bytes: existing_total,
            limit_bytes: self.max_total_bytes,
        }
    }
}

/// Usage information against the aggregate cap.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StorageUsage {
    pub used_bytes: u64,
    pub limit_bytes: u64,
}

impl StorageUsage {
    /// Used fraction of the cap as a percentage in [0,100].
    pub fn percent(&self) -> f64 {
        if self.limit_bytes == 0 {
            return 0.0;
        }
        (self.used_bytes as f64 / self.limit_bytes as f64 * 100.0).min(100.0)
    }

    /// "<used> / <limit>" label, e.g. "50 MB / 100 MB".
    pub fn label(&self) -> String {
        format!(
            "{} / {}",
            human_size(self.used_bytes),
            human_size(self.limit_bytes)
        )
    }
}
