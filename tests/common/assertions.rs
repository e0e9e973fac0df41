//! Custom test assertions
//!
//! Provides domain-specific assertions for run reports.

use db_seeds::core::seed::{RunDisposition, RunReport};

/// Assertions for RunReport
pub trait RunReportAssertions {
    /// Assert every batch was written
    fn assert_succeeded(&self);

    /// Assert the run stopped at batch `index` (0-based) after attempting it
    fn assert_failed_at(&self, index: usize);
}

impl RunReportAssertions for RunReport {
    fn assert_succeeded(&self) {
        assert!(
            self.is_success(),
            "Expected a successful run, got {:?}",
            self.disposition
        );
        assert_eq!(self.summary.attempted(), self.summary.total_batches);
        assert_eq!(self.exit_status(), 0);
    }

    fn assert_failed_at(&self, index: usize) {
        match &self.disposition {
            RunDisposition::Failed { batch_index, .. } => {
                assert_eq!(*batch_index, index, "Failed at the wrong batch")
            }
            RunDisposition::Succeeded => panic!("Expected run to fail at batch {}", index),
        }
        assert_eq!(self.summary.attempted(), index + 1);
        assert_eq!(self.summary.succeeded(), index);
        assert_eq!(self.exit_status(), 1);
    }
}
