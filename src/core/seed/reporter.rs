//! Accumulates outcomes and decides the run's disposition (fail-fast)

use super::types::{RunDisposition, RunReport, RunSummary, WriteOutcome};
use std::ops::ControlFlow;
use tracing::{error, info};

/// Collects outcomes in submission order
#[derive(Debug)]
pub struct RunReporter {
    summary: RunSummary,
    failure: Option<(usize, String)>,
}

impl RunReporter {
    pub fn new(total_records: usize, total_batches: usize) -> Self {
        Self {
            summary: RunSummary {
                total_records,
                total_batches,
                outcomes: Vec::with_capacity(total_batches),
            },
            failure: None,
        }
    }

    /// Record the next outcome; `Break` means no further batch may be submitted.
    pub fn record(&mut self, outcome: WriteOutcome) -> ControlFlow<()> {
        if self.failure.is_some() {
            return ControlFlow::Break(());
        }

        let index = self.summary.outcomes.len();
        if let WriteOutcome::Failure(reason) = &outcome {
            self.failure = Some((index, reason.clone()));
        }
        self.summary.outcomes.push(outcome);

        if self.failure.is_some() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Finalize the run
    pub fn finish(self) -> RunReport {
        let disposition = match self.failure {
            Some((batch_index, reason)) => {
                error!(
                    "Seed failed at batch {}/{}: {} ({})",
                    batch_index + 1,
                    self.summary.total_batches,
                    reason,
                    self.summary
                );
                RunDisposition::Failed {
                    batch_index,
                    reason,
                }
            }
            None => {
                info!("Seed completed: {}", self.summary);
                RunDisposition::Succeeded
            }
        };

        RunReport {
            summary: self.summary,
            disposition,
        }
    }
}
