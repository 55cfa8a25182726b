//! The sequential generation run.
//!
//! Raw records are decoded one by one, filtered by state, and generated in
//! order. A malformed record or a failed event is logged with its title and
//! skipped; it never stops the remaining events.

use serde_json::Value;
use talkgen_core::{AssetFetcher, RecordGenerator, eligible_events};
use talkgen_types::Event;
use tracing::warn;

/// Outcome counts of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Raw records received from the source.
    pub received: usize,
    /// Records that could not be decoded.
    pub malformed: usize,
    /// Decoded records dropped by the state filter.
    pub ineligible: usize,
    /// Events whose directory was written.
    pub generated: usize,
    /// Eligible events whose generation failed.
    pub failed: usize,
}

impl RunReport {
    /// Eligible events attempted.
    pub const fn eligible(&self) -> usize {
        self.generated.saturating_add(self.failed)
    }
}

/// Decode, filter, and generate every record in `raw`, in order.
pub async fn generate_all<F: AssetFetcher>(
    raw: Vec<Value>,
    generator: &RecordGenerator<F>,
) -> RunReport {
    let mut report = RunReport {
        received: raw.len(),
        ..RunReport::default()
    };

    let mut decoded = Vec::with_capacity(raw.len());
    for value in raw {
        match Event::from_value(value) {
            Ok(event) => decoded.push(event),
            Err(err) => {
                report.malformed = report.malformed.saturating_add(1);
                warn!(error = %err, "skipping malformed event record");
            }
        }
    }

    let decoded_count = decoded.len();
    let events = eligible_events(decoded);
    report.ineligible = decoded_count.saturating_sub(events.len());

    for event in &events {
        match generator.generate(event).await {
            Ok(_) => report.generated = report.generated.saturating_add(1),
            Err(err) => {
                report.failed = report.failed.saturating_add(1);
                warn!(title = %event.title, error = %err, "event generation failed");
            }
        }
    }

    report
}
