//! Selection of events that get generated.

use talkgen_types::Event;

/// Keep only events whose state is eligible (`unconfirmed` or `confirmed`).
///
/// Survivors keep their relative order.
pub fn eligible_events(events: Vec<Event>) -> Vec<Event> {
    events
        .into_iter()
        .filter(|event| event.state.is_eligible())
        .collect()
}
