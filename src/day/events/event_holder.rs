use super::Event;
use std::cmp::Ordering;

/// Helper struct for the event queue. Pairs an [`Event`] with a record of its insertion sequence.
///
/// The implementation of [`Ord`] on this struct compares execution time first, then event kind (arrivals sort before
/// completions at the same instant), and finally the insertion sequence to make the order total and stable.
#[derive(Debug)]
pub(super) struct EventHolder {
    pub event: Event,
    pub insertion_sequence: usize,
}

impl PartialEq<Self> for EventHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EventHolder {}

impl PartialOrd<Self> for EventHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        self.event
            .time
            .cmp(&other.event.time)
            .then(self.event.kind.cmp(&other.event.kind))
            .then(self.insertion_sequence.cmp(&other.insertion_sequence))
    }
}
