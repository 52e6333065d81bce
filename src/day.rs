mod arrivals;
mod events;
mod simulation;
mod statistics;

pub use arrivals::generate_arrivals;
pub use events::{Event, EventKind, EventQueue};
pub use simulation::{DaySimulation, Desk, ARTICLES_PER_HOUR};
pub use statistics::{DayOutcome, DayStats, QueueLengthHistogram};
