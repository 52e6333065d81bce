//! # Overview
//!
//! deskq simulates a single-server library service desk, an M/M/1-style queue, over a fixed opening horizon. Customers
//! arrive with Poisson-distributed gaps, wait in a FIFO line, and are served one at a time with exponentially
//! distributed service times. While nobody is at the counter, the librarian writes articles at a fixed rate of
//! [`ARTICLES_PER_HOUR`](day::ARTICLES_PER_HOUR).
//!
//! Each simulated day reports three statistics:
//!
//! * the mean time a customer waited before service began,
//! * the time-weighted mean length of the line,
//! * the number of whole articles written during idle time.
//!
//! Days are fully independent. [`LibrarySimulation::simulate()`] runs them one after another on a caller-provided
//! random-number generator and averages them into a [`Summary`]; with the `parallel` feature,
//! [`LibrarySimulation::simulate_parallel()`] spreads them over a rayon thread pool.
//!
//! ```
//! use deskq::{DeskParameters, LibrarySimulation};
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64;
//!
//! let desk = LibrarySimulation::new(DeskParameters::new(8.0, 10.0, 6.0))?;
//! let mut rng = Pcg64::seed_from_u64(42);
//! let summary = desk.simulate(10, &mut rng)?;
//! assert_eq!(10, summary.days);
//! # Ok::<(), deskq::Error>(())
//! ```
//!
//! The [`day`] module exposes the engine underneath: the [`EventQueue`](day::EventQueue), the arrival generator and
//! the [`DaySimulation`](day::DaySimulation) that can be stepped one event at a time.
//!
//! # Features
//!
//! deskq offers one feature, `parallel`, enabled by default, which adds dependencies on [`rayon`] and [`rand_pcg`] for
//! [`LibrarySimulation::simulate_parallel()`].
//!
//! [`rayon`]: https://docs.rs/rayon/1
//! [`rand_pcg`]: https://docs.rs/rand_pcg/0.9

pub mod day;
mod error;
mod parameters;
mod replication;

pub use error::{Error, Result};
pub use parameters::{DeskParameters, SimTime};
pub use replication::{LibrarySimulation, Summary, DEFAULT_DAYS};
