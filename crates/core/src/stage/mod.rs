//! Construction-stage domain rules.
//!
//! A stage is a scheduled work interval with a name, a UTC time window, a
//! derived duration, a display color, an optional external reference, and a
//! lifecycle status. This module holds the pure parts: the lifecycle and
//! duration-unit enums, the per-field validators, and the duration
//! calculator. Persistence and orchestration live in `sitework-db`.

pub mod duration;
pub mod status;
pub mod validate;

pub use duration::{compute_duration, DurationUnit};
pub use status::StageStatus;
