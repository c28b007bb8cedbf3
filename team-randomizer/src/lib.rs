//! Seeded, reproducible team assignment.
//!
//! [`teams::randomize_teams`] splits a pool of people into fixed-size teams
//! over several rounds while keeping each person's appearance count within
//! bounds. [`teams::regenerate_teams_with_disabled`] repairs an existing
//! assignment after people drop out of individual rounds. Both are pure
//! functions of their inputs; all randomness comes from [`rng::SeededRng`].

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod parser;
pub mod request;
pub mod rng;
pub mod teams;
pub mod web;

pub use error::{FailureKind, RandomizeError, RequestError};
pub use rng::SeededRng;
