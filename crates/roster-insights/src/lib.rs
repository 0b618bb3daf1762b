//! Roster classification and headcount analytics.
//!
//! Roster exports are parsed into a [`roster::RawTable`], cleaned into a
//! [`roster::CanonicalTable`] with queue type, leave status and role category
//! labels attached, then summarized by the functions in [`roster::report`].

pub mod config;
pub mod error;
pub mod roster;
pub mod telemetry;
