//! Classroom occupancy and booking-conflict engine.
//!
//! The [`core`] module holds the domain: the typed campus model, the
//! [`core::repository::OccupancyStore`] boundary, the conflict checker and the
//! hourly occupancy reporter. [`config`] and [`logger`] carry the ambient
//! configuration and logging shared with the `roomocc` CLI.

pub mod config;
pub mod core;
pub mod logger;

/// Returns the current version of the `room-occupancy` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
