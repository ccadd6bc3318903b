//! Role-based maintenance-report tracking core.
//!
//! Administrators manage users, locations, and submitted field reports;
//! technicians submit and review their own. All state lives in an
//! in-memory domain store seeded from mock data, with simulated network
//! latency and a file-backed session record standing in for a backend.
//!
//! The crate is organised hexagonally:
//!
//! - [`domain`]: entities, the [`domain::TrackerService`] store, access
//!   guards, pure query/aggregation functions, and the ports the store
//!   drives.
//! - [`outbound`]: adapters for the durable session record and the
//!   notification sink.
//! - [`export`]: CSV rendering of report selections.
//! - [`seed`]: conversion of the mock seed records into domain entities.

pub mod domain;
pub mod export;
pub mod outbound;
pub mod seed;
