//! Terminal host for the user list component.
//!
//! # Overview
//! `user-list-core` decides what to show and which requests to send; this
//! crate sends them. It wires configuration (`config`), logging
//! (`logging`), a ureq-backed `transport`, and the `driver` that runs the
//! component on a single-threaded runtime with one cancellation scope per
//! in-flight request. `view` turns the rendered tree into terminal lines.

pub mod config;
pub mod driver;
pub mod logging;
pub mod transport;
pub mod view;

pub use config::Config;
pub use driver::Driver;
pub use transport::{Transport, UreqTransport};
