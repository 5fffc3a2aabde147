//! Interactive ChirpStack downlink sender.
//!
//! The session collects DevEUI, FPort and payload from the console, encodes the
//! payload to base64 and enqueues it through the network server's gRPC API.

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod model;
pub mod payload;
pub mod session;

pub use client::{ChirpstackClient, DownlinkService};
pub use config::Config;
pub use errors::{Error, Result};
pub use session::{run_session, Outcome};
