//! Interactive ThingsBoard telemetry exporter.
//!
//! Logs in, lets the operator pick devices, keys and an IST time range, then
//! fetches each device's time-series and writes one spreadsheet sheet per
//! device.

pub mod client;
pub mod config;
pub mod errors;
pub mod export;
pub mod merge;
pub mod model;
pub mod session;
pub mod window;
pub mod workbook;

pub use client::{TelemetrySource, ThingsboardClient};
pub use config::Config;
pub use errors::{Error, Result};
pub use session::{run_session, ExportSummary};
