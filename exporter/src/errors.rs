use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Invalid date/time {input:?}: {reason}")]
    InvalidDateTime { input: String, reason: String },

    #[error("End time {end_ts} must be after start time {start_ts}")]
    InvalidWindow { start_ts: i64, end_ts: i64 },

    #[error("Interval must be a positive number of minutes")]
    InvalidInterval,

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Console error: {0}")]
    Console(#[from] console::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
