use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Exceeded maximum of {attempts} attempts")]
    AttemptsExceeded { attempts: u32 },

    #[error("Input closed")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
