use std::io;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Serial transport unavailable: {0}")]
    Unavailable(String),

    #[error("Serial I/O error: {0}")]
    Io(#[from] io::Error),
}
