use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Page error: {0}")]
    Page(#[from] backtop::Error),

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
