use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown command '{0}'\n  hint: type 'help' for the list of commands")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}
