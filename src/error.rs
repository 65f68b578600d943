use std::{io, path::PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),
    #[error("{}: missing '{}' field", .file.display(), .field)]
    Schema { file: PathBuf, field: &'static str },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error)
}
